//! Core types and traits for the Pinhole URL shortener.
//!
//! This crate holds the base62 codec that maps identifiers to short codes,
//! the error taxonomy, and the repository traits shared by the record store
//! and the shortener service.

pub mod base62;
pub mod error;
pub mod link_id;
pub mod repository;
pub mod shortcode;

pub use error::{CoreError, DecodeError, EncodeError, StorageError};
pub use link_id::LinkId;
pub use repository::{LinkRecord, ReadRepository, Repository};
pub use shortcode::ShortCode;
