//! URL shortener service implementation.
//!
//! This crate provides the identifier allocator that validates custom short
//! codes and the shortener service built on top of it. Core types are
//! re-exported from `pinhole_core`.

pub mod allocator;
pub mod error;
pub mod service;
pub mod shortener;

pub use allocator::{Allocation, IdAllocator, Rejection};
pub use error::{FieldErrors, ShortenerError};
pub use service::ShortenerService;
pub use shortener::{ShortLink, ShortenParams, Shortener, DEFAULT_RECENT_LIMIT};
