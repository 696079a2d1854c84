//! Record stores for the Pinhole URL shortener.

pub mod memory;

pub use memory::InMemoryRepository;
pub use pinhole_core::repository::{LinkRecord, ReadRepository, Repository, Result};
pub use pinhole_core::StorageError;
