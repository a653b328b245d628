//! Key-Value persistence layer for the Lantern storefront.
//!
//! The storefront keeps exactly one piece of durable state, the cart
//! snapshot, as a JSON string under a fixed key. This crate provides the
//! [`KeyValueStore`] seam that state is written through, two backends for
//! it, and a typed [`Cache`] wrapper with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust
//! use lantern_cache::{Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Badge {
//!     count: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("badge", &Badge { count: 3 }).unwrap();
//!
//! let badge: Option<Badge> = cache.get("badge").unwrap();
//! assert_eq!(badge, Some(Badge { count: 3 }));
//! ```

mod error;
mod file;
mod kv;
mod store;

pub use error::CacheError;
pub use file::{validate_key, FileStore};
pub use kv::Cache;
pub use store::{KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
