//! Caching for the course landing page.
//!
//! This crate provides:
//! - `RouteCachePolicy` - Route-level `Cache-Control` / `Vary` configuration
//! - `CacheHeadersBuilder` - Response cache headers, including the cache status
//! - `RevalidatingCache` - Read-through cache that refetches after a TTL
//! - `CacheBackend` - Storage seam (in-memory, or Spin key-value on wasm32)
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use landing_cache::{InMemoryBackend, RevalidatingCache};
//!
//! let cache = RevalidatingCache::new(InMemoryBackend::new(), Duration::from_secs(60));
//! let outcome = cache
//!     .get_or_fetch("product:ielts-course:en", || async { fetch_body().await })
//!     .await?;
//! ```

mod backend;
mod headers;
mod policy;
mod revalidate;

pub use backend::*;
pub use headers::*;
pub use policy::*;
pub use revalidate::*;
