//! Public SDK for the course landing page.
//!
//! This crate re-exports the page infrastructure:
//!
//! ```ignore
//! use landing_sdk::prelude::*;
//!
//! let config = LandingConfig::default();
//! let client = FetchClient::new(SpinTransport)
//!     .with_default_header("X-TENMS-SOURCE-PLATFORM", &config.source_platform);
//! let cache = RevalidatingCache::new(SpinKvBackend::open_default()?, config.revalidate());
//!
//! let outcome = cache
//!     .get_or_fetch(&config.cache_key(), || client.fetch_text(&config.product_url()))
//!     .await?;
//! ```

pub use landing_cache;
pub use landing_core;
pub use landing_data;
pub use landing_observability;
pub use landing_streaming;

/// Prelude for convenient imports.
pub mod prelude {
    pub use landing_cache::*;
    pub use landing_core::*;
    pub use landing_data::*;
    pub use landing_observability::*;
    pub use landing_streaming::*;
}
