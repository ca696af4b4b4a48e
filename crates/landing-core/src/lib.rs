//! Core abstractions for the course landing page.
//!
//! This crate provides the fundamental types shared by every other crate:
//! - `LandingConfig` - Upstream endpoint and page presentation settings
//! - `RequestContext` - Method, path and query of the incoming request
//! - `TimingContext` / `LifecyclePhase` - Request lifecycle tracking
//! - `PageError` - Failures while producing a page

mod config;
mod context;
mod error;
mod lifecycle;

pub use config::*;
pub use context::*;
pub use error::*;
pub use lifecycle::*;
