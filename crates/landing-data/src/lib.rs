//! Data access for the course catalog API.
//!
//! This crate provides:
//! - `FetchClient` - GET requests with default headers and JSON decoding
//! - `HttpTransport` - The seam between the client and the platform's HTTP stack
//! - `SpinTransport` - Spin outbound HTTP (wasm32 only)
//! - `StaticTransport` - Canned responses for tests and local runs

mod client;
mod error;
mod transport;

pub use client::*;
pub use error::*;
pub use transport::*;
