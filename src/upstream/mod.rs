//! Upstream (Siege API) subsystem.
//!
//! # Data Flow
//! ```text
//! Handler
//!     → client.rs (build URL, send GET with identity headers)
//!     → Siege public API
//!     → status check → JSON decode
//!     → Ok(Value) | Err(UpstreamError)
//! ```

pub mod client;
pub mod error;

pub use client::{ProjectLookup, SiegeClient};
pub use error::UpstreamError;
