//! Siege Proxy Library
//!
//! A small JSON proxy in front of the Siege public API. User lookups are
//! enriched by fetching every referenced project concurrently.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
