//! Aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! UserRecord (from upstream "get user")
//!     → projects.rs (one lookup per project reference, all in flight at once)
//!     → join all (results kept in input order)
//!     → EnrichedUserRecord
//! ```
//!
//! # Design Decisions
//! - No shared mutable state: each lookup produces its own slot value
//! - Lookup failures are recorded inline and never fail the request
//! - No per-lookup timeout; the slowest lookup bounds the response

pub mod projects;

pub use projects::{enrich_projects, DETAILS_ERROR_FIELD, PROJECTS_FIELD};
