//! Middleware for `axum::Router` and HTTP request processing.
//!
//! ```rust,no_run
//! use axum::Router;
//! use coderefactor_server::middleware::{RouterObservabilityExt, RouterRecoveryExt};
//!
//! let app: Router = Router::new().with_observability().with_recovery();
//! ```

mod observability;
mod recovery;

pub use observability::{RouterObservabilityExt, track_requests};
pub use recovery::RouterRecoveryExt;
