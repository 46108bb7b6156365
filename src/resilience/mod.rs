//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (enforce the upstream deadline)
//!     → On failure: mapped to a gateway error, never retried
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Single attempt per request: generate calls are not idempotent

pub mod timeouts;

pub use timeouts::{with_deadline, DeadlineElapsed};
