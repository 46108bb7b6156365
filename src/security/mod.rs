//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → DefaultBodyLimit (raw body size, see http::server; overrun → 400)
//!     → limits.rs (input text length)
//!     → Pass to settings resolution
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject before the upstream is contacted
//! - No trust in client input

pub mod limits;

pub use limits::{check_input_length, LimitError, GLOBAL_MAX_LENGTH, INPUT_MAX_LENGTH, TIMEOUT};
