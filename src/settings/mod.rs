//! Settings resolution subsystem.
//!
//! # Data Flow
//! ```text
//! GenerateRequest { mode?, settings? }
//!     → resolver.rs (pick base profile, apply overrides, clamp max_length)
//!     → resolved Profile (request-scoped, never stored)
//!     → upstream payload
//! ```

pub mod resolver;

pub use resolver::{resolve, ResolveError, MAX_LENGTH_KEY};
