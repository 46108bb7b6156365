//! Upstream (downstream service) subsystem.
//!
//! # Data Flow
//! ```text
//! text + resolved settings
//!     → client.rs build_payload ({ prompt, ...settings })
//!     → POST <upstream url> under a deadline
//!     → `text` field of the JSON reply, or a typed UpstreamError
//! ```

pub mod client;

pub use client::{build_payload, UpstreamClient, UpstreamError};
