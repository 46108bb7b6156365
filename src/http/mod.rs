//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, GenerateRequest body)
//!     → handlers.rs (limit check → settings resolution → upstream call)
//!     → response.rs / error.rs (JSON body, status mapping)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use error::GatewayError;
pub use request::{GenerateRequest, X_REQUEST_ID};
pub use response::{ErrorBody, GenerateResponse};
pub use server::{AppState, HttpServer};
