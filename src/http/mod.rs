//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request_id.rs (tag request with UUID)
//!     → handlers.rs (decode envelope, call the store, encode envelope)
//!     → store (durable file operations)
//! ```

pub mod handlers;
pub mod request_id;
pub mod server;

pub use request_id::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
