//! Local HTTP service for managing a user's zsh configuration files.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{ConfigStore, SafeFileWriter};
