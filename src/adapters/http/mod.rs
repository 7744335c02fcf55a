//! HTTP Adapter
//!
//! Route registration, the greeting handler and the handler error
//! type for the demo server.

pub mod error;
pub mod greeting;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, HttpServer};
