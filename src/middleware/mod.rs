//! Middleware components for HTTP request processing.
//!
//! Cross-cutting response handling layered onto the router in
//! [`crate::routes::build_router`].

pub mod security_headers;
