//! API Module
//!
//! HTTP handlers and routing for the cache server.
//!
//! # Endpoints
//! - `GET /heavy`, `GET /light` - Cached slow computations
//! - `GET /status`, `GET /status/:cache` - Cache contents
//! - `GET|POST /prune` - Clear caches
//! - `PUT /ttl` - Change the freshness window
//! - `DELETE /entries/:cache/:key` - Remove one entry
//! - `GET /`, `GET /health` - Health check

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
