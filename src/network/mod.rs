//! Network Module
//!
//! HTTP bridge between the web control surface and the dispatcher.
//!
//! ## Routes
//! - `GET  /api/status` - liveness and configured device
//! - `POST /api/<operation>` - JSON object body, JSON acknowledgment

mod handlers;
mod server;

pub use handlers::router;
pub use server::Server;
