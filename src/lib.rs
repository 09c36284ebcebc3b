//! # slider-osc
//!
//! Bridges a web or command-line control surface to a motorized camera
//! slider that speaks an OSC-style binary protocol over UDP:
//! - Pure message codec (encode/decode, 4-byte aligned, big-endian)
//! - Per-command validation and silent clamping
//! - Fire-and-forget UDP transport, fresh socket per packet
//! - Thin HTTP bridge and CLI on top of the same dispatcher
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │   HTTP bridge (axum)     │   │        CLI tool          │
//! └────────────┬─────────────┘   └────────────┬─────────────┘
//!              └──────────────┬───────────────┘
//!                             ▼
//!              ┌──────────────────────────────┐
//!              │      Command Dispatcher      │
//!              │   (parse, clamp, pin types)  │
//!              └──────────────┬───────────────┘
//!                             ▼
//!              ┌──────────────────────────────┐
//!              │        Message Codec         │
//!              └──────────────┬───────────────┘
//!                             ▼
//!              ┌──────────────────────────────┐
//!              │     Transport (UDP send)     │──────▶ device:8000
//!              └──────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod dispatch;
pub mod network;
pub mod protocol;
pub mod transport;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::{Config, Endpoint};
pub use dispatch::{Command, CommandKind, Composite, Dispatcher, Fields, Operation, Outcome};
pub use error::{Result, SliderError};
pub use protocol::{Message, TypedValue};
pub use transport::{RecordingTransport, Transport, UdpTransport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of slider-osc
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
