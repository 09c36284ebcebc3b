//! Transport Module
//!
//! Delivers encoded packets to the device.
//!
//! ## Delivery Model
//! - Fire-and-forget: one datagram per packet, nothing awaited
//! - No retry; success only means the local send call completed
//! - Implementations must be shareable across request handlers

mod recording;
mod udp;

pub use recording::RecordingTransport;
pub use udp::UdpTransport;

use crate::error::Result;

/// Sink for encoded packets
pub trait Transport: Send + Sync {
    /// Send a single packet
    fn send(&self, packet: &[u8]) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, packet: &[u8]) -> Result<()> {
        (**self).send(packet)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, packet: &[u8]) -> Result<()> {
        (**self).send(packet)
    }
}
