//! UDP Transport
//!
//! Opens a fresh ephemeral socket per packet, sends once, closes.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use super::Transport;
use crate::config::Endpoint;
use crate::error::{Result, SliderError};

/// Connectionless sender targeting the device endpoint
#[derive(Debug, Clone)]
pub struct UdpTransport {
    endpoint: Endpoint,
}

impl UdpTransport {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Check that the OS has a route to the device
    ///
    /// Connecting a UDP socket sends nothing; it only fails when the address
    /// cannot be resolved or no interface can reach it.
    pub fn probe(&self) -> Result<SocketAddr> {
        let target = self.resolve()?;
        let socket = self.bind_for(target)?;
        socket
            .connect(target)
            .map_err(|e| self.transport_error(e))?;
        Ok(target)
    }

    fn resolve(&self) -> Result<SocketAddr> {
        self.endpoint.resolve().map_err(|e| self.transport_error(e))
    }

    fn bind_for(&self, target: SocketAddr) -> Result<UdpSocket> {
        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        UdpSocket::bind(local).map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, source: io::Error) -> SliderError {
        SliderError::Transport {
            endpoint: self.endpoint.to_string(),
            source,
        }
    }
}

impl Transport for UdpTransport {
    fn send(&self, packet: &[u8]) -> Result<()> {
        let target = self.resolve()?;
        let socket = self.bind_for(target)?;

        let sent = socket
            .send_to(packet, target)
            .map_err(|e| self.transport_error(e))?;
        if sent != packet.len() {
            return Err(self.transport_error(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {} of {} bytes", sent, packet.len()),
            )));
        }

        tracing::trace!("Sent {} bytes to {}", sent, target);
        Ok(())
    }
}
