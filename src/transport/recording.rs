//! Recording Transport
//!
//! Keeps packets in memory instead of sending them. Used for dry runs.

use bytes::Bytes;
use parking_lot::Mutex;

use super::Transport;
use crate::error::Result;

/// Transport that stores every packet it is given
#[derive(Debug, Default)]
pub struct RecordingTransport {
    packets: Mutex<Vec<Bytes>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all packets recorded so far, oldest first
    pub fn packets(&self) -> Vec<Bytes> {
        self.packets.lock().clone()
    }

    /// Remove and return all recorded packets
    pub fn take(&self) -> Vec<Bytes> {
        std::mem::take(&mut *self.packets.lock())
    }

    pub fn len(&self) -> usize {
        self.packets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.lock().is_empty()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, packet: &[u8]) -> Result<()> {
        self.packets.lock().push(Bytes::copy_from_slice(packet));
        Ok(())
    }
}
