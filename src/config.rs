//! Configuration for slider-osc
//!
//! Centralized configuration with sensible defaults. Built once at startup
//! and handed to the transport and the HTTP bridge; never mutated afterwards.

use std::fmt;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::{Result, SliderError};

/// Default device address (slider firmware on the local network)
pub const DEFAULT_DEVICE_HOST: &str = "192.168.1.22";

/// Default UDP port the firmware listens on for OSC packets
pub const DEFAULT_DEVICE_PORT: u16 = 8000;

/// Default HTTP bind address for the web bridge
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:9000";

/// Immutable `(host, port)` of the device firmware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolve to the first socket address for this host
    ///
    /// Hostnames are resolved on every call so that a device which changes
    /// address (mDNS, DHCP) is picked up without a restart.
    pub fn resolve(&self) -> io::Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no address found for {}", self),
                )
            })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Main configuration for a slider-osc process
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device Configuration
    // -------------------------------------------------------------------------
    /// Where OSC packets are sent
    pub device: Endpoint,

    /// Check at startup that a route to the device exists
    pub probe_device: bool,

    // -------------------------------------------------------------------------
    // HTTP Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address (host:port)
    pub http_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: Endpoint::new(DEFAULT_DEVICE_HOST, DEFAULT_DEVICE_PORT),
            probe_device: true,
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings that can never work
    ///
    /// Reachability is not checked here; see `UdpTransport::probe`.
    pub fn validate(&self) -> Result<()> {
        if self.device.host.trim().is_empty() {
            return Err(SliderError::Config("device host must not be empty".to_string()));
        }
        if self.device.port == 0 {
            return Err(SliderError::Config("device port must not be 0".to_string()));
        }
        if self.http_addr.trim().is_empty() {
            return Err(SliderError::Config("HTTP listen address must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the device host (IP address or hostname)
    pub fn device_host(mut self, host: impl Into<String>) -> Self {
        self.config.device.host = host.into();
        self
    }

    /// Set the device UDP port
    pub fn device_port(mut self, port: u16) -> Self {
        self.config.device.port = port;
        self
    }

    /// Enable or disable the startup reachability check
    pub fn probe_device(mut self, probe: bool) -> Self {
        self.config.probe_device = probe;
        self
    }

    /// Set the HTTP listen address
    pub fn http_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.http_addr = addr.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
