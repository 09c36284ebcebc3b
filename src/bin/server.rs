//! slider-osc Server Binary
//!
//! Starts the HTTP bridge that forwards web control input to the slider.

use std::sync::Arc;

use clap::Parser;
use slider_osc::config::{DEFAULT_DEVICE_HOST, DEFAULT_DEVICE_PORT, DEFAULT_HTTP_ADDR};
use slider_osc::network::Server;
use slider_osc::{Config, Dispatcher, UdpTransport};
use tracing_subscriber::{fmt, EnvFilter};

/// slider-osc HTTP bridge
#[derive(Parser, Debug)]
#[command(name = "slider-osc-server")]
#[command(about = "HTTP to OSC bridge for a motorized camera slider")]
#[command(version)]
struct Args {
    /// Device host (IP address or hostname)
    #[arg(long, default_value = DEFAULT_DEVICE_HOST)]
    device_host: String,

    /// Device OSC port
    #[arg(long, default_value_t = DEFAULT_DEVICE_PORT)]
    device_port: u16,

    /// HTTP listen address (host:port)
    #[arg(short, long, default_value = DEFAULT_HTTP_ADDR)]
    listen: String,

    /// Skip the startup check that the device is routable
    #[arg(long)]
    no_probe: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,slider_osc=debug,tower_http=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .device_host(&args.device_host)
        .device_port(args.device_port)
        .http_addr(&args.listen)
        .probe_device(!args.no_probe)
        .build();

    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    tracing::info!("slider-osc Server v{}", slider_osc::VERSION);
    tracing::info!("OSC target: {}", config.device);
    tracing::info!("Listen address: {}", config.http_addr);

    let transport = UdpTransport::new(config.device.clone());

    if config.probe_device {
        match transport.probe() {
            Ok(addr) => tracing::info!("Device {} is routable via {}", config.device, addr),
            Err(e) => tracing::warn!(
                "Device not reachable ({}); commands will be sent anyway",
                e
            ),
        }
    }

    let dispatcher = Arc::new(Dispatcher::new(transport));
    let server = Server::new(config, dispatcher);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
