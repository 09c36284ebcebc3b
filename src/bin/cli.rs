//! slider-osc CLI
//!
//! Command-line interface for sending commands straight to the slider.

use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use slider_osc::config::{DEFAULT_DEVICE_HOST, DEFAULT_DEVICE_PORT};
use slider_osc::dispatch::Arg;
use slider_osc::{
    protocol, Command, Config, Dispatcher, Fields, Operation, Outcome, RecordingTransport,
    Result, Transport, UdpTransport,
};
use tracing_subscriber::{fmt, EnvFilter};

/// slider-osc CLI
#[derive(Parser, Debug)]
#[command(name = "slider-osc-cli")]
#[command(about = "Send OSC commands to a motorized camera slider")]
#[command(version)]
struct Args {
    /// Device host (IP address or hostname)
    #[arg(long, default_value = DEFAULT_DEVICE_HOST)]
    host: String,

    /// Device OSC port
    #[arg(short, long, default_value_t = DEFAULT_DEVICE_PORT)]
    port: u16,

    /// Print the encoded packets instead of sending them
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send one operation, e.g. `send joystick/combined pan=0.2 tilt=-0.1`
    Send {
        /// Operation route name (see `list`)
        operation: String,

        /// Fields as name=value
        fields: Vec<String>,
    },

    /// Stop all movement
    Stop,

    /// Reset pan and tilt offsets
    ResetOffsets,

    /// Move every axis to center
    ResetAxes,

    /// Send a short sequence of commands to check the device responds
    Sequence {
        /// Pause between commands in milliseconds
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,
    },

    /// List operations, wire addresses and default fields
    List,
}

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,slider_osc=info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let ok = if args.dry_run {
        let dispatcher = Dispatcher::new(RecordingTransport::new());
        let ok = execute(&dispatcher, &args.command);
        for packet in dispatcher.transport().take() {
            print_packet(&packet);
        }
        ok
    } else {
        let config = Config::builder()
            .device_host(&args.host)
            .device_port(args.port)
            .build();
        if let Err(e) = config.validate() {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        tracing::info!("OSC target: {}", config.device);
        execute(&Dispatcher::new(UdpTransport::new(config.device)), &args.command)
    };

    if !ok {
        std::process::exit(1);
    }
}

fn execute<T: Transport>(dispatcher: &Dispatcher<T>, command: &Commands) -> bool {
    match command {
        Commands::Send { operation, fields } => send(dispatcher, operation, fields),
        Commands::Stop => report("stop", dispatcher.stop()),
        Commands::ResetOffsets => report("reset_offsets", dispatcher.reset_offsets()),
        Commands::ResetAxes => report("reset_all_axes", dispatcher.reset_all_axes()),
        Commands::Sequence { delay_ms } => sequence(dispatcher, Duration::from_millis(*delay_ms)),
        Commands::List => {
            list();
            true
        }
    }
}

fn send<T: Transport>(dispatcher: &Dispatcher<T>, route: &str, pairs: &[String]) -> bool {
    let Some(operation) = Operation::from_route(route) else {
        eprintln!("Unknown operation {:?}; run `list` to see them", route);
        return false;
    };
    let result = Fields::from_pairs(pairs).and_then(|fields| dispatcher.run(operation, &fields));
    report(operation.route(), result)
}

fn sequence<T: Transport>(dispatcher: &Dispatcher<T>, delay: Duration) -> bool {
    let steps = [
        ("Slide jog 0.5", Command::SlideJog { value: 0.5 }),
        ("Pan offset 0.2", Command::Pan { value: 0.2 }),
        ("Tilt offset 0.1", Command::Tilt { value: 0.1 }),
        (
            "Preset 0 (100, 200, 300, 400)",
            Command::PresetSet {
                id: 0,
                pan: 100,
                tilt: 200,
                zoom: 300,
                slide: 400,
            },
        ),
        ("Stop slide jog", Command::SlideJog { value: 0.0 }),
        ("Pan axis to center", Command::AxisPan { value: 0.5 }),
        ("Tilt axis to center", Command::AxisTilt { value: 0.5 }),
        ("Zoom axis to center", Command::AxisZoom { value: 0.5 }),
        ("Slide axis to center", Command::AxisSlide { value: 0.5 }),
    ];

    for (i, (label, command)) in steps.into_iter().enumerate() {
        if i > 0 {
            thread::sleep(delay);
        }
        println!("-> {}", label);
        if !report(label, dispatcher.execute(command)) {
            return false;
        }
    }

    println!("All commands sent. If the firmware is running, the slider should have moved.");
    true
}

fn report(label: &str, result: Result<Outcome>) -> bool {
    match result {
        Ok(outcome) if outcome.success => {
            if outcome.values.is_empty() {
                println!("sent {}", label);
            } else {
                println!("sent {} {}", label, serde_json::Value::Object(outcome.values));
            }
            true
        }
        Ok(_) => {
            eprintln!("failed to send {}", label);
            false
        }
        Err(e) => {
            eprintln!("{}: {}", label, e);
            false
        }
    }
}

fn list() {
    for operation in Operation::all() {
        match operation {
            Operation::Single(kind) => {
                let fields: Vec<String> = Command::defaults(kind)
                    .args()
                    .into_iter()
                    .map(|(name, arg)| {
                        let tag = match arg {
                            Arg::Float(_) => 'f',
                            Arg::Int(_) => 'i',
                        };
                        format!("{}:{}={}", name, tag, arg.to_json())
                    })
                    .collect();
                println!(
                    "{:<22} {:<22} {:<48} {}",
                    kind.route(),
                    kind.address(),
                    fields.join(" "),
                    kind.description()
                );
            }
            Operation::Composite(composite) => {
                println!(
                    "{:<22} {:<22} {:<48} {}",
                    composite.route(),
                    "-",
                    "",
                    composite.description()
                );
            }
        }
    }
}

fn print_packet(packet: &[u8]) {
    let hex: Vec<String> = packet.iter().map(|b| format!("{:02x}", b)).collect();
    match protocol::decode(packet) {
        Ok(message) => println!("{}\n  {}", message, hex.join(" ")),
        Err(e) => println!("<undecodable: {}>\n  {}", e, hex.join(" ")),
    }
}
