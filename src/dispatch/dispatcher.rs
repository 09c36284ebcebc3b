//! Command Dispatcher
//!
//! Validates and clamps commands, encodes them and hands the packets to the
//! transport.

use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{Command, CommandKind, Composite, Fields, Operation};
use crate::error::Result;
use crate::protocol::{self, Message};
use crate::transport::Transport;

/// Result of a dispatched operation
///
/// `success` only reports that the local send completed; the device never
/// acknowledges. `values` holds the normalized fields as encoded on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub success: bool,

    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl Outcome {
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// Routes logical operations to the device
///
/// Holds no mutable state; share it behind an `Arc` to serve concurrent
/// requests.
pub struct Dispatcher<T> {
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // =========================================================================
    // Generic Entry Points
    // =========================================================================

    /// Run a single command or composite by operation
    pub fn run(&self, operation: Operation, fields: &Fields) -> Result<Outcome> {
        match operation {
            Operation::Single(kind) => self.dispatch(kind, fields),
            Operation::Composite(composite) => self.composite(composite),
        }
    }

    /// Parse fields for `kind` and execute the command
    pub fn dispatch(&self, kind: CommandKind, fields: &Fields) -> Result<Outcome> {
        let command = Command::from_fields(kind, fields)?;
        self.execute(command)
    }

    /// Validate, clamp, encode and send one command
    ///
    /// Validation and encoding errors are returned before anything is sent.
    /// A transport failure is reported as `success: false`.
    pub fn execute(&self, command: Command) -> Result<Outcome> {
        command.validate()?;
        let command = command.normalized();
        let (message, packet) = encode(&command)?;

        let success = self.send(&message, &packet);
        Ok(Outcome {
            success,
            values: command.acknowledge(&message),
        })
    }

    /// Send every command of a composite
    ///
    /// All packets are encoded up front; once sending starts every packet is
    /// attempted even if an earlier one failed.
    pub fn composite(&self, composite: Composite) -> Result<Outcome> {
        let encoded = composite
            .commands()
            .iter()
            .map(encode)
            .collect::<Result<Vec<_>>>()?;

        let mut success = true;
        for (message, packet) in &encoded {
            success &= self.send(message, packet);
        }

        if !success {
            tracing::warn!(
                "{} only partially delivered to transport",
                composite.route()
            );
        }

        Ok(Outcome {
            success,
            values: Map::new(),
        })
    }

    fn send(&self, message: &Message, packet: &[u8]) -> bool {
        tracing::debug!("Sending {}", message);
        match self.transport.send(packet) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to send {}: {}", message.address(), e);
                false
            }
        }
    }

    // =========================================================================
    // Per-Command Entry Points
    // =========================================================================

    pub fn slide_jog(&self, value: f64) -> Result<Outcome> {
        self.execute(Command::SlideJog { value })
    }

    pub fn pan(&self, value: f64) -> Result<Outcome> {
        self.execute(Command::Pan { value })
    }

    pub fn tilt(&self, value: f64) -> Result<Outcome> {
        self.execute(Command::Tilt { value })
    }

    pub fn joystick(&self, pan: f64, tilt: f64) -> Result<Outcome> {
        self.execute(Command::JoyPanTilt { pan, tilt })
    }

    pub fn joystick_config(
        &self,
        deadzone: f64,
        expo: f64,
        slew: f64,
        filter_hz: f64,
    ) -> Result<Outcome> {
        self.execute(Command::JoyConfig {
            deadzone,
            expo,
            slew,
            filter_hz,
        })
    }

    pub fn axis_pan(&self, value: f64) -> Result<Outcome> {
        self.execute(Command::AxisPan { value })
    }

    pub fn axis_tilt(&self, value: f64) -> Result<Outcome> {
        self.execute(Command::AxisTilt { value })
    }

    pub fn axis_zoom(&self, value: f64) -> Result<Outcome> {
        self.execute(Command::AxisZoom { value })
    }

    pub fn axis_slide(&self, value: f64) -> Result<Outcome> {
        self.execute(Command::AxisSlide { value })
    }

    pub fn set_preset(&self, id: i64, pan: i64, tilt: i64, zoom: i64, slide: i64) -> Result<Outcome> {
        self.execute(Command::PresetSet {
            id,
            pan,
            tilt,
            zoom,
            slide,
        })
    }

    pub fn recall_preset(&self, id: i64, duration: f64) -> Result<Outcome> {
        self.execute(Command::PresetRecall { id, duration })
    }

    pub fn slide_goto(&self, position: f64, duration: f64) -> Result<Outcome> {
        self.execute(Command::SlideGoto { position, duration })
    }

    pub fn offset_range(&self, pan_range: i64, tilt_range: i64) -> Result<Outcome> {
        self.execute(Command::OffsetRange {
            pan_range,
            tilt_range,
        })
    }

    pub fn pan_map(&self, min: i64, max: i64) -> Result<Outcome> {
        self.execute(Command::PanMap { min, max })
    }

    pub fn tilt_map(&self, min: i64, max: i64) -> Result<Outcome> {
        self.execute(Command::TiltMap { min, max })
    }

    // =========================================================================
    // Composite Entry Points
    // =========================================================================

    pub fn stop(&self) -> Result<Outcome> {
        self.composite(Composite::Stop)
    }

    pub fn reset_offsets(&self) -> Result<Outcome> {
        self.composite(Composite::ResetOffsets)
    }

    pub fn reset_all_axes(&self) -> Result<Outcome> {
        self.composite(Composite::ResetAllAxes)
    }
}

fn encode(command: &Command) -> Result<(Message, Bytes)> {
    let message = command.to_message()?;
    let packet = protocol::encode_message(&message)?;
    Ok((message, packet))
}
