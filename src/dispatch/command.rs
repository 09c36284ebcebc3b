//! Command definitions
//!
//! Each logical control operation, its wire address, its argument kinds
//! and its normalization rule.

use serde_json::{Map, Value};

use super::Fields;
use crate::error::{Result, SliderError};
use crate::protocol::{Message, TypedValue};

// =============================================================================
// Ranges and Defaults
// =============================================================================

/// Jog speeds and joystick offsets
pub const SIGNED_UNIT: (f64, f64) = (-1.0, 1.0);

/// Absolute axis positions
pub const UNIT: (f64, f64) = (0.0, 1.0);

pub const DEADZONE_RANGE: (f64, f64) = (0.0, 0.5);
pub const EXPO_RANGE: (f64, f64) = (0.0, 0.95);

/// Centered axis position
pub const AXIS_CENTER: f64 = 0.5;

pub const DEFAULT_DEADZONE: f64 = 0.06;
pub const DEFAULT_EXPO: f64 = 0.35;
pub const DEFAULT_SLEW: f64 = 8000.0;
pub const DEFAULT_FILTER_HZ: f64 = 60.0;
pub const DEFAULT_DURATION: f64 = 2.0;
pub const DEFAULT_OFFSET_RANGE: i64 = 800;
pub const DEFAULT_PAN_MAP: (i64, i64) = (800, -800);

fn clamp(value: f64, (lo, hi): (f64, f64)) -> f64 {
    value.clamp(lo, hi)
}

// =============================================================================
// Command Kinds
// =============================================================================

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    SlideJog,
    Pan,
    Tilt,
    JoyPanTilt,
    JoyConfig,
    AxisPan,
    AxisTilt,
    AxisZoom,
    AxisSlide,
    PresetSet,
    PresetRecall,
    SlideGoto,
    OffsetRange,
    PanMap,
    TiltMap,
}

impl CommandKind {
    pub const ALL: [CommandKind; 15] = [
        CommandKind::SlideJog,
        CommandKind::Pan,
        CommandKind::Tilt,
        CommandKind::JoyPanTilt,
        CommandKind::JoyConfig,
        CommandKind::AxisPan,
        CommandKind::AxisTilt,
        CommandKind::AxisZoom,
        CommandKind::AxisSlide,
        CommandKind::PresetSet,
        CommandKind::PresetRecall,
        CommandKind::SlideGoto,
        CommandKind::OffsetRange,
        CommandKind::PanMap,
        CommandKind::TiltMap,
    ];

    /// OSC address the firmware listens on
    pub fn address(self) -> &'static str {
        match self {
            CommandKind::SlideJog => "/slide/jog",
            CommandKind::Pan => "/pan",
            CommandKind::Tilt => "/tilt",
            CommandKind::JoyPanTilt => "/joy/pt",
            CommandKind::JoyConfig => "/joy/config",
            CommandKind::AxisPan => "/axis_pan",
            CommandKind::AxisTilt => "/axis_tilt",
            CommandKind::AxisZoom => "/axis_zoom",
            CommandKind::AxisSlide => "/axis_slide",
            CommandKind::PresetSet => "/preset/set",
            CommandKind::PresetRecall => "/preset/recall",
            CommandKind::SlideGoto => "/slide/goto",
            CommandKind::OffsetRange => "/config/offset_range",
            CommandKind::PanMap => "/config/pan_map",
            CommandKind::TiltMap => "/config/tilt_map",
        }
    }

    /// Canonical route name used by the HTTP bridge and the CLI
    pub fn route(self) -> &'static str {
        match self {
            CommandKind::SlideJog => "slide/jog",
            CommandKind::Pan => "pan",
            CommandKind::Tilt => "tilt",
            CommandKind::JoyPanTilt => "joystick/combined",
            CommandKind::JoyConfig => "joystick/config",
            CommandKind::AxisPan => "axis_pan",
            CommandKind::AxisTilt => "axis_tilt",
            CommandKind::AxisZoom => "axis_zoom",
            CommandKind::AxisSlide => "axis_slide",
            CommandKind::PresetSet => "preset/set",
            CommandKind::PresetRecall => "preset/recall",
            CommandKind::SlideGoto => "slide/goto",
            CommandKind::OffsetRange => "config/offset_range",
            CommandKind::PanMap => "config/pan_map",
            CommandKind::TiltMap => "config/tilt_map",
        }
    }

    /// Look up a route name, including the `joystick/pan` and
    /// `joystick/tilt` aliases
    pub fn from_route(route: &str) -> Option<Self> {
        match route {
            "joystick/pan" => Some(CommandKind::Pan),
            "joystick/tilt" => Some(CommandKind::Tilt),
            _ => Self::ALL.into_iter().find(|kind| kind.route() == route),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CommandKind::SlideJog => "Slide jog speed (-1.0 to 1.0)",
            CommandKind::Pan => "Pan joystick offset (-1.0 to 1.0)",
            CommandKind::Tilt => "Tilt joystick offset (-1.0 to 1.0)",
            CommandKind::JoyPanTilt => "Combined pan/tilt joystick (-1.0 to 1.0 each)",
            CommandKind::JoyConfig => "Joystick deadzone, expo, slew and filter",
            CommandKind::AxisPan => "Absolute pan position (0.0 to 1.0)",
            CommandKind::AxisTilt => "Absolute tilt position (0.0 to 1.0)",
            CommandKind::AxisZoom => "Absolute zoom position (0.0 to 1.0)",
            CommandKind::AxisSlide => "Absolute slide position (0.0 to 1.0)",
            CommandKind::PresetSet => "Store a preset (steps per axis)",
            CommandKind::PresetRecall => "Move to a stored preset over a duration",
            CommandKind::SlideGoto => "Move the slide to a position over a duration",
            CommandKind::OffsetRange => "Joystick offset ranges in steps",
            CommandKind::PanMap => "Slide to pan compensation mapping",
            CommandKind::TiltMap => "Slide to tilt compensation mapping",
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

/// A command argument before it is pinned to a wire type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg {
    Float(f64),
    Int(i64),
}

impl Arg {
    /// Convert to the wire value, failing if it does not fit in 32 bits
    pub fn to_typed(self) -> Result<TypedValue> {
        match self {
            Arg::Float(v) => TypedValue::float(v),
            Arg::Int(v) => TypedValue::int(v),
        }
    }

    pub fn to_json(self) -> Value {
        match self {
            Arg::Float(v) => Value::from(v),
            Arg::Int(v) => Value::from(v),
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SlideJog { value: f64 },
    Pan { value: f64 },
    Tilt { value: f64 },
    JoyPanTilt { pan: f64, tilt: f64 },
    JoyConfig { deadzone: f64, expo: f64, slew: f64, filter_hz: f64 },
    AxisPan { value: f64 },
    AxisTilt { value: f64 },
    AxisZoom { value: f64 },
    AxisSlide { value: f64 },
    PresetSet { id: i64, pan: i64, tilt: i64, zoom: i64, slide: i64 },
    PresetRecall { id: i64, duration: f64 },
    SlideGoto { position: f64, duration: f64 },
    OffsetRange { pan_range: i64, tilt_range: i64 },
    PanMap { min: i64, max: i64 },
    TiltMap { min: i64, max: i64 },
}

impl Command {
    /// The command with every field at its default
    pub fn defaults(kind: CommandKind) -> Self {
        match kind {
            CommandKind::SlideJog => Command::SlideJog { value: 0.0 },
            CommandKind::Pan => Command::Pan { value: 0.0 },
            CommandKind::Tilt => Command::Tilt { value: 0.0 },
            CommandKind::JoyPanTilt => Command::JoyPanTilt { pan: 0.0, tilt: 0.0 },
            CommandKind::JoyConfig => Command::JoyConfig {
                deadzone: DEFAULT_DEADZONE,
                expo: DEFAULT_EXPO,
                slew: DEFAULT_SLEW,
                filter_hz: DEFAULT_FILTER_HZ,
            },
            CommandKind::AxisPan => Command::AxisPan { value: 0.0 },
            CommandKind::AxisTilt => Command::AxisTilt { value: 0.0 },
            CommandKind::AxisZoom => Command::AxisZoom { value: 0.0 },
            CommandKind::AxisSlide => Command::AxisSlide { value: 0.0 },
            CommandKind::PresetSet => Command::PresetSet {
                id: 0,
                pan: 0,
                tilt: 0,
                zoom: 0,
                slide: 0,
            },
            CommandKind::PresetRecall => Command::PresetRecall {
                id: 0,
                duration: DEFAULT_DURATION,
            },
            CommandKind::SlideGoto => Command::SlideGoto {
                position: AXIS_CENTER,
                duration: DEFAULT_DURATION,
            },
            CommandKind::OffsetRange => Command::OffsetRange {
                pan_range: DEFAULT_OFFSET_RANGE,
                tilt_range: DEFAULT_OFFSET_RANGE,
            },
            CommandKind::PanMap => Command::PanMap {
                min: DEFAULT_PAN_MAP.0,
                max: DEFAULT_PAN_MAP.1,
            },
            CommandKind::TiltMap => Command::TiltMap { min: 0, max: 0 },
        }
    }

    /// Parse a command from loosely-typed fields; absent fields take defaults
    pub fn from_fields(kind: CommandKind, fields: &Fields) -> Result<Self> {
        let command = match Self::defaults(kind) {
            Command::SlideJog { value } => Command::SlideJog {
                value: fields.float("value", value)?,
            },
            Command::Pan { value } => Command::Pan {
                value: fields.float("value", value)?,
            },
            Command::Tilt { value } => Command::Tilt {
                value: fields.float("value", value)?,
            },
            Command::JoyPanTilt { pan, tilt } => Command::JoyPanTilt {
                pan: fields.float("pan", pan)?,
                tilt: fields.float("tilt", tilt)?,
            },
            Command::JoyConfig {
                deadzone,
                expo,
                slew,
                filter_hz,
            } => Command::JoyConfig {
                deadzone: fields.float("deadzone", deadzone)?,
                expo: fields.float("expo", expo)?,
                slew: fields.float("slew", slew)?,
                filter_hz: fields.float("filter_hz", filter_hz)?,
            },
            Command::AxisPan { value } => Command::AxisPan {
                value: fields.float("value", value)?,
            },
            Command::AxisTilt { value } => Command::AxisTilt {
                value: fields.float("value", value)?,
            },
            Command::AxisZoom { value } => Command::AxisZoom {
                value: fields.float("value", value)?,
            },
            Command::AxisSlide { value } => Command::AxisSlide {
                value: fields.float("value", value)?,
            },
            Command::PresetSet {
                id,
                pan,
                tilt,
                zoom,
                slide,
            } => Command::PresetSet {
                id: fields.int("id", id)?,
                pan: fields.int("pan", pan)?,
                tilt: fields.int("tilt", tilt)?,
                zoom: fields.int("zoom", zoom)?,
                slide: fields.int("slide", slide)?,
            },
            Command::PresetRecall { id, duration } => Command::PresetRecall {
                id: fields.int("id", id)?,
                duration: fields.float("duration", duration)?,
            },
            Command::SlideGoto { position, duration } => Command::SlideGoto {
                position: fields.float("position", position)?,
                duration: fields.float("duration", duration)?,
            },
            Command::OffsetRange {
                pan_range,
                tilt_range,
            } => Command::OffsetRange {
                pan_range: fields.int("pan_range", pan_range)?,
                tilt_range: fields.int("tilt_range", tilt_range)?,
            },
            Command::PanMap { min, max } => Command::PanMap {
                min: fields.int("min", min)?,
                max: fields.int("max", max)?,
            },
            Command::TiltMap { min, max } => Command::TiltMap {
                min: fields.int("min", min)?,
                max: fields.int("max", max)?,
            },
        };
        Ok(command)
    }

    /// Get the command kind
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::SlideJog { .. } => CommandKind::SlideJog,
            Command::Pan { .. } => CommandKind::Pan,
            Command::Tilt { .. } => CommandKind::Tilt,
            Command::JoyPanTilt { .. } => CommandKind::JoyPanTilt,
            Command::JoyConfig { .. } => CommandKind::JoyConfig,
            Command::AxisPan { .. } => CommandKind::AxisPan,
            Command::AxisTilt { .. } => CommandKind::AxisTilt,
            Command::AxisZoom { .. } => CommandKind::AxisZoom,
            Command::AxisSlide { .. } => CommandKind::AxisSlide,
            Command::PresetSet { .. } => CommandKind::PresetSet,
            Command::PresetRecall { .. } => CommandKind::PresetRecall,
            Command::SlideGoto { .. } => CommandKind::SlideGoto,
            Command::OffsetRange { .. } => CommandKind::OffsetRange,
            Command::PanMap { .. } => CommandKind::PanMap,
            Command::TiltMap { .. } => CommandKind::TiltMap,
        }
    }

    pub fn address(&self) -> &'static str {
        self.kind().address()
    }

    /// Reject NaN and infinite floats
    ///
    /// JSON cannot carry them, but the typed entry points can.
    pub fn validate(&self) -> Result<()> {
        for (name, arg) in self.args() {
            if let Arg::Float(v) = arg {
                if !v.is_finite() {
                    return Err(SliderError::Validation(format!(
                        "field '{}' of {} must be finite, got {}",
                        name,
                        self.kind().route(),
                        v
                    )));
                }
            }
        }
        Ok(())
    }

    /// Clamp every bounded field into its range
    ///
    /// Out-of-range input saturates silently. Idempotent.
    pub fn normalized(self) -> Self {
        match self {
            Command::SlideJog { value } => Command::SlideJog {
                value: clamp(value, SIGNED_UNIT),
            },
            Command::Pan { value } => Command::Pan {
                value: clamp(value, SIGNED_UNIT),
            },
            Command::Tilt { value } => Command::Tilt {
                value: clamp(value, SIGNED_UNIT),
            },
            Command::JoyPanTilt { pan, tilt } => Command::JoyPanTilt {
                pan: clamp(pan, SIGNED_UNIT),
                tilt: clamp(tilt, SIGNED_UNIT),
            },
            Command::JoyConfig {
                deadzone,
                expo,
                slew,
                filter_hz,
            } => Command::JoyConfig {
                deadzone: clamp(deadzone, DEADZONE_RANGE),
                expo: clamp(expo, EXPO_RANGE),
                slew: slew.max(0.0),
                filter_hz: filter_hz.max(0.0),
            },
            Command::AxisPan { value } => Command::AxisPan {
                value: clamp(value, UNIT),
            },
            Command::AxisTilt { value } => Command::AxisTilt {
                value: clamp(value, UNIT),
            },
            Command::AxisZoom { value } => Command::AxisZoom {
                value: clamp(value, UNIT),
            },
            Command::AxisSlide { value } => Command::AxisSlide {
                value: clamp(value, UNIT),
            },
            Command::SlideGoto { position, duration } => Command::SlideGoto {
                position: clamp(position, UNIT),
                duration,
            },
            other @ (Command::PresetSet { .. }
            | Command::PresetRecall { .. }
            | Command::OffsetRange { .. }
            | Command::PanMap { .. }
            | Command::TiltMap { .. }) => other,
        }
    }

    /// Named arguments in wire order, each pinned to its wire kind
    pub fn args(&self) -> Vec<(&'static str, Arg)> {
        use Arg::{Float, Int};

        match *self {
            Command::SlideJog { value }
            | Command::Pan { value }
            | Command::Tilt { value }
            | Command::AxisPan { value }
            | Command::AxisTilt { value }
            | Command::AxisZoom { value }
            | Command::AxisSlide { value } => vec![("value", Float(value))],
            Command::JoyPanTilt { pan, tilt } => vec![("pan", Float(pan)), ("tilt", Float(tilt))],
            Command::JoyConfig {
                deadzone,
                expo,
                slew,
                filter_hz,
            } => vec![
                ("deadzone", Float(deadzone)),
                ("expo", Float(expo)),
                ("slew", Float(slew)),
                ("filter_hz", Float(filter_hz)),
            ],
            Command::PresetSet {
                id,
                pan,
                tilt,
                zoom,
                slide,
            } => vec![
                ("id", Int(id)),
                ("pan", Int(pan)),
                ("tilt", Int(tilt)),
                ("zoom", Int(zoom)),
                ("slide", Int(slide)),
            ],
            Command::PresetRecall { id, duration } => {
                vec![("id", Int(id)), ("duration", Float(duration))]
            }
            Command::SlideGoto { position, duration } => {
                vec![("position", Float(position)), ("duration", Float(duration))]
            }
            Command::OffsetRange {
                pan_range,
                tilt_range,
            } => vec![("pan_range", Int(pan_range)), ("tilt_range", Int(tilt_range))],
            Command::PanMap { min, max } | Command::TiltMap { min, max } => {
                vec![("min", Int(min)), ("max", Int(max))]
            }
        }
    }

    /// Build the protocol message for this command as-is
    pub fn to_message(&self) -> Result<Message> {
        let args = self
            .args()
            .into_iter()
            .map(|(_, arg)| arg.to_typed())
            .collect::<Result<Vec<_>>>()?;
        Ok(Message::with_args(self.address(), args))
    }

    /// Field values as they go on the wire, for acknowledging what was sent
    pub fn values(&self) -> Result<Map<String, Value>> {
        let message = self.to_message()?;
        Ok(self.acknowledge(&message))
    }

    /// Pair this command's field names with the encoded arguments of `message`
    pub(crate) fn acknowledge(&self, message: &Message) -> Map<String, Value> {
        self.args()
            .into_iter()
            .zip(message.args())
            .map(|((name, _), value)| (name.to_string(), wire_json(*value)))
            .collect()
    }
}

/// JSON for a wire value
///
/// Floats go through their shortest decimal form, so an f32 `0.2` is
/// reported as `0.2` rather than its widened f64 expansion.
fn wire_json(value: TypedValue) -> Value {
    match value {
        TypedValue::Int32(v) => Value::from(v),
        TypedValue::Float32(v) => v
            .to_string()
            .parse::<f64>()
            .map(Value::from)
            .unwrap_or(Value::Null),
    }
}
