//! Dispatch Module
//!
//! Maps logical control operations to protocol messages.
//!
//! ## Flow
//! ```text
//! Fields ──parse──▶ Command ──clamp──▶ Message ──encode──▶ Transport
//! ```
//!
//! - Argument kinds are fixed per command, never inferred from input
//! - Clamping is silent; unparsable input is a validation error
//! - Composites (stop, resets) send several independent messages

mod command;
mod composite;
mod dispatcher;
mod fields;

pub use command::{
    Arg, Command, CommandKind, AXIS_CENTER, DEADZONE_RANGE, DEFAULT_DEADZONE, DEFAULT_DURATION,
    DEFAULT_EXPO, DEFAULT_FILTER_HZ, DEFAULT_OFFSET_RANGE, DEFAULT_PAN_MAP, DEFAULT_SLEW,
    EXPO_RANGE, SIGNED_UNIT, UNIT,
};
pub use composite::{Composite, Operation};
pub use dispatcher::{Dispatcher, Outcome};
pub use fields::Fields;
