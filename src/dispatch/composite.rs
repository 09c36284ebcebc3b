//! Composite operations
//!
//! Fixed sequences of commands. Sub-sends are independent: every one is
//! attempted, nothing is rolled back, and the overall result is the AND of
//! the individual results.

use super::command::{Command, CommandKind, AXIS_CENTER};

/// Multi-command operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Composite {
    /// Zero the slide jog and both joystick offsets
    Stop,
    /// Zero both joystick offsets
    ResetOffsets,
    /// Move all four axes to center
    ResetAllAxes,
}

impl Composite {
    pub const ALL: [Composite; 3] = [
        Composite::Stop,
        Composite::ResetOffsets,
        Composite::ResetAllAxes,
    ];

    pub fn route(self) -> &'static str {
        match self {
            Composite::Stop => "stop",
            Composite::ResetOffsets => "reset_offsets",
            Composite::ResetAllAxes => "reset_all_axes",
        }
    }

    pub fn from_route(route: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.route() == route)
    }

    pub fn description(self) -> &'static str {
        match self {
            Composite::Stop => "Stop all movement",
            Composite::ResetOffsets => "Reset pan and tilt offsets",
            Composite::ResetAllAxes => "Reset all axes to center (0.5)",
        }
    }

    /// The commands sent, in order
    pub fn commands(self) -> Vec<Command> {
        match self {
            Composite::Stop => vec![
                Command::SlideJog { value: 0.0 },
                Command::Pan { value: 0.0 },
                Command::Tilt { value: 0.0 },
            ],
            Composite::ResetOffsets => vec![Command::Pan { value: 0.0 }, Command::Tilt { value: 0.0 }],
            Composite::ResetAllAxes => vec![
                Command::AxisPan { value: AXIS_CENTER },
                Command::AxisTilt { value: AXIS_CENTER },
                Command::AxisZoom { value: AXIS_CENTER },
                Command::AxisSlide { value: AXIS_CENTER },
            ],
        }
    }
}

/// Anything a route name can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Single(CommandKind),
    Composite(Composite),
}

impl Operation {
    /// Resolve a route name such as `slide/jog` or `/stop`
    pub fn from_route(route: &str) -> Option<Self> {
        let route = route.trim_matches('/');
        CommandKind::from_route(route)
            .map(Operation::Single)
            .or_else(|| Composite::from_route(route).map(Operation::Composite))
    }

    pub fn route(self) -> &'static str {
        match self {
            Operation::Single(kind) => kind.route(),
            Operation::Composite(composite) => composite.route(),
        }
    }

    /// Every canonical operation
    pub fn all() -> impl Iterator<Item = Operation> {
        CommandKind::ALL
            .into_iter()
            .map(Operation::Single)
            .chain(Composite::ALL.into_iter().map(Operation::Composite))
    }
}
