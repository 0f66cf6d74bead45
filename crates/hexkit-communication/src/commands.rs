//! Wire command encoding for the hexapod controller.
//!
//! The robot speaks a fire-and-forget ASCII protocol: movement is a
//! single letter, parameters are a letter followed by an integer and a
//! newline. There is no framing and no acknowledgement; this module
//! only guarantees correct encoding.

use serde::{Deserialize, Serialize};

/// A directional movement request, prior to wire encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementIntent {
    /// Walk forward
    Front,
    /// Walk backward
    Back,
    /// Turn left
    Left,
    /// Turn right
    Right,
}

impl MovementIntent {
    /// All movement intents, in wire-letter order
    pub const ALL: [MovementIntent; 4] = [
        MovementIntent::Front,
        MovementIntent::Back,
        MovementIntent::Left,
        MovementIntent::Right,
    ];

    /// The single command byte sent on the wire
    pub fn wire_byte(self) -> u8 {
        match self {
            MovementIntent::Front => b'F',
            MovementIntent::Back => b'B',
            MovementIntent::Left => b'L',
            MovementIntent::Right => b'R',
        }
    }

    /// Encode to the wire command string
    pub fn encode(self) -> String {
        (self.wire_byte() as char).to_string()
    }

    /// Decode a wire byte back to an intent
    ///
    /// The wire mapping is a bijection over the four intents, so
    /// `decode(x.wire_byte())` always recovers `x`.
    pub fn decode(byte: u8) -> Option<Self> {
        match byte {
            b'F' => Some(MovementIntent::Front),
            b'B' => Some(MovementIntent::Back),
            b'L' => Some(MovementIntent::Left),
            b'R' => Some(MovementIntent::Right),
            _ => None,
        }
    }

    /// Operator-facing label for the movement monitor
    pub fn label(self) -> &'static str {
        match self {
            MovementIntent::Front => "Moving forward",
            MovementIntent::Back => "Moving backward",
            MovementIntent::Left => "Turning left",
            MovementIntent::Right => "Turning right",
        }
    }
}

impl std::fmt::Display for MovementIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A parameter change request from a slider-style control
///
/// Values arrive as floats from the control surface and are clamped to
/// the parameter's range, then truncated to an integer for the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParameterIntent {
    /// Gait speed, 0 to 100
    Speed(f64),
    /// Leg lift height, 0 to 50
    LegHeight(f64),
}

impl ParameterIntent {
    /// The command letter prefixing the value on the wire
    pub fn wire_letter(self) -> char {
        match self {
            ParameterIntent::Speed(_) => 'S',
            ParameterIntent::LegHeight(_) => 'H',
        }
    }

    /// Inclusive value range for this parameter
    pub fn range(self) -> (f64, f64) {
        match self {
            ParameterIntent::Speed(_) => (0.0, 100.0),
            ParameterIntent::LegHeight(_) => (0.0, 50.0),
        }
    }

    fn raw_value(self) -> f64 {
        match self {
            ParameterIntent::Speed(v) | ParameterIntent::LegHeight(v) => v,
        }
    }

    /// The integer value that goes on the wire: clamped, then truncated
    pub fn wire_value(self) -> i64 {
        let (lo, hi) = self.range();
        self.raw_value().clamp(lo, hi) as i64
    }

    /// Encode to the wire command string, newline terminated
    pub fn encode(self) -> String {
        format!("{}{}\n", self.wire_letter(), self.wire_value())
    }
}
