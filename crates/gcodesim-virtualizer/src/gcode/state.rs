//! Modal state tracking
//!
//! Modal groups are persistent states that affect all subsequent commands
//! until changed by another command in the same group. Exactly one value is
//! active per group at any time.

use gcodesim_core::{CNCPoint, GcodeError, Units};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Probe variants of the motion group (G38.2 - G38.5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeMode {
    /// G38.2, probe toward workpiece, error on failure
    Toward,
    /// G38.3, probe toward workpiece, no error
    TowardNoError,
    /// G38.4, probe away from workpiece, error on failure
    Away,
    /// G38.5, probe away from workpiece, no error
    AwayNoError,
}

/// Motion group - Group 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MotionMode {
    #[default]
    Rapid,
    Linear,
    ArcCw,
    ArcCcw,
    Probe(ProbeMode),
    /// G80, motion mode cancel
    Cancel,
}

impl Serialize for MotionMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.gcode())
    }
}

impl MotionMode {
    pub fn gcode(self) -> &'static str {
        match self {
            Self::Rapid => "G0",
            Self::Linear => "G1",
            Self::ArcCw => "G2",
            Self::ArcCcw => "G3",
            Self::Probe(ProbeMode::Toward) => "G38.2",
            Self::Probe(ProbeMode::TowardNoError) => "G38.3",
            Self::Probe(ProbeMode::Away) => "G38.4",
            Self::Probe(ProbeMode::AwayNoError) => "G38.5",
            Self::Cancel => "G80",
        }
    }
}

/// Plane selection - Group 2
///
/// The UV/WU/VW planes are recognised as plane selections but cannot carry
/// arcs, since only X, Y and Z are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Plane {
    #[default]
    #[serde(rename = "G17")]
    Xy,
    #[serde(rename = "G18")]
    Zx,
    #[serde(rename = "G19")]
    Yz,
    #[serde(rename = "G17.1")]
    Uv,
    #[serde(rename = "G18.1")]
    Wu,
    #[serde(rename = "G19.1")]
    Vw,
}

impl Plane {
    pub fn gcode(self) -> &'static str {
        match self {
            Self::Xy => "G17",
            Self::Zx => "G18",
            Self::Yz => "G19",
            Self::Uv => "G17.1",
            Self::Wu => "G18.1",
            Self::Vw => "G19.1",
        }
    }

    /// Permute a machine-frame point so the active plane becomes XY
    ///
    /// XY is unchanged, ZX maps (x, y, z) to (z, x, y), YZ maps (x, y, z) to
    /// (y, z, x). The A axis is carried through untouched.
    pub fn to_canonical(self, p: CNCPoint) -> Result<CNCPoint, GcodeError> {
        match self {
            Self::Xy => Ok(p),
            Self::Zx => Ok(CNCPoint::with_a(p.z, p.x, p.y, p.a)),
            Self::Yz => Ok(CNCPoint::with_a(p.y, p.z, p.x, p.a)),
            Self::Uv | Self::Wu | Self::Vw => Err(GcodeError::InvalidModalState {
                reason: format!("arcs are not supported in plane {}", self.gcode()),
            }),
        }
    }

    /// Inverse of [`Plane::to_canonical`]
    pub fn to_machine(self, p: CNCPoint) -> Result<CNCPoint, GcodeError> {
        match self {
            Self::Xy => Ok(p),
            Self::Zx => Ok(CNCPoint::with_a(p.y, p.z, p.x, p.a)),
            Self::Yz => Ok(CNCPoint::with_a(p.z, p.x, p.y, p.a)),
            Self::Uv | Self::Wu | Self::Vw => Err(GcodeError::InvalidModalState {
                reason: format!("arcs are not supported in plane {}", self.gcode()),
            }),
        }
    }
}

/// Distance mode (G90/G91) and arc distance mode (G90.1/G91.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DistanceMode {
    #[default]
    Absolute,
    Relative,
}

/// Work coordinate system - Group 12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CoordinateSystem {
    #[default]
    G54,
    G55,
    G56,
    G57,
    G58,
    G59,
}

impl CoordinateSystem {
    /// Slot for a G54-G59 code number
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            54 => Some(Self::G54),
            55 => Some(Self::G55),
            56 => Some(Self::G56),
            57 => Some(Self::G57),
            58 => Some(Self::G58),
            59 => Some(Self::G59),
            _ => None,
        }
    }
}

/// Feed rate mode - Group 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FeedRateMode {
    #[serde(rename = "G93")]
    InverseTime,
    #[default]
    #[serde(rename = "G94")]
    UnitsPerMinute,
    #[serde(rename = "G95")]
    UnitsPerRevolution,
}

/// Cutter radius compensation - Group 7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CutterCompensation {
    #[default]
    #[serde(rename = "G40")]
    Off,
}

/// Tool length offset - Group 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolLengthOffset {
    #[serde(rename = "G43.1")]
    Dynamic,
    #[default]
    #[serde(rename = "G49")]
    Cancel,
}

/// Program flow - M0, M1, M2, M30
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProgramMode {
    #[default]
    #[serde(rename = "M0")]
    Pause,
    #[serde(rename = "M1")]
    OptionalPause,
    #[serde(rename = "M2")]
    End,
    #[serde(rename = "M30")]
    EndRewind,
}

/// Spindle state - M3, M4, M5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SpindleState {
    #[serde(rename = "M3")]
    Clockwise,
    #[serde(rename = "M4")]
    CounterClockwise,
    #[default]
    #[serde(rename = "M5")]
    Off,
}

/// Coolant state; mist (M7) and flood (M8) may be active together, M9
/// clears both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Coolant {
    pub mist: bool,
    pub flood: bool,
}

impl Coolant {
    pub fn is_off(&self) -> bool {
        !self.mist && !self.flood
    }
}

impl fmt::Display for Coolant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.mist, self.flood) {
            (false, false) => write!(f, "M9"),
            (true, false) => write!(f, "M7"),
            (false, true) => write!(f, "M8"),
            (true, true) => write!(f, "M7,M8"),
        }
    }
}

/// Modal state for G-Code execution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModalState {
    /// Motion mode - Group 1
    pub motion: MotionMode,
    /// Coordinate system - Group 12 (G54-G59)
    pub wcs: CoordinateSystem,
    /// Plane selection - Group 2
    pub plane: Plane,
    /// Units mode - Group 6 (G20/G21)
    pub units: Units,
    /// Distance mode - Group 3 (G90/G91)
    pub distance: DistanceMode,
    /// Arc IJK distance mode (G90.1/G91.1)
    pub arc_distance: DistanceMode,
    /// Feed rate mode - Group 5
    pub feed_rate: FeedRateMode,
    /// Cutter compensation - Group 7
    pub cutter: CutterCompensation,
    /// Tool length offset - Group 8
    pub tool_length_offset: ToolLengthOffset,
    /// Program flow
    pub program: ProgramMode,
    /// Spindle state
    pub spindle: SpindleState,
    /// Coolant state
    pub coolant: Coolant,
    /// Active tool number
    pub tool: u32,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            motion: MotionMode::Rapid,
            wcs: CoordinateSystem::G54,
            plane: Plane::Xy,
            units: Units::Metric,
            distance: DistanceMode::Absolute,
            arc_distance: DistanceMode::Relative,
            feed_rate: FeedRateMode::UnitsPerMinute,
            cutter: CutterCompensation::Off,
            tool_length_offset: ToolLengthOffset::Cancel,
            program: ProgramMode::Pause,
            spindle: SpindleState::Off,
            coolant: Coolant::default(),
            tool: 0,
        }
    }
}

/// Overwrite a modal slot, reporting whether the value changed
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

impl ModalState {
    /// Create a modal state with machine defaults
    /// (G0 G54 G17 G21 G90 G91.1 G94 G40 G49 M0 M5 M9 T0)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_motion(&mut self, motion: MotionMode) -> bool {
        replace(&mut self.motion, motion)
    }

    pub fn set_wcs(&mut self, wcs: CoordinateSystem) -> bool {
        replace(&mut self.wcs, wcs)
    }

    pub fn set_plane(&mut self, plane: Plane) -> bool {
        replace(&mut self.plane, plane)
    }

    pub fn set_units(&mut self, units: Units) -> bool {
        replace(&mut self.units, units)
    }

    pub fn set_distance(&mut self, distance: DistanceMode) -> bool {
        replace(&mut self.distance, distance)
    }

    pub fn set_arc_distance(&mut self, distance: DistanceMode) -> bool {
        replace(&mut self.arc_distance, distance)
    }

    pub fn set_feed_rate_mode(&mut self, mode: FeedRateMode) -> bool {
        replace(&mut self.feed_rate, mode)
    }

    pub fn set_cutter(&mut self, cutter: CutterCompensation) -> bool {
        replace(&mut self.cutter, cutter)
    }

    pub fn set_tool_length_offset(&mut self, mode: ToolLengthOffset) -> bool {
        replace(&mut self.tool_length_offset, mode)
    }

    pub fn set_program(&mut self, program: ProgramMode) -> bool {
        replace(&mut self.program, program)
    }

    pub fn set_spindle(&mut self, spindle: SpindleState) -> bool {
        replace(&mut self.spindle, spindle)
    }

    pub fn set_coolant(&mut self, coolant: Coolant) -> bool {
        replace(&mut self.coolant, coolant)
    }

    pub fn set_tool(&mut self, tool: u32) -> bool {
        replace(&mut self.tool, tool)
    }

    pub fn is_relative(&self) -> bool {
        self.distance == DistanceMode::Relative
    }

    pub fn is_imperial(&self) -> bool {
        self.units == Units::Imperial
    }
}
