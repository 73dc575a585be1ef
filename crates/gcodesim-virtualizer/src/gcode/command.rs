//! Recognised G-Code commands
//!
//! Every G/M/T word that heads a command group resolves to one [`Command`].
//! Codes outside the supported set become [`Command::Unknown`], which the
//! virtualizer ignores.

use super::state::{
    CoordinateSystem, CutterCompensation, DistanceMode, FeedRateMode, Plane, ProbeMode,
    ProgramMode, SpindleState, ToolLengthOffset,
};
use gcodesim_core::Units;
use std::fmt;

/// Coolant switch commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoolantCommand {
    /// M7
    Mist,
    /// M8
    Flood,
    /// M9
    Off,
}

/// A dispatchable command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// G0
    Rapid,
    /// G1
    Linear,
    /// G2
    ArcCw,
    /// G3
    ArcCcw,
    /// G4
    Dwell,
    /// G10
    DataTable,
    /// G17 - G19, G17.1 - G19.1
    SelectPlane(Plane),
    /// G20 / G21
    SelectUnits(Units),
    /// G38.2 - G38.5
    Probe(ProbeMode),
    /// G40
    CutterCompensation(CutterCompensation),
    /// G43.1 / G49
    ToolLengthOffset(ToolLengthOffset),
    /// G54 - G59
    SelectWcs(CoordinateSystem),
    /// G80
    CancelMotion,
    /// G90 / G91
    Distance(DistanceMode),
    /// G90.1 / G91.1
    ArcDistance(DistanceMode),
    /// G92
    SetDatum,
    /// G92.1
    ResetDatum,
    /// G93 - G95
    FeedRateMode(FeedRateMode),
    /// M0, M1, M2, M30
    Program(ProgramMode),
    /// M3 - M5
    Spindle(SpindleState),
    /// M6
    ToolChange,
    /// M7 - M9
    Coolant(CoolantCommand),
    /// T word
    SelectTool(u32),
    /// Anything else, kept as its code text
    Unknown(String),
}

/// Code number scaled by ten so decimal codes (G38.2, G92.1) match exactly
fn tenths(value: f64) -> Option<i64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let scaled = (value * 10.0).round();
    // Reject G1.55 style values that do not land on a tenth
    if (scaled - value * 10.0).abs() > 1e-6 {
        return None;
    }
    Some(scaled as i64)
}

fn format_code(letter: char, value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}{}", letter, v as i64),
        Some(v) => format!("{}{}", letter, v),
        None => letter.to_string(),
    }
}

impl Command {
    /// Resolve a G, M or T word into a command
    pub fn from_word(letter: char, value: Option<f64>) -> Self {
        let letter = letter.to_ascii_uppercase();
        let unknown = || Command::Unknown(format_code(letter, value));

        if letter == 'T' {
            return match value {
                Some(v) if v.is_finite() && v >= 0.0 => Command::SelectTool(v.round() as u32),
                _ => unknown(),
            };
        }

        let Some(code) = value.and_then(tenths) else {
            return unknown();
        };

        match (letter, code) {
            ('G', 0) => Command::Rapid,
            ('G', 10) => Command::Linear,
            ('G', 20) => Command::ArcCw,
            ('G', 30) => Command::ArcCcw,
            ('G', 40) => Command::Dwell,
            ('G', 100) => Command::DataTable,
            ('G', 170) => Command::SelectPlane(Plane::Xy),
            ('G', 171) => Command::SelectPlane(Plane::Uv),
            ('G', 180) => Command::SelectPlane(Plane::Zx),
            ('G', 181) => Command::SelectPlane(Plane::Wu),
            ('G', 190) => Command::SelectPlane(Plane::Yz),
            ('G', 191) => Command::SelectPlane(Plane::Vw),
            ('G', 200) => Command::SelectUnits(Units::Imperial),
            ('G', 210) => Command::SelectUnits(Units::Metric),
            ('G', 382) => Command::Probe(ProbeMode::Toward),
            ('G', 383) => Command::Probe(ProbeMode::TowardNoError),
            ('G', 384) => Command::Probe(ProbeMode::Away),
            ('G', 385) => Command::Probe(ProbeMode::AwayNoError),
            ('G', 400) => Command::CutterCompensation(CutterCompensation::Off),
            ('G', 431) => Command::ToolLengthOffset(ToolLengthOffset::Dynamic),
            ('G', 490) => Command::ToolLengthOffset(ToolLengthOffset::Cancel),
            ('G', c @ 540..=590) if c % 10 == 0 => {
                match CoordinateSystem::from_code((c / 10) as u32) {
                    Some(wcs) => Command::SelectWcs(wcs),
                    None => unknown(),
                }
            }
            ('G', 800) => Command::CancelMotion,
            ('G', 900) => Command::Distance(DistanceMode::Absolute),
            ('G', 901) => Command::ArcDistance(DistanceMode::Absolute),
            ('G', 910) => Command::Distance(DistanceMode::Relative),
            ('G', 911) => Command::ArcDistance(DistanceMode::Relative),
            ('G', 920) => Command::SetDatum,
            ('G', 921) => Command::ResetDatum,
            ('G', 930) => Command::FeedRateMode(FeedRateMode::InverseTime),
            ('G', 940) => Command::FeedRateMode(FeedRateMode::UnitsPerMinute),
            ('G', 950) => Command::FeedRateMode(FeedRateMode::UnitsPerRevolution),
            ('M', 0) => Command::Program(ProgramMode::Pause),
            ('M', 10) => Command::Program(ProgramMode::OptionalPause),
            ('M', 20) => Command::Program(ProgramMode::End),
            ('M', 300) => Command::Program(ProgramMode::EndRewind),
            ('M', 30) => Command::Spindle(SpindleState::Clockwise),
            ('M', 40) => Command::Spindle(SpindleState::CounterClockwise),
            ('M', 50) => Command::Spindle(SpindleState::Off),
            ('M', 60) => Command::ToolChange,
            ('M', 70) => Command::Coolant(CoolantCommand::Mist),
            ('M', 80) => Command::Coolant(CoolantCommand::Flood),
            ('M', 90) => Command::Coolant(CoolantCommand::Off),
            _ => unknown(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Rapid => write!(f, "G0"),
            Command::Linear => write!(f, "G1"),
            Command::ArcCw => write!(f, "G2"),
            Command::ArcCcw => write!(f, "G3"),
            Command::Dwell => write!(f, "G4"),
            Command::DataTable => write!(f, "G10"),
            Command::SelectPlane(plane) => write!(f, "{}", plane.gcode()),
            Command::SelectUnits(units) => write!(f, "{}", units.gcode()),
            Command::Probe(mode) => {
                write!(f, "{}", super::state::MotionMode::Probe(*mode).gcode())
            }
            Command::CutterCompensation(_) => write!(f, "G40"),
            Command::ToolLengthOffset(ToolLengthOffset::Dynamic) => write!(f, "G43.1"),
            Command::ToolLengthOffset(ToolLengthOffset::Cancel) => write!(f, "G49"),
            Command::SelectWcs(wcs) => write!(f, "{:?}", wcs),
            Command::CancelMotion => write!(f, "G80"),
            Command::Distance(DistanceMode::Absolute) => write!(f, "G90"),
            Command::Distance(DistanceMode::Relative) => write!(f, "G91"),
            Command::ArcDistance(DistanceMode::Absolute) => write!(f, "G90.1"),
            Command::ArcDistance(DistanceMode::Relative) => write!(f, "G91.1"),
            Command::SetDatum => write!(f, "G92"),
            Command::ResetDatum => write!(f, "G92.1"),
            Command::FeedRateMode(FeedRateMode::InverseTime) => write!(f, "G93"),
            Command::FeedRateMode(FeedRateMode::UnitsPerMinute) => write!(f, "G94"),
            Command::FeedRateMode(FeedRateMode::UnitsPerRevolution) => write!(f, "G95"),
            Command::Program(ProgramMode::Pause) => write!(f, "M0"),
            Command::Program(ProgramMode::OptionalPause) => write!(f, "M1"),
            Command::Program(ProgramMode::End) => write!(f, "M2"),
            Command::Program(ProgramMode::EndRewind) => write!(f, "M30"),
            Command::Spindle(SpindleState::Clockwise) => write!(f, "M3"),
            Command::Spindle(SpindleState::CounterClockwise) => write!(f, "M4"),
            Command::Spindle(SpindleState::Off) => write!(f, "M5"),
            Command::ToolChange => write!(f, "M6"),
            Command::Coolant(CoolantCommand::Mist) => write!(f, "M7"),
            Command::Coolant(CoolantCommand::Flood) => write!(f, "M8"),
            Command::Coolant(CoolantCommand::Off) => write!(f, "M9"),
            Command::SelectTool(tool) => write!(f, "T{}", tool),
            Command::Unknown(code) => write!(f, "{}", code),
        }
    }
}
