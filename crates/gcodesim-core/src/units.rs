//! Unit conversion utilities
//!
//! Handles conversion between Metric (mm) and Imperial (inch) programs.
//! The virtualizer tracks everything in millimetres internally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Program units selected by G20/G21
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Units {
    /// G21, millimetres
    #[default]
    #[serde(rename = "G21")]
    Metric,
    /// G20, inches
    #[serde(rename = "G20")]
    Imperial,
}

impl Units {
    /// Convert a program value in these units to millimetres
    pub fn to_mm(self, value: f64) -> f64 {
        match self {
            Self::Metric => value,
            Self::Imperial => value * MM_PER_INCH,
        }
    }

    /// Convert a millimetre value back into these units
    pub fn from_mm(self, value_mm: f64) -> f64 {
        match self {
            Self::Metric => value_mm,
            Self::Imperial => value_mm / MM_PER_INCH,
        }
    }

    /// Convert a feed word (units per minute) to mm/s
    pub fn feed_to_mm_per_sec(self, feed: f64) -> f64 {
        self.to_mm(feed) / 60.0
    }

    /// The G-code word that selects these units
    pub fn gcode(self) -> &'static str {
        match self {
            Self::Metric => "G21",
            Self::Imperial => "G20",
        }
    }

    /// Short unit label ("mm" or "in")
    pub fn label(self) -> &'static str {
        match self {
            Self::Metric => "mm",
            Self::Imperial => "in",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" | "g21" => Ok(Self::Metric),
            "imperial" | "inch" | "in" | "g20" => Ok(Self::Imperial),
            _ => Err(format!("Unknown units: {}", s)),
        }
    }
}

/// Format a millimetre length for display in the given units
pub fn format_length(value_mm: f64, units: Units) -> String {
    format!("{:.3}", units.from_mm(value_mm))
}
