//! Data models for positions and axes
//!
//! This module provides:
//! - Position tracking for the linear axes plus one rotary axis (X, Y, Z, A)
//! - Axis letters as seen in G-code words

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine axis addressed by a G-code word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
    /// Rotary axis around X
    A,
    /// Rotary axis around Y
    B,
    /// Rotary axis around Z
    C,
}

impl Axis {
    /// Axis for a word letter, if the letter addresses an axis
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            _ => None,
        }
    }

    /// The word letter for this axis
    pub fn letter(self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }

    /// Whether this is an angular axis
    pub fn is_rotary(self) -> bool {
        matches!(self, Self::A | Self::B | Self::C)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// CNC point with the three linear axes and the A rotary axis
///
/// Linear axes are in millimetres, A is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CNCPoint {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
    /// A-axis (4th axis) position
    pub a: f64,
}

impl CNCPoint {
    /// Create a point with X, Y, Z coordinates and A at zero
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, a: 0.0 }
    }

    /// Create a point with all four axes
    pub fn with_a(x: f64, y: f64, z: f64, a: f64) -> Self {
        Self { x, y, z, a }
    }

    /// Get X, Y, Z as a tuple
    pub fn xyz(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    /// Value of a single axis; B and C are not tracked and read as zero
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::A => self.a,
            Axis::B | Axis::C => 0.0,
        }
    }

    /// Add another point (component-wise)
    pub fn add(&self, other: &CNCPoint) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            a: self.a + other.a,
        }
    }

    /// Subtract another point (component-wise)
    pub fn subtract(&self, other: &CNCPoint) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            a: self.a - other.a,
        }
    }

    /// Planar distance to another point
    pub fn distance_xy(&self, other: &CNCPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Check every axis is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.a.is_finite()
    }
}

impl fmt::Display for CNCPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X:{:.3} Y:{:.3} Z:{:.3} A:{:.3}",
            self.x, self.y, self.z, self.a
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_letters() {
        assert_eq!(Axis::from_letter('y'), Some(Axis::Y));
        assert_eq!(Axis::from_letter('F'), None);
        assert_eq!(Axis::A.letter(), 'A');
        assert!(Axis::A.is_rotary());
        assert!(!Axis::Z.is_rotary());
    }

    #[test]
    fn test_point_arithmetic() {
        let p = CNCPoint::with_a(1.0, 2.0, 3.0, 90.0);
        let q = CNCPoint::new(1.0, 1.0, 1.0);
        assert_eq!(p.add(&q), CNCPoint::with_a(2.0, 3.0, 4.0, 90.0));
        assert_eq!(p.subtract(&q), CNCPoint::with_a(0.0, 1.0, 2.0, 90.0));
    }

    #[test]
    fn test_distance_xy_ignores_z() {
        let p = CNCPoint::new(0.0, 0.0, 0.0);
        let q = CNCPoint::new(3.0, 4.0, 100.0);
        assert_eq!(p.distance_xy(&q), 5.0);
    }

    #[test]
    fn test_display() {
        let p = CNCPoint::new(1.0, 2.0, 3.0);
        assert_eq!(p.to_string(), "X:1.000 Y:2.000 Z:3.000 A:0.000");
    }
}
