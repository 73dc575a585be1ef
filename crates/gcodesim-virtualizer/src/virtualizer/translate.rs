//! Machine state and coordinate translation
//!
//! Raw word values are converted to millimetres and resolved against the
//! current position according to the active units and distance mode. A
//! missing or NaN value always leaves the axis where it is.

use crate::gcode::{ModalState, Params};
use gcodesim_core::CNCPoint;

/// Everything the motion handlers read and mutate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MachineState {
    pub modal: ModalState,
    /// Position in the program frame, in mm (A in degrees)
    pub position: CNCPoint,
    /// Accumulated G92 deltas
    pub offsets: CNCPoint,
    /// Active feed word, in program units per minute
    pub feed: f64,
}

fn resolve(current: f64, value: Option<f64>, relative: bool) -> f64 {
    match value {
        Some(v) if !v.is_nan() => {
            if relative {
                current + v
            } else {
                v
            }
        }
        _ => current,
    }
}

impl MachineState {
    pub fn new() -> Self {
        Self::default()
    }

    fn to_mm(&self, value: Option<f64>) -> Option<f64> {
        value.map(|v| self.modal.units.to_mm(v))
    }

    pub fn translate_x(&self, value: Option<f64>, relative: bool) -> f64 {
        resolve(self.position.x, self.to_mm(value), relative)
    }

    pub fn translate_y(&self, value: Option<f64>, relative: bool) -> f64 {
        resolve(self.position.y, self.to_mm(value), relative)
    }

    pub fn translate_z(&self, value: Option<f64>, relative: bool) -> f64 {
        resolve(self.position.z, self.to_mm(value), relative)
    }

    /// Rotary axis; degrees are never unit-scaled
    pub fn translate_a(&self, value: Option<f64>, relative: bool) -> f64 {
        resolve(self.position.a, value, relative)
    }

    /// Arc centre offsets are always incremental deltas in mm
    pub fn translate_i(&self, value: Option<f64>) -> f64 {
        self.translate_x(value, true) - self.position.x
    }

    pub fn translate_j(&self, value: Option<f64>) -> f64 {
        self.translate_y(value, true) - self.position.y
    }

    pub fn translate_k(&self, value: Option<f64>) -> f64 {
        self.translate_z(value, true) - self.position.z
    }

    /// Arc radius in mm, 0 when missing
    pub fn translate_r(&self, value: Option<f64>) -> f64 {
        match value {
            Some(r) if !r.is_nan() => self.modal.units.to_mm(r),
            _ => 0.0,
        }
    }

    /// Target of a G0/G1 move in the program frame
    pub fn linear_target(&self, params: &Params) -> CNCPoint {
        let relative = self.modal.is_relative();
        CNCPoint::with_a(
            self.translate_x(params.get('X'), relative),
            self.translate_y(params.get('Y'), relative),
            self.translate_z(params.get('Z'), relative),
            self.translate_a(params.get('A'), relative),
        )
    }

    /// Program-frame point moved into the display frame
    pub fn display(&self, point: &CNCPoint) -> CNCPoint {
        point.add(&self.offsets)
    }

    pub fn display_position(&self) -> CNCPoint {
        self.display(&self.position)
    }

    /// Active feed in mm/s
    pub fn feed_mm_per_sec(&self) -> f64 {
        self.modal.units.feed_to_mm_per_sec(self.feed)
    }
}
