//! Bounding box accumulator used while virtualizing toolpaths.

use serde::Serialize;

/// Running min/max of every X/Y/Z coordinate reached by motion
///
/// Bounds only ever widen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
    /// Reproduce the historical Z minimum comparison against the X slot
    legacy_z_min: bool,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            min_z: f64::INFINITY,
            max_z: f64::NEG_INFINITY,
            legacy_z_min: false,
        }
    }

    /// Bounds whose Z minimum is computed as `min(min_x, z)`
    ///
    /// Matches files previewed by older senders, where the Z minimum could
    /// drift with X and even shrink.
    pub fn with_legacy_z_min() -> Self {
        Self {
            legacy_z_min: true,
            ..Self::new()
        }
    }

    pub fn update(&mut self, x: f64, y: f64, z: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = if self.legacy_z_min {
            self.min_x.min(z)
        } else {
            self.min_z.min(z)
        };
        self.max_z = self.max_z.max(z);
    }

    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
            && self.min_z.is_finite()
            && self.max_z.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    /// Whether a point lies inside the box (inclusive)
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x)
            && (self.min_y..=self.max_y).contains(&y)
            && (self.min_z..=self.max_z).contains(&z)
    }

    /// Snapshot for reporting; all zeros when nothing moved
    pub fn to_bounding_box(&self) -> BoundingBox {
        if !self.is_valid() {
            return BoundingBox::default();
        }
        let min = Extents {
            x: self.min_x,
            y: self.min_y,
            z: self.min_z,
        };
        let max = Extents {
            x: self.max_x,
            y: self.max_y,
            z: self.max_z,
        };
        BoundingBox {
            min,
            max,
            delta: Extents {
                x: max.x - min.x,
                y: max.y - min.y,
                z: max.z - min.z,
            },
        }
    }
}

/// Per-axis values of a bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Extents {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Reported bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoundingBox {
    pub min: Extents,
    pub max: Extents,
    pub delta: Extents,
}
