//! Virtualization engine
//!
//! This module provides:
//! - The streaming [`Virtualizer`] and its listener interface
//! - Unit/distance-mode coordinate translation
//! - Bounding box tracking and machining-time estimation
//! - File statistics

pub mod bounds;
pub mod engine;
pub mod estimator;
pub mod listener;
pub mod motion;
pub mod stats;
pub mod translate;

pub use bounds::{BoundingBox, Bounds, Extents};
pub use engine::Virtualizer;
pub use estimator::{TimeEstimator, ACCELERATION};
pub use listener::{NoOpListener, Segment, ToolpathRecorder, VirtualizerListener};
pub use motion::{arc_center_from_radius, ROTARY_CURVE_THRESHOLD};
pub use stats::{FileStats, FileType, StatsCollector};
pub use translate::MachineState;
