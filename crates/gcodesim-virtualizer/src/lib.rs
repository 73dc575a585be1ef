//! # gcodesim Virtualizer
//!
//! Streaming G-code interpretation for toolpath preview and file statistics.
//! Lines are fed one at a time; the engine tracks modal state and tool
//! position, reports every move to a [`VirtualizerListener`], and keeps a
//! running bounding box and machining-time estimate.

pub mod config;
pub mod gcode;
pub mod utils;
pub mod virtualizer;

pub use config::VirtualizerConfig;

pub use gcode::{
    group_words, Command, CommandGroup, Coolant, CoolantCommand, CoordinateSystem, CutterCompensation,
    DefaultTokenizer, DistanceMode, FeedRateMode, GcodeParser, ModalState, MotionMode, Params,
    Plane, ProbeMode, ProgramMode, SpindleState, ToolLengthOffset, Word, WordTokenizer,
};

pub use utils::{FileReadStats, GcodeFileReader};

pub use virtualizer::{
    arc_center_from_radius, BoundingBox, Bounds, Extents, FileStats, FileType, MachineState,
    NoOpListener, Segment, StatsCollector, TimeEstimator, ToolpathRecorder, Virtualizer,
    VirtualizerListener, ACCELERATION, ROTARY_CURVE_THRESHOLD,
};
