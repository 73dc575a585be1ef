//! # gcodesim
//!
//! Streaming G-code virtualization for toolpath previews and job estimates.
//!
//! ## Architecture
//!
//! gcodesim is organized as a workspace with multiple crates:
//!
//! 1. **gcodesim-core** - Positions, units, and error types
//! 2. **gcodesim-virtualizer** - Line cleaning, tokenizing, modal state, the
//!    virtualization engine, bounds, time estimates and file statistics
//! 3. **gcodesim** - The command-line report tool built on both
//!
//! ## Features
//!
//! - **Modal tracking**: motion, plane, units, distance modes, WCS, spindle,
//!   coolant and tool
//! - **Geometry callbacks**: lines, arcs and rotary curves in a stable
//!   display frame, with G92 datum shifts applied
//! - **Estimates**: bounding box and an approximate machining time
//! - **Statistics**: tools, spindle speeds, feeds, axes and rotary file type

pub mod report;

pub use gcodesim_core::{
    Axis, CNCPoint, ConfigError, Error, GcodeError, Result, Units, MM_PER_INCH,
};

pub use gcodesim_virtualizer::{
    BoundingBox, Bounds, Command, FileReadStats, FileStats, FileType, GcodeFileReader,
    GcodeParser, ModalState, NoOpListener, Segment, ToolpathRecorder, Virtualizer,
    VirtualizerConfig, VirtualizerListener,
};

pub use report::{CliOptions, FileReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, leaving stdout for reports
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
