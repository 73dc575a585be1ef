//! Command-line options and per-file reports

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use gcodesim_core::units::format_length;
use gcodesim_virtualizer::{
    FileStats, GcodeFileReader, NoOpListener, Virtualizer, VirtualizerConfig,
};
use serde::Serialize;

pub const USAGE: &str = "Usage: gcodesim [--config <file>] [--json] <file.nc>...";

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub json: bool,
    pub files: Vec<PathBuf>,
}

impl CliOptions {
    /// Parse arguments, excluding the program name
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow!("--config needs a file argument"))?;
                    options.config = Some(PathBuf::from(path));
                }
                "--json" => options.json = true,
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    bail!("Unknown option: {}", flag)
                }
                _ => options.files.push(PathBuf::from(arg)),
            }
        }

        if options.files.is_empty() {
            bail!("No input files given");
        }
        Ok(options)
    }

    /// Config from `--config`, or defaults with statistics enabled
    pub fn load_config(&self) -> Result<VirtualizerConfig> {
        match &self.config {
            Some(path) => Ok(VirtualizerConfig::load_from_file(path)?),
            None => Ok(VirtualizerConfig::with_statistics()),
        }
    }
}

/// Result of virtualizing one file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    pub bytes_read: u64,
    pub read_time_ms: u64,
    pub stats: FileStats,
}

impl FileReport {
    /// Virtualize a file from disk
    pub fn from_file(path: &Path, config: VirtualizerConfig) -> Result<Self> {
        let reader = GcodeFileReader::new(path)?;
        let mut virtualizer = Virtualizer::new(NoOpListener, config);
        let read = reader.virtualize(&mut virtualizer)?;

        Ok(Self {
            path: path.to_path_buf(),
            bytes_read: read.bytes_read,
            read_time_ms: read.read_time_ms,
            stats: virtualizer.generate_file_stats(),
        })
    }

    /// Plain-text summary
    pub fn summary(&self) -> String {
        let stats = &self.stats;
        let units = stats.units;
        let bbox = &stats.bbox;
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.path.display());
        let _ = writeln!(out, "  units        {} ({})", units.gcode(), units.label());
        let _ = writeln!(out, "  lines        {}", stats.total_lines);
        let _ = writeln!(out, "  file type    {}", stats.file_type);
        let _ = writeln!(
            out,
            "  time         {}",
            format_duration(stats.estimated_time)
        );
        for (axis, min, max) in [
            ('X', bbox.min.x, bbox.max.x),
            ('Y', bbox.min.y, bbox.max.y),
            ('Z', bbox.min.z, bbox.max.z),
        ] {
            let _ = writeln!(
                out,
                "  {}            {} .. {}",
                axis,
                format_length(min, units),
                format_length(max, units)
            );
        }
        if !stats.tools.is_empty() {
            let tools: Vec<String> = stats.tools.iter().map(|t| format!("T{}", t)).collect();
            let _ = writeln!(out, "  tools        {}", tools.join(", "));
        }
        if !stats.feed_rates.is_empty() {
            let _ = writeln!(out, "  feeds        {}", join_numbers(&stats.feed_rates));
        }
        if !stats.spindle_speeds.is_empty() {
            let _ = writeln!(
                out,
                "  spindle      {}",
                join_numbers(&stats.spindle_speeds)
            );
        }
        if !stats.used_axes.is_empty() {
            let axes: Vec<String> = stats.used_axes.iter().map(|a| a.to_string()).collect();
            let _ = writeln!(out, "  axes         {}", axes.join(" "));
        }
        if !stats.unrecognized_codes.is_empty() {
            let _ = writeln!(
                out,
                "  unsupported  {}",
                stats.unrecognized_codes.join(", ")
            );
        }
        out
    }
}

fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Seconds as `HH:MM:SS`
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
