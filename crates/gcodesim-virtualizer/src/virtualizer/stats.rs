//! File statistics
//!
//! Collated, insertion-ordered sets of the tools, spindle speeds, feeds and
//! axes a program uses, plus the summary produced once the whole file has
//! been virtualized.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use gcodesim_core::{Axis, Units};
use serde::Serialize;

use super::bounds::BoundingBox;
use crate::gcode::Word;

/// Deduplicating list that keeps first-seen order
#[derive(Debug, Clone)]
struct UniqueList<T, K> {
    items: Vec<T>,
    seen: HashSet<K>,
}

impl<T, K> Default for UniqueList<T, K> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl<T, K: Hash + Eq> UniqueList<T, K> {
    fn insert_keyed(&mut self, item: T, key: K) -> bool {
        if self.seen.insert(key) {
            self.items.push(item);
            true
        } else {
            false
        }
    }

    fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl UniqueList<f64, u64> {
    fn insert_value(&mut self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        // -0.0 and 0.0 are the same speed
        let value = if value == 0.0 { 0.0 } else { value };
        self.insert_keyed(value, value.to_bits())
    }
}

/// How the program drives the rotary axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    /// No A axis
    #[default]
    Default,
    /// A used without Y, the rotary axis replaces Y
    Rotary,
    /// A used together with Y
    FourAxis,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Default => write!(f, "DEFAULT"),
            FileType::Rotary => write!(f, "ROTARY"),
            FileType::FourAxis => write!(f, "FOUR_AXIS"),
        }
    }
}

impl FileType {
    pub fn from_axes(axes: &[Axis]) -> Self {
        let has_a = axes.contains(&Axis::A);
        let has_y = axes.contains(&Axis::Y);
        match (has_a, has_y) {
            (true, true) => FileType::FourAxis,
            (true, false) => FileType::Rotary,
            _ => FileType::Default,
        }
    }
}

/// Observes words as they are grouped
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    tools: UniqueList<u32, u32>,
    spindle_speeds: UniqueList<f64, u64>,
    feed_rates: UniqueList<f64, u64>,
    axes: UniqueList<Axis, Axis>,
    unrecognized: UniqueList<String, String>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe_word(&mut self, word: &Word) {
        match word.letter {
            'F' => {
                if let Some(feed) = word.value {
                    self.feed_rates.insert_value(feed);
                }
            }
            'S' => {
                if let Some(speed) = word.value {
                    self.spindle_speeds.insert_value(speed);
                }
            }
            'T' => {
                if let Some(tool) = word.value.filter(|t| t.is_finite() && *t >= 0.0) {
                    let tool = tool.round() as u32;
                    self.tools.insert_keyed(tool, tool);
                }
            }
            letter => {
                if let Some(axis) = Axis::from_letter(letter) {
                    self.axes.insert_keyed(axis, axis);
                }
            }
        }
    }

    pub fn record_unrecognized(&mut self, code: &str) {
        self.unrecognized
            .insert_keyed(code.to_string(), code.to_string());
    }

    pub fn tools(&self) -> &[u32] {
        self.tools.as_slice()
    }

    pub fn spindle_speeds(&self) -> &[f64] {
        self.spindle_speeds.as_slice()
    }

    pub fn feed_rates(&self) -> &[f64] {
        self.feed_rates.as_slice()
    }

    pub fn used_axes(&self) -> &[Axis] {
        self.axes.as_slice()
    }

    pub fn unrecognized_codes(&self) -> &[String] {
        self.unrecognized.as_slice()
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_axes(self.used_axes())
    }
}

/// Summary of a virtualized program
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    pub units: Units,
    pub total_lines: u64,
    pub tools: Vec<u32>,
    pub spindle_speeds: Vec<f64>,
    pub feed_rates: Vec<f64>,
    pub used_axes: Vec<Axis>,
    /// Seconds
    pub estimated_time: f64,
    pub bbox: BoundingBox,
    pub file_type: FileType,
    pub unrecognized_codes: Vec<String>,
}

impl FileStats {
    pub fn estimated_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.estimated_time).unwrap_or_default()
    }
}
