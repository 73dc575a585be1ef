//! Streaming G-code virtualizer
//!
//! Lines are fed one at a time. Each line is cleaned, tokenized, grouped
//! into commands and dispatched against the machine state; geometry goes to
//! the listener as it is produced.

use gcodesim_core::{CNCPoint, GcodeError};
use tracing::{debug, trace};

use super::bounds::Bounds;
use super::estimator::TimeEstimator;
use super::listener::{NoOpListener, VirtualizerListener};
use super::stats::{FileStats, FileType, StatsCollector};
use super::translate::MachineState;
use crate::config::VirtualizerConfig;
use crate::gcode::{
    group_words, Command, CommandGroup, Coolant, CoolantCommand, GcodeParser, ModalState,
    MotionMode, Word, WordTokenizer,
};

/// G-code virtualizer
///
/// Tracks modal state, position and datum offsets for a single program and
/// reports every move to `L`. Engines share nothing, so independent
/// programs can be virtualized on separate threads.
pub struct Virtualizer<L: VirtualizerListener = NoOpListener> {
    pub(super) listener: L,
    pub(super) config: VirtualizerConfig,
    parser: GcodeParser,
    pub(super) state: MachineState,
    pub(super) bounds: Bounds,
    pub(super) estimator: TimeEstimator,
    stats: Option<StatsCollector>,
    pub(super) total_lines: u64,
}

impl Default for Virtualizer {
    fn default() -> Self {
        Self::new(NoOpListener, VirtualizerConfig::default())
    }
}

impl<L: VirtualizerListener> Virtualizer<L> {
    /// Create a virtualizer using the default tokenizer
    pub fn new(listener: L, config: VirtualizerConfig) -> Self {
        Self::with_parser(listener, config, GcodeParser::new())
    }

    /// Create a virtualizer with a caller-supplied tokenizer
    pub fn with_tokenizer(
        listener: L,
        config: VirtualizerConfig,
        tokenizer: Box<dyn WordTokenizer>,
    ) -> Self {
        Self::with_parser(listener, config, GcodeParser::with_tokenizer(tokenizer))
    }

    fn with_parser(listener: L, config: VirtualizerConfig, parser: GcodeParser) -> Self {
        let bounds = if config.legacy_z_min_bound {
            Bounds::with_legacy_z_min()
        } else {
            Bounds::new()
        };
        let stats = config.collect_statistics.then(StatsCollector::new);

        Self {
            listener,
            estimator: TimeEstimator::with_acceleration(config.acceleration),
            config,
            parser,
            state: MachineState::new(),
            bounds,
            stats,
            total_lines: 0,
        }
    }

    /// Process one raw line of G-code
    ///
    /// `on_line_consumed` fires exactly once per call. Blank and
    /// comment-only lines are not counted.
    pub fn virtualize(&mut self, raw_line: &str) {
        let cleaned = GcodeParser::clean_line(raw_line);
        if cleaned.is_empty() {
            self.listener.on_line_consumed();
            return;
        }
        self.total_lines += 1;

        let words = self.parser.tokenize(&cleaned);
        for word in &words {
            self.observe_word(word);
        }

        for group in group_words(&words, self.state.modal.motion) {
            self.dispatch(group);
        }

        self.listener.on_line_consumed();
    }

    /// Process every line of a program
    pub fn virtualize_str(&mut self, program: &str) {
        for line in program.lines() {
            self.virtualize(line);
        }
    }

    fn observe_word(&mut self, word: &Word) {
        if word.letter == 'F' {
            if let Some(feed) = word.value.filter(|f| !f.is_nan()) {
                self.state.feed = feed;
            }
        }
        if let Some(stats) = self.stats.as_mut() {
            stats.observe_word(word);
        }
    }

    fn dispatch(&mut self, group: CommandGroup) {
        let Some(command) = group.command else {
            return;
        };
        let params = group.params;
        trace!(line = self.total_lines, command = %command, "Dispatching command");

        let modal = &mut self.state.modal;
        let changed = match command {
            Command::Rapid => {
                self.linear_move(MotionMode::Rapid, &params);
                return;
            }
            Command::Linear => {
                self.linear_move(MotionMode::Linear, &params);
                return;
            }
            Command::ArcCw => {
                self.arc_move(MotionMode::ArcCw, &params);
                return;
            }
            Command::ArcCcw => {
                self.arc_move(MotionMode::ArcCcw, &params);
                return;
            }
            Command::SetDatum => {
                self.set_datum(&params);
                return;
            }
            Command::ResetDatum => {
                self.reset_datum();
                return;
            }
            Command::Dwell | Command::DataTable | Command::ToolChange => false,
            Command::SelectPlane(plane) => modal.set_plane(plane),
            Command::SelectUnits(units) => modal.set_units(units),
            Command::Probe(mode) => modal.set_motion(MotionMode::Probe(mode)),
            Command::CutterCompensation(cutter) => modal.set_cutter(cutter),
            Command::ToolLengthOffset(mode) => modal.set_tool_length_offset(mode),
            Command::SelectWcs(wcs) => modal.set_wcs(wcs),
            Command::CancelMotion => modal.set_motion(MotionMode::Cancel),
            Command::Distance(mode) => modal.set_distance(mode),
            Command::ArcDistance(mode) => modal.set_arc_distance(mode),
            Command::FeedRateMode(mode) => modal.set_feed_rate_mode(mode),
            Command::Program(program) => modal.set_program(program),
            Command::Spindle(spindle) => modal.set_spindle(spindle),
            Command::Coolant(switch) => {
                let coolant = match switch {
                    CoolantCommand::Mist => Coolant {
                        mist: true,
                        ..modal.coolant
                    },
                    CoolantCommand::Flood => Coolant {
                        flood: true,
                        ..modal.coolant
                    },
                    CoolantCommand::Off => Coolant::default(),
                };
                modal.set_coolant(coolant)
            }
            Command::SelectTool(tool) => modal.set_tool(tool),
            Command::Unknown(code) => {
                if let Some(stats) = self.stats.as_mut() {
                    stats.record_unrecognized(&code);
                }
                let err = GcodeError::UnknownCode {
                    line_number: self.total_lines,
                    code,
                };
                trace!(error = %err, "Ignoring unsupported command");
                false
            }
        };

        self.notify_modal(changed);
    }

    /// Report an effective modal change to the listener
    pub(super) fn notify_modal(&mut self, changed: bool) {
        if changed {
            debug!(line = self.total_lines, modal = ?self.state.modal, "Modal state changed");
            self.listener.on_modal_changed(&self.state.modal);
        }
    }

    pub fn modal(&self) -> &ModalState {
        &self.state.modal
    }

    /// Position in the program frame
    pub fn position(&self) -> CNCPoint {
        self.state.position
    }

    /// Accumulated G92 offsets
    pub fn offsets(&self) -> CNCPoint {
        self.state.offsets
    }

    /// Position as reported to the listener
    pub fn display_position(&self) -> CNCPoint {
        self.state.display_position()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Estimated machining time in seconds
    pub fn estimated_time(&self) -> f64 {
        self.estimator.total_seconds()
    }

    /// Number of non-empty lines processed
    pub fn total_lines(&self) -> u64 {
        self.total_lines
    }

    pub fn config(&self) -> &VirtualizerConfig {
        &self.config
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    /// Summarise everything seen so far
    pub fn generate_file_stats(&self) -> FileStats {
        let (tools, spindle_speeds, feed_rates, used_axes, unrecognized_codes, file_type) =
            match &self.stats {
                Some(stats) => (
                    stats.tools().to_vec(),
                    stats.spindle_speeds().to_vec(),
                    stats.feed_rates().to_vec(),
                    stats.used_axes().to_vec(),
                    stats.unrecognized_codes().to_vec(),
                    stats.file_type(),
                ),
                None => Default::default(),
            };

        FileStats {
            units: self.state.modal.units,
            total_lines: self.total_lines,
            tools,
            spindle_speeds,
            feed_rates,
            used_axes,
            estimated_time: self.estimator.total_seconds(),
            bbox: self.bounds.to_bounding_box(),
            file_type: if self.stats.is_some() {
                file_type
            } else {
                FileType::Default
            },
            unrecognized_codes,
        }
    }
}
