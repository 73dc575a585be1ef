//! Geometry listener interface
//!
//! The virtualizer reports every move and every consumed line through a
//! [`VirtualizerListener`]. All methods default to no-ops, so implementors
//! only override what they render.

use crate::gcode::ModalState;
use gcodesim_core::CNCPoint;

/// Receiver for geometry produced while virtualizing
///
/// Calls are synchronous and happen before [`crate::Virtualizer::virtualize`]
/// returns. Points are offset-applied (display frame); arc points are
/// additionally permuted so the active plane is XY, see
/// [`crate::Plane::to_machine`] to undo that.
pub trait VirtualizerListener {
    /// Straight G0/G1 segment
    fn add_line(&mut self, _modal: &ModalState, _start: CNCPoint, _end: CNCPoint) {}

    /// G2/G3 arc with its centre
    fn add_arc_curve(
        &mut self,
        _modal: &ModalState,
        _start: CNCPoint,
        _end: CNCPoint,
        _center: CNCPoint,
    ) {
    }

    /// G0/G1 segment with a large rotary (A) move
    fn add_curve(&mut self, _modal: &ModalState, _start: CNCPoint, _end: CNCPoint) {}

    /// Called exactly once per `virtualize` call, including blank lines
    fn on_line_consumed(&mut self) {}

    /// Called after a modal group actually changed value
    fn on_modal_changed(&mut self, _modal: &ModalState) {}
}

/// Default no-op listener implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpListener;

impl VirtualizerListener for NoOpListener {}

/// Recorded geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Line {
        modal: ModalState,
        start: CNCPoint,
        end: CNCPoint,
    },
    Curve {
        modal: ModalState,
        start: CNCPoint,
        end: CNCPoint,
    },
    Arc {
        modal: ModalState,
        start: CNCPoint,
        end: CNCPoint,
        center: CNCPoint,
    },
}

impl Segment {
    pub fn start(&self) -> CNCPoint {
        match self {
            Segment::Line { start, .. }
            | Segment::Curve { start, .. }
            | Segment::Arc { start, .. } => *start,
        }
    }

    pub fn end(&self) -> CNCPoint {
        match self {
            Segment::Line { end, .. } | Segment::Curve { end, .. } | Segment::Arc { end, .. } => {
                *end
            }
        }
    }

    pub fn modal(&self) -> &ModalState {
        match self {
            Segment::Line { modal, .. }
            | Segment::Curve { modal, .. }
            | Segment::Arc { modal, .. } => modal,
        }
    }

    /// Endpoints in the machine frame, undoing the arc plane permutation
    pub fn machine_endpoints(&self) -> (CNCPoint, CNCPoint) {
        match self {
            Segment::Arc {
                modal, start, end, ..
            } => (
                modal.plane.to_machine(*start).unwrap_or(*start),
                modal.plane.to_machine(*end).unwrap_or(*end),
            ),
            _ => (self.start(), self.end()),
        }
    }
}

/// Listener that keeps every segment and counts consumed lines
#[derive(Debug, Clone, Default)]
pub struct ToolpathRecorder {
    pub segments: Vec<Segment>,
    pub lines_consumed: u64,
    pub modal_changes: u64,
}

impl ToolpathRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Line { .. }))
    }

    pub fn arcs(&self) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Arc { .. }))
    }

    pub fn curves(&self) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Curve { .. }))
    }
}

impl VirtualizerListener for ToolpathRecorder {
    fn add_line(&mut self, modal: &ModalState, start: CNCPoint, end: CNCPoint) {
        self.segments.push(Segment::Line {
            modal: *modal,
            start,
            end,
        });
    }

    fn add_arc_curve(
        &mut self,
        modal: &ModalState,
        start: CNCPoint,
        end: CNCPoint,
        center: CNCPoint,
    ) {
        self.segments.push(Segment::Arc {
            modal: *modal,
            start,
            end,
            center,
        });
    }

    fn add_curve(&mut self, modal: &ModalState, start: CNCPoint, end: CNCPoint) {
        self.segments.push(Segment::Curve {
            modal: *modal,
            start,
            end,
        });
    }

    fn on_line_consumed(&mut self) {
        self.lines_consumed += 1;
    }

    fn on_modal_changed(&mut self, _modal: &ModalState) {
        self.modal_changes += 1;
    }
}

impl<T: VirtualizerListener + ?Sized> VirtualizerListener for &mut T {
    fn add_line(&mut self, modal: &ModalState, start: CNCPoint, end: CNCPoint) {
        (**self).add_line(modal, start, end)
    }

    fn add_arc_curve(
        &mut self,
        modal: &ModalState,
        start: CNCPoint,
        end: CNCPoint,
        center: CNCPoint,
    ) {
        (**self).add_arc_curve(modal, start, end, center)
    }

    fn add_curve(&mut self, modal: &ModalState, start: CNCPoint, end: CNCPoint) {
        (**self).add_curve(modal, start, end)
    }

    fn on_line_consumed(&mut self) {
        (**self).on_line_consumed()
    }

    fn on_modal_changed(&mut self, modal: &ModalState) {
        (**self).on_modal_changed(modal)
    }
}
