//! Motion and datum handlers

use gcodesim_core::{CNCPoint, GcodeError};
use tracing::{debug, error, warn};

use super::engine::Virtualizer;
use super::listener::VirtualizerListener;
use crate::gcode::{MotionMode, Params};

/// Rotary travel (degrees) above which a linear move is reported as a curve
pub const ROTARY_CURVE_THRESHOLD: f64 = 30.0;

/// Centre of an arc given by its radius, in the arc plane
///
/// Positive radius picks the shorter arc, negative the longer one. Returns
/// `None` when start and end coincide.
pub fn arc_center_from_radius(
    start: &CNCPoint,
    end: &CNCPoint,
    radius: f64,
    clockwise: bool,
) -> Option<CNCPoint> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let d = dx.hypot(dy);
    if d == 0.0 || !d.is_finite() {
        return None;
    }

    // Clamp rounding noise when the chord is the diameter
    let mut h = (4.0 * radius * radius - d * d).max(0.0).sqrt() / 2.0;
    if clockwise {
        h = -h;
    }
    if radius < 0.0 {
        h = -h;
    }

    Some(CNCPoint::with_a(
        start.x + dx / 2.0 - h * dy / d,
        start.y + dy / 2.0 + h * dx / d,
        start.z,
        start.a,
    ))
}

impl<L: VirtualizerListener> Virtualizer<L> {
    fn set_motion(&mut self, motion: MotionMode) {
        let changed = self.state.modal.set_motion(motion);
        self.notify_modal(changed);
    }

    /// G0 / G1
    pub(super) fn linear_move(&mut self, motion: MotionMode, params: &Params) {
        self.set_motion(motion);

        let target = self.state.linear_target(params);
        let v1 = self.state.display_position();
        let v2 = self.state.display(&target);
        let modal = self.state.modal;

        if v1.a != v2.a && (v2.a - v1.a).abs() > self.config.rotary_curve_threshold {
            self.listener.add_curve(&modal, v1, v2);
        } else {
            self.listener.add_line(&modal, v1, v2);
        }

        self.record_time(&v1, &v2);
        self.widen_bounds(&v1, &v2);
        self.state.position = target;
    }

    /// G2 / G3
    pub(super) fn arc_move(&mut self, motion: MotionMode, params: &Params) {
        let plane = self.state.modal.plane;
        let relative = self.state.modal.is_relative();
        let state = &self.state;

        let target = CNCPoint::with_a(
            state.translate_x(params.get('X'), relative),
            state.translate_y(params.get('Y'), relative),
            state.translate_z(params.get('Z'), relative),
            state.position.a,
        );
        let centre_offset = CNCPoint::new(
            state.translate_i(params.get('I')),
            state.translate_j(params.get('J')),
            state.translate_k(params.get('K')),
        );
        let radius = state.translate_r(params.get('R'));

        let v1 = state.display_position();
        let v2 = state.display(&target);

        let canonical = plane.to_canonical(v1).and_then(|start| {
            let end = plane.to_canonical(v2)?;
            let offset = plane.to_canonical(centre_offset)?;
            Ok((start, end, offset))
        });
        let (start, end, offset) = match canonical {
            Ok(points) => points,
            Err(err) => {
                error!(line = self.total_lines, error = %err, "Dropping arc");
                return;
            }
        };

        let center = if radius != 0.0 {
            match arc_center_from_radius(&start, &end, radius, motion == MotionMode::ArcCw) {
                Some(center) => center,
                None => {
                    warn!(
                        line = self.total_lines,
                        radius, "Dropping radius arc with coincident endpoints"
                    );
                    return;
                }
            }
        } else {
            start.add(&offset)
        };

        self.set_motion(motion);
        let modal = self.state.modal;
        self.listener.add_arc_curve(&modal, start, end, center);

        self.record_time(&v1, &v2);
        self.widen_bounds(&v1, &v2);
        self.state.position = target;
    }

    /// G92 with axis words shifts the program frame so the current point
    /// takes the given values; without axis words it behaves like G92.1.
    /// B and C are not tracked, so `G92 B5` leaves every offset alone.
    pub(super) fn set_datum(&mut self, params: &Params) {
        if !params.has_axis_words() {
            self.reset_datum();
            return;
        }

        let state = &mut self.state;
        let mut position = state.position;
        let mut offsets = state.offsets;

        if params.has('X') {
            let v = state.translate_x(params.get('X'), false);
            offsets.x += position.x - v;
            position.x = v;
        }
        if params.has('Y') {
            let v = state.translate_y(params.get('Y'), false);
            offsets.y += position.y - v;
            position.y = v;
        }
        if params.has('Z') {
            let v = state.translate_z(params.get('Z'), false);
            offsets.z += position.z - v;
            position.z = v;
        }
        if params.has('A') {
            let v = state.translate_a(params.get('A'), false);
            offsets.a += position.a - v;
            position.a = v;
        }

        state.position = position;
        state.offsets = offsets;
        debug!(line = self.total_lines, offsets = %offsets, "Datum shifted");
    }

    /// G92.1: fold offsets back into the position
    pub(super) fn reset_datum(&mut self) {
        let state = &mut self.state;
        state.position = state.position.add(&state.offsets);
        state.offsets = CNCPoint::default();
        debug!(line = self.total_lines, "Datum offsets cleared");
    }

    fn record_time(&mut self, start: &CNCPoint, end: &CNCPoint) {
        let feed = self.state.feed_mm_per_sec();
        if self.estimator.record_move(start, end, feed).is_none() {
            let err = GcodeError::InvalidTravelTime {
                line_number: self.total_lines,
                reason: format!("no usable duration at {} mm/s", feed),
            };
            warn!(error = %err, "Skipping move in time estimate");
        }
    }

    fn widen_bounds(&mut self, start: &CNCPoint, end: &CNCPoint) {
        self.bounds.update(start.x, start.y, start.z);
        self.bounds.update(end.x, end.y, end.z);
    }
}
