//! Motion, datum and arc behaviour of the virtualizer

use gcodesim_core::{CNCPoint, Units};
use gcodesim_virtualizer::{
    DistanceMode, MotionMode, Plane, Segment, ToolpathRecorder, Virtualizer, VirtualizerConfig,
    VirtualizerListener, Word, WordTokenizer,
};

fn run(program: &str) -> Virtualizer<ToolpathRecorder> {
    let mut v = Virtualizer::new(ToolpathRecorder::new(), VirtualizerConfig::default());
    v.virtualize_str(program);
    v
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_modal_word_omission_continues_motion() {
    let v = run("G1 X10 F600\nY5");
    let segments = &v.listener().segments;
    assert_eq!(segments.len(), 2);
    assert!(matches!(segments[1], Segment::Line { .. }));
    assert_eq!(segments[1].start(), CNCPoint::new(10.0, 0.0, 0.0));
    assert_eq!(segments[1].end(), CNCPoint::new(10.0, 5.0, 0.0));
    assert_eq!(segments[1].modal().motion, MotionMode::Linear);
}

#[test]
fn test_relative_and_absolute_distance() {
    let v = run("G91\nG1 X5 F100\nG1 X5\nG90\nG1 Y2");
    assert_eq!(v.modal().distance, DistanceMode::Absolute);
    assert_eq!(v.position(), CNCPoint::new(10.0, 2.0, 0.0));
}

#[test]
fn test_imperial_units_convert_to_mm() {
    let v = run("G20\nG0 X1 Y-0.5");
    assert_eq!(v.modal().units, Units::Imperial);
    assert!(approx(v.position().x, 25.4));
    assert!(approx(v.position().y, -12.7));
}

#[test]
fn test_rotary_axis_is_never_scaled() {
    let v = run("G20\nG0 A45");
    assert_eq!(v.position().a, 45.0);
}

#[test]
fn test_large_rotary_move_is_a_curve() {
    let v = run("G0 A90\nG0 A100\nG1 X5 A100 F100");
    let recorder = v.listener();
    assert_eq!(recorder.curves().count(), 1);
    assert_eq!(recorder.lines().count(), 2);
}

#[test]
fn test_datum_shift_round_trip() {
    let mut v = run("G0 X10 Y10");
    v.virtualize("G92 X0 Y0");
    assert_eq!(v.position(), CNCPoint::new(0.0, 0.0, 0.0));
    assert_eq!(v.offsets(), CNCPoint::new(10.0, 10.0, 0.0));
    assert_eq!(v.display_position(), CNCPoint::new(10.0, 10.0, 0.0));

    v.virtualize("G92.1");
    assert_eq!(v.position(), CNCPoint::new(10.0, 10.0, 0.0));
    assert_eq!(v.offsets(), CNCPoint::default());
}

#[test]
fn test_moves_after_datum_shift_use_display_frame() {
    let mut v = run("G0 X10 Y10\nG92 X0 Y0\nG1 X5 F300");
    let last = v.listener().segments.last().cloned().unwrap();
    assert_eq!(last.start(), CNCPoint::new(10.0, 10.0, 0.0));
    assert_eq!(last.end(), CNCPoint::new(15.0, 10.0, 0.0));

    v.virtualize("G92.1");
    assert_eq!(v.position(), CNCPoint::new(15.0, 10.0, 0.0));
}

#[test]
fn test_datum_without_axis_words_clears_offsets() {
    let v = run("G0 X4\nG92 X0\nG92");
    assert_eq!(v.position().x, 4.0);
    assert_eq!(v.offsets().x, 0.0);
}

#[test]
fn test_datum_with_untracked_axis_keeps_offsets() {
    let v = run("G0 X4\nG92 X0\nG92 B5");
    assert_eq!(v.position().x, 0.0);
    assert_eq!(v.offsets().x, 4.0);
}

#[test]
fn test_datum_ignores_relative_mode() {
    let v = run("G0 X4\nG91\nG92 X1");
    assert_eq!(v.position().x, 1.0);
    assert_eq!(v.offsets().x, 3.0);
}

#[test]
fn test_arc_from_centre_offsets() {
    let v = run("G2 X10 Y0 I5 J0");
    let arc = v.listener().arcs().next().cloned().unwrap();
    match arc {
        Segment::Arc {
            start, end, center, ..
        } => {
            assert_eq!(start, CNCPoint::new(0.0, 0.0, 0.0));
            assert_eq!(end, CNCPoint::new(10.0, 0.0, 0.0));
            assert_eq!(center, CNCPoint::new(5.0, 0.0, 0.0));
        }
        other => panic!("expected an arc, got {:?}", other),
    }
    assert_eq!(v.modal().motion, MotionMode::ArcCw);
    assert_eq!(v.position(), CNCPoint::new(10.0, 0.0, 0.0));
}

#[test]
fn test_arc_from_radius() {
    let v = run("G3 X10 Y0 R5");
    match v.listener().arcs().next().unwrap() {
        Segment::Arc { center, .. } => {
            assert!(approx(center.x, 5.0));
            assert!(approx(center.y, 0.0));
        }
        _ => unreachable!(),
    };
}

#[test]
fn test_arc_in_zx_plane_is_permuted() {
    let v = run("G18\nG2 X10 Z0 I5 K0");
    let arc = v.listener().arcs().next().cloned().unwrap();
    assert_eq!(arc.modal().plane, Plane::Zx);
    match &arc {
        Segment::Arc { end, center, .. } => {
            assert_eq!(*end, CNCPoint::new(0.0, 10.0, 0.0));
            assert_eq!(*center, CNCPoint::new(0.0, 5.0, 0.0));
        }
        _ => unreachable!(),
    }
    let (_, machine_end) = arc.machine_endpoints();
    assert_eq!(machine_end, CNCPoint::new(10.0, 0.0, 0.0));
    assert_eq!(v.position(), CNCPoint::new(10.0, 0.0, 0.0));
}

#[test]
fn test_arc_keeps_rotary_position() {
    let v = run("G0 A20\nG2 X10 Y0 I5");
    assert_eq!(v.position().a, 20.0);
}

#[test]
fn test_arc_in_unsupported_plane_is_dropped() {
    let v = run("G17.1\nG2 X10 Y0 I5\nG17\nX3");
    assert_eq!(v.listener().arcs().count(), 0);
    // the dropped arc never became the active motion mode
    assert_eq!(v.modal().motion, MotionMode::Rapid);
    assert_eq!(v.position(), CNCPoint::new(3.0, 0.0, 0.0));
}

#[test]
fn test_radius_arc_with_coincident_endpoints_is_dropped() {
    let v = run("G0 X1\nG2 X1 R5");
    assert_eq!(v.listener().arcs().count(), 0);
    assert_eq!(v.position().x, 1.0);
}

#[test]
fn test_bounds_cover_offset_endpoints() {
    let v = run("G92 X-5\nG1 X0 F100");
    let bbox = v.generate_file_stats().bbox;
    assert_eq!(bbox.min.x, 0.0);
    assert_eq!(bbox.max.x, 5.0);
    assert_eq!(bbox.delta.x, 5.0);
}

#[test]
fn test_z_minimum_tracks_z() {
    let v = run("G0 X-50 Z0\nG1 Z-2 F100");
    assert_eq!(v.bounds().min_z, -2.0);
}

#[test]
fn test_legacy_z_minimum_follows_x() {
    let config = VirtualizerConfig {
        legacy_z_min_bound: true,
        ..VirtualizerConfig::default()
    };
    let mut v = Virtualizer::new(ToolpathRecorder::new(), config);
    v.virtualize_str("G0 X-50 Z0\nG1 Z-2 F100");
    assert_eq!(v.bounds().min_z, -50.0);
}

#[test]
fn test_time_estimate() {
    let v = run("G1 X100 F600\nG1 X200");
    // 20s accelerating from rest, then 10s at 10 mm/s
    assert!(approx(v.estimated_time(), 30.0));
}

#[test]
fn test_time_estimate_in_inches() {
    let v = run("G20 G1 X1 F60");
    assert!(approx(v.estimated_time(), 2.0));
}

#[test]
fn test_plunge_uses_z_travel() {
    let v = run("G1 Z-10 F600\nG1 Z-20");
    assert!(approx(v.estimated_time(), 3.0));
}

fn arc_duration(setup: &str, arc: &str) -> f64 {
    let mut v = run(setup);
    let before = v.estimated_time();
    v.virtualize(arc);
    v.estimated_time() - before
}

#[test]
fn test_arc_time_uses_xy_travel_in_every_plane() {
    // steady 10 mm/s, X travel of 10 regardless of the arc plane
    let zx = arc_duration("G1 Y-10 F600\nG18", "G2 X10 Z10 I5 K5 F600");
    assert!(approx(zx, 1.0), "{}", zx);

    let yz = arc_duration("G1 X-10 F600\nG19", "G2 Y10 Z10 J5 K5 F600");
    assert!(approx(yz, 1.0), "{}", yz);
}

#[test]
fn test_arc_time_falls_back_to_z_travel() {
    let d = arc_duration("G1 Y-10 F600\nG19", "G2 Y-10 Z20 J0 K10 F600");
    assert!(approx(d, 2.0), "{}", d);
}

#[test]
fn test_idempotent_modal_change() {
    let v = run("G20\nG20");
    assert_eq!(v.listener().modal_changes, 1);

    let v = run("G21\nG21");
    assert_eq!(v.listener().modal_changes, 0);
}

#[test]
fn test_borrowed_listener() {
    let mut recorder = ToolpathRecorder::new();
    {
        let mut v = Virtualizer::new(&mut recorder, VirtualizerConfig::default());
        v.virtualize_str("G0 X1\n\nG1 Y1 F10");
    }
    assert_eq!(recorder.segments.len(), 2);
    assert_eq!(recorder.lines_consumed, 3);
}

#[derive(Default)]
struct CountingListener {
    lines: usize,
    arcs: usize,
}

impl VirtualizerListener for CountingListener {
    fn add_line(&mut self, _modal: &gcodesim_virtualizer::ModalState, _s: CNCPoint, _e: CNCPoint) {
        self.lines += 1;
    }

    fn add_arc_curve(
        &mut self,
        _modal: &gcodesim_virtualizer::ModalState,
        _s: CNCPoint,
        _e: CNCPoint,
        _c: CNCPoint,
    ) {
        self.arcs += 1;
    }
}

#[test]
fn test_partial_listener() {
    let mut v = Virtualizer::new(CountingListener::default(), VirtualizerConfig::default());
    v.virtualize_str("G0 X1\nG2 X2 I0.5\nG0 A90");
    let listener = v.into_listener();
    assert_eq!(listener.lines, 1);
    assert_eq!(listener.arcs, 1);
}

/// Splits on whitespace and expects `<letter><number>` words
struct WhitespaceTokenizer;

impl WordTokenizer for WhitespaceTokenizer {
    fn tokenize(&self, line: &str) -> Vec<Word> {
        line.split_whitespace()
            .filter_map(|token| {
                let mut chars = token.chars();
                let letter = chars.next()?;
                Some(Word::new(letter, chars.as_str().parse().ok()))
            })
            .collect()
    }
}

#[test]
fn test_custom_tokenizer() {
    let mut v = Virtualizer::with_tokenizer(
        ToolpathRecorder::new(),
        VirtualizerConfig::default(),
        Box::new(WhitespaceTokenizer),
    );
    v.virtualize_str("g1 x3 y4 f60\n(note)\ng0 z1");
    assert_eq!(v.position(), CNCPoint::new(3.0, 4.0, 1.0));
    assert_eq!(v.total_lines(), 2);
}
