use super::*;

fn pin(start: f64, end: f64) -> PinRange {
    PinRange::new(start, end).unwrap()
}

fn three_panels() -> SnapCoordinator {
    let mut c = SnapCoordinator::new(SnapConfig::default());
    c.rebuild(
        3000.0,
        &[pin(0.0, 1000.0), pin(1000.0, 2000.0), pin(2000.0, 3000.0)],
    );
    c
}

#[test]
fn centers_are_exact_midpoints() {
    let c = three_panels();
    for r in c.table() {
        assert_eq!(r.center, r.start + (r.end - r.start) * 0.5);
        assert!(r.start <= r.center && r.center <= r.end);
    }
    let centers: Vec<f64> = c.table().iter().map(|r| r.center).collect();
    assert!((centers[0] - 0.1667).abs() < 1e-4);
    assert!((centers[1] - 0.5).abs() < 1e-12);
    assert!((centers[2] - 0.8333).abs() < 1e-4);
}

#[test]
fn resolves_inside_buffer_to_nearest_center() {
    let c = three_panels();
    assert!((c.resolve(0.95) - 0.8333).abs() < 1e-4);
    // Contiguous ranges cover all of scroll-space, so 0.3 is pinned and snaps to panel 1.
    assert!((c.resolve(0.3) - 1.0 / 6.0).abs() < 1e-12);
}

#[test]
fn flowing_fractions_pass_through() {
    let mut c = SnapCoordinator::new(SnapConfig::default());
    // Pinned at [0.0, 0.2] and [0.5, 0.7] with flowing content in between.
    c.rebuild(1000.0, &[pin(0.0, 200.0), pin(500.0, 700.0)]);
    assert_eq!(c.classify(0.3), Region::Flowing);
    assert_eq!(c.resolve(0.3), 0.3);
    assert_eq!(c.resolve(0.9), 0.9);
    // Inside the tolerance buffer just past the first range.
    assert_eq!(c.classify(0.215), Region::Pinned { index: 0 });
    assert!((c.resolve(0.215) - 0.1).abs() < 1e-12);
}

#[test]
fn nearest_center_is_taken_from_the_whole_table() {
    let mut c = SnapCoordinator::new(SnapConfig::default());
    // A long range [0.0, 0.6] followed by a short one at [0.62, 0.64].
    c.rebuild(1000.0, &[pin(0.0, 600.0), pin(620.0, 640.0)]);
    let short = c.table()[1];
    assert!(!short.contains_with_tolerance(0.5, 0.02));
    assert_eq!(c.classify(0.5), Region::Pinned { index: 0 });

    // 0.5 sits only in the long range, but the short range's center is closer.
    assert_eq!(c.resolve(0.5), short.center);
    assert!((c.resolve(0.5) - 0.63).abs() < 1e-12);
    // Far enough back, the containing range's own center wins.
    assert_eq!(c.resolve(0.4), c.table()[0].center);
}

#[test]
fn non_finite_ranges_are_left_out_of_the_table() {
    let mut c = SnapCoordinator::new(SnapConfig::default());
    c.rebuild(
        1000.0,
        &[
            PinRange {
                start: f64::NAN,
                end: 5.0,
            },
            pin(100.0, 300.0),
        ],
    );
    assert_eq!(c.table().len(), 1);
    assert_eq!(c.resolve(0.25), c.table()[0].center);
}

#[test]
fn resolve_is_idempotent() {
    let c = three_panels();
    for i in 0..=100 {
        let x = f64::from(i) / 100.0;
        let once = c.resolve(x);
        assert_eq!(c.resolve(once), once, "x={x}");
    }
}

#[test]
fn equidistant_probe_prefers_earlier_range() {
    let mut c = SnapCoordinator::new(SnapConfig { tolerance: 0.02 });
    // Centers at 0.25 and 0.75; both widened ranges cover 0.5.
    c.rebuild(1000.0, &[pin(0.0, 500.0), pin(500.0, 1000.0)]);
    assert_eq!(c.resolve(0.5), 0.25);

    // Same geometry registered in reverse order sorts by start, so the lower range still
    // comes first in the table.
    let mut c = SnapCoordinator::new(SnapConfig::default());
    c.rebuild(1000.0, &[pin(500.0, 1000.0), pin(0.0, 500.0)]);
    assert_eq!(c.table()[0].start, 0.0);
    assert_eq!(c.resolve(0.5), 0.25);
}

#[test]
fn equal_starts_keep_registration_order() {
    let mut c = SnapCoordinator::new(SnapConfig::default());
    c.rebuild(1000.0, &[pin(100.0, 300.0), pin(100.0, 100.0)]);
    assert_eq!(c.table()[0].end, 0.3);
    assert_eq!(c.table()[1].end, 0.1);
}

#[test]
fn empty_configurations_never_snap() {
    let mut c = SnapCoordinator::new(SnapConfig::default());
    c.rebuild(0.0, &[pin(0.0, 100.0)]);
    assert!(c.table().is_empty());
    assert_eq!(c.resolve(0.42), 0.42);

    c.rebuild(1000.0, &[]);
    assert!(c.table().is_empty());
    assert_eq!(c.resolve(0.42), 0.42);
    assert_eq!(c.resolve_px(420.0), 420.0);
}

#[test]
fn degenerate_pin_is_a_snap_marker() {
    let mut c = SnapCoordinator::new(SnapConfig::default());
    c.rebuild(1000.0, &[pin(500.0, 500.0)]);
    assert_eq!(c.resolve(0.51), 0.5);
    assert_eq!(c.resolve(0.6), 0.6);
}

#[test]
fn ranges_past_scroll_extent_are_clamped() {
    let mut c = SnapCoordinator::new(SnapConfig::default());
    c.rebuild(1000.0, &[pin(800.0, 1300.0)]);
    let r = c.table()[0];
    assert_eq!(r.end, 1.0);
    assert!((r.center - 0.9).abs() < 1e-12);
}

#[test]
fn resolve_px_scales_through_total() {
    let c = three_panels();
    assert!((c.resolve_px(2850.0) - 2500.0).abs() < 1e-6);
    assert_eq!(c.total(), 3000.0);
}

#[test]
fn clear_and_non_finite_input() {
    let mut c = three_panels();
    assert!(c.resolve(f64::NAN).is_nan());
    c.clear();
    assert!(c.table().is_empty());
    assert_eq!(c.resolve(0.95), 0.95);
}

#[test]
fn tolerance_is_validated() {
    assert!(SnapConfig { tolerance: -0.1 }.validate().is_err());
    assert!(SnapConfig { tolerance: 0.9 }.validate().is_err());
    assert!(SnapConfig::default().validate().is_ok());
}
