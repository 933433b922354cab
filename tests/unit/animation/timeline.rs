use super::*;

#[test]
fn from_to_then_to_chains_through_rest() {
    let mut tl = Timeline::new();
    tl.from_to(
        &["card"],
        PropSet::new().x_vw(-0.6).opacity(0.0),
        PropSet::new().x_vw(0.0).opacity(1.0),
        TweenOpts::at(0.0, 0.3),
    )
    .unwrap();
    tl.to(
        &["card"],
        PropSet::new().x_vw(-0.18).opacity(0.0),
        TweenOpts::at(0.7, 0.3).ease(Ease::InCubic),
    )
    .unwrap();

    let start = tl.sample(&"card", 0.0);
    assert_eq!(start.x_vw, -0.6);
    assert_eq!(start.opacity, 0.0);

    let settled = tl.sample(&"card", 0.5);
    assert_eq!(settled, VisualState::REST);

    let exit = tl.sample(&"card", 1.0);
    assert_eq!(exit.x_vw, -0.18);
    assert_eq!(exit.opacity, 0.0);

    // The exit tween picked up the settled value as its start.
    let seg = &tl.track(&"card", Prop::Opacity).unwrap().segments()[1];
    assert_eq!(seg.from, 1.0);
}

#[test]
fn stagger_delays_each_target() {
    let mut tl = Timeline::new();
    tl.from_to(
        &[0u8, 1, 2],
        PropSet::new().opacity(0.0),
        PropSet::new().opacity(1.0),
        TweenOpts::at(0.0, 0.5).stagger(0.25),
    )
    .unwrap();

    assert_eq!(tl.sample(&0, 0.25).opacity, 0.5);
    assert_eq!(tl.sample(&1, 0.25).opacity, 0.0);
    assert_eq!(tl.sample(&2, 0.75).opacity, 0.5);
    assert_eq!(tl.targets(), &[0, 1, 2]);
}

#[test]
fn simultaneous_tweens_share_a_position() {
    let mut tl = Timeline::new();
    tl.from_to(
        &["a", "b"],
        PropSet::new().scale(0.5),
        PropSet::new().scale(1.0),
        TweenOpts::at(0.0, 1.0),
    )
    .unwrap();
    assert_eq!(tl.sample(&"a", 0.5), tl.sample(&"b", 0.5));
}

#[test]
fn rejects_tweens_outside_parent() {
    let mut tl: Timeline<&str> = Timeline::new();
    let err = tl
        .to(&["a"], PropSet::new().opacity(0.0), TweenOpts::at(0.8, 0.3))
        .unwrap_err();
    assert!(matches!(err, ScrollpinError::Animation(_)));

    let err = tl
        .to(
            &["a", "b", "c"],
            PropSet::new().opacity(0.0),
            TweenOpts::at(0.5, 0.3).stagger(0.2),
        )
        .unwrap_err();
    assert!(matches!(err, ScrollpinError::Animation(_)));
    assert!(tl.is_empty());
}

#[test]
fn rejects_from_without_to() {
    let mut tl: Timeline<&str> = Timeline::new();
    assert!(
        tl.from_to(
            &["a"],
            PropSet::new().y_px(18.0),
            PropSet::new().opacity(1.0),
            TweenOpts::at(0.0, 0.3),
        )
        .is_err()
    );
}

#[test]
fn seek_visits_every_target_and_is_path_independent() {
    let mut tl = Timeline::new();
    tl.from_to(
        &["a", "b"],
        PropSet::new().y_px(18.0).opacity(0.0),
        PropSet::new().y_px(0.0).opacity(1.0),
        TweenOpts::at(0.05, 0.2).stagger(0.03),
    )
    .unwrap();

    let collect = |p: f64| {
        let mut out = Vec::new();
        tl.seek(p, |k, s| out.push((*k, s)));
        out
    };
    let direct = collect(0.12);
    let _ = collect(0.9);
    let _ = collect(0.01);
    assert_eq!(collect(0.12), direct);
    assert_eq!(direct.len(), 2);
}

#[test]
fn untouched_props_rest_and_progress_is_clamped() {
    let mut tl = Timeline::new();
    tl.from_to(
        &["a"],
        PropSet::new().opacity(0.0),
        PropSet::new().opacity(1.0),
        TweenOpts::at(0.0, 0.3),
    )
    .unwrap();
    let s = tl.sample(&"a", -4.0);
    assert_eq!(s.opacity, 0.0);
    assert_eq!(s.scale, 1.0);
    assert_eq!(tl.sample(&"a", f64::NAN).opacity, 0.0);
    assert_eq!(tl.sample(&"a", 9.0).opacity, 1.0);

    tl.clear();
    assert!(tl.is_empty());
    assert_eq!(tl.sample(&"a", 0.0), VisualState::REST);
}
