use super::*;

const ALL: [Ease; 7] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
];

#[test]
fn endpoints_are_fixed() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::InCubic.apply(-3.0), 0.0);
    assert_eq!(Ease::OutCubic.apply(7.0), 1.0);
}

#[test]
fn in_ease_lags_and_out_ease_leads_linear() {
    assert!(Ease::InCubic.apply(0.5) < 0.5);
    assert!(Ease::OutCubic.apply(0.5) > 0.5);
    assert_eq!(Ease::Linear.apply(0.25), 0.25);
}

#[test]
fn web_easing_names_deserialize() {
    let e: Ease = serde_json::from_str("\"power2.in\"").unwrap();
    assert_eq!(e, Ease::InCubic);
    let e: Ease = serde_json::from_str("\"none\"").unwrap();
    assert_eq!(e, Ease::Linear);
    let e: Ease = serde_json::from_str("\"out_cubic\"").unwrap();
    assert_eq!(e, Ease::OutCubic);
}
