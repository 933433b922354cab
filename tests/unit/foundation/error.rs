use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollpinError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrollpinError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        ScrollpinError::layout("x")
            .to_string()
            .contains("layout error:")
    );
    assert!(
        ScrollpinError::lifecycle("x")
            .to_string()
            .contains("lifecycle error:")
    );
    assert!(
        ScrollpinError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollpinError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: ScrollpinError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ScrollpinError::Serde(_)));
}
