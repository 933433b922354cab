use super::*;
use crate::foundation::error::ScrollpinError;

#[test]
fn builds_sections_in_order() {
    let page = PageBuilder::new()
        .hero(PanelBuilder::new("hero"))
        .feature(
            PanelBuilder::new("system")
                .layout(LayoutVariant::Right)
                .pin_length(Length::Px(900.0))
                .z_index(20),
        )
        .flow(flow_with_reveal("contact", Length::Vh(1.0), 3))
        .build()
        .unwrap();

    let ids: Vec<&str> = page.sections.iter().map(SectionSpec::id).collect();
    assert_eq!(ids, ["hero", "system", "contact"]);
    let (_, system) = page.sections[1].panel().unwrap();
    assert_eq!(system.pin_length, Length::Px(900.0));
    assert_eq!(system.layout, LayoutVariant::Right);
    let reveal = page.sections[2].flow().unwrap().reveal.as_ref().unwrap();
    assert_eq!(reveal.motion.items, 3);
    assert_eq!(reveal.start, Length::Vh(0.8));
}

#[test]
fn build_validates() {
    let err = PageBuilder::new()
        .feature(PanelBuilder::new("a"))
        .flow(flow("a", Length::Vh(1.0)))
        .build()
        .unwrap_err();
    assert!(matches!(err, ScrollpinError::Validation(_)));
}

#[test]
fn panel_builder_defaults_match_json_defaults() {
    let built = PanelBuilder::new("p").build();
    let parsed: PanelSpec = serde_json::from_str(r#"{"id":"p"}"#).unwrap();
    assert_eq!(built, parsed);
}

#[test]
fn tuning_is_carried_through() {
    let page = PageBuilder::new()
        .snap(SnapConfig { tolerance: 0.05 })
        .scroll(ScrollConfig {
            scrub_lag_secs: 0.6,
            ..ScrollConfig::default()
        })
        .schedule(PhaseSchedule::default())
        .build()
        .unwrap();
    assert_eq!(page.snap.tolerance, 0.05);
    assert_eq!(page.scroll.scrub_lag_secs, 0.6);
}
