use super::*;
use crate::foundation::core::Length;
use crate::page::dsl::{PageBuilder, PanelBuilder, flow};

fn vp() -> ViewportSize {
    ViewportSize::new(1280.0, 1000.0).unwrap()
}

fn page() -> PageSpec {
    PageBuilder::new()
        .hero(PanelBuilder::new("hero").pin_length(Length::Px(1300.0)))
        .feature(PanelBuilder::new("system").pin_length(Length::Px(1300.0)))
        .flow(flow("contact", Length::Px(900.0)))
        .build()
        .unwrap()
}

#[test]
fn pinned_sections_reserve_height_plus_pin_length() {
    let layout = PageLayout::solve(&page(), vp()).unwrap();

    let hero = layout.section("hero").unwrap();
    assert_eq!(hero.top, 0.0);
    assert_eq!(hero.span, 2300.0);
    assert_eq!(hero.pin, Some(PinRange::new(0.0, 1300.0).unwrap()));

    let system = layout.section("system").unwrap();
    assert_eq!(system.top, 2300.0);
    assert_eq!(system.pin, Some(PinRange::new(2300.0, 3600.0).unwrap()));

    let contact = layout.section("contact").unwrap();
    assert_eq!(contact.top, 4600.0);
    assert_eq!(contact.pin, None);

    assert_eq!(layout.content_height, 5500.0);
    assert_eq!(layout.max_scroll, 4500.0);
    assert_eq!(layout.pin_ranges().len(), 2);
}

#[test]
fn relative_lengths_follow_the_viewport() {
    let spec = PageBuilder::new()
        .feature(PanelBuilder::new("a").pin_length(Length::Vh(0.5)))
        .build()
        .unwrap();
    let small = PageLayout::solve(&spec, ViewportSize::new(800.0, 600.0).unwrap()).unwrap();
    let large = PageLayout::solve(&spec, vp()).unwrap();
    assert_eq!(small.sections[0].pin.unwrap().end, 300.0);
    assert_eq!(large.sections[0].pin.unwrap().end, 500.0);
    assert_eq!(large.max_scroll, 500.0);
}

#[test]
fn scroll_target_is_clamped_to_extent() {
    let layout = PageLayout::solve(&page(), vp()).unwrap();
    assert_eq!(layout.scroll_target("system"), Some(2300.0));
    assert_eq!(layout.scroll_target("contact"), Some(4500.0));
    assert_eq!(layout.scroll_target("nope"), None);
}

#[test]
fn short_page_has_no_scroll() {
    let spec = PageBuilder::new()
        .flow(flow("only", Length::Px(400.0)))
        .build()
        .unwrap();
    let layout = PageLayout::solve(&spec, vp()).unwrap();
    assert_eq!(layout.max_scroll, 0.0);
    assert!(layout.pin_ranges().is_empty());
}

#[test]
fn invalid_viewport_is_a_layout_error() {
    let bad = ViewportSize {
        width: 0.0,
        height: 1000.0,
    };
    assert!(matches!(
        PageLayout::solve(&page(), bad),
        Err(ScrollpinError::Layout(_))
    ));
}
