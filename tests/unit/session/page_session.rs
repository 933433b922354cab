use super::*;
use crate::foundation::core::Length;
use crate::page::dsl::{PageBuilder, PanelBuilder, flow_with_reveal};
use crate::panel::controller::PanelState;
use crate::panel::surface::{ElementId, MemorySurface};

fn page() -> PageSpec {
    PageBuilder::new()
        .hero(PanelBuilder::new("hero").pin_length(Length::Px(1000.0)))
        .feature(PanelBuilder::new("system").pin_length(Length::Px(1000.0)))
        .feature(
            PanelBuilder::new("data")
                .layout(LayoutVariant::Right)
                .pin_length(Length::Px(1000.0)),
        )
        .flow(flow_with_reveal("contact", Length::Px(1000.0), 3))
        .build()
        .unwrap()
}

fn vp(height: f64) -> ViewportSize {
    ViewportSize::new(1280.0, height).unwrap()
}

fn mounted() -> PageSession<MemorySurface> {
    PageSession::mount(page(), vp(1000.0), MemorySurface::for_section).unwrap()
}

fn primary(s: &PageSession<MemorySurface>, id: &str) -> crate::animation::props::VisualState {
    *s.panel(id)
        .unwrap()
        .surface()
        .state(ElementId::Primary)
        .unwrap()
}

#[test]
fn mount_registers_panels_and_renders_initial_state() {
    let s = mounted();
    assert_eq!(s.panels().len(), 3);
    assert_eq!(s.reveals().len(), 1);
    assert_eq!(s.coordinator().table().len(), 3);
    assert_eq!(s.coordinator().total(), 6000.0);
    assert_eq!(s.layout().max_scroll, 6000.0);

    assert_eq!(primary(&s, "hero").opacity, 1.0);
    assert_eq!(primary(&s, "system").opacity, 0.0);
    assert!((primary(&s, "system").x_vw + 0.6).abs() < 1e-12);
    assert!((primary(&s, "data").x_vw - 0.6).abs() < 1e-12);
    assert_eq!(s.reveals()[0].threshold(), 5200.0);
}

#[test]
fn scrolling_drives_every_panel() {
    let mut s = mounted();
    s.on_user_scroll(2300.0, 0.0);

    assert_eq!(primary(&s, "hero").opacity, 0.0);
    assert_eq!(primary(&s, "system").opacity, 1.0);
    assert_eq!(primary(&s, "system").x_vw, 0.0);
    assert_eq!(s.panel("system").unwrap().state(), PanelState::Active);
    assert_eq!(s.panel("hero").unwrap().state(), PanelState::Registered);
}

#[test]
fn settle_snaps_into_the_nearest_panel_center() {
    let mut s = mounted();
    s.on_user_scroll(2950.0, 0.0);

    let mut last = None;
    for i in 1..=20 {
        if let Some(y) = s.on_frame(i as f64 * 0.05) {
            last = Some(y);
        }
    }
    let y = last.unwrap();
    assert!((y - 2500.0).abs() < 1e-6);
    assert!((s.scroll_y() - 2500.0).abs() < 1e-6);
    let p = s.panel("system").unwrap().progress().unwrap().value();
    assert!((p - 0.5).abs() < 1e-9);
}

#[test]
fn flowing_regions_scroll_freely() {
    let mut s = mounted();
    s.on_user_scroll(3500.0, 0.0);
    for i in 1..=10 {
        assert_eq!(s.on_frame(i as f64 * 0.05), None);
    }
    assert_eq!(s.scroll_y(), 3500.0);
}

#[test]
fn hero_intro_runs_on_frames_after_mount() {
    let mut s = mounted();
    assert_eq!(s.play_intro(), 1);
    assert_eq!(primary(&s, "hero").opacity, 0.0);
    assert!(!s.panel("system").unwrap().intro_playing());

    s.on_frame(0.0);
    s.on_frame(0.5);
    assert!(s.panel("hero").unwrap().intro_playing());
    s.on_frame(1.0);
    s.on_frame(1.5);
    assert!(!s.panel("hero").unwrap().intro_playing());
    assert_eq!(primary(&s, "hero").opacity, 1.0);
}

#[test]
fn scrolling_into_the_hero_exit_ends_its_intro() {
    let mut s = mounted();
    s.play_intro();
    s.on_user_scroll(900.0, 0.1);
    assert!(!s.panel("hero").unwrap().intro_playing());
    assert!(primary(&s, "hero").opacity < 1.0);

    s.teardown();
    assert_eq!(s.play_intro(), 0);
}

#[test]
fn reveal_plays_once_its_line_is_passed() {
    let mut s = mounted();
    s.on_frame(9.5);
    s.on_user_scroll(5300.0, 10.0);
    assert!(s.reveals()[0].is_playing());
    s.on_frame(10.0);
    s.on_frame(10.5);
    s.on_frame(11.0);
    assert_eq!(s.reveals()[0].progress(), 1.0);
    let card = s.reveals()[0].surface().state(ElementId::Text(2)).unwrap();
    assert_eq!(card.opacity, 1.0);

    s.on_user_scroll(1000.0, 12.0);
    assert!(s.reveals()[0].is_playing());
}

#[test]
fn resize_relayouts_and_rebuilds_the_table() {
    let mut s = mounted();
    s.on_user_scroll(5500.0, 0.0);
    s.on_resize(vp(500.0)).unwrap();

    assert_eq!(
        s.panel("data").unwrap().pin_range(),
        Some(PinRange::new(3000.0, 4000.0).unwrap())
    );
    assert_eq!(s.layout().max_scroll, 5000.0);
    assert_eq!(s.coordinator().total(), 5000.0);
    assert_eq!(s.coordinator().table().len(), 3);
    assert_eq!(s.reveals()[0].threshold(), 4100.0);
    assert_eq!(s.scroll_y(), 5000.0);
    assert_eq!(s.scroll_target("data"), Some(3000.0));
}

#[test]
fn scroll_target_points_at_section_tops() {
    let s = mounted();
    assert_eq!(s.scroll_target("hero"), Some(0.0));
    assert_eq!(s.scroll_target("data"), Some(4000.0));
    assert_eq!(s.scroll_target("contact"), Some(6000.0));
    assert_eq!(s.scroll_target("missing"), None);
}

#[test]
fn teardown_is_idempotent_and_silences_events() {
    let mut s = mounted();
    s.on_user_scroll(2950.0, 0.0);
    s.on_frame(0.1);
    assert!(s.driver().snap_in_flight().is_some());

    s.teardown();
    s.teardown();
    assert!(!s.is_live());
    assert!(s.driver().snap_in_flight().is_none());
    assert!(s.coordinator().table().is_empty());
    assert!(s.panels().iter().all(|p| p.state() == PanelState::TornDown));
    assert!(!s.reveals()[0].is_live());

    assert_eq!(s.on_frame(0.2), None);
    s.on_user_scroll(100.0, 0.3);
    assert_eq!(s.scroll_y(), 2950.0);
    s.on_resize(vp(500.0)).unwrap();
    assert_eq!(s.layout().max_scroll, 6000.0);
}

#[test]
fn missing_target_only_affects_its_own_panel() {
    let s = PageSession::mount(page(), vp(1000.0), |section| {
        if section.id() == "system" {
            MemorySurface::detached(3)
        } else {
            MemorySurface::for_section(section)
        }
    })
    .unwrap();
    assert!(!s.panel("system").unwrap().has_timeline());
    assert!(s.panel("hero").unwrap().has_timeline());
    assert!(s.panel("data").unwrap().has_timeline());
    assert_eq!(s.coordinator().table().len(), 3);
}

#[test]
fn page_without_panels_never_snaps() {
    let spec = PageBuilder::new()
        .flow(flow_with_reveal("only", Length::Px(3000.0), 2))
        .build()
        .unwrap();
    let mut s = PageSession::mount(spec, vp(1000.0), MemorySurface::for_section).unwrap();
    assert!(s.coordinator().table().is_empty());
    s.on_user_scroll(1234.0, 0.0);
    assert_eq!(s.on_frame(0.5), None);
    assert_eq!(s.scroll_y(), 1234.0);
}

#[test]
fn invalid_page_fails_to_mount() {
    let mut spec = page();
    spec.snap.tolerance = -1.0;
    let err = PageSession::mount(spec, vp(1000.0), MemorySurface::for_section).unwrap_err();
    assert!(matches!(err, ScrollpinError::Validation(_)));
}

#[test]
fn registration_seals_only_when_complete() {
    let a = PinRange::new(0.0, 10.0).unwrap();
    let b = PinRange::new(20.0, 30.0).unwrap();

    let mut r = Registration::new(2);
    r.register(1, b).unwrap();
    assert!(!r.is_complete());
    assert_eq!(r.registered(), 1);
    assert!(matches!(
        r.clone().seal(),
        Err(ScrollpinError::Lifecycle(_))
    ));

    assert!(r.register(1, b).is_err());
    assert!(r.register(2, b).is_err());
    r.register(0, a).unwrap();
    assert!(r.is_complete());
    assert_eq!(r.seal().unwrap(), vec![a, b]);
}
