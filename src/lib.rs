//! scrollpin is a scroll choreography engine for long-form pages.
//!
//! A page is a vertical stack of sections. Pinned panels hold still for a stretch of scroll
//! while a normalized timeline is scrubbed by scroll position; flowing sections scroll freely
//! and may reveal their items once. When scrolling settles inside a pinned stretch, the page
//! snaps to the nearest panel center.
//!
//! # Pipeline overview
//!
//! 1. **Describe**: build a [`PageSpec`] from JSON or with [`PageBuilder`]
//! 2. **Lay out**: [`PageLayout::solve`] stacks sections and yields each panel's [`PinRange`]
//! 3. **Register**: panels register pin ranges; [`Registration::seal`] feeds the
//!    [`SnapCoordinator`] only once all have registered
//! 4. **Drive**: [`PageSession`] routes user scroll, frame ticks and resizes into the
//!    [`ScrollDriver`], which scrubs every [`PanelController`] and runs settle snapping
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No clocks**: every time-based call takes `now` or `dt` from the caller.
//! - **Platform agnostic**: visual targets are reached through the [`PanelSurface`] trait.
//! - **Idempotent scrub**: applying the same progress twice leaves targets unchanged.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod page;
mod panel;
mod scroll;
mod session;
mod snap;

pub use animation::anim::{Lerp, Segment, Track};
pub use animation::ease::Ease;
pub use animation::playhead::{Direction, PlaybackState, Playhead};
pub use animation::props::{Prop, PropSet, VisualState};
pub use animation::timeline::{Timeline, TweenOpts};
pub use foundation::core::{
    Affine, ENTRANCE_END, EXIT_START, Length, NormalizedRange, Phase, PinRange, ScrubProgress,
    Vec2, ViewportSize,
};
pub use foundation::error::{ScrollpinError, ScrollpinResult};
pub use page::dsl::{PageBuilder, PanelBuilder, flow, flow_with_reveal};
pub use page::layout::{PageLayout, SectionBox};
pub use page::model::{
    ChartVariant, FlowSpec, PageSpec, PanelContent, PanelSpec, RevealSpec, SectionSpec,
};
pub use panel::controller::{PanelController, PanelState};
pub use panel::motion::{
    HERO_INTRO_SECS, LayoutVariant, PanelKind, PhaseSchedule, build_hero_intro, build_timeline,
};
pub use panel::surface::{ElementId, MemorySurface, PanelSurface};
pub use scroll::driver::{ScrollConfig, ScrollDriver, SnapTween};
pub use scroll::reveal::{RevealMotion, RevealTrigger};
pub use session::page_session::{PageSession, Registration};
pub use snap::coordinator::{Region, SnapConfig, SnapCoordinator};
