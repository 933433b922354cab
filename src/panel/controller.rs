use crate::{
    animation::playhead::Playhead,
    animation::timeline::Timeline,
    foundation::core::{PinRange, ScrubProgress},
    foundation::error::{ScrollpinError, ScrollpinResult},
    panel::motion::{
        HERO_INTRO_SECS, LayoutVariant, PanelKind, PhaseSchedule, build_hero_intro,
        build_timeline,
    },
    panel::surface::{ElementId, PanelSurface},
};

/// Lifecycle of a [`PanelController`].
///
/// ```text
/// Unmounted --register_pin--> Registered <--activate/deactivate--> Active
///     \______________________________\_______________________________\--teardown--> TornDown
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum PanelState {
    /// Created, no pin range yet.
    Unmounted,
    /// Pin range registered; scroll is outside it.
    Registered,
    /// Scroll is inside the pin range.
    Active,
    /// Released; every call is a no-op.
    TornDown,
}

/// Owns one pinned panel: its pin range, its scrubbed timeline and its visual target.
#[derive(Debug)]
pub struct PanelController<S> {
    id: String,
    kind: PanelKind,
    schedule: PhaseSchedule,
    surface: S,
    state: PanelState,
    pin: Option<PinRange>,
    timeline: Option<Timeline<ElementId>>,
    progress: Option<ScrubProgress>,
    layout: LayoutVariant,
    intro: Option<(Timeline<ElementId>, Playhead)>,
}

impl<S> PanelController<S>
where
    S: PanelSurface,
{
    /// Create an unmounted controller writing into `surface`.
    pub fn new(id: impl Into<String>, kind: PanelKind, surface: S) -> Self {
        Self {
            id: id.into(),
            kind,
            schedule: PhaseSchedule::default(),
            surface,
            state: PanelState::Unmounted,
            pin: None,
            timeline: None,
            progress: None,
            layout: LayoutVariant::Left,
            intro: None,
        }
    }

    /// Replace the phase schedule used by [`Self::build_timeline`].
    pub fn with_schedule(mut self, schedule: PhaseSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Pin the panel for `range` and hand the range back to the composition root.
    ///
    /// Allowed once. After teardown this is a no-op that still echoes `range`.
    pub fn register_pin(&mut self, range: PinRange) -> ScrollpinResult<PinRange> {
        let range = PinRange::new(range.start, range.end)?;
        match self.state {
            PanelState::Unmounted => {
                self.pin = Some(range);
                self.state = PanelState::Registered;
                tracing::debug!(panel = %self.id, start = range.start, end = range.end, "pin registered");
                Ok(range)
            }
            PanelState::TornDown => {
                tracing::debug!(panel = %self.id, "register_pin after teardown ignored");
                Ok(range)
            }
            PanelState::Registered | PanelState::Active => Err(ScrollpinError::lifecycle(
                format!("panel '{}' already registered a pin range", self.id),
            )),
        }
    }

    /// Replace the pin range after a viewport change.
    pub fn refresh_pin(&mut self, range: PinRange) -> ScrollpinResult<()> {
        let range = PinRange::new(range.start, range.end)?;
        match self.state {
            PanelState::Registered | PanelState::Active => {
                self.pin = Some(range);
                Ok(())
            }
            PanelState::TornDown => Ok(()),
            PanelState::Unmounted => Err(ScrollpinError::lifecycle(format!(
                "panel '{}' has no pin range to refresh",
                self.id
            ))),
        }
    }

    /// Build (or rebuild) the scrubbed timeline for `layout`.
    ///
    /// Returns `false` and schedules nothing when the panel is not registered, its visual
    /// root is not attached, or no animatable element exists. The new timeline is rendered
    /// immediately at the last applied progress (or `0`).
    pub fn build_timeline(&mut self, layout: LayoutVariant) -> bool {
        if !matches!(self.state, PanelState::Registered | PanelState::Active) {
            tracing::debug!(panel = %self.id, state = ?self.state, "build_timeline skipped");
            return false;
        }
        if !self.surface.is_attached() {
            tracing::debug!(panel = %self.id, "surface not attached; no timeline scheduled");
            self.timeline = None;
            return false;
        }

        let timeline = match build_timeline(self.kind, layout, &self.schedule, &self.surface) {
            Ok(tl) => tl,
            Err(err) => {
                tracing::warn!(panel = %self.id, %err, "timeline construction failed");
                self.timeline = None;
                return false;
            }
        };
        if timeline.is_empty() {
            tracing::debug!(panel = %self.id, "no animatable elements; no timeline scheduled");
            self.timeline = None;
            return false;
        }

        tracing::debug!(panel = %self.id, ?layout, targets = timeline.targets().len(), "timeline built");
        self.timeline = Some(timeline);
        self.layout = layout;
        let at = self.progress.take().unwrap_or(ScrubProgress::START);
        self.on_scrub(at);
        true
    }

    /// Set the timeline to exactly `progress` and write every element's state.
    ///
    /// Idempotent; returns `false` when nothing is scheduled or the panel is torn down.
    /// While the load intro plays, progress before the exit band is only recorded; reaching
    /// the exit band cuts the intro short.
    pub fn on_scrub(&mut self, progress: ScrubProgress) -> bool {
        if !matches!(self.state, PanelState::Registered | PanelState::Active) {
            return false;
        }
        if self.timeline.is_none() {
            return false;
        }
        if self.intro.is_some() {
            if progress.value() < self.schedule.exit_start {
                self.progress = Some(progress);
                return true;
            }
            tracing::debug!(panel = %self.id, "intro cut short by exit scrub");
            self.intro = None;
            self.progress = None;
        }
        let Some(timeline) = &self.timeline else {
            return false;
        };
        if self.progress == Some(progress) {
            return true;
        }
        timeline.seek(progress.value(), |el, st| self.surface.write(*el, &st));
        self.progress = Some(progress);
        true
    }

    /// Start the hero's one-shot load intro from hidden.
    ///
    /// Only hero panels with a scheduled timeline play it, and only while scroll is still
    /// before the exit band. Returns `true` when the intro started.
    pub fn play_intro(&mut self) -> bool {
        if self.kind != PanelKind::Hero || self.timeline.is_none() || !self.is_live() {
            return false;
        }
        let at = self.progress.unwrap_or(ScrubProgress::START);
        if at.value() >= self.schedule.exit_start {
            return false;
        }
        let intro = match build_hero_intro(self.layout, &self.surface) {
            Ok(tl) => tl,
            Err(err) => {
                tracing::warn!(panel = %self.id, %err, "intro construction failed");
                return false;
            }
        };
        let mut playhead = match Playhead::new(HERO_INTRO_SECS) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(panel = %self.id, %err, "intro playhead rejected");
                return false;
            }
        };
        intro.seek(0.0, |el, st| self.surface.write(*el, &st));
        playhead.play();
        self.intro = Some((intro, playhead));
        tracing::debug!(panel = %self.id, "intro playing");
        true
    }

    /// Advance the load intro by `dt_secs`. Returns `true` while it is still playing.
    ///
    /// On completion the scrubbed timeline takes over at the last recorded progress.
    pub fn advance_intro(&mut self, dt_secs: f64) -> bool {
        let Some((intro, playhead)) = &mut self.intro else {
            return false;
        };
        let p = playhead.advance(dt_secs);
        intro.seek(p, |el, st| self.surface.write(*el, &st));
        if playhead.is_playing() {
            return true;
        }
        self.intro = None;
        let at = self.progress.take().unwrap_or(ScrubProgress::START);
        self.on_scrub(at);
        tracing::debug!(panel = %self.id, "intro finished");
        false
    }

    /// Return `true` while the load intro is playing.
    pub fn intro_playing(&self) -> bool {
        self.intro.is_some()
    }

    /// Mark the panel as currently pinned. Returns `true` on a state change.
    pub fn activate(&mut self) -> bool {
        if self.state == PanelState::Registered {
            self.state = PanelState::Active;
            tracing::trace!(panel = %self.id, "active");
            return true;
        }
        false
    }

    /// Mark the panel as released. Returns `true` on a state change.
    pub fn deactivate(&mut self) -> bool {
        if self.state == PanelState::Active {
            self.state = PanelState::Registered;
            tracing::trace!(panel = %self.id, "inactive");
            return true;
        }
        false
    }

    /// Release the timeline and pin range. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.state == PanelState::TornDown {
            return;
        }
        self.state = PanelState::TornDown;
        self.timeline = None;
        self.intro = None;
        self.pin = None;
        self.progress = None;
        tracing::debug!(panel = %self.id, "torn down");
    }

    /// Panel identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Choreography family.
    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Registered pin range; `None` before registration and after teardown.
    pub fn pin_range(&self) -> Option<PinRange> {
        self.pin
    }

    /// Last applied progress.
    pub fn progress(&self) -> Option<ScrubProgress> {
        self.progress
    }

    /// Return `true` when a timeline is scheduled.
    pub fn has_timeline(&self) -> bool {
        self.timeline.is_some()
    }

    /// The scheduled timeline, if any.
    pub fn timeline(&self) -> Option<&Timeline<ElementId>> {
        self.timeline.as_ref()
    }

    /// Return `true` until torn down.
    pub fn is_live(&self) -> bool {
        self.state != PanelState::TornDown
    }

    /// Visual target.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable visual target (e.g. to attach it before building).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/panel/controller.rs"]
mod tests;
