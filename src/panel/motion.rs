//! Per-panel entrance/settle/exit choreography.
//!
//! Every panel timeline is normalized to its pin range: entrance tweens occupy
//! `[0, entrance_end)`, nothing moves in `[entrance_end, exit_start)`, and exit tweens run
//! over `[exit_start, 1]`. Off-positions are fractions of the viewport width so the motion
//! is resolution independent.

use crate::{
    animation::ease::Ease,
    animation::props::PropSet,
    animation::timeline::{Timeline, TweenOpts},
    foundation::core::{ENTRANCE_END, EXIT_START},
    foundation::error::{ScrollpinError, ScrollpinResult},
    panel::surface::{ElementId, PanelSurface},
};

/// Which side of the screen a panel's primary block rests on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    /// Primary block on the left, secondary on the right.
    #[default]
    Left,
    /// Primary block on the right, secondary on the left.
    Right,
}

impl LayoutVariant {
    /// Horizontal direction of the primary block's off-positions.
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Choreography family of a pinned panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    /// Opening panel: visible at rest, only animates out.
    Hero,
    /// Full entrance, settle and exit.
    Feature,
}

/// Timing of the phase bands, as fractions of a panel's pin range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PhaseSchedule {
    /// End of the entrance band.
    pub entrance_end: f64,
    /// Start of the exit band.
    pub exit_start: f64,
    /// Offset of the first text child's entrance.
    pub text_offset: f64,
    /// Delay between successive text children.
    pub text_stagger: f64,
    /// Entrance length of each text child.
    pub text_duration: f64,
    /// Easing used while entering.
    pub entrance_ease: Ease,
    /// Easing used while exiting.
    pub exit_ease: Ease,
}

impl Default for PhaseSchedule {
    fn default() -> Self {
        Self {
            entrance_end: ENTRANCE_END,
            exit_start: EXIT_START,
            text_offset: 0.05,
            text_stagger: 0.03,
            text_duration: 0.15,
            entrance_ease: Ease::Linear,
            exit_ease: Ease::InCubic,
        }
    }
}

impl PhaseSchedule {
    /// Validate band ordering and text cascade bounds.
    pub fn validate(&self) -> ScrollpinResult<()> {
        let values = [
            self.entrance_end,
            self.exit_start,
            self.text_offset,
            self.text_stagger,
            self.text_duration,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ScrollpinError::validation(
                "schedule values must be finite and >= 0",
            ));
        }
        if !(self.entrance_end > 0.0
            && self.entrance_end <= self.exit_start
            && self.exit_start < 1.0)
        {
            return Err(ScrollpinError::validation(
                "schedule must satisfy 0 < entrance_end <= exit_start < 1",
            ));
        }
        if self.text_duration <= 0.0 || self.text_offset + self.text_duration > self.entrance_end
        {
            return Err(ScrollpinError::validation(
                "schedule text cascade must fit inside the entrance band",
            ));
        }
        Ok(())
    }

    fn entrance(&self) -> TweenOpts {
        TweenOpts::at(0.0, self.entrance_end).ease(self.entrance_ease)
    }

    fn exit(&self) -> TweenOpts {
        TweenOpts::at(self.exit_start, 1.0 - self.exit_start).ease(self.exit_ease)
    }

    /// Stagger compressed so the last of `count` text children settles by `entrance_end`.
    pub fn text_stagger_for(&self, count: usize) -> f64 {
        if count <= 1 {
            return 0.0;
        }
        let room = (self.entrance_end - self.text_offset - self.text_duration).max(0.0);
        self.text_stagger.min(room / (count - 1) as f64)
    }
}

// Feature panel off-positions (fractions of viewport width) and end-points.
const PRIMARY_ENTER_X: f64 = 0.60;
const PRIMARY_EXIT_X: f64 = 0.18;
const SECONDARY_ENTER_X: f64 = 0.60;
const SECONDARY_EXIT_X: f64 = 0.18;
const SECONDARY_ENTER_SCALE: f64 = 0.92;
const SECONDARY_EXIT_SCALE: f64 = 1.04;
const TEXT_ENTER_Y_PX: f64 = 18.0;
const TEXT_EXIT_Y_PX: f64 = -12.0;
const HERO_EXIT_X: f64 = 0.10;

/// Wall-clock length of the hero's load intro.
pub const HERO_INTRO_SECS: f64 = 1.4;

// Hero load intro offsets; timings in seconds.
const INTRO_PRIMARY_X: f64 = 0.12;
const INTRO_PRIMARY_SCALE: f64 = 0.96;
const INTRO_PRIMARY_SECS: f64 = 1.0;
const INTRO_SECONDARY_AT_SECS: f64 = 0.4;
const INTRO_SECONDARY_SECS: f64 = 0.6;
const INTRO_SECONDARY_Y_PX: f64 = 24.0;
const INTRO_TEXT_AT_SECS: f64 = 0.3;
const INTRO_TEXT_SECS: f64 = 0.5;
const INTRO_TEXT_STAGGER_SECS: f64 = 0.2;

fn rotate_enter(layout: LayoutVariant) -> f64 {
    match layout {
        LayoutVariant::Left => 22.0,
        LayoutVariant::Right => -18.0,
    }
}

fn rotate_exit(layout: LayoutVariant) -> f64 {
    match layout {
        LayoutVariant::Left => -10.0,
        LayoutVariant::Right => 10.0,
    }
}

/// Build the scrubbed timeline for one panel.
///
/// Elements the surface does not have are left out; the result may be empty.
pub fn build_timeline<S>(
    kind: PanelKind,
    layout: LayoutVariant,
    schedule: &PhaseSchedule,
    surface: &S,
) -> ScrollpinResult<Timeline<ElementId>>
where
    S: PanelSurface + ?Sized,
{
    schedule.validate()?;
    let mut tl = Timeline::new();
    let primary: &[ElementId] = if surface.has_element(ElementId::Primary) {
        &[ElementId::Primary]
    } else {
        &[]
    };
    let secondary: &[ElementId] = if surface.has_element(ElementId::Secondary) {
        &[ElementId::Secondary]
    } else {
        &[]
    };
    let text: Vec<ElementId> = (0..surface.text_len())
        .map(ElementId::Text)
        .filter(|el| surface.has_element(*el))
        .collect();
    let s = layout.sign();

    match kind {
        PanelKind::Feature => {
            tl.from_to(
                primary,
                PropSet::new()
                    .x_vw(s * PRIMARY_ENTER_X)
                    .rotate_y_deg(rotate_enter(layout))
                    .opacity(0.0),
                PropSet::new().x_vw(0.0).rotate_y_deg(0.0).opacity(1.0),
                schedule.entrance(),
            )?;
            tl.to(
                primary,
                PropSet::new()
                    .x_vw(s * PRIMARY_EXIT_X)
                    .rotate_y_deg(rotate_exit(layout))
                    .opacity(0.0),
                schedule.exit(),
            )?;

            tl.from_to(
                secondary,
                PropSet::new()
                    .x_vw(-s * SECONDARY_ENTER_X)
                    .scale(SECONDARY_ENTER_SCALE)
                    .opacity(0.0),
                PropSet::new().x_vw(0.0).scale(1.0).opacity(1.0),
                schedule.entrance(),
            )?;
            tl.to(
                secondary,
                PropSet::new()
                    .x_vw(-s * SECONDARY_EXIT_X)
                    .scale(SECONDARY_EXIT_SCALE)
                    .opacity(0.0),
                schedule.exit(),
            )?;

            tl.from_to(
                &text,
                PropSet::new().y_px(TEXT_ENTER_Y_PX).opacity(0.0),
                PropSet::new().y_px(0.0).opacity(1.0),
                TweenOpts::at(schedule.text_offset, schedule.text_duration)
                    .ease(schedule.entrance_ease)
                    .stagger(schedule.text_stagger_for(text.len())),
            )?;
            tl.to(
                &text,
                PropSet::new().y_px(TEXT_EXIT_Y_PX).opacity(0.0),
                schedule.exit(),
            )?;
        }
        PanelKind::Hero => {
            tl.to(
                primary,
                PropSet::new().x_vw(s * HERO_EXIT_X).opacity(0.0),
                schedule.exit(),
            )?;
            tl.to(
                secondary,
                PropSet::new().x_vw(-s * HERO_EXIT_X).opacity(0.0),
                schedule.exit(),
            )?;
        }
    }
    Ok(tl)
}

/// Build the hero's one-shot load intro, normalized over [`HERO_INTRO_SECS`].
///
/// Every element starts hidden and ends at rest, so the intro hands over to the scrubbed
/// timeline without a jump. The portrait slides in from the primary side, the copy block
/// rises, and the text children cascade.
pub fn build_hero_intro<S>(
    layout: LayoutVariant,
    surface: &S,
) -> ScrollpinResult<Timeline<ElementId>>
where
    S: PanelSurface + ?Sized,
{
    let secs = |v: f64| v / HERO_INTRO_SECS;
    let mut tl = Timeline::new();
    if surface.has_element(ElementId::Primary) {
        tl.from_to(
            &[ElementId::Primary],
            PropSet::new()
                .x_vw(layout.sign() * INTRO_PRIMARY_X)
                .scale(INTRO_PRIMARY_SCALE)
                .opacity(0.0),
            PropSet::new().x_vw(0.0).scale(1.0).opacity(1.0),
            TweenOpts::at(0.0, secs(INTRO_PRIMARY_SECS)).ease(Ease::OutCubic),
        )?;
    }
    if surface.has_element(ElementId::Secondary) {
        tl.from_to(
            &[ElementId::Secondary],
            PropSet::new().y_px(INTRO_SECONDARY_Y_PX).opacity(0.0),
            PropSet::new().y_px(0.0).opacity(1.0),
            TweenOpts::at(secs(INTRO_SECONDARY_AT_SECS), secs(INTRO_SECONDARY_SECS))
                .ease(Ease::OutCubic),
        )?;
    }
    let text: Vec<ElementId> = (0..surface.text_len())
        .map(ElementId::Text)
        .filter(|el| surface.has_element(*el))
        .collect();
    // Long text blocks compress the cascade to stay inside the intro.
    let room = (HERO_INTRO_SECS - INTRO_TEXT_AT_SECS - INTRO_TEXT_SECS).max(0.0);
    let stagger = if text.len() > 1 {
        INTRO_TEXT_STAGGER_SECS.min(room / (text.len() - 1) as f64)
    } else {
        0.0
    };
    tl.from_to(
        &text,
        PropSet::new().y_px(TEXT_ENTER_Y_PX).opacity(0.0),
        PropSet::new().y_px(0.0).opacity(1.0),
        TweenOpts::at(secs(INTRO_TEXT_AT_SECS), secs(INTRO_TEXT_SECS))
            .ease(Ease::OutCubic)
            .stagger(secs(stagger)),
    )?;
    Ok(tl)
}

#[cfg(test)]
#[path = "../../tests/unit/panel/motion.rs"]
mod tests;
