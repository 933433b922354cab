//! One-shot reveals for flowing sections.
//!
//! A reveal plays forward on wall-clock time once scroll passes its trigger line and
//! reverses when scroll goes back above the line. Unlike pinned panels it is not scrubbed.

use crate::{
    animation::ease::Ease,
    animation::playhead::Playhead,
    animation::props::PropSet,
    animation::timeline::{Timeline, TweenOpts},
    foundation::error::{ScrollpinError, ScrollpinResult},
    panel::surface::{ElementId, PanelSurface},
};

/// Motion of a reveal: items rise by `y_px` and fade in, staggered.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealMotion {
    /// Number of staggered items.
    pub items: usize,
    /// Length of each item's tween in seconds.
    pub duration_secs: f64,
    /// Delay between successive items in seconds.
    pub stagger_secs: f64,
    /// Starting vertical offset in pixels.
    pub y_px: f64,
    /// Easing of each item's tween.
    pub ease: Ease,
}

impl Default for RevealMotion {
    fn default() -> Self {
        Self {
            items: 1,
            duration_secs: 0.6,
            stagger_secs: 0.1,
            y_px: 18.0,
            ease: Ease::OutQuad,
        }
    }
}

impl RevealMotion {
    /// Validate timings.
    pub fn validate(&self) -> ScrollpinResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(ScrollpinError::validation(
                "reveal duration_secs must be finite and > 0",
            ));
        }
        if !self.stagger_secs.is_finite() || self.stagger_secs < 0.0 {
            return Err(ScrollpinError::validation(
                "reveal stagger_secs must be finite and >= 0",
            ));
        }
        if !self.y_px.is_finite() {
            return Err(ScrollpinError::validation("reveal y_px must be finite"));
        }
        Ok(())
    }

    /// Wall-clock length of the whole cascade for `count` items.
    pub fn total_secs(&self, count: usize) -> f64 {
        self.duration_secs + self.stagger_secs * count.saturating_sub(1) as f64
    }
}

/// Reveal bound to a trigger line and a surface.
#[derive(Debug)]
pub struct RevealTrigger<S> {
    id: String,
    threshold: f64,
    past: bool,
    playhead: Playhead,
    timeline: Timeline<ElementId>,
    surface: S,
    rendered: Option<f64>,
    live: bool,
}

impl<S> RevealTrigger<S>
where
    S: PanelSurface,
{
    /// Build a reveal firing once scroll reaches `threshold`.
    ///
    /// Items are the surface's text children (up to `motion.items`). They are rendered
    /// hidden immediately.
    pub fn new(
        id: impl Into<String>,
        threshold: f64,
        motion: RevealMotion,
        surface: S,
    ) -> ScrollpinResult<Self> {
        motion.validate()?;
        if !threshold.is_finite() {
            return Err(ScrollpinError::validation(
                "reveal threshold must be finite",
            ));
        }
        let items: Vec<ElementId> = if surface.is_attached() {
            (0..motion.items.min(surface.text_len()))
                .map(ElementId::Text)
                .filter(|el| surface.has_element(*el))
                .collect()
        } else {
            Vec::new()
        };

        let total = motion.total_secs(items.len());
        let mut timeline = Timeline::new();
        timeline.from_to(
            &items,
            PropSet::new().y_px(motion.y_px).opacity(0.0),
            PropSet::new().y_px(0.0).opacity(1.0),
            TweenOpts::at(0.0, motion.duration_secs / total)
                .ease(motion.ease)
                .stagger(motion.stagger_secs / total),
        )?;

        let mut trigger = Self {
            id: id.into(),
            threshold: threshold.max(0.0),
            past: false,
            playhead: Playhead::new(total)?,
            timeline,
            surface,
            rendered: None,
            live: true,
        };
        trigger.render();
        Ok(trigger)
    }

    /// Track the scroll position; crossing the line starts or reverses playback.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        if !self.live {
            return;
        }
        let past = scroll_y >= self.threshold;
        if past == self.past {
            return;
        }
        self.past = past;
        if past {
            self.playhead.play();
            tracing::trace!(reveal = %self.id, "play");
        } else {
            self.playhead.reverse();
            tracing::trace!(reveal = %self.id, "reverse");
        }
    }

    /// Advance playback by `dt_secs`. Returns `true` while still playing.
    pub fn advance(&mut self, dt_secs: f64) -> bool {
        if !self.live || !self.playhead.is_playing() {
            return false;
        }
        self.playhead.advance(dt_secs);
        self.render();
        self.playhead.is_playing()
    }

    fn render(&mut self) {
        let p = self.playhead.progress();
        if self.rendered == Some(p) {
            return;
        }
        self.timeline.seek(p, |el, st| self.surface.write(*el, &st));
        self.rendered = Some(p);
    }

    /// Move the trigger line after a relayout.
    pub fn set_threshold(&mut self, threshold: f64) {
        if threshold.is_finite() {
            self.threshold = threshold.max(0.0);
        }
    }

    /// Stop reacting to scroll and time. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.live {
            self.live = false;
            tracing::debug!(reveal = %self.id, "torn down");
        }
    }

    /// Section identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Scroll position at which the reveal plays.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Playback progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.playhead.progress()
    }

    /// Return `true` while advancing.
    pub fn is_playing(&self) -> bool {
        self.live && self.playhead.is_playing()
    }

    /// Return `true` until torn down.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Visual target.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/reveal.rs"]
mod tests;
