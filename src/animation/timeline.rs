//! Scrubbable multi-target timeline.
//!
//! A [`Timeline`] schedules property tweens for a set of keyed targets at fractional
//! positions of a normalized `[0, 1]` parent duration. It has no notion of time or scroll:
//! callers evaluate it at a progress value and receive the exact [`VisualState`] of every
//! target. Because evaluation is a pure function of progress, reversing direction never
//! drifts and never re-triggers anything.

use std::collections::BTreeMap;

use crate::{
    animation::anim::{Segment, Track},
    animation::ease::Ease,
    animation::props::{Prop, PropSet, VisualState},
    foundation::error::{ScrollpinError, ScrollpinResult},
};

const END_SLACK: f64 = 1e-9;

/// Placement of a tween inside its parent timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenOpts {
    /// Offset of the first target's tween, as a fraction of the parent.
    pub position: f64,
    /// Length of each target's tween, as a fraction of the parent.
    pub duration: f64,
    /// Easing applied across each target's tween.
    #[serde(default)]
    pub ease: Ease,
    /// Extra delay per successive target (cascade).
    #[serde(default)]
    pub stagger: f64,
}

impl TweenOpts {
    /// Linear, unstaggered tween at `position` lasting `duration`.
    pub fn at(position: f64, duration: f64) -> Self {
        Self {
            position,
            duration,
            ease: Ease::Linear,
            stagger: 0.0,
        }
    }

    /// Replace the easing.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Replace the per-target stagger.
    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    fn validate(&self, target_count: usize) -> ScrollpinResult<()> {
        for (name, v) in [
            ("position", self.position),
            ("duration", self.duration),
            ("stagger", self.stagger),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ScrollpinError::animation(format!(
                    "tween {name} must be finite and >= 0"
                )));
            }
        }
        let last_start = self.position + self.stagger * target_count.saturating_sub(1) as f64;
        if last_start + self.duration > 1.0 + END_SLACK {
            return Err(ScrollpinError::animation(
                "tween must end within the parent timeline ([0, 1])",
            ));
        }
        Ok(())
    }
}

/// Tweens for keyed targets over a normalized parent duration.
#[derive(Clone, Debug)]
pub struct Timeline<K> {
    tracks: BTreeMap<(K, Prop), Track<f64>>,
    targets: Vec<K>, // first-scheduled order
}

impl<K> Default for Timeline<K> {
    fn default() -> Self {
        Self {
            tracks: BTreeMap::new(),
            targets: Vec::new(),
        }
    }
}

impl<K> Timeline<K>
where
    K: Ord + Clone,
{
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tween `targets` from explicit `from` values to `to` values.
    ///
    /// Every property in `from` must also appear in `to`. Properties only present in `to`
    /// start from whatever the target holds at the tween's position. Before the tween
    /// starts, the `from` values are shown.
    pub fn from_to(
        &mut self,
        targets: &[K],
        from: PropSet,
        to: PropSet,
        opts: TweenOpts,
    ) -> ScrollpinResult<()> {
        if let Some((prop, _)) = from.iter().find(|(p, _)| to.get(*p).is_none()) {
            return Err(ScrollpinError::animation(format!(
                "from_to: {prop:?} has a start value but no end value"
            )));
        }
        self.schedule(targets, Some(from), to, opts)
    }

    /// Tween `targets` from their current values at `opts.position` to `to`.
    pub fn to(&mut self, targets: &[K], to: PropSet, opts: TweenOpts) -> ScrollpinResult<()> {
        self.schedule(targets, None, to, opts)
    }

    fn schedule(
        &mut self,
        targets: &[K],
        from: Option<PropSet>,
        to: PropSet,
        opts: TweenOpts,
    ) -> ScrollpinResult<()> {
        opts.validate(targets.len())?;
        if to.iter().any(|(_, v)| !v.is_finite())
            || from.is_some_and(|f| f.iter().any(|(_, v)| !v.is_finite()))
        {
            return Err(ScrollpinError::animation("tween values must be finite"));
        }

        for (i, target) in targets.iter().enumerate() {
            let start = opts.position + opts.stagger * i as f64;
            for (prop, end_value) in to.iter() {
                let start_value = match from.and_then(|f| f.get(prop)) {
                    Some(v) => v,
                    None => self.value_at(target, prop, start),
                };
                self.tracks
                    .entry((target.clone(), prop))
                    .or_default()
                    .push(Segment {
                        start,
                        duration: opts.duration,
                        from: start_value,
                        to: end_value,
                        ease: opts.ease,
                    });
            }
            if !self.targets.contains(target) {
                self.targets.push(target.clone());
            }
        }
        Ok(())
    }

    fn value_at(&self, target: &K, prop: Prop, progress: f64) -> f64 {
        self.tracks
            .get(&(target.clone(), prop))
            .and_then(|t| t.sample(progress))
            .unwrap_or_else(|| VisualState::REST.get(prop))
    }

    /// State of `target` at `progress` (clamped into `[0, 1]`).
    ///
    /// Properties without tweens keep their resting value.
    pub fn sample(&self, target: &K, progress: f64) -> VisualState {
        let p = clamp_progress(progress);
        let mut state = VisualState::REST;
        for prop in Prop::ALL {
            if let Some(v) = self
                .tracks
                .get(&(target.clone(), prop))
                .and_then(|t| t.sample(p))
            {
                state.set(prop, v);
            }
        }
        state
    }

    /// Evaluate every target at `progress` and hand the states to `write`.
    pub fn seek(&self, progress: f64, mut write: impl FnMut(&K, VisualState)) {
        for target in &self.targets {
            write(target, self.sample(target, progress));
        }
    }

    /// Targets in the order they were first scheduled.
    pub fn targets(&self) -> &[K] {
        &self.targets
    }

    /// Track animating `prop` on `target`, if any.
    pub fn track(&self, target: &K, prop: Prop) -> Option<&Track<f64>> {
        self.tracks.get(&(target.clone(), prop))
    }

    /// Return `true` when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Drop every scheduled tween.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.targets.clear();
    }
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
