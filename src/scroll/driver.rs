//! Scroll position to scrub progress, plus settle-time snapping.
//!
//! The driver never owns a clock or a timer. Platform events come in as
//! [`ScrollDriver::on_user_scroll`] (user input, cancels any snap) and
//! [`ScrollDriver::on_frame`] (animation tick). A scroll position returned by `on_frame`
//! must be applied by the platform without being echoed back as user input.

use crate::{
    animation::ease::Ease,
    foundation::core::ScrubProgress,
    foundation::error::{ScrollpinError, ScrollpinResult},
    panel::controller::PanelController,
    panel::surface::PanelSurface,
    snap::coordinator::SnapCoordinator,
};

/// Scroll-driver tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Quiet time after the last user scroll before snapping is evaluated.
    pub settle_delay_secs: f64,
    /// Shortest snap animation.
    pub snap_duration_min_secs: f64,
    /// Longest snap animation.
    pub snap_duration_max_secs: f64,
    /// Easing of the snap animation.
    pub snap_ease: Ease,
    /// Snap targets closer than this are ignored.
    pub snap_epsilon_px: f64,
    /// Catch-up time of scrub smoothing; `0` scrubs synchronously.
    pub scrub_lag_secs: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            settle_delay_secs: 0.1,
            snap_duration_min_secs: 0.15,
            snap_duration_max_secs: 0.35,
            snap_ease: Ease::OutCubic,
            snap_epsilon_px: 0.5,
            scrub_lag_secs: 0.0,
        }
    }
}

impl ScrollConfig {
    /// Validate tuning bounds.
    pub fn validate(&self) -> ScrollpinResult<()> {
        for (name, v) in [
            ("settle_delay_secs", self.settle_delay_secs),
            ("snap_duration_min_secs", self.snap_duration_min_secs),
            ("snap_duration_max_secs", self.snap_duration_max_secs),
            ("snap_epsilon_px", self.snap_epsilon_px),
            ("scrub_lag_secs", self.scrub_lag_secs),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ScrollpinError::validation(format!(
                    "scroll {name} must be finite and >= 0"
                )));
            }
        }
        if self.snap_duration_min_secs <= 0.0
            || self.snap_duration_min_secs > self.snap_duration_max_secs
        {
            return Err(ScrollpinError::validation(
                "scroll snap durations must satisfy 0 < min <= max",
            ));
        }
        Ok(())
    }

    fn snap_duration(&self, distance_px: f64, viewport_height: f64) -> f64 {
        let span = self.snap_duration_max_secs - self.snap_duration_min_secs;
        let k = if viewport_height > 0.0 {
            (distance_px / viewport_height).clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.snap_duration_min_secs + span * k
    }
}

/// In-flight snap animation over wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SnapTween {
    /// Scroll position when the snap started.
    pub from: f64,
    /// Scroll position being snapped to.
    pub to: f64,
    /// Start time in seconds.
    pub started_at: f64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Easing across the duration.
    pub ease: Ease,
}

impl SnapTween {
    /// Scroll position at `now`.
    pub fn sample(&self, now: f64) -> f64 {
        let t = (now - self.started_at) / self.duration_secs;
        if t >= 1.0 {
            return self.to;
        }
        let e = self.ease.apply(t);
        self.from + (self.to - self.from) * e
    }

    /// Return `true` once `now` is past the end.
    pub fn is_done(&self, now: f64) -> bool {
        now - self.started_at >= self.duration_secs
    }
}

/// Feeds scroll positions into panel scrubs and runs settle-time snapping.
#[derive(Clone, Debug)]
pub struct ScrollDriver {
    config: ScrollConfig,
    viewport_height: f64,
    max_scroll: f64,
    scroll_y: f64,
    last_input_at: Option<f64>,
    last_frame_at: Option<f64>,
    snap: Option<SnapTween>,
    active: Option<usize>,
    targets: Vec<ScrubProgress>,
    smoothed: Vec<f64>,
    torn_down: bool,
}

impl ScrollDriver {
    /// Create a driver for a viewport of `viewport_height` and `max_scroll` extent.
    pub fn new(config: ScrollConfig, viewport_height: f64, max_scroll: f64) -> Self {
        Self {
            config,
            viewport_height,
            max_scroll: max_scroll.max(0.0),
            scroll_y: 0.0,
            last_input_at: None,
            last_frame_at: None,
            snap: None,
            active: None,
            targets: Vec::new(),
            smoothed: Vec::new(),
            torn_down: false,
        }
    }

    /// Update the scroll extent after a resize. Cancels any snap in flight.
    pub fn set_extent(&mut self, viewport_height: f64, max_scroll: f64) {
        self.viewport_height = viewport_height;
        self.max_scroll = max_scroll.max(0.0);
        self.cancel_snap();
    }

    /// Re-apply the current scroll position (after a relayout or on mount).
    pub fn sync<S: PanelSurface>(&mut self, panels: &mut [PanelController<S>]) {
        if self.torn_down {
            return;
        }
        self.targets.clear();
        self.track(self.scroll_y, panels);
    }

    /// Handle a user-originated scroll position. Kills any snap in flight.
    pub fn on_user_scroll<S: PanelSurface>(
        &mut self,
        scroll_y: f64,
        now: f64,
        panels: &mut [PanelController<S>],
    ) {
        if self.torn_down || !scroll_y.is_finite() {
            return;
        }
        self.cancel_snap();
        self.last_input_at = Some(now);
        self.track(scroll_y, panels);
    }

    /// Advance time-based behavior to `now`.
    ///
    /// Returns a scroll position the platform must apply while a snap is animating.
    pub fn on_frame<S: PanelSurface>(
        &mut self,
        now: f64,
        panels: &mut [PanelController<S>],
        coordinator: &SnapCoordinator,
    ) -> Option<f64> {
        if self.torn_down {
            return None;
        }
        let dt = self.last_frame_at.map_or(0.0, |t| (now - t).max(0.0));
        self.last_frame_at = Some(now);

        let mut write = None;
        if let Some(tween) = self.snap {
            let y = tween.sample(now);
            self.track(y, panels);
            if tween.is_done(now) {
                self.snap = None;
                tracing::debug!(to = tween.to, "snap settled");
            }
            write = Some(y);
        } else if let Some(at) = self.last_input_at
            && now - at >= self.config.settle_delay_secs
        {
            self.last_input_at = None;
            self.snap = self.plan_snap(now, coordinator);
        }

        self.smooth(dt, panels);
        write
    }

    fn plan_snap(&self, now: f64, coordinator: &SnapCoordinator) -> Option<SnapTween> {
        if self.max_scroll <= 0.0 {
            return None;
        }
        let to = coordinator
            .resolve_px(self.scroll_y)
            .clamp(0.0, self.max_scroll);
        let distance = (to - self.scroll_y).abs();
        if distance <= self.config.snap_epsilon_px {
            return None;
        }
        let duration_secs = self.config.snap_duration(distance, self.viewport_height);
        tracing::debug!(from = self.scroll_y, to, duration_secs, "snap started");
        Some(SnapTween {
            from: self.scroll_y,
            to,
            started_at: now,
            duration_secs,
            ease: self.config.snap_ease,
        })
    }

    fn track<S: PanelSurface>(&mut self, scroll_y: f64, panels: &mut [PanelController<S>]) {
        let y = scroll_y.clamp(0.0, self.max_scroll);
        self.scroll_y = y;

        let active = panels
            .iter()
            .rposition(|p| p.pin_range().is_some_and(|r| r.contains(y)));
        if active != self.active {
            if let Some(prev) = self.active
                && let Some(panel) = panels.get_mut(prev)
            {
                panel.deactivate();
            }
            if let Some(next) = active
                && let Some(panel) = panels.get_mut(next)
            {
                panel.activate();
            }
            self.active = active;
        }

        let fresh = self.targets.len() != panels.len();
        if fresh {
            self.targets = vec![ScrubProgress::START; panels.len()];
            self.smoothed = vec![0.0; panels.len()];
        }
        let synchronous = self.config.scrub_lag_secs <= 0.0;
        for (i, panel) in panels.iter_mut().enumerate() {
            let Some(range) = panel.pin_range() else {
                continue;
            };
            let target = range.progress_at(y);
            self.targets[i] = target;
            if fresh {
                self.smoothed[i] = target.value();
            }
            if synchronous || fresh {
                panel.on_scrub(target);
            }
        }
    }

    fn smooth<S: PanelSurface>(&mut self, dt: f64, panels: &mut [PanelController<S>]) {
        let lag = self.config.scrub_lag_secs;
        if lag <= 0.0 || dt <= 0.0 || self.targets.len() != panels.len() {
            return;
        }
        let k = 1.0 - (-dt / lag).exp();
        for (i, panel) in panels.iter_mut().enumerate() {
            let target = self.targets[i].value();
            let mut next = self.smoothed[i] + (target - self.smoothed[i]) * k;
            if (target - next).abs() < 1e-4 {
                next = target;
            }
            self.smoothed[i] = next;
            panel.on_scrub(ScrubProgress::new(next));
        }
    }

    /// Kill the snap in flight, if any. Returns `true` when one was cancelled.
    pub fn cancel_snap(&mut self) -> bool {
        let cancelled = self.snap.take().is_some();
        if cancelled {
            tracing::debug!("snap cancelled");
        }
        cancelled
    }

    /// Stop reacting to events and drop every pending action. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.cancel_snap();
        self.torn_down = true;
        self.last_input_at = None;
        self.active = None;
        self.targets.clear();
        self.smoothed.clear();
    }

    /// Last tracked scroll position.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Scroll extent.
    pub fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    /// Index of the pinned panel, if scroll is inside a pin range.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Snap animation in flight.
    pub fn snap_in_flight(&self) -> Option<&SnapTween> {
        self.snap.as_ref()
    }

    /// Return `true` while waiting for the settle delay to elapse.
    pub fn settle_pending(&self) -> bool {
        self.last_input_at.is_some()
    }

    /// Return `true` once torn down.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/driver.rs"]
mod tests;
