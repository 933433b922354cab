use crate::foundation::error::{ScrollpinError, ScrollpinResult};

/// Playback direction of a [`Playhead`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Direction {
    /// Progress increases toward `1`.
    Forward,
    /// Progress decreases toward `0`.
    Reverse,
}

/// Playback state of a [`Playhead`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum PlaybackState {
    /// Not started.
    Idle,
    /// Advancing on every tick.
    Playing,
    /// Reached the end of the current direction.
    Finished,
}

/// Wall-clock cursor over a normalized timeline.
///
/// Scrubbed timelines are driven by scroll; a playhead drives the same kind of timeline by
/// elapsed seconds instead. Reversing mid-flight continues from the current progress.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct Playhead {
    duration_secs: f64,
    progress: f64,
    direction: Direction,
    state: PlaybackState,
}

impl Playhead {
    /// Create an idle playhead at progress `0`.
    pub fn new(duration_secs: f64) -> ScrollpinResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ScrollpinError::animation(
                "playhead duration must be finite and > 0",
            ));
        }
        Ok(Self {
            duration_secs,
            progress: 0.0,
            direction: Direction::Forward,
            state: PlaybackState::Idle,
        })
    }

    /// Play toward `1` from the current progress.
    pub fn play(&mut self) {
        self.direction = Direction::Forward;
        self.state = if self.progress < 1.0 {
            PlaybackState::Playing
        } else {
            PlaybackState::Finished
        };
    }

    /// Play toward `0` from the current progress.
    pub fn reverse(&mut self) {
        self.direction = Direction::Reverse;
        self.state = if self.progress > 0.0 {
            PlaybackState::Playing
        } else {
            PlaybackState::Finished
        };
    }

    /// Advance by `dt_secs` of wall-clock time and return the new progress.
    pub fn advance(&mut self, dt_secs: f64) -> f64 {
        if self.state != PlaybackState::Playing || !dt_secs.is_finite() || dt_secs <= 0.0 {
            return self.progress;
        }
        let delta = dt_secs / self.duration_secs;
        match self.direction {
            Direction::Forward => {
                self.progress = (self.progress + delta).min(1.0);
                if self.progress >= 1.0 {
                    self.state = PlaybackState::Finished;
                }
            }
            Direction::Reverse => {
                self.progress = (self.progress - delta).max(0.0);
                if self.progress <= 0.0 {
                    self.state = PlaybackState::Finished;
                }
            }
        }
        self.progress
    }

    /// Jump back to idle at progress `0`.
    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.direction = Direction::Forward;
        self.state = PlaybackState::Idle;
    }

    /// Current progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Current direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Return `true` while advancing.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/playhead.rs"]
mod tests;
