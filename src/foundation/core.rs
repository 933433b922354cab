use crate::foundation::error::{ScrollpinError, ScrollpinResult};

pub use kurbo::{Affine, Vec2};

/// Progress at which every panel's entrance band ends and its settle band begins.
pub const ENTRANCE_END: f64 = 0.30;

/// Progress at which every panel's settle band ends and its exit band begins.
pub const EXIT_START: f64 = 0.70;

/// Viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ViewportSize {
    /// Create a validated viewport with finite, positive dimensions.
    pub fn new(width: f64, height: f64) -> ScrollpinResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ScrollpinError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// A length that may be relative to the viewport.
///
/// Relative units are fractions, so `Vh(1.3)` is 130% of the viewport height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    /// Absolute CSS pixels.
    Px(f64),
    /// Fraction of the viewport height.
    Vh(f64),
    /// Fraction of the viewport width.
    Vw(f64),
}

impl Length {
    /// Resolve to pixels for the given viewport.
    pub fn resolve(self, viewport: ViewportSize) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Vh(v) => v * viewport.height,
            Self::Vw(v) => v * viewport.width,
        }
    }

    /// Raw numeric component, regardless of unit.
    pub fn raw(self) -> f64 {
        match self {
            Self::Px(v) | Self::Vh(v) | Self::Vw(v) => v,
        }
    }

    pub(crate) fn validate(self, field: &str) -> ScrollpinResult<()> {
        let v = self.raw();
        if !v.is_finite() || v < 0.0 {
            return Err(ScrollpinError::validation(format!(
                "{field} must be finite and >= 0"
            )));
        }
        Ok(())
    }
}

/// Raw scroll-distance range `[start, end]` a panel stays pinned for.
///
/// `start == end` is legal: a zero-height pin that only acts as a snap marker.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinRange {
    /// Scroll position where pinning begins.
    pub start: f64,
    /// Scroll position where pinning ends (inclusive).
    pub end: f64,
}

impl PinRange {
    /// Create a validated range with `0 <= start <= end`.
    pub fn new(start: f64, end: f64) -> ScrollpinResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ScrollpinError::validation("PinRange bounds must be finite"));
        }
        if start < 0.0 {
            return Err(ScrollpinError::validation("PinRange start must be >= 0"));
        }
        if end < start {
            return Err(ScrollpinError::validation("PinRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Scroll distance covered by the pin.
    pub fn len(self) -> f64 {
        self.end - self.start
    }

    /// Return `true` for zero-height pins.
    pub fn is_degenerate(self) -> bool {
        self.end == self.start
    }

    /// Return `true` when both bounds are finite.
    ///
    /// Fields are public and deserializable, so a range can bypass [`PinRange::new`].
    pub fn is_finite(self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }

    /// Return `true` when `scroll_y` is inside `[start, end]`.
    pub fn contains(self, scroll_y: f64) -> bool {
        self.start <= scroll_y && scroll_y <= self.end
    }

    /// Scrub progress for a raw scroll position, clamped into `[0, 1]`.
    ///
    /// Degenerate ranges step from `0` to `1` at `start`.
    pub fn progress_at(self, scroll_y: f64) -> ScrubProgress {
        let len = self.len();
        if len <= 0.0 {
            return if scroll_y < self.start {
                ScrubProgress::START
            } else {
                ScrubProgress::END
            };
        }
        ScrubProgress::new((scroll_y - self.start) / len)
    }
}

/// A [`PinRange`] expressed as fractions of the total scrollable distance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedRange {
    /// Normalized start in `[0, 1]`.
    pub start: f64,
    /// Normalized end in `[0, 1]`.
    pub end: f64,
    /// Midpoint, `start + (end - start) * 0.5`.
    pub center: f64,
}

impl NormalizedRange {
    /// Normalize `range` against a positive `total` scroll distance, clamped into `[0, 1]`.
    ///
    /// Non-finite bounds collapse onto the nearest valid value instead of panicking.
    pub fn from_pin(range: PinRange, total: f64) -> Self {
        let start = (range.start / total).max(0.0).min(1.0);
        let end = (range.end / total).max(start).min(1.0);
        Self {
            start,
            end,
            center: start + (end - start) * 0.5,
        }
    }

    /// Return `true` when `fraction` is inside the range widened by `tolerance` on both ends.
    pub fn contains_with_tolerance(&self, fraction: f64, tolerance: f64) -> bool {
        fraction >= self.start - tolerance && fraction <= self.end + tolerance
    }
}

/// How far scroll has advanced through one panel's pin range, in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize)]
pub struct ScrubProgress(f64);

impl ScrubProgress {
    /// Progress at the start of a pin range.
    pub const START: Self = Self(0.0);
    /// Progress at the end of a pin range.
    pub const END: Self = Self(1.0);

    /// Clamp `value` into `[0, 1]`; NaN maps to `0`.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Raw progress value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Named phase this progress falls in.
    pub fn phase(self) -> Phase {
        if self.0 < ENTRANCE_END {
            Phase::Entrance
        } else if self.0 < EXIT_START {
            Phase::Settle
        } else {
            Phase::Exit
        }
    }
}

/// Named bands of a panel's scrub progress, shared by every panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Phase {
    /// `[0.0, 0.30)`: elements animate in.
    Entrance,
    /// `[0.30, 0.70)`: no motion.
    Settle,
    /// `[0.70, 1.0]`: elements animate out.
    Exit,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
