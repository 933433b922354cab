use smallvec::SmallVec;

use crate::animation::ease::Ease;

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// One tween of a single property, positioned inside a parent timeline.
///
/// `start` and `duration` are fractions of the parent timeline's total length.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment<T> {
    /// Offset in the parent timeline.
    pub start: f64,
    /// Length in the parent timeline; zero makes the segment a step.
    pub duration: f64,
    /// Value at `start`.
    pub from: T,
    /// Value at `start + duration`.
    pub to: T,
    /// Easing applied across the segment.
    pub ease: Ease,
}

impl<T> Segment<T>
where
    T: Lerp + Clone,
{
    /// Parent-timeline offset where the segment completes.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Value at parent progress `progress`; holds `from` before and `to` after the segment.
    pub fn sample(&self, progress: f64) -> T {
        if self.duration <= 0.0 {
            return if progress < self.start {
                self.from.clone()
            } else {
                self.to.clone()
            };
        }
        let t = self.ease.apply((progress - self.start) / self.duration);
        if t <= 0.0 {
            self.from.clone()
        } else if t >= 1.0 {
            self.to.clone()
        } else {
            T::lerp(&self.from, &self.to, t)
        }
    }
}

/// Ordered segments animating one property of one target.
///
/// Sampling is a pure function of progress, so scrubbing backwards reproduces the exact
/// forward state.
#[derive(Clone, Debug)]
pub struct Track<T> {
    segments: SmallVec<[Segment<T>; 2]>, // sorted by start
}

impl<T> Default for Track<T> {
    fn default() -> Self {
        Self {
            segments: SmallVec::new(),
        }
    }
}

impl<T> Track<T>
where
    T: Lerp + Clone,
{
    /// Create an empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a segment, keeping segments sorted by `start`.
    ///
    /// A segment sharing its `start` with existing ones is placed after them, so the most
    /// recently added one governs from that offset on.
    pub fn push(&mut self, segment: Segment<T>) {
        let idx = self.segments.partition_point(|s| s.start <= segment.start);
        self.segments.insert(idx, segment);
    }

    /// Segments in `start` order.
    pub fn segments(&self) -> &[Segment<T>] {
        &self.segments
    }

    /// Return `true` when no segments are scheduled.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sample the track at parent progress `progress`.
    ///
    /// Before the first segment starts, the first segment's `from` is shown. Otherwise the
    /// latest segment that has started governs the value. Returns `None` for an empty track.
    pub fn sample(&self, progress: f64) -> Option<T> {
        let first = self.segments.first()?;
        let idx = self.segments.partition_point(|s| s.start <= progress);
        if idx == 0 {
            return Some(first.from.clone());
        }
        Some(self.segments[idx - 1].sample(progress))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
