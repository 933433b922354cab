use crate::{
    foundation::core::{NormalizedRange, PinRange},
    foundation::error::{ScrollpinError, ScrollpinResult},
};

/// Snap tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Widening applied to both ends of every normalized range before classification,
    /// as a fraction of the total scroll distance.
    pub tolerance: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self { tolerance: 0.02 }
    }
}

impl SnapConfig {
    /// Validate tuning bounds.
    pub fn validate(&self) -> ScrollpinResult<()> {
        if !self.tolerance.is_finite() || !(0.0..=0.5).contains(&self.tolerance) {
            return Err(ScrollpinError::validation(
                "snap tolerance must be finite and in [0, 0.5]",
            ));
        }
        Ok(())
    }
}

/// Classification of a scroll fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Region {
    /// Not covered by any (widened) pinned range.
    Flowing,
    /// Inside the widened range at `index` of the table (first match in table order).
    Pinned {
        /// Index into [`SnapCoordinator::table`].
        index: usize,
    },
}

/// Page-wide table of normalized pinned ranges and the snap rule over it.
///
/// The table is rebuilt wholesale from an explicit list of ranges; it is never patched.
#[derive(Clone, Debug, Default)]
pub struct SnapCoordinator {
    config: SnapConfig,
    table: Vec<NormalizedRange>,
    total: f64,
}

impl SnapCoordinator {
    /// Create a coordinator with an empty table.
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            table: Vec::new(),
            total: 0.0,
        }
    }

    /// Replace the table from `ranges` normalized against `total` scrollable distance.
    ///
    /// A zero or non-finite `total` yields an empty table. Ranges with a non-finite bound
    /// are skipped. The rest are stably sorted by normalized start, so equal starts keep
    /// their input order.
    #[tracing::instrument(skip(self, ranges), fields(ranges = ranges.len()))]
    pub fn rebuild(&mut self, total: f64, ranges: &[PinRange]) {
        self.table.clear();
        self.total = 0.0;
        if !total.is_finite() || total <= 0.0 {
            tracing::debug!("no scrollable distance; snapping disabled");
            return;
        }
        self.total = total;
        for r in ranges {
            if r.is_finite() {
                self.table.push(NormalizedRange::from_pin(*r, total));
            } else {
                tracing::warn!(start = r.start, end = r.end, "non-finite pin range skipped");
            }
        }
        self.table.sort_by(|a, b| a.start.total_cmp(&b.start));
        tracing::debug!(entries = self.table.len(), "snap table rebuilt");
    }

    /// Classify `fraction` as flowing or pinned.
    pub fn classify(&self, fraction: f64) -> Region {
        let tol = self.config.tolerance;
        self.table
            .iter()
            .position(|r| r.contains_with_tolerance(fraction, tol))
            .map_or(Region::Flowing, |index| Region::Pinned { index })
    }

    /// Fraction to snap to from `fraction`.
    ///
    /// Flowing fractions come back unchanged. A pinned fraction resolves to the nearest
    /// center in the whole table, not only among the ranges that contain it, so a short
    /// neighbor can win over the range the fraction sits in. Ties go to the earlier entry.
    pub fn resolve(&self, fraction: f64) -> f64 {
        if !fraction.is_finite() {
            return fraction;
        }
        if self.classify(fraction) == Region::Flowing {
            return fraction;
        }
        let mut best = self.table[0].center;
        for r in &self.table[1..] {
            if (r.center - fraction).abs() < (best - fraction).abs() {
                best = r.center;
            }
        }
        best
    }

    /// Resolve a raw scroll position; returns a raw scroll position.
    pub fn resolve_px(&self, scroll_y: f64) -> f64 {
        if self.total <= 0.0 {
            return scroll_y;
        }
        self.resolve(scroll_y / self.total) * self.total
    }

    /// Normalized ranges sorted by start.
    pub fn table(&self) -> &[NormalizedRange] {
        &self.table
    }

    /// Total scrollable distance the table was built against.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Active tuning.
    pub fn config(&self) -> SnapConfig {
        self.config
    }

    /// Drop the table; later resolves pass fractions through.
    pub fn clear(&mut self) {
        self.table.clear();
        self.total = 0.0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snap/coordinator.rs"]
mod tests;
