/// Easing curve applied to tween progress.
///
/// Serde names are snake_case; the common web easing names are accepted as aliases
/// (`"none"`, `"power1.in"`, `"power2.out"`, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear interpolation, tied 1:1 to progress.
    #[default]
    #[serde(alias = "none")]
    Linear,
    /// Quadratic ease-in.
    #[serde(alias = "power1.in")]
    InQuad,
    /// Quadratic ease-out.
    #[serde(alias = "power1.out")]
    OutQuad,
    /// Quadratic, slow at both ends.
    #[serde(alias = "power1.inOut")]
    InOutQuad,
    /// Cubic ease-in.
    #[serde(alias = "power2.in")]
    InCubic,
    /// Cubic ease-out.
    #[serde(alias = "power2.out")]
    OutCubic,
    /// Cubic ease-in/out.
    #[serde(alias = "power2.inOut")]
    InOutCubic,
}

impl Ease {
    /// Map `t` through the curve; input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
