use crate::foundation::core::{Affine, Vec2, ViewportSize};

/// Animatable visual property of a target.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Prop {
    /// Horizontal offset as a fraction of viewport width.
    XVw,
    /// Vertical offset in pixels.
    YPx,
    /// Rotation around the vertical axis in degrees.
    RotateYDeg,
    /// Uniform scale.
    Scale,
    /// Opacity in `[0, 1]`.
    Opacity,
}

impl Prop {
    /// Every property, in a stable order.
    pub const ALL: [Prop; 5] = [
        Prop::XVw,
        Prop::YPx,
        Prop::RotateYDeg,
        Prop::Scale,
        Prop::Opacity,
    ];
}

/// Partial property set used as tween endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropSet {
    /// Horizontal offset (fraction of viewport width).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_vw: Option<f64>,
    /// Vertical offset in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_px: Option<f64>,
    /// Y-axis rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate_y_deg: Option<f64>,
    /// Uniform scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl PropSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizontal offset.
    pub fn x_vw(mut self, v: f64) -> Self {
        self.x_vw = Some(v);
        self
    }

    /// Set the vertical offset.
    pub fn y_px(mut self, v: f64) -> Self {
        self.y_px = Some(v);
        self
    }

    /// Set the Y-axis rotation.
    pub fn rotate_y_deg(mut self, v: f64) -> Self {
        self.rotate_y_deg = Some(v);
        self
    }

    /// Set the scale.
    pub fn scale(mut self, v: f64) -> Self {
        self.scale = Some(v);
        self
    }

    /// Set the opacity.
    pub fn opacity(mut self, v: f64) -> Self {
        self.opacity = Some(v);
        self
    }

    /// Value for `prop`, if set.
    pub fn get(&self, prop: Prop) -> Option<f64> {
        match prop {
            Prop::XVw => self.x_vw,
            Prop::YPx => self.y_px,
            Prop::RotateYDeg => self.rotate_y_deg,
            Prop::Scale => self.scale,
            Prop::Opacity => self.opacity,
        }
    }

    /// Properties that are set, in [`Prop::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Prop, f64)> + '_ {
        Prop::ALL
            .into_iter()
            .filter_map(|p| self.get(p).map(|v| (p, v)))
    }

    /// Return `true` when no property is set.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Full visual state written to a target.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    /// Horizontal offset (fraction of viewport width).
    pub x_vw: f64,
    /// Vertical offset in pixels.
    pub y_px: f64,
    /// Y-axis rotation in degrees.
    pub rotate_y_deg: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for VisualState {
    fn default() -> Self {
        Self::REST
    }
}

impl VisualState {
    /// Settled state: no offset, no rotation, unit scale, fully opaque.
    pub const REST: Self = Self {
        x_vw: 0.0,
        y_px: 0.0,
        rotate_y_deg: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    /// Value of `prop`.
    pub fn get(&self, prop: Prop) -> f64 {
        match prop {
            Prop::XVw => self.x_vw,
            Prop::YPx => self.y_px,
            Prop::RotateYDeg => self.rotate_y_deg,
            Prop::Scale => self.scale,
            Prop::Opacity => self.opacity,
        }
    }

    /// Overwrite `prop`. Opacity is clamped into `[0, 1]`.
    pub fn set(&mut self, prop: Prop, value: f64) {
        match prop {
            Prop::XVw => self.x_vw = value,
            Prop::YPx => self.y_px = value,
            Prop::RotateYDeg => self.rotate_y_deg = value,
            Prop::Scale => self.scale = value,
            Prop::Opacity => self.opacity = value.clamp(0.0, 1.0),
        }
    }

    /// Pixel translation for the given viewport.
    pub fn translate_px(&self, viewport: ViewportSize) -> Vec2 {
        Vec2::new(self.x_vw * viewport.width, self.y_px)
    }

    /// Flattened 2D transform: translation, scale, and Y-rotation as horizontal
    /// foreshortening.
    pub fn to_affine(&self, viewport: ViewportSize) -> Affine {
        let foreshorten = self.rotate_y_deg.to_radians().cos();
        Affine::translate(self.translate_px(viewport))
            * Affine::scale_non_uniform(self.scale * foreshorten, self.scale)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/props.rs"]
mod tests;
