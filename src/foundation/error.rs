/// Convenience result type used across scrollpin.
pub type ScrollpinResult<T> = Result<T, ScrollpinError>;

/// Every failure the choreography engine can report.
///
/// Only caller mistakes surface as errors. Runtime degradations (detached targets, empty
/// snap tables, calls after teardown) are silent no-ops instead.
#[derive(thiserror::Error, Debug)]
pub enum ScrollpinError {
    /// Invalid user-provided page or range data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while scheduling tweens on a timeline.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while solving the page layout for a viewport.
    #[error("layout error: {0}")]
    Layout(String),

    /// Operation not allowed in the current lifecycle state.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    /// Page JSON could not be parsed or written.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, wrapped.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollpinError {
    /// Build a [`ScrollpinError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollpinError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ScrollpinError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`ScrollpinError::Lifecycle`] value.
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    /// Build a [`ScrollpinError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ScrollpinError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
