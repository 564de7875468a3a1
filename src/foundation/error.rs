/// Convenience result type used across Eyeframe.
pub type EyeframeResult<T> = Result<T, EyeframeError>;

/// Top-level error taxonomy used by the render core.
#[derive(thiserror::Error, Debug)]
pub enum EyeframeError {
    /// Invalid design, material, or configuration data. Raised before any canvas work.
    #[error("validation error: {0}")]
    Validation(String),

    /// A material texture could not be read or decoded.
    ///
    /// The render orchestrator downgrades this to a warning and keeps the flat fill.
    #[error("texture unavailable: {0}")]
    TextureUnavailable(String),

    /// The canvas could not be rasterized or serialized to PNG.
    #[error("encode error: {0}")]
    Encode(String),

    /// The encoded preview could not be published to its output location.
    #[error("persist error: {0}")]
    Persist(String),

    /// The caller cancelled the render or its deadline passed.
    #[error("render cancelled: {0}")]
    Cancelled(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EyeframeError {
    /// Build a [`EyeframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`EyeframeError::TextureUnavailable`] value.
    pub fn texture(msg: impl Into<String>) -> Self {
        Self::TextureUnavailable(msg.into())
    }

    /// Build a [`EyeframeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`EyeframeError::Persist`] value.
    pub fn persist(msg: impl Into<String>) -> Self {
        Self::Persist(msg.into())
    }

    /// Build a [`EyeframeError::Cancelled`] value.
    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    /// `true` for errors the orchestrator recovers from instead of failing the render.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::TextureUnavailable(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
