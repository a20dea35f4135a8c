/// Convenience result type used across partycam.
pub type PartycamResult<T> = Result<T, PartycamError>;

/// Top-level error taxonomy used by the compositing engine and its drivers.
#[derive(thiserror::Error, Debug)]
pub enum PartycamError {
    /// A rectangle does not lie fully inside the buffer it addresses.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// A resize or allocation was asked for a zero-sized dimension.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// An operation that needs an alpha channel got a buffer without one.
    #[error("no alpha channel: {0}")]
    NoAlphaChannel(String),

    /// Foreground, mask and background sizes disagree.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Buffers with incompatible channel layouts were mixed in one call.
    #[error("channel mismatch: {0}")]
    ChannelMismatch(String),

    /// Invalid user-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Overlay or backdrop asset could not be loaded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PartycamError {
    /// Build a [`PartycamError::OutOfBounds`] value.
    pub fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }

    /// Build a [`PartycamError::InvalidDimensions`] value.
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    /// Build a [`PartycamError::NoAlphaChannel`] value.
    pub fn no_alpha(msg: impl Into<String>) -> Self {
        Self::NoAlphaChannel(msg.into())
    }

    /// Build a [`PartycamError::DimensionMismatch`] value.
    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Build a [`PartycamError::ChannelMismatch`] value.
    pub fn channel_mismatch(msg: impl Into<String>) -> Self {
        Self::ChannelMismatch(msg.into())
    }

    /// Build a [`PartycamError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PartycamError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// True for errors that signal a broken caller invariant rather than bad input data.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::OutOfBounds(_)
                | Self::InvalidDimensions(_)
                | Self::DimensionMismatch(_)
                | Self::ChannelMismatch(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
