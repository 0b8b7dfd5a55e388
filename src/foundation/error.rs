/// Convenience result type used across picedit.
pub type PicEditResult<T> = Result<T, PicEditError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant except [`PicEditError::Operation`] and [`PicEditError::Other`] names one kind of
/// bad input. `Operation` wraps the failure of a single drawing operation with its position in the
/// operation list.
#[derive(thiserror::Error, Debug)]
pub enum PicEditError {
    /// Canvas width or height is missing, zero, or negative.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// A color string matched none of the supported forms.
    #[error("invalid color format: {0}")]
    InvalidColorFormat(String),

    /// A text operation is malformed (empty text, bad size, bad position, missing color).
    #[error("invalid text config: {0}")]
    InvalidTextConfig(String),

    /// An image operation is malformed (bad position or opacity).
    #[error("invalid image config: {0}")]
    InvalidImageConfig(String),

    /// Image bytes could not be decoded.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// Image scale factor is zero, negative, not finite, or collapses the asset to zero pixels.
    #[error("invalid scale: {0}")]
    InvalidScale(String),

    /// Encoder quality outside `1..=100`.
    #[error("invalid quality: {0}")]
    InvalidQuality(String),

    /// Output format name is not one of `png`, `jpeg`, `webp`.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Engine configuration is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A drawing operation failed; the whole render is aborted.
    #[error("operation {index} ({kind}) failed: {source}")]
    Operation {
        /// Zero-based index of the failing operation.
        index: usize,
        /// Operation kind (`text` or `image`).
        kind: &'static str,
        /// Underlying failure.
        source: Box<PicEditError>,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PicEditError {
    /// Build a [`PicEditError::InvalidDimensions`] value.
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    /// Build a [`PicEditError::InvalidColorFormat`] value.
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColorFormat(msg.into())
    }

    /// Build a [`PicEditError::InvalidTextConfig`] value.
    pub fn invalid_text(msg: impl Into<String>) -> Self {
        Self::InvalidTextConfig(msg.into())
    }

    /// Build a [`PicEditError::InvalidImageConfig`] value.
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImageConfig(msg.into())
    }

    /// Build a [`PicEditError::ImageDecode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`PicEditError::InvalidScale`] value.
    pub fn invalid_scale(msg: impl Into<String>) -> Self {
        Self::InvalidScale(msg.into())
    }

    /// Build a [`PicEditError::InvalidQuality`] value.
    pub fn invalid_quality(msg: impl Into<String>) -> Self {
        Self::InvalidQuality(msg.into())
    }

    /// Build a [`PicEditError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`PicEditError::InvalidConfig`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Attach the index and kind of the operation that produced this error.
    pub fn at_operation(self, index: usize, kind: &'static str) -> Self {
        Self::Operation {
            index,
            kind,
            source: Box::new(self),
        }
    }

    /// Walk through [`PicEditError::Operation`] wrappers to the underlying error.
    pub fn root(&self) -> &PicEditError {
        match self {
            Self::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// Index of the failing operation, if this error came from one.
    pub fn operation_index(&self) -> Option<usize> {
        match self {
            Self::Operation { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
