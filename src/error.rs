use thiserror::Error;

/// Errors raised by the sketchpad widget.
///
/// None of these are fatal: the caller drops the requested operation and the
/// surface keeps its prior contents.
#[derive(Debug, Error)]
pub enum SketchError {
    /// A control value was out of range (e.g. a non-positive stroke width)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An uploaded file could not be decoded as an image
    #[error("Failed to decode image: {0}")]
    ImageDecode(#[source] image::ImageError),

    /// Undo was requested with an empty history
    #[error("Nothing to undo")]
    NothingToUndo,

    /// The user cancelled the save prompt or left the name empty
    #[error("Save aborted")]
    SaveAborted,

    /// The surface could not be encoded for export
    #[error("Failed to encode image: {0}")]
    ImageEncode(#[source] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SketchError {
    /// Whether the failure should be shown to the user rather than silently ignored
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::ImageDecode(_) | Self::ImageEncode(_) | Self::Io(_))
    }
}

/// Result type for sketchpad operations
pub type SketchResult<T> = Result<T, SketchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_decode_and_io_failures_are_user_visible() {
        assert!(!SketchError::NothingToUndo.is_user_visible());
        assert!(!SketchError::SaveAborted.is_user_visible());
        assert!(!SketchError::InvalidArgument("width".into()).is_user_visible());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(SketchError::from(io).is_user_visible());
    }
}
