//=========================================================================
// Core Errors
//=========================================================================
//
// Error taxonomy for the interaction layer.
//
// None of these are fatal to the frame loop: callers log them and carry
// on with a safe default (no-op, generic fallback, default bindings).
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== CoreError ===========================================================

/// Errors surfaced by scene, trigger, world and configuration operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A scene was registered under an id that is already taken.
    #[error("scene id `{0}` is already registered")]
    DuplicateSceneId(String),

    /// A transition referenced a scene id that was never registered.
    #[error("scene id `{0}` is not registered")]
    UnknownScene(String),

    /// The scene is already the primary scene or already on the overlay stack.
    #[error("scene `{0}` is already on the scene stack")]
    OverlayAlreadyStacked(String),

    /// A container trigger can be bound to at most one visual proxy.
    #[error("trigger `{0}` already has a visual proxy")]
    VisualAlreadyBound(String),

    /// A trigger id is already taken in the loaded region.
    #[error("trigger id `{0}` is already loaded")]
    DuplicateTriggerId(String),

    /// No trigger with this id exists in the loaded region.
    #[error("trigger `{0}` is not loaded")]
    UnknownTrigger(String),

    /// Tile map text could not be parsed.
    #[error("tile map line {line}: {reason}")]
    MapFormat { line: usize, reason: String },

    /// Reading or writing a configuration file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration or authoring document is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shorthand result type for fallible core operations.
pub type CoreResult<T> = Result<T, CoreError>;

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_error_is_error_trait() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CoreError>();
    }

    #[test]
    fn display_names_the_offending_id() {
        let err = CoreError::DuplicateSceneId("lobby".into());
        assert_eq!(err.to_string(), "scene id `lobby` is already registered");

        let err = CoreError::MapFormat { line: 3, reason: "bad tile `x`".into() };
        assert_eq!(err.to_string(), "tile map line 3: bad tile `x`");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
