//! Error types for the particle field core.

use thiserror::Error;

/// Errors produced by field construction, configuration and snapshot operations.
///
/// A missing drawing surface is deliberately absent from this list: the
/// renderer treats it as an inactive state, not a failure.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Width or height was zero when creating a viewport or surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A parameter had an acceptable type but an unusable value.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Writing a snapshot or seed file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = FieldError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn param_type_mismatch_includes_all_fields() {
        let err = FieldError::ParamTypeMismatch {
            name: "count".into(),
            expected: "integer".into(),
            got: "string".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("count"), "missing param name in: {msg}");
        assert!(msg.contains("integer"), "missing expected type in: {msg}");
        assert!(msg.contains("string"), "missing got type in: {msg}");
    }

    #[test]
    fn invalid_param_includes_message() {
        let err = FieldError::InvalidParam("size_min > size_max".into());
        let msg = format!("{err}");
        assert!(msg.contains("size_min > size_max"), "missing message in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = FieldError::InvalidColor("bad hex".into());
        let msg = format!("{err}");
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn io_includes_message() {
        let err = FieldError::Io("disk full".into());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn field_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
    }

    #[test]
    fn field_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FieldError>();
    }
}
