//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: field error (bad dimensions, bad params)
//! - 11: I/O error (seed file, snapshot)
//! - 12: input error (bad background color, bad JSON params)
//! - 13: serialization error

use particle_field_core::FieldError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A field-level error (bad dimensions, invalid params).
    Field(FieldError),
    /// An I/O error (file read or write, snapshot encoding).
    Io(String),
    /// A user input error (bad color, bad JSON params).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Field(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Field(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<FieldError> for CliError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io(msg) => CliError::Io(msg),
            FieldError::InvalidColor(msg) => CliError::Input(msg),
            other => CliError::Field(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_variant_has_its_own_exit_code() {
        let codes = [
            CliError::Field(FieldError::InvalidDimensions).exit_code(),
            CliError::Io("png write failed".into()).exit_code(),
            CliError::Input("--background: bad".into()).exit_code(),
            CliError::Serialization("json".into()).exit_code(),
        ];
        assert_eq!(codes, [10, 11, 12, 13]);
    }

    #[test]
    fn seed_file_errors_exit_as_io() {
        let err = CliError::from(FieldError::Io("seed.json: not found".into()));
        assert_eq!(err.exit_code(), 11);
        assert_eq!(err.to_string(), "seed.json: not found");
    }

    #[test]
    fn bad_accent_color_exits_as_input() {
        let err = CliError::from(FieldError::InvalidColor("orange".into()));
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn out_of_range_param_exits_as_field() {
        let err = CliError::from(FieldError::InvalidParam("count must be at most 100000".into()));
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("count"));
    }

    #[test]
    fn params_type_mismatch_exits_as_field() {
        let err = CliError::from(FieldError::ParamTypeMismatch {
            name: "params".into(),
            expected: "object".into(),
            got: "array".into(),
        });
        assert!(matches!(err, CliError::Field(_)));
    }

    #[test]
    fn json_output_failure_exits_as_serialization() {
        let err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        assert_eq!(CliError::from(err).exit_code(), 13);
    }
}
