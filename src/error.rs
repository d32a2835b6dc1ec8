use crate::mapper::scalar::{CoercionError, ScalarKind};

/// Library-level structured errors for envtag.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
///
/// Messages name fields and keys but never the environment values themselves,
/// since those are frequently secrets.
#[derive(Debug, thiserror::Error)]
pub enum EnvtagError {
	#[error("Invalid target: expected a value of type {expected}")]
	InvalidTarget { expected: &'static str },

	#[error("Unsupported type for field {field}: {type_name}")]
	UnsupportedType {
		field: &'static str,
		type_name: &'static str,
	},

	#[error("Error setting field {field} from {key}: expected {expected}")]
	Coercion {
		field: &'static str,
		key: &'static str,
		expected: ScalarKind,
		#[source]
		source: CoercionError,
	},

	#[error("Command execution failed: {command}")]
	CommandFailed {
		command: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Command not found: {command}")]
	CommandNotFound { command: String },
}

/// Result type alias using EnvtagError.
pub type Result<T> = std::result::Result<T, EnvtagError>;
