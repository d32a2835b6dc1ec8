use std::any::Any;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

/// The scalar categories a tagged field may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
	String,
	Bool,
	Integer,
	Float,
}

impl ScalarKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ScalarKind::String => "string",
			ScalarKind::Bool => "boolean",
			ScalarKind::Integer => "integer",
			ScalarKind::Float => "float",
		}
	}
}

impl fmt::Display for ScalarKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Why a stored string could not be converted to a field's type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
	#[error("invalid boolean literal")]
	InvalidBool,

	#[error(transparent)]
	Integer(#[from] ParseIntError),

	#[error(transparent)]
	Float(#[from] ParseFloatError),
}

/// Failure to assign into a field slot.
#[derive(Debug)]
pub(crate) enum AssignError {
	Unsupported,
	Invalid {
		expected: ScalarKind,
		source: CoercionError,
	},
}

/// Parse a boolean literal: `1`, `0`, `t`, `f`, `true`, `false`, any case.
pub fn parse_bool(raw: &str) -> Result<bool, CoercionError> {
	match raw {
		"1" => Ok(true),
		"0" => Ok(false),
		_ if raw.eq_ignore_ascii_case("t") || raw.eq_ignore_ascii_case("true") => Ok(true),
		_ if raw.eq_ignore_ascii_case("f") || raw.eq_ignore_ascii_case("false") => Ok(false),
		_ => Err(CoercionError::InvalidBool),
	}
}

macro_rules! assign_parsed {
	($slot:expr, $raw:expr, $kind:expr; $($ty:ty),+) => {
		$(
			if let Some(value) = $slot.downcast_mut::<$ty>() {
				*value = $raw.parse::<$ty>().map_err(|err| AssignError::Invalid {
					expected: $kind,
					source: CoercionError::from(err),
				})?;
				return Ok($kind);
			}
		)+
	};
}

macro_rules! render_as {
	($value:expr; $($ty:ty),+) => {
		$(
			if let Some(value) = $value.downcast_ref::<$ty>() {
				return Some(value.to_string());
			}
		)+
	};
}

/// Coerce `raw` into the value behind `slot`.
///
/// Returns the kind that was assigned. Leaves the slot untouched on error.
pub(crate) fn assign(slot: &mut dyn Any, raw: &str) -> Result<ScalarKind, AssignError> {
	if let Some(value) = slot.downcast_mut::<String>() {
		*value = raw.to_string();
		return Ok(ScalarKind::String);
	}

	if let Some(value) = slot.downcast_mut::<bool>() {
		*value = parse_bool(raw).map_err(|source| AssignError::Invalid {
			expected: ScalarKind::Bool,
			source,
		})?;
		return Ok(ScalarKind::Bool);
	}

	assign_parsed!(slot, raw, ScalarKind::Integer;
		i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
	assign_parsed!(slot, raw, ScalarKind::Float; f32, f64);

	Err(AssignError::Unsupported)
}

/// Format a supported scalar in its natural text form.
pub(crate) fn render(value: &dyn Any) -> Option<String> {
	render_as!(value; String, bool,
		i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
		f32, f64);

	None
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_bool_literals() {
		for raw in ["1", "t", "T", "true", "TRUE", "True", "tRuE"] {
			assert_eq!(parse_bool(raw), Ok(true), "{raw}");
		}
		for raw in ["0", "f", "F", "false", "FALSE", "False"] {
			assert_eq!(parse_bool(raw), Ok(false), "{raw}");
		}
		for raw in ["yes", "no", "on", "2", "", " true"] {
			assert_eq!(parse_bool(raw), Err(CoercionError::InvalidBool), "{raw}");
		}
	}

	#[test]
	fn test_assign_string_verbatim() {
		let mut value = String::from("old");
		let kind = assign(&mut value, "  spaced # kept ").unwrap();

		assert_eq!(kind, ScalarKind::String);
		assert_eq!(value, "  spaced # kept ");
	}

	#[test]
	fn test_assign_integers() {
		let mut port: u16 = 0;
		assert_eq!(assign(&mut port, "8080").unwrap(), ScalarKind::Integer);
		assert_eq!(port, 8080);

		let mut offset: i64 = 0;
		assign(&mut offset, "-42").unwrap();
		assert_eq!(offset, -42);
	}

	#[test]
	fn test_assign_integer_out_of_range_leaves_value() {
		let mut small: i8 = 7;
		let err = assign(&mut small, "300").unwrap_err();

		assert!(matches!(
			err,
			AssignError::Invalid {
				expected: ScalarKind::Integer,
				source: CoercionError::Integer(_),
			}
		));
		assert_eq!(small, 7);
	}

	#[test]
	fn test_assign_float() {
		let mut rate: f64 = 0.0;
		assert_eq!(assign(&mut rate, "1.5").unwrap(), ScalarKind::Float);
		assert_eq!(rate, 1.5);

		let err = assign(&mut rate, "fast").unwrap_err();
		assert!(matches!(
			err,
			AssignError::Invalid {
				expected: ScalarKind::Float,
				..
			}
		));
	}

	#[test]
	fn test_assign_unsupported() {
		let mut list: Vec<String> = Vec::new();
		assert!(matches!(
			assign(&mut list, "a,b"),
			Err(AssignError::Unsupported)
		));
	}

	#[test]
	fn test_render() {
		assert_eq!(render(&String::from("text")), Some("text".to_string()));
		assert_eq!(render(&false), Some("false".to_string()));
		assert_eq!(render(&9000u32), Some("9000".to_string()));
		assert_eq!(render(&50.5f64), Some("50.5".to_string()));
		assert_eq!(render(&vec![1u8]), None);
	}
}
