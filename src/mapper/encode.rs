use crate::error::{EnvtagError, Result};
use crate::mapper::record::EnvRecord;
use crate::mapper::scalar;
use std::any::{Any, type_name};

/// Format one `KEY=VALUE` line, double-quoting values that contain whitespace.
///
/// Embedded quotes and `#` are written as-is.
pub fn format_line(key: &str, value: &str) -> String {
	if value.contains(char::is_whitespace) {
		format!("{key}=\"{value}\"\n")
	} else {
		format!("{key}={value}\n")
	}
}

/// Serialize the tagged fields of `record` as env file lines.
pub fn encode<R: EnvRecord>(record: &R) -> Result<Vec<u8>> {
	let mut out = String::new();

	for field in R::fields() {
		let Some(key) = field.key() else {
			continue;
		};

		let value =
			scalar::render(field.value(record)).ok_or(EnvtagError::UnsupportedType {
				field: field.name(),
				type_name: field.type_name(),
			})?;

		tracing::trace!(field = field.name(), key, "encoded field");
		out.push_str(&format_line(key, &value));
	}

	Ok(out.into_bytes())
}

/// Encode a type-erased record, which must be an `R` or a `Box<R>`.
pub fn encode_any<R: EnvRecord>(record: &dyn Any) -> Result<Vec<u8>> {
	if let Some(record) = record.downcast_ref::<R>() {
		return encode(record);
	}

	if let Some(boxed) = record.downcast_ref::<Box<R>>() {
		return encode(boxed.as_ref());
	}

	Err(EnvtagError::InvalidTarget {
		expected: type_name::<R>(),
	})
}
