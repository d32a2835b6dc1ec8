use crate::error::{EnvtagError, Result};
use crate::mapper::record::EnvRecord;
use crate::mapper::scalar::{self, AssignError};
use crate::store::{EnvStore, ProcessEnv};
use std::any::{Any, type_name};

/// Populate the tagged fields of `record` from the process environment.
pub fn decode<R: EnvRecord>(record: &mut R) -> Result<()> {
	decode_from(&ProcessEnv, record)
}

/// Populate the tagged fields of `record` from `store`.
///
/// Fields whose key is unset or empty keep their current value. Decoding
/// stops at the first field that fails to coerce; fields assigned before it
/// keep their new values.
pub fn decode_from<R, S>(store: &S, record: &mut R) -> Result<()>
where
	R: EnvRecord,
	S: EnvStore + ?Sized,
{
	for field in R::fields() {
		let Some(key) = field.key() else {
			continue;
		};

		let Some(raw) = store.get(key).filter(|value| !value.is_empty()) else {
			continue;
		};

		match scalar::assign(field.value_mut(record), &raw) {
			Ok(kind) => {
				tracing::trace!(field = field.name(), key, %kind, "decoded field");
			}
			Err(AssignError::Unsupported) => {
				return Err(EnvtagError::UnsupportedType {
					field: field.name(),
					type_name: field.type_name(),
				});
			}
			Err(AssignError::Invalid { expected, source }) => {
				return Err(EnvtagError::Coercion {
					field: field.name(),
					key,
					expected,
					source,
				});
			}
		}
	}

	Ok(())
}

/// Decode into a type-erased target, which must be an `R`.
pub fn decode_any<R: EnvRecord>(target: &mut dyn Any) -> Result<()> {
	let record = target
		.downcast_mut::<R>()
		.ok_or(EnvtagError::InvalidTarget {
			expected: type_name::<R>(),
		})?;

	decode(record)
}
