//! Access to the environment store.
//!
//! All reads and writes of environment variables go through [`EnvStore`], so
//! the process environment can be swapped for [`MemoryEnv`] in tests and in
//! library callers that want loaded values without touching the process
//! environment.

use std::collections::BTreeMap;

/// A mutable string-to-string store of environment variables.
pub trait EnvStore {
	/// Get the value for `key`, or `None` if it is unset.
	fn get(&self, key: &str) -> Option<String>;

	/// Set `key` to `value`, replacing any previous value.
	fn set(&mut self, key: &str, value: &str);
}

/// The host process environment.
///
/// Writes go through `std::env::set_var`, which is not synchronized. Load
/// files before spawning threads that read the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

/// Whether the OS environment can hold this pair at all.
fn is_storable(key: &str, value: &str) -> bool {
	!key.is_empty() && !key.contains(['=', '\0']) && !value.contains('\0')
}

impl EnvStore for ProcessEnv {
	fn get(&self, key: &str) -> Option<String> {
		if !is_storable(key, "") {
			return None;
		}
		std::env::var(key).ok()
	}

	fn set(&mut self, key: &str, value: &str) {
		if !is_storable(key, value) {
			tracing::debug!(key, "skipping variable the process environment cannot hold");
			return;
		}

		// SAFETY: collection is expected to run during startup, before any other
		// thread reads or writes the environment.
		unsafe {
			std::env::set_var(key, value);
		}
	}
}

/// An in-memory environment, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnv {
	vars: BTreeMap<String, String>,
}

impl MemoryEnv {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.vars.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vars.is_empty()
	}

	/// Iterate over all pairs in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

impl EnvStore for MemoryEnv {
	fn get(&self, key: &str) -> Option<String> {
		self.vars.get(key).cloned()
	}

	fn set(&mut self, key: &str, value: &str) {
		self.vars.insert(key.to_string(), value.to_string());
	}
}

impl<K, V> FromIterator<(K, V)> for MemoryEnv
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		MemoryEnv {
			vars: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
