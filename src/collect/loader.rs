use crate::collect::types::{LoadedFile, SourcedEntry};
use crate::parse::parse_str;
use crate::store::{EnvStore, ProcessEnv};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Files searched when no explicit list is given, lowest priority first.
pub const DEFAULT_FILENAMES: [&str; 2] = [".env", ".env.local"];

/// Ordered list of env files to load.
///
/// Files are applied in order, so a key set in a later file overrides the
/// same key from an earlier one. Missing or unreadable files are skipped.
#[derive(Debug, Clone)]
pub struct Loader {
	filenames: Vec<PathBuf>,
	base_dir: Option<PathBuf>,
}

impl Default for Loader {
	fn default() -> Self {
		Loader::with_filenames(DEFAULT_FILENAMES)
	}
}

impl Loader {
	/// A loader for [`DEFAULT_FILENAMES`], relative to the current directory.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_filenames<I, P>(filenames: I) -> Self
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		Loader {
			filenames: filenames.into_iter().map(Into::into).collect(),
			base_dir: None,
		}
	}

	/// Resolve relative filenames against `dir` instead of the current directory.
	pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.base_dir = Some(dir.into());
		self
	}

	pub fn filenames(&self) -> &[PathBuf] {
		&self.filenames
	}

	pub fn filenames_mut(&mut self) -> &mut Vec<PathBuf> {
		&mut self.filenames
	}

	fn resolve(&self, filename: &Path) -> PathBuf {
		match &self.base_dir {
			Some(dir) if filename.is_relative() => dir.join(filename),
			_ => filename.to_path_buf(),
		}
	}

	/// Read and parse every file that exists, in priority order.
	pub fn read_files(&self) -> Vec<LoadedFile> {
		self.filenames
			.iter()
			.filter_map(|filename| read_file(&self.resolve(filename)))
			.collect()
	}

	/// The effective entries after applying all files.
	///
	/// Keys keep the position of their first appearance; values and sources
	/// come from the last file that set them.
	pub fn merged(&self) -> Vec<SourcedEntry> {
		let mut merged: Vec<SourcedEntry> = Vec::new();
		let mut positions: HashMap<String, usize> = HashMap::new();

		for loaded in self.read_files() {
			for entry in loaded.entries {
				match positions.get(&entry.key) {
					Some(&index) => {
						merged[index].entry.value = entry.value;
						merged[index].source = loaded.path.clone();
					}
					None => {
						positions.insert(entry.key.clone(), merged.len());
						merged.push(SourcedEntry {
							entry,
							source: loaded.path.clone(),
						});
					}
				}
			}
		}

		merged
	}

	/// Write every entry into `store`, later files overriding earlier ones.
	pub fn collect_into<S: EnvStore + ?Sized>(&self, store: &mut S) {
		for loaded in self.read_files() {
			for entry in &loaded.entries {
				store.set(&entry.key, &entry.value);
			}
		}
	}

	/// Write every entry into the process environment.
	pub fn collect(&self) {
		self.collect_into(&mut ProcessEnv);
	}
}

/// Load `filenames` into the process environment, last file winning.
pub fn collect<P: AsRef<Path>>(filenames: &[P]) {
	Loader::with_filenames(filenames.iter().map(|p| p.as_ref().to_path_buf())).collect();
}

/// Read one file, or `None` if it is absent, unreadable or effectively empty.
fn read_file(path: &Path) -> Option<LoadedFile> {
	let bytes = match std::fs::read(path) {
		Ok(bytes) => bytes,
		Err(err) => {
			tracing::debug!(path = %path.display(), error = %err, "skipping env file");
			return None;
		}
	};

	if bytes.len() <= 1 {
		tracing::debug!(path = %path.display(), "skipping empty env file");
		return None;
	}

	// Invalid UTF-8 only damages the lines it appears on
	let content = String::from_utf8_lossy(&bytes);
	let entries = parse_str(&content);
	tracing::debug!(path = %path.display(), entries = entries.len(), "loaded env file");

	Some(LoadedFile {
		path: path.to_path_buf(),
		entries,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parse::Entry;
	use crate::store::MemoryEnv;
	use serial_test::serial;
	use std::fs;

	fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
		let path = dir.join(name);
		fs::write(&path, content).unwrap();
		path
	}

	#[test]
	fn test_default_filenames() {
		let loader = Loader::new();
		assert_eq!(
			loader.filenames(),
			&[PathBuf::from(".env"), PathBuf::from(".env.local")]
		);
	}

	#[test]
	fn test_collect_into_reads_all_forms() {
		let temp_dir = tempfile::tempdir().unwrap();
		let content = r#"
# Comment should be ignored
TEST_VAR_1=hello
export TEST_VAR_2=world

# Empty line above
TEST_VAR_3=123

TEST_QUOTED="quoted value"
TEST_SINGLE_QUOTED='single quoted value'
TEST_WITH_COMMENT="secret" # inline comment
"#;
		let path = write_file(temp_dir.path(), ".env", content);

		let mut store = MemoryEnv::new();
		Loader::with_filenames([path]).collect_into(&mut store);

		let expected = [
			("TEST_VAR_1", "hello"),
			("TEST_VAR_2", "world"),
			("TEST_VAR_3", "123"),
			("TEST_QUOTED", "quoted value"),
			("TEST_SINGLE_QUOTED", "single quoted value"),
			("TEST_WITH_COMMENT", "secret"),
		];
		for (key, value) in expected {
			assert_eq!(store.get(key).as_deref(), Some(value), "key {key}");
		}
		assert_eq!(store.len(), expected.len());
	}

	#[test]
	fn test_later_file_wins() {
		let temp_dir = tempfile::tempdir().unwrap();
		write_file(temp_dir.path(), ".env", "PORT=8080\nHOST=localhost\n");
		write_file(temp_dir.path(), ".env.local", "PORT=9090\n");

		let mut store = MemoryEnv::new();
		Loader::new()
			.base_dir(temp_dir.path())
			.collect_into(&mut store);

		assert_eq!(store.get("PORT").as_deref(), Some("9090"));
		assert_eq!(store.get("HOST").as_deref(), Some("localhost"));
	}

	#[test]
	fn test_missing_files_are_skipped() {
		let temp_dir = tempfile::tempdir().unwrap();
		let present = write_file(temp_dir.path(), "present.env", "FOO=bar\n");

		let loader = Loader::with_filenames([temp_dir.path().join("missing.env"), present]);
		let mut store = MemoryEnv::new();
		loader.collect_into(&mut store);

		assert_eq!(store.get("FOO").as_deref(), Some("bar"));
		assert_eq!(loader.read_files().len(), 1);
	}

	#[test]
	fn test_tiny_files_are_skipped() {
		let temp_dir = tempfile::tempdir().unwrap();
		let empty = write_file(temp_dir.path(), "empty.env", "");
		let single = write_file(temp_dir.path(), "single.env", "\n");

		let loader = Loader::with_filenames([empty, single]);
		assert!(loader.read_files().is_empty());
	}

	#[test]
	fn test_non_utf8_line_keeps_rest_of_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join(".env");
		fs::write(&path, b"FOO=bar\n# caf\xe9 note\nPORT=9000\n").unwrap();

		let mut store = MemoryEnv::new();
		Loader::with_filenames([path]).collect_into(&mut store);

		assert_eq!(store.get("FOO").as_deref(), Some("bar"));
		assert_eq!(store.get("PORT").as_deref(), Some("9000"));
		assert_eq!(store.len(), 2);
	}

	#[test]
	fn test_existing_values_are_overwritten() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = write_file(temp_dir.path(), ".env", "FOO=from-file\n");

		let mut store: MemoryEnv = [("FOO", "preset")].into_iter().collect();
		Loader::with_filenames([path]).collect_into(&mut store);

		assert_eq!(store.get("FOO").as_deref(), Some("from-file"));
	}

	#[test]
	fn test_filenames_mut_changes_search_list() {
		let temp_dir = tempfile::tempdir().unwrap();
		write_file(temp_dir.path(), "custom.env", "CUSTOM=1\n");

		let mut loader = Loader::new().base_dir(temp_dir.path());
		loader.filenames_mut().push(PathBuf::from("custom.env"));

		let mut store = MemoryEnv::new();
		loader.collect_into(&mut store);
		assert_eq!(store.get("CUSTOM").as_deref(), Some("1"));
	}

	#[test]
	fn test_merged_tracks_sources() {
		let temp_dir = tempfile::tempdir().unwrap();
		let base = write_file(temp_dir.path(), ".env", "PORT=8080\nHOST=localhost\n");
		let local = write_file(temp_dir.path(), ".env.local", "PORT=9090\nDEBUG=true\n");

		let merged = Loader::new().base_dir(temp_dir.path()).merged();

		assert_eq!(
			merged,
			vec![
				SourcedEntry {
					entry: Entry::new("PORT", "9090"),
					source: local.clone(),
				},
				SourcedEntry {
					entry: Entry::new("HOST", "localhost"),
					source: base,
				},
				SourcedEntry {
					entry: Entry::new("DEBUG", "true"),
					source: local,
				},
			]
		);
	}

	#[test]
	#[serial]
	fn test_collect_sets_process_env() {
		let temp_dir = tempfile::tempdir().unwrap();
		let first = write_file(
			temp_dir.path(),
			"a.env",
			"export TEST_ENVTAG_FOO=bar\nTEST_ENVTAG_PORT=1\n",
		);
		let second = write_file(temp_dir.path(), "b.env", "TEST_ENVTAG_PORT=2\n");

		collect(&[first, second]);

		assert_eq!(std::env::var("TEST_ENVTAG_FOO").unwrap(), "bar");
		assert_eq!(std::env::var("TEST_ENVTAG_PORT").unwrap(), "2");

		// SAFETY: serialized test
		unsafe {
			std::env::remove_var("TEST_ENVTAG_FOO");
			std::env::remove_var("TEST_ENVTAG_PORT");
		}
	}
}
