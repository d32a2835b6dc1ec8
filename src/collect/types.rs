use crate::parse::Entry;
use std::path::PathBuf;

/// The entries read from one env file.
#[derive(Debug, Clone)]
pub struct LoadedFile {
	/// The resolved path the entries were read from.
	pub path: PathBuf,

	/// Entries in line order, duplicates included.
	pub entries: Vec<Entry>,
}

/// An entry with the file that supplied its effective value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedEntry {
	pub entry: Entry,

	/// The last file to set this key.
	pub source: PathBuf,
}
