use crate::parse::normalize::normalize;

/// A parsed `KEY=VALUE` pair with its value already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	pub key: String,
	pub value: String,
}

impl Entry {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Entry {
			key: key.into(),
			value: value.into(),
		}
	}
}

/// Parse a single line.
///
/// Returns `None` for blank lines, comments, lines without `=` and lines
/// with an empty key. None of these are errors.
pub fn parse_line(line: &str) -> Option<Entry> {
	let mut line = line.trim();

	if let Some(rest) = line.strip_prefix("export")
		&& rest.starts_with(char::is_whitespace)
	{
		line = rest.trim();
	}

	if line.is_empty() || line.starts_with('#') {
		return None;
	}

	let (key, raw_value) = line.split_once('=')?;
	let key = key.trim();
	if key.is_empty() {
		return None;
	}

	Some(Entry::new(key, normalize(raw_value)))
}

/// Parse file content into entries, in line order.
///
/// Duplicate keys are kept; callers applying them in order get
/// last-write-wins semantics.
pub fn parse_str(content: &str) -> Vec<Entry> {
	content
		.split('\n')
		.enumerate()
		.filter_map(|(index, line)| {
			let entry = parse_line(line);
			if entry.is_none() && !line.trim().is_empty() {
				tracing::trace!(line = index + 1, "skipping comment or malformed line");
			}
			entry
		})
		.collect()
}
