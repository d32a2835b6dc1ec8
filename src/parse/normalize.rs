/// Normalize the raw right-hand side of a `KEY=VALUE` line.
///
/// 1. A value opening with `"` or `'` yields everything up to the next
///    matching quote, verbatim.
/// 2. An unterminated quote is dropped and the rest is treated as unquoted.
/// 3. Unquoted text is cut at the first `#`.
/// 4. The result is trimmed.
pub fn normalize(raw: &str) -> String {
	let mut value = raw;

	if let Some(quote) = value.chars().next().filter(|c| *c == '"' || *c == '\'') {
		let rest = &value[quote.len_utf8()..];
		if let Some((content, _)) = rest.split_once(quote) {
			return content.to_string();
		}

		value = rest;
	}

	let value = match value.split_once('#') {
		Some((before, _)) => before,
		None => value,
	};

	value.trim().to_string()
}
