const TRUNCATOR: char = '…';

pub(super) fn char_len(s: &str) -> usize {
	s.chars().count()
}

/// `…(n)`: marks `n` items cut from a list.
pub(super) fn ellipsis(n: usize) -> String {
	format!("{TRUNCATOR}({n})")
}

/// Single-quotes `s` after escaping, keeping at most `limit` characters of
/// the escaped body.
pub(super) fn quote(s: &str, limit: usize) -> String {
	format!("'{}'", truncate(&escape(s), limit))
}

fn truncate(s: &str, limit: usize) -> String {
	if char_len(s) <= limit {
		return s.to_string();
	}
	let mut out: String = s.chars().take(limit.saturating_sub(1)).collect();
	out.push(TRUNCATOR);
	out
}

fn escape(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'\'' => out.push_str("\\'"),
			'\u{8}' => out.push_str("\\b"),
			'\t' => out.push_str("\\t"),
			'\n' => out.push_str("\\n"),
			'\u{c}' => out.push_str("\\f"),
			'\r' => out.push_str("\\r"),
			c if c <= '\u{1f}' || ('\u{7f}'..='\u{9f}').contains(&c) => {
				out.push_str(&format!("\\u{:04x}", c as u32));
			}
			c => out.push(c),
		}
	}
	out
}

/// Whether a property name can be printed without quotes.
pub(super) fn is_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
