use std::fmt;

/// Free-text search input.
///
/// Keeps the raw text as typed; every consumer works on [`SearchText::trimmed`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchText {
	raw: String,
}

impl SearchText {
	/// Wraps raw user input.
	pub fn new(raw: impl Into<String>) -> Self {
		Self { raw: raw.into() }
	}

	/// Input with surrounding whitespace removed.
	pub fn trimmed(&self) -> &str {
		self.raw.trim()
	}

	/// Returns true when there is nothing to search for.
	pub fn is_empty(&self) -> bool {
		self.trimmed().is_empty()
	}

	/// Number of whitespace-separated tokens.
	pub fn token_count(&self) -> usize {
		self.raw.split_whitespace().count()
	}

	/// Returns true when the input holds more than one token.
	pub fn is_multi_word(&self) -> bool {
		self.token_count() > 1
	}
}

impl fmt::Display for SearchText {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.trimmed())
	}
}

impl From<&str> for SearchText {
	fn from(raw: &str) -> Self {
		Self::new(raw)
	}
}

impl From<String> for SearchText {
	fn from(raw: String) -> Self {
		Self::new(raw)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("", true, 0)]
	#[case("   ", true, 0)]
	#[case("\t\n", true, 0)]
	#[case("scotch", false, 1)]
	#[case("  scotch ", false, 1)]
	#[case("single malt scotch", false, 3)]
	#[case("single   malt", false, 2)]
	fn trimming_and_tokens(#[case] raw: &str, #[case] empty: bool, #[case] tokens: usize) {
		let text = SearchText::new(raw);
		assert_eq!(text.is_empty(), empty);
		assert_eq!(text.token_count(), tokens);
	}

	#[test]
	fn display_uses_trimmed_form() {
		assert_eq!(SearchText::from("  islay peat ").to_string(), "islay peat");
	}
}
