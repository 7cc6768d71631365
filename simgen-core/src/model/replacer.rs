/// A single token-to-word substitution.
///
/// A `Replacer` is an immutable pair of (original token, replacement
/// word) plus matching flags. The generation pipeline builds replacers
/// with `match_case = false` (case-insensitive matching, capitalization
/// transferred from the matched occurrence) and `whole_word = true`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replacer {
	original: String,
	replacement: String,
	match_case: bool,
	whole_word: bool,
}

impl Replacer {
	pub fn new(
		original: impl Into<String>,
		replacement: impl Into<String>,
		match_case: bool,
		whole_word: bool,
	) -> Self {
		Self {
			original: original.into(),
			replacement: replacement.into(),
			match_case,
			whole_word,
		}
	}

	pub fn original(&self) -> &str {
		&self.original
	}

	pub fn replacement(&self) -> &str {
		&self.replacement
	}

	/// Whether this replacer targets the given token.
	fn matches(&self, token: &str) -> bool {
		if self.match_case {
			token == self.original
		} else {
			token.to_lowercase() == self.original.to_lowercase()
		}
	}

	/// The replacement text for a matched occurrence.
	///
	/// With `match_case = false` the occurrence's capitalization is
	/// transferred onto the replacement (leading capital, or all-caps).
	fn substitute(&self, occurrence: &str) -> String {
		if self.match_case {
			return self.replacement.clone();
		}
		transfer_case(occurrence, &self.replacement)
	}
}

/// Copies the capitalization pattern of `source` onto `replacement`.
fn transfer_case(source: &str, replacement: &str) -> String {
	let alphabetic: Vec<char> = source.chars().filter(|c| c.is_alphabetic()).collect();
	if alphabetic.len() > 1 && alphabetic.iter().all(|c| c.is_uppercase()) {
		return replacement.to_uppercase();
	}
	if source.chars().next().is_some_and(char::is_uppercase) {
		let mut chars = replacement.chars();
		return match chars.next() {
			Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
			None => String::new(),
		};
	}
	replacement.to_owned()
}

/// A batch of replacers applied together to a source string.
///
/// Application is a pure function over the input text. The text is
/// scanned as alternating word and separator runs; a word run is
/// substituted by the first whole-word replacer that matches it, so no
/// two replacers ever touch overlapping spans. Replacers without the
/// whole-word flag fall back to plain substring replacement and are
/// applied before the run scan.
#[derive(Clone, Debug, Default)]
pub struct Replacers {
	replacers: Vec<Replacer>,
}

impl Replacers {
	pub fn new(replacers: Vec<Replacer>) -> Self {
		Self { replacers }
	}

	pub fn len(&self) -> usize {
		self.replacers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.replacers.is_empty()
	}

	/// Applies the batch to `text` and returns the substituted string.
	///
	/// An empty batch returns the input unchanged.
	pub fn apply(&self, text: &str) -> String {
		let mut current = text.to_owned();
		for replacer in self.replacers.iter().filter(|r| !r.whole_word) {
			current = current.replace(&replacer.original, &replacer.replacement);
		}
		if self.replacers.iter().all(|r| !r.whole_word) {
			return current;
		}

		let mut result = String::with_capacity(current.len());
		for (is_word, run) in split_runs(&current) {
			if is_word {
				match self.replacers.iter().find(|r| r.whole_word && r.matches(run)) {
					Some(replacer) => result.push_str(&replacer.substitute(run)),
					None => result.push_str(run),
				}
			} else {
				result.push_str(run);
			}
		}
		result
	}
}

/// Splits a string into alternating word and separator runs.
///
/// A word run is a maximal sequence of alphanumeric characters. UTF-8
/// safe: boundaries are computed from character classes, not bytes.
fn split_runs(text: &str) -> Vec<(bool, &str)> {
	let mut runs = Vec::new();
	let mut start = 0;
	let mut current_kind: Option<bool> = None;

	for (offset, c) in text.char_indices() {
		let kind = c.is_alphanumeric();
		match current_kind {
			Some(k) if k == kind => {}
			Some(k) => {
				runs.push((k, &text[start..offset]));
				start = offset;
				current_kind = Some(kind);
			}
			None => current_kind = Some(kind),
		}
	}
	if let Some(kind) = current_kind {
		runs.push((kind, &text[start..]));
	}
	runs
}
