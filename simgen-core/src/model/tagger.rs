use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use crate::error::GenerateError;

/// The grammatical-category labels attached to one token.
///
/// A `BTreeSet` gives the value semantics the pool map needs: equality
/// and hashing are independent of insertion order, so the set can be
/// used directly as a map key.
pub type TagSet = BTreeSet<String>;

/// One surface token together with its tag set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedToken {
	text: String,
	tags: TagSet,
}

impl TaggedToken {
	pub fn new(text: impl Into<String>, tags: TagSet) -> Self {
		Self { text: text.into(), tags }
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn tags(&self) -> &TagSet {
		&self.tags
	}
}

/// The part-of-speech tagging collaborator.
///
/// Implementations analyze a line of text and return its tokens, each
/// carrying a (possibly empty) set of grammatical tags. A failing
/// tagger is a fatal, non-retried error for the calling generation.
pub trait PosTagger {
	fn analyze(&self, text: &str) -> Result<Vec<TaggedToken>, GenerateError>;
}

/// A lexicon-backed tagger.
///
/// Looks every token up (case-folded) in an in-memory lexicon; unknown
/// words get an empty tag set. The lexicon file format is one entry per
/// line: `word<TAB>tag,tag,...`. Blank lines and `#` comments are
/// skipped.
#[derive(Clone, Debug, Default)]
pub struct LexiconTagger {
	lexicon: HashMap<String, TagSet>,
}

impl LexiconTagger {
	pub fn new() -> Self {
		Self { lexicon: HashMap::new() }
	}

	/// Loads a lexicon file.
	///
	/// # Errors
	/// - `GenerateError::Io` if the file cannot be read.
	/// - `GenerateError::Tagging` if a line has no tab separator.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GenerateError> {
		let contents = fs::read_to_string(path)?;
		Self::parse(&contents)
	}

	/// Parses lexicon content (see [`LexiconTagger`] for the format).
	pub fn parse(contents: &str) -> Result<Self, GenerateError> {
		let mut tagger = Self::new();
		for line in contents.lines() {
			let line = line.trim();
			if line.is_empty() || line.starts_with('#') {
				continue;
			}
			let (word, tags) = line
				.split_once('\t')
				.ok_or_else(|| GenerateError::Tagging(format!("lexicon line without tab: {line}")))?;
			let tags: Vec<&str> = tags.split(',').map(str::trim).filter(|t| !t.is_empty()).collect();
			tagger.insert(word, &tags);
		}
		Ok(tagger)
	}

	/// Adds or extends one lexicon entry.
	pub fn insert(&mut self, word: &str, tags: &[&str]) {
		let entry = self.lexicon.entry(word.to_lowercase()).or_default();
		for tag in tags {
			entry.insert((*tag).to_owned());
		}
	}
}

impl PosTagger for LexiconTagger {
	fn analyze(&self, text: &str) -> Result<Vec<TaggedToken>, GenerateError> {
		let mut tokens = Vec::new();
		for word in text.split(|c: char| !c.is_alphanumeric()) {
			if word.is_empty() {
				continue;
			}
			let tags = self.lexicon.get(&word.to_lowercase()).cloned().unwrap_or_default();
			tokens.push(TaggedToken::new(word, tags));
		}
		Ok(tokens)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tags(labels: &[&str]) -> TagSet {
		labels.iter().map(|t| (*t).to_owned()).collect()
	}

	#[test]
	fn analyze_splits_on_punctuation_and_folds_case() {
		let mut tagger = LexiconTagger::new();
		tagger.insert("kat", &["ZNW:ekv"]);
		let tokens = tagger.analyze("De Kat, slaapt.").unwrap();
		let texts: Vec<&str> = tokens.iter().map(TaggedToken::text).collect();
		assert_eq!(texts, vec!["De", "Kat", "slaapt"]);
		assert_eq!(tokens[1].tags(), &tags(&["ZNW:ekv"]));
		// Unknown words carry an empty tag set
		assert!(tokens[0].tags().is_empty());
		assert!(tokens[2].tags().is_empty());
	}

	#[test]
	fn parse_reads_tab_separated_entries() {
		let tagger = LexiconTagger::parse(
			"# comment\nkat\tZNW:ekv\nslaapt\tWKW:3ev, WKW:tgw\n\n",
		)
		.unwrap();
		let tokens = tagger.analyze("kat slaapt").unwrap();
		assert_eq!(tokens[0].tags(), &tags(&["ZNW:ekv"]));
		assert_eq!(tokens[1].tags(), &tags(&["WKW:3ev", "WKW:tgw"]));
	}

	#[test]
	fn parse_rejects_lines_without_separator() {
		assert!(matches!(
			LexiconTagger::parse("kat ZNW:ekv"),
			Err(GenerateError::Tagging(_))
		));
	}

	#[test]
	fn tag_sets_compare_order_independently() {
		assert_eq!(tags(&["a", "b"]), tags(&["b", "a"]));
	}
}
