use std::collections::HashMap;

use crate::error::GenerateError;

/// Word-frequency index over a statistics corpus.
///
/// Tallies case-folded word occurrences across every ingested line and
/// derives frequency quantile thresholds from the resulting distribution.
///
/// ## Responsibilities
/// - Tokenize lines (case-folded, split on non-alphanumeric characters)
/// - Count occurrences per distinct word
/// - Answer quantile queries over the distribution of distinct-word counts
///
/// ## Invariants
/// - Built once per corpus load; callers treat it as immutable afterwards
/// - Lookups are case-folded, so `count("Kat") == count("kat")`
#[derive(Clone, Debug, Default)]
pub struct WordCounter {
	counts: HashMap<String, usize>,
	lines: usize,
}

impl WordCounter {
	/// Creates an empty counter.
	pub fn new() -> Self {
		Self { counts: HashMap::new(), lines: 0 }
	}

	/// Builds a counter over all given lines.
	pub fn from_lines(lines: &[String]) -> Self {
		let mut counter = Self::new();
		for line in lines {
			counter.add_line(line);
		}
		counter
	}

	/// Tallies one line into the index.
	pub fn add_line(&mut self, line: &str) {
		self.lines += 1;
		let folded = line.to_lowercase();
		for word in folded.split(|c: char| !c.is_alphanumeric()) {
			if !word.is_empty() {
				*self.counts.entry(word.to_owned()).or_insert(0) += 1;
			}
		}
	}

	/// Number of ingested lines.
	pub fn line_count(&self) -> usize {
		self.lines
	}

	/// Number of distinct words.
	pub fn unique_words(&self) -> usize {
		self.counts.len()
	}

	/// Occurrence count of `word` (case-folded); 0 if never seen.
	pub fn count(&self, word: &str) -> usize {
		self.counts.get(&word.to_lowercase()).copied().unwrap_or(0)
	}

	/// Returns the count value separating the bottom `quantile`-fraction
	/// of distinct words from the rest.
	///
	/// Distinct words are sorted by count ascending; the value at position
	/// `ceil(quantile * N)` (clamped to the last index) is returned.
	/// Downstream this acts as a ceiling on how common a word may be
	/// before it is left untouched.
	///
	/// # Errors
	/// Returns `GenerateError::InvalidQuantile` if `quantile` is outside
	/// `[0.0, 1.0]`.
	pub fn quantile_count(&self, quantile: f64) -> Result<usize, GenerateError> {
		if !(0.0..=1.0).contains(&quantile) {
			return Err(GenerateError::InvalidQuantile(quantile));
		}
		if self.counts.is_empty() {
			return Ok(0);
		}

		let mut sorted: Vec<usize> = self.counts.values().copied().collect();
		sorted.sort_unstable();

		let position = (quantile * sorted.len() as f64).ceil() as usize;
		Ok(sorted[position.min(sorted.len() - 1)])
	}
}
