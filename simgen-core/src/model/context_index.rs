use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;

use crate::error::GenerateError;
use crate::model::bag::Bag;
use crate::model::picker::ReplacementPicker;
use crate::model::replacer::Replacer;
use crate::model::tagger::{PosTagger, TagSet, TaggedToken};

/// Sentence/paragraph boundary pseudo-tags emitted by taggers; stripped
/// from every tag set before use.
const BOUNDARY_TAGS: [&str; 3] = ["SENT_START", "SENT_END", "PARA_END"];

/// Token admission rules for the context index.
///
/// Language-specific configuration: which functional words and tag
/// categories are never mined as replacement candidates, and how the
/// token-equals-its-own-pool check compares strings.
#[derive(Clone, Debug)]
pub struct TokenFilter {
	/// Case-folded functional words never used as candidates (articles,
	/// pronouns, auxiliary verbs, discourse particles).
	pub token_blacklist: HashSet<String>,
	/// A token carrying any of these tags is dropped.
	pub tag_blacklist: HashSet<String>,
	/// Whether personal-name tokens may be replaced.
	pub allow_names: bool,
	/// Tag prefix identifying personal-name categories.
	pub name_tag_prefix: String,
	/// Whether the singleton self-only-pool check compares
	/// case-insensitively. The exclusion view inside `create_replacer`
	/// always excludes the token's exact text, independent of this flag.
	pub case_insensitive_self_check: bool,
}

impl TokenFilter {
	/// A filter with no blacklists (names still disallowed).
	pub fn none() -> Self {
		Self {
			token_blacklist: HashSet::new(),
			tag_blacklist: HashSet::new(),
			allow_names: false,
			name_tag_prefix: "PN".to_owned(),
			case_insensitive_self_check: true,
		}
	}

	/// The Dutch functional-word and tag blacklists.
	pub fn dutch() -> Self {
		let tokens = [
			// Lidwoorden
			"de", "het", "een",
			// Algemene onderwerpen
			"ik", "jij", "je", "u", "wij", "we", "jullie", "hij", "zij", "ze",
			// Algemene persoonlijke voornaamwoorden
			"hen", "hem", "haar", "mijn", "uw", "jouw", "onze", "ons",
			// Algemene werkwoorden
			"ben", "bent", "is", "was", "waren", "geweest", "heb", "hebt", "heeft",
			"hebben", "gehad", "word", "wordt", "worden", "geworden", "werd", "werden",
			"laat", "laten", "liet", "lieten", "gelaten", "ga", "gaat", "gaan",
			"gegaan", "ging", "gingen", "moet", "moeten", "moest", "moesten",
			"gemoeten", "mag", "mogen", "mocht", "mochten", "gemogen", "zal",
			"zullen", "zult", "zou", "zouden", "kan", "kunnen", "gekunt", "gekunnen",
			"hoef", "hoeft", "hoeven", "hoefde", "hoefden", "gehoeven",
			// Veelgebruikte woorden
			"niet", "iets", "dan", "voort", "erna", "welke", "maar", "van", "voor",
			"met", "binnenkort", "in", "en", "teveel", "om", "alles", "elke", "al",
			"echt", "waar", "waarom", "hoe", "o.a.", "beetje", "enkel", "goed",
			"best", "werkende", "meer", "zit", "uit", "even", "wel",
		];
		let tags = [
			"AVwaar", "AVwr", "DTh", "DTd", "DTe", "DTp", "PRte", "PRnaar", "PRvan",
			"PN2", "PRVoor", "PRmet", "PRop", "PRin", "PRom", "PRaan", "AVdr", "CJo",
		];
		Self {
			token_blacklist: tokens.iter().map(|t| (*t).to_owned()).collect(),
			tag_blacklist: tags.iter().map(|t| (*t).to_owned()).collect(),
			allow_names: false,
			name_tag_prefix: "PN".to_owned(),
			case_insensitive_self_check: true,
		}
	}
}

/// Candidate pools mined from context lines, keyed by exact tag set.
///
/// Every admitted context word lands in the multiset for its full tag
/// set. Grouping by exact tag-set equality (not single-tag membership)
/// is the key invariant: a token is only ever replaced by another token
/// carrying the identical set of grammatical categories, which preserves
/// agreement without a grammar model.
///
/// ## Responsibilities
/// - Tag context lines through the `PosTagger` collaborator
/// - Filter out functional words, blacklisted categories and untagged tokens
/// - Grow per-tag-set pools incrementally (never shrinking within a call)
/// - Propose one candidate replacer per eligible template token
pub struct ContextWordIndex<'a, T: PosTagger> {
	tagger: &'a T,
	filter: &'a TokenFilter,
	pools: HashMap<TagSet, Bag>,
}

impl<'a, T: PosTagger> ContextWordIndex<'a, T> {
	pub fn new(tagger: &'a T, filter: &'a TokenFilter) -> Self {
		Self { tagger, filter, pools: HashMap::new() }
	}

	/// Tag set of a token with boundary pseudo-tags removed.
	fn clean_tags(token: &TaggedToken) -> TagSet {
		token
			.tags()
			.iter()
			.filter(|tag| !BOUNDARY_TAGS.contains(&tag.as_str()))
			.cloned()
			.collect()
	}

	/// Whether a token survives the admission rules.
	fn keep_token(&self, text: &str, tags: &TagSet) -> bool {
		if text.trim().is_empty() || tags.is_empty() {
			return false;
		}
		if tags.iter().any(|tag| self.filter.tag_blacklist.contains(tag)) {
			return false;
		}
		!self.filter.token_blacklist.contains(&text.to_lowercase())
	}

	/// Tags one line and files every admitted token into the pool for
	/// its exact tag set.
	///
	/// # Errors
	/// Propagates `GenerateError::Tagging` from the collaborator; no
	/// partial silent skip.
	pub fn add_context_line(&mut self, line: &str) -> Result<(), GenerateError> {
		for token in self.tagger.analyze(line)? {
			let tags = Self::clean_tags(&token);
			if self.keep_token(token.text(), &tags) {
				self.pools.entry(tags).or_default().insert(token.text());
			}
		}
		Ok(())
	}

	/// Applies [`Self::add_context_line`] to each line in order.
	pub fn add_context_lines(&mut self, lines: &[String]) -> Result<(), GenerateError> {
		for line in lines {
			self.add_context_line(line)?;
		}
		Ok(())
	}

	/// Pool size for the exact tag set; 0 if absent.
	pub fn replaceable_size(&self, tags: &TagSet) -> usize {
		self.pools.get(tags).map_or(0, Bag::len)
	}

	/// The template's tokens that could draw a different replacement.
	///
	/// Tags and filters the line like context ingestion does, keeping
	/// only tokens whose tag-set pool holds more than one occurrence (a
	/// singleton pool cannot yield a different word). Returned tokens
	/// carry their cleaned tag sets.
	pub fn replaceable_tokens(&self, line: &str) -> Result<Vec<TaggedToken>, GenerateError> {
		let mut replaceable = Vec::new();
		for token in self.tagger.analyze(line)? {
			let tags = Self::clean_tags(&token);
			if self.keep_token(token.text(), &tags) && self.replaceable_size(&tags) > 1 {
				replaceable.push(TaggedToken::new(token.text(), tags));
			}
		}
		Ok(replaceable)
	}

	/// Builds a replacer for one token from a candidate pool.
	///
	/// Returns `None` (the token is simply skipped, never an error) when:
	/// - the token text is empty,
	/// - the token is a personal-name category and names are disallowed,
	/// - the pool is empty,
	/// - the pool's only distinct value is the token itself (compared
	///   per `TokenFilter::case_insensitive_self_check`),
	/// - the picker finds nothing once the token's own occurrence is
	///   hidden from the pool.
	pub fn create_replacer(
		&self,
		token: &TaggedToken,
		pool: &Bag,
		picker: &dyn ReplacementPicker,
		rng: &mut StdRng,
	) -> Option<Replacer> {
		if token.text().is_empty() {
			return None;
		}

		let tags = token.tags();
		if !self.filter.allow_names
			&& !tags.is_empty()
			&& tags.iter().all(|tag| tag.starts_with(&self.filter.name_tag_prefix))
		{
			return None;
		}

		if pool.is_empty() {
			return None;
		}
		if pool.unique_len() == 1 {
			let only = pool.get(0)?;
			let same = if self.filter.case_insensitive_self_check {
				only.to_lowercase() == token.text().to_lowercase()
			} else {
				only == token.text()
			};
			if same {
				return None;
			}
		}

		// Hide every occurrence of the token so it cannot replace itself
		let view = pool.excluding(vec![token.text().to_owned()]);
		let replacement = picker.pick(token.text(), &view, rng)?;
		Some(Replacer::new(token.text(), replacement, false, true))
	}

	/// Computes the candidate replacers for a template.
	///
	/// Template tokens are deduplicated by (text, tag set) in first-seen
	/// order; each eligible token is resolved against its tag set's pool
	/// through [`Self::create_replacer`].
	pub fn possible_replacements(
		&self,
		template: &str,
		picker: &dyn ReplacementPicker,
		rng: &mut StdRng,
	) -> Result<Vec<Replacer>, GenerateError> {
		let mut seen: HashSet<(String, TagSet)> = HashSet::new();
		let mut replacers = Vec::new();

		for token in self.replaceable_tokens(template)? {
			if !seen.insert((token.text().to_owned(), token.tags().clone())) {
				continue;
			}
			if let Some(pool) = self.pools.get(token.tags()) {
				if let Some(replacer) = self.create_replacer(&token, pool, picker, rng) {
					replacers.push(replacer);
				}
			}
		}
		Ok(replacers)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::picker::RandomPicker;
	use crate::model::tagger::LexiconTagger;
	use rand::SeedableRng;

	fn tag_set(labels: &[&str]) -> TagSet {
		labels.iter().map(|t| (*t).to_owned()).collect()
	}

	fn animal_tagger() -> LexiconTagger {
		let mut tagger = LexiconTagger::new();
		tagger.insert("kat", &["ZNW:ekv"]);
		tagger.insert("hond", &["ZNW:ekv"]);
		tagger.insert("vogel", &["ZNW:ekv"]);
		tagger.insert("slaapt", &["WKW:3ev"]);
		tagger.insert("rent", &["WKW:3ev"]);
		tagger.insert("de", &["DTe"]);
		tagger.insert("jan", &["PN1"]);
		tagger
	}

	#[test]
	fn context_words_are_grouped_by_exact_tag_set() {
		let tagger = animal_tagger();
		let filter = TokenFilter::dutch();
		let mut index = ContextWordIndex::new(&tagger, &filter);
		index.add_context_lines(&["de hond rent".to_owned(), "de vogel slaapt".to_owned()]).unwrap();

		assert_eq!(index.replaceable_size(&tag_set(&["ZNW:ekv"])), 2);
		assert_eq!(index.replaceable_size(&tag_set(&["WKW:3ev"])), 2);
		// Blacklisted tag: "de" is never mined
		assert_eq!(index.replaceable_size(&tag_set(&["DTe"])), 0);
	}

	#[test]
	fn grouping_is_tag_order_independent() {
		let mut tagger = LexiconTagger::new();
		// Same two tags, inserted in different orders
		tagger.insert("kat", &["ZNW:ekv", "ZNW:dim"]);
		tagger.insert("hond", &["ZNW:dim", "ZNW:ekv"]);
		let filter = TokenFilter::none();
		let mut index = ContextWordIndex::new(&tagger, &filter);
		index.add_context_line("kat hond").unwrap();

		assert_eq!(index.replaceable_size(&tag_set(&["ZNW:dim", "ZNW:ekv"])), 2);
	}

	#[test]
	fn untagged_and_blacklisted_tokens_are_dropped() {
		let tagger = animal_tagger();
		let filter = TokenFilter::dutch();
		let mut index = ContextWordIndex::new(&tagger, &filter);
		// "onbekend" is untagged, "de" carries a blacklisted tag
		index.add_context_line("de onbekend kat").unwrap();
		assert_eq!(index.replaceable_size(&tag_set(&["ZNW:ekv"])), 1);
	}

	#[test]
	fn replaceable_tokens_need_a_pool_beyond_one() {
		let tagger = animal_tagger();
		let filter = TokenFilter::dutch();
		let mut index = ContextWordIndex::new(&tagger, &filter);
		index.add_context_line("de hond rent").unwrap();

		// One noun and one verb in the pools: both singletons
		assert!(index.replaceable_tokens("de kat slaapt").unwrap().is_empty());

		index.add_context_line("de vogel slaapt").unwrap();
		let tokens = index.replaceable_tokens("de kat slaapt").unwrap();
		let texts: Vec<&str> = tokens.iter().map(TaggedToken::text).collect();
		assert_eq!(texts, vec!["kat", "slaapt"]);
	}

	#[test]
	fn create_replacer_skips_self_only_pools() {
		let tagger = animal_tagger();
		let filter = TokenFilter::dutch();
		let index = ContextWordIndex::new(&tagger, &filter);
		let mut rng = StdRng::seed_from_u64(7);
		let token = TaggedToken::new("kat", tag_set(&["ZNW:ekv"]));

		let mut pool = Bag::new();
		pool.insert("Kat");
		pool.insert("Kat");
		// Only distinct value is the token itself, up to case
		assert!(index.create_replacer(&token, &pool, &RandomPicker, &mut rng).is_none());

		pool.insert("hond");
		let replacer = index.create_replacer(&token, &pool, &RandomPicker, &mut rng).unwrap();
		assert_eq!(replacer.original(), "kat");
	}

	#[test]
	fn duplicated_original_never_replaces_itself() {
		use crate::model::picker::ClosestCountPicker;
		use crate::model::word_counter::WordCounter;

		let tagger = animal_tagger();
		let filter = TokenFilter::dutch();
		let index = ContextWordIndex::new(&tagger, &filter);
		let counter = WordCounter::from_lines(&["kat kat hond".to_owned()]);
		let picker = ClosestCountPicker::new(&counter);
		let mut rng = StdRng::seed_from_u64(7);
		let token = TaggedToken::new("kat", tag_set(&["ZNW:ekv"]));

		// The token occurs twice in its own pool; the alternative must
		// still win even though "kat" is the closest-frequency match
		let mut pool = Bag::new();
		pool.insert("kat");
		pool.insert("kat");
		pool.insert("hond");
		let replacer = index.create_replacer(&token, &pool, &picker, &mut rng).unwrap();
		assert_eq!(replacer.replacement(), "hond");
	}

	#[test]
	fn self_check_can_be_made_case_sensitive() {
		let tagger = animal_tagger();
		let mut filter = TokenFilter::dutch();
		filter.case_insensitive_self_check = false;
		let index = ContextWordIndex::new(&tagger, &filter);
		let mut rng = StdRng::seed_from_u64(7);
		let token = TaggedToken::new("kat", tag_set(&["ZNW:ekv"]));

		let mut pool = Bag::new();
		pool.insert("Kat");
		pool.insert("Kat");
		// "Kat" != "kat" under exact comparison, so a replacer is built
		let replacer = index.create_replacer(&token, &pool, &RandomPicker, &mut rng).unwrap();
		assert_eq!(replacer.replacement(), "Kat");
	}

	#[test]
	fn names_are_rejected_unless_allowed() {
		let tagger = animal_tagger();
		let filter = TokenFilter::dutch();
		let index = ContextWordIndex::new(&tagger, &filter);
		let mut rng = StdRng::seed_from_u64(7);
		let token = TaggedToken::new("Jan", tag_set(&["PN1"]));

		let mut pool = Bag::new();
		pool.insert("Jan");
		pool.insert("Piet");
		assert!(index.create_replacer(&token, &pool, &RandomPicker, &mut rng).is_none());

		let mut open = TokenFilter::dutch();
		open.allow_names = true;
		let index = ContextWordIndex::new(&tagger, &open);
		let replacer = index.create_replacer(&token, &pool, &RandomPicker, &mut rng).unwrap();
		assert_eq!(replacer.replacement(), "Piet");
	}

	#[test]
	fn possible_replacements_cover_template_tokens_once() {
		let tagger = animal_tagger();
		let filter = TokenFilter::dutch();
		let mut index = ContextWordIndex::new(&tagger, &filter);
		index.add_context_lines(&["de hond slaapt".to_owned(), "de vogel slaapt".to_owned()]).unwrap();

		let mut rng = StdRng::seed_from_u64(7);
		let replacers = index
			.possible_replacements("de kat kat slaapt", &RandomPicker, &mut rng)
			.unwrap();

		// "slaapt" only has itself as a pool; "kat" appears twice in the
		// template but yields one replacer
		let originals: Vec<&str> = replacers.iter().map(Replacer::original).collect();
		assert_eq!(originals, vec!["kat"]);
		// Every original is a genuine template token
		for replacer in &replacers {
			assert!("de kat kat slaapt".split(' ').any(|t| t == replacer.original()));
		}
	}
}
