use std::cmp::max;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::model::context_index::{ContextWordIndex, TokenFilter};
use crate::model::picker::ClosestCountPicker;
use crate::model::replacer::Replacers;
use crate::model::tagger::PosTagger;
use crate::model::word_counter::WordCounter;

/// Tuning knobs for the template generator.
///
/// All sampling behavior lives here, so one generator covers both the
/// single-context-line and the wider-context setups.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct GeneratorConfig {
	/// Context lines sampled from the context corpus per attempt.
	pub context_lines: usize,

	/// Sample a consecutive window (true) or distinct random indices.
	pub consecutive_context: bool,

	/// Extra template-base lines folded into the context sample.
	pub template_context_lines: usize,

	/// Frequency quantile acting as the commonness ceiling: replacement
	/// words at or above this count are only used to satisfy the
	/// minimum-replacement floor.
	pub min_quantile: f64,

	/// Retry ceiling of the duplicate-rejecting generation loop.
	pub max_trials: usize,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			context_lines: 1,
			consecutive_context: true,
			template_context_lines: 0,
			min_quantile: 0.62,
			max_trials: 100,
		}
	}
}

/// High-level word-substitution generator.
///
/// # Responsibilities
/// - Sample context lines per attempt and mine them into candidate pools
/// - Compute candidate replacers for a template with the
///   closest-frequency policy
/// - Enforce the minimum-replacement floor and the frequency ceiling
/// - Reject outputs already present in the corpus, within a bounded
///   number of trials
///
/// # Notes
/// - The word-frequency index is computed once, over template bases and
///   context corpus combined, and never changes afterwards.
/// - Each attempt builds a fresh `ContextWordIndex` from only the
///   sampled lines; keeping the pools small is what varies the output
///   across attempts.
/// - All randomness flows through one owned `StdRng`, so a seeded
///   generator is fully deterministic.
pub struct TemplateGenerator<T: PosTagger> {
	template_bases: Vec<String>,
	context_corpus: Vec<String>,
	counter: WordCounter,
	filter: TokenFilter,
	config: GeneratorConfig,
	tagger: T,
	rng: StdRng,
}

impl<T: PosTagger> TemplateGenerator<T> {
	/// Creates a generator seeded from the operating system.
	pub fn new(
		template_bases: Vec<String>,
		context_corpus: Vec<String>,
		tagger: T,
		filter: TokenFilter,
		config: GeneratorConfig,
	) -> Self {
		Self::with_rng(template_bases, context_corpus, tagger, filter, config, StdRng::from_os_rng())
	}

	/// Creates a generator with an explicit random source.
	///
	/// Intended for deterministic use: a seeded `StdRng` makes every
	/// draw of the generation pipeline reproducible.
	pub fn with_rng(
		template_bases: Vec<String>,
		context_corpus: Vec<String>,
		tagger: T,
		filter: TokenFilter,
		config: GeneratorConfig,
		rng: StdRng,
	) -> Self {
		let mut counter = WordCounter::new();
		for line in template_bases.iter().chain(context_corpus.iter()) {
			counter.add_line(line);
		}
		Self { template_bases, context_corpus, counter, filter, config, tagger, rng }
	}

	/// The word-frequency index over the combined statistics corpus.
	pub fn counter(&self) -> &WordCounter {
		&self.counter
	}

	pub fn config(&self) -> &GeneratorConfig {
		&self.config
	}

	pub fn config_mut(&mut self) -> &mut GeneratorConfig {
		&mut self.config
	}

	/// Samples the context lines for one attempt.
	///
	/// Consecutive mode draws a window of `context_lines` lines starting
	/// at a random offset in `[0, len - k]`; unique mode draws distinct
	/// random indices. `template_context_lines` extra lines are drawn
	/// from the template bases at distinct random indices.
	fn pick_context_lines(&mut self) -> Vec<String> {
		let mut lines = Vec::new();

		let len = self.context_corpus.len();
		if len > 0 && self.config.context_lines > 0 {
			let k = self.config.context_lines.min(len);
			if self.config.consecutive_context {
				let start = self.rng.random_range(0..=len - k);
				lines.extend_from_slice(&self.context_corpus[start..start + k]);
			} else {
				for index in sample(&mut self.rng, len, k) {
					lines.push(self.context_corpus[index].clone());
				}
			}
		}

		let base_len = self.template_bases.len();
		if base_len > 0 && self.config.template_context_lines > 0 {
			let k = self.config.template_context_lines.min(base_len);
			for index in sample(&mut self.rng, base_len, k) {
				lines.push(self.template_bases[index].clone());
			}
		}

		lines
	}

	/// The length-proportional floor on how many substitutions must occur.
	fn min_replacements(template: &str) -> usize {
		max(1, template.chars().count() / 25)
	}

	/// Runs one generation attempt over the given template.
	///
	/// # Behavior
	/// 1. Sample context lines and mine them into a fresh index.
	/// 2. Compute candidate replacers with the closest-frequency policy.
	/// 3. Sort candidates ascending by replacement-word frequency, then
	///    keep each one while the kept set is below the minimum floor,
	///    or while its replacement stays under the frequency ceiling.
	/// 4. Apply the kept replacers to the template.
	///
	/// # Errors
	/// - `GenerateError::Tagging` if the collaborator fails on any line.
	/// - `GenerateError::InvalidQuantile` if the configured quantile is
	///   out of range.
	pub fn generate_once(&mut self, template: &str) -> Result<String, GenerateError> {
		let context_lines = self.pick_context_lines();

		let mut index = ContextWordIndex::new(&self.tagger, &self.filter);
		index.add_context_lines(&context_lines)?;

		let picker = ClosestCountPicker::new(&self.counter);
		let mut candidates = index.possible_replacements(template, &picker, &mut self.rng)?;
		candidates.sort_by_key(|replacer| self.counter.count(replacer.replacement()));

		let min_replacements = Self::min_replacements(template);
		let ceiling = self.counter.quantile_count(self.config.min_quantile)?;

		let mut chosen = Vec::new();
		for replacer in candidates {
			if chosen.len() < min_replacements
				|| self.counter.count(replacer.replacement()) < ceiling
			{
				chosen.push(replacer);
			}
		}

		Ok(Replacers::new(chosen).apply(template))
	}

	/// Runs one attempt over a template sampled uniformly from the bases.
	///
	/// # Errors
	/// `GenerateError::EmptyCorpus` if there are no template bases.
	pub fn generate_once_random(&mut self) -> Result<String, GenerateError> {
		if self.template_bases.is_empty() {
			return Err(GenerateError::EmptyCorpus);
		}
		let index = self.rng.random_range(0..self.template_bases.len());
		let template = self.template_bases[index].clone();
		self.generate_once(&template)
	}

	/// Generates a novel line from the given template.
	///
	/// Repeats attempts up to the configured trial ceiling until the
	/// output is non-empty and not already present verbatim in the
	/// statistics corpus (template bases or context corpus).
	///
	/// # Errors
	/// `GenerateError::Exhausted` when the ceiling is reached without a
	/// novel result. There is no fallback content and no infinite loop.
	pub fn generate(&mut self, template: &str) -> Result<String, GenerateError> {
		for _ in 0..self.config.max_trials {
			let result = self.generate_once(template)?;
			if !result.is_empty() && !self.is_known(&result) {
				return Ok(result);
			}
		}
		Err(GenerateError::Exhausted { trials: self.config.max_trials })
	}

	/// Generates a novel line, sampling a fresh template every attempt.
	pub fn generate_random(&mut self) -> Result<String, GenerateError> {
		for _ in 0..self.config.max_trials {
			let result = self.generate_once_random()?;
			if !result.is_empty() && !self.is_known(&result) {
				return Ok(result);
			}
		}
		Err(GenerateError::Exhausted { trials: self.config.max_trials })
	}

	/// Whether a line already occurs verbatim in the statistics corpus.
	fn is_known(&self, line: &str) -> bool {
		self.template_bases.iter().any(|known| known == line)
			|| self.context_corpus.iter().any(|known| known == line)
	}
}
