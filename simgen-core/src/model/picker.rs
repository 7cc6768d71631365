use rand::Rng;
use rand::rngs::StdRng;

use crate::model::bag::ExclusionView;
use crate::model::word_counter::WordCounter;

/// A strategy resolving a candidate pool to one concrete replacement.
///
/// Both provided policies are total over non-empty pools; an empty pool
/// yields `None`.
pub trait ReplacementPicker {
	fn pick(&self, original: &str, pool: &ExclusionView<'_>, rng: &mut StdRng) -> Option<String>;
}

/// Picks a uniformly random occurrence from the pool.
///
/// Duplicated values are proportionally more likely, since the draw is
/// over occurrences rather than distinct values.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPicker;

impl ReplacementPicker for RandomPicker {
	fn pick(&self, _original: &str, pool: &ExclusionView<'_>, rng: &mut StdRng) -> Option<String> {
		let size = pool.len();
		if size == 0 {
			return None;
		}
		pool.get(rng.random_range(0..size)).map(str::to_owned)
	}
}

/// Picks the distinct candidate whose corpus frequency is closest to the
/// original word's.
///
/// Ties break toward the earliest distinct value in first-seen pool
/// order. Steers substitutions toward words about as common as the one
/// they replace, which keeps the output register close to the corpus.
#[derive(Clone, Copy, Debug)]
pub struct ClosestCountPicker<'a> {
	counter: &'a WordCounter,
}

impl<'a> ClosestCountPicker<'a> {
	pub fn new(counter: &'a WordCounter) -> Self {
		Self { counter }
	}
}

impl ReplacementPicker for ClosestCountPicker<'_> {
	fn pick(&self, original: &str, pool: &ExclusionView<'_>, _rng: &mut StdRng) -> Option<String> {
		let base = self.counter.count(original) as i64;
		pool.distinct()
			.into_iter()
			.min_by_key(|candidate| (self.counter.count(candidate) as i64 - base).abs())
			.map(str::to_owned)
	}
}
