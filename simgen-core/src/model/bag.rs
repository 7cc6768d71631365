use std::collections::HashSet;

/// An insertion-ordered multiset of strings.
///
/// A `Bag` keeps every inserted occurrence, in insertion order, and is
/// the storage behind the per-tag-set candidate pools.
///
/// ## Responsibilities
/// - Accumulate word occurrences (duplicates allowed)
/// - Indexed retrieval over occurrences
/// - Distinct-value iteration in first-seen order
/// - Cheap read-only exclusion views over the underlying storage
///
/// ## Invariants
/// - Insertion order is preserved; the bag never reorders occurrences
/// - Views never mutate the underlying bag
#[derive(Clone, Debug, Default)]
pub struct Bag {
	items: Vec<String>,
}

impl Bag {
	/// Creates an empty bag.
	pub fn new() -> Self {
		Self { items: Vec::new() }
	}

	/// Appends one occurrence of `word`.
	pub fn insert(&mut self, word: impl Into<String>) {
		self.items.push(word.into());
	}

	/// Total number of occurrences.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Number of distinct values (case-sensitive).
	pub fn unique_len(&self) -> usize {
		self.items.iter().collect::<HashSet<_>>().len()
	}

	/// Occurrence at `index` in insertion order.
	pub fn get(&self, index: usize) -> Option<&str> {
		self.items.get(index).map(String::as_str)
	}

	/// Iterates over all occurrences in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.items.iter().map(String::as_str)
	}

	/// Distinct values in first-seen order.
	pub fn distinct(&self) -> Vec<&str> {
		let mut seen = HashSet::new();
		self.iter().filter(|word| seen.insert(*word)).collect()
	}

	/// Builds a read-only view of this bag that hides every occurrence
	/// of the `excluded` values.
	///
	/// Construction is O(1): no occurrences are copied and the bag is not
	/// mutated.
	pub fn excluding(&self, excluded: Vec<String>) -> ExclusionView<'_> {
		ExclusionView { bag: self, excluded }
	}
}

/// A read-only view of a [`Bag`] with some occurrences hidden.
///
/// Used to offer a candidate pool minus the token being replaced, so a
/// word is never swapped for its own pool occurrence.
#[derive(Debug)]
pub struct ExclusionView<'a> {
	bag: &'a Bag,
	excluded: Vec<String>,
}

impl<'a> ExclusionView<'a> {
	/// Iterates over the visible occurrences in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		let excluded: HashSet<&str> = self.excluded.iter().map(String::as_str).collect();
		self.bag.iter().filter(move |item| !excluded.contains(item))
	}

	/// Number of visible occurrences.
	pub fn len(&self) -> usize {
		self.iter().count()
	}

	pub fn is_empty(&self) -> bool {
		self.iter().next().is_none()
	}

	/// Visible occurrence at `index`.
	pub fn get(&self, index: usize) -> Option<&str> {
		self.iter().nth(index)
	}

	/// Distinct visible values in first-seen order.
	pub fn distinct(&self) -> Vec<&str> {
		let mut seen = HashSet::new();
		self.iter().filter(|word| seen.insert(*word)).collect()
	}
}
