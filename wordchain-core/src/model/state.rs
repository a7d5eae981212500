use std::collections::BTreeMap;

use rand::Rng;

use serde::{Deserialize, Serialize};

/// Words observed right after one prefix, with their occurrence counts.
///
/// Conceptually, this is the set of outgoing edges of a node in the
/// Markov chain, each edge weighted by the number of times it was seen.
///
/// ## Invariants
/// - Every count is strictly positive
/// - Counts are raw tallies, never normalized, so merges stay exact
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NextWords {
	/// Example: { "мир" => 42, "друг" => 3 }
	counts: BTreeMap<String, usize>,
}

impl NextWords {
	/// Creates an empty set of transitions.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more occurrence of `word` after this prefix.
	pub fn add_transition(&mut self, word: &str) {
		match self.counts.get_mut(word) {
			Some(occurrence) => *occurrence += 1,
			None => {
				self.counts.insert(word.to_owned(), 1);
			}
		}
	}

	/// Occurrence count of `word`, 0 if it was never seen.
	pub fn count(&self, word: &str) -> usize {
		self.counts.get(word).copied().unwrap_or(0)
	}

	/// Sum of all occurrence counts.
	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Iterates over `(word, count)` pairs in word order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.counts.iter().map(|(word, occurrence)| (word.as_str(), *occurrence))
	}

	/// Samples the next word, with probability proportional to its count.
	///
	/// Draws one integer in `0..total` and walks the cumulative counts
	/// until it falls inside a bucket.
	///
	/// Returns `None` if there are no transitions.
	pub fn predict<R: Rng>(&self, rng: &mut R) -> Option<&str> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (word, occurrence) in &self.counts {
			if r < *occurrence {
				return Some(word);
			}
			r -= occurrence;
		}

		None
	}

	/// Adds every count of `other` into this set.
	///
	/// Words missing on either side count as 0.
	pub fn merge(&mut self, other: &Self) {
		for (word, occurrence) in &other.counts {
			*self.counts.entry(word.clone()).or_insert(0) += *occurrence;
		}
	}

	/// True when every stored count is positive.
	pub(crate) fn is_valid(&self) -> bool {
		!self.counts.is_empty() && self.counts.values().all(|occurrence| *occurrence > 0)
	}
}
