use std::borrow::Borrow;
use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};

use super::state::NextWords;
use crate::error::{Result, WordChainError};

/// An ordered tuple of `n-1` tokens used as a lookup key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Prefix(Vec<String>);

impl Prefix {
	pub fn words(&self) -> &[String] {
		&self.0
	}

	/// First token of the prefix.
	pub fn head(&self) -> Option<&str> {
		self.0.first().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Borrow<[String]> for Prefix {
	fn borrow(&self) -> &[String] {
		&self.0
	}
}

impl<S: Into<String>> FromIterator<S> for Prefix {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

/// Word-level n-gram frequency table.
///
/// Maps every observed prefix of `n-1` tokens to the words that followed
/// it, with their counts. Prefixes are kept in a `BTreeMap` so that
/// iteration, and therefore seeded generation, is stable from one
/// process to the next.
///
/// # Responsibilities
/// - Build the table from a token sequence (sliding window of length `n`)
/// - Merge with another table of the same order by summing counts
/// - Answer prefix lookups for generation
///
/// # Invariants
/// - `n` is always >= 2
/// - Every prefix has exactly `n-1` tokens
/// - Every count is >= 1
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WordChain {
	/// The order of the chain (number of tokens in an n-gram)
	n: usize,

	/// Mapping from a prefix (length n-1) to the words that followed it
	states: BTreeMap<Prefix, NextWords>,
}

impl WordChain {
	/// Creates an empty chain of order `n`.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `n < 2`.
	pub fn new(n: usize) -> Result<Self> {
		if n < 2 {
			return Err(WordChainError::InvalidOrder { order: n });
		}
		Ok(Self { n, states: BTreeMap::new() })
	}

	/// Builds a fresh frequency table from a token sequence.
	///
	/// A sequence shorter than `n` yields an empty table.
	pub fn from_tokens<S: AsRef<str>>(tokens: &[S], n: usize) -> Result<Self> {
		let mut chain = Self::new(n)?;
		chain.add_tokens(tokens);
		Ok(chain)
	}

	pub fn order(&self) -> usize {
		self.n
	}

	/// Number of distinct prefixes.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Sum of all counts, i.e. the number of n-grams observed.
	pub fn total(&self) -> usize {
		self.states.values().map(NextWords::total).sum()
	}

	/// Counts every n-gram of `tokens` into the chain.
	///
	/// The window slides over offsets `0..=len-n`; for each window the
	/// first `n-1` tokens form the prefix and the last one is counted
	/// as its follower.
	pub fn add_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) {
		if tokens.len() < self.n {
			return;
		}

		for window in tokens.windows(self.n) {
			let (prefix, next) = window.split_at(self.n - 1);
			let prefix: Prefix = prefix.iter().map(|word| word.as_ref()).collect();
			self.states.entry(prefix).or_default().add_transition(next[0].as_ref());
		}
	}

	/// Looks up the followers of a prefix.
	///
	/// Slices of the wrong length simply do not match.
	pub fn get(&self, prefix: &[String]) -> Option<&NextWords> {
		self.states.get(prefix)
	}

	pub fn contains(&self, prefix: &[String]) -> bool {
		self.states.contains_key(prefix)
	}

	/// Iterates over prefixes and their followers in prefix order.
	pub fn iter(&self) -> impl Iterator<Item = (&Prefix, &NextWords)> {
		self.states.iter()
	}

	/// Picks a prefix uniformly at random.
	///
	/// Returns `None` if the chain is empty.
	pub fn random_prefix<R: Rng>(&self, rng: &mut R) -> Option<&Prefix> {
		self.states.keys().choose(rng)
	}

	/// First prefix, in prefix order, whose first token is `head`.
	pub fn find_by_head(&self, head: &str) -> Option<&Prefix> {
		self.states.keys().find(|prefix| prefix.head() == Some(head))
	}

	/// Merges another chain into this one.
	///
	/// Shared prefixes get the per-word sum of both counts; prefixes only
	/// present in `other` are copied; the others are left untouched.
	///
	/// # Errors
	/// Returns `OrderMismatch` if the orders differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.n != other.n {
			return Err(WordChainError::OrderMismatch { expected: self.n, found: other.n });
		}
		self.absorb(other);
		Ok(())
	}

	/// Merge without the order check, for tables built from this chain.
	pub(crate) fn absorb(&mut self, other: &Self) {
		for (prefix, next) in &other.states {
			if let Some(existing) = self.states.get_mut(prefix) {
				existing.merge(next);
			} else {
				self.states.insert(prefix.clone(), next.clone());
			}
		}
	}

	/// An empty chain with the same order.
	pub(crate) fn empty_like(&self) -> Self {
		Self { n: self.n, states: BTreeMap::new() }
	}

	/// Checks the structural invariants, used after deserialization.
	pub(crate) fn validate(&self) -> Result<()> {
		if self.n < 2 {
			return Err(WordChainError::Deserialization(format!("invalid order {}", self.n)));
		}
		for (prefix, next) in &self.states {
			if prefix.len() != self.n - 1 {
				return Err(WordChainError::Deserialization(format!(
					"prefix {:?} has {} tokens, expected {}",
					prefix.words(),
					prefix.len(),
					self.n - 1
				)));
			}
			if !next.is_valid() {
				return Err(WordChainError::Deserialization(format!(
					"prefix {:?} has an empty or zero count",
					prefix.words()
				)));
			}
		}
		Ok(())
	}
}
