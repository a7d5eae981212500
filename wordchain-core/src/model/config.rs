use super::tokenizer::{DEFAULT_ALPHABET, Tokenizer};
use crate::error::{Result, WordChainError};

/// Default n-gram order used for training.
pub const DEFAULT_ORDER: usize = 3;

/// Parameters fixed when a model is created.
///
/// # Invariants
/// - `order` is always >= 2
/// - `alphabet` always compiles into a token pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelConfig {
	order: usize,
	alphabet: String,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self { order: DEFAULT_ORDER, alphabet: DEFAULT_ALPHABET.to_owned() }
	}
}

impl ModelConfig {
	pub fn order(&self) -> usize {
		self.order
	}

	pub fn alphabet(&self) -> &str {
		&self.alphabet
	}

	/// Sets the n-gram order.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `order < 2`.
	pub fn set_order(&mut self, order: usize) -> Result<()> {
		if order < 2 {
			return Err(WordChainError::InvalidOrder { order });
		}
		self.order = order;
		Ok(())
	}

	/// Sets the alphabet, as the body of a character class (`a-z`).
	///
	/// # Errors
	/// Returns `InvalidAlphabet` if no token pattern can be built from it.
	pub fn set_alphabet(&mut self, alphabet: &str) -> Result<()> {
		Tokenizer::new(alphabet)?;
		self.alphabet = alphabet.to_owned();
		Ok(())
	}

	/// Builds the tokenizer described by this configuration.
	pub fn tokenizer(&self) -> Result<Tokenizer> {
		Tokenizer::new(&self.alphabet)
	}
}

/// Strategy used to pick the starting words of a generation.
///
/// - `Random`: start from a prefix picked uniformly from the model.
/// - `Custom(text)`: tokenize `text` and start from it (see
///   `MarkovModel::generate` for how short seeds are completed).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum StartSeed {
	#[default]
	Random,
	Custom(String),
}

impl StartSeed {
	/// `Custom` for a non-blank seed text, `Random` otherwise.
	pub fn from_text(text: Option<&str>) -> Self {
		match text {
			Some(s) if !s.trim().is_empty() => StartSeed::Custom(s.to_owned()),
			_ => StartSeed::Random,
		}
	}

	pub(crate) fn as_text(&self) -> Option<&str> {
		match self {
			StartSeed::Random => None,
			StartSeed::Custom(s) => Some(s),
		}
	}
}

/// Parameters of one generation request.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GenerationInput {
	/// Number of words to append to the starting words.
	pub length: usize,

	/// How the starting words are chosen.
	pub start_seed: StartSeed,
}

impl GenerationInput {
	pub fn new(length: usize, start_seed: StartSeed) -> Self {
		Self { length, start_seed }
	}
}
