use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WordChainError};

/// Default alphabet: lowercase Cyrillic letters.
pub const DEFAULT_ALPHABET: &str = "а-я";

/// Splits raw text into normalized word tokens.
///
/// A token is a maximal run of alphabet letters, optionally joined to
/// further runs by single hyphens (`привет-мир`). The input is lowercased
/// before scanning; everything that does not match is a separator and is
/// dropped.
///
/// The alphabet is the body of a regex character class (`а-я`, `a-z`,
/// `a-zà-ÿ`, ...). Only the alphabet is serialized, the pattern is
/// rebuilt when a model is loaded.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(try_from = "String", into = "String")]
pub struct Tokenizer {
	alphabet: String,
	pattern: Regex,
}

impl Tokenizer {
	/// Creates a tokenizer for the given alphabet.
	///
	/// # Errors
	/// Returns `InvalidAlphabet` if the alphabet is empty or does not form
	/// a valid character class.
	pub fn new(alphabet: &str) -> Result<Self> {
		if alphabet.is_empty() {
			return Err(WordChainError::InvalidAlphabet {
				alphabet: alphabet.to_owned(),
				reason: "alphabet cannot be empty".to_owned(),
			});
		}

		let source = format!("[{alphabet}]+(?:-[{alphabet}]+)*");
		let pattern = Regex::new(&source).map_err(|e| WordChainError::InvalidAlphabet {
			alphabet: alphabet.to_owned(),
			reason: e.to_string(),
		})?;

		Ok(Self { alphabet: alphabet.to_owned(), pattern })
	}

	/// The alphabet this tokenizer was built with.
	pub fn alphabet(&self) -> &str {
		&self.alphabet
	}

	/// Tokenizes `text`, in left-to-right order.
	pub fn tokenize(&self, text: &str) -> Vec<String> {
		let lowered = text.to_lowercase();
		self.pattern
			.find_iter(&lowered)
			.map(|m| m.as_str().to_owned())
			.collect()
	}
}

impl Default for Tokenizer {
	fn default() -> Self {
		// The default alphabet is a constant valid class.
		Self::new(DEFAULT_ALPHABET).expect("default alphabet is a valid pattern")
	}
}

impl TryFrom<String> for Tokenizer {
	type Error = WordChainError;

	fn try_from(alphabet: String) -> Result<Self> {
		Self::new(&alphabet)
	}
}

impl From<Tokenizer> for String {
	fn from(tokenizer: Tokenizer) -> Self {
		tokenizer.alphabet
	}
}

impl PartialEq for Tokenizer {
	fn eq(&self, other: &Self) -> bool {
		self.alphabet == other.alphabet
	}
}

impl Eq for Tokenizer {}
