use std::path::Path;

use log::{debug, info, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::ModelConfig;
use super::tokenizer::Tokenizer;
use super::word_chain::WordChain;
use crate::error::{Result, WordChainError};
use crate::io::TextSource;

/// Version of the persisted model layout.
pub const FORMAT_VERSION: u16 = 1;

/// Word-level Markov chain text model.
///
/// Owns a tokenizer and an accumulated `WordChain`. The model is created
/// empty, grows through `fit`, and is only read by `generate`. Its whole
/// state is the pair (order, chain) plus the alphabet of its tokenizer.
///
/// # Responsibilities
/// - Tokenize training text and fold its n-gram counts into the chain
/// - Merge with independently trained models of the same order
/// - Generate text word by word with weighted sampling
/// - Round-trip through a compact binary blob
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MarkovModel {
	tokenizer: Tokenizer,
	chain: WordChain,
}

impl MarkovModel {
	/// Creates an empty model.
	///
	/// # Errors
	/// Returns an error if the order or the alphabet is invalid.
	pub fn new(config: &ModelConfig) -> Result<Self> {
		Ok(Self { tokenizer: config.tokenizer()?, chain: WordChain::new(config.order())? })
	}

	/// Creates an empty model of order `n` with the default alphabet.
	pub fn with_order(n: usize) -> Result<Self> {
		let mut config = ModelConfig::default();
		config.set_order(n)?;
		Self::new(&config)
	}

	pub fn order(&self) -> usize {
		self.chain.order()
	}

	pub fn tokenizer(&self) -> &Tokenizer {
		&self.tokenizer
	}

	pub fn chain(&self) -> &WordChain {
		&self.chain
	}

	pub fn is_empty(&self) -> bool {
		self.chain.is_empty()
	}

	/// Trains on raw text.
	///
	/// The text is tokenized, turned into a fresh frequency table and
	/// merged into the chain. Calling `fit` several times is equivalent
	/// to one call on the concatenated texts, except for the n-grams that
	/// would have spanned the boundary between two texts: those are never
	/// seen.
	pub fn fit(&mut self, text: &str) {
		let tokens = self.tokenizer.tokenize(text);
		let mut table = self.chain.empty_like();
		table.add_tokens(&tokens);

		let before = self.chain.len();
		self.chain.absorb(&table);
		debug!(
			"fitted {} tokens: {} n-grams, {} new prefixes ({} total)",
			tokens.len(),
			table.total(),
			self.chain.len() - before,
			self.chain.len()
		);
	}

	/// Resolves a text source and trains on it.
	///
	/// # Errors
	/// Returns `MalformedSource` if the source cannot be read, in which
	/// case the model is left untouched.
	pub fn fit_source(&mut self, source: &TextSource) -> Result<()> {
		let text = source.resolve()?;
		self.fit(&text);
		Ok(())
	}

	/// Merges another model into this one, summing counts prefix by prefix.
	///
	/// # Errors
	/// Returns `OrderMismatch` if the orders differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		self.chain.merge(&other.chain)
	}

	/// Generates `count` words after the starting words and returns the
	/// whole sequence joined by single spaces.
	///
	/// Starting words:
	/// - no seed (or a seed without any token): a random prefix of the chain
	/// - a seed shorter than `n-1` tokens: the first prefix, in chain
	///   order, whose first token is the seed's first token; if there is
	///   none, the tokenized seed itself
	/// - otherwise the whole tokenized seed
	///
	/// Each step looks up the last `n-1` words. A known prefix yields a
	/// word sampled by count; an unknown one (or fewer than `n-1` words)
	/// yields the first token of a random prefix instead.
	///
	/// # Errors
	/// Returns `EmptyModel` if the model has never seen an n-gram.
	pub fn generate<R: Rng>(&self, count: usize, start: Option<&str>, rng: &mut R) -> Result<String> {
		let mut words = self.start_words(start, rng)?;
		let context = self.order() - 1;
		words.reserve(count);

		for _ in 0..count {
			let from = words.len().saturating_sub(context);
			let next = match self.chain.get(&words[from..]).and_then(|next| next.predict(rng)) {
				Some(word) => word.to_owned(),
				None => {
					trace!("unseen prefix {:?}, restarting from a random prefix", &words[from..]);
					self.random_head(rng)?
				}
			};
			words.push(next);
		}

		Ok(words.join(" "))
	}

	fn start_words<R: Rng>(&self, start: Option<&str>, rng: &mut R) -> Result<Vec<String>> {
		let random = self.chain.random_prefix(rng).ok_or(WordChainError::EmptyModel)?;

		let seed = start.map(|s| self.tokenizer.tokenize(s)).unwrap_or_default();
		let Some(head) = seed.first() else {
			return Ok(random.words().to_vec());
		};

		if seed.len() < self.order() - 1 {
			if let Some(prefix) = self.chain.find_by_head(head) {
				return Ok(prefix.words().to_vec());
			}
		}
		Ok(seed)
	}

	fn random_head<R: Rng>(&self, rng: &mut R) -> Result<String> {
		self.chain
			.random_prefix(rng)
			.and_then(|prefix| prefix.head())
			.map(str::to_owned)
			.ok_or(WordChainError::EmptyModel)
	}

	/// Serializes the model into a versioned `postcard` blob.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		let mut bytes = postcard::to_stdvec(&FORMAT_VERSION).map_err(|e| WordChainError::Serialization(e.to_string()))?;
		let body = postcard::to_stdvec(self).map_err(|e| WordChainError::Serialization(e.to_string()))?;
		bytes.extend_from_slice(&body);
		Ok(bytes)
	}

	/// Rebuilds a model from a blob produced by `to_bytes`.
	///
	/// # Errors
	/// Returns `Deserialization` if the blob is corrupt, was written with
	/// another format version, or describes a chain that breaks its
	/// invariants.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		let (version, body) = postcard::take_from_bytes::<u16>(bytes)
			.map_err(|e| WordChainError::Deserialization(e.to_string()))?;
		if version != FORMAT_VERSION {
			return Err(WordChainError::Deserialization(format!(
				"unsupported format version {version}, expected {FORMAT_VERSION}"
			)));
		}

		let (model, rest) = postcard::take_from_bytes::<Self>(body)
			.map_err(|e| WordChainError::Deserialization(e.to_string()))?;
		if !rest.is_empty() {
			return Err(WordChainError::Deserialization(format!("{} trailing bytes after model", rest.len())));
		}
		model.chain.validate()?;
		Ok(model)
	}

	/// Writes the model to `path`.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let bytes = self.to_bytes()?;
		std::fs::write(&path, &bytes)?;
		info!(
			"saved model to {} ({} prefixes, {} bytes)",
			path.as_ref().display(),
			self.chain.len(),
			bytes.len()
		);
		Ok(())
	}

	/// Loads a model written by `save`.
	///
	/// # Errors
	/// Returns `Io` if the file cannot be read and `Deserialization` if
	/// its content is not a valid model.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let bytes = std::fs::read(&path)?;
		let model = Self::from_bytes(&bytes)?;
		debug!("loaded model from {} ({} prefixes)", path.as_ref().display(), model.chain.len());
		Ok(model)
	}
}
