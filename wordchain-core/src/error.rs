use std::path::PathBuf;

/// Errors raised by the word chain library.
///
/// The unseen-prefix fallback used during generation is part of the
/// algorithm and never shows up here.
#[derive(Debug, thiserror::Error)]
pub enum WordChainError {
	/// The model order must be at least 2.
	#[error("order must be >= 2, got {order}")]
	InvalidOrder {
		/// The rejected order.
		order: usize,
	},

	/// The configured alphabet could not be turned into a token pattern.
	#[error("invalid alphabet '{alphabet}': {reason}")]
	InvalidAlphabet {
		/// The rejected alphabet.
		alphabet: String,
		/// Why the pattern failed to compile.
		reason: String,
	},

	/// Generation was requested from a model without any prefix.
	#[error("the model is empty, fit it before generating")]
	EmptyModel,

	/// A text source could not be read.
	#[error("cannot read text source {}: {source}", .path.display())]
	MalformedSource {
		/// The file or directory that failed.
		path: PathBuf,
		/// The underlying I/O failure.
		#[source]
		source: std::io::Error,
	},

	/// A persisted model blob is corrupt or incompatible.
	#[error("cannot load model: {0}")]
	Deserialization(String),

	/// A model could not be encoded.
	#[error("cannot encode model: {0}")]
	Serialization(String),

	/// Two chains of different orders cannot be merged.
	#[error("order mismatch: expected {expected}, found {found}")]
	OrderMismatch {
		/// Order of the receiving chain.
		expected: usize,
		/// Order of the chain being merged in.
		found: usize,
	},

	/// I/O error while writing a model.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Result type for word chain operations.
pub type Result<T> = std::result::Result<T, WordChainError>;
