//! Word-level Markov chain text generation library.
//!
//! This crate builds an order-n Markov chain over word tokens and samples
//! new text from it:
//! - Tokenization restricted to a configured alphabet
//! - Frequency tables from (n-1)-word prefixes to next-word counts
//! - Incremental training by additive merging
//! - Weighted random generation with a fallback for unseen prefixes
//! - Text sources and binary persistence

/// Error type shared by the whole crate.
pub mod error;

/// Text source resolution (raw text, files, directories).
pub mod io;

/// Core model, tokenizer and generator.
pub mod model;

pub use error::{Result, WordChainError};
pub use io::TextSource;
pub use model::config::{GenerationInput, ModelConfig, StartSeed};
pub use model::generator::Generator;
pub use model::markov_model::MarkovModel;
pub use model::state::NextWords;
pub use model::tokenizer::Tokenizer;
pub use model::word_chain::{Prefix, WordChain};
