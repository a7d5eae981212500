//! Word-level Markov chain model.
//!
//! This module provides:
//! - Tokenization of raw text (`Tokenizer`)
//! - Next-word occurrence counts (`NextWords`)
//! - The prefix-to-counts frequency table (`WordChain`)
//! - The trainable model (`MarkovModel`)
//! - A generator owning its random source (`Generator`)
//! - Model and generation configuration (`ModelConfig`, `GenerationInput`)

/// Model and generation parameters.
pub mod config;

/// High-level interface owning a model and a seedable random source.
pub mod generator;

/// Fit, merge, generate and persist a word-level Markov model.
pub mod markov_model;

/// Next-word counts for one prefix, with weighted sampling.
pub mod state;

/// Raw text to normalized word tokens.
pub mod tokenizer;

/// Prefix-to-counts frequency table: construction and merge.
pub mod word_chain;
