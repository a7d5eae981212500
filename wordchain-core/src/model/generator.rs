use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::{GenerationInput, StartSeed};
use super::markov_model::MarkovModel;
use crate::error::Result;

/// High-level generator: a trained model plus its own random source.
///
/// # Responsibilities
/// - Load a persisted model
/// - Own the random number generator, seeded for reproducible runs or
///   from OS entropy otherwise
/// - Answer `GenerationInput` requests
#[derive(Debug)]
pub struct Generator {
	model: MarkovModel,
	rng: StdRng,
}

impl Generator {
	/// Wraps a model. A `rng_seed` makes every output reproducible.
	pub fn new(model: MarkovModel, rng_seed: Option<u64>) -> Self {
		let rng = match rng_seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		Self { model, rng }
	}

	/// Loads a model saved with `MarkovModel::save`.
	///
	/// # Errors
	/// Returns an error if the file cannot be read or is not a valid model.
	pub fn load<P: AsRef<Path>>(path: P, rng_seed: Option<u64>) -> Result<Self> {
		Ok(Self::new(MarkovModel::load(path)?, rng_seed))
	}

	pub fn into_model(self) -> MarkovModel {
		self.model
	}

	/// Generates `length` words after the start chosen by `start_seed`.
	///
	/// # Errors
	/// Returns `EmptyModel` if the model is untrained.
	pub fn generate(&mut self, length: usize, start_seed: &StartSeed) -> Result<String> {
		self.model.generate(length, start_seed.as_text(), &mut self.rng)
	}

	/// Same as `generate`, driven by a `GenerationInput`.
	pub fn predict(&mut self, input: &GenerationInput) -> Result<String> {
		self.generate(input.length, &input.start_seed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::WordChainError;

	fn model() -> MarkovModel {
		let mut model = MarkovModel::with_order(2).unwrap();
		model.fit("солнце светит ярко солнце греет землю луна светит тускло");
		model
	}

	#[test]
	fn seeded_generators_agree() {
		let input = GenerationInput::new(8, StartSeed::Custom("солнце".to_owned()));
		let mut first = Generator::new(model(), Some(17));
		let mut second = Generator::new(model(), Some(17));
		for _ in 0..3 {
			assert_eq!(first.predict(&input).unwrap(), second.predict(&input).unwrap());
		}
	}

	#[test]
	fn output_has_requested_length() {
		let mut generator = Generator::new(model(), None);
		for length in [0, 1, 5, 20] {
			let out = generator.generate(length, &StartSeed::Random).unwrap();
			assert_eq!(out.split(' ').count(), 1 + length);
		}
	}

	#[test]
	fn empty_model_is_an_error() {
		let mut generator = Generator::new(MarkovModel::with_order(3).unwrap(), Some(0));
		assert!(matches!(generator.generate(3, &StartSeed::Random), Err(WordChainError::EmptyModel)));
		assert!(generator.into_model().is_empty());
	}
}
