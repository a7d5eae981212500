use std::fs;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempdir::TempDir;

use wordchain_core::{
	GenerationInput, Generator, MarkovModel, ModelConfig, StartSeed, TextSource, WordChain, WordChainError,
};

const CORPUS: &str = "Жили-были дед да баба. Была у них курочка ряба. Снесла курочка яичко, \
	не простое, а золотое. Дед бил, бил, не разбил. Баба била, била, не разбила.";

fn trained(n: usize) -> MarkovModel {
	let mut model = MarkovModel::with_order(n).unwrap();
	model.fit(CORPUS);
	model
}

fn words(s: &str) -> usize {
	s.split(' ').count()
}

#[test]
fn tokenizer_example() {
	let model = MarkovModel::with_order(2).unwrap();
	assert_eq!(model.tokenizer().tokenize("Привет-мир! 123 тест"), vec!["привет-мир", "тест"]);
}

#[test]
fn hyphenated_words_are_single_states() {
	let model = trained(2);
	let next = model.chain().get(&["жили-были".to_owned()]).unwrap();
	assert_eq!(next.count("дед"), 1);
}

#[test]
fn incremental_fit_equals_merged_tables() {
	let mut incremental = MarkovModel::with_order(3).unwrap();
	incremental.fit("дед бил не разбил");
	incremental.fit("баба била не разбила");

	let mut merged = MarkovModel::with_order(3).unwrap();
	let mut other = MarkovModel::with_order(3).unwrap();
	other.fit("баба била не разбила");
	merged.fit("дед бил не разбил");
	merged.merge(&other).unwrap();

	assert_eq!(incremental, merged);
}

#[test]
fn fit_boundaries_are_not_bridged() {
	let mut split = MarkovModel::with_order(2).unwrap();
	split.fit("раз два");
	split.fit("три четыре");
	assert!(split.chain().get(&["два".to_owned()]).is_none());

	let mut joined = MarkovModel::with_order(2).unwrap();
	joined.fit("раз два три четыре");
	assert_eq!(joined.chain().get(&["два".to_owned()]).unwrap().count("три"), 1);
}

#[test]
fn fit_from_directory() {
	let dir = TempDir::new("wordchain_fit").unwrap();
	fs::write(dir.path().join("1.txt"), "дед бил").unwrap();
	fs::write(dir.path().join("2.txt"), "не разбил").unwrap();

	let mut model = MarkovModel::with_order(2).unwrap();
	model.fit_source(&TextSource::Directory(dir.path().to_path_buf())).unwrap();

	// Files are joined, so the pair across them is observed.
	assert_eq!(model.chain().get(&["бил".to_owned()]).unwrap().count("не"), 1);
	assert_eq!(model.chain().total(), 3);
}

#[test]
fn save_and_load_round_trip() {
	let dir = TempDir::new("wordchain_model").unwrap();
	let path = dir.path().join("model.bin");

	let mut config = ModelConfig::default();
	config.set_order(4).unwrap();
	let mut model = MarkovModel::new(&config).unwrap();
	model.fit(CORPUS);
	model.fit(CORPUS);
	model.save(&path).unwrap();

	let loaded = MarkovModel::load(&path).unwrap();
	assert_eq!(loaded.order(), 4);
	assert_eq!(loaded.chain(), model.chain());
	for (prefix, next) in model.chain().iter() {
		let restored = loaded.chain().get(prefix.words()).unwrap();
		for (word, count) in next.iter() {
			assert_eq!(restored.count(word), count);
		}
	}
}

#[test]
fn load_rejects_corrupt_files() {
	let dir = TempDir::new("wordchain_model").unwrap();
	let path = dir.path().join("broken.bin");
	fs::write(&path, [1u8, 3, 0xff, 0xff]).unwrap();
	assert!(matches!(MarkovModel::load(&path), Err(WordChainError::Deserialization(_))));

	assert!(matches!(MarkovModel::load(dir.path().join("missing.bin")), Err(WordChainError::Io(_))));
}

#[test]
fn generator_from_file() {
	let dir = TempDir::new("wordchain_model").unwrap();
	let path = dir.path().join("model.bin");
	trained(3).save(&path).unwrap();

	let input = GenerationInput::new(6, StartSeed::Custom("курочка".to_owned()));
	let mut first = Generator::load(&path, Some(99)).unwrap();
	let mut second = Generator::load(&path, Some(99)).unwrap();
	let out = first.predict(&input).unwrap();
	assert_eq!(out, second.predict(&input).unwrap());
	// "курочка" is completed into a full prefix.
	assert!(out.starts_with("курочка "));
	assert_eq!(words(&out), 2 + 6);
}

#[test]
fn empty_model_is_an_error_regardless_of_arguments() {
	let model = MarkovModel::with_order(3).unwrap();
	let mut rng = StdRng::seed_from_u64(0);
	for start in [None, Some(""), Some("дед"), Some("дед бил не")] {
		for count in [0, 1, 10] {
			assert!(matches!(model.generate(count, start, &mut rng), Err(WordChainError::EmptyModel)));
		}
	}
}

#[test]
fn merge_commutes_on_chains() {
	let a = WordChain::from_tokens(&["дед", "бил", "дед", "бил", "баба"], 2).unwrap();
	let b = WordChain::from_tokens(&["бил", "баба", "била", "дед"], 2).unwrap();

	let mut ab = WordChain::new(2).unwrap();
	ab.merge(&a).unwrap();
	ab.merge(&b).unwrap();
	let mut ba = WordChain::new(2).unwrap();
	ba.merge(&b).unwrap();
	ba.merge(&a).unwrap();

	assert_eq!(ab, ba);
	assert_eq!(ab.total(), a.total() + b.total());
}

fn start_len(model: &MarkovModel, start: Option<&str>) -> usize {
	let n = model.order();
	let seed = start.map(|s| model.tokenizer().tokenize(s)).unwrap_or_default();
	if seed.is_empty() {
		n - 1
	} else if seed.len() < n - 1 {
		let head = seed[0].as_str();
		match model.chain().find_by_head(head) {
			Some(_) => n - 1,
			None => seed.len(),
		}
	} else {
		seed.len()
	}
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(200))]

	#[test]
	fn output_length_is_start_plus_count(
		n in 2..5usize,
		count in 0..40usize,
		seed in 0..1000u64,
		start in proptest::option::of("[а-я ]{0,30}"),
	) {
		let model = trained(n);
		let mut rng = StdRng::seed_from_u64(seed);
		let out = model.generate(count, start.as_deref(), &mut rng).unwrap();
		prop_assert_eq!(words(&out), start_len(&model, start.as_deref()) + count);
	}

	#[test]
	fn unseen_prefixes_never_fail(
		count in 0..30usize,
		seed in 0..1000u64,
		start in "(щщ|ъъ|ыыы)( (щщ|ъъ|ыыы)){2,4}",
	) {
		let model = trained(3);
		let mut rng = StdRng::seed_from_u64(seed);
		let out = model.generate(count, Some(&start), &mut rng).unwrap();
		prop_assert!(out.starts_with(start.as_str()));
		prop_assert_eq!(words(&out), words(&start) + count);
	}

	#[test]
	fn same_rng_seed_same_text(seed in 0..1000u64, count in 0..20usize) {
		let model = trained(2);
		let first = model.generate(count, Some("а"), &mut StdRng::seed_from_u64(seed)).unwrap();
		let second = model.generate(count, Some("а"), &mut StdRng::seed_from_u64(seed)).unwrap();
		prop_assert_eq!(first, second);
	}
}
