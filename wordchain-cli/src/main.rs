use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{LevelFilter, info};

use wordchain_core::{GenerationInput, Generator, MarkovModel, ModelConfig, StartSeed, TextSource};

/// Train and sample word-level Markov chain text models.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// More logging (-v debug, -vv trace)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,

	/// Less logging (-q warn, -qq error)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	quiet: u8,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Fit a model on a directory of texts, or on stdin
	Train(TrainArgs),
	/// Generate text from a saved model
	Generate(GenerateArgs),
	/// Print a summary of a saved model
	Info(InfoArgs),
}

#[derive(Args, Debug)]
struct TrainArgs {
	/// Directory with text files; stdin is read when omitted
	#[arg(short = 'd', long)]
	input_dir: Option<PathBuf>,

	/// Where to save the model
	#[arg(short, long)]
	model: PathBuf,

	/// N-gram order
	#[arg(short = 'n', long, default_value_t = wordchain_core::model::config::DEFAULT_ORDER)]
	order: usize,

	/// Character class of token letters
	#[arg(short, long, default_value = wordchain_core::model::tokenizer::DEFAULT_ALPHABET)]
	alphabet: String,

	/// Keep training an existing model instead of starting from scratch
	#[arg(short, long)]
	update: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
	/// Saved model
	#[arg(short, long)]
	model: PathBuf,

	/// Words to start from
	#[arg(short, long)]
	prefix: Option<String>,

	/// Number of words to generate
	#[arg(short, long)]
	length: usize,

	/// Seed of the random generator, for reproducible output
	#[arg(short, long)]
	seed: Option<u64>,
}

#[derive(Args, Debug)]
struct InfoArgs {
	/// Saved model
	#[arg(short, long)]
	model: PathBuf,
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	match cli.command {
		Commands::Train(args) => run_train(args),
		Commands::Generate(args) => run_generate(args),
		Commands::Info(args) => run_info(args),
	}
}

fn init_logging(verbose: u8, quiet: u8) {
	// RUST_LOG still wins over the command line flags.
	let default = log_level(verbose, quiet).to_string();
	env_logger::Builder::from_env(Env::default().default_filter_or(default))
		.format_timestamp_millis()
		.init();
}

fn log_level(verbose: u8, quiet: u8) -> LevelFilter {
	match i16::from(verbose) - i16::from(quiet) {
		i16::MIN..=-2 => LevelFilter::Error,
		-1 => LevelFilter::Warn,
		0 => LevelFilter::Info,
		1 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	}
}

fn run_train(args: TrainArgs) -> Result<()> {
	let mut model = training_model(&args)?;

	let source = match &args.input_dir {
		Some(dir) => TextSource::Directory(dir.clone()),
		None => {
			let mut text = String::new();
			std::io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
			TextSource::Text(text)
		}
	};

	model.fit_source(&source).context("failed to read training text")?;
	if model.is_empty() {
		bail!("no {}-gram found in the training text", model.order());
	}

	model
		.save(&args.model)
		.with_context(|| format!("failed to save model {}", args.model.display()))
}

/// The model to train: the saved one with `--update`, a fresh one otherwise.
fn training_model(args: &TrainArgs) -> Result<MarkovModel> {
	if !(args.update && args.model.exists()) {
		let mut config = ModelConfig::default();
		config.set_order(args.order)?;
		config.set_alphabet(&args.alphabet)?;
		return Ok(MarkovModel::new(&config)?);
	}

	let model = MarkovModel::load(&args.model)
		.with_context(|| format!("failed to load model {}", args.model.display()))?;
	if model.order() != args.order {
		info!("keeping order {} of the existing model", model.order());
	}
	if model.tokenizer().alphabet() != args.alphabet {
		info!("keeping alphabet '{}' of the existing model", model.tokenizer().alphabet());
	}
	Ok(model)
}

fn run_generate(args: GenerateArgs) -> Result<()> {
	let mut generator = Generator::load(&args.model, args.seed)
		.with_context(|| format!("failed to load model {}", args.model.display()))?;

	let input = GenerationInput::new(args.length, StartSeed::from_text(args.prefix.as_deref()));
	println!("{}", generator.predict(&input)?);
	Ok(())
}

fn run_info(args: InfoArgs) -> Result<()> {
	let model = MarkovModel::load(&args.model)
		.with_context(|| format!("failed to load model {}", args.model.display()))?;

	println!("order:     {}", model.order());
	println!("alphabet:  {}", model.tokenizer().alphabet());
	println!("prefixes:  {}", model.chain().len());
	println!("n-grams:   {}", model.chain().total());
	Ok(())
}
