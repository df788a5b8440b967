use std::path::Path;
use std::thread;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Token;
use super::chain::Chain;
use super::generation_config::GenerationConfig;
use super::generator::Generator;
use super::sampler::WeightedSampler;
use crate::error::Result;
use crate::io::read_file;
use crate::text;

/// A trained model: the chain of one order and the unigram table of the same
/// corpus.
///
/// The model is immutable once built. It can be shared (`&MarkovModel` or
/// `Arc<MarkovModel>`) by concurrent generation runs, each bringing its own
/// random source.
#[derive(Clone, Debug)]
pub struct MarkovModel {
	chain: Chain,
	sampler: WeightedSampler,
}

impl MarkovModel {
	/// Trains a model of order `order` on an already tokenized corpus.
	///
	/// # Errors
	/// - `EmptyCorpus` if `corpus` is empty
	/// - `InvalidConfiguration` if `order == 0`
	pub fn from_tokens(corpus: &[Token], order: usize) -> Result<Self> {
		let chain = Chain::build(corpus, order)?;
		let sampler = WeightedSampler::new(corpus)?;
		info!(
			"trained order-{order} model: {} tokens, {} distinct, {} prefixes",
			corpus.len(),
			sampler.distinct(),
			chain.len()
		);
		Ok(Self { chain, sampler })
	}

	/// Tokenizes `text` and trains on it.
	pub fn from_text(text: &str, order: usize) -> Result<Self> {
		Self::from_tokens(&text::tokenize(text), order)
	}

	/// Reads a UTF-8 text file, tokenizes it and trains on it.
	///
	/// # Errors
	/// `Io` if the file cannot be read, plus the errors of `from_tokens`.
	pub fn from_file<P: AsRef<Path>>(filepath: P, order: usize) -> Result<Self> {
		let contents = read_file(&filepath)?;
		debug!("read {} bytes from {}", contents.len(), filepath.as_ref().display());
		Self::from_text(&contents, order)
	}

	pub fn order(&self) -> usize {
		self.chain.order()
	}

	pub fn chain(&self) -> &Chain {
		&self.chain
	}

	pub fn sampler(&self) -> &WeightedSampler {
		&self.sampler
	}

	pub fn generator(&self) -> Generator<'_> {
		Generator::new(&self.chain, &self.sampler)
	}

	/// Runs one generation.
	pub fn generate<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> Result<Vec<Token>> {
		self.generator().generate(config, rng)
	}

	/// Runs one generation and renders the tokens as text.
	pub fn generate_text<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> Result<String> {
		Ok(text::render(&self.generate(config, rng)?))
	}

	/// Runs `count` independent generations in parallel.
	///
	/// Runs are split in contiguous chunks, one scoped thread per chunk (at
	/// most one chunk per CPU). Run `k` uses `StdRng::seed_from_u64(seed + k)`,
	/// so the result does not depend on scheduling. Results are in run order.
	///
	/// # Errors
	/// The first failing run (in run order) fails the whole batch.
	pub fn generate_batch(&self, config: &GenerationConfig, count: usize, seed: u64) -> Result<Vec<Vec<Token>>> {
		if count == 0 {
			return Ok(Vec::new());
		}
		let workers = num_cpus::get().clamp(1, count);
		let chunk_size = count.div_ceil(workers);
		debug!("batch of {count} runs on {workers} threads");

		let run = |k: usize| {
			let mut rng = StdRng::seed_from_u64(seed.wrapping_add(k as u64));
			self.generate(config, &mut rng)
		};

		thread::scope(|scope| {
			let handles: Vec<_> = (0..count)
				.step_by(chunk_size)
				.map(|start| {
					let end = (start + chunk_size).min(count);
					scope.spawn(move || (start..end).map(run).collect::<Result<Vec<_>>>())
				})
				.collect();

			let mut outputs = Vec::with_capacity(count);
			for handle in handles {
				match handle.join() {
					Ok(chunk) => outputs.extend(chunk?),
					Err(panic) => std::panic::resume_unwind(panic),
				}
			}
			Ok(outputs)
		})
	}
}

/// Renders each output on its own line.
pub fn render_lines(outputs: &[Vec<Token>]) -> String {
	outputs
		.iter()
		.map(|tokens| text::render(tokens))
		.collect::<Vec<_>>()
		.join("\n")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::MarkovError;

	const TEXT: &str = "The cat sat. The dog ran. The cat ran, the dog sat.";

	#[test]
	fn trains_from_text() {
		let model = MarkovModel::from_text(TEXT, 2).unwrap();
		assert_eq!(model.order(), 2);
		assert_eq!(model.sampler().corpus_len(), 16);
		assert!(!model.chain().is_empty());
	}

	#[test]
	fn blank_text_is_an_empty_corpus() {
		assert!(matches!(MarkovModel::from_text(" \n ", 1), Err(MarkovError::EmptyCorpus)));
	}

	#[test]
	fn missing_file_is_io_error() {
		let result = MarkovModel::from_file("/definitely/not/here.txt", 1);
		assert!(matches!(result, Err(MarkovError::Io { .. })));
	}

	#[test]
	fn generated_text_uses_attached_punctuation() {
		let model = MarkovModel::from_text(TEXT, 1).unwrap();
		let config = GenerationConfig::new(1, 30).unwrap();
		let text = model.generate_text(&config, &mut StdRng::seed_from_u64(3)).unwrap();
		assert!(!text.contains(" ."));
		assert!(!text.contains(" ,"));
	}

	#[test]
	fn batch_is_reproducible_and_ordered() {
		let model = MarkovModel::from_text(TEXT, 1).unwrap();
		let config = GenerationConfig::new(1, 10).unwrap();
		let batch = model.generate_batch(&config, 9, 100).unwrap();
		assert_eq!(batch.len(), 9);
		assert_eq!(batch, model.generate_batch(&config, 9, 100).unwrap());
		for (k, output) in batch.iter().enumerate() {
			let single = model.generate(&config, &mut StdRng::seed_from_u64(100 + k as u64)).unwrap();
			assert_eq!(output, &single);
		}
	}

	#[test]
	fn empty_batch() {
		let model = MarkovModel::from_text(TEXT, 1).unwrap();
		let config = GenerationConfig::new(1, 10).unwrap();
		assert!(model.generate_batch(&config, 0, 1).unwrap().is_empty());
	}

	#[test]
	fn batch_propagates_failures() {
		let model = MarkovModel::from_text("alone", 1).unwrap();
		let mut config = GenerationConfig::new(1, 3).unwrap();
		config.set_max_dead_ends(10).unwrap();
		assert!(matches!(
			model.generate_batch(&config, 4, 0),
			Err(MarkovError::ChainExhausted { .. })
		));
	}

	#[test]
	fn render_lines_one_output_per_line() {
		let outputs = vec![vec!["a".to_string(), ".".to_string()], vec!["b".to_string()]];
		assert_eq!(render_lines(&outputs), "a.\nb");
	}
}
