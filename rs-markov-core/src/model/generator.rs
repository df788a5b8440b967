use log::{debug, trace};
use rand::Rng;

use super::Token;
use super::chain::Chain;
use super::generation_config::{GenerationConfig, StartSeed};
use super::sampler::WeightedSampler;
use super::successors::Transition;
use crate::error::{MarkovError, Result};

/// Random walk over a trained chain.
///
/// The generator only borrows the chain and the unigram table, so any number
/// of generators (on any number of threads) can walk the same model. Each
/// call to `generate` owns its output and its random source.
#[derive(Clone, Copy, Debug)]
pub struct Generator<'a> {
	chain: &'a Chain,
	sampler: &'a WeightedSampler,
}

impl<'a> Generator<'a> {
	pub fn new(chain: &'a Chain, sampler: &'a WeightedSampler) -> Self {
		Self { chain, sampler }
	}

	/// Generates a token sequence.
	///
	/// 1. Seeding: the first `order` tokens come from the start seed (weighted
	///    draws by default).
	/// 2. The last `order` tokens of the output are looked up in the chain.
	/// 3. On a dead end a fresh lookup prefix is drawn; the output is kept.
	/// 4. Otherwise a successor is picked: `End` stops the walk, a token is
	///    appended.
	/// 5. The walk stops once the output reaches the target length, truncated
	///    to exactly that length.
	///
	/// # Errors
	/// - `InvalidConfiguration` if the config order differs from the chain order
	/// - `ChainExhausted` after more than `max_dead_ends` consecutive dead ends,
	///   reporting how many were hit (the bound plus one)
	/// - `SamplingExhausted` if a weighted draw fails
	pub fn generate<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> Result<Vec<Token>> {
		let order = config.order();
		if order != self.chain.order() {
			return Err(MarkovError::invalid(format!(
				"config order ({order}) does not match chain order ({})",
				self.chain.order()
			)));
		}
		let target_length = config.target_length();

		let mut output: Vec<Token> = match config.start_seed() {
			StartSeed::Weighted => self.sampler.sample_many(order, &mut *rng)?,
			StartSeed::Custom(tokens) => tokens.clone(),
		};
		output.reserve(target_length.saturating_sub(order).min(4096));

		// Replaces the output tail as lookup key after a dead end.
		let mut resampled: Option<Vec<Token>> = None;
		let mut dead_ends = 0usize;
		let mut total_dead_ends = 0usize;

		loop {
			let prefix: &[Token] = match &resampled {
				Some(tokens) => tokens,
				None => &output[output.len() - order..],
			};

			let Some(successors) = self.chain.get(prefix) else {
				dead_ends += 1;
				total_dead_ends += 1;
				if dead_ends > config.max_dead_ends() {
					return Err(MarkovError::ChainExhausted { attempts: dead_ends });
				}
				trace!("dead end on {:?}, resampling", prefix);
				resampled = Some(self.sampler.sample_many(order, &mut *rng)?);
				continue;
			};
			dead_ends = 0;

			match successors.pick(&mut *rng) {
				Some(Transition::Next(token)) => output.push(token.clone()),
				// Successor lists are never empty once built.
				Some(Transition::End) | None => {
					debug!("end of sequence after {} tokens ({total_dead_ends} dead ends)", output.len());
					return Ok(output);
				}
			}
			resampled = None;

			if output.len() >= target_length {
				output.truncate(target_length);
				debug!("reached target length {target_length} ({total_dead_ends} dead ends)");
				return Ok(output);
			}
		}
	}
}
