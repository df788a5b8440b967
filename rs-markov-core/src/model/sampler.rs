use std::collections::HashMap;

use log::debug;
use rand::Rng;

use super::Token;
use crate::error::{MarkovError, Result};

/// Empirical unigram distribution of a corpus.
///
/// The table is computed once: each distinct token, in order of first
/// occurrence, with `count(token) / corpus_len`. Draws use inverse-CDF
/// sampling over that fixed order, so a seeded random source always yields
/// the same tokens.
///
/// # Invariants
/// - No token appears twice in `table`
/// - Every probability is strictly positive
/// - Probabilities sum to 1.0 up to floating-point rounding
#[derive(Clone, Debug)]
pub struct WeightedSampler {
	table: Vec<(Token, f64)>,
	corpus_len: usize,
}

impl WeightedSampler {
	/// Builds the probability table of `corpus`.
	///
	/// # Errors
	/// `EmptyCorpus` if there is no token to draw from.
	pub fn new(corpus: &[Token]) -> Result<Self> {
		if corpus.is_empty() {
			return Err(MarkovError::EmptyCorpus);
		}

		let mut counts: Vec<(&str, usize)> = Vec::new();
		let mut index: HashMap<&str, usize> = HashMap::new();
		for token in corpus.iter().map(String::as_str) {
			match index.get(token) {
				Some(&i) => counts[i].1 += 1,
				None => {
					index.insert(token, counts.len());
					counts.push((token, 1));
				}
			}
		}

		let total = corpus.len() as f64;
		let table: Vec<(Token, f64)> = counts
			.into_iter()
			.map(|(token, count)| (token.to_owned(), count as f64 / total))
			.collect();

		debug!("unigram table: {} distinct tokens over {} tokens", table.len(), corpus.len());
		Ok(Self { table, corpus_len: corpus.len() })
	}

	/// Number of distinct tokens.
	pub fn distinct(&self) -> usize {
		self.table.len()
	}

	/// Number of tokens in the corpus the table was built from.
	pub fn corpus_len(&self) -> usize {
		self.corpus_len
	}

	/// Probability of `token`, 0.0 if it never occurs.
	pub fn probability(&self, token: &str) -> f64 {
		self.table
			.iter()
			.find(|(t, _)| t == token)
			.map_or(0.0, |(_, p)| *p)
	}

	/// `(token, probability)` pairs in first-occurrence order.
	pub fn distribution(&self) -> impl Iterator<Item = (&str, f64)> {
		self.table.iter().map(|(t, p)| (t.as_str(), *p))
	}

	/// Draws one token.
	///
	/// # Errors
	/// `SamplingExhausted` if rounding left the cumulative weight below the
	/// drawn value. This is treated as an internal inconsistency, not retried.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Token> {
		self.sample_at(rng.random::<f64>())
	}

	/// Draws `n` independent tokens.
	pub fn sample_many<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<Token>> {
		(0..n).map(|_| self.sample(&mut *rng)).collect()
	}

	/// Inverse CDF: first token whose cumulative weight reaches `drawn`.
	fn sample_at(&self, drawn: f64) -> Result<Token> {
		let mut cumulative = 0.0;
		for (token, probability) in &self.table {
			cumulative += probability;
			if cumulative >= drawn {
				return Ok(token.clone());
			}
		}
		Err(MarkovError::SamplingExhausted { cumulative, drawn })
	}
}
