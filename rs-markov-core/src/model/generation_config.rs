use super::Token;
use crate::error::{MarkovError, Result};

/// Exclusive upper bound on the chain order accepted from callers.
pub const MAX_ORDER: usize = 20;

/// Consecutive dead ends tolerated before giving up.
pub const DEFAULT_MAX_DEAD_ENDS: usize = 1_000_000;

/// How the first prefix of a generation run is chosen.
///
/// # Variants
/// - `Weighted`: draw each of the N tokens from the corpus unigram distribution.
/// - `Custom(tokens)`: start from the given tokens; there must be exactly N.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StartSeed {
	#[default]
	Weighted,
	Custom(Vec<Token>),
}

/// Parameters of one generation run.
///
/// # Invariants
/// - `1 <= order < MAX_ORDER`
/// - `order <= target_length < usize::MAX`
/// - `max_dead_ends >= 1`
/// - A custom start seed holds exactly `order` tokens
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
	order: usize,
	target_length: usize,
	max_dead_ends: usize,
	start_seed: StartSeed,
}

impl GenerationConfig {
	/// Validates order and target length.
	///
	/// Meant to be called before any file is read, so bad arguments fail fast.
	///
	/// # Errors
	/// `InvalidConfiguration` if one of the invariants does not hold.
	pub fn new(order: usize, target_length: usize) -> Result<Self> {
		if !(1..MAX_ORDER).contains(&order) {
			return Err(MarkovError::invalid(format!("order must be in [1, {MAX_ORDER}), got {order}")));
		}
		if target_length == 0 || target_length == usize::MAX {
			return Err(MarkovError::invalid(format!(
				"target length must be in [1, {}), got {target_length}",
				usize::MAX
			)));
		}
		if target_length < order {
			return Err(MarkovError::invalid(format!(
				"target length ({target_length}) must not be smaller than the order ({order})"
			)));
		}
		Ok(Self {
			order,
			target_length,
			max_dead_ends: DEFAULT_MAX_DEAD_ENDS,
			start_seed: StartSeed::Weighted,
		})
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn target_length(&self) -> usize {
		self.target_length
	}

	pub fn max_dead_ends(&self) -> usize {
		self.max_dead_ends
	}

	pub fn start_seed(&self) -> &StartSeed {
		&self.start_seed
	}

	/// Sets how many consecutive dead ends are tolerated.
	///
	/// # Errors
	/// Returns an error if `max_dead_ends` is 0.
	pub fn set_max_dead_ends(&mut self, max_dead_ends: usize) -> Result<()> {
		if max_dead_ends == 0 {
			return Err(MarkovError::invalid("dead-end bound must be >= 1"));
		}
		self.max_dead_ends = max_dead_ends;
		Ok(())
	}

	/// Sets the start seed.
	///
	/// # Errors
	/// Returns an error if a custom seed does not hold exactly `order` tokens.
	pub fn set_start_seed(&mut self, start_seed: StartSeed) -> Result<()> {
		if let StartSeed::Custom(tokens) = &start_seed {
			if tokens.len() != self.order {
				return Err(MarkovError::invalid(format!(
					"custom seed must hold {} tokens, got {}",
					self.order,
					tokens.len()
				)));
			}
		}
		self.start_seed = start_seed;
		Ok(())
	}
}
