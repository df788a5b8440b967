use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while training a chain or generating from it.
///
/// None of these are retried by the library: each one is raised once its own
/// bounded loop (if any) has given up, and propagates to the caller.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// A parameter (order, target length, seed, retry bound) is out of range.
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	/// Tokenization produced no token at all.
	#[error("corpus is empty")]
	EmptyCorpus,

	/// Too many consecutive dead ends while walking the chain; `attempts` is
	/// the number of consecutive dead ends hit.
	#[error("no continuation found in the chain after {attempts} consecutive dead ends")]
	ChainExhausted { attempts: usize },

	/// The cumulative unigram distribution did not reach the drawn value.
	#[error("weighted sampling exhausted the distribution (cumulative weight {cumulative}, drawn {drawn})")]
	SamplingExhausted { cumulative: f64, drawn: f64 },

	#[error("I/O error on {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

impl MarkovError {
	pub(crate) fn invalid<S: Into<String>>(message: S) -> Self {
		Self::InvalidConfiguration(message.into())
	}
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MarkovError>;
