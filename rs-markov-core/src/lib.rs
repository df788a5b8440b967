//! Word-level Markov chain text generation library.
//!
//! This crate provides:
//! - Tokenizing raw text into lower-cased words and punctuation marks
//! - Order-N chains built with a sliding window over the tokens
//! - Seeding from the corpus unigram distribution
//! - A bounded random walk with dead-end recovery
//! - Rendering tokens back into text
//!
//! Randomness is always passed in by the caller, so seeded runs are
//! reproducible.

/// Error type shared by every operation.
pub mod error;

/// Tokenizer and renderer.
pub mod text;

/// Chains, sampling and generation.
pub mod model;

/// File helpers (reading corpora, writing output, listing directories).
pub mod io;

pub use error::{MarkovError, Result};
