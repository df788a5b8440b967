//! Top-level module for the word chain generation system.
//!
//! This module provides:
//! - Structured prefix keys (`Prefix`)
//! - Recorded continuations of a prefix (`Successors`, `Transition`)
//! - The corpus unigram distribution (`WeightedSampler`)
//! - The order-N chain (`Chain`)
//! - Generation parameters (`GenerationConfig`, `StartSeed`)
//! - The random walk (`Generator`) and the trained model (`MarkovModel`)

/// A word or a punctuation mark.
pub type Token = String;

/// Ordered N-token chain key with structural equality.
pub mod prefix;

/// Successor list of one prefix, duplicates included.
pub mod successors;

/// Empirical unigram distribution and weighted draws.
///
/// Used to seed a walk and to recover from dead ends.
pub mod sampler;

/// Sliding-window chain construction.
pub mod chain;

/// Validated generation parameters.
pub mod generation_config;

/// Chain walk: seeding, dead-end recovery, termination.
pub mod generator;

/// Trained model owning a chain and its unigram table.
///
/// Supports loading from text or file and parallel batch generation.
pub mod markov_model;

pub use chain::Chain;
pub use generation_config::{GenerationConfig, StartSeed, DEFAULT_MAX_DEAD_ENDS, MAX_ORDER};
pub use generator::Generator;
pub use markov_model::MarkovModel;
pub use prefix::Prefix;
pub use sampler::WeightedSampler;
pub use successors::{Successors, Transition};
