use std::collections::HashMap;

use log::debug;

use super::Token;
use super::prefix::Prefix;
use super::successors::{Successors, Transition};
use crate::error::{MarkovError, Result};

/// Order-N word chain: every N-token window of a corpus mapped to the tokens
/// that followed it.
///
/// # Responsibilities
/// - Scan a corpus with a sliding window of size `order`
/// - Record each continuation, duplicates included, in corpus order
/// - Mark windows that reach the end of the corpus with `Transition::End`
///
/// # Invariants
/// - `order >= 1`
/// - Every key is a window that literally appears in the corpus
/// - Every successor list holds at least one transition
/// - The chain is never modified after `build`
#[derive(Clone, Debug)]
pub struct Chain {
	order: usize,
	links: HashMap<Prefix, Successors>,
}

impl Chain {
	/// Builds the chain of order `order` from `corpus`.
	///
	/// A corpus not longer than `order` has no window followed by anything and
	/// yields an empty chain. Otherwise every window, including the final one,
	/// is recorded; the final window is followed by `Transition::End`.
	///
	/// # Errors
	/// - `InvalidConfiguration` if `order == 0`
	/// - `EmptyCorpus` if `corpus` is empty
	pub fn build(corpus: &[Token], order: usize) -> Result<Self> {
		if order == 0 {
			return Err(MarkovError::invalid("chain order must be >= 1"));
		}
		if corpus.is_empty() {
			return Err(MarkovError::EmptyCorpus);
		}

		let mut links: HashMap<Prefix, Successors> = HashMap::new();
		if corpus.len() > order {
			for (i, window) in corpus.windows(order).enumerate() {
				let transition = match corpus.get(i + order) {
					Some(next) => Transition::Next(next.clone()),
					None => Transition::End,
				};
				match links.get_mut(window) {
					Some(successors) => successors.add(transition),
					None => {
						let mut successors = Successors::new();
						successors.add(transition);
						links.insert(Prefix::from(window), successors);
					}
				}
			}
		}

		debug!("chain of order {order}: {} prefixes from {} tokens", links.len(), corpus.len());
		Ok(Self { order, links })
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct prefixes.
	pub fn len(&self) -> usize {
		self.links.len()
	}

	pub fn is_empty(&self) -> bool {
		self.links.is_empty()
	}

	/// Successors recorded after `prefix`, `None` for a dead end.
	pub fn get(&self, prefix: &[Token]) -> Option<&Successors> {
		self.links.get(prefix)
	}

	pub fn prefixes(&self) -> impl Iterator<Item = &Prefix> {
		self.links.keys()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(words: &[&str]) -> Vec<Token> {
		words.iter().map(|w| w.to_string()).collect()
	}

	fn successors_of<'a>(chain: &'a Chain, prefix: &[&str]) -> &'a [Transition] {
		chain.get(&tokens(prefix)).map(Successors::as_slice).unwrap_or(&[])
	}

	#[test]
	fn order_zero_is_invalid() {
		let result = Chain::build(&tokens(&["a", "b"]), 0);
		assert!(matches!(result, Err(MarkovError::InvalidConfiguration(_))));
	}

	#[test]
	fn empty_corpus_is_rejected() {
		assert!(matches!(Chain::build(&[], 1), Err(MarkovError::EmptyCorpus)));
	}

	#[test]
	fn first_order_chain_of_two_sentences() {
		let corpus = tokens(&["the", "cat", "sat", ".", "the", "dog", "ran", "."]);
		let chain = Chain::build(&corpus, 1).unwrap();

		assert_eq!(chain.len(), 6);
		assert_eq!(successors_of(&chain, &["the"]), &[Transition::next("cat"), Transition::next("dog")]);
		assert_eq!(successors_of(&chain, &["sat"]), &[Transition::next(".")]);
		assert_eq!(successors_of(&chain, &["."]), &[Transition::next("the"), Transition::End]);
		assert_eq!(successors_of(&chain, &["cat"]), &[Transition::next("sat")]);
		assert_eq!(successors_of(&chain, &["dog"]), &[Transition::next("ran")]);
		assert_eq!(successors_of(&chain, &["ran"]), &[Transition::next(".")]);
	}

	#[test]
	fn duplicates_accumulate_in_corpus_order() {
		let corpus = tokens(&["a", "b", "a", "b", "a", "c", "a"]);
		let chain = Chain::build(&corpus, 1).unwrap();
		assert_eq!(
			successors_of(&chain, &["a"]),
			&[Transition::next("b"), Transition::next("b"), Transition::next("c"), Transition::End]
		);
		assert_eq!(chain.get(&tokens(&["a"])).unwrap().count("b"), 2);
	}

	#[test]
	fn second_order_keys_are_corpus_windows() {
		let corpus = tokens(&["i", "am", ",", "i", "am", "here", "."]);
		let chain = Chain::build(&corpus, 2).unwrap();
		for prefix in chain.prefixes() {
			assert_eq!(prefix.len(), 2);
			assert!(corpus.windows(2).any(|w| w == prefix.tokens()));
		}
		assert_eq!(successors_of(&chain, &["i", "am"]), &[Transition::next(","), Transition::next("here")]);
		assert_eq!(successors_of(&chain, &["here", "."]), &[Transition::End]);
		assert!(chain.prefixes().all(|p| !chain.get(p.tokens()).unwrap().is_empty()));
	}

	#[test]
	fn order_not_below_corpus_length_gives_empty_chain() {
		let corpus = tokens(&["one", "two", "three"]);
		assert!(Chain::build(&corpus, 3).unwrap().is_empty());
		assert!(Chain::build(&corpus, 7).unwrap().is_empty());
		assert_eq!(Chain::build(&corpus, 2).unwrap().len(), 2);
	}
}
