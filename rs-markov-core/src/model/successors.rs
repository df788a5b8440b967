use rand::Rng;

use super::Token;

/// One recorded continuation of a prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
	/// The corpus continues with this token.
	Next(Token),
	/// The prefix touched the end of the corpus: nothing follows.
	End,
}

impl Transition {
	pub fn next(token: &str) -> Self {
		Self::Next(token.to_owned())
	}
}

/// Every continuation observed after one prefix, in corpus order.
///
/// Duplicates are kept on purpose: a token that followed the prefix three
/// times occupies three positions, so a uniform pick over positions is a
/// frequency-weighted pick over tokens.
///
/// ## Invariants
/// - Once stored in a chain, the list holds at least one transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Successors {
	transitions: Vec<Transition>,
}

impl Successors {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more occurrence of `transition` after this prefix.
	pub fn add(&mut self, transition: Transition) {
		self.transitions.push(transition);
	}

	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	pub fn as_slice(&self) -> &[Transition] {
		&self.transitions
	}

	/// How many positions hold `token`.
	pub fn count(&self, token: &str) -> usize {
		self.transitions
			.iter()
			.filter(|t| matches!(t, Transition::Next(next) if next == token))
			.count()
	}

	/// Picks a transition.
	///
	/// - A single entry is returned without touching the random source.
	/// - Otherwise a position is drawn uniformly.
	///
	/// Returns `None` only for an empty list.
	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Transition> {
		match self.transitions.len() {
			0 => None,
			1 => self.transitions.first(),
			len => self.transitions.get(rng.random_range(0..len)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn pick_single_entry_is_deterministic() {
		let mut successors = Successors::new();
		successors.add(Transition::End);
		let mut rng = StdRng::seed_from_u64(1);
		for _ in 0..10 {
			assert_eq!(successors.pick(&mut rng), Some(&Transition::End));
		}
	}

	#[test]
	fn pick_empty_is_none() {
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(Successors::new().pick(&mut rng), None);
	}

	#[test]
	fn pick_follows_duplicate_frequency() {
		let mut successors = Successors::new();
		for token in ["a", "a", "a", "b"] {
			successors.add(Transition::next(token));
		}
		assert_eq!(successors.count("a"), 3);

		let mut rng = StdRng::seed_from_u64(42);
		let draws = 40_000;
		let hits = (0..draws)
			.filter(|_| successors.pick(&mut rng) == Some(&Transition::next("a")))
			.count();
		let frequency = hits as f64 / draws as f64;
		assert!((frequency - 0.75).abs() < 0.02, "frequency {frequency}");
	}
}
