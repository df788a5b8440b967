use std::borrow::Borrow;
use std::fmt;

use super::Token;
use crate::text;

/// An ordered window of N tokens used as a chain key.
///
/// Equality and hashing are structural (token by token), so a token that
/// contains a space can never collide with a multi-token prefix. The text form
/// produced by `Display` follows the output rendering rule: tokens joined by a
/// space, `.` and `,` attached to the previous token.
///
/// `Prefix` borrows as `[Token]`, which lets the chain be queried with a slice
/// of the output sequence without allocating a key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Prefix(Vec<Token>);

impl Prefix {
	pub fn new(tokens: Vec<Token>) -> Self {
		Self(tokens)
	}

	pub fn tokens(&self) -> &[Token] {
		&self.0
	}

	/// Number of tokens, i.e. the chain order it was built for.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<&[Token]> for Prefix {
	fn from(tokens: &[Token]) -> Self {
		Self(tokens.to_vec())
	}
}

impl Borrow<[Token]> for Prefix {
	fn borrow(&self) -> &[Token] {
		&self.0
	}
}

impl fmt::Display for Prefix {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&text::render(&self.0))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn prefix(tokens: &[&str]) -> Prefix {
		Prefix::new(tokens.iter().map(|t| t.to_string()).collect())
	}

	#[test]
	fn display_attaches_punctuation() {
		assert_eq!(prefix(&["the", "end", "."]).to_string(), "the end.");
		assert_eq!(prefix(&["well", ",", "then"]).to_string(), "well, then");
	}

	#[test]
	fn structural_key_does_not_collide_with_spaced_token() {
		let joined = prefix(&["a b"]);
		let split = prefix(&["a", "b"]);
		assert_eq!(joined.to_string(), split.to_string());
		assert_ne!(joined, split);
	}

	#[test]
	fn map_lookup_by_slice() {
		let mut map = HashMap::new();
		map.insert(prefix(&["the", "cat"]), 1);
		let window = vec!["the".to_string(), "cat".to_string()];
		assert_eq!(map.get(window.as_slice()), Some(&1));
	}
}
