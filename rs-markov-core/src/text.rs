use std::sync::LazyLock;

use regex::Regex;

use crate::model::Token;

/// Tokens that stick to the previous token when rendered.
pub const PUNCTUATION: [&str; 2] = [".", ","];

/// A word is any run of characters that is neither whitespace nor punctuation.
/// Every punctuation mark is a token on its own.
static TOKEN_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[^\s.,]+|[.,]").expect("token regex is valid"));

/// Returns true for `.` and `,`.
pub fn is_punctuation(token: &str) -> bool {
	PUNCTUATION.contains(&token)
}

/// Splits raw text into lower-cased tokens.
///
/// - Whitespace separates tokens and never becomes a token.
/// - `.` and `,` are always standalone tokens, even when glued to a word.
/// - No empty token is ever returned.
pub fn tokenize(text: &str) -> Vec<Token> {
	let lowered = text.to_lowercase();
	TOKEN_RE
		.find_iter(&lowered)
		.map(|m| m.as_str().to_owned())
		.collect()
}

/// Joins tokens with a single space, attaching punctuation to the token before it.
///
/// Example: `["the", "cat", "sat", "."]` → `"the cat sat."`
pub fn render<S: AsRef<str>>(tokens: &[S]) -> String {
	let mut out = String::new();
	for token in tokens {
		let token = token.as_ref();
		if !out.is_empty() && !is_punctuation(token) {
			out.push(' ');
		}
		out.push_str(token);
	}
	out
}
