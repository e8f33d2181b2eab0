use alloc::{string::String, vec::Vec};
use core::{ops::Deref, slice};

use serde::Serialize;
use tapefrick_hlir::{BrainHlir, Parser};
use tracing::info;

use super::Token;

/// A run-length encoded instruction sequence.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[repr(transparent)]
pub struct TokenStream {
	inner: Vec<Token>,
}

impl TokenStream {
	#[must_use]
	pub const fn new() -> Self {
		Self { inner: Vec::new() }
	}

	/// Appends `op`, folding it into the last token when both are the same foldable instruction.
	pub fn push(&mut self, op: BrainHlir) {
		if let Some(last) = self.inner.last_mut()
			&& last.fold(op)
		{
			return;
		}

		self.inner.push(Token::new(op));
	}

	#[must_use]
	pub fn as_slice(&self) -> &[Token] {
		&self.inner
	}

	/// Replays every token `count` times, giving back the cleaned source.
	#[must_use]
	pub fn expand(&self) -> String {
		self.inner
			.iter()
			.flat_map(|token| token.expand())
			.map(char::from)
			.collect()
	}

	/// The number of single instructions the stream stands for.
	#[must_use]
	pub fn instruction_count(&self) -> usize {
		self.inner.iter().map(|token| token.count()).sum()
	}
}

impl Deref for TokenStream {
	type Target = [Token];

	fn deref(&self) -> &Self::Target {
		&self.inner
	}
}

impl Extend<BrainHlir> for TokenStream {
	fn extend<T>(&mut self, iter: T)
	where
		T: IntoIterator<Item = BrainHlir>,
	{
		for op in iter {
			self.push(op);
		}
	}
}

impl FromIterator<BrainHlir> for TokenStream {
	fn from_iter<T>(iter: T) -> Self
	where
		T: IntoIterator<Item = BrainHlir>,
	{
		let mut stream = Self::new();

		stream.extend(iter);

		stream
	}
}

impl<'a> IntoIterator for &'a TokenStream {
	type IntoIter = slice::Iter<'a, Token>;
	type Item = &'a Token;

	fn into_iter(self) -> Self::IntoIter {
		self.inner.iter()
	}
}

impl IntoIterator for TokenStream {
	type IntoIter = alloc::vec::IntoIter<Token>;
	type Item = Token;

	fn into_iter(self) -> Self::IntoIter {
		self.inner.into_iter()
	}
}

/// Compacts brainfuck source into tokens. Non-instruction characters are ignored, so both
/// cleaned and raw source are accepted.
#[tracing::instrument(skip_all)]
pub fn tokenize(source: &str) -> TokenStream {
	let stream = Parser::new(source).parse::<TokenStream>();

	info!(
		instructions = stream.instruction_count(),
		tokens = stream.len(),
		"tokenized source"
	);

	stream
}
