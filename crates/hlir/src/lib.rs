#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![no_std]

extern crate alloc;

mod inner;

use alloc::string::String;
use core::fmt::{Display, Formatter, Result as FmtResult, Write as _};

use logos::Lexer;
use serde::{Deserialize, Serialize};
use tracing::debug;

use self::inner::InnerOpCode;

/// Lexes brainfuck source one instruction at a time, skipping everything else.
#[derive(Debug, Clone)]
#[repr(transparent)]
pub struct Parser<'source> {
	inner: Lexer<'source, InnerOpCode>,
}

impl<'source> Parser<'source> {
	pub fn new(source: &'source str) -> Self {
		debug!("got source with length {}", source.len());

		Self {
			inner: Lexer::new(source),
		}
	}

	/// Collects every instruction into `I`.
	pub fn parse<I>(self) -> I
	where
		I: Default + Extend<BrainHlir>,
	{
		let mut result = I::default();

		result.extend(self);

		result
	}
}

impl Iterator for Parser<'_> {
	type Item = BrainHlir;

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.find_map(Result::ok).map(BrainHlir::from)
	}
}

/// High-level intermediate representation, one variant per brainfuck instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrainHlir {
	/// Move the pointer left (<).
	MovePtrLeft,
	/// Move the pointer right (>).
	MovePtrRight,
	/// Increment the current cell (+).
	IncrementCell,
	/// Decrement the current cell (-).
	DecrementCell,
	/// Get the input from the input stream (,).
	GetInput,
	/// Put the current cell into the output stream (.).
	PutOutput,
	/// Start of a loop ([).
	StartLoop,
	/// End of a loop (]).
	EndLoop,
}

impl BrainHlir {
	#[must_use]
	pub const fn from_char(c: char) -> Option<Self> {
		Some(match c {
			'<' => Self::MovePtrLeft,
			'>' => Self::MovePtrRight,
			'+' => Self::IncrementCell,
			'-' => Self::DecrementCell,
			',' => Self::GetInput,
			'.' => Self::PutOutput,
			'[' => Self::StartLoop,
			']' => Self::EndLoop,
			_ => return None,
		})
	}

	#[must_use]
	pub const fn as_char(self) -> char {
		match self {
			Self::MovePtrLeft => '<',
			Self::MovePtrRight => '>',
			Self::IncrementCell => '+',
			Self::DecrementCell => '-',
			Self::GetInput => ',',
			Self::PutOutput => '.',
			Self::StartLoop => '[',
			Self::EndLoop => ']',
		}
	}
}

impl Display for BrainHlir {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.write_char(self.as_char())
	}
}

impl From<BrainHlir> for char {
	fn from(value: BrainHlir) -> Self {
		value.as_char()
	}
}

impl From<InnerOpCode> for BrainHlir {
	fn from(value: InnerOpCode) -> Self {
		match value {
			InnerOpCode::MoveLeft => Self::MovePtrLeft,
			InnerOpCode::MoveRight => Self::MovePtrRight,
			InnerOpCode::Increment => Self::IncrementCell,
			InnerOpCode::Decrement => Self::DecrementCell,
			InnerOpCode::Input => Self::GetInput,
			InnerOpCode::Output => Self::PutOutput,
			InnerOpCode::StartLoop => Self::StartLoop,
			InnerOpCode::EndLoop => Self::EndLoop,
		}
	}
}

/// Strips every character that isn't one of the eight instructions, keeping the rest in order.
#[must_use]
pub fn clean(source: &str) -> String {
	let cleaned = Parser::new(source).map(char::from).collect::<String>();

	debug!(
		kept = cleaned.len(),
		removed = source.len() - cleaned.len(),
		"cleaned source"
	);

	cleaned
}

#[cfg(test)]
mod tests {
	use alloc::vec::Vec;

	use super::{BrainHlir, Parser, clean};

	#[test]
	fn basic_inc() {
		let parsed = Parser::new("+++++").parse::<Vec<_>>();

		assert_eq!(parsed, [BrainHlir::IncrementCell; 5]);
	}

	#[test]
	fn skips_comments() {
		let parsed = Parser::new("add two: ++ then print it .").parse::<Vec<_>>();

		assert_eq!(
			parsed,
			[
				BrainHlir::IncrementCell,
				BrainHlir::IncrementCell,
				BrainHlir::PutOutput
			]
		);
	}

	#[test]
	fn clean_keeps_order() {
		assert_eq!(clean("a+b-c<d>e.f,g[h]i"), "+-<>.,[]");
		assert_eq!(clean("[->+<]\n// moves a value"), "[->+<]");
	}

	#[test]
	fn clean_handles_unicode() {
		assert_eq!(clean("é+ü→-😀"), "+-");
	}

	#[test]
	fn clean_empty() {
		assert_eq!(clean(""), "");
		assert_eq!(clean("no instructions here"), "");
	}

	#[test]
	fn chars_round_trip() {
		for c in "+-<>.,[]".chars() {
			let op = BrainHlir::from_char(c).expect("instruction char");

			assert_eq!(char::from(op), c);
		}

		assert_eq!(BrainHlir::from_char('x'), None);
	}
}
