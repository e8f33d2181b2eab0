use alloc::{vec, vec::Vec};
use core::{
	error::Error as CoreError,
	fmt::{Display, Formatter, Result as FmtResult},
};

use tapefrick_hlir::BrainHlir;
use tracing::{debug, trace};

use super::Token;

/// Matching bracket positions for a token sequence, indexed by token position.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoopMap {
	targets: Vec<Option<usize>>,
	pairs: usize,
}

impl LoopMap {
	/// Pairs every `[` with its `]` using a stack of open positions.
	#[tracing::instrument(skip_all)]
	pub fn resolve(tokens: &[Token]) -> Result<Self, LoopError> {
		let mut targets = vec![None; tokens.len()];
		let mut open_stack = Vec::new();
		let mut pairs = 0;

		for (position, token) in tokens.iter().enumerate() {
			match token.op() {
				BrainHlir::StartLoop => open_stack.push(position),
				BrainHlir::EndLoop => {
					let Some(open) = open_stack.pop() else {
						return Err(LoopError::UnmatchedClose(position));
					};

					trace!(open, close = position, "matched loop");

					targets[open] = Some(position);
					targets[position] = Some(open);
					pairs += 1;
				}
				_ => {}
			}
		}

		if let Some(open) = open_stack.pop() {
			return Err(LoopError::UnmatchedOpen(open));
		}

		debug!(pairs, "resolved loops");

		Ok(Self { targets, pairs })
	}

	/// The matching bracket for the bracket at `position`.
	#[must_use]
	pub fn get(&self, position: usize) -> Option<usize> {
		self.targets.get(position).copied().flatten()
	}

	/// The number of matched loops.
	#[must_use]
	pub const fn len(&self) -> usize {
		self.pairs
	}

	#[must_use]
	pub const fn is_empty(&self) -> bool {
		matches!(self.pairs, 0)
	}

	/// `(open, close)` positions, ordered by the open position.
	pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.targets
			.iter()
			.copied()
			.enumerate()
			.filter_map(|(open, close)| {
				close
					.filter(|&close| close > open)
					.map(|close| (open, close))
			})
	}
}

pub fn resolve_loops(tokens: &[Token]) -> Result<LoopMap, LoopError> {
	LoopMap::resolve(tokens)
}

/// An unbalanced bracket, by token position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopError {
	UnmatchedClose(usize),
	UnmatchedOpen(usize),
}

impl LoopError {
	#[must_use]
	pub const fn position(self) -> usize {
		match self {
			Self::UnmatchedClose(position) | Self::UnmatchedOpen(position) => position,
		}
	}

	#[must_use]
	pub const fn op(self) -> BrainHlir {
		match self {
			Self::UnmatchedClose(..) => BrainHlir::EndLoop,
			Self::UnmatchedOpen(..) => BrainHlir::StartLoop,
		}
	}
}

impl Display for LoopError {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		match self {
			Self::UnmatchedClose(position) => {
				f.write_str("loop ending at #")?;
				Display::fmt(position, f)?;
				f.write_str(" has no beginning")
			}
			Self::UnmatchedOpen(position) => {
				f.write_str("loop starting at #")?;
				Display::fmt(position, f)?;
				f.write_str(" has no end")
			}
		}
	}
}

impl CoreError for LoopError {}
