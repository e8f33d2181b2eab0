#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![no_std]

extern crate alloc;

mod loops;
mod stream;

use core::{
	fmt::{Display, Formatter, Result as FmtResult},
	iter::{RepeatN, repeat_n},
	num::NonZeroUsize,
};

use serde::Serialize;
pub use tapefrick_hlir::BrainHlir;

pub use self::{loops::*, stream::*};

/// Mid-level intermediate representation. A single instruction and how many times in a row it runs.
///
/// Only pointer moves and cell changes are ever folded, every other instruction keeps a count of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
	op: BrainHlir,
	count: NonZeroUsize,
}

impl Token {
	#[must_use]
	pub const fn new(op: BrainHlir) -> Self {
		Self {
			op,
			count: NonZeroUsize::MIN,
		}
	}

	/// Returns [`None`] when `count` is more than 1 for an instruction that can't be folded.
	#[must_use]
	pub const fn repeated(op: BrainHlir, count: NonZeroUsize) -> Option<Self> {
		if count.get() > 1 && !is_foldable(op) {
			return None;
		}

		Some(Self { op, count })
	}

	#[must_use]
	pub const fn op(self) -> BrainHlir {
		self.op
	}

	#[must_use]
	pub const fn count(self) -> usize {
		self.count.get()
	}

	/// Absorbs another `op` into this token, returning whether it did.
	pub fn fold(&mut self, op: BrainHlir) -> bool {
		if self.op != op || !is_foldable(op) {
			return false;
		}

		match self.count.checked_add(1) {
			Some(count) => {
				self.count = count;
				true
			}
			None => false,
		}
	}

	/// The instructions this token stands for.
	#[must_use]
	pub fn expand(self) -> RepeatN<BrainHlir> {
		repeat_n(self.op, self.count())
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		Display::fmt(&self.op, f)?;

		if self.count() > 1 {
			Display::fmt(&self.count, f)?;
		}

		Ok(())
	}
}

impl From<BrainHlir> for Token {
	fn from(value: BrainHlir) -> Self {
		Self::new(value)
	}
}

#[must_use]
pub const fn is_foldable(op: BrainHlir) -> bool {
	matches!(
		op,
		BrainHlir::MovePtrLeft
			| BrainHlir::MovePtrRight
			| BrainHlir::IncrementCell
			| BrainHlir::DecrementCell
	)
}
