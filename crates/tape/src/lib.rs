#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![no_std]

extern crate alloc;

mod error;

use alloc::{vec, vec::Vec};
use core::fmt::{Display, Formatter, Result as FmtResult, Write as _};

use tracing::{debug, trace};

pub use self::error::*;

pub const DEFAULT_CELL_WIDTH: u32 = 8;

pub const MAX_CELL_WIDTH: u32 = u64::BITS;

/// Memory for a brainfuck program.
///
/// Bounded on the left at cell 0 and grown on demand to the right. Every cell holds a value
/// in `0..2^width` and arithmetic on it wraps in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
	// never empty, and `cursor` always indexes into it
	cells: Vec<u64>,
	cursor: usize,
	width: u32,
	mask: u64,
}

impl Tape {
	pub fn new(width: u32) -> Result<Self, TapeError> {
		if !(1..=MAX_CELL_WIDTH).contains(&width) {
			return Err(TapeError::InvalidWidth(width));
		}

		debug!(width, "creating tape");

		Ok(Self::with_valid_width(width))
	}

	fn with_valid_width(width: u32) -> Self {
		Self {
			cells: vec![0],
			cursor: 0,
			width,
			mask: u64::MAX >> (MAX_CELL_WIDTH - width),
		}
	}

	#[must_use]
	pub const fn width(&self) -> u32 {
		self.width
	}

	/// The largest value a cell can hold.
	#[must_use]
	pub const fn max_value(&self) -> u64 {
		self.mask
	}

	#[must_use]
	pub const fn cursor(&self) -> usize {
		self.cursor
	}

	/// The number of cells allocated so far. Always at least 1.
	#[must_use]
	pub fn cell_count(&self) -> usize {
		self.cells.len()
	}

	#[must_use]
	pub fn cells(&self) -> &[u64] {
		&self.cells
	}

	/// Moves the cursor `n` cells left, leaving the tape untouched if that would pass cell 0.
	pub fn move_left(&mut self, n: usize) -> Result<(), TapeError> {
		let Some(cursor) = self.cursor.checked_sub(n) else {
			return Err(TapeError::OutOfBounds {
				cursor: self.cursor,
				distance: n,
			});
		};

		self.cursor = cursor;

		Ok(())
	}

	/// Moves the cursor `n` cells right, growing the tape with zeroed cells to reach it.
	pub fn move_right(&mut self, n: usize) {
		self.cursor += n;

		if self.cursor >= self.cells.len() {
			trace!(from = self.cells.len(), to = self.cursor + 1, "growing tape");

			self.cells.resize(self.cursor + 1, 0);
		}
	}

	pub fn add(&mut self, n: u64) {
		let mask = self.mask;
		let cell = self.cell_mut();

		*cell = cell.wrapping_add(n & mask) & mask;
	}

	pub fn subtract(&mut self, n: u64) {
		let mask = self.mask;
		let cell = self.cell_mut();

		*cell = cell.wrapping_sub(n & mask) & mask;
	}

	pub fn set_cell(&mut self, value: u64) -> Result<(), TapeError> {
		if value > self.mask {
			return Err(TapeError::ValueOutOfRange {
				value,
				max: self.mask,
			});
		}

		*self.cell_mut() = value;

		Ok(())
	}

	#[must_use]
	pub fn cell(&self) -> u64 {
		self.cells[self.cursor]
	}

	/// Shrinks the tape back to a single zeroed cell and moves the cursor to it.
	pub fn reset(&mut self) {
		debug!(cells = self.cells.len(), "resetting tape");

		self.cells.truncate(1);
		self.cells[0] = 0;
		self.cursor = 0;
	}

	/// Every cell value in tape order, for diagnostics.
	#[must_use]
	pub fn dump(&self) -> Dump<'_> {
		Dump { cells: &self.cells }
	}

	fn cell_mut(&mut self) -> &mut u64 {
		&mut self.cells[self.cursor]
	}
}

impl Default for Tape {
	fn default() -> Self {
		Self::with_valid_width(DEFAULT_CELL_WIDTH)
	}
}

/// Tab separated cell values, see [`Tape::dump`].
#[derive(Debug, Clone, Copy)]
pub struct Dump<'a> {
	cells: &'a [u64],
}

impl Display for Dump<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		for (i, cell) in self.cells.iter().enumerate() {
			if i > 0 {
				f.write_char('\t')?;
			}

			Display::fmt(cell, f)?;
		}

		Ok(())
	}
}
