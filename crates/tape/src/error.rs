use core::{
	error::Error as CoreError,
	fmt::{Display, Formatter, Result as FmtResult},
};

use super::MAX_CELL_WIDTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapeError {
	InvalidWidth(u32),
	OutOfBounds { cursor: usize, distance: usize },
	ValueOutOfRange { value: u64, max: u64 },
}

impl Display for TapeError {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		match self {
			Self::InvalidWidth(width) => {
				f.write_str("cell width ")?;
				Display::fmt(width, f)?;
				f.write_str(" is not between 1 and ")?;
				Display::fmt(&MAX_CELL_WIDTH, f)?;
				f.write_str(" bits")
			}
			Self::OutOfBounds { cursor, distance } => {
				f.write_str("cannot move left by ")?;
				Display::fmt(distance, f)?;
				f.write_str(" from cell ")?;
				Display::fmt(cursor, f)?;
				f.write_str(": out of bounds")
			}
			Self::ValueOutOfRange { value, max } => {
				f.write_str("value ")?;
				Display::fmt(value, f)?;
				f.write_str(" is greater than max cell size ")?;
				Display::fmt(max, f)
			}
		}
	}
}

impl CoreError for TapeError {}
