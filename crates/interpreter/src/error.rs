use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	io::Error as IoError,
};

use tapefrick_hlir::BrainHlir;
use tapefrick_mlir::LoopError;
use tapefrick_tape::TapeError;

/// Why a run stopped early. Positions are token positions.
#[derive(Debug)]
pub enum ExecutionError {
	Loop(LoopError),
	Tape {
		position: usize,
		op: BrainHlir,
		source: TapeError,
	},
	FuelExhausted {
		position: usize,
	},
	Io(IoError),
}

impl ExecutionError {
	pub(crate) const fn tape(position: usize, op: BrainHlir, source: TapeError) -> Self {
		Self::Tape {
			position,
			op,
			source,
		}
	}

	/// The token position the run stopped at, if the error has one.
	#[must_use]
	pub const fn position(&self) -> Option<usize> {
		match self {
			Self::Loop(e) => Some(e.position()),
			Self::Tape { position, .. } | Self::FuelExhausted { position } => Some(*position),
			Self::Io(..) => None,
		}
	}

	#[must_use]
	pub const fn op(&self) -> Option<BrainHlir> {
		match self {
			Self::Loop(e) => Some(e.op()),
			Self::Tape { op, .. } => Some(*op),
			Self::FuelExhausted { .. } | Self::Io(..) => None,
		}
	}
}

impl Display for ExecutionError {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		match self {
			Self::Loop(..) => f.write_str("program has unbalanced loops"),
			Self::Tape { position, op, .. } => {
				f.write_str("instruction #")?;
				Display::fmt(position, f)?;
				f.write_str(" (")?;
				Display::fmt(op, f)?;
				f.write_str(") failed")
			}
			Self::FuelExhausted { position } => {
				f.write_str("ran out of fuel at instruction #")?;
				Display::fmt(position, f)
			}
			Self::Io(..) => f.write_str("an IO error has occurred"),
		}
	}
}

impl StdError for ExecutionError {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		match self {
			Self::Loop(e) => Some(e),
			Self::Tape { source, .. } => Some(source),
			Self::Io(e) => Some(e),
			Self::FuelExhausted { .. } => None,
		}
	}
}

impl From<LoopError> for ExecutionError {
	fn from(value: LoopError) -> Self {
		Self::Loop(value)
	}
}

impl From<IoError> for ExecutionError {
	fn from(value: IoError) -> Self {
		Self::Io(value)
	}
}
