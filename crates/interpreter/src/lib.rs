#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

mod engine;
mod error;

use std::io::Write;

use tapefrick_hlir::clean;
use tapefrick_mlir::{LoopMap, Token, tokenize};
pub use tapefrick_tape::{DEFAULT_CELL_WIDTH, Dump, Tape, TapeError};
use tracing::{debug, info};

use self::engine::Machine;
pub use self::error::*;

/// Execution limits for a single run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
	/// Maximum number of tokens to execute. [`None`] runs until the program halts.
	pub fuel: Option<u64>,
}

impl Limits {
	#[must_use]
	pub const fn unlimited() -> Self {
		Self { fuel: None }
	}

	#[must_use]
	pub const fn with_fuel(fuel: u64) -> Self {
		Self { fuel: Some(fuel) }
	}
}

/// What a finished run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
	/// Tokens executed.
	pub steps: u64,
	pub bytes_read: usize,
	/// Program output, not counting the trailing newline.
	pub bytes_written: usize,
}

/// A brainfuck interpreter owning its own tape.
///
/// The cell width is fixed when the interpreter is created, and every run starts from a
/// freshly reset tape.
#[derive(Debug, Default, Clone)]
pub struct Interpreter {
	tape: Tape,
	limits: Limits,
}

impl Interpreter {
	pub fn new(width: u32) -> Result<Self, TapeError> {
		Self::with_limits(width, Limits::unlimited())
	}

	pub fn with_limits(width: u32, limits: Limits) -> Result<Self, TapeError> {
		Ok(Self {
			tape: Tape::new(width)?,
			limits,
		})
	}

	#[must_use]
	pub const fn tape(&self) -> &Tape {
		&self.tape
	}

	#[must_use]
	pub const fn limits(&self) -> Limits {
		self.limits
	}

	pub const fn set_limits(&mut self, limits: Limits) {
		self.limits = limits;
	}

	pub fn reset(&mut self) {
		self.tape.reset();
	}

	/// The tape as left by the last run.
	#[must_use]
	pub fn dump(&self) -> Dump<'_> {
		self.tape.dump()
	}

	/// Runs `source` against `input`, writing one byte per `.` and a newline once the program
	/// halts.
	///
	/// Unbalanced loops are reported before anything is written. Any other error stops the run
	/// where it happened, keeping whatever was already written.
	#[tracing::instrument(skip_all)]
	pub fn execute<W>(
		&mut self,
		source: &str,
		input: &[u8],
		output: &mut W,
	) -> Result<RunStats, ExecutionError>
	where
		W: ?Sized + Write,
	{
		let tokens = tokenize(&clean(source));

		self.execute_tokens(&tokens, input, output)
	}

	/// Like [`Self::execute`], for source that was already tokenized.
	#[tracing::instrument(skip_all)]
	pub fn execute_tokens<W>(
		&mut self,
		tokens: &[Token],
		input: &[u8],
		output: &mut W,
	) -> Result<RunStats, ExecutionError>
	where
		W: ?Sized + Write,
	{
		self.reset();

		let loops = LoopMap::resolve(tokens)?;

		debug!(
			tokens = tokens.len(),
			loops = loops.len(),
			input = input.len(),
			fuel = ?self.limits.fuel,
			"starting run"
		);

		let stats = Machine::new(&mut self.tape, tokens, &loops, input, self.limits.fuel)
			.run(output)?;

		output.write_all(b"\n")?;
		output.flush()?;

		info!(
			steps = stats.steps,
			bytes_read = stats.bytes_read,
			bytes_written = stats.bytes_written,
			cells = self.tape.cell_count(),
			"finished run"
		);

		Ok(stats)
	}
}
