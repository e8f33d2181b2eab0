use std::io::Write;

use tapefrick_hlir::BrainHlir;
use tapefrick_mlir::{LoopError, LoopMap, Token};
use tapefrick_tape::Tape;
use tracing::trace;

use super::{ExecutionError, RunStats};

/// Walks a token sequence against a tape. Lives for a single run.
pub(crate) struct Machine<'a> {
	tape: &'a mut Tape,
	tokens: &'a [Token],
	loops: &'a LoopMap,
	input: &'a [u8],
	input_cursor: usize,
	position: usize,
	fuel: Option<u64>,
	stats: RunStats,
}

impl<'a> Machine<'a> {
	pub(crate) const fn new(
		tape: &'a mut Tape,
		tokens: &'a [Token],
		loops: &'a LoopMap,
		input: &'a [u8],
		fuel: Option<u64>,
	) -> Self {
		Self {
			tape,
			tokens,
			loops,
			input,
			input_cursor: 0,
			position: 0,
			fuel,
			stats: RunStats {
				steps: 0,
				bytes_read: 0,
				bytes_written: 0,
			},
		}
	}

	pub(crate) fn run<W>(mut self, output: &mut W) -> Result<RunStats, ExecutionError>
	where
		W: ?Sized + Write,
	{
		while self.position < self.tokens.len() {
			self.step(output)?;
		}

		Ok(self.stats)
	}

	fn step<W>(&mut self, output: &mut W) -> Result<(), ExecutionError>
	where
		W: ?Sized + Write,
	{
		let position = self.position;
		let token = self.tokens[position];

		self.burn_fuel()?;

		match token.op() {
			BrainHlir::IncrementCell => self.tape.add(token.count() as u64),
			BrainHlir::DecrementCell => self.tape.subtract(token.count() as u64),
			BrainHlir::MovePtrRight => self.tape.move_right(token.count()),
			BrainHlir::MovePtrLeft => self
				.tape
				.move_left(token.count())
				.map_err(|e| ExecutionError::tape(position, token.op(), e))?,
			BrainHlir::PutOutput => {
				output.write_all(&[self.tape.cell() as u8])?;
				self.stats.bytes_written += 1;
			}
			BrainHlir::GetInput => self.read_input(position)?,
			BrainHlir::StartLoop => {
				if matches!(self.tape.cell(), 0) {
					self.position = self.jump_target(position, LoopError::UnmatchedOpen)?;
				}
			}
			BrainHlir::EndLoop => {
				if !matches!(self.tape.cell(), 0) {
					self.position = self.jump_target(position, LoopError::UnmatchedClose)?;
				}
			}
		}

		self.position += 1;
		self.stats.steps += 1;

		Ok(())
	}

	fn burn_fuel(&mut self) -> Result<(), ExecutionError> {
		let Some(fuel) = &mut self.fuel else {
			return Ok(());
		};

		if matches!(*fuel, 0) {
			return Err(ExecutionError::FuelExhausted {
				position: self.position,
			});
		}

		*fuel -= 1;

		Ok(())
	}

	// exhausted input leaves the cell as it was
	fn read_input(&mut self, position: usize) -> Result<(), ExecutionError> {
		let Some(&byte) = self.input.get(self.input_cursor) else {
			trace!(position, "input exhausted");
			return Ok(());
		};

		self.tape
			.set_cell(u64::from(byte))
			.map_err(|e| ExecutionError::tape(position, BrainHlir::GetInput, e))?;

		self.input_cursor += 1;
		self.stats.bytes_read += 1;

		Ok(())
	}

	fn jump_target(
		&self,
		position: usize,
		unmatched: fn(usize) -> LoopError,
	) -> Result<usize, ExecutionError> {
		self.loops
			.get(position)
			.ok_or_else(|| ExecutionError::Loop(unmatched(position)))
	}
}
