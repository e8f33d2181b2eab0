use std::io;

use tapefrick_interpreter::{ExecutionError, Interpreter, Limits};

const HELLO_WORLD: &str = "
	++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]
	>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.
";

// Prints the input back in reverse; stops reading at the first zero byte.
const REVERSE: &str = ">,[>,]<[.<]";

const STEP_CAP: usize = 1_000_000;

/// Runs one instruction at a time with no compaction, for comparison. [`None`] when the
/// program moves left of the tape or doesn't halt within [`STEP_CAP`] instructions.
fn run_uncompacted(source: &str, width: u32, input: &[u8]) -> Option<Vec<u8>> {
	let program = source
		.bytes()
		.filter(|b| b"+-<>.,[]".contains(b))
		.collect::<Vec<_>>();
	let mask = u64::MAX >> (64 - width);

	let mut cells = vec![0u64];
	let mut cursor = 0usize;
	let mut input = input.iter();
	let mut output = Vec::new();
	let mut pc = 0;
	let mut steps = 0;

	while pc < program.len() {
		steps += 1;
		if steps > STEP_CAP {
			return None;
		}

		match program[pc] {
			b'+' => cells[cursor] = cells[cursor].wrapping_add(1) & mask,
			b'-' => cells[cursor] = cells[cursor].wrapping_sub(1) & mask,
			b'>' => {
				cursor += 1;
				if cursor == cells.len() {
					cells.push(0);
				}
			}
			b'<' => cursor = cursor.checked_sub(1)?,
			b'.' => output.push(cells[cursor] as u8),
			b',' => {
				if let Some(&b) = input.next() {
					cells[cursor] = u64::from(b);
				}
			}
			b'[' if cells[cursor] == 0 => {
				let mut depth = 0;
				loop {
					match program[pc] {
						b'[' => depth += 1,
						b']' => depth -= 1,
						_ => {}
					}
					if depth == 0 {
						break;
					}
					pc += 1;
				}
			}
			b']' if cells[cursor] != 0 => {
				let mut depth = 0;
				loop {
					match program[pc] {
						b']' => depth += 1,
						b'[' => depth -= 1,
						_ => {}
					}
					if depth == 0 {
						break;
					}
					pc -= 1;
				}
			}
			_ => {}
		}

		pc += 1;
	}

	output.push(b'\n');

	Some(output)
}

#[test]
fn hello_world() -> Result<(), ExecutionError> {
	let mut output = Vec::new();

	Interpreter::default().execute(HELLO_WORLD, b"", &mut output)?;

	assert_eq!(output, b"Hello World!\n\n");

	Ok(())
}

#[test]
fn reverses_input() -> Result<(), ExecutionError> {
	let mut output = Vec::new();

	Interpreter::default().execute(REVERSE, b"stressed\0", &mut output)?;

	assert_eq!(output, b"desserts\n");

	Ok(())
}

#[test]
fn compaction_keeps_behaviour() -> Result<(), ExecutionError> {
	let programs: &[(&str, &[u8])] = &[
		(HELLO_WORLD, b""),
		(REVERSE, b"abc\0"),
		("++>+++++[<+>-]<.", b""),
		(",.,.,.", b"xy"),
		("--------[>+<++]>.", b""),
		("+++[>+++++<-]>[>++<-]>.<<.", b""),
		("-.>--.>>>---.<<<<.", b""),
		("++++[>++++<-]>[<++++>-]<.[-]++++++++++.", b""),
	];

	for width in [1, 4, 8, 12, 16, 32, 64] {
		let mut interpreter =
			Interpreter::with_limits(width, Limits::with_fuel(STEP_CAP as u64)).unwrap();

		for &(source, input) in programs {
			let Some(expected) = run_uncompacted(source, width, input) else {
				continue;
			};

			if input.iter().any(|&b| u64::from(b) > interpreter.tape().max_value()) {
				continue;
			}

			let mut output = Vec::new();
			interpreter.execute(source, input, &mut output)?;

			assert_eq!(output, expected, "width {width}, program {source:?}");
		}
	}

	Ok(())
}

#[test]
fn infinite_loop_is_bounded_by_fuel() {
	let mut interpreter = Interpreter::with_limits(8, Limits::with_fuel(100_000)).unwrap();
	let mut output = Vec::new();

	let err = interpreter.execute("+[]", b"", &mut output).unwrap_err();

	assert!(matches!(err, ExecutionError::FuelExhausted { .. }));
	assert!(matches!(err.position(), Some(1 | 2)));
	assert!(output.is_empty());
}

#[test]
fn instances_are_independent() -> Result<(), ExecutionError> {
	let mut narrow = Interpreter::new(1).unwrap();
	let mut wide = Interpreter::new(16).unwrap();

	narrow.execute("+++", b"", &mut io::sink())?;
	wide.execute("+++", b"", &mut io::sink())?;

	assert_eq!(narrow.tape().cells(), [1]);
	assert_eq!(wide.tape().cells(), [3]);

	Ok(())
}

#[test]
fn error_display() {
	let mut interpreter = Interpreter::default();

	let err = interpreter.execute("+<", b"", &mut io::sink()).unwrap_err();
	assert_eq!(err.to_string(), "instruction #1 (<) failed");
	assert_eq!(
		std::error::Error::source(&err).map(ToString::to_string),
		Some("cannot move left by 1 from cell 0: out of bounds".to_owned())
	);

	let err = interpreter.execute("]", b"", &mut io::sink()).unwrap_err();
	assert_eq!(err.to_string(), "program has unbalanced loops");
	assert_eq!(
		std::error::Error::source(&err).map(ToString::to_string),
		Some("loop ending at #0 has no beginning".to_owned())
	);
}
