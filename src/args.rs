use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
	pub file_path: PathBuf,
	/// Bits per tape cell, 1 to 64.
	#[arg(short = 'b', long)]
	pub cell_width: Option<u32>,
	/// Read program input from this file instead of a line of stdin.
	#[arg(short, long)]
	pub input: Option<PathBuf>,
	/// Stop after executing this many instructions.
	#[arg(long)]
	pub fuel: Option<u64>,
	/// Print the tape to stderr once the program stops.
	#[arg(long)]
	pub dump_tape: bool,
	/// Write the compacted instructions to `tokens.ron` in this directory.
	#[arg(long)]
	pub emit_tokens: Option<PathBuf>,
	#[arg(long)]
	pub config: Option<PathBuf>,
	/// Log filter, overrides `RUST_LOG`.
	#[arg(long)]
	pub log_level: Option<String>,
	/// Also write plain text and JSON logs to this directory.
	#[arg(long)]
	pub log_dir: Option<PathBuf>,
}
