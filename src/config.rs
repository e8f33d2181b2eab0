use serde::Deserialize;
use tapefrick_interpreter::{DEFAULT_CELL_WIDTH, Limits};

use super::Args;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
	pub cell_width: u32,
	pub fuel: Option<u64>,
	pub dump_tape: bool,
}

impl Config {
	/// Command line flags win over whatever the file set.
	#[must_use]
	pub fn merge_args(mut self, args: &Args) -> Self {
		if let Some(cell_width) = args.cell_width {
			self.cell_width = cell_width;
		}

		if args.fuel.is_some() {
			self.fuel = args.fuel;
		}

		self.dump_tape |= args.dump_tape;

		self
	}

	#[must_use]
	pub const fn limits(self) -> Limits {
		Limits { fuel: self.fuel }
	}
}

impl Default for Config {
	fn default() -> Self {
		Self {
			cell_width: DEFAULT_CELL_WIDTH,
			fuel: None,
			dump_tape: false,
		}
	}
}
