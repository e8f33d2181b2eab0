use std::{fs, path::Path};

use color_eyre::{Result, eyre::WrapErr as _};
use ron::ser::PrettyConfig;
use serde::Serialize;
use tapefrick_mlir::{LoopMap, TokenStream};
use tracing::info;

#[derive(Debug, Serialize)]
struct EmittedTokens<'a> {
	tokens: &'a TokenStream,
	loops: Vec<(usize, usize)>,
}

/// Writes the tokens and their loop pairs to `<folder_path>/tokens.ron`.
///
/// Loops are only listed if they resolve. Unbalanced programs still get their tokens written,
/// the error is reported when the program runs.
#[tracing::instrument(skip(tokens))]
pub fn emit_tokens(tokens: &TokenStream, folder_path: &Path) -> Result<()> {
	let loops = LoopMap::resolve(tokens)
		.map(|loops| loops.pairs().collect::<Vec<_>>())
		.unwrap_or_default();

	let output = to_ron(&EmittedTokens { tokens, loops })?;

	fs::create_dir_all(folder_path)
		.wrap_err_with(|| format!("failed to create {}", folder_path.display()))?;

	let file_path = folder_path.join("tokens.ron");
	fs::write(&file_path, output)
		.wrap_err_with(|| format!("failed to write {}", file_path.display()))?;

	info!(path = %file_path.display(), "wrote tokens");

	Ok(())
}

fn to_ron<T: Serialize>(value: &T) -> Result<String> {
	let mut output = String::new();
	let mut serializer = ron::Serializer::with_options(
		&mut output,
		Some(PrettyConfig::new().separate_tuple_members(true)),
		&ron::Options::default(),
	)?;

	value.serialize(&mut serializer)?;

	drop(serializer);

	Ok(output)
}

#[cfg(test)]
mod tests {
	use color_eyre::Result;
	use tapefrick_mlir::tokenize;

	use super::{EmittedTokens, to_ron};

	#[test]
	fn lists_tokens_and_loops() -> Result<()> {
		let tokens = tokenize("++[>+<-]");
		let output = to_ron(&EmittedTokens {
			tokens: &tokens,
			loops: vec![(1, 6)],
		})?;

		assert!(output.contains("IncrementCell"));
		assert!(output.contains("StartLoop"));
		assert!(output.contains("count: 2"));
		assert!(output.contains("loops:"));

		Ok(())
	}
}
