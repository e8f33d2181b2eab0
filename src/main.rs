mod args;
mod config;
mod emit;

use std::{
	fs,
	io::{self, BufRead, BufWriter},
	path::Path,
};

use clap::Parser as _;
use color_eyre::{Result, eyre::WrapErr as _};
use tapefrick_hlir::clean;
use tapefrick_interpreter::Interpreter;
use tapefrick_mlir::{BrainHlir, TokenStream, tokenize};
use tracing::debug;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
	EnvFilter,
	fmt::{self, format::FmtSpan},
	prelude::*,
};

use self::{args::Args, config::Config, emit::emit_tokens};

fn main() -> Result<()> {
	let args = Args::parse();

	install_tracing(args.log_level.as_deref(), args.log_dir.as_deref())?;
	color_eyre::install()?;

	let config = match &args.config {
		Some(path) => load_config(path)?,
		None => Config::default(),
	}
	.merge_args(&args);

	debug!(?config, "loaded config");

	let source = fs::read(&args.file_path)
		.wrap_err_with(|| format!("failed to read {}", args.file_path.display()))?;

	let tokens = tokenize_source(&source);

	if let Some(folder_path) = &args.emit_tokens {
		emit_tokens(&tokens, folder_path)?;
	}

	let input = collect_input(args.input.as_deref(), &tokens, io::stdin().lock())?;

	let mut interpreter = Interpreter::with_limits(config.cell_width, config.limits())
		.wrap_err("invalid cell width")?;

	let result = {
		let mut stdout = BufWriter::new(io::stdout().lock());

		interpreter.execute_tokens(&tokens, &input, &mut stdout)
	};

	if config.dump_tape {
		eprintln!("{}", interpreter.dump());
	}

	result.wrap_err_with(|| format!("failed to run {}", args.file_path.display()))?;

	Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.wrap_err_with(|| format!("failed to read config {}", path.display()))?;

	toml::from_str(&raw).wrap_err_with(|| format!("invalid config {}", path.display()))
}

// bytes that aren't utf-8 can only be comments
fn tokenize_source(source: &[u8]) -> TokenStream {
	tokenize(&clean(&String::from_utf8_lossy(source)))
}

// a program without `,` never blocks on stdin
fn collect_input<R>(
	input_path: Option<&Path>,
	tokens: &TokenStream,
	mut stdin: R,
) -> Result<Vec<u8>>
where
	R: BufRead,
{
	if let Some(path) = input_path {
		return fs::read(path).wrap_err_with(|| format!("failed to read input {}", path.display()));
	}

	if !tokens
		.iter()
		.any(|token| matches!(token.op(), BrainHlir::GetInput))
	{
		return Ok(Vec::new());
	}

	let mut line = Vec::new();
	stdin
		.read_until(b'\n', &mut line)
		.wrap_err("failed to read input from stdin")?;

	let len = strip_line_ending(&line).len();
	line.truncate(len);

	Ok(line)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
	line.strip_suffix(b"\n")
		.map_or(line, |line| line.strip_suffix(b"\r").unwrap_or(line))
}

fn install_tracing(log_level: Option<&str>, log_dir: Option<&Path>) -> Result<()> {
	let filter_layer = match log_level {
		Some(level) => EnvFilter::try_new(level)?,
		None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
	};

	let fmt_layer = fmt::layer()
		.with_target(false)
		.with_writer(io::stderr)
		.with_filter(filter_layer);

	let (file_layer, json_file_layer) = match log_dir {
		Some(log_dir) => {
			fs::create_dir_all(log_dir)?;

			let log_file = create_log_file(&log_dir.join("output.log"))?;
			let json_log_file = create_log_file(&log_dir.join("output.json"))?;

			let file_layer = fmt::layer().with_ansi(false).with_writer(log_file);

			let json_file_layer = fmt::layer()
				.with_ansi(false)
				.json()
				.flatten_event(true)
				.with_span_events(FmtSpan::FULL)
				.with_writer(json_log_file);

			(Some(file_layer), Some(json_file_layer))
		}
		None => (None, None),
	};

	tracing_subscriber::registry()
		.with(json_file_layer)
		.with(file_layer)
		.with(fmt_layer)
		.with(ErrorLayer::default())
		.try_init()?;

	Ok(())
}

fn create_log_file(path: &Path) -> Result<fs::File> {
	fs::OpenOptions::new()
		.create(true)
		.write(true)
		.truncate(true)
		.open(path)
		.wrap_err_with(|| format!("failed to create log file {}", path.display()))
}
