use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use envtag::Loader;
use envtag::exec::{execute_command, resolve_command};
use envtag::mapper::format_line;

#[derive(Parser)]
#[command(name = "envtag")]
#[command(
	author,
	version,
	about = "Load .env files and run commands with the resulting environment"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Env file to load; repeat to load several, later files win [default: .env .env.local]
	#[arg(short, long = "file", value_name = "FILE", global = true)]
	files: Vec<PathBuf>,

	/// Directory relative file paths are resolved against
	#[arg(short = 'C', long, value_name = "DIR", global = true)]
	dir: Option<PathBuf>,

	/// Increase log verbosity (-v debug, -vv trace)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the merged variables in env file format
	Show {
		/// Annotate each variable with the file that set it
		#[arg(long)]
		sources: bool,
	},
	/// Run a command with the loaded variables in its environment
	Run {
		/// Command and arguments to run
		#[arg(
			required = true,
			trailing_var_arg = true,
			allow_hyphen_values = true,
			value_name = "COMMAND"
		)]
		args: Vec<String>,
	},
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
	let default_level = match verbose {
		0 => "warn",
		1 => "debug",
		_ => "trace",
	};

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
		.with(fmt::layer().with_writer(std::io::stderr))
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let base_dir = match cli.dir {
		Some(dir) => cwd.join(dir),
		None => cwd,
	};

	let loader = if cli.files.is_empty() {
		Loader::new()
	} else {
		Loader::with_filenames(cli.files)
	};
	let loader = loader.base_dir(&base_dir);

	match cli.command {
		Commands::Show { sources } => handle_show(&loader, sources),
		Commands::Run { args } => handle_run(&loader, &args, &base_dir),
	}
}

fn handle_show(loader: &Loader, sources: bool) -> Result<ExitCode> {
	for sourced in loader.merged() {
		let line = format_line(&sourced.entry.key, &sourced.entry.value);
		if sources {
			println!("{} # {}", line.trim_end(), sourced.source.display());
		} else {
			print!("{}", line);
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_run(loader: &Loader, args: &[String], cwd: &Path) -> Result<ExitCode> {
	let command_name = &args[0];
	let command_args = &args[1..];

	let binary_path = resolve_command(command_name, cwd)
		.ok_or_else(|| anyhow::anyhow!("Command not found: {}", command_name))?;

	let entries = loader.merged();
	let status = execute_command(&binary_path, command_args, cwd, &entries)
		.with_context(|| format!("Failed to execute: {}", binary_path.display()))?;

	let exit_code = status.code().unwrap_or(1);
	Ok(ExitCode::from(exit_code as u8))
}
