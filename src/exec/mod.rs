//! Command execution for envtag.
//!
//! This module handles:
//! - Resolving a command name against PATH
//! - Running it with loaded variables added to its environment
//! - Exit status propagation with inherited stdio

use crate::collect::SourcedEntry;
use crate::error::{EnvtagError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Execute a command with `entries` layered over the inherited environment.
///
/// Entries override variables of the same name already present in the
/// parent environment.
pub fn execute_command(
	binary: &Path,
	args: &[String],
	cwd: &Path,
	entries: &[SourcedEntry],
) -> Result<ExitStatus> {
	let mut cmd = Command::new(binary);
	cmd.args(args)
		.current_dir(cwd)
		.stdin(Stdio::inherit())
		.stdout(Stdio::inherit())
		.stderr(Stdio::inherit())
		.envs(
			entries
				.iter()
				.map(|sourced| (&sourced.entry.key, &sourced.entry.value)),
		);

	tracing::debug!(
		command = %binary.display(),
		vars = entries.len(),
		"executing command with loaded environment"
	);

	let status = cmd.status().map_err(|source| {
		if source.kind() == std::io::ErrorKind::NotFound {
			EnvtagError::CommandNotFound {
				command: binary.to_string_lossy().to_string(),
			}
		} else {
			EnvtagError::CommandFailed {
				command: binary.to_string_lossy().to_string(),
				source,
			}
		}
	})?;

	Ok(status)
}

/// Resolve a command name to its full path.
///
/// Absolute paths are checked as-is. Relative paths containing a separator
/// are resolved against `cwd`, the directory the command will run in. Bare
/// names are searched for in PATH.
pub fn resolve_command(command: &str, cwd: &Path) -> Option<PathBuf> {
	let path = Path::new(command);

	if path.is_absolute() {
		return path.exists().then(|| path.to_path_buf());
	}

	if path.components().count() > 1 {
		let full_path = cwd.join(path);
		return full_path.exists().then_some(full_path);
	}

	let path_var = std::env::var_os("PATH")?;
	std::env::split_paths(&path_var)
		.map(|dir| dir.join(command))
		.find(|full_path| full_path.is_file())
}
