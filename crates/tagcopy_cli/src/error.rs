use std::path::PathBuf;

use tagcopy::copier::CopyError;
use thiserror::Error;

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Input file could not be read.
	#[error("failed to read {}: {source}", .path.display())]
	Io {
		/// File being read.
		path: PathBuf,
		/// Underlying I/O error.
		source: std::io::Error,
	},
	/// Input file is not valid JSON for its role.
	#[error("invalid json in {}: {source}", .path.display())]
	Json {
		/// File being parsed.
		path: PathBuf,
		/// Underlying parse error.
		source: serde_json::Error,
	},
	/// Registry build or copy failure.
	#[error(transparent)]
	Copy(#[from] CopyError),
}
