use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use tagcopy_testkit::{fixture_path, target_dir};

static TAGCOPY_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture_arg(name: &str) -> String {
	fixture_path(name).to_string_lossy().into_owned()
}

pub(crate) fn run_tagcopy(args: &[&str]) -> Output {
	Command::new(tagcopy_bin()).args(args).output().expect("tagcopy command executes")
}

pub(crate) fn run_tagcopy_json(args: &[&str]) -> serde_json::Value {
	let output = run_tagcopy(args);
	assert!(
		output.status.success(),
		"tagcopy command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

/// Run a command expected to fail and return its stderr.
pub(crate) fn run_tagcopy_failure(args: &[&str]) -> String {
	let output = run_tagcopy(args);
	assert!(!output.status.success(), "tagcopy {args:?} unexpectedly succeeded");
	assert_eq!(output.status.code(), Some(1));
	String::from_utf8_lossy(&output.stderr).into_owned()
}

fn tagcopy_bin() -> &'static PathBuf {
	TAGCOPY_BIN.get_or_init(resolve_tagcopy_bin)
}

fn resolve_tagcopy_bin() -> PathBuf {
	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let mut bin = target_dir().join("debug");
	bin.push(if cfg!(windows) { "tagcopy.exe" } else { "tagcopy" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "tagcopy"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build tagcopy binary at {}", bin.display());

	bin
}
