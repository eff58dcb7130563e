use tagcopy::copier::Skip;

/// Print a payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to encode json output: {err}"),
	}
}

/// One skipped copy step as emitted by the CLI.
#[derive(serde::Serialize)]
pub(crate) struct SkipJson {
	pub path: String,
	pub tag: String,
	pub reason: &'static str,
}

impl From<&Skip> for SkipJson {
	fn from(skip: &Skip) -> Self {
		Self {
			path: skip.path.clone(),
			tag: skip.tag.to_string(),
			reason: skip.reason.as_str(),
		}
	}
}
