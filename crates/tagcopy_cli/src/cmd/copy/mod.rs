use std::path::PathBuf;

use tagcopy::copier::{CopyOptions, Copier, Type, Value};

use crate::bridge::{json_to_value, load_registry, read_json, value_to_json};
use crate::cmd::util::{SkipJson, emit_json};
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	#[arg(long = "from")]
	pub from_type: String,
	#[arg(long = "to")]
	pub to_type: String,
	#[arg(long)]
	pub input: PathBuf,
	#[arg(long)]
	pub into: Option<PathBuf>,
	#[arg(long)]
	pub strict: bool,
	#[arg(long)]
	pub report: bool,
}

/// Copy a JSON source value into a destination type and print the result.
pub fn run(args: Args) -> Result<()> {
	let Args {
		schema,
		from_type,
		to_type,
		input,
		into,
		strict,
		report,
	} = args;

	let registry = load_registry(&schema)?;
	let from_ty = Type::parse(&from_type)?;
	let to_ty = Type::parse(&to_type)?;

	let source = json_to_value(&registry, &read_json(&input)?, &from_ty)?;
	let dest = match &into {
		Some(path) => json_to_value(&registry, &read_json(path)?, &to_ty)?,
		None => registry.zero_value(&to_ty)?,
	};

	let to_label = to_ty.to_string();
	let mut target = Value::some(dest);
	let target_ty = Type::ptr(to_ty);
	let copy_report = Copier::new(&registry)
		.with_options(CopyOptions { strict })
		.copy(&mut target, &target_ty, &source, &from_ty)?;

	let value = value_to_json(&target);
	if report {
		let payload = CopyJson {
			from: from_ty.to_string(),
			to: to_label,
			value,
			skipped: copy_report.skipped.iter().map(SkipJson::from).collect(),
		};
		emit_json(&payload);
	} else {
		emit_json(&value);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct CopyJson {
	from: String,
	to: String,
	value: serde_json::Value,
	skipped: Vec<SkipJson>,
}

#[cfg(test)]
mod tests;
