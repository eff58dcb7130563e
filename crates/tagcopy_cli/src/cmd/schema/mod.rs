use std::path::PathBuf;

use tagcopy::copier::{CopyError, DeepField, Type};

use crate::bridge::load_registry;
use crate::cmd::util::emit_json;
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	#[arg(long = "struct")]
	pub struct_name: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// Print registered structs with their fields flattened through embeds.
pub fn run(args: Args) -> Result<()> {
	let Args { schema, struct_name, json } = args;

	let registry = load_registry(&schema)?;
	let names: Vec<&str> = match &struct_name {
		Some(name) => {
			let decl = registry.struct_by_name(name).ok_or_else(|| CopyError::UnknownStruct { name: name.clone() })?;
			vec![&*decl.name]
		}
		None => registry.structs().map(|decl| &*decl.name).collect(),
	};

	if json {
		let payload = SchemaJson {
			tag_key: registry.tag_key().to_owned(),
			structs: names
				.iter()
				.map(|name| StructJson {
					name: (*name).to_owned(),
					first_tag: registry.first_field_tag(&Type::named(name)).to_owned(),
					fields: registry.deep_fields(name).iter().map(field_to_json).collect(),
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("tag_key: {}", registry.tag_key());
	for name in names {
		println!();
		println!("struct {name}");
		println!("tag\ttype\tname\tpath");
		for field in registry.deep_fields(name) {
			let tag = if field.tag.is_empty() { "-" } else { &*field.tag };
			println!("{}\t{}\t{}\t{}", tag, field.ty, field.name, render_path(&field.path));
		}
	}

	Ok(())
}

fn render_path(path: &[usize]) -> String {
	path.iter().map(usize::to_string).collect::<Vec<_>>().join(".")
}

fn field_to_json(field: &DeepField) -> FieldJson {
	FieldJson {
		name: field.name.to_string(),
		tag: field.tag.to_string(),
		ty: field.ty.to_string(),
		path: field.path.clone(),
	}
}

#[derive(serde::Serialize)]
struct SchemaJson {
	tag_key: String,
	structs: Vec<StructJson>,
}

#[derive(serde::Serialize)]
struct StructJson {
	name: String,
	first_tag: String,
	fields: Vec<FieldJson>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	tag: String,
	#[serde(rename = "type")]
	ty: String,
	path: Vec<usize>,
}
