use std::path::Path;

use serde_json::{Map, Number};
use tagcopy::copier::{CopyError, Registry, StructDecl, Type, Value};

use crate::error::{CliError, Result};

/// On-disk registry description.
#[derive(serde::Deserialize)]
pub(crate) struct SchemaFile {
	#[serde(default = "default_tag_key")]
	pub tag_key: String,
	pub structs: Vec<StructJson>,
}

#[derive(serde::Deserialize)]
pub(crate) struct StructJson {
	pub name: String,
	#[serde(default)]
	pub fields: Vec<FieldJson>,
}

#[derive(serde::Deserialize)]
pub(crate) struct FieldJson {
	#[serde(default)]
	pub name: String,
	#[serde(rename = "type")]
	pub ty: String,
	#[serde(default)]
	pub tag: String,
	#[serde(default)]
	pub embedded: bool,
}

fn default_tag_key() -> String {
	"json".to_owned()
}

impl SchemaFile {
	/// Convert declarations into a validated registry.
	pub(crate) fn into_registry(self) -> Result<Registry> {
		let mut builder = Registry::builder().tag_key(&self.tag_key);
		for item in self.structs {
			let mut decl = StructDecl::new(&item.name);
			for field in item.fields {
				let ty = Type::parse(&field.ty)?;
				decl = if field.embedded { decl.embed(ty) } else { decl.field(&field.name, ty, &field.tag) };
			}
			builder = builder.add(decl);
		}
		Ok(builder.build()?)
	}
}

/// Read a schema file and build its registry.
pub(crate) fn load_registry(path: &Path) -> Result<Registry> {
	let schema: SchemaFile = read_json_as(path)?;
	schema.into_registry()
}

/// Read a JSON document from disk.
pub(crate) fn read_json(path: &Path) -> Result<serde_json::Value> {
	read_json_as(path)
}

fn read_json_as<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
	let bytes = std::fs::read(path).map_err(|source| CliError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	serde_json::from_slice(&bytes).map_err(|source| CliError::Json {
		path: path.to_path_buf(),
		source,
	})
}

/// Build a copier value from JSON, guided by the declared type.
///
/// Missing struct members take their zero value; unknown members are ignored.
pub(crate) fn json_to_value(registry: &Registry, json: &serde_json::Value, ty: &Type) -> Result<Value> {
	use serde_json::Value as Json;

	let value = match (ty, json) {
		(Type::Ptr(_), Json::Null) => Value::Ptr(None),
		(_, Json::Null) => Value::Null,
		(Type::Ptr(inner), _) => Value::some(json_to_value(registry, json, inner)?),
		(Type::Bool, Json::Bool(item)) => Value::Bool(*item),
		(Type::I8 | Type::I16 | Type::I32 | Type::I64, Json::Number(item)) => match item.as_i64().filter(|item| fits_signed(ty, *item)) {
			Some(item) => Value::I64(item),
			None => return Err(json_mismatch(ty, json)),
		},
		(Type::U8 | Type::U16 | Type::U32 | Type::U64, Json::Number(item)) => match item.as_u64().filter(|item| fits_unsigned(ty, *item)) {
			Some(item) => Value::U64(item),
			None => return Err(json_mismatch(ty, json)),
		},
		(Type::F32, Json::Number(item)) => match item.as_f64() {
			Some(item) => Value::F32(item as f32),
			None => return Err(json_mismatch(ty, json)),
		},
		(Type::F64, Json::Number(item)) => match item.as_f64() {
			Some(item) => Value::F64(item),
			None => return Err(json_mismatch(ty, json)),
		},
		(Type::String, Json::String(item)) => Value::string(item.as_str()),
		(Type::Slice(inner), Json::Array(items)) => Value::Array(
			items
				.iter()
				.map(|item| json_to_value(registry, item, inner))
				.collect::<Result<Vec<_>>>()?,
		),
		(Type::Struct(name), Json::Object(members)) => {
			let decl = registry.struct_by_name(name).ok_or_else(|| CopyError::UnknownStruct { name: name.to_string() })?;
			let mut item = registry.zero_struct(name)?;
			for (field, slot) in decl.fields.iter().zip(item.fields.iter_mut()) {
				if let Some(member) = members.get(&*field.name) {
					slot.value = json_to_value(registry, member, &field.ty)?;
				}
			}
			Value::Struct(item)
		}
		_ => return Err(json_mismatch(ty, json)),
	};
	Ok(value)
}

/// Render a copier value as JSON; structs become objects keyed by field name.
pub(crate) fn value_to_json(value: &Value) -> serde_json::Value {
	use serde_json::Value as Json;

	match value {
		Value::Null | Value::Ptr(None) => Json::Null,
		Value::Bool(item) => Json::Bool(*item),
		Value::I64(item) => Json::from(*item),
		Value::U64(item) => Json::from(*item),
		Value::F32(item) => float_json(item.to_string().parse().unwrap_or(f64::from(*item))),
		Value::F64(item) => float_json(*item),
		Value::String(item) => Json::String(item.to_string()),
		Value::Ptr(Some(inner)) => value_to_json(inner),
		Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
		Value::Struct(item) => {
			let mut members = Map::new();
			for field in &item.fields {
				members.insert(field.name.to_string(), value_to_json(&field.value));
			}
			Json::Object(members)
		}
	}
}

fn fits_signed(ty: &Type, item: i64) -> bool {
	match ty {
		Type::I8 => i8::try_from(item).is_ok(),
		Type::I16 => i16::try_from(item).is_ok(),
		Type::I32 => i32::try_from(item).is_ok(),
		_ => true,
	}
}

fn fits_unsigned(ty: &Type, item: u64) -> bool {
	match ty {
		Type::U8 => u8::try_from(item).is_ok(),
		Type::U16 => u16::try_from(item).is_ok(),
		Type::U32 => u32::try_from(item).is_ok(),
		_ => true,
	}
}

fn float_json(value: f64) -> serde_json::Value {
	Number::from_f64(value).map(serde_json::Value::Number).unwrap_or(serde_json::Value::Null)
}

fn json_mismatch(ty: &Type, json: &serde_json::Value) -> CliError {
	let found = match json {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "bool",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	};
	CliError::Copy(CopyError::ShapeMismatch {
		expected: ty.to_string(),
		found,
	})
}
