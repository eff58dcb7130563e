use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::copier::{CopyError, FieldValue, Result, ScanError, StructTag, StructValue, Type, Value};

/// Zero-argument accessor: reads one value from the receiver.
pub type AccessorFn = Arc<dyn Fn(&StructValue) -> Value + Send + Sync>;
/// One-argument mutator: writes into the receiver.
pub type MutatorFn = Arc<dyn Fn(&mut StructValue, Value) + Send + Sync>;
/// Scan hook accepting an arbitrary source value.
pub type ScanFn = Arc<dyn Fn(&mut StructValue, &Value) -> std::result::Result<(), ScanError> + Send + Sync>;

/// One declared struct field.
#[derive(Debug, Clone)]
pub struct FieldDecl {
	/// Field identifier.
	pub name: Box<str>,
	/// Declared field type.
	pub ty: Type,
	/// Raw struct tag text.
	pub tag: Box<str>,
	/// Anonymous field whose members are flattened into the owner.
	pub embedded: bool,
}

/// Callable shape of a declared method.
#[derive(Clone)]
pub enum MethodKind {
	/// Takes no argument and returns exactly one value.
	Accessor {
		/// Declared result type.
		returns: Type,
		/// Method body.
		call: AccessorFn,
	},
	/// Takes exactly one argument.
	Mutator {
		/// Declared parameter type.
		param: Type,
		/// Method body.
		call: MutatorFn,
	},
}

impl fmt::Debug for MethodKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Accessor { returns, .. } => f.debug_struct("Accessor").field("returns", returns).finish_non_exhaustive(),
			Self::Mutator { param, .. } => f.debug_struct("Mutator").field("param", param).finish_non_exhaustive(),
		}
	}
}

/// One declared method with its own struct tag.
#[derive(Debug, Clone)]
pub struct MethodDecl {
	/// Method identifier.
	pub name: Box<str>,
	/// Raw struct tag text used for tag matching.
	pub tag: Box<str>,
	/// Accessor or mutator body.
	pub kind: MethodKind,
}

/// Struct declaration: fields, methods, and an optional scan hook.
#[derive(Clone)]
pub struct StructDecl {
	/// Struct type name.
	pub name: Box<str>,
	/// Fields in declaration order.
	pub fields: Vec<FieldDecl>,
	/// Methods in declaration order.
	pub methods: Vec<MethodDecl>,
	/// Hook that lets this type absorb values of any type.
	pub scanner: Option<ScanFn>,
}

impl fmt::Debug for StructDecl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StructDecl")
			.field("name", &self.name)
			.field("fields", &self.fields)
			.field("methods", &self.methods)
			.field("scanner", &self.scanner.is_some())
			.finish()
	}
}

impl StructDecl {
	/// Start an empty declaration.
	pub fn new(name: &str) -> Self {
		Self {
			name: name.into(),
			fields: Vec::new(),
			methods: Vec::new(),
			scanner: None,
		}
	}

	/// Append a named field with a raw struct tag.
	pub fn field(mut self, name: &str, ty: Type, tag: &str) -> Self {
		self.fields.push(FieldDecl {
			name: name.into(),
			ty,
			tag: tag.into(),
			embedded: false,
		});
		self
	}

	/// Append an anonymous (embedded) struct field.
	pub fn embed(mut self, ty: Type) -> Self {
		let name = ty.base().to_string();
		self.fields.push(FieldDecl {
			name: name.into_boxed_str(),
			ty,
			tag: "".into(),
			embedded: true,
		});
		self
	}

	/// Append a zero-argument accessor method.
	pub fn accessor(mut self, name: &str, tag: &str, returns: Type, call: impl Fn(&StructValue) -> Value + Send + Sync + 'static) -> Self {
		self.methods.push(MethodDecl {
			name: name.into(),
			tag: tag.into(),
			kind: MethodKind::Accessor {
				returns,
				call: Arc::new(call),
			},
		});
		self
	}

	/// Append a one-argument mutator method.
	pub fn mutator(mut self, name: &str, tag: &str, param: Type, call: impl Fn(&mut StructValue, Value) + Send + Sync + 'static) -> Self {
		self.methods.push(MethodDecl {
			name: name.into(),
			tag: tag.into(),
			kind: MethodKind::Mutator {
				param,
				call: Arc::new(call),
			},
		});
		self
	}

	/// Install a scan hook.
	pub fn scanner(mut self, scan: impl Fn(&mut StructValue, &Value) -> std::result::Result<(), ScanError> + Send + Sync + 'static) -> Self {
		self.scanner = Some(Arc::new(scan));
		self
	}
}

/// Field reached through zero or more embedded structs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepField {
	/// Field indices from the outer struct down to the field.
	pub path: Vec<usize>,
	/// Field identifier.
	pub name: Box<str>,
	/// Resolved tag value for the registry tag key.
	pub tag: Box<str>,
	/// Declared field type.
	pub ty: Type,
}

/// Cached per-struct metadata computed once at build time.
#[derive(Debug)]
pub(crate) struct StructInfo {
	pub decl: StructDecl,
	pub field_tags: Vec<Box<str>>,
	pub method_tags: Vec<Box<str>>,
	pub deep: Vec<DeepField>,
}

/// Immutable set of struct declarations keyed by name.
#[derive(Debug)]
pub struct Registry {
	tag_key: Box<str>,
	structs: Vec<StructInfo>,
	by_name: HashMap<Box<str>, usize>,
}

/// Collects declarations and validates them into a [`Registry`].
#[derive(Debug)]
pub struct RegistryBuilder {
	tag_key: Box<str>,
	structs: Vec<StructDecl>,
}

impl Default for RegistryBuilder {
	fn default() -> Self {
		Self {
			tag_key: "json".into(),
			structs: Vec::new(),
		}
	}
}

impl RegistryBuilder {
	/// Select the struct tag key used for matching (default `json`).
	pub fn tag_key(mut self, key: &str) -> Self {
		self.tag_key = key.into();
		self
	}

	/// Add one struct declaration.
	pub fn add(mut self, decl: StructDecl) -> Self {
		self.structs.push(decl);
		self
	}

	/// Validate declarations and cache per-struct metadata.
	pub fn build(self) -> Result<Registry> {
		let RegistryBuilder { tag_key, structs } = self;

		let mut by_name = HashMap::with_capacity(structs.len());
		for (idx, decl) in structs.iter().enumerate() {
			if by_name.insert(decl.name.clone(), idx).is_some() {
				return Err(CopyError::DuplicateStruct { name: decl.name.to_string() });
			}
		}

		for decl in &structs {
			validate_decl(decl, &by_name)?;
		}
		reject_value_cycles(&structs, &by_name)?;

		let mut infos = Vec::with_capacity(structs.len());
		for decl in &structs {
			let field_tags = decl
				.fields
				.iter()
				.map(|field| resolve_tag(&field.tag, &tag_key))
				.collect::<Result<Vec<_>>>()?;
			let method_tags = decl
				.methods
				.iter()
				.map(|method| resolve_tag(&method.tag, &tag_key))
				.collect::<Result<Vec<_>>>()?;
			infos.push((field_tags, method_tags));
		}

		let mut registry = Registry {
			tag_key,
			structs: structs
				.into_iter()
				.zip(infos)
				.map(|(decl, (field_tags, method_tags))| StructInfo {
					decl,
					field_tags,
					method_tags,
					deep: Vec::new(),
				})
				.collect(),
			by_name,
		};

		for idx in 0..registry.structs.len() {
			let mut deep = Vec::new();
			let mut stack = vec![idx];
			registry.flatten(idx, &mut Vec::new(), &mut stack, &mut deep);
			registry.structs[idx].deep = deep;
		}

		Ok(registry)
	}
}

impl Registry {
	/// Start a new builder.
	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::default()
	}

	/// Struct tag key used for matching.
	pub fn tag_key(&self) -> &str {
		&self.tag_key
	}

	/// Iterate declarations in registration order.
	pub fn structs(&self) -> impl Iterator<Item = &StructDecl> {
		self.structs.iter().map(|info| &info.decl)
	}

	/// Look up a declaration by struct name.
	pub fn struct_by_name(&self, name: &str) -> Option<&StructDecl> {
		self.info(name).map(|info| &info.decl)
	}

	/// Fields of `name` flattened through embedded structs, depth-first.
	pub fn deep_fields(&self, name: &str) -> &[DeepField] {
		self.info(name).map(|info| info.deep.as_slice()).unwrap_or(&[])
	}

	/// Resolved tag of the first declared field of the base struct of `ty`.
	///
	/// Non-struct types yield the empty string.
	pub fn first_field_tag(&self, ty: &Type) -> &str {
		ty.base()
			.struct_name()
			.and_then(|name| self.info(name))
			.and_then(|info| info.field_tags.first())
			.map(|tag| tag.as_ref())
			.unwrap_or("")
	}

	/// Scan hook registered for a struct type.
	pub fn scanner(&self, ty: &Type) -> Option<&ScanFn> {
		ty.struct_name().and_then(|name| self.info(name)).and_then(|info| info.decl.scanner.as_ref())
	}

	/// Build the default value of `ty`.
	pub fn zero_value(&self, ty: &Type) -> Result<Value> {
		Ok(match ty {
			Type::Bool => Value::Bool(false),
			Type::I8 | Type::I16 | Type::I32 | Type::I64 => Value::I64(0),
			Type::U8 | Type::U16 | Type::U32 | Type::U64 => Value::U64(0),
			Type::F32 => Value::F32(0.0),
			Type::F64 => Value::F64(0.0),
			Type::String => Value::String("".into()),
			Type::Ptr(_) => Value::Ptr(None),
			Type::Slice(_) => Value::Array(Vec::new()),
			Type::Struct(name) => Value::Struct(self.zero_struct(name)?),
		})
	}

	/// Build the default value of a struct type.
	pub fn zero_struct(&self, name: &str) -> Result<StructValue> {
		let decl = self.struct_by_name(name).ok_or_else(|| CopyError::UnknownStruct { name: name.to_owned() })?;
		let mut fields = Vec::with_capacity(decl.fields.len());
		for field in &decl.fields {
			fields.push(FieldValue {
				name: field.name.clone(),
				value: self.zero_value(&field.ty)?,
			});
		}
		Ok(StructValue {
			type_name: decl.name.clone(),
			fields,
		})
	}

	/// Verify a struct value against its declaration.
	pub fn check_struct(&self, value: &StructValue) -> Result<&StructDecl> {
		let decl = self.struct_by_name(&value.type_name).ok_or_else(|| CopyError::UnknownStruct {
			name: value.type_name.to_string(),
		})?;
		if decl.fields.len() != value.fields.len() {
			return Err(CopyError::FieldCountMismatch {
				type_name: value.type_name.to_string(),
				expected: decl.fields.len(),
				found: value.fields.len(),
			});
		}
		Ok(decl)
	}

	pub(crate) fn info(&self, name: &str) -> Option<&StructInfo> {
		self.by_name.get(name).and_then(|idx| self.structs.get(*idx))
	}

	fn flatten(&self, idx: usize, prefix: &mut Vec<usize>, stack: &mut Vec<usize>, out: &mut Vec<DeepField>) {
		let info = &self.structs[idx];
		for (field_idx, field) in info.decl.fields.iter().enumerate() {
			prefix.push(field_idx);
			if field.embedded {
				let inner = field.ty.base().struct_name().and_then(|name| self.by_name.get(name)).copied();
				if let Some(inner) = inner.filter(|inner| !stack.contains(inner)) {
					stack.push(inner);
					self.flatten(inner, prefix, stack, out);
					stack.pop();
				}
			} else {
				out.push(DeepField {
					path: prefix.clone(),
					name: field.name.clone(),
					tag: info.field_tags[field_idx].clone(),
					ty: field.ty.clone(),
				});
			}
			prefix.pop();
		}
	}
}

fn resolve_tag(raw: &str, key: &str) -> Result<Box<str>> {
	Ok(StructTag::parse(raw)?.get(key).into())
}

fn validate_decl(decl: &StructDecl, by_name: &HashMap<Box<str>, usize>) -> Result<()> {
	let check = |ty: &Type| -> Result<()> {
		match ty.base().struct_name() {
			Some(name) if !by_name.contains_key(name) => Err(CopyError::UnknownStruct { name: name.to_owned() }),
			_ => Ok(()),
		}
	};

	for field in &decl.fields {
		check(&field.ty)?;
		if field.embedded {
			let embeddable = match &field.ty {
				Type::Struct(_) => true,
				Type::Ptr(inner) => inner.is_struct(),
				_ => false,
			};
			if !embeddable {
				return Err(CopyError::InvalidEmbed {
					owner: decl.name.to_string(),
					field: field.name.to_string(),
					ty: field.ty.to_string(),
				});
			}
		}
	}

	for method in &decl.methods {
		match &method.kind {
			MethodKind::Accessor { returns, .. } => check(returns)?,
			MethodKind::Mutator { param, .. } => check(param)?,
		}
	}

	Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
	Unvisited,
	Visiting,
	Done,
}

fn reject_value_cycles(structs: &[StructDecl], by_name: &HashMap<Box<str>, usize>) -> Result<()> {
	fn visit(idx: usize, structs: &[StructDecl], by_name: &HashMap<Box<str>, usize>, marks: &mut [Mark]) -> Result<()> {
		match marks[idx] {
			Mark::Done => return Ok(()),
			Mark::Visiting => {
				return Err(CopyError::RecursiveStruct {
					name: structs[idx].name.to_string(),
				});
			}
			Mark::Unvisited => {}
		}

		marks[idx] = Mark::Visiting;
		for field in &structs[idx].fields {
			if let Some(next) = field.ty.struct_name().and_then(|name| by_name.get(name)) {
				visit(*next, structs, by_name, marks)?;
			}
		}
		marks[idx] = Mark::Done;
		Ok(())
	}

	let mut marks = vec![Mark::Unvisited; structs.len()];
	for idx in 0..structs.len() {
		visit(idx, structs, by_name, &mut marks)?;
	}
	Ok(())
}
