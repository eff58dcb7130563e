/// Runtime value read from or written to by the copier.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Invalid or absent value.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar of any declared width.
	I64(i64),
	/// Unsigned integer scalar of any declared width.
	U64(u64),
	/// 32-bit float scalar.
	F32(f32),
	/// 64-bit float scalar.
	F64(f64),
	/// UTF-8 string.
	String(Box<str>),
	/// Pointer or optional; `None` is the null pointer.
	Ptr(Option<Box<Value>>),
	/// Collection elements.
	Array(Vec<Value>),
	/// Struct-shaped value.
	Struct(StructValue),
}

impl Value {
	/// Allocated pointer to `inner`.
	pub fn some(inner: Value) -> Self {
		Self::Ptr(Some(Box::new(inner)))
	}

	/// String value from any text.
	pub fn string(text: impl Into<String>) -> Self {
		Self::String(text.into().into_boxed_str())
	}

	/// Whether this is the invalid/absent marker.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Whether this is a null pointer.
	pub fn is_null_ptr(&self) -> bool {
		matches!(self, Self::Ptr(None))
	}

	/// Logical value kind for diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::I64(_) => "i64",
			Self::U64(_) => "u64",
			Self::F32(_) => "f32",
			Self::F64(_) => "f64",
			Self::String(_) => "string",
			Self::Ptr(_) => "ptr",
			Self::Array(_) => "array",
			Self::Struct(_) => "struct",
		}
	}

	/// Borrow the struct payload.
	pub fn as_struct(&self) -> Option<&StructValue> {
		match self {
			Self::Struct(item) => Some(item),
			_ => None,
		}
	}

	/// Mutably borrow the struct payload.
	pub fn as_struct_mut(&mut self) -> Option<&mut StructValue> {
		match self {
			Self::Struct(item) => Some(item),
			_ => None,
		}
	}
}

/// Struct value with field values in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
	/// Registered struct type name.
	pub type_name: Box<str>,
	/// One value per declared field.
	pub fields: Vec<FieldValue>,
}

/// Named field value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field identifier.
	pub name: Box<str>,
	/// Field payload.
	pub value: Value,
}

impl StructValue {
	/// Build a struct value from `(name, value)` pairs.
	pub fn new<'a>(type_name: &str, fields: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
		Self {
			type_name: type_name.into(),
			fields: fields
				.into_iter()
				.map(|(name, value)| FieldValue { name: name.into(), value })
				.collect(),
		}
	}

	/// Look up a field value by name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}

	/// Mutably look up a field value by name.
	pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
		self.fields.iter_mut().find(|field| field.name.as_ref() == name).map(|field| &mut field.value)
	}
}
