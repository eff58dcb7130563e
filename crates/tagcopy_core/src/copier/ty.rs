use std::fmt;

use crate::copier::{CopyError, Result};

/// Declared type of a field, method parameter, or top-level value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
	/// Boolean scalar.
	Bool,
	/// Signed 8-bit integer.
	I8,
	/// Signed 16-bit integer.
	I16,
	/// Signed 32-bit integer.
	I32,
	/// Signed 64-bit integer.
	I64,
	/// Unsigned 8-bit integer.
	U8,
	/// Unsigned 16-bit integer.
	U16,
	/// Unsigned 32-bit integer.
	U32,
	/// Unsigned 64-bit integer.
	U64,
	/// 32-bit float.
	F32,
	/// 64-bit float.
	F64,
	/// UTF-8 string.
	String,
	/// Pointer or optional wrapper.
	Ptr(Box<Type>),
	/// Growable collection.
	Slice(Box<Type>),
	/// Registered struct, referenced by name.
	Struct(Box<str>),
}

impl Type {
	/// Shorthand for `Type::Ptr`.
	pub fn ptr(inner: Type) -> Self {
		Self::Ptr(Box::new(inner))
	}

	/// Shorthand for `Type::Slice`.
	pub fn slice(inner: Type) -> Self {
		Self::Slice(Box::new(inner))
	}

	/// Shorthand for `Type::Struct`.
	pub fn named(name: &str) -> Self {
		Self::Struct(name.into())
	}

	/// Strip every pointer and collection layer.
	pub fn base(&self) -> &Type {
		let mut ty = self;
		while let Self::Ptr(inner) | Self::Slice(inner) = ty {
			ty = inner;
		}
		ty
	}

	/// Struct name when this type is a struct.
	pub fn struct_name(&self) -> Option<&str> {
		match self {
			Self::Struct(name) => Some(name),
			_ => None,
		}
	}

	/// Whether the type is a struct.
	pub fn is_struct(&self) -> bool {
		matches!(self, Self::Struct(_))
	}

	/// Whether the type is an integer or float.
	pub fn is_numeric(&self) -> bool {
		matches!(
			self,
			Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::F32 | Self::F64
		)
	}

	/// Whether a value of this type may be stored unchanged in `target`.
	pub fn assignable_to(&self, target: &Type) -> bool {
		self == target
	}

	/// Whether a value of this type may be converted into `target`.
	///
	/// Identical types always convert; numeric kinds convert among each other
	/// with truncating casts.
	pub fn convertible_to(&self, target: &Type) -> bool {
		self == target || (self.is_numeric() && target.is_numeric())
	}

	/// Parse compact type syntax such as `Vec<Option<User>>` or `i64`.
	pub fn parse(input: &str) -> Result<Self> {
		let mut parser = Parser { input, pos: 0 };
		let ty = parser.parse_type()?;
		parser.skip_ws();
		if parser.pos != input.len() {
			return Err(CopyError::InvalidType { input: input.to_owned() });
		}
		Ok(ty)
	}

	fn keyword(name: &str) -> Option<Self> {
		Some(match name {
			"bool" => Self::Bool,
			"i8" => Self::I8,
			"i16" => Self::I16,
			"i32" => Self::I32,
			"i64" => Self::I64,
			"u8" => Self::U8,
			"u16" => Self::U16,
			"u32" => Self::U32,
			"u64" => Self::U64,
			"f32" => Self::F32,
			"f64" => Self::F64,
			"string" => Self::String,
			_ => return None,
		})
	}
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool => f.write_str("bool"),
			Self::I8 => f.write_str("i8"),
			Self::I16 => f.write_str("i16"),
			Self::I32 => f.write_str("i32"),
			Self::I64 => f.write_str("i64"),
			Self::U8 => f.write_str("u8"),
			Self::U16 => f.write_str("u16"),
			Self::U32 => f.write_str("u32"),
			Self::U64 => f.write_str("u64"),
			Self::F32 => f.write_str("f32"),
			Self::F64 => f.write_str("f64"),
			Self::String => f.write_str("string"),
			Self::Ptr(inner) => write!(f, "Option<{inner}>"),
			Self::Slice(inner) => write!(f, "Vec<{inner}>"),
			Self::Struct(name) => f.write_str(name),
		}
	}
}

struct Parser<'a> {
	input: &'a str,
	pos: usize,
}

impl<'a> Parser<'a> {
	fn parse_type(&mut self) -> Result<Type> {
		self.skip_ws();
		let ident = self.ident()?;
		match ident {
			"Option" | "Vec" => {
				self.expect(b'<')?;
				let inner = self.parse_type()?;
				self.expect(b'>')?;
				Ok(if ident == "Option" { Type::ptr(inner) } else { Type::slice(inner) })
			}
			_ => Ok(Type::keyword(ident).unwrap_or_else(|| Type::named(ident))),
		}
	}

	fn ident(&mut self) -> Result<&'a str> {
		let input = self.input;
		let bytes = input.as_bytes();
		let start = self.pos;
		while self.pos < bytes.len() && (bytes[self.pos].is_ascii_alphanumeric() || bytes[self.pos] == b'_') {
			self.pos += 1;
		}
		if self.pos == start || bytes[start].is_ascii_digit() {
			return Err(self.error());
		}
		Ok(&input[start..self.pos])
	}

	fn expect(&mut self, byte: u8) -> Result<()> {
		self.skip_ws();
		if self.input.as_bytes().get(self.pos) != Some(&byte) {
			return Err(self.error());
		}
		self.pos += 1;
		Ok(())
	}

	fn skip_ws(&mut self) {
		let bytes = self.input.as_bytes();
		while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
			self.pos += 1;
		}
	}

	fn error(&self) -> CopyError {
		CopyError::InvalidType {
			input: self.input.to_owned(),
		}
	}
}
