use thiserror::Error;

use crate::copier::Skip;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CopyError>;

/// Errors produced while building a registry or copying values.
///
/// Only structural problems surface here. Tag and type mismatches between
/// source and destination are skipped and collected in
/// [`CopyReport`](crate::copier::CopyReport) instead.
#[derive(Debug, Error)]
pub enum CopyError {
	/// Destination is not a non-null pointer.
	#[error("copy to value is unaddressable")]
	UnaddressableDestination,
	/// Value shape disagrees with its declared type.
	#[error("value shape mismatch: expected {expected}, got {found}")]
	ShapeMismatch {
		/// Declared type rendering.
		expected: String,
		/// Logical kind of the offending value.
		found: &'static str,
	},
	/// Struct type name is not registered.
	#[error("unknown struct type: {name}")]
	UnknownStruct {
		/// Requested struct name.
		name: String,
	},
	/// Struct value field count differs from its declaration.
	#[error("struct {type_name} has {found} field values, declared {expected}")]
	FieldCountMismatch {
		/// Struct type name.
		type_name: String,
		/// Declared field count.
		expected: usize,
		/// Field values present.
		found: usize,
	},
	/// Two declarations share one struct name.
	#[error("duplicate struct declaration: {name}")]
	DuplicateStruct {
		/// Duplicated struct name.
		name: String,
	},
	/// Embedded field is not a struct or pointer to struct.
	#[error("embedded field {field} on {owner} must be a struct, got {ty}")]
	InvalidEmbed {
		/// Declaring struct name.
		owner: String,
		/// Embedded field name.
		field: String,
		/// Rendered field type.
		ty: String,
	},
	/// Struct contains itself by value.
	#[error("struct {name} contains itself by value")]
	RecursiveStruct {
		/// Struct participating in the cycle.
		name: String,
	},
	/// Struct tag text could not be parsed.
	#[error("invalid struct tag: {raw:?}")]
	InvalidTag {
		/// Original tag text.
		raw: String,
	},
	/// Type expression could not be parsed.
	#[error("invalid type expression: {input:?}")]
	InvalidType {
		/// Original type text.
		input: String,
	},
	/// Strict copy left fields uncopied.
	#[error("copy incomplete: {count} skipped, first at {} ({})", .first.path, .first.reason)]
	Incomplete {
		/// Number of recorded skips.
		count: usize,
		/// First recorded skip.
		first: Box<Skip>,
	},
}

/// Failure reported by a destination scanner hook.
#[derive(Debug, Clone, Error)]
#[error("scan failed: {message}")]
pub struct ScanError {
	/// Human-readable reason.
	pub message: String,
}

impl ScanError {
	/// Create a scan error with a message.
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}
}
