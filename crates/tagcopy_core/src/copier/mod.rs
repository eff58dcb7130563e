mod assign;
mod engine;
mod error;
mod normalize;
mod report;
mod resolve;
mod schema;
mod tag;
mod ty;
mod value;

/// Copy engine entry points and options.
pub use engine::{CopyOptions, Copier, copy};
/// Error and result aliases.
pub use error::{CopyError, Result, ScanError};
/// Pointer/collection unwrapping helpers.
pub use normalize::{indirect, indirect_mut};
/// Skip diagnostics collected during a copy.
pub use report::{CopyReport, Skip, SkipReason};
/// Tag-based field and method lookup.
pub use resolve::{field_by_tag, field_path_by_tag, method_by_tag};
/// Runtime type registry and declarations.
pub use schema::{AccessorFn, DeepField, FieldDecl, MethodDecl, MethodKind, MutatorFn, Registry, RegistryBuilder, ScanFn, StructDecl};
/// Struct tag parsing (`key:"value"` pairs).
pub use tag::StructTag;
/// Declared type model.
pub use ty::Type;
/// Dynamic value tree.
pub use value::{FieldValue, StructValue, Value};
