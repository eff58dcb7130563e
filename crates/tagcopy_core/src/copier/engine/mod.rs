use log::{debug, trace};

use crate::copier::assign::assign;
use crate::copier::normalize::{field_at, field_at_mut, indirect_alloc, shape_mismatch};
use crate::copier::{
	CopyError, CopyReport, MethodKind, Registry, Result, Skip, SkipReason, StructValue, Type, Value, field_path_by_tag, indirect, indirect_mut,
	method_by_tag,
};

/// Behavior switches for one copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyOptions {
	/// Fail with [`CopyError::Incomplete`] when anything was skipped.
	///
	/// The copy still runs to completion first; nothing is rolled back.
	pub strict: bool,
}

/// Tag-driven copier bound to one registry.
///
/// Holds no per-call state, so one copier may serve concurrent copies.
#[derive(Debug, Clone, Copy)]
pub struct Copier<'r> {
	registry: &'r Registry,
	options: CopyOptions,
}

impl<'r> Copier<'r> {
	/// Create a best-effort copier.
	pub fn new(registry: &'r Registry) -> Self {
		Self {
			registry,
			options: CopyOptions::default(),
		}
	}

	/// Replace copy options.
	pub fn with_options(mut self, options: CopyOptions) -> Self {
		self.options = options;
		self
	}

	/// Copy tag-matched fields of `from` into `to`.
	///
	/// `to` must be a non-null pointer (`to_ty` a `Type::Ptr`). An absent
	/// source is a successful no-op. Mismatches are skipped and listed in the
	/// returned report.
	pub fn copy(&self, to: &mut Value, to_ty: &Type, from: &Value, from_ty: &Type) -> Result<CopyReport> {
		if !matches!(to_ty, Type::Ptr(_)) {
			return Err(CopyError::UnaddressableDestination);
		}
		let Some((to, to_ty)) = indirect_mut(to, to_ty)? else {
			return Err(CopyError::UnaddressableDestination);
		};

		let mut run = Run {
			registry: self.registry,
			report: CopyReport::default(),
			path: Vec::new(),
		};
		run.copy_value(to, to_ty, from, from_ty, true)?;

		let report = run.report;
		debug!("copied {from_ty} into {to_ty}: {} skipped", report.skipped.len());
		if self.options.strict {
			if let Some(first) = report.skipped.first() {
				return Err(CopyError::Incomplete {
					count: report.skipped.len(),
					first: Box::new(first.clone()),
				});
			}
		}
		Ok(report)
	}
}

/// Copy with default options; see [`Copier::copy`].
pub fn copy(registry: &Registry, to: &mut Value, to_ty: &Type, from: &Value, from_ty: &Type) -> Result<CopyReport> {
	Copier::new(registry).copy(to, to_ty, from, from_ty)
}

/// State of one top-level copy call.
struct Run<'r> {
	registry: &'r Registry,
	report: CopyReport,
	path: Vec<String>,
}

impl Run<'_> {
	fn copy_value(&mut self, to: &mut Value, to_ty: &Type, from: &Value, from_ty: &Type, parent_gate: bool) -> Result<()> {
		let Some((from, from_ty)) = indirect(from, from_ty)? else {
			trace!("source absent at {}", self.render_path());
			return Ok(());
		};

		let gate = parent_gate && self.level_gate(to_ty, from_ty);
		if gate || !(to.is_null_ptr() || to.is_null()) {
			let (to, to_ty) = indirect_alloc(self.registry, to, to_ty)?;
			return self.copy_resolved(to, to_ty, from, from_ty, gate);
		}

		// Closed gate over an absent destination: mutators still need a value,
		// but the allocation only stays when something was written into it.
		let original = to.clone();
		let written = {
			let (inner, inner_ty) = indirect_alloc(self.registry, to, to_ty)?;
			let untouched = inner.clone();
			self.copy_resolved(inner, inner_ty, from, from_ty, gate)?;
			*inner != untouched
		};
		if !written {
			trace!("nothing written at {}, destination stays absent", self.render_path());
			*to = original;
		}
		Ok(())
	}

	/// Tag comparison for one level. Only struct pairs take part.
	fn level_gate(&self, to_ty: &Type, from_ty: &Type) -> bool {
		if !(to_ty.base().is_struct() && from_ty.base().is_struct()) {
			return true;
		}
		self.registry.first_field_tag(to_ty) == self.registry.first_field_tag(from_ty)
	}

	fn copy_resolved(&mut self, to: &mut Value, to_ty: &Type, from: &Value, from_ty: &Type, gate: bool) -> Result<()> {
		let from_base = from_ty.base();
		if !from_base.is_struct() && from_ty.assignable_to(to_ty) && gate {
			*to = from.clone();
			return Ok(());
		}

		let (Some(to_name), Some(_)) = (to_ty.base().struct_name(), from_base.struct_name()) else {
			let reason = if !gate {
				SkipReason::TagGateClosed
			} else if !from_base.is_struct() {
				SkipReason::Unconvertible
			} else {
				SkipReason::NotStructural
			};
			self.skip_here(reason);
			return Ok(());
		};

		match (to, to_ty) {
			(Value::Array(items), Type::Slice(elem_ty)) => self.copy_elements(items, elem_ty, to_name, from, from_ty, gate),
			(Value::Struct(target), Type::Struct(_)) => match from {
				Value::Struct(source) => self.copy_struct(target, source, gate),
				Value::Array(_) => {
					self.skip_here(SkipReason::NotStructural);
					Ok(())
				}
				other => Err(shape_mismatch(from_ty, other)),
			},
			(other, _) => Err(shape_mismatch(to_ty, other)),
		}
	}

	fn copy_elements(&mut self, items: &mut Vec<Value>, elem_ty: &Type, to_name: &str, from: &Value, from_ty: &Type, gate: bool) -> Result<()> {
		let sources: Vec<(&Value, &Type)> = match (from, from_ty) {
			(Value::Array(values), Type::Slice(source_ty)) => values.iter().map(|value| (value, &**source_ty)).collect(),
			(Value::Array(_), _) | (_, Type::Slice(_)) => return Err(shape_mismatch(from_ty, from)),
			_ => vec![(from, from_ty)],
		};

		for (idx, (item, item_ty)) in sources.into_iter().enumerate() {
			self.path.push(format!("[{idx}]"));
			let mut element = self.registry.zero_struct(to_name)?;
			match indirect(item, item_ty)? {
				Some((Value::Struct(source), _)) => self.copy_struct(&mut element, source, gate)?,
				Some(_) => self.skip_here(SkipReason::NotStructural),
				None => trace!("null source element at {}", self.render_path()),
			}

			match elem_ty {
				Type::Struct(name) if name.as_ref() == to_name => items.push(Value::Struct(element)),
				Type::Ptr(inner) if inner.struct_name() == Some(to_name) => items.push(Value::some(Value::Struct(element))),
				_ => self.skip_here(SkipReason::ElementDropped),
			}
			self.path.pop();
		}
		Ok(())
	}

	fn copy_struct(&mut self, target: &mut StructValue, source: &StructValue, gate: bool) -> Result<()> {
		let registry = self.registry;
		registry.check_struct(source)?;
		registry.check_struct(target)?;
		let source_ty = Type::Struct(source.type_name.clone());
		let target_ty = Type::Struct(target.type_name.clone());

		for field in registry.deep_fields(&source.type_name) {
			if field.tag.is_empty() {
				continue;
			}
			let Some(source_field) = field_path_by_tag(registry, &source_ty, &field.tag) else {
				continue;
			};
			let Some(source_value) = field_at(source, &source_field.path) else {
				continue;
			};

			self.path.push(field.tag.to_string());
			match field_path_by_tag(registry, &target_ty, &field.tag) {
				Some(target_field) if !gate && field_at(target, &target_field.path).is_none() => {
					self.skip_here(SkipReason::TagGateClosed);
				}
				Some(target_field) => {
					if let Some(target_value) = field_at_mut(registry, target, &target_field.path)? {
						if !assign(registry, gate, target_value, &target_field.ty, source_value, &source_field.ty) {
							trace!("recurse into {}", self.render_path());
							self.copy_value(target_value, &target_field.ty, source_value, &source_field.ty, gate)?;
						}
					}
				}
				None => self.call_mutator(target, &target_ty, &field.tag, source_value, &source_field.ty),
			}
			self.path.pop();
		}

		for field in registry.deep_fields(&target.type_name) {
			if field.tag.is_empty() {
				continue;
			}
			let Some(method) = method_by_tag(registry, &source_ty, &field.tag) else {
				continue;
			};
			let MethodKind::Accessor { returns, call } = &method.kind else {
				continue;
			};
			let Some(target_field) = field_path_by_tag(registry, &target_ty, &field.tag) else {
				continue;
			};

			self.path.push(field.tag.to_string());
			if !gate && field_at(target, &target_field.path).is_none() {
				self.skip_here(SkipReason::TagGateClosed);
				self.path.pop();
				continue;
			}
			let value = call(source);
			trace!("accessor {} feeds {}", method.name, self.render_path());
			if let Some(target_value) = field_at_mut(registry, target, &target_field.path)? {
				if !assign(registry, gate, target_value, &target_field.ty, &value, returns) {
					self.skip_here(if gate { SkipReason::Unconvertible } else { SkipReason::TagGateClosed });
				}
			}
			self.path.pop();
		}

		Ok(())
	}

	fn call_mutator(&mut self, target: &mut StructValue, target_ty: &Type, tag: &str, value: &Value, ty: &Type) {
		match method_by_tag(self.registry, target_ty, tag).map(|method| (&method.name, &method.kind)) {
			Some((name, MethodKind::Mutator { param, call })) if ty.assignable_to(param) => {
				trace!("mutator {name} takes {}", self.render_path());
				call(target, value.clone());
			}
			Some((_, MethodKind::Mutator { .. })) => self.skip_here(SkipReason::MutatorRejected),
			_ => self.skip_here(SkipReason::NoMatchingField),
		}
	}

	fn skip_here(&mut self, reason: SkipReason) {
		let path = self.render_path();
		let tag = self.path.iter().rev().find(|segment| !segment.starts_with('[')).map(String::as_str).unwrap_or("");
		debug!("skip {path}: {reason}");
		self.report.skipped.push(Skip {
			path,
			tag: tag.into(),
			reason,
		});
	}

	fn render_path(&self) -> String {
		let mut out = String::new();
		for segment in &self.path {
			if !out.is_empty() && !segment.starts_with('[') {
				out.push('.');
			}
			out.push_str(segment);
		}
		out
	}
}
