use crate::copier::{CopyError, Registry, Result, StructValue, Type, Value};

/// Follow pointer layers of a value and its declared type in lock-step.
///
/// Returns `None` when the value is absent (`Null` or a null pointer).
pub fn indirect<'v, 't>(value: &'v Value, ty: &'t Type) -> Result<Option<(&'v Value, &'t Type)>> {
	let (mut value, mut ty) = (value, ty);
	loop {
		match (value, ty) {
			(Value::Null, _) | (Value::Ptr(None), Type::Ptr(_)) => return Ok(None),
			(Value::Ptr(Some(inner)), Type::Ptr(inner_ty)) => {
				value = &**inner;
				ty = &**inner_ty;
			}
			(Value::Ptr(_), _) | (_, Type::Ptr(_)) => return Err(shape_mismatch(ty, value)),
			_ => return Ok(Some((value, ty))),
		}
	}
}

/// Mutable counterpart of [`indirect`].
///
/// Returns `None` when a null pointer blocks the way, which makes the value
/// unaddressable.
pub fn indirect_mut<'v, 't>(value: &'v mut Value, ty: &'t Type) -> Result<Option<(&'v mut Value, &'t Type)>> {
	match ty {
		Type::Ptr(inner_ty) => match value {
			Value::Ptr(Some(inner)) => indirect_mut(inner, inner_ty),
			Value::Ptr(None) | Value::Null => Ok(None),
			other => Err(shape_mismatch(ty, other)),
		},
		_ => match value {
			Value::Null => Ok(None),
			Value::Ptr(_) => Err(shape_mismatch(ty, value)),
			other => Ok(Some((other, ty))),
		},
	}
}

/// Like [`indirect_mut`], but allocates zero values behind null pointers.
pub(crate) fn indirect_alloc<'v, 't>(registry: &Registry, value: &'v mut Value, ty: &'t Type) -> Result<(&'v mut Value, &'t Type)> {
	match ty {
		Type::Ptr(inner_ty) => {
			if value.is_null_ptr() || value.is_null() {
				*value = Value::some(registry.zero_value(inner_ty)?);
			}
			match value {
				Value::Ptr(Some(inner)) => indirect_alloc(registry, inner, inner_ty),
				other => Err(shape_mismatch(ty, other)),
			}
		}
		_ => {
			if value.is_null() {
				*value = registry.zero_value(ty)?;
			}
			if matches!(value, Value::Ptr(_)) {
				return Err(shape_mismatch(ty, value));
			}
			Ok((value, ty))
		}
	}
}

/// Read the field at an index path through embedded structs.
pub(crate) fn field_at<'v>(item: &'v StructValue, path: &[usize]) -> Option<&'v Value> {
	let (last, parents) = path.split_last()?;
	let mut item = item;
	for idx in parents {
		let mut value = &item.fields.get(*idx)?.value;
		while let Value::Ptr(inner) = value {
			value = inner.as_deref()?;
		}
		item = value.as_struct()?;
	}
	item.fields.get(*last).map(|field| &field.value)
}

/// Mutably reach the field at an index path, allocating null embedded pointers.
pub(crate) fn field_at_mut<'v>(registry: &Registry, item: &'v mut StructValue, path: &[usize]) -> Result<Option<&'v mut Value>> {
	let Some((first, rest)) = path.split_first() else {
		return Ok(None);
	};
	if rest.is_empty() {
		return Ok(item.fields.get_mut(*first).map(|field| &mut field.value));
	}

	let ty = registry.check_struct(item)?.fields[*first].ty.clone();
	let Some(field) = item.fields.get_mut(*first) else {
		return Ok(None);
	};
	let (value, _) = indirect_alloc(registry, &mut field.value, &ty)?;
	match value {
		Value::Struct(inner) => field_at_mut(registry, inner, rest),
		_ => Ok(None),
	}
}

pub(crate) fn shape_mismatch(ty: &Type, value: &Value) -> CopyError {
	CopyError::ShapeMismatch {
		expected: ty.to_string(),
		found: value.kind(),
	}
}
