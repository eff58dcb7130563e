use log::trace;

use crate::copier::{Registry, Type, Value};

/// Store `from` into `to` when the scalar policy allows it.
///
/// Returns `false` when the caller should fall back to a structural copy.
/// A closed tag gate always declines.
pub(crate) fn assign(registry: &Registry, gate: bool, to: &mut Value, to_ty: &Type, from: &Value, from_ty: &Type) -> bool {
	if !gate {
		return false;
	}
	if from.is_null() {
		return true;
	}

	let (to, to_ty) = match to_ty {
		Type::Ptr(inner_ty) => {
			if from.is_null_ptr() {
				*to = Value::Ptr(None);
				return true;
			}
			if !matches!(to, Value::Ptr(Some(_))) {
				match registry.zero_value(inner_ty) {
					Ok(zero) => *to = Value::some(zero),
					Err(_) => return false,
				}
			}
			match to {
				Value::Ptr(Some(inner)) => (&mut **inner, &**inner_ty),
				_ => return false,
			}
		}
		_ => (to, to_ty),
	};

	if from_ty.convertible_to(to_ty) {
		if let Some(value) = convert(from, to_ty) {
			trace!("assign {from_ty} -> {to_ty}");
			*to = value;
			return true;
		}
	}

	if let Some(scan) = registry.scanner(to_ty) {
		let Value::Struct(target) = to else {
			return false;
		};
		return match scan(target, from) {
			Ok(()) => true,
			Err(err) => {
				trace!("scanner for {to_ty} declined {from_ty}: {err}");
				false
			}
		};
	}

	if let (Value::Ptr(inner), Type::Ptr(inner_ty)) = (from, from_ty) {
		return match inner {
			Some(inner) => assign(registry, gate, to, to_ty, inner, inner_ty),
			None => match registry.zero_value(to_ty) {
				Ok(zero) => {
					*to = zero;
					true
				}
				Err(_) => false,
			},
		};
	}

	false
}

/// Convert a value to `to`, assuming its declared type converts.
///
/// Returns `None` when the value's shape does not fit the declared types.
pub(crate) fn convert(value: &Value, to: &Type) -> Option<Value> {
	match (value, to) {
		(Value::Bool(v), Type::Bool) => Some(Value::Bool(*v)),
		(Value::String(v), Type::String) => Some(Value::String(v.clone())),
		(Value::Ptr(_), Type::Ptr(_)) | (Value::Array(_), Type::Slice(_)) => Some(value.clone()),
		(Value::Struct(item), Type::Struct(name)) if item.type_name == *name => Some(value.clone()),
		(_, to) if to.is_numeric() => convert_numeric(value, to),
		_ => None,
	}
}

fn convert_numeric(value: &Value, to: &Type) -> Option<Value> {
	let (signed, unsigned, float) = match *value {
		Value::I64(v) => (v, v as u64, v as f64),
		Value::U64(v) => (v as i64, v, v as f64),
		Value::F32(v) => (v as i64, v as u64, f64::from(v)),
		Value::F64(v) => (v as i64, v as u64, v),
		_ => return None,
	};

	Some(match to {
		Type::I8 => Value::I64(i64::from(signed as i8)),
		Type::I16 => Value::I64(i64::from(signed as i16)),
		Type::I32 => Value::I64(i64::from(signed as i32)),
		Type::I64 => Value::I64(signed),
		Type::U8 => Value::U64(u64::from(unsigned as u8)),
		Type::U16 => Value::U64(u64::from(unsigned as u16)),
		Type::U32 => Value::U64(u64::from(unsigned as u32)),
		Type::U64 => Value::U64(unsigned),
		Type::F32 => match *value {
			Value::F32(v) => Value::F32(v),
			_ => Value::F32(float as f32),
		},
		Type::F64 => Value::F64(float),
		_ => return None,
	})
}
