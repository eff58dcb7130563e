use crate::copier::{DeepField, MethodDecl, Registry, Type};

/// Index of the first immediate field of `ty`'s base struct tagged `tag`.
///
/// Embedded fields never match, and their members are not searched; see
/// [`field_path_by_tag`].
pub fn field_by_tag(registry: &Registry, ty: &Type, tag: &str) -> Option<usize> {
	let info = registry.info(ty.base().struct_name()?)?;
	info.decl
		.fields
		.iter()
		.zip(&info.field_tags)
		.position(|(field, field_tag)| !field.embedded && field_tag.as_ref() == tag)
}

/// Field tagged `tag` on `ty`'s base struct, promoting embedded fields.
///
/// Immediate fields win; otherwise embedded structs are searched in
/// declaration order, each with the same rule.
pub fn field_path_by_tag<'r>(registry: &'r Registry, ty: &Type, tag: &str) -> Option<&'r DeepField> {
	let name = ty.base().struct_name()?;
	let deep = registry.deep_fields(name);
	let path = promoted_path(registry, ty, tag, &mut Vec::new())?;
	deep.iter().find(|field| field.path == path)
}

/// First method of `ty`'s base struct whose declared tag equals `tag`.
pub fn method_by_tag<'r>(registry: &'r Registry, ty: &Type, tag: &str) -> Option<&'r MethodDecl> {
	let info = registry.info(ty.base().struct_name()?)?;
	let idx = info.method_tags.iter().position(|method_tag| method_tag.as_ref() == tag)?;
	info.decl.methods.get(idx)
}

fn promoted_path(registry: &Registry, ty: &Type, tag: &str, visiting: &mut Vec<Box<str>>) -> Option<Vec<usize>> {
	let name = ty.base().struct_name()?;
	if visiting.iter().any(|item| item.as_ref() == name) {
		return None;
	}

	if let Some(idx) = field_by_tag(registry, ty, tag) {
		return Some(vec![idx]);
	}
	let info = registry.info(name)?;

	visiting.push(name.into());
	let mut found = None;
	for (idx, field) in info.decl.fields.iter().enumerate() {
		if !field.embedded {
			continue;
		}
		if let Some(mut rest) = promoted_path(registry, &field.ty, tag, visiting) {
			rest.insert(0, idx);
			found = Some(rest);
			break;
		}
	}
	visiting.pop();
	found
}

#[cfg(test)]
mod tests;
