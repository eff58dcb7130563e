use crate::copier::{MethodKind, Registry, StructDecl, Type, Value, field_by_tag, field_path_by_tag, method_by_tag};

fn registry() -> Registry {
	Registry::builder()
		.add(
			StructDecl::new("Base")
				.field("ID", Type::I64, r#"json:"id""#)
				.field("Label", Type::String, r#"json:"label""#),
		)
		.add(
			StructDecl::new("Item")
				.embed(Type::named("Base"))
				.field("Label", Type::String, r#"json:"label""#)
				.field("Alias", Type::String, r#"json:"label""#)
				.accessor("FullName", r#"json:"full_name""#, Type::String, |_| Value::string("x"))
				.mutator("SetFullName", r#"json:"full_name""#, Type::String, |_, _| {})
				.mutator("SetNote", r#"json:"note""#, Type::String, |_, _| {}),
		)
		.build()
		.expect("registry builds")
}

#[test]
fn field_by_tag_scans_immediate_fields_only() {
	let registry = registry();
	let item = Type::named("Item");

	assert_eq!(field_by_tag(&registry, &item, "label"), Some(1), "first duplicate wins");
	assert_eq!(field_by_tag(&registry, &item, "id"), None, "embedded members are not immediate");
	assert_eq!(field_by_tag(&registry, &item, ""), None, "untagged embedded field never matches");
	assert_eq!(field_by_tag(&registry, &Type::slice(Type::ptr(item)), "label"), Some(1));
	assert_eq!(field_by_tag(&registry, &Type::I64, "label"), None);
}

#[test]
fn field_path_promotes_embedded_members() {
	let registry = registry();
	let item = Type::named("Item");

	let id = field_path_by_tag(&registry, &item, "id").expect("promoted id");
	assert_eq!(id.path, [0, 0]);
	assert_eq!(id.name.as_ref(), "ID");

	let label = field_path_by_tag(&registry, &item, "label").expect("immediate label");
	assert_eq!(label.path, [1], "shallow field shadows embedded one");

	assert!(field_path_by_tag(&registry, &item, "missing").is_none());
	assert!(field_path_by_tag(&registry, &item, "").is_none(), "embedded struct itself is not a tagged field");
}

#[test]
fn method_by_tag_returns_first_declared_match() {
	let registry = registry();
	let item = Type::named("Item");

	let method = method_by_tag(&registry, &item, "full_name").expect("method found");
	assert_eq!(method.name.as_ref(), "FullName");
	assert!(matches!(method.kind, MethodKind::Accessor { .. }));

	let method = method_by_tag(&registry, &item, "note").expect("mutator found");
	assert!(matches!(&method.kind, MethodKind::Mutator { param: Type::String, .. }));

	assert!(method_by_tag(&registry, &item, "id").is_none());
	assert!(method_by_tag(&registry, &Type::named("Base"), "full_name").is_none());
}
