#![allow(missing_docs)]

use tagcopy::copier::{CopyError, CopyOptions, Copier, Registry, SkipReason, StructDecl, StructValue, Type, Value, copy};

fn registry() -> Registry {
	Registry::builder()
		.add(
			StructDecl::new("User")
				.field("ID", Type::I64, r#"json:"id""#)
				.field("Name", Type::String, r#"json:"name""#),
		)
		.add(
			StructDecl::new("Member")
				.field("MemberID", Type::I64, r#"json:"id""#)
				.field("Title", Type::String, r#"json:"name""#)
				.field("Score", Type::F32, r#"json:"score""#),
		)
		.add(
			StructDecl::new("Sparse")
				.field("ID", Type::I64, r#"json:"id,omitempty""#)
				.field("Name", Type::String, r#"json:"name""#),
		)
		.build()
		.expect("registry builds")
}

fn user(id: i64, name: &str) -> Value {
	Value::Struct(StructValue::new("User", [("ID", Value::I64(id)), ("Name", Value::string(name))]))
}

fn member_fields(value: &Value) -> &StructValue {
	match value {
		Value::Ptr(Some(inner)) => inner.as_struct().expect("member struct"),
		other => panic!("expected pointer to member, got {}", other.kind()),
	}
}

#[test]
fn tagged_fields_copy_across_differently_named_structs() {
	let registry = registry();
	let mut to = Value::some(registry.zero_value(&Type::named("Member")).expect("zero member"));

	copy(&registry, &mut to, &Type::ptr(Type::named("Member")), &user(1, "Ada"), &Type::named("User")).expect("copy succeeds");

	let member = member_fields(&to);
	assert_eq!(member.get("MemberID"), Some(&Value::I64(1)));
	assert_eq!(member.get("Title"), Some(&Value::string("Ada")));
	assert_eq!(member.get("Score"), Some(&Value::F32(0.0)), "unmatched destination field keeps its value");
}

#[test]
fn pointer_source_copies_like_its_target() {
	let registry = registry();
	let mut to = Value::some(registry.zero_value(&Type::named("Member")).expect("zero member"));

	copy(&registry, &mut to, &Type::ptr(Type::named("Member")), &Value::some(user(4, "Lin")), &Type::ptr(Type::named("User"))).expect("copy succeeds");
	assert_eq!(member_fields(&to).get("MemberID"), Some(&Value::I64(4)));
}

#[test]
fn tag_options_are_part_of_the_tag() {
	let registry = registry();
	let mut to = Value::some(registry.zero_value(&Type::named("Sparse")).expect("zero sparse"));
	let before = to.clone();

	let report = copy(&registry, &mut to, &Type::ptr(Type::named("Sparse")), &user(2, "Grace"), &Type::named("User")).expect("copy succeeds");

	assert_eq!(to, before);
	let id: Vec<_> = report.skipped_tag("id").collect();
	assert_eq!(id[0].reason, SkipReason::NoMatchingField);
	let name: Vec<_> = report.skipped_tag("name").collect();
	assert_eq!(name[0].reason, SkipReason::TagGateClosed);
}

#[test]
fn collection_copy_appends_converted_elements() {
	let registry = registry();
	let mut to = Value::some(Value::Array(Vec::new()));
	let from = Value::Array(vec![user(1, "Ada"), user(2, "Grace"), user(3, "Lin")]);

	let report = copy(&registry, &mut to, &Type::ptr(Type::slice(Type::named("Member"))), &from, &Type::slice(Type::named("User"))).expect("copy succeeds");
	assert!(report.is_complete());

	let Value::Ptr(Some(items)) = &to else {
		panic!("destination pointer was replaced");
	};
	let Value::Array(items) = &**items else {
		panic!("destination is not a collection");
	};
	let ids: Vec<_> = items.iter().filter_map(|item| item.as_struct()?.get("MemberID").cloned()).collect();
	assert_eq!(ids, [Value::I64(1), Value::I64(2), Value::I64(3)]);
}

#[test]
fn strict_copier_surfaces_skips_as_error() {
	let registry = registry();
	let mut to = Value::some(registry.zero_value(&Type::named("Sparse")).expect("zero sparse"));
	let strict = Copier::new(&registry).with_options(CopyOptions { strict: true });

	let err = strict
		.copy(&mut to, &Type::ptr(Type::named("Sparse")), &user(2, "Grace"), &Type::named("User"))
		.expect_err("skips fail strict copies");
	assert_eq!(err.to_string(), "copy incomplete: 2 skipped, first at id (no_matching_field)");

	let mut to = Value::some(registry.zero_value(&Type::named("Member")).expect("zero member"));
	strict
		.copy(&mut to, &Type::ptr(Type::named("Member")), &user(3, "Lin"), &Type::named("User"))
		.expect("complete copy passes strict mode");
}

#[test]
fn unaddressable_destination_is_rejected_before_copying() {
	let registry = registry();
	let mut to = registry.zero_value(&Type::named("Member")).expect("zero member");
	let before = to.clone();

	let err = copy(&registry, &mut to, &Type::named("Member"), &user(1, "Ada"), &Type::named("User")).expect_err("value destination");
	assert!(matches!(err, CopyError::UnaddressableDestination));
	assert_eq!(err.to_string(), "copy to value is unaddressable");
	assert_eq!(to, before);
}
