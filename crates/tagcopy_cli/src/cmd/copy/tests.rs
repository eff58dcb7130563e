use tagcopy_testkit::read_fixture_json;

use crate::cmd::test_support::{fixture_arg, run_tagcopy_failure, run_tagcopy_json};

#[test]
fn copy_renames_fields_by_tag() {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("user.json");
	let json = run_tagcopy_json(&["copy", &schema, "--from", "User", "--to", "UserDto", "--input", &input]);
	let source = read_fixture_json("user.json");

	assert_eq!(json["UserID"], source["ID"]);
	assert_eq!(json["DisplayName"], source["Name"]);
	assert_eq!(json["Contact"], source["Email"]);
	assert_eq!(json["Age"], 36);
}

#[test]
fn copy_collection_builds_one_element_per_source() {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("users.json");
	let json = run_tagcopy_json(&["copy", &schema, "--from", "Vec<User>", "--to", "Vec<UserDto>", "--input", &input]);

	let items = json.as_array().expect("array output");
	assert_eq!(items.len(), 2);
	assert_eq!(items[1]["DisplayName"], "Grace");
	assert_eq!(items[1]["Contact"], "", "null optional source zeroes the field");
}

#[test]
fn copy_into_existing_destination_overwrites_matched_fields() {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("grace.json");
	let into = fixture_arg("user_dto_stale.json");
	let json = run_tagcopy_json(&["copy", &schema, "--from", "User", "--to", "UserDto", "--input", &input, "--into", &into]);

	assert_eq!(json["UserID"], 8);
	assert_eq!(json["DisplayName"], "Grace");
	assert_eq!(json["Contact"], "");
	assert_eq!(json["Age"], 45);
}

#[test]
fn copy_flattens_embedded_and_nests_records() {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("account.json");
	let json = run_tagcopy_json(&["copy", &schema, "--from", "Account", "--to", "AccountRow", "--input", &input, "--report"]);

	assert_eq!(json["from"], "Account");
	assert_eq!(json["to"], "AccountRow");
	assert_eq!(json["value"]["Created"], 1_700_000_000_i64);
	assert_eq!(json["value"]["Owner"]["UserID"], 7);
	assert_eq!(json["skipped"].as_array().map(Vec::len), Some(0));
}

#[test]
fn copy_report_lists_gate_skips() {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("user.json");
	let json = run_tagcopy_json(&["copy", &schema, "--from", "User", "--to", "Legacy", "--input", &input, "--report"]);

	assert_eq!(json["value"]["Name"], "", "closed gate leaves destination untouched");
	let skipped = json["skipped"].as_array().expect("skipped array");
	let name = skipped.iter().find(|skip| skip["tag"] == "name").expect("name skip");
	assert_eq!(name["reason"], "tag_gate_closed");
	assert!(skipped.iter().any(|skip| skip["reason"] == "no_matching_field"));
}

#[test]
fn strict_copy_fails_on_skips() {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("user.json");
	let stderr = run_tagcopy_failure(&["copy", &schema, "--from", "User", "--to", "Legacy", "--input", &input, "--strict"]);
	assert!(stderr.contains("error: copy incomplete: 4 skipped, first at id"), "stderr: {stderr}");
}

#[test]
fn copy_rejects_values_that_do_not_fit_the_type() {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("users.json");
	let stderr = run_tagcopy_failure(&["copy", &schema, "--from", "User", "--to", "UserDto", "--input", &input]);
	assert!(stderr.contains("expected User, got array"), "stderr: {stderr}");
}
