use crate::copier::{CopyError, Result};

/// Parsed struct tag such as `json:"id,omitempty" db:"user_id"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructTag {
	/// Raw tag text as declared.
	pub raw: Box<str>,
	entries: Vec<(Box<str>, Box<str>)>,
}

impl StructTag {
	/// Parse space-separated `key:"value"` pairs.
	pub fn parse(raw: &str) -> Result<Self> {
		let bytes = raw.as_bytes();
		let mut idx = 0_usize;
		let mut entries = Vec::new();

		loop {
			while idx < bytes.len() && bytes[idx] == b' ' {
				idx += 1;
			}
			if idx >= bytes.len() {
				break;
			}

			let start = idx;
			while idx < bytes.len() && bytes[idx] > b' ' && bytes[idx] != b':' && bytes[idx] != b'"' && bytes[idx] != 0x7f {
				idx += 1;
			}
			if idx == start || idx + 1 >= bytes.len() || bytes[idx] != b':' || bytes[idx + 1] != b'"' {
				return Err(CopyError::InvalidTag { raw: raw.to_owned() });
			}
			let key = &raw[start..idx];
			idx += 2;

			let mut value = String::new();
			let mut closed = false;
			let mut chars = raw[idx..].char_indices();
			while let Some((offset, ch)) = chars.next() {
				match ch {
					'"' => {
						idx += offset + 1;
						closed = true;
						break;
					}
					'\\' => match chars.next() {
						Some((_, 'n')) => value.push('\n'),
						Some((_, 't')) => value.push('\t'),
						Some((_, escaped)) => value.push(escaped),
						None => break,
					},
					ch => value.push(ch),
				}
			}
			if !closed {
				return Err(CopyError::InvalidTag { raw: raw.to_owned() });
			}

			entries.push((key.into(), value.into_boxed_str()));
		}

		Ok(Self { raw: raw.into(), entries })
	}

	/// First value stored under `key`.
	pub fn lookup(&self, key: &str) -> Option<&str> {
		self.entries.iter().find(|(name, _)| name.as_ref() == key).map(|(_, value)| value.as_ref())
	}

	/// Value stored under `key`, or the empty string.
	pub fn get(&self, key: &str) -> &str {
		self.lookup(key).unwrap_or("")
	}
}

#[cfg(test)]
mod tests {
	use super::StructTag;

	#[test]
	fn parses_multiple_keys() {
		let tag = StructTag::parse(r#"json:"id,omitempty" db:"user_id""#).expect("tag parses");
		assert_eq!(tag.get("json"), "id,omitempty");
		assert_eq!(tag.get("db"), "user_id");
		assert_eq!(tag.lookup("xml"), None);
		assert_eq!(tag.get("xml"), "");
	}

	#[test]
	fn empty_tag_has_no_keys() {
		let tag = StructTag::parse("").expect("empty tag parses");
		assert_eq!(tag.get("json"), "");
	}

	#[test]
	fn first_duplicate_key_wins() {
		let tag = StructTag::parse(r#"json:"a" json:"b""#).expect("tag parses");
		assert_eq!(tag.get("json"), "a");
	}

	#[test]
	fn unescapes_quoted_values() {
		let tag = StructTag::parse(r#"json:"say \"hi\"""#).expect("escaped tag parses");
		assert_eq!(tag.get("json"), "say \"hi\"");
	}

	#[test]
	fn rejects_malformed_tags() {
		for raw in ["json", "json:id", r#"json:"open"#, r#":"x""#] {
			assert!(StructTag::parse(raw).is_err(), "expected {raw:?} to fail");
		}
	}
}
