use std::fmt;

/// Why a field or element was left uncopied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	/// First-field tags of a struct pair differ, so scalar assignment is suppressed.
	TagGateClosed,
	/// Source and destination shapes cannot be paired structurally.
	NotStructural,
	/// No destination field or mutator carries the source tag.
	NoMatchingField,
	/// A tagged mutator exists but its parameter type does not fit.
	MutatorRejected,
	/// Scalar source or accessor result could not be stored in the destination.
	Unconvertible,
	/// Built element does not fit the destination collection.
	ElementDropped,
}

impl SkipReason {
	/// Stable snake_case label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::TagGateClosed => "tag_gate_closed",
			Self::NotStructural => "not_structural",
			Self::NoMatchingField => "no_matching_field",
			Self::MutatorRejected => "mutator_rejected",
			Self::Unconvertible => "unconvertible",
			Self::ElementDropped => "element_dropped",
		}
	}
}

impl fmt::Display for SkipReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One skipped copy step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
	/// Dotted tag path from the top-level value, `[i]` for elements.
	pub path: String,
	/// Tag being copied, empty for whole values.
	pub tag: Box<str>,
	/// Skip classification.
	pub reason: SkipReason,
}

/// Diagnostics of one best-effort copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
	/// Skipped steps in visit order.
	pub skipped: Vec<Skip>,
}

impl CopyReport {
	/// Whether nothing was skipped.
	pub fn is_complete(&self) -> bool {
		self.skipped.is_empty()
	}

	/// Skips recorded for one tag.
	pub fn skipped_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Skip> + 'a {
		self.skipped.iter().filter(move |skip| skip.tag.as_ref() == tag)
	}
}
