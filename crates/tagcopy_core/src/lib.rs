//! Public library API for copying structured values by matching field tags.

/// Type registry, dynamic values, and the tag-driven copy engine.
pub mod copier;
