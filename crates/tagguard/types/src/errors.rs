//! Parse errors for wire identifiers.

use thiserror::Error;

/// An identifier that does not name any rating level on the scale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized rating level identifier '{0}'")]
pub struct ParseLevelError(pub String);

/// An identifier that does not name any category in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized content category identifier '{0}'")]
pub struct ParseCategoryError(pub String);
