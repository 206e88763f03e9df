//! # Document Checks
//!
//! This module contains the analyses that run on every document in addition to structural
//! validation:
//!
//! - [`FragmentGraph`] registers all fragments of a run and resolves the fragments an operation
//!   transitively depends on.
//! - [`compute_depth`] bounds how deeply an operation's fields are nested.
//! - [`scan_deprecations`] flags usages of deprecated fields, arguments and enum values.
//! - [`find_duplicate_fragments`] flags fragment names that are declared more than once.
//!
//! All of them report their findings as plain [`ValidationError`] or [`DeprecationWarning`]
//! records rather than failing with an [Error](crate::error::Error).

use crate::ast::Span;
use crate::error::Location;
use crate::visit::Path;
use std::fmt;

mod depth;
mod deprecation;
mod duplicates;
mod fragment_graph;

pub use depth::*;
pub use deprecation::*;
pub use duplicates::*;
pub use fragment_graph::*;

/// The class of a [`ValidationError`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum ErrorKind {
    /// A document doesn't conform to the schema or to GraphQL's validation rules.
    SchemaViolation,
    /// An operation nests its fields more deeply than the configured maximum.
    DepthExceeded,
    /// A fragment name is declared more than once across all documents.
    DuplicateFragment,
    /// A fragment spread refers to a fragment that is declared nowhere.
    UnknownFragment,
    /// A deprecated usage that a report was asked to treat as failure.
    DeprecatedUsage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::SchemaViolation => "SchemaViolation",
            ErrorKind::DepthExceeded => "DepthExceeded",
            ErrorKind::DuplicateFragment => "DuplicateFragment",
            ErrorKind::UnknownFragment => "UnknownFragment",
            ErrorKind::DeprecatedUsage => "DeprecatedUsage",
        })
    }
}

/// A finding that makes a document invalid.
///
/// `path` points at the offending node inside the document that was checked, while `location`
/// is the line and column of that node in its source text, once it has been resolved.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub message: String,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub location: Option<Location>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub path: Option<Path>,
    #[cfg_attr(feature = "json", serde(skip))]
    pub(crate) span: Option<Span>,
}

impl ValidationError {
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        ValidationError {
            kind,
            message: message.into(),
            location: None,
            path: None,
            span: None,
        }
    }

    /// Attaches the node's span and path to the error.
    pub fn at(mut self, span: Span, path: &Path) -> Self {
        self.span = Some(span);
        self.path = Some(path.clone());
        self
    }

    /// Attaches a path without a span, for nodes whose position isn't tracked.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.clone());
        self
    }

    #[inline]
    pub fn span(&self) -> Option<Span> {
        self.span
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(location) => write!(f, "{} ({})", self.message, location),
            None => f.write_str(&self.message),
        }
    }
}

/// An advisory finding on the usage of a deprecated schema element.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DeprecationWarning {
    pub message: String,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub location: Option<Location>,
    pub path: Path,
    #[cfg_attr(feature = "json", serde(skip))]
    pub(crate) span: Span,
}

impl DeprecationWarning {
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }
}

impl From<DeprecationWarning> for ValidationError {
    fn from(warning: DeprecationWarning) -> Self {
        ValidationError {
            kind: ErrorKind::DeprecatedUsage,
            message: warning.message,
            location: warning.location,
            path: Some(warning.path),
            span: Some(warning.span),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_location() {
        let mut error = ValidationError::new(ErrorKind::SchemaViolation, "Unknown type \"X\".");
        assert_eq!(error.to_string(), "Unknown type \"X\".");
        error.location = Some(Location { line: 2, column: 5 });
        assert_eq!(error.to_string(), "Unknown type \"X\". (2:5)");
    }

    #[test]
    fn warnings_convert_to_errors() {
        let path = Path::try_from("0.selectionSet.0").unwrap();
        let warning = DeprecationWarning {
            message: "The field 'Query.old' is deprecated.".into(),
            location: Some(Location { line: 1, column: 3 }),
            path: path.clone(),
            span: Span::new(2, 5),
        };
        let error = ValidationError::from(warning);
        assert_eq!(error.kind, ErrorKind::DeprecatedUsage);
        assert_eq!(error.message, "The field 'Query.old' is deprecated.");
        assert_eq!(error.path, Some(path));
        assert_eq!(error.span(), Some(Span::new(2, 5)));
    }
}
