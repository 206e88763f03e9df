use bumpalo::Bump;

use crate::ast::{ASTContext, Span};
use crate::check::{ErrorKind, ValidationError};
use crate::schema::Schema;
use crate::visit::Path;

/// The `ValidationContext` carrying a reference to the AST Context's arena, the schema that
/// documents are validated against, and a list of errors.
///
/// New errors are added to the list as validation continues to issue error messages if validation
/// has failed on a document.
pub struct ValidationContext<'a> {
    pub arena: &'a Bump,
    pub schema: &'a Schema<'a>,
    pub errors: Vec<ValidationError>,
}

impl<'a> ValidationContext<'a> {
    /// Create a new `ValidationContext` given an AST Context and a schema.
    pub fn new(ctx: &'a ASTContext, schema: &'a Schema<'a>) -> Self {
        ValidationContext {
            arena: &ctx.arena,
            schema,
            errors: Vec::new(),
        }
    }

    /// Add an error that isn't tied to a single node to the list of errors.
    pub fn add_error<S: Into<String>>(&mut self, message: S) {
        self.errors
            .push(ValidationError::new(ErrorKind::SchemaViolation, message));
    }

    /// Add an error for the node at the given span and path.
    ///
    /// This is called inside of validation rules to add an error to the list and fail validation
    /// of the currently validating document.
    pub fn add_error_at<S: Into<String>>(&mut self, message: S, span: Span, path: &Path) {
        self.errors
            .push(ValidationError::new(ErrorKind::SchemaViolation, message).at(span, path));
    }

    /// Returns whether no rule has reported an error yet.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert the context into the list of errors that were reported.
    #[inline]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}
