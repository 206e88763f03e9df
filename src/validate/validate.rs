use super::context::ValidationContext;
use crate::ast::{ASTContext, DefaultIn, Document};
use crate::check::ValidationError;
use crate::schema::Schema;
use crate::visit::{TypeInfo, VisitNode, Visitor};
use std::borrow::Borrow;

/// Trait for a `ValidationRule` that checks a given `GraphQl` document against its rules using a
/// visitor.
///
/// A rule always implements a visitor and accepts the [`ValidationContext`] structure as
/// its passed context. Rules are run with type information, so callbacks may look up the schema
/// definitions of the current node via [`VisitInfo::types`](crate::visit::VisitInfo).
///
/// Rules implement the `DefaultIn` trait (which any `Default` type implements), which allows them
/// to be instantiated easily inside the AST Context's arena. No rule carries external state.
pub trait ValidationRule<'a>: Visitor<'a, ValidationContext<'a>> + DefaultIn<'a> {
    /// Run this `ValidationRule` against the given document and return all errors the rule
    /// reported, which is empty if the document passes.
    #[inline]
    fn validate(
        ctx: &'a ASTContext,
        schema: &'a Schema<'a>,
        document: &'a Document<'a>,
    ) -> Vec<ValidationError> {
        let mut validation = ValidationContext::new(ctx, schema);
        let mut visitor = Self::default_in(&ctx.arena);
        document.visit_with_types(TypeInfo::new(ctx, schema), &mut validation, &mut visitor);
        validation.into_errors()
    }
}

/// A validator that checks a document's structure against a schema.
///
/// This is the seam the validation engine uses to run structural validation. The default
/// implementation is [`StandardRules`](super::StandardRules), but any closure taking the same
/// arguments may be used in its place.
pub trait StructuralValidator {
    fn validate<'a>(
        &self,
        ctx: &'a ASTContext,
        schema: &'a Schema<'a>,
        document: &'a Document<'a>,
    ) -> Vec<ValidationError>;
}

impl<F> StructuralValidator for F
where
    F: for<'a> Fn(&'a ASTContext, &'a Schema<'a>, &'a Document<'a>) -> Vec<ValidationError>,
{
    #[inline]
    fn validate<'a>(
        &self,
        ctx: &'a ASTContext,
        schema: &'a Schema<'a>,
        document: &'a Document<'a>,
    ) -> Vec<ValidationError> {
        self(ctx, schema, document)
    }
}

/// Trait to run a [`ValidationRule`] on a given GraphQL Document node.
pub trait ValidateNode<'a>
where
    Self: Borrow<Document<'a>>,
{
    /// Run the generic validation rule on the document node and return the errors it reported.
    ///
    /// `document.validate::<YourValidationRule>(&ctx, schema)`
    #[inline]
    fn validate<Rule: ValidationRule<'a>>(
        &'a self,
        ctx: &'a ASTContext,
        schema: &'a Schema<'a>,
    ) -> Vec<ValidationError> {
        Rule::validate(ctx, schema, self.borrow())
    }
}

impl<'a> ValidateNode<'a> for Document<'a> {}
