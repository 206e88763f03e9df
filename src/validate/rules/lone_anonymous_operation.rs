use super::super::context::ValidationContext;
use super::super::validate::ValidationRule;
use crate::{ast::*, visit::*};

/// Validate a document to only contain one anonymous operation or multiple named operations.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Lone-Anonymous-Operation)
#[derive(Default)]
pub struct LoneAnonymousOperation {
    operations: usize,
    anonymous: Vec<(Span, Path)>,
}

impl<'a> ValidationRule<'a> for LoneAnonymousOperation {}

impl<'a> Visitor<'a, ValidationContext<'a>> for LoneAnonymousOperation {
    fn enter_fragment(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _fragment: &'a FragmentDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Skip
    }

    fn enter_operation(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        if operation.name.is_none() {
            self.anonymous.push((operation.span, info.path.clone()));
        }
        self.operations += 1;
        VisitFlow::Skip
    }

    fn leave_document(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        _document: &'a Document<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        if self.operations > 1 {
            for (span, path) in self.anonymous.iter() {
                ctx.add_error_at(
                    "This anonymous operation must be the only defined operation.",
                    *span,
                    path,
                );
            }
        }
        VisitFlow::Next
    }
}
