use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validate that a document uses all the fragments it defines at least once.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Fragments-Must-Be-Used)
#[derive(Default)]
pub struct NoUnusedFragments<'a> {
    fragments: Vec<(&'a str, Span, Path)>,
    fragment_spreads: Vec<&'a str>,
}

impl<'a> ValidationRule<'a> for NoUnusedFragments<'a> {}

impl<'a> Visitor<'a, ValidationContext<'a>> for NoUnusedFragments<'a> {
    fn enter_fragment(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        fragment: &'a FragmentDefinition<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.fragments
            .push((fragment.name.name, fragment.span, info.path.clone()));
        VisitFlow::Next
    }

    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        spread: &'a FragmentSpread<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.fragment_spreads.push(spread.name.name);
        VisitFlow::Skip
    }

    fn leave_document(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        _document: &'a Document<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        for (name, span, path) in self.fragments.iter() {
            if !self.fragment_spreads.contains(name) {
                ctx.add_error_at(format!("Fragment \"{}\" is never used.", name), *span, path);
            }
        }
        VisitFlow::Next
    }

    fn enter_variable_definition(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _var_def: &'a VariableDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Skip
    }

    fn enter_argument(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _argument: &'a Argument<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Skip
    }

    fn enter_directive(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _directive: &'a Directive<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ParseSdl, Schema};

    #[test]
    fn used_fragments() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { a: Int }").unwrap();
        let document = Document::parse(
            &ctx,
            "{ ...A } fragment A on Query { ... on Query { ...B } } fragment B on Query { a }",
        )
        .unwrap();
        assert!(NoUnusedFragments::validate(&ctx, schema, document).is_empty());
    }

    #[test]
    fn unused_fragments() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { a: Int }").unwrap();
        let document =
            Document::parse(&ctx, "{ a } fragment Unused on Query { a }").unwrap();
        let errors = NoUnusedFragments::validate(&ctx, schema, document);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Fragment \"Unused\" is never used.");
        assert_eq!(errors[0].path.as_ref().unwrap().to_string(), "1");
    }
}
