use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that all type conditions and variable types refer to types the schema defines.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Fragment-Spread-Type-Existence)
#[derive(Default)]
pub struct KnownTypeNames {
    operation_span: Span,
}

fn check_type(ctx: &mut ValidationContext, name: &str, span: Span, info: &VisitInfo) {
    if ctx.schema.get_type(name).is_none() {
        ctx.add_error_at(format!("Unknown type \"{}\".", name), span, &info.path);
    }
}

impl<'a> ValidationRule<'a> for KnownTypeNames {}

impl<'a> Visitor<'a, ValidationContext<'a>> for KnownTypeNames {
    fn enter_operation(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.operation_span = operation.span;
        VisitFlow::Next
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        var_def: &'a VariableDefinition<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        check_type(ctx, var_def.of_type.of_type().name, self.operation_span, info);
        VisitFlow::Skip
    }

    fn enter_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a FragmentDefinition<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        check_type(ctx, fragment.type_condition.name, fragment.span, info);
        VisitFlow::Next
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a InlineFragment<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        if let Some(type_condition) = &fragment.type_condition {
            check_type(ctx, type_condition.name, fragment.span, info);
        }
        VisitFlow::Next
    }

    fn enter_argument(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _argument: &'a Argument<'a>,
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
    fn known_types() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { a(x: String): Int }").unwrap();
        let document = Document::parse(
            &ctx,
            "query ($x: String, $y: [Int!]) { ... on Query { ...F } } fragment F on Query { a(x: $x) }",
        )
        .unwrap();
        assert!(KnownTypeNames::validate(&ctx, schema, document).is_empty());
    }

    #[test]
    fn unknown_types() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { a: Int }").unwrap();
        let document = Document::parse(
            &ctx,
            "query ($x: [Missing!]) { ... on Nope { a } } fragment F on Other { a }",
        )
        .unwrap();
        let messages: Vec<String> = KnownTypeNames::validate(&ctx, schema, document)
            .into_iter()
            .map(|error| error.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Unknown type \"Missing\".",
                "Unknown type \"Nope\".",
                "Unknown type \"Other\".",
            ]
        );
    }
}
