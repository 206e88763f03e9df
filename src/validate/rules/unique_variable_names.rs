use bumpalo::collections::Vec;

use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that no operation the document defines has duplicate variable names in its variable
/// definitions.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Variable-Uniqueness)
pub struct UniqueVariableNames<'a> {
    used_variable_names: Vec<'a, &'a str>,
    operation_span: Span,
}

impl<'a> DefaultIn<'a> for UniqueVariableNames<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Self {
            used_variable_names: Vec::new_in(arena),
            operation_span: Span::default(),
        }
    }
}

impl<'a> ValidationRule<'a> for UniqueVariableNames<'a> {}

impl<'a> Visitor<'a, ValidationContext<'a>> for UniqueVariableNames<'a> {
    fn enter_operation(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.used_variable_names.clear();
        self.operation_span = operation.span;
        VisitFlow::Next
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        var_def: &'a VariableDefinition<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        let name = var_def.variable.name;
        if self.used_variable_names.contains(&name) {
            // Variable definitions carry no span of their own
            ctx.add_error_at(
                format!("There can be only one variable named \"${}\".", name),
                self.operation_span,
                &info.path,
            );
        } else {
            self.used_variable_names.push(name);
        }
        VisitFlow::Skip
    }

    fn enter_selection_set(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _selection_set: &'a SelectionSet<'a>,
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

    fn enter_fragment(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _fragment: &'a FragmentDefinition<'a>,
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
    fn unique_variables() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { a(x: Int, y: Int): Int }").unwrap();
        let document = Document::parse(
            &ctx,
            "query A($x: Int, $y: Int) { a(x: $x, y: $y) } query B($x: Int) { a(x: $x) }",
        )
        .unwrap();
        assert!(UniqueVariableNames::validate(&ctx, schema, document).is_empty());
    }

    #[test]
    fn duplicate_variables() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { a(x: Int): Int }").unwrap();
        let document = Document::parse(&ctx, "query ($x: Int, $x: Int) { a(x: $x) }").unwrap();
        let errors = UniqueVariableNames::validate(&ctx, schema, document);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "There can be only one variable named \"$x\".");
        assert_eq!(
            errors[0].path.as_ref().unwrap().to_string(),
            "0.variableDefinitions.1"
        );
    }
}
