use super::super::{ValidationContext, ValidationRule};
use crate::schema::OutputType;
use crate::{ast::*, visit::*};

/// Validates that every selected field is defined on the type it's selected on.
///
/// The `__schema` and `__type` introspection fields are accepted on any type, and fields below an
/// unknown field or type aren't checked at all.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Field-Selections)
#[derive(Default)]
pub struct FieldsOnCorrectType;

impl<'a> ValidationRule<'a> for FieldsOnCorrectType {}

impl<'a> Visitor<'a, ValidationContext<'a>> for FieldsOnCorrectType {
    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        if info.types.field_def().is_some() || matches!(field.name, "__schema" | "__type") {
            return VisitFlow::Next;
        }
        match info.types.parent_type() {
            Some(
                parent_type @ (OutputType::Object(_)
                | OutputType::Interface(_)
                | OutputType::Union(_)),
            ) => {
                ctx.add_error_at(
                    format!(
                        "Cannot query field \"{}\" on type \"{}\".",
                        field.name,
                        parent_type.name()
                    ),
                    field.span,
                    &info.path,
                );
                VisitFlow::Skip
            }
            _ => VisitFlow::Next,
        }
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ParseSdl, Schema};
    use indoc::indoc;

    const SCHEMA: &str = indoc! {"
        type Query { node: Node search: SearchResult name: String }
        interface Node { id: ID! }
        type User implements Node { id: ID! name: String }
        union SearchResult = User
    "};

    #[test]
    fn known_fields() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        let document = Document::parse(
            &ctx,
            "{ __typename __schema { types { name } } node { id ... on User { name } } search { __typename ... on User { id } } }",
        )
        .unwrap();
        assert!(FieldsOnCorrectType::validate(&ctx, schema, document).is_empty());
    }

    #[test]
    fn unknown_fields() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        let document = Document::parse(
            &ctx,
            "{ missing { deep } node { name } search { id } name { length } }",
        )
        .unwrap();
        let errors = FieldsOnCorrectType::validate(&ctx, schema, document);
        let messages: Vec<&str> = errors.iter().map(|error| error.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Cannot query field \"missing\" on type \"Query\".",
                "Cannot query field \"name\" on type \"Node\".",
                "Cannot query field \"id\" on type \"SearchResult\".",
            ]
        );
        assert_eq!(
            errors[1].path.as_ref().unwrap().to_string(),
            "0.selectionSet.1.selectionSet.0"
        );
    }
}
