use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that no operation the document defines have duplicate names.
/// Note: Operations and Fragments are allowed to share names.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Operation-Name-Uniqueness)
#[derive(Default)]
pub struct UniqueOperationNames<'a> {
    used_operation_names: Vec<&'a str>,
}

impl<'a> ValidationRule<'a> for UniqueOperationNames<'a> {}

impl<'a> Visitor<'a, ValidationContext<'a>> for UniqueOperationNames<'a> {
    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        if let Some(name) = operation.name {
            if self.used_operation_names.contains(&name.name) {
                ctx.add_error_at(
                    format!("There can be only one operation named \"{}\".", name.name),
                    operation.span,
                    &info.path,
                );
            } else {
                self.used_operation_names.push(name.name);
            }
        }
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
    use crate::validate::ValidateNode;

    #[test]
    fn unique_names() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { a: Int }").unwrap();
        let document =
            Document::parse(&ctx, "query A { a } query B { a } fragment A on Query { a }").unwrap();
        assert!(document
            .validate::<UniqueOperationNames>(&ctx, schema)
            .is_empty());
    }

    #[test]
    fn duplicate_names() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { a: Int }").unwrap();
        let document =
            Document::parse(&ctx, "query A { a } mutation A { a } query A { a }").unwrap();
        let errors = UniqueOperationNames::validate(&ctx, schema, document);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "There can be only one operation named \"A\".");
        assert_eq!(errors[1].path.as_ref().unwrap().to_string(), "2");
    }
}
