use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that all arguments passed to fields and directives are defined by them.
///
/// Arguments of unknown fields and directives are left to [`FieldsOnCorrectType`] and
/// [`KnownDirectives`].
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Argument-Names)
///
/// [`FieldsOnCorrectType`]: super::FieldsOnCorrectType
/// [`KnownDirectives`]: super::KnownDirectives
#[derive(Default)]
pub struct KnownArgumentNames;

impl<'a> ValidationRule<'a> for KnownArgumentNames {}

impl<'a> Visitor<'a, ValidationContext<'a>> for KnownArgumentNames {
    fn enter_directive(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _directive: &'a Directive<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        match info.types.directive() {
            Some(_) => VisitFlow::Next,
            None => VisitFlow::Skip,
        }
    }

    fn enter_argument(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        argument: &'a Argument<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        if info.types.argument().is_some() {
            return VisitFlow::Skip;
        }
        let message = match (info.types.directive(), info.types.field_def()) {
            (Some(directive), _) => format!(
                "Unknown argument \"{}\" on directive \"@{}\".",
                argument.name, directive.name
            ),
            (None, Some(field_def)) => {
                let parent = info
                    .types
                    .parent_type()
                    .map_or("", |parent_type| parent_type.name());
                format!(
                    "Unknown argument \"{}\" on field \"{}.{}\".",
                    argument.name, parent, field_def.name
                )
            }
            (None, None) => return VisitFlow::Skip,
        };
        ctx.add_error_at(message, argument.span, &info.path);
        VisitFlow::Skip
    }

    fn enter_variable_definition(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _var_def: &'a VariableDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Skip
    }
}
