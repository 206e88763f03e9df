use super::super::{ValidationContext, ValidationRule};
use crate::schema::OutputType;
use crate::{ast::*, visit::*};

/// Validates that leaf fields have no sub-selections, while fields of object, interface or union
/// types do select subfields.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Leaf-Field-Selections)
#[derive(Default)]
pub struct ScalarLeafs;

impl<'a> ValidationRule<'a> for ScalarLeafs {}

impl<'a> Visitor<'a, ValidationContext<'a>> for ScalarLeafs {
    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        let (Some(field_def), Some(output_type)) =
            (info.types.field_def(), info.types.output_type())
        else {
            return VisitFlow::Next;
        };
        match output_type {
            OutputType::Scalar(_) | OutputType::Enum(_) if !field.selection_set.is_empty() => {
                ctx.add_error_at(
                    format!(
                        "Field \"{}\" must not have a selection since type \"{}\" has no subfields.",
                        field.name, field_def.output_type
                    ),
                    field.span,
                    &info.path,
                );
                VisitFlow::Skip
            }
            OutputType::Object(_) | OutputType::Interface(_) | OutputType::Union(_)
                if field.selection_set.is_empty() =>
            {
                ctx.add_error_at(
                    format!(
                        "Field \"{}\" of type \"{}\" must have a selection of subfields. Did you mean \"{} {{ ... }}\"?",
                        field.name, field_def.output_type, field.name
                    ),
                    field.span,
                    &info.path,
                );
                VisitFlow::Next
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

    fn enter_directive(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _directive: &'a Directive<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Skip
    }
}
