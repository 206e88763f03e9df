use super::super::{ValidationContext, ValidationRule};
use crate::schema::DirectiveLocation;
use crate::{ast::*, visit::*};

/// Validates that all directives are defined by the schema and are used in a location their
/// definition allows.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Directives-Are-Defined)
pub struct KnownDirectives {
    location: DirectiveLocation,
    operation_location: DirectiveLocation,
}

impl Default for KnownDirectives {
    fn default() -> Self {
        KnownDirectives {
            location: DirectiveLocation::Query,
            operation_location: DirectiveLocation::Query,
        }
    }
}

impl<'a> ValidationRule<'a> for KnownDirectives {}

impl<'a> Visitor<'a, ValidationContext<'a>> for KnownDirectives {
    fn enter_operation(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.operation_location = match operation.operation {
            OperationKind::Query => DirectiveLocation::Query,
            OperationKind::Mutation => DirectiveLocation::Mutation,
            OperationKind::Subscription => DirectiveLocation::Subscription,
        };
        self.location = self.operation_location;
        VisitFlow::Next
    }

    fn enter_variable_definition(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _var_def: &'a VariableDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.location = DirectiveLocation::VariableDefinition;
        VisitFlow::Next
    }

    fn leave_variable_definition(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _var_def: &'a VariableDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.location = self.operation_location;
        VisitFlow::Next
    }

    fn enter_fragment(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _fragment: &'a FragmentDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.location = DirectiveLocation::FragmentDefinition;
        VisitFlow::Next
    }

    fn enter_field(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _field: &'a Field<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.location = DirectiveLocation::Field;
        VisitFlow::Next
    }

    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _spread: &'a FragmentSpread<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.location = DirectiveLocation::FragmentSpread;
        VisitFlow::Next
    }

    fn enter_inline_fragment(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _fragment: &'a InlineFragment<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.location = DirectiveLocation::InlineFragment;
        VisitFlow::Next
    }

    fn enter_directive(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        directive: &'a Directive<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        match info.types.directive() {
            None => ctx.add_error_at(
                format!("Unknown directive \"@{}\".", directive.name),
                directive.span,
                &info.path,
            ),
            Some(definition) if !definition.is_valid_location(self.location) => ctx
                .add_error_at(
                    format!(
                        "Directive \"@{}\" may not be used on {}.",
                        directive.name,
                        self.location.name()
                    ),
                    directive.span,
                    &info.path,
                ),
            Some(_) => {}
        }
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
