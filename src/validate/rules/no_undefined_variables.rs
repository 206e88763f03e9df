use bumpalo::{collections::Vec, Bump};
use hashbrown::{hash_map::DefaultHashBuilder, HashMap};

use super::super::{ValidationContext, ValidationRule};
use super::{collect_variables, for_each_reachable, VariableUsage};
use crate::{ast::*, visit::*};

struct OperationEdge<'a> {
    name: Option<&'a str>,
    defined_vars: Vec<'a, &'a str>,
    used_vars: std::vec::Vec<VariableUsage<'a>>,
    used_fragments: Vec<'a, &'a str>,
}

struct FragmentEdge<'a> {
    used_vars: std::vec::Vec<VariableUsage<'a>>,
    used_fragments: Vec<'a, &'a str>,
}

/// Validate that a document defines all the variables it uses per operation
///
/// Variables that fragments use must be defined by every operation that spreads the fragment,
/// directly or through other fragments.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-All-Variable-Uses-Defined)
pub struct NoUndefinedVariables<'a> {
    arena: &'a Bump,
    used_vars: std::vec::Vec<VariableUsage<'a>>,
    defined_vars: Vec<'a, &'a str>,
    used_fragments: Vec<'a, &'a str>,
    operation_edges: std::vec::Vec<OperationEdge<'a>>,
    fragment_edges: HashMap<&'a str, FragmentEdge<'a>, DefaultHashBuilder, &'a Bump>,
}

impl<'a> DefaultIn<'a> for NoUndefinedVariables<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Self {
            arena,
            used_vars: std::vec::Vec::new(),
            defined_vars: Vec::new_in(arena),
            used_fragments: Vec::new_in(arena),
            operation_edges: std::vec::Vec::new(),
            fragment_edges: HashMap::new_in(arena),
        }
    }
}

impl<'a> ValidationRule<'a> for NoUndefinedVariables<'a> {}

impl<'a> Visitor<'a, ValidationContext<'a>> for NoUndefinedVariables<'a> {
    fn enter_variable_definition(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        var_def: &'a VariableDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.defined_vars.push(var_def.variable.name);
        VisitFlow::Skip
    }

    fn enter_argument(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        argument: &'a Argument<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        let mut names = std::vec::Vec::new();
        collect_variables(&argument.value, &mut names);
        for name in names {
            self.used_vars.push(VariableUsage {
                name,
                span: argument.span,
                path: info.path.clone(),
            });
        }
        VisitFlow::Skip
    }

    fn leave_operation(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        let defined_vars = std::mem::replace(&mut self.defined_vars, Vec::new_in(self.arena));
        let used_fragments = std::mem::replace(&mut self.used_fragments, Vec::new_in(self.arena));
        self.operation_edges.push(OperationEdge {
            name: operation.name.map(|name| name.name),
            defined_vars,
            used_vars: std::mem::take(&mut self.used_vars),
            used_fragments,
        });
        VisitFlow::Next
    }

    fn leave_fragment(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        fragment: &'a FragmentDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        let used_fragments = std::mem::replace(&mut self.used_fragments, Vec::new_in(self.arena));
        self.fragment_edges
            .entry(fragment.name.name)
            .or_insert(FragmentEdge {
                used_vars: std::mem::take(&mut self.used_vars),
                used_fragments,
            });
        VisitFlow::Next
    }

    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        spread: &'a FragmentSpread<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.used_fragments.push(spread.name.name);
        VisitFlow::Skip
    }

    fn leave_document(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        _document: &'a Document<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        for operation_edge in self.operation_edges.iter() {
            let mut report = |usage: &VariableUsage<'a>| {
                if !operation_edge.defined_vars.contains(&usage.name) {
                    let message = match operation_edge.name {
                        Some(operation) => format!(
                            "Variable \"${}\" is not defined by operation \"{}\".",
                            usage.name, operation
                        ),
                        None => format!("Variable \"${}\" is not defined.", usage.name),
                    };
                    ctx.add_error_at(message, usage.span, &usage.path);
                }
            };
            operation_edge.used_vars.iter().for_each(&mut report);
            for_each_reachable(
                &operation_edge.used_fragments,
                &self.fragment_edges,
                |edge| &edge.used_fragments[..],
                |edge| edge.used_vars.iter().for_each(&mut report),
            );
        }
        VisitFlow::Next
    }
}
