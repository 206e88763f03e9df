use bumpalo::{collections::Vec, Bump};
use hashbrown::{hash_map::DefaultHashBuilder, HashMap};

use super::super::{ValidationContext, ValidationRule};
use super::{collect_variables, for_each_reachable};
use crate::{ast::*, visit::*};

struct OperationEdge<'a> {
    name: Option<&'a str>,
    span: Span,
    defined_vars: std::vec::Vec<(&'a str, Path)>,
    used_vars: Vec<'a, &'a str>,
    used_fragments: Vec<'a, &'a str>,
}

struct FragmentEdge<'a> {
    used_vars: Vec<'a, &'a str>,
    used_fragments: Vec<'a, &'a str>,
}

/// Validate that a document uses all the variables it defines at least once, either in the
/// operation itself or in any fragment the operation spreads.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/draft/#sec-All-Variables-Used)
pub struct NoUnusedVariables<'a> {
    arena: &'a Bump,
    defined_vars: std::vec::Vec<(&'a str, Path)>,
    used_vars: Vec<'a, &'a str>,
    used_fragments: Vec<'a, &'a str>,
    operation_edges: std::vec::Vec<OperationEdge<'a>>,
    fragment_edges: HashMap<&'a str, FragmentEdge<'a>, DefaultHashBuilder, &'a Bump>,
}

impl<'a> DefaultIn<'a> for NoUnusedVariables<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Self {
            arena,
            defined_vars: std::vec::Vec::new(),
            used_vars: Vec::new_in(arena),
            used_fragments: Vec::new_in(arena),
            operation_edges: std::vec::Vec::new(),
            fragment_edges: HashMap::new_in(arena),
        }
    }
}

impl<'a> ValidationRule<'a> for NoUnusedVariables<'a> {}

impl<'a> Visitor<'a, ValidationContext<'a>> for NoUnusedVariables<'a> {
    fn enter_variable_definition(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        var_def: &'a VariableDefinition<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        self.defined_vars
            .push((var_def.variable.name, info.path.clone()));
        VisitFlow::Skip
    }

    fn enter_argument(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        argument: &'a Argument<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        let mut names = std::vec::Vec::new();
        collect_variables(&argument.value, &mut names);
        self.used_vars.extend(names);
        VisitFlow::Skip
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

    fn leave_operation(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        let used_vars = std::mem::replace(&mut self.used_vars, Vec::new_in(self.arena));
        let used_fragments = std::mem::replace(&mut self.used_fragments, Vec::new_in(self.arena));
        self.operation_edges.push(OperationEdge {
            name: operation.name.map(|name| name.name),
            span: operation.span,
            defined_vars: std::mem::take(&mut self.defined_vars),
            used_vars,
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
        let used_vars = std::mem::replace(&mut self.used_vars, Vec::new_in(self.arena));
        let used_fragments = std::mem::replace(&mut self.used_fragments, Vec::new_in(self.arena));
        self.fragment_edges
            .entry(fragment.name.name)
            .or_insert(FragmentEdge {
                used_vars,
                used_fragments,
            });
        VisitFlow::Next
    }

    fn leave_document(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        _document: &'a Document<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        for operation_edge in self.operation_edges.iter() {
            let mut used_vars = Vec::new_in(self.arena);
            used_vars.extend(operation_edge.used_vars.iter().copied());
            for_each_reachable(
                &operation_edge.used_fragments,
                &self.fragment_edges,
                |edge| &edge.used_fragments[..],
                |edge| used_vars.extend(edge.used_vars.iter().copied()),
            );
            for (name, path) in operation_edge.defined_vars.iter() {
                if !used_vars.contains(name) {
                    let message = match operation_edge.name {
                        Some(operation) => format!(
                            "Variable \"${}\" is never used in operation \"{}\".",
                            name, operation
                        ),
                        None => format!("Variable \"${}\" is never used.", name),
                    };
                    ctx.add_error_at(message, operation_edge.span, path);
                }
            }
        }
        VisitFlow::Next
    }
}
