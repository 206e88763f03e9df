use bumpalo::{collections::Vec, Bump};
use hashbrown::{hash_map::DefaultHashBuilder, HashMap, HashSet};

use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

struct FragmentEdge<'a> {
    span: Span,
    path: Path,
    spreads: Vec<'a, &'a str>,
}

/// Validate that a document does not contain fragments that are spread within themselves, creating a loop.
///
/// Every cycle is reported once, on the member that's defined first.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Fragment-spreads-must-not-form-cycles)
pub struct NoFragmentCycles<'a> {
    arena: &'a Bump,
    fragment_order: Vec<'a, &'a str>,
    fragment_edges: HashMap<&'a str, FragmentEdge<'a>, DefaultHashBuilder, &'a Bump>,
    used_fragments: Vec<'a, &'a str>,
}

impl<'a> DefaultIn<'a> for NoFragmentCycles<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Self {
            arena,
            fragment_order: Vec::new_in(arena),
            fragment_edges: HashMap::new_in(arena),
            used_fragments: Vec::new_in(arena),
        }
    }
}

impl<'a> ValidationRule<'a> for NoFragmentCycles<'a> {}

impl<'a> Visitor<'a, ValidationContext<'a>> for NoFragmentCycles<'a> {
    fn enter_operation(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _operation: &'a OperationDefinition<'a>,
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
        self.used_fragments.clear();
        VisitFlow::Next
    }

    fn leave_fragment(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        fragment: &'a FragmentDefinition<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        let name = fragment.name.name;
        if !self.fragment_edges.contains_key(name) {
            let spreads = std::mem::replace(&mut self.used_fragments, Vec::new_in(self.arena));
            self.fragment_order.push(name);
            self.fragment_edges.insert(
                name,
                FragmentEdge {
                    span: fragment.span,
                    path: info.path.clone(),
                    spreads,
                },
            );
        }
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
        let mut reported: HashSet<&'a str> = HashSet::new();
        for &name in self.fragment_order.iter() {
            if reported.contains(name) {
                continue;
            }
            if let Some(via) = find_cycle(name, &self.fragment_edges) {
                reported.extend(via.iter().copied());
                let edge = &self.fragment_edges[name];
                let message = if via.is_empty() {
                    format!("Cannot spread fragment \"{}\" within itself.", name)
                } else {
                    let via = via
                        .iter()
                        .map(|name| format!("\"{}\"", name))
                        .collect::<std::vec::Vec<_>>()
                        .join(", ");
                    format!(
                        "Cannot spread fragment \"{}\" within itself via {}.",
                        name, via
                    )
                };
                ctx.add_error_at(message, edge.span, &edge.path);
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

/// Searches for a spread chain leading from `root` back to itself and returns the fragments the
/// chain passes through.
fn find_cycle<'a>(
    root: &'a str,
    fragment_edges: &HashMap<&'a str, FragmentEdge<'a>, DefaultHashBuilder, &'a Bump>,
) -> Option<std::vec::Vec<&'a str>> {
    let mut visited: HashSet<&'a str> = HashSet::new();
    visited.insert(root);
    // Each stack entry is a fragment on the current chain and the index of its next spread
    let mut stack: std::vec::Vec<(&'a str, usize)> = vec![(root, 0)];
    while let Some((name, index)) = stack.last_mut() {
        let spreads = match fragment_edges.get(*name) {
            Some(edge) => &edge.spreads,
            None => {
                stack.pop();
                continue;
            }
        };
        let Some(next) = spreads.get(*index).copied() else {
            stack.pop();
            continue;
        };
        *index += 1;
        if next == root {
            return Some(stack.iter().skip(1).map(|(name, _)| *name).collect());
        } else if !visited.contains(next) {
            visited.insert(next);
            stack.push((next, 0));
        }
    }
    None
}
