use bumpalo::{collections::Vec, Bump};
use hashbrown::{hash_map::DefaultHashBuilder, HashMap, HashSet};

use super::{ErrorKind, ValidationError};
use crate::ast::*;
use crate::visit::{VisitFlow, VisitInfo, VisitNode, Visitor};

/// A fragment that's registered in a [`FragmentGraph`].
#[derive(Debug, Clone)]
pub struct FragmentNode<'a> {
    pub fragment: &'a FragmentDefinition<'a>,
    /// An index the caller tagged this fragment with, e.g. the document it was declared in.
    pub tag: usize,
    /// The names of all fragments this fragment spreads, in order of their first spread.
    pub spreads: Vec<'a, &'a str>,
}

impl<'a> FragmentNode<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        self.fragment.name.name
    }
}

/// The fragments that one or more operations transitively depend on.
#[derive(Debug, Clone)]
pub struct FragmentClosure<'a> {
    /// All reachable fragments, each once, in the order they were first reached.
    pub fragments: std::vec::Vec<&'a FragmentNode<'a>>,
    /// Names that were spread but never registered, each once.
    pub unknown: std::vec::Vec<&'a str>,
}

/// A dependency graph over named fragments, where an edge leads from each fragment to the
/// fragments it spreads.
///
/// The graph tolerates cycles. When a name is registered more than once, the first declaration
/// is kept and later ones are ignored.
pub struct FragmentGraph<'a> {
    arena: &'a Bump,
    nodes: HashMap<&'a str, &'a FragmentNode<'a>, DefaultHashBuilder, &'a Bump>,
}

impl<'a> FragmentGraph<'a> {
    pub fn new(ctx: &'a ASTContext) -> Self {
        FragmentGraph {
            arena: &ctx.arena,
            nodes: HashMap::new_in(&ctx.arena),
        }
    }

    /// Builds a graph of all given fragments, each paired with a tag the caller may use to
    /// identify where the fragment came from.
    pub fn build<I>(ctx: &'a ASTContext, fragments: I) -> Self
    where
        I: IntoIterator<Item = (usize, &'a FragmentDefinition<'a>)>,
    {
        let mut graph = FragmentGraph::new(ctx);
        for (tag, fragment) in fragments {
            graph.add(tag, fragment);
        }
        graph
    }

    /// Builds a graph of all fragments in a document, tagged with their definition index.
    pub fn from_document(ctx: &'a ASTContext, document: &'a Document<'a>) -> Self {
        let fragments = document
            .definitions
            .iter()
            .enumerate()
            .filter_map(|(index, definition)| Some((index, definition.fragment()?)));
        FragmentGraph::build(ctx, fragments)
    }

    /// Registers a fragment and records an edge to every fragment it spreads.
    ///
    /// Returns `false` if a fragment of the same name was registered before.
    pub fn add(&mut self, tag: usize, fragment: &'a FragmentDefinition<'a>) -> bool {
        let name = fragment.name.name;
        if self.nodes.contains_key(name) {
            return false;
        }
        let mut spreads = Vec::new_in(self.arena);
        for spread in collect_spreads(&fragment.selection_set) {
            if !spreads.contains(&spread) {
                spreads.push(spread);
            }
        }
        tracing::trace!(fragment = name, spreads = spreads.len(), "registered fragment");
        let node = self.arena.alloc(FragmentNode {
            fragment,
            tag,
            spreads,
        });
        self.nodes.insert(name, node);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Looks up a registered fragment by name.
    pub fn get(&self, name: &str) -> Result<&'a FragmentNode<'a>, ValidationError> {
        self.nodes.get(name).copied().ok_or_else(|| {
            ValidationError::new(
                ErrorKind::UnknownFragment,
                format!("Unknown fragment \"{}\".", name),
            )
        })
    }

    /// Resolves all fragments that are transitively spread from the given root names.
    ///
    /// Every fragment appears once in the result, in depth-first order of first visit, however
    /// often and through however many cycles it's spread.
    pub fn resolve_closure<'b, I>(&self, roots: I) -> FragmentClosure<'a>
    where
        I: IntoIterator<Item = &'b &'a str>,
        'a: 'b,
    {
        let mut closure = FragmentClosure {
            fragments: std::vec::Vec::new(),
            unknown: std::vec::Vec::new(),
        };
        let mut visited: HashSet<&'a str> = HashSet::new();
        let mut stack: std::vec::Vec<&'a str> = roots.into_iter().copied().collect();
        stack.reverse();
        while let Some(name) = stack.pop() {
            if !visited.insert(name) {
                continue;
            }
            match self.get(name) {
                Ok(node) => {
                    closure.fragments.push(node);
                    stack.extend(node.spreads.iter().rev().copied());
                }
                Err(_) => closure.unknown.push(name),
            }
        }
        tracing::trace!(
            fragments = closure.fragments.len(),
            unknown = closure.unknown.len(),
            "resolved fragment closure"
        );
        closure
    }

    /// Reports every spread inside `document` that refers to a fragment this graph doesn't know.
    pub fn unknown_spreads(&self, document: &'a Document<'a>) -> std::vec::Vec<ValidationError> {
        let mut visitor = UnknownSpreads { graph: self };
        let mut errors = std::vec::Vec::new();
        document.visit(&mut errors, &mut visitor);
        errors
    }
}

struct UnknownSpreads<'g, 'a> {
    graph: &'g FragmentGraph<'a>,
}

impl<'g, 'a> Visitor<'a, std::vec::Vec<ValidationError>> for UnknownSpreads<'g, 'a> {
    fn enter_fragment_spread(
        &mut self,
        errors: &mut std::vec::Vec<ValidationError>,
        spread: &'a FragmentSpread<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        if let Err(error) = self.graph.get(spread.name.name) {
            errors.push(error.at(spread.span, &info.path));
        }
        VisitFlow::Skip
    }

    fn enter_argument(
        &mut self,
        _errors: &mut std::vec::Vec<ValidationError>,
        _argument: &'a Argument<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Skip
    }
}

/// Collects the names of all fragments spread anywhere inside a selection set, including inside
/// nested fields and inline fragments, in document order.
pub fn collect_spreads<'a>(selection_set: &'a SelectionSet<'a>) -> std::vec::Vec<&'a str> {
    let mut names = std::vec::Vec::new();
    let mut stack = vec![selection_set.selections.iter()];
    while let Some(selections) = stack.last_mut() {
        match selections.next() {
            Some(Selection::FragmentSpread(spread)) => names.push(spread.name.name),
            Some(Selection::Field(field)) => stack.push(field.selection_set.selections.iter()),
            Some(Selection::InlineFragment(fragment)) => {
                stack.push(fragment.selection_set.selections.iter())
            }
            None => {
                stack.pop();
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closure_names<'a>(closure: &FragmentClosure<'a>) -> std::vec::Vec<&'a str> {
        closure.fragments.iter().map(|node| node.name()).collect()
    }

    #[test]
    fn collects_nested_spreads() {
        let ctx = ASTContext::new();
        let document =
            Document::parse(&ctx, "{ a { ...A ... on B { ...B } } ...C b { c { ...A } } }")
                .unwrap();
        let operation = document.operations().next().unwrap();
        assert_eq!(
            collect_spreads(&operation.selection_set),
            vec!["A", "B", "C", "A"]
        );
    }

    #[test]
    fn resolves_closure_once_per_fragment() {
        let ctx = ASTContext::new();
        let document = Document::parse(
            &ctx,
            "fragment A on T { ...B ...C } fragment B on T { ...C x } fragment C on T { y } fragment D on T { z }",
        )
        .unwrap();
        let graph = FragmentGraph::from_document(&ctx, document);
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.get("B").unwrap().spreads.as_slice(), &["C"]);

        let closure = graph.resolve_closure(&["A", "C"]);
        assert_eq!(closure_names(&closure), vec!["A", "B", "C"]);
        assert!(closure.unknown.is_empty());
    }

    #[test]
    fn cycles_terminate() {
        let ctx = ASTContext::new();
        let document = Document::parse(
            &ctx,
            "fragment A on T { ...B } fragment B on T { ...C } fragment C on T { ...A ...C }",
        )
        .unwrap();
        let graph = FragmentGraph::from_document(&ctx, document);
        for root in ["A", "B", "C"] {
            let closure = graph.resolve_closure(&[root]);
            let mut names = closure_names(&closure);
            assert_eq!(names[0], root);
            names.sort_unstable();
            assert_eq!(names, vec!["A", "B", "C"]);
        }
    }

    #[test]
    fn first_declaration_wins() {
        let ctx = ASTContext::new();
        let first = Document::parse(&ctx, "fragment A on T { a }").unwrap();
        let second = Document::parse(&ctx, "fragment A on T { ...B }").unwrap();
        let mut graph = FragmentGraph::new(&ctx);
        assert!(graph.add(0, first.fragments().next().unwrap()));
        assert!(!graph.add(1, second.fragments().next().unwrap()));
        let node = graph.get("A").unwrap();
        assert_eq!(node.tag, 0);
        assert!(node.spreads.is_empty());
    }

    #[test]
    fn unknown_fragments() {
        let ctx = ASTContext::new();
        let document =
            Document::parse(&ctx, "{ ...Known ...Missing } fragment Known on T { ...Gone }")
                .unwrap();
        let graph = FragmentGraph::from_document(&ctx, document);

        let error = graph.get("Missing").unwrap_err();
        assert_eq!(error.kind, ErrorKind::UnknownFragment);
        assert_eq!(error.message, "Unknown fragment \"Missing\".");

        let closure = graph.resolve_closure(&["Known", "Missing"]);
        assert_eq!(closure_names(&closure), vec!["Known"]);
        assert_eq!(closure.unknown, vec!["Gone", "Missing"]);

        let errors = graph.unknown_spreads(document);
        let paths: std::vec::Vec<String> = errors
            .iter()
            .map(|error| error.path.as_ref().unwrap().to_string())
            .collect();
        assert_eq!(paths, vec!["0.selectionSet.1", "1.selectionSet.0"]);
    }
}
