use hashbrown::{HashMap, HashSet};

use super::{collect_spreads, ErrorKind, FragmentGraph, ValidationError};
use crate::ast::*;
use crate::visit::{Path, PathSegment};

/// The outcome of bounding the depth of a selection tree.
#[derive(Debug, PartialEq, Clone)]
pub enum Depth<'a> {
    /// The deepest field sits at this depth, which is within the limit.
    Within(usize),
    /// A field was reached below the limit and the walk stopped there.
    Exceeded(DepthBreach<'a>),
}

/// The first field that was found nested more deeply than a depth limit allows.
#[derive(Debug, PartialEq, Clone)]
pub struct DepthBreach<'a> {
    pub field: &'a Field<'a>,
    /// The depth of `field`, where top-level fields have a depth of 1.
    pub depth: usize,
    pub max_depth: usize,
    pub path: Path,
}

impl<'a> From<DepthBreach<'a>> for ValidationError {
    fn from(breach: DepthBreach<'a>) -> Self {
        ValidationError::new(
            ErrorKind::DepthExceeded,
            format!("Query exceeds maximum depth of {}", breach.max_depth),
        )
        .at(breach.field.span, &breach.path)
    }
}

/// The depth each fragment adds below the level it's spread at, measured once per fragment.
///
/// A spread that leads back into a fragment that's still being measured adds nothing, and so
/// the spreads that count form an acyclic graph.
struct FragmentDepths<'a> {
    depths: HashMap<&'a str, usize>,
    cyclic: HashSet<(&'a str, &'a str)>,
}

impl<'a> FragmentDepths<'a> {
    fn new() -> Self {
        FragmentDepths {
            depths: HashMap::new(),
            cyclic: HashSet::new(),
        }
    }

    /// The depth a spread of `name` inside `fragment` adds, or `None` if the spread refers to an
    /// unknown fragment or cycles back.
    fn spread_depth(&self, fragment: Option<&'a str>, name: &'a str) -> Option<usize> {
        match fragment {
            Some(fragment) if self.cyclic.contains(&(fragment, name)) => None,
            _ => self.depths.get(name).copied(),
        }
    }

    /// Measures every fragment reachable from `roots` that hasn't been measured yet, finishing
    /// the fragments a fragment spreads before the fragment itself.
    fn measure<I>(&mut self, roots: I, graph: &FragmentGraph<'a>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut on_stack: HashSet<&'a str> = HashSet::new();
        for root in roots {
            if self.depths.contains_key(root) {
                continue;
            }
            let Ok(node) = graph.get(root) else {
                continue;
            };
            on_stack.insert(root);
            let mut stack = vec![(node, 0)];
            while let Some((node, next)) = stack.last_mut() {
                let node = *node;
                if let Some(&spread) = node.spreads.get(*next) {
                    *next += 1;
                    if on_stack.contains(spread) {
                        self.cyclic.insert((node.name(), spread));
                    } else if !self.depths.contains_key(spread) {
                        if let Ok(child) = graph.get(spread) {
                            on_stack.insert(spread);
                            stack.push((child, 0));
                        }
                    }
                } else {
                    let depth = self.selection_depth(&node.fragment.selection_set, node.name());
                    tracing::trace!(fragment = node.name(), depth, "measured fragment");
                    self.depths.insert(node.name(), depth);
                    on_stack.remove(node.name());
                    stack.pop();
                }
            }
        }
    }

    /// The depth of a fragment's selection set, once all fragments it spreads are measured.
    fn selection_depth(&self, selection_set: &'a SelectionSet<'a>, fragment: &'a str) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(selection_set.selections.iter(), 1)];
        while let Some((selections, level)) = stack.last_mut() {
            let level = *level;
            let Some(selection) = selections.next() else {
                stack.pop();
                continue;
            };
            match selection {
                Selection::Field(field) if field.is_introspection() => {}
                Selection::Field(field) => {
                    deepest = deepest.max(level);
                    if !field.selection_set.is_empty() {
                        stack.push((field.selection_set.selections.iter(), level + 1));
                    }
                }
                Selection::InlineFragment(inline) => {
                    stack.push((inline.selection_set.selections.iter(), level));
                }
                Selection::FragmentSpread(spread) => {
                    if let Some(depth) = self.spread_depth(Some(fragment), spread.name.name) {
                        deepest = deepest.max(level - 1 + depth);
                    }
                }
            }
        }
        deepest
    }
}

struct Frame<'a> {
    selections: std::iter::Enumerate<std::slice::Iter<'a, Selection<'a>>>,
    depth: usize,
    path: Path,
    /// The fragment whose selections this frame walks, if any.
    fragment: Option<&'a str>,
}

impl<'a> Frame<'a> {
    fn new(
        selection_set: &'a SelectionSet<'a>,
        depth: usize,
        path: Path,
        fragment: Option<&'a str>,
    ) -> Self {
        Frame {
            selections: selection_set.selections.iter().enumerate(),
            depth,
            path,
            fragment,
        }
    }
}

/// Computes the depth of a selection set's fields, following fragment spreads through `graph`.
///
/// Fields in `selection_set` itself have a depth of 1 and each nested selection set adds one
/// level, while spreads and inline fragments continue at the depth they appear at. Sibling
/// selections don't add up; the deepest of them counts. Introspection fields, such as
/// `__typename` or `__schema`, are neither counted nor descended into.
///
/// `path` must point at `selection_set`, so that a breach can be reported at the path of the
/// offending field. Fields of spread fragments are reported relative to the definition index the
/// fragment was tagged with in `graph`.
///
/// When `max_depth` is a nonzero limit the walk stops at the first field that's nested more
/// deeply than the limit. Each fragment is measured once, however often it's spread, and the
/// walk only enters a fragment to find the field that breaks the limit. Spreads of unknown
/// fragments and spreads that cycle back into a fragment add nothing.
pub fn compute_depth<'a>(
    selection_set: &'a SelectionSet<'a>,
    path: &Path,
    max_depth: Option<usize>,
    graph: &FragmentGraph<'a>,
) -> Depth<'a> {
    walk_depth(selection_set, path, max_depth, graph, &mut FragmentDepths::new())
}

fn walk_depth<'a>(
    selection_set: &'a SelectionSet<'a>,
    path: &Path,
    max_depth: Option<usize>,
    graph: &FragmentGraph<'a>,
    fragments: &mut FragmentDepths<'a>,
) -> Depth<'a> {
    let max_depth = max_depth.filter(|max_depth| *max_depth > 0);
    fragments.measure(collect_spreads(selection_set), graph);
    let mut deepest = 0;
    let mut stack = vec![Frame::new(selection_set, 1, path.clone(), None)];
    while let Some(frame) = stack.last_mut() {
        let Some((index, selection)) = frame.selections.next() else {
            stack.pop();
            continue;
        };
        let depth = frame.depth;
        let fragment = frame.fragment;
        let mut selection_path = frame.path.clone();
        selection_path.push(PathSegment::Index(index));
        match selection {
            Selection::Field(field) if field.is_introspection() => {}
            Selection::Field(field) => {
                if let Some(max_depth) = max_depth {
                    if depth > max_depth {
                        tracing::debug!(field = field.name, depth, max_depth, "depth exceeded");
                        return Depth::Exceeded(DepthBreach {
                            field,
                            depth,
                            max_depth,
                            path: selection_path,
                        });
                    }
                }
                deepest = deepest.max(depth);
                if !field.selection_set.is_empty() {
                    selection_path.push(PathSegment::SelectionSet);
                    let selection_set = &field.selection_set;
                    stack.push(Frame::new(selection_set, depth + 1, selection_path, fragment));
                }
            }
            Selection::InlineFragment(inline) => {
                selection_path.push(PathSegment::SelectionSet);
                let selection_set = &inline.selection_set;
                stack.push(Frame::new(selection_set, depth, selection_path, fragment));
            }
            Selection::FragmentSpread(spread) => {
                let name = spread.name.name;
                let Some(fragment_depth) = fragments.spread_depth(fragment, name) else {
                    continue;
                };
                let reach = depth - 1 + fragment_depth;
                deepest = deepest.max(reach);
                let exceeds = max_depth.map_or(false, |max_depth| reach > max_depth);
                if let (true, Ok(node)) = (exceeds, graph.get(name)) {
                    let path = Path {
                        segments: vec![PathSegment::Index(node.tag), PathSegment::SelectionSet],
                    };
                    let selection_set = &node.fragment.selection_set;
                    stack.push(Frame::new(selection_set, depth, path, Some(name)));
                }
            }
        }
    }
    Depth::Within(deepest)
}

/// Computes the depth of all operations in a document and returns the deepest, or the first
/// breach of `max_depth` in document order.
///
/// Fragment definitions are only walked where operations spread them.
pub fn document_depth<'a>(
    document: &'a Document<'a>,
    max_depth: Option<usize>,
    graph: &FragmentGraph<'a>,
) -> Depth<'a> {
    let mut fragments = FragmentDepths::new();
    let mut deepest = 0;
    for (index, definition) in document.definitions.iter().enumerate() {
        let Definition::Operation(operation) = definition else {
            continue;
        };
        let path = Path {
            segments: vec![PathSegment::Index(index), PathSegment::SelectionSet],
        };
        match walk_depth(&operation.selection_set, &path, max_depth, graph, &mut fragments) {
            Depth::Within(depth) => deepest = deepest.max(depth),
            breach => return breach,
        }
    }
    Depth::Within(deepest)
}

#[cfg(test)]
mod tests {
    use super::*;

    type Breach = (String, usize, String);

    fn depth_of(source: &str, max_depth: Option<usize>) -> Result<usize, Breach> {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, source).unwrap();
        let graph = FragmentGraph::from_document(&ctx, document);
        match document_depth(document, max_depth, &graph) {
            Depth::Within(depth) => Ok(depth),
            Depth::Exceeded(breach) => Err((
                breach.field.name.to_string(),
                breach.depth,
                breach.path.to_string(),
            )),
        }
    }

    #[test]
    fn nested_fields() {
        assert_eq!(depth_of("{ a }", None), Ok(1));
        assert_eq!(depth_of("{ a { b { c } } }", None), Ok(3));
        assert_eq!(depth_of("{ a { b { c } } }", Some(3)), Ok(3));
        assert_eq!(depth_of("query Empty { __typename }", None), Ok(0));
    }

    #[test]
    fn siblings_take_the_maximum() {
        assert_eq!(depth_of("{ a { b } c { d { e } } f }", None), Ok(3));
        assert_eq!(depth_of("query A { a } query B { a { b } }", None), Ok(2));
    }

    #[test]
    fn reports_first_breach() {
        assert_eq!(
            depth_of("{ a { b { c } } d { e { f } } }", Some(2)),
            Err(("c".into(), 3, "0.selectionSet.0.selectionSet.0.selectionSet.0".into()))
        );
    }

    #[test]
    fn zero_disables_the_limit() {
        assert_eq!(depth_of("{ a { b { c { d } } } }", Some(0)), Ok(4));
    }

    #[test]
    fn introspection_is_not_counted() {
        assert_eq!(
            depth_of("{ __schema { types { fields { name } } } a }", Some(1)),
            Ok(1)
        );
        assert_eq!(
            depth_of("{ a { __type(name: \"A\") { fields { name } } } }", Some(1)),
            Ok(1)
        );
    }

    #[test]
    fn spreads_add_no_level() {
        let source = "
            { a { ...F ... on A { b } } }
            fragment F on A { c { d } }
        ";
        assert_eq!(depth_of(source, None), Ok(3));
        assert_eq!(
            depth_of(source, Some(2)),
            Err(("d".into(), 3, "1.selectionSet.0.selectionSet.0".into()))
        );
    }

    #[test]
    fn cyclic_and_unknown_spreads_terminate() {
        let source = "
            { a { ...A ...Missing } }
            fragment A on T { b { ...B } }
            fragment B on T { c ...A }
        ";
        assert_eq!(depth_of(source, None), Ok(3));
    }

    #[test]
    fn breach_converts_to_error() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ a { b { c } } }").unwrap();
        let graph = FragmentGraph::from_document(&ctx, document);
        let Depth::Exceeded(breach) = document_depth(document, Some(2), &graph) else {
            panic!("expected the depth to be exceeded");
        };
        let error = ValidationError::from(breach);
        assert_eq!(error.kind, ErrorKind::DepthExceeded);
        assert_eq!(error.message, "Query exceeds maximum depth of 2");
        assert_eq!(error.span(), Some(Span::new(10, 11)));
    }

    #[test]
    fn repeated_spreads_are_measured_once() {
        let mut flat = String::from("{ ...F0 }\n");
        let mut nested = String::from("{ ...F0 }\n");
        for index in 0..40 {
            let next = index + 1;
            flat.push_str(&format!(
                "fragment F{index} on T {{ x ...F{next} ...F{next} }}\n"
            ));
            nested.push_str(&format!(
                "fragment F{index} on T {{ x {{ ...F{next} ...F{next} }} }}\n"
            ));
        }
        flat.push_str("fragment F40 on T { x }\n");
        nested.push_str("fragment F40 on T { x }\n");

        assert_eq!(depth_of(&flat, Some(10)), Ok(1));
        assert_eq!(depth_of(&nested, None), Ok(41));
        assert_eq!(depth_of(&nested, Some(50)), Ok(41));
        assert_eq!(
            depth_of(&nested, Some(10)),
            Err(("x".into(), 11, "11.selectionSet.0".into()))
        );
    }

    #[test]
    fn cyclic_spreads_in_breaching_fragments() {
        let source = "
            { ...A }
            fragment A on T { a { ...B } }
            fragment B on T { b { ...A c { d } } }
        ";
        assert_eq!(depth_of(source, None), Ok(4));
        assert_eq!(
            depth_of(source, Some(3)),
            Err(("d".into(), 4, "2.selectionSet.0.selectionSet.1.selectionSet.0".into()))
        );
    }
}
