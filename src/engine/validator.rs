use bumpalo::collections::Vec as ArenaVec;

use super::{
    read_sources, ClientDirectives, DirectiveTransform, DocumentSource, InvalidDocument,
    ParsedSource, Report, ReportSink, ValidateOptions,
};
use crate::ast::*;
use crate::check::{
    collect_spreads, document_depth, find_duplicate_fragments, scan_deprecations, Depth,
    FragmentGraph, ValidationError,
};
use crate::error::{get_location, Location, Result};
use crate::schema::Schema;
use crate::validate::{StandardRules, StructuralValidator};
use crate::visit::{Path, PathSegment};

/// Validates a set of documents against a schema and reports every document with findings.
///
/// Each document that contains operations is validated together with all fragments its
/// operations spread, wherever these fragments are declared. Fragment-only documents are only
/// validated as part of the documents that use them.
///
/// The structural rules and the transform for client-side directives may be replaced, e.g. to
/// run a custom set of [`ValidationRule`](crate::validate::ValidationRule)s.
#[derive(Debug, Default, Clone)]
pub struct DocumentValidator<V = StandardRules, T = ClientDirectives> {
    pub options: ValidateOptions,
    validator: V,
    transform: T,
}

impl DocumentValidator {
    pub fn new(options: ValidateOptions) -> Self {
        DocumentValidator {
            options,
            validator: StandardRules,
            transform: ClientDirectives,
        }
    }
}

/// Where a definition of a combined document was declared.
struct Combined<'a> {
    document: &'a Document<'a>,
    /// The source index of each of the document's definitions.
    origins: Vec<usize>,
}

impl<V: StructuralValidator, T: DirectiveTransform> DocumentValidator<V, T> {
    pub fn with_validator<W: StructuralValidator>(self, validator: W) -> DocumentValidator<W, T> {
        DocumentValidator {
            options: self.options,
            validator,
            transform: self.transform,
        }
    }

    pub fn with_transform<U: DirectiveTransform>(self, transform: U) -> DocumentValidator<V, U> {
        DocumentValidator {
            options: self.options,
            validator: self.validator,
            transform,
        }
    }

    /// Validates all sources and collects the records of invalid documents into a [`Report`].
    pub fn validate<'a>(
        &self,
        ctx: &'a ASTContext,
        schema: &'a Schema<'a>,
        sources: &'a [DocumentSource],
    ) -> Result<Report> {
        let mut report = Report::default();
        self.validate_into(ctx, schema, sources, &mut report)?;
        Ok(report)
    }

    /// Validates all sources and hands a record for each document with findings to `sink`, in
    /// the order of `sources`.
    ///
    /// Fails without reporting anything if any source can't be parsed.
    pub fn validate_into<'a, S: ReportSink>(
        &self,
        ctx: &'a ASTContext,
        schema: &'a Schema<'a>,
        sources: &'a [DocumentSource],
        sink: &mut S,
    ) -> Result<()> {
        let parsed = read_sources(ctx, sources)?;
        let graph = FragmentGraph::build(
            ctx,
            parsed.iter().flat_map(|source| source.tagged_fragments()),
        );
        let mut duplicates = self.duplicate_fragments(&parsed);
        let schema = if self.options.vendor_directives {
            self.transform.transform_schema(ctx, schema)
        } else {
            schema
        };

        let mut invalid = 0;
        for source in parsed.iter() {
            let mut record = InvalidDocument::new(source.origin());
            if source.has_operations() {
                self.check_document(ctx, schema, &parsed, &graph, source, &mut record)?;
            }
            if !duplicates[source.index].is_empty() {
                tracing::debug!(
                    origin = source.origin(),
                    duplicates = duplicates[source.index].len(),
                    "duplicate fragment names"
                );
                record.errors.append(&mut duplicates[source.index]);
            }
            if !record.is_empty() {
                invalid += 1;
                sink.report(record);
            }
        }

        tracing::info!(
            documents = parsed.len(),
            fragments = graph.len(),
            invalid,
            "validated documents"
        );
        Ok(())
    }

    /// Finds all repeated fragment declarations of a run, grouped by the source declaring them.
    fn duplicate_fragments(&self, parsed: &[ParsedSource<'_>]) -> Vec<Vec<ValidationError>> {
        let mut duplicates = vec![Vec::new(); parsed.len()];
        if !self.options.strict_fragments {
            return duplicates;
        }
        let declarations: Vec<(&ParsedSource<'_>, usize, &FragmentDefinition<'_>)> = parsed
            .iter()
            .flat_map(|source| {
                source
                    .document
                    .definitions
                    .iter()
                    .enumerate()
                    .filter_map(move |(index, definition)| {
                        Some((source, index, definition.fragment()?))
                    })
            })
            .collect();
        let names = declarations.iter().map(|(_, _, fragment)| fragment.name.name);
        for duplicate in find_duplicate_fragments(names) {
            let (source, index, fragment) = declarations[duplicate.occurrence];
            let path = Path {
                segments: vec![PathSegment::Index(index)],
            };
            let mut error = ValidationError::from(duplicate).at(fragment.span, &path);
            error.location = Some(get_location(&source.source.text, fragment.span));
            duplicates[source.index].push(error);
        }
        duplicates
    }

    /// Merges a source's operations with all fragments they transitively spread.
    fn combine<'a>(
        &self,
        ctx: &'a ASTContext,
        graph: &FragmentGraph<'a>,
        source: &ParsedSource<'a>,
    ) -> Combined<'a> {
        let document = source.document;
        let mut definitions: ArenaVec<Definition> = ArenaVec::new_in(&ctx.arena);
        let mut origins = Vec::new();
        let mut roots = Vec::new();
        for operation in document.operations() {
            roots.extend(collect_spreads(&operation.selection_set));
            definitions.push(operation.clone().into());
            origins.push(source.index);
        }
        let closure = graph.resolve_closure(&roots);
        for node in closure.fragments.iter() {
            definitions.push(node.fragment.clone().into());
            origins.push(node.tag);
        }
        let document = ctx.alloc(Document {
            definitions,
            size_hint: document.size_hint,
        });
        Combined { document, origins }
    }

    fn check_document<'a>(
        &self,
        ctx: &'a ASTContext,
        schema: &'a Schema<'a>,
        parsed: &[ParsedSource<'a>],
        graph: &FragmentGraph<'a>,
        source: &ParsedSource<'a>,
        record: &mut InvalidDocument,
    ) -> Result<()> {
        let Combined { document, origins } = self.combine(ctx, graph, source);
        tracing::debug!(
            origin = source.origin(),
            operations = source.document.operations().count(),
            fragments = document.definitions.len() - source.document.operations().count(),
            "validating document"
        );
        let document = if self.options.vendor_directives {
            self.transform
                .transform_document(ctx, document, self.options.keep_tagged_fields)?
        } else {
            document
        };

        let mut errors = self.validator.validate(ctx, schema, document);
        if !errors.is_empty() {
            tracing::debug!(origin = source.origin(), errors = errors.len(), "schema violations");
        }

        let local_graph = FragmentGraph::from_document(ctx, document);
        errors.extend(local_graph.unknown_spreads(document));

        if let Some(max_depth) = self.options.depth_limit() {
            if let Depth::Exceeded(breach) = document_depth(document, Some(max_depth), &local_graph)
            {
                tracing::debug!(origin = source.origin(), max_depth, "depth exceeded");
                errors.push(breach.into());
            }
        }

        let mut deprecated = if self.options.strict_deprecated {
            scan_deprecations(ctx, schema, document)
        } else {
            Vec::new()
        };
        if !deprecated.is_empty() {
            tracing::debug!(
                origin = source.origin(),
                deprecated = deprecated.len(),
                "deprecated usages"
            );
        }

        for error in errors.iter_mut() {
            error.location = locate(parsed, &origins, error.span(), error.path.as_ref());
        }
        for warning in deprecated.iter_mut() {
            warning.location = locate(parsed, &origins, Some(warning.span()), Some(&warning.path));
        }
        record.errors.extend(errors);
        record.deprecated.extend(deprecated);
        Ok(())
    }
}

/// Resolves the line and column of a node in a combined document, in the text of the source
/// that declared the node's definition.
fn locate(
    parsed: &[ParsedSource<'_>],
    origins: &[usize],
    span: Option<Span>,
    path: Option<&Path>,
) -> Option<Location> {
    let span = span?;
    let origin = *origins.get(path?.definition_index()?)?;
    let source = parsed.get(origin)?;
    Some(get_location(&source.source.text, span))
}

/// Validates all sources against a schema using the default rules and returns a [`Report`] of the
/// documents with findings.
///
/// ```
/// use graphql_validate::{ast::*, schema::*, validate, DocumentSource, ValidateOptions};
///
/// let ctx = ASTContext::new();
/// let schema = Schema::parse(&ctx, "type Query { user: User } type User { name: String }").unwrap();
/// let sources = vec![
///     DocumentSource::new("user.graphql", "query User { user { ...UserFields } }"),
///     DocumentSource::new("fragments.graphql", "fragment UserFields on User { name }"),
/// ];
///
/// let report = validate(&ctx, schema, &sources, ValidateOptions::default()).unwrap();
/// assert!(report.status());
/// assert!(report.documents.is_empty());
/// ```
pub fn validate<'a>(
    ctx: &'a ASTContext,
    schema: &'a Schema<'a>,
    sources: &'a [DocumentSource],
    options: ValidateOptions,
) -> Result<Report> {
    DocumentValidator::new(options).validate(ctx, schema, sources)
}
