use crate::ast::*;
use crate::error::Result;

/// The raw text of one document and the origin it was loaded from, e.g. a file path or URL.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
pub struct DocumentSource {
    pub origin: String,
    pub text: String,
}

impl DocumentSource {
    pub fn new<O: Into<String>, T: Into<String>>(origin: O, text: T) -> Self {
        DocumentSource {
            origin: origin.into(),
            text: text.into(),
        }
    }
}

/// A [`DocumentSource`] after it has been parsed.
///
/// `index` is the position of the source in the list it was read from and identifies where each
/// of its definitions came from.
#[derive(Debug, Clone, Copy)]
pub struct ParsedSource<'a> {
    pub index: usize,
    pub source: &'a DocumentSource,
    pub document: &'a Document<'a>,
}

impl<'a> ParsedSource<'a> {
    #[inline]
    pub fn origin(&self) -> &'a str {
        &self.source.origin
    }

    #[inline]
    pub fn has_operations(&self) -> bool {
        self.document.operations().next().is_some()
    }

    #[inline]
    pub fn has_fragments(&self) -> bool {
        self.document.fragments().next().is_some()
    }

    /// Iterates over this document's fragments, each tagged with the index of this source.
    pub fn tagged_fragments(&self) -> impl Iterator<Item = (usize, &'a FragmentDefinition<'a>)> {
        let index = self.index;
        let document: &'a Document<'a> = self.document;
        document.fragments().map(move |fragment| (index, fragment))
    }
}

/// Parses every source into a document.
///
/// Fails on the first source that can't be parsed, with the source's origin prefixed to the
/// error's message.
pub fn read_sources<'a>(
    ctx: &'a ASTContext,
    sources: &'a [DocumentSource],
) -> Result<Vec<ParsedSource<'a>>> {
    sources
        .iter()
        .enumerate()
        .map(|(index, source)| {
            let document =
                Document::parse(ctx, &source.text).map_err(|err| err.in_origin(&source.origin))?;
            tracing::trace!(
                origin = source.origin.as_str(),
                definitions = document.definitions.len(),
                "parsed document"
            );
            Ok(ParsedSource {
                index,
                source,
                document,
            })
        })
        .collect()
}
