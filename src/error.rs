//! # Error and Result for this crate
//!
//! This crate defines a common [Error] structure for failures that stop a validation run, such as
//! a document or schema that can't be parsed. Findings on valid input, like depth breaches or
//! deprecated usages, aren't errors in this sense and are reported as
//! [`ValidationError`](crate::check::ValidationError) records instead.

use crate::ast::Span;
use std::{error, fmt, result};

/// This crate's result type using the [Error] structure.
pub type Result<T> = result::Result<T, Error>;

/// This crate's error structure which internal errors are converted into.
///
/// The error is split into a general message and a context string. For parsing, the context
/// string is populated with a snippet of the source text that points at the offending token.
#[derive(PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) message: String,
    pub(crate) location: Option<Location>,
    pub(crate) context: Option<String>,
    pub(crate) error_type: ErrorType,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorType {
    GraphQL,
    Syntax,
    Schema,
}

impl Error {
    /// Create a new Error with only a main message from an input string.
    pub fn new<S: Into<String>>(message: S, error_type: Option<ErrorType>) -> Self {
        Self {
            message: message.into(),
            location: None,
            context: None,
            error_type: error_type.unwrap_or(ErrorType::GraphQL),
        }
    }

    /// Create a new Error with a main message, a location, and a context string.
    pub fn new_with_context<S: Into<String>>(
        message: S,
        location: Option<Location>,
        context: S,
        error_type: Option<ErrorType>,
    ) -> Self {
        Self {
            message: message.into(),
            location,
            context: Some(context.into()),
            error_type: error_type.unwrap_or(ErrorType::GraphQL),
        }
    }

    /// Returns the message of the current error. The context is discarded.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the location of the current error.
    pub fn location(&self) -> &Option<Location> {
        &self.location
    }

    /// Returns the kind of failure this error represents.
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Prefixes the message with the name of the document or schema the error originated from.
    pub(crate) fn in_origin(mut self, origin: &str) -> Self {
        self.message = format!("{}: {}", origin, self.message);
        self
    }

    /// Formats this error, with the option to include the context information as well,
    /// which will cause the string to be multi-line.
    pub fn print(&self, include_ctx: bool) -> String {
        let formatted = match self.error_type {
            ErrorType::GraphQL => format!("GraphQL Error: {}", self.message),
            ErrorType::Syntax => format!("Syntax Error: {}", self.message),
            ErrorType::Schema => format!("Schema Error: {}", self.message),
        };

        match self.context {
            Some(ref context) if include_ctx => format!("{}\n{}", formatted, context),
            _ => formatted,
        }
    }
}

/// Renders the lines around `span` with line numbers and a caret marker underneath a
/// single-line span.
pub(crate) fn print_span(source: &str, span: Span) -> String {
    let span = span.clamp_to(source);
    let location = get_location(source, span);
    let first_line = location.line.saturating_sub(1).max(1);

    let mut out = String::new();
    let lines: Vec<&str> = source.lines().collect();
    let last_line = location.line.min(lines.len().max(1));
    let pad = last_line.to_string().len();

    for line_num in first_line..=last_line {
        let line = lines.get(line_num - 1).copied().unwrap_or("");
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!(" {:>pad$} | {}", line_num, line, pad = pad));
    }

    if !source[span.start..span.end].contains('\n') {
        out.push('\n');
        out.push_str(&" ".repeat(pad + 1));
        out.push_str(" | ");
        out.push_str(&" ".repeat(location.column - 1));
        out.push_str(&"^".repeat((span.end - span.start).max(1)));
    }

    out
}

/// A 1-based line and column position inside a source text.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Converts the start of a span into a [Location].
pub(crate) fn get_location(source: &str, span: Span) -> Location {
    let before = &source[..span.start.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    let column = before[line_start..].chars().count() + 1;
    Location { line, column }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print(true))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n", self)
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_of_first_token() {
        let location = get_location("{ a }", Span::new(0, 1));
        assert_eq!(location, Location { line: 1, column: 1 });
    }

    #[test]
    fn location_on_later_line() {
        let source = "query {\n  user {\n    name\n  }\n}";
        let start = source.find("name").unwrap();
        let location = get_location(source, Span::new(start, start + 4));
        assert_eq!(location, Location { line: 3, column: 5 });
    }

    #[test]
    fn span_snippet_has_caret() {
        let source = "query {\n  user(\n}";
        let start = source.find('}').unwrap();
        let snippet = print_span(source, Span::new(start, start + 1));
        assert_eq!(snippet, " 2 |   user(\n 3 | }\n   | ^");
    }

    #[test]
    fn origin_prefix() {
        let error = Error::new("Unexpected Name", Some(ErrorType::Syntax)).in_origin("a.graphql");
        assert_eq!(error.message(), "a.graphql: Unexpected Name");
        assert_eq!(error.print(false), "Syntax Error: a.graphql: Unexpected Name");
    }
}
