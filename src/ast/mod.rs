//! # GraphQL Query Language AST
//!
//! The `graphql_validate::ast` module contains the AST of executable GraphQL documents, the
//! operations and fragments that clients send to a GraphQL service, and the parser that produces
//! it. [Reference](https://spec.graphql.org/October2021/#sec-Language)
//!
//! Its two main parts are:
//! - [`ASTContext`], a context containing an arena that defines the lifetime for an AST
//! - [`ParseNode`], a trait using which AST Nodes are parsed from source text
//!
//! Fields, fragment spreads, arguments, enum values and definitions carry a [`Span`] into the
//! source text they were parsed from, which validation findings use to report locations.
//!
//! ```
//! use graphql_validate::ast::*;
//!
//! // Create an AST Context for a document
//! let ctx = ASTContext::new();
//!
//! // Parse a source text into a Document AST root node
//! let ast = Document::parse(&ctx, "{ field }").unwrap();
//! assert_eq!(ast.operations().count(), 1);
//! ```

#[allow(clippy::module_inception)]
mod ast;

mod ast_conversion;
mod ast_kind;
mod parser;

pub use ast::*;
pub use ast_conversion::DefaultIn;
pub use ast_kind::ASTKind;
pub use parser::ParseNode;
pub(crate) use parser::private;
