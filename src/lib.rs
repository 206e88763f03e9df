//! `graphql_validate`
//! =========
//!
//! _Validates GraphQL documents against a schema before they're deployed._
//!
//! The **`graphql_validate`** library checks a set of GraphQL documents, operations and the
//! fragments they spread, against a schema, as a step of a CI pipeline. Besides GraphQL's
//! validation rules it catches:
//!
//! - operations that nest their fields more deeply than a configured maximum
//! - usages of deprecated fields, arguments and enum values
//! - fragment names that are declared more than once across all documents
//! - spreads of fragments that aren't declared in any document
//!
//! Documents may spread fragments that are declared in any other document of a run. Every
//! document is validated together with all fragments its operations transitively depend on, and
//! findings are reported per document with their location in the source they were declared in.
//!
//! The library performs no I/O. It accepts the schema's SDL and the text of all documents and
//! returns a [`Report`] of the documents that have findings.
//!
//! ```
//! use graphql_validate::{ast::*, schema::*, validate, DocumentSource, ValidateOptions};
//!
//! let ctx = ASTContext::new();
//! let schema = Schema::parse(&ctx, "type Query { user: User } type User { email: String @deprecated }").unwrap();
//! let sources = vec![DocumentSource::new("user.graphql", "{ user { email } }")];
//!
//! let report = validate(&ctx, schema, &sources, ValidateOptions::default()).unwrap();
//! assert!(report.status());
//! assert_eq!(
//!     report.documents[0].deprecated[0].message,
//!     "The field 'User.email' is deprecated."
//! );
//! ```
//!
//! [A good place to start learning more about this crate is the `engine` module...](engine)

pub mod ast;
pub mod check;
pub mod engine;
pub mod error;
mod lexer;
pub mod schema;
pub mod validate;
pub mod visit;

pub use bumpalo;
pub use engine::{validate, DocumentSource, DocumentValidator, Report, ValidateOptions};
