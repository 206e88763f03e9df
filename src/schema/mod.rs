//! # Using Schema Definitions
//!
//! The `graphql_validate::schema` module contains the type system that documents are validated
//! against. A [Schema] is usually parsed from SDL source text with the [ParseSdl] trait, which
//! checks that every type reference resolves and that root operation types are object types.
//!
//! ```
//! use graphql_validate::{ast::ASTContext, schema::*};
//!
//! let ctx = ASTContext::new();
//! let schema = Schema::parse(&ctx, "type Query { hello: String }").unwrap();
//! let query = schema.query_type().unwrap();
//! assert!(query.get_field("hello").is_some());
//! ```
//!
//! [More information on the Schema struct.](Schema)

#[allow(clippy::module_inception)]
pub mod schema;
pub mod sdl;

pub use schema::*;
pub use sdl::ParseSdl;
