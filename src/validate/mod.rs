//! # Validation Rules for GraphQL ASTs
//!
//! This module contains logic to run validation rules on GraphQL Query Language documents against
//! a schema. It provides the rules this crate implements, which are grouped into this module's
//! [`StandardRules`](rules::StandardRules), and utilities to create your own
//! [`ValidationRules`](ValidationRule).
//!
//! The rules this module already comes with are:
//!
//! - [`rules::LoneAnonymousOperation`]: validates that a document only contains a single anonymous operation
//! - [`rules::UniqueOperationNames`]: checks that no operations share the same name
//! - [`rules::UniqueVariableNames`]: checks that no variables share the same name
//! - [`rules::UniqueArgumentNames`]: checks for arguments that are used to not contain duplicates
//! - [`rules::NoUndefinedVariables`]: checks that all used variables are defined per operation
//! - [`rules::NoUnusedVariables`]: checks that all defined variables are used per operation
//! - [`rules::NoUnusedFragments`]: validates that all fragments in a document are used at least once
//! - [`rules::NoFragmentCycles`]: validates that no fragment is spread in on itself to avoid looping
//! - [`rules::KnownTypeNames`]: checks that type conditions and variable types exist
//! - [`rules::FieldsOnCorrectType`]: checks that selected fields exist on their parent type
//! - [`rules::KnownArgumentNames`]: checks that fields and directives define the passed arguments
//! - [`rules::KnownDirectives`]: checks that directives exist and are used in allowed locations
//! - [`rules::ScalarLeafs`]: checks that only composite fields have sub-selections
//!
//! The [visit](crate::visit) module is used to actually execute validation rules.
//! The [`ValidationRule`] trait is simply defined to implement the [Visitor](crate::visit::Visitor) trait
//! and to accept the [`ValidationContext`], which is used to keep track of validation errors.
//! Rules are always visited with a [`TypeInfo`](crate::visit::TypeInfo), so they can look up the
//! schema definitions of the nodes they visit.
//!
//! The engine runs structural validation through the [`StructuralValidator`] trait, which
//! [`StandardRules`](rules::StandardRules) implements by running every rule above in order.
//!
//! For example, this is one way to run all rules:
//!
//! ```
//! use graphql_validate::{ast::*, schema::*, validate::*};
//!
//! let ctx = ASTContext::new();
//! let schema = Schema::parse(&ctx, "type Query { field: String }").unwrap();
//! let document = Document::parse(&ctx, "{ field }").unwrap();
//!
//! assert!(StandardRules.validate(&ctx, schema, document).is_empty());
//! ```
//!
//! Another way is to utilize the [`ValidateNode`] trait instead to run a single rule starting from
//! an AST Node rather from the rule itself:
//!
//! ```
//! use graphql_validate::{ast::*, schema::*, validate::*};
//!
//! let ctx = ASTContext::new();
//! let schema = Schema::parse(&ctx, "type Query { field: String }").unwrap();
//! let document = Document::parse(&ctx, "{ field { subfield } }").unwrap();
//!
//! let errors = document.validate::<ScalarLeafs>(&ctx, schema);
//! assert_eq!(errors.len(), 1);
//! ```

#[allow(clippy::module_inception)]
mod validate;

mod context;

pub mod rules;
pub use context::ValidationContext;
pub use rules::*;
pub use validate::*;
