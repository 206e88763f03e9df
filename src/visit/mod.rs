//! # Visiting and Transforming GraphQL ASTs
//!
//! The `graphql_validate::visit` module contains utilities to traverse and transform GraphQL ASTs.
//! Mainly, this module exposes two traits relevant to this task:
//!
//! - The [Visitor] trait can be used to implement a visitor.
//! - The [Folder] trait can be used to implement a folder to transform an AST.
//!
//! This works via the [`VisitNode`] trait and [`FoldNode`] trait that most AST nodes implement and
//! where visiting and folding can start.
//!
//! Visitors receive a [`VisitInfo`] for every node, which contains the [Path] to the node and,
//! when the traversal was started using `visit_with_types`, a [`TypeInfo`] describing the schema
//! types the node is nested in. Validation rules and the deprecation scanner rely on this to look
//! up field, argument and directive definitions.
//!
//! In this example we'll define a visitor that counts all operations in a document:
//!
//! ```
//! use graphql_validate::{ast::*, visit::*};
//!
//! #[derive(Default)]
//! struct CountOperations {
//!    operations: usize,
//! }
//!
//! impl<'a> Visitor<'a> for CountOperations {
//!     fn enter_fragment(
//!         &mut self,
//!         _ctx: &mut (),
//!         _fragment: &'a FragmentDefinition<'a>,
//!         _info: &VisitInfo<'a>
//!     ) -> VisitFlow {
//!         // We can skip over fragment nodes and never traverse its children,
//!         // since we're only interested in counting operations
//!         VisitFlow::Skip
//!     }
//!
//!     fn enter_operation(
//!         &mut self,
//!         _ctx: &mut (),
//!         operation: &'a OperationDefinition<'a>,
//!         _info: &VisitInfo<'a>
//!     ) -> VisitFlow {
//!         self.operations += 1;
//!         VisitFlow::Next
//!     }
//! }
//!
//! let ctx = ASTContext::new();
//! let document = Document::parse(&ctx, "query A { a } query B { b } fragment C on Query { c }").unwrap();
//! let mut visitor = CountOperations::default();
//! document.visit(&mut (), &mut visitor);
//! assert_eq!(visitor.operations, 2);
//! ```
//!
//! [More information on the Visitor trait](Visitor)
//!
//! A folder is very similar but instead receives and returns AST nodes to create a new copy of an
//! AST while transforming it, e.g. `document.fold(&ctx, &mut folder)`.
//!
//! [More information on the Folder trait](Folder)

mod folder;
mod path;
mod type_info;
mod visitor;

pub use folder::*;
pub use path::*;
pub use type_info::TypeInfo;
pub use visitor::*;
