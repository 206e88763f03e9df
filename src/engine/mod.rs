//! # Validation Engine
//!
//! The engine validates a set of document sources against a schema, usually as a step of a CI
//! pipeline before the documents are deployed.
//!
//! Every source is first parsed into a [`ParsedSource`] and all of their fragments are registered
//! in a single [`FragmentGraph`](crate::check::FragmentGraph). Then, for each document with
//! operations, the [`DocumentValidator`]:
//!
//! 1. combines the operations with all fragments they transitively spread,
//! 2. applies a [`DirectiveTransform`] when `vendorDirectives` is enabled,
//! 3. runs the [`StructuralValidator`](crate::validate::StructuralValidator) and reports spreads
//!    of unknown fragments,
//! 4. bounds the depth of the operations when `maxDepth` is set,
//! 5. scans for deprecated usages when `strictDeprecated` is enabled,
//! 6. and adds duplicate fragment declarations when `strictFragments` is enabled.
//!
//! Documents with findings are handed to a [`ReportSink`] as [`InvalidDocument`] records, and a
//! document without a record is valid. A [`Report`] collects all records and summarises them.

mod directives;
mod options;
mod report;
mod source;
mod validator;

pub use directives::*;
pub use options::*;
pub use report::*;
pub use source::*;
pub use validator::*;
