use bumpalo::Bump;
use hashbrown::{hash_map::DefaultHashBuilder, HashMap, HashSet};

use super::{StructuralValidator, ValidationRule};
use crate::ast::{ASTContext, Document, Span, Value};
use crate::check::ValidationError;
use crate::schema::Schema;
use crate::visit::Path;

mod fields_on_correct_type;
mod known_argument_names;
mod known_directives;
mod known_type_names;
mod lone_anonymous_operation;
mod no_fragment_cycles;
mod no_undefined_variables;
mod no_unused_fragments;
mod no_unused_variables;
mod scalar_leafs;
mod unique_argument_names;
mod unique_operation_names;
mod unique_variable_names;

pub use super::context::ValidationContext;
pub use fields_on_correct_type::*;
pub use known_argument_names::*;
pub use known_directives::*;
pub use known_type_names::*;
pub use lone_anonymous_operation::*;
pub use no_fragment_cycles::*;
pub use no_undefined_variables::*;
pub use no_unused_fragments::*;
pub use no_unused_variables::*;
pub use scalar_leafs::*;
pub use unique_argument_names::*;
pub use unique_operation_names::*;
pub use unique_variable_names::*;

macro_rules! rules {
    ($ctx:expr, $schema:expr, $document:expr, $($rule:ty),* $(,)?) => {{
        let mut errors = Vec::new();
        $(errors.extend(<$rule>::validate($ctx, $schema, $document));)*
        errors
    }};
}

/// All of GraphQL's validation rules this crate implements, run one after another in a fixed
/// order, which is the default [`StructuralValidator`].
///
/// Spreads of unknown fragments aren't reported by these rules, since documents are only
/// validated after all spread fragments have been resolved.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRules;

impl StructuralValidator for StandardRules {
    fn validate<'a>(
        &self,
        ctx: &'a ASTContext,
        schema: &'a Schema<'a>,
        document: &'a Document<'a>,
    ) -> Vec<ValidationError> {
        rules!(
            ctx,
            schema,
            document,
            LoneAnonymousOperation,
            UniqueOperationNames<'a>,
            UniqueVariableNames<'a>,
            UniqueArgumentNames<'a>,
            NoUndefinedVariables<'a>,
            NoUnusedVariables<'a>,
            NoUnusedFragments<'a>,
            NoFragmentCycles<'a>,
            KnownTypeNames,
            FieldsOnCorrectType,
            KnownArgumentNames,
            KnownDirectives,
            ScalarLeafs,
        )
    }
}

/// A variable that's used inside an argument.
pub(crate) struct VariableUsage<'a> {
    pub name: &'a str,
    pub span: Span,
    pub path: Path,
}

/// Collects the names of all variables used inside an input value.
pub(crate) fn collect_variables<'a>(value: &'a Value<'a>, names: &mut Vec<&'a str>) {
    let mut stack = vec![value];
    while let Some(value) = stack.pop() {
        match value {
            Value::Variable(variable) => names.push(variable.name),
            Value::List(list) => stack.extend(list.children.iter().rev()),
            Value::Object(object) => {
                stack.extend(object.children.iter().rev().map(|field| &field.value))
            }
            _ => {}
        }
    }
}

/// Calls `visit` once for every fragment that's transitively spread from `roots`.
///
/// Fragments without an entry in `edges` are skipped. Each fragment is visited at most once,
/// however often it's spread.
pub(crate) fn for_each_reachable<'a, T>(
    roots: &[&'a str],
    edges: &HashMap<&'a str, T, DefaultHashBuilder, &'a Bump>,
    spreads: impl Fn(&T) -> &[&'a str],
    mut visit: impl FnMut(&T),
) {
    let mut visited: HashSet<&'a str> = HashSet::new();
    let mut stack: Vec<&'a str> = roots.iter().rev().copied().collect();
    while let Some(name) = stack.pop() {
        if !visited.insert(name) {
            continue;
        }
        if let Some(edge) = edges.get(name) {
            visit(edge);
            stack.extend(spreads(edge).iter().rev().copied());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use crate::check::ErrorKind;
    use crate::schema::ParseSdl;

    const SCHEMA: &str = "
        type Query { user(id: ID!): User users(role: Role): [User] }
        type User { id: ID! name: String role: Role friends: [User] }
        enum Role { ADMIN USER }
    ";

    #[test]
    fn passes() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        let document = Document::parse(
            &ctx,
            "query A($id: ID!) { user(id: $id) { ...Test } } query B { __typename users(role: ADMIN) { id } } fragment Test on User { name friends { id } }",
        )
        .unwrap();
        assert_eq!(StandardRules.validate(&ctx, schema, document), vec![]);
    }

    #[test]
    fn fails() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();

        let document = Document::parse(
            &ctx,
            "query A { __typename } query A { __typename } fragment Test on Query { __typename }",
        )
        .unwrap();
        let errors = StandardRules.validate(&ctx, schema, document);
        let messages: Vec<&str> = errors.iter().map(|error| error.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "There can be only one operation named \"A\".",
                "Fragment \"Test\" is never used.",
            ]
        );
        assert!(errors
            .iter()
            .all(|error| error.kind == ErrorKind::SchemaViolation));

        let document = Document::parse(&ctx, "{ user { unknown } users(role: OTHER) }").unwrap();
        let messages: Vec<String> = StandardRules
            .validate(&ctx, schema, document)
            .into_iter()
            .map(|error| error.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Cannot query field \"unknown\" on type \"User\".",
                "Field \"users\" of type \"[User]\" must have a selection of subfields. Did you mean \"users { ... }\"?",
            ]
        );
    }

    #[test]
    fn closures_are_validators() {
        fn no_errors<'a>(
            _ctx: &'a ASTContext,
            _schema: &'a Schema<'a>,
            _document: &'a Document<'a>,
        ) -> Vec<ValidationError> {
            Vec::new()
        }

        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        let document = Document::parse(&ctx, "{ unknown }").unwrap();
        assert!(no_errors.validate(&ctx, schema, document).is_empty());
        assert_eq!(StandardRules.validate(&ctx, schema, document).len(), 1);
    }

    #[test]
    fn variables_in_nested_values() {
        let ctx = ASTContext::new();
        let document =
            Document::parse(&ctx, "{ a(x: [$a, { b: $b, c: [1, $c] }], d: $d) }").unwrap();
        let field = document.operations().next().unwrap().selection_set.selections[0]
            .field()
            .unwrap();
        let mut names = Vec::new();
        for argument in field.arguments.children.iter() {
            collect_variables(&argument.value, &mut names);
        }
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }
}
