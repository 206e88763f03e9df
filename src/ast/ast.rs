use crate::error::{get_location, Location};
use bumpalo::collections::Vec;

/// A context for GraphQL documents and schemas which holds an arena allocator.
///
/// A validation run parses every document source and the schema into the same arena. All nodes,
/// fragment graphs and intermediate documents built while validating borrow from it and are
/// dropped at once when the context goes out of scope, so a context should not outlive a single
/// validation run.
pub struct ASTContext {
    /// An arena allocator that holds the memory allocated for the AST Context's lifetime
    pub arena: bumpalo::Bump,
}

impl ASTContext {
    /// Create a new AST context with a preallocated arena.
    pub fn new() -> Self {
        let arena = bumpalo::Bump::new();
        ASTContext { arena }
    }

    /// Put the value of `item` onto the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, item: T) -> &T {
        self.arena.alloc(item)
    }

    /// Allocate an `&str` slice onto the arena and return a reference to it.
    #[inline]
    pub fn alloc_str(&self, str: &str) -> &str {
        self.arena.alloc_str(str)
    }

    /// Puts a `String` onto the arena and returns a reference to it to tie the `String`'s lifetime
    /// to this AST context without reallocating or copying it.
    #[inline]
    pub fn alloc_string(&self, str: String) -> &str {
        self.arena.alloc(str)
    }
}

impl Default for ASTContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A byte range into the source text an AST node was parsed from.
///
/// Spans are only meaningful together with the source text of the node's own document. Nodes
/// that are created rather than parsed carry an empty span at offset zero.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Converts the start of this span into a line and column inside `source`.
    #[inline]
    pub fn location(&self, source: &str) -> Location {
        get_location(source, self.clamp_to(source))
    }

    pub(crate) fn clamp_to(&self, source: &str) -> Span {
        let end = self.end.min(source.len());
        Span {
            start: self.start.min(end),
            end,
        }
    }
}

impl From<logos::Span> for Span {
    #[inline]
    fn from(span: logos::Span) -> Self {
        Span::new(span.start, span.end)
    }
}

/// AST Node of a boolean value
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Boolean-Value)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct BooleanValue {
    pub value: bool,
}

/// AST Node of a variable identifier value.
///
/// These are identifiers prefixed with a `$` sign, typically in variable definitions.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Variables)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Variable<'a> {
    pub name: &'a str,
}

/// AST Node of an enum value.
///
/// These are typically written in all caps and snake case, e.g. "`MOBILE_WEB`".
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Enum-Value)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct EnumValue<'a> {
    pub value: &'a str,
    pub span: Span,
}

/// AST Node of an integer value.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Int)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct IntValue<'a> {
    pub value: &'a str,
}

/// AST Node of a floating point value, kept as its source text.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Float)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct FloatValue<'a> {
    pub value: &'a str,
}

/// AST Node of a string value with all escape sequences already resolved.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-String)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct StringValue<'a> {
    pub value: &'a str,
}

/// AST Node of possible input values in GraphQL.
///
/// Fields and Directives accept input values as arguments.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Values)
#[derive(Debug, PartialEq, Clone)]
pub enum Value<'a> {
    Variable(Variable<'a>),
    String(StringValue<'a>),
    Float(FloatValue<'a>),
    Int(IntValue<'a>),
    Boolean(BooleanValue),
    Enum(EnumValue<'a>),
    List(ListValue<'a>),
    Object(ObjectValue<'a>),
    /// Representing JSON-like `null` values or the absence of a value
    Null,
}

/// AST Node for a List of values.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-List-Value)
#[derive(Debug, PartialEq, Clone)]
pub struct ListValue<'a> {
    pub children: Vec<'a, Value<'a>>,
}

/// AST Node for a field of an Object value.
///
/// [Reference](https://spec.graphql.org/October2021/#ObjectField)
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectField<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
}

/// AST Node for an Object value, which is a list of Object fields.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Object-Values)
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectValue<'a> {
    pub children: Vec<'a, ObjectField<'a>>,
}

/// AST Node for an Argument, which carries a name and a value.
///
/// [Reference](https://spec.graphql.org/October2021/#Argument)
#[derive(Debug, PartialEq, Clone)]
pub struct Argument<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
    pub span: Span,
}

/// AST Node for a list of Arguments, which are similar to parameterized inputs to a function.
///
/// [Reference](https://spec.graphql.org/October2021/#Arguments)
#[derive(Debug, PartialEq, Clone)]
pub struct Arguments<'a> {
    pub children: Vec<'a, Argument<'a>>,
}

impl<'a> Arguments<'a> {
    /// Checks whether this list of Arguments contains any values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// AST Node for GraphQL Directives, which provide a way to describe alternate behavior in GraphQL.
///
/// Directives a client-side tool may need to handle before validation, such as `@client`, are
/// normal directives in this AST.
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Directives)
#[derive(Debug, PartialEq, Clone)]
pub struct Directive<'a> {
    pub name: &'a str,
    pub arguments: Arguments<'a>,
    pub span: Span,
}

/// AST Node for lists of GraphQL Directives.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Directives)
#[derive(Debug, PartialEq, Clone)]
pub struct Directives<'a> {
    pub children: Vec<'a, Directive<'a>>,
}

impl<'a> Directives<'a> {
    /// Checks whether this list of Directives contains any values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Checks whether a directive with the given name is present.
    #[inline]
    pub fn has(&self, name: &str) -> bool {
        self.children.iter().any(|directive| directive.name == name)
    }
}

/// AST Node for Selection Sets, which provide a way to select more information on a given parent.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Selection-Sets)
#[derive(Debug, PartialEq, Clone)]
pub struct SelectionSet<'a> {
    pub selections: Vec<'a, Selection<'a>>,
}

impl<'a> SelectionSet<'a> {
    /// Checks whether this Selection Set contains any selections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// AST Node for Fields, which can be likened to functions or properties on a parent object.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fields)
#[derive(Debug, PartialEq, Clone)]
pub struct Field<'a> {
    /// A Field's `alias`, which is used to request information under a different name than the
    /// Field's `name`.
    pub alias: Option<&'a str>,
    /// A Field's `name`, which represents a resolver on a GraphQL schema's object type.
    pub name: &'a str,
    /// Arguments that are passed to a Field, or an empty list.
    pub arguments: Arguments<'a>,
    /// Directives that are annotating this Field, or an empty list.
    pub directives: Directives<'a>,
    /// A sub-Selection Set that is passed below this field, or an empty one for leaf fields.
    pub selection_set: SelectionSet<'a>,
    /// The span of the field's alias or name.
    pub span: Span,
}

impl<'a> Field<'a> {
    /// Get the alias of the field, if present, otherwise get the name.
    #[inline]
    pub fn alias_or_name(&self) -> &'a str {
        self.alias.unwrap_or(self.name)
    }

    /// Checks whether this field is one of the `__` prefixed introspection meta fields.
    #[inline]
    pub fn is_introspection(&self) -> bool {
        self.name.starts_with("__")
    }
}

/// AST Node for a Fragment Spread, which refers to a [`FragmentDefinition`] by name.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fragments)
#[derive(Debug, PartialEq, Clone)]
pub struct FragmentSpread<'a> {
    /// The name of the [FragmentDefinition] that is spread in place of this node.
    pub name: NamedType<'a>,
    /// Directives that are annotating this Fragment Spread, or an empty list.
    pub directives: Directives<'a>,
    /// The span of the spread fragment name.
    pub span: Span,
}

/// AST Node for an inline Fragment definition with an additional [`SelectionSet`].
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fragments)
#[derive(Debug, PartialEq, Clone)]
pub struct InlineFragment<'a> {
    /// An optional type condition that narrows the parent type for the nested selections.
    pub type_condition: Option<NamedType<'a>>,
    pub directives: Directives<'a>,
    pub selection_set: SelectionSet<'a>,
    /// The span of the first token after the fragment's ellipsis.
    pub span: Span,
}

/// AST Node of a selection as contained inside a [`SelectionSet`].
///
/// [Reference](https://spec.graphql.org/October2021/#Selection)
#[derive(Debug, PartialEq, Clone)]
pub enum Selection<'a> {
    Field(Field<'a>),
    FragmentSpread(FragmentSpread<'a>),
    InlineFragment(InlineFragment<'a>),
}

impl<'a> Selection<'a> {
    /// Helper method to return the [`Field`] if the Selection is a `Field`.
    #[inline]
    pub fn field(&self) -> Option<&Field<'a>> {
        match self {
            Selection::Field(field) => Some(field),
            _ => None,
        }
    }

    /// Helper method to return the [`FragmentSpread`] if the Selection is a `FragmentSpread`.
    #[inline]
    pub fn fragment_spread(&self) -> Option<&FragmentSpread<'a>> {
        match self {
            Selection::FragmentSpread(spread) => Some(spread),
            _ => None,
        }
    }
}

/// AST Node for a type name, fragment name or operation name.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct NamedType<'a> {
    pub name: &'a str,
}

/// AST Node for a type reference of a variable definition.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Type-References)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Type<'a> {
    /// A reference to a named input type, which is a leaf node of a [Type].
    NamedType(NamedType<'a>),
    /// A list wrapper around the contained type.
    ListType(&'a Type<'a>),
    /// A non-null wrapper around the contained type.
    NonNullType(&'a Type<'a>),
}

impl<'a> Type<'a> {
    /// Unwraps a Type recursively and returns the `NamedType` contained within its wrappers.
    #[inline]
    pub fn of_type(&self) -> &NamedType<'a> {
        match self {
            Type::NamedType(of_type) => of_type,
            Type::ListType(inner) | Type::NonNullType(inner) => inner.of_type(),
        }
    }
}

/// AST Node for a variable definition.
///
/// [Reference](https://spec.graphql.org/October2021/#VariableDefinition)
#[derive(Debug, PartialEq, Clone)]
pub struct VariableDefinition<'a> {
    pub variable: Variable<'a>,
    pub of_type: Type<'a>,
    /// The default value of the variable, or `Value::Null` when none is given.
    pub default_value: Value<'a>,
    pub directives: Directives<'a>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct VariableDefinitions<'a> {
    pub children: Vec<'a, VariableDefinition<'a>>,
}

impl<'a> VariableDefinitions<'a> {
    /// Checks whether the list of Variable Definitions is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// AST Node for a named Fragment definition.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fragments)
#[derive(Debug, PartialEq, Clone)]
pub struct FragmentDefinition<'a> {
    /// The name that [FragmentSpread] selections use to refer to this definition.
    pub name: NamedType<'a>,
    /// The type this fragment's selections apply to.
    pub type_condition: NamedType<'a>,
    pub directives: Directives<'a>,
    pub selection_set: SelectionSet<'a>,
    /// The span of the fragment's name.
    pub span: Span,
}

/// AST Node for a kind of operation, as referred to by an [`OperationDefinition`].
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Operations)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

/// AST Node for an Operation Definition, which defines the entrypoint for GraphQL's execution.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Operations)
#[derive(Debug, PartialEq, Clone)]
pub struct OperationDefinition<'a> {
    pub operation: OperationKind,
    /// The operation's name, which may be omitted for a lone anonymous operation.
    pub name: Option<NamedType<'a>>,
    pub variable_definitions: VariableDefinitions<'a>,
    pub directives: Directives<'a>,
    pub selection_set: SelectionSet<'a>,
    /// The span of the operation's first token.
    pub span: Span,
}

/// AST Root Node for a GraphQL query language document. This contains one or more definitions of
/// fragments or operations.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Document)
#[derive(Debug, PartialEq, Clone)]
pub struct Document<'a> {
    pub definitions: Vec<'a, Definition<'a>>,
    /// A hint on how large the source text was from which this Document was parsed.
    pub size_hint: usize,
}

impl<'a> Document<'a> {
    /// Checks whether this document contains any definitions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterates over all operation definitions in document order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition<'a>> {
        self.definitions
            .iter()
            .filter_map(|definition| definition.operation())
    }

    /// Iterates over all fragment definitions in document order.
    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition<'a>> {
        self.definitions
            .iter()
            .filter_map(|definition| definition.fragment())
    }
}

/// AST Node for a Definition inside a query language document, which may either be an Operation
/// Definition or a Fragment Definition.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Document)
#[derive(Debug, PartialEq, Clone)]
pub enum Definition<'a> {
    Operation(OperationDefinition<'a>),
    Fragment(FragmentDefinition<'a>),
}

impl<'a> Definition<'a> {
    /// Helper method to return the [`OperationDefinition`] if the Definition is an `OperationDefinition`.
    #[inline]
    pub fn operation(&self) -> Option<&OperationDefinition<'a>> {
        match self {
            Definition::Operation(operation) => Some(operation),
            Definition::Fragment(_) => None,
        }
    }

    /// Helper method to return the [`FragmentDefinition`] if the Definition is a `FragmentDefinition`.
    #[inline]
    pub fn fragment(&self) -> Option<&FragmentDefinition<'a>> {
        match self {
            Definition::Fragment(fragment) => Some(fragment),
            Definition::Operation(_) => None,
        }
    }
}

/// Trait implemented by all ast nodes that can have directives attached.
pub trait WithDirectives<'arena> {
    fn directives(&self) -> &Directives<'arena>;
}

macro_rules! with_directives {
    ($($for_type:ident),+) => {
        $(
            impl<'arena> WithDirectives<'arena> for $for_type<'arena> {
                #[inline]
                fn directives(&self) -> &Directives<'arena> {
                    &self.directives
                }
            }
        )+
    };
}

with_directives!(
    Field,
    FragmentSpread,
    InlineFragment,
    OperationDefinition,
    FragmentDefinition,
    VariableDefinition
);

impl<'arena> WithDirectives<'arena> for Selection<'arena> {
    /// Helper method to get all Directives for a given selection directly.
    fn directives(&self) -> &Directives<'arena> {
        match self {
            Selection::Field(field) => &field.directives,
            Selection::FragmentSpread(spread) => &spread.directives,
            Selection::InlineFragment(fragment) => &fragment.directives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ASTContext, Document};
    use crate::ast::ParseNode;

    #[test]
    fn operations_and_fragments_in_order() {
        let ctx = ASTContext::new();
        let ast = Document::parse(
            &ctx,
            "fragment A on Query { a } query One { ...A } fragment B on Query { b } { c }",
        )
        .unwrap();
        let operations: Vec<_> = ast
            .operations()
            .map(|operation| operation.name.map(|name| name.name))
            .collect();
        assert_eq!(operations, vec![Some("One"), None]);
        let fragments: Vec<_> = ast.fragments().map(|fragment| fragment.name.name).collect();
        assert_eq!(fragments, vec!["A", "B"]);
    }

    #[test]
    fn span_locations() {
        let ctx = ASTContext::new();
        let source = "query {\n  user {\n    oldEmail\n  }\n}";
        let ast = Document::parse(&ctx, source).unwrap();
        let operation = ast.operations().next().unwrap();
        let user = operation.selection_set.selections[0].field().unwrap();
        let old_email = user.selection_set.selections[0].field().unwrap();
        assert_eq!(old_email.span.location(source).line, 3);
        assert_eq!(old_email.span.location(source).column, 5);
    }
}
