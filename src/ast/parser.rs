use super::ast::*;
use super::ast_conversion::DefaultIn;
use super::ast_kind::ASTKind;
use crate::error::{get_location, print_span, Error, ErrorType, Result};
use crate::lexer::{Extras, Token};
use bumpalo::collections::Vec;
use logos::{Lexer, Logos};

type ParseResult<T> = std::result::Result<T, ASTKind>;

pub(crate) mod private {
    use super::{ASTContext, Extras, Lexer, Logos, ParseResult, Span, Token};

    /// Private Parser context state that's kept to keep track of the current parser's progress and
    /// state. This contains the AST context's arena and a [Lexer].
    pub struct ParserContext<'a> {
        pub(crate) arena: &'a bumpalo::Bump,
        pub(crate) peek: Option<Token<'a>>,
        pub(crate) iter: Lexer<'a, Token<'a>>,
        pub(crate) in_var_def: bool,
    }

    impl<'a> ParserContext<'a> {
        /// Create a new Parser context for a given AST context and initialize it with an input source
        /// string to parse from.
        pub(crate) fn new(ctx: &'a ASTContext, source: &'a str) -> Self {
            let extras = Extras { arena: &ctx.arena };
            ParserContext {
                arena: &ctx.arena,
                peek: None,
                iter: Token::lexer_with_extras(source, extras),
                in_var_def: false,
            }
        }

        #[inline]
        pub(crate) fn next(&mut self) -> Token<'a> {
            match self.peek.take() {
                Some(token) => token,
                None => self.iter.next().unwrap_or(Token::End),
            }
        }

        #[inline]
        pub(crate) fn peek(&mut self) -> &Token<'a> {
            let iter = &mut self.iter;
            self.peek
                .get_or_insert_with(|| iter.next().unwrap_or(Token::End))
        }

        #[inline]
        pub(crate) fn source(&self) -> &str {
            self.iter.source()
        }

        /// The span of the most recently lexed token. Directly after `next()` this is the span of
        /// the returned token as long as nothing has been peeked since.
        #[inline]
        pub(crate) fn span(&self) -> Span {
            self.iter.span().into()
        }
    }

    /// (Private) Trait for parsing AST Nodes from a Parser Context.
    /// The [`super::ParseNode`] trait implements the public `parse` method instead.
    pub trait ParseNode<'a>: Sized {
        fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self>;
    }
}

/// Trait for parsing AST Nodes from source texts using recursive descent and a lexer.
///
/// This trait is implemented by all AST Nodes and can hence be used to granularly parse GraphQL language.
/// However, mostly this will be used via `Document::parse`.
pub trait ParseNode<'a>: private::ParseNode<'a> {
    /// Parse an input source text into the implementor's AST Node structure and allocate the
    /// resulting AST into the current AST Context's arena.
    ///
    /// Spans on the resulting nodes are byte offsets into `source`.
    fn parse<T: ToString>(ctx: &'a ASTContext, source: T) -> Result<&'a Self> {
        let source = ctx.alloc_string(source.to_string());
        let mut parser_ctx = private::ParserContext::new(ctx, source);
        match Self::new_with_ctx(&mut parser_ctx) {
            Ok(value) => Ok(ctx.alloc(value)),
            Err(error) => {
                let span = parser_ctx.span();
                let snippet = print_span(parser_ctx.source(), span);
                let location = get_location(parser_ctx.source(), span.clamp_to(source));
                let message = format!("Invalid {}", error);
                Err(Error::new_with_context(
                    message,
                    Some(location),
                    snippet,
                    Some(ErrorType::Syntax),
                ))
            }
        }
    }
}

impl<'a, T: private::ParseNode<'a>> ParseNode<'a> for T {}

impl<'a> private::ParseNode<'a> for BooleanValue {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<BooleanValue> {
        match ctx.next() {
            Token::Name("true") => Ok(BooleanValue { value: true }),
            Token::Name("false") => Ok(BooleanValue { value: false }),
            _ => Err(ASTKind::Boolean),
        }
    }
}

impl<'a> private::ParseNode<'a> for EnumValue<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<EnumValue<'a>> {
        match ctx.next() {
            Token::Name("true" | "false" | "null") => Err(ASTKind::Enum),
            Token::Name(value) => Ok(EnumValue {
                value,
                span: ctx.span(),
            }),
            _ => Err(ASTKind::Enum),
        }
    }
}

impl<'a> private::ParseNode<'a> for FloatValue<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<FloatValue<'a>> {
        if let Token::Float(value) = ctx.next() {
            Ok(FloatValue { value })
        } else {
            Err(ASTKind::Float)
        }
    }
}

impl<'a> private::ParseNode<'a> for IntValue<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<IntValue<'a>> {
        if let Token::Integer(value) = ctx.next() {
            Ok(IntValue { value })
        } else {
            Err(ASTKind::Int)
        }
    }
}

impl<'a> private::ParseNode<'a> for StringValue<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<StringValue<'a>> {
        if let Token::String(value) = ctx.next() {
            Ok(StringValue { value })
        } else {
            Err(ASTKind::String)
        }
    }
}

impl<'a> private::ParseNode<'a> for Variable<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Variable<'a>> {
        if let Token::VariableName(name) = ctx.next() {
            Ok(Variable { name })
        } else {
            Err(ASTKind::Variable)
        }
    }
}

impl<'a> private::ParseNode<'a> for Value<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Value<'a>> {
        let in_var_def = ctx.in_var_def;
        match ctx.peek() {
            Token::Name("null") => {
                ctx.next();
                Ok(Value::Null)
            }
            // Default values must be constant
            Token::VariableName(_) if in_var_def => Err(ASTKind::VariableDefinition),
            Token::VariableName(_) => Variable::new_with_ctx(ctx).map(Value::Variable),
            Token::Name("true" | "false") => BooleanValue::new_with_ctx(ctx).map(Value::Boolean),
            Token::Name(_) => EnumValue::new_with_ctx(ctx).map(Value::Enum),
            Token::Float(_) => FloatValue::new_with_ctx(ctx).map(Value::Float),
            Token::Integer(_) => IntValue::new_with_ctx(ctx).map(Value::Int),
            Token::String(_) => StringValue::new_with_ctx(ctx).map(Value::String),
            Token::BracketOpen => ListValue::new_with_ctx(ctx).map(Value::List),
            Token::BraceOpen => ObjectValue::new_with_ctx(ctx).map(Value::Object),
            _ => Err(ASTKind::Value),
        }
    }
}

impl<'a> private::ParseNode<'a> for ObjectField<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<ObjectField<'a>> {
        if let Token::Name(name) = ctx.next() {
            if let Token::Colon = ctx.next() {
                let value = Value::new_with_ctx(ctx)?;
                return Ok(ObjectField { name, value });
            }
        }
        Err(ASTKind::ObjectField)
    }
}

impl<'a> private::ParseNode<'a> for ObjectValue<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<ObjectValue<'a>> {
        if let Token::BraceOpen = ctx.next() {
            let mut children = Vec::new_in(ctx.arena);
            while *ctx.peek() != Token::BraceClose {
                children.push(ObjectField::new_with_ctx(ctx)?);
            }
            ctx.next();
            Ok(ObjectValue { children })
        } else {
            Err(ASTKind::Object)
        }
    }
}

impl<'a> private::ParseNode<'a> for ListValue<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<ListValue<'a>> {
        if let Token::BracketOpen = ctx.next() {
            let mut children = Vec::new_in(ctx.arena);
            loop {
                match ctx.peek() {
                    Token::BracketClose => {
                        ctx.next();
                        break;
                    }
                    Token::End => return Err(ASTKind::List),
                    _ => children.push(Value::new_with_ctx(ctx)?),
                }
            }
            Ok(ListValue { children })
        } else {
            Err(ASTKind::List)
        }
    }
}

impl<'a> private::ParseNode<'a> for Argument<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Argument<'a>> {
        if let Token::Name(name) = ctx.next() {
            let span = ctx.span();
            if let Token::Colon = ctx.next() {
                let value = Value::new_with_ctx(ctx)?;
                return Ok(Argument { name, value, span });
            }
        }
        Err(ASTKind::Argument)
    }
}

impl<'a> private::ParseNode<'a> for Arguments<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Arguments<'a>> {
        let mut children = Vec::new_in(ctx.arena);
        if let Token::ParenOpen = ctx.peek() {
            ctx.next();
            while *ctx.peek() != Token::ParenClose {
                children.push(Argument::new_with_ctx(ctx)?);
            }
            ctx.next();
        }
        Ok(Arguments { children })
    }
}

impl<'a> private::ParseNode<'a> for Directive<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Directive<'a>> {
        if let Token::DirectiveName(name) = ctx.next() {
            let span = ctx.span();
            let arguments = Arguments::new_with_ctx(ctx)?;
            Ok(Directive {
                name,
                arguments,
                span,
            })
        } else {
            Err(ASTKind::Directive)
        }
    }
}

impl<'a> private::ParseNode<'a> for Directives<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Directives<'a>> {
        let mut builder = Vec::new_in(ctx.arena);
        while let Token::DirectiveName(_) = ctx.peek() {
            builder.push(Directive::new_with_ctx(ctx)?);
        }
        Ok(Directives { children: builder })
    }
}

impl<'a> private::ParseNode<'a> for Field<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Field<'a>> {
        if let Token::Name(name_or_alias) = ctx.next() {
            let span = ctx.span();
            let (alias, name) = if let Token::Colon = ctx.peek() {
                ctx.next();
                if let Token::Name(name) = ctx.next() {
                    (Some(name_or_alias), name)
                } else {
                    return Err(ASTKind::Field);
                }
            } else {
                (None, name_or_alias)
            };

            let arguments = Arguments::new_with_ctx(ctx)?;
            let directives = Directives::new_with_ctx(ctx)?;
            let selection_set = SelectionSet::new_with_ctx(ctx)?;

            Ok(Field {
                alias,
                name,
                arguments,
                directives,
                selection_set,
                span,
            })
        } else {
            Err(ASTKind::Field)
        }
    }
}

impl<'a> private::ParseNode<'a> for FragmentSpread<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<FragmentSpread<'a>> {
        if let Token::Ellipsis = ctx.peek() {
            ctx.next();
        };
        match ctx.next() {
            Token::Name("on") => Err(ASTKind::FragmentSpread),
            Token::Name(name) => {
                let span = ctx.span();
                let directives = Directives::new_with_ctx(ctx)?;
                Ok(FragmentSpread {
                    name: NamedType { name },
                    directives,
                    span,
                })
            }
            _ => Err(ASTKind::FragmentSpread),
        }
    }
}

impl<'a> private::ParseNode<'a> for NamedType<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<NamedType<'a>> {
        if let Token::Name(name) = ctx.next() {
            Ok(NamedType { name })
        } else {
            Err(ASTKind::NamedType)
        }
    }
}

impl<'a> private::ParseNode<'a> for InlineFragment<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<InlineFragment<'a>> {
        if let Token::Ellipsis = ctx.peek() {
            ctx.next();
        };
        ctx.peek();
        let span = ctx.span();
        let type_condition = if let Token::Name("on") = ctx.peek() {
            ctx.next();
            Some(NamedType::new_with_ctx(ctx)?)
        } else {
            None
        };
        let directives = Directives::new_with_ctx(ctx)?;
        if let Token::BraceOpen = ctx.peek() {
            let selection_set = SelectionSet::new_with_ctx(ctx)?;
            Ok(InlineFragment {
                type_condition,
                directives,
                selection_set,
                span,
            })
        } else {
            Err(ASTKind::InlineFragment)
        }
    }
}

impl<'a> private::ParseNode<'a> for Selection<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Selection<'a>> {
        match ctx.peek() {
            Token::Name(_) => Field::new_with_ctx(ctx).map(Selection::Field),
            Token::Ellipsis => {
                ctx.next();
                match ctx.peek() {
                    Token::DirectiveName(_) | Token::BraceOpen | Token::Name("on") => {
                        InlineFragment::new_with_ctx(ctx).map(Selection::InlineFragment)
                    }
                    Token::Name(_) => {
                        FragmentSpread::new_with_ctx(ctx).map(Selection::FragmentSpread)
                    }
                    _ => Err(ASTKind::Selection),
                }
            }
            _ => Err(ASTKind::Selection),
        }
    }
}

impl<'a> private::ParseNode<'a> for SelectionSet<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<SelectionSet<'a>> {
        let mut selections = Vec::new_in(ctx.arena);
        if let Token::BraceOpen = ctx.peek() {
            ctx.next();
            loop {
                selections.push(Selection::new_with_ctx(ctx)?);
                if let Token::BraceClose = ctx.peek() {
                    ctx.next();
                    break;
                }
            }
        }
        Ok(SelectionSet { selections })
    }
}

impl<'a> private::ParseNode<'a> for Type<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Type<'a>> {
        let token = ctx.next();
        let of_type = if let Token::BracketOpen = token {
            let inner = Type::new_with_ctx(ctx)?;
            if let Token::BracketClose = ctx.next() {
                Type::ListType(ctx.arena.alloc(inner))
            } else {
                return Err(ASTKind::ListType);
            }
        } else if let Token::Name(name) = token {
            Type::NamedType(NamedType { name })
        } else {
            return Err(ASTKind::Type);
        };
        if let Token::Exclam = ctx.peek() {
            ctx.next();
            Ok(Type::NonNullType(ctx.arena.alloc(of_type)))
        } else {
            Ok(of_type)
        }
    }
}

impl<'a> private::ParseNode<'a> for VariableDefinition<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<VariableDefinition<'a>> {
        let variable = Variable::new_with_ctx(ctx)?;
        let of_type = if let Token::Colon = ctx.next() {
            Type::new_with_ctx(ctx)?
        } else {
            return Err(ASTKind::VariableDefinition);
        };
        let default_value = if let Token::Equal = ctx.peek() {
            ctx.next();
            ctx.in_var_def = true;
            let value = Value::new_with_ctx(ctx)?;
            ctx.in_var_def = false;
            value
        } else {
            Value::Null
        };
        let directives = Directives::new_with_ctx(ctx)?;
        Ok(VariableDefinition {
            variable,
            of_type,
            default_value,
            directives,
        })
    }
}

impl<'a> private::ParseNode<'a> for VariableDefinitions<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<VariableDefinitions<'a>> {
        let mut children = Vec::new_in(ctx.arena);
        if let Token::ParenOpen = ctx.peek() {
            ctx.next();
            loop {
                children.push(VariableDefinition::new_with_ctx(ctx)?);
                if let Token::ParenClose = ctx.peek() {
                    ctx.next();
                    break;
                }
            }
        }
        Ok(VariableDefinitions { children })
    }
}

impl<'a> private::ParseNode<'a> for FragmentDefinition<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<FragmentDefinition<'a>> {
        if let Token::Name("fragment") = ctx.next() {
            let name = match ctx.next() {
                Token::Name("on") => return Err(ASTKind::FragmentDefinition),
                Token::Name(name) => NamedType { name },
                _ => return Err(ASTKind::FragmentDefinition),
            };
            let span = ctx.span();
            let type_condition = if let Token::Name("on") = ctx.next() {
                NamedType::new_with_ctx(ctx)?
            } else {
                return Err(ASTKind::FragmentDefinition);
            };
            let directives = Directives::new_with_ctx(ctx)?;
            let selection_set = if let Token::BraceOpen = ctx.peek() {
                SelectionSet::new_with_ctx(ctx)?
            } else {
                return Err(ASTKind::FragmentDefinition);
            };
            Ok(FragmentDefinition {
                name,
                type_condition,
                directives,
                selection_set,
                span,
            })
        } else {
            Err(ASTKind::FragmentDefinition)
        }
    }
}

impl<'a> private::ParseNode<'a> for OperationKind {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<OperationKind> {
        match ctx.next() {
            Token::Name("query") => Ok(OperationKind::Query),
            Token::Name("mutation") => Ok(OperationKind::Mutation),
            Token::Name("subscription") => Ok(OperationKind::Subscription),
            _ => Err(ASTKind::OperationKind),
        }
    }
}

impl<'a> private::ParseNode<'a> for OperationDefinition<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<OperationDefinition<'a>> {
        if let Token::BraceOpen = ctx.peek() {
            let span = ctx.span();
            let selection_set = SelectionSet::new_with_ctx(ctx)?;
            return Ok(OperationDefinition {
                operation: OperationKind::Query,
                name: None,
                variable_definitions: VariableDefinitions::default_in(ctx.arena),
                directives: Directives::default_in(ctx.arena),
                selection_set,
                span,
            });
        }
        let operation = OperationKind::new_with_ctx(ctx)?;
        let span = ctx.span();
        let name = if let Token::Name(_) = ctx.peek() {
            Some(NamedType::new_with_ctx(ctx)?)
        } else {
            None
        };
        let variable_definitions = VariableDefinitions::new_with_ctx(ctx)?;
        let directives = Directives::new_with_ctx(ctx)?;
        if let Token::BraceOpen = ctx.peek() {
            let selection_set = SelectionSet::new_with_ctx(ctx)?;
            Ok(OperationDefinition {
                operation,
                name,
                variable_definitions,
                directives,
                selection_set,
                span,
            })
        } else {
            Err(ASTKind::OperationDefinition)
        }
    }
}

impl<'a> private::ParseNode<'a> for Document<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Document<'a>> {
        let mut definitions = Vec::new_in(ctx.arena);
        loop {
            let definition = match ctx.peek() {
                Token::BraceOpen | Token::Name("query" | "mutation" | "subscription") => {
                    OperationDefinition::new_with_ctx(ctx).map(Definition::Operation)
                }
                Token::Name("fragment") => {
                    FragmentDefinition::new_with_ctx(ctx).map(Definition::Fragment)
                }
                Token::End => break,
                // Type system definitions aren't executable and are rejected here
                _ => Err(ASTKind::Document),
            }?;
            definitions.push(definition);
        }
        Ok(Document {
            definitions,
            size_hint: ctx.source().len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{super::ast::*, ParseNode};
    use crate::error::{ErrorType, Location};

    #[test]
    fn error() {
        let ctx = ASTContext::new();
        let result = Document::parse(&ctx, "query { document { $ }}");
        let error = result.err().unwrap();
        assert_eq!(error.error_type(), ErrorType::Syntax);
        assert_eq!(
            error.location,
            Some(Location {
                column: 20,
                line: 1
            })
        );

        let result = Document::parse(
            &ctx,
            "query {
            document {
                123
            }
        }",
        );
        assert_eq!(
            result.err().unwrap().location,
            Some(Location {
                column: 17,
                line: 3
            })
        );
    }

    #[test]
    fn rejects_type_definitions() {
        let ctx = ASTContext::new();
        let result = Document::parse(&ctx, "type Query { a: String }");
        assert_eq!(result.err().unwrap().message(), "Invalid Document");
    }

    #[test]
    fn rejects_unterminated_selection_set() {
        let ctx = ASTContext::new();
        assert!(Document::parse(&ctx, "{ user { name }").is_err());
        assert!(Document::parse(&ctx, "query Q($id: ID!").is_err());
        assert!(Document::parse(&ctx, "{ user(id: [1, 2) }").is_err());
    }

    #[test]
    fn empty_document() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "# nothing here\n").unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn named_type() {
        let ctx = ASTContext::new();
        assert_eq!(
            *NamedType::parse(&ctx, "TypeName").unwrap(),
            NamedType { name: "TypeName" }
        );
    }

    #[test]
    fn values() {
        let ctx = ASTContext::new();
        assert_eq!(
            *Value::parse(&ctx, "true").unwrap(),
            Value::Boolean(BooleanValue { value: true })
        );
        assert_eq!(
            *Value::parse(&ctx, "$var").unwrap(),
            Value::Variable(Variable { name: "var" })
        );
        assert_eq!(
            *Value::parse(&ctx, "123").unwrap(),
            Value::Int(IntValue { value: "123" })
        );
        assert_eq!(
            *Value::parse(&ctx, "0.5").unwrap(),
            Value::Float(FloatValue { value: "0.5" })
        );
        assert_eq!(*Value::parse(&ctx, "null").unwrap(), Value::Null);
        assert_eq!(
            *Value::parse(&ctx, "\"hello world\"").unwrap(),
            Value::String(StringValue {
                value: "hello world"
            })
        );
        assert_eq!(
            *Value::parse(&ctx, "MOBILE_WEB").unwrap(),
            Value::Enum(EnumValue {
                value: "MOBILE_WEB",
                span: Span::new(0, 10)
            })
        );

        match Value::parse(&ctx, "[1, { test: [] }]").unwrap() {
            Value::List(list) => {
                assert_eq!(list.children.len(), 2);
                assert!(matches!(list.children[1], Value::Object(_)));
            }
            other => panic!("expected a list, got {:?}", other),
        }
    }

    #[test]
    fn field_with_alias_arguments_and_directives() {
        let ctx = ASTContext::new();
        let field =
            Field::parse(&ctx, "alias: name(x: null, y: ENUM) @skip(if: true) { id }").unwrap();
        assert_eq!(field.alias, Some("alias"));
        assert_eq!(field.name, "name");
        assert_eq!(field.alias_or_name(), "alias");
        assert_eq!(field.span, Span::new(0, 5));
        let names: Vec<_> = field.arguments.children.iter().map(|arg| arg.name).collect();
        assert_eq!(names, vec!["x", "y"]);
        assert_eq!(field.arguments.children[1].span, Span::new(21, 22));
        assert!(field.directives.has("skip"));
        assert_eq!(field.selection_set.selections.len(), 1);
    }

    #[test]
    fn selections() {
        let ctx = ASTContext::new();
        let selection_set = SelectionSet::parse(
            &ctx,
            "{ ...UserFields @include(if: $a) ... on User { id } ... { name } }",
        )
        .unwrap();
        let spread = selection_set.selections[0].fragment_spread().unwrap();
        assert_eq!(spread.name.name, "UserFields");
        assert_eq!(spread.span, Span::new(5, 15));
        assert!(spread.directives.has("include"));

        match &selection_set.selections[1] {
            Selection::InlineFragment(fragment) => {
                assert_eq!(fragment.type_condition, Some(NamedType { name: "User" }));
            }
            other => panic!("expected an inline fragment, got {:?}", other),
        }
        match &selection_set.selections[2] {
            Selection::InlineFragment(fragment) => assert_eq!(fragment.type_condition, None),
            other => panic!("expected an inline fragment, got {:?}", other),
        }
    }

    #[test]
    fn variable_definitions() {
        let ctx = ASTContext::new();
        let source = "query Q($a: [ID!]! = [\"1\"], $b: Int) { a }";
        let operation = OperationDefinition::parse(&ctx, source).unwrap();
        assert_eq!(operation.name, Some(NamedType { name: "Q" }));
        assert_eq!(operation.variable_definitions.children.len(), 2);
        let first = &operation.variable_definitions.children[0];
        assert_eq!(first.variable.name, "a");
        assert_eq!(first.of_type.of_type().name, "ID");
        assert!(matches!(first.of_type, Type::NonNullType(_)));
        assert!(matches!(first.default_value, Value::List(_)));
        assert_eq!(operation.variable_definitions.children[1].default_value, Value::Null);

        assert!(OperationDefinition::parse(&ctx, "query Q($a: Int = $b) { a }").is_err());
    }

    #[test]
    fn definitions() {
        let ctx = ASTContext::new();
        let document = Document::parse(
            &ctx,
            "{ a } mutation M { b } subscription { c } fragment F on Query { d }",
        )
        .unwrap();
        let kinds: Vec<_> = document.operations().map(|op| op.operation).collect();
        assert_eq!(
            kinds,
            vec![
                OperationKind::Query,
                OperationKind::Mutation,
                OperationKind::Subscription
            ]
        );
        let fragment = document.fragments().next().unwrap();
        assert_eq!(fragment.name.name, "F");
        assert_eq!(fragment.type_condition.name, "Query");
        assert_eq!(fragment.span, Span::new(51, 52));
    }

    #[test]
    fn fragment_named_on_is_rejected() {
        let ctx = ASTContext::new();
        assert!(Document::parse(&ctx, "fragment on on Query { a }").is_err());
    }
}
