use super::error::{syntax, syntax_err, validation, SchemaError};
use super::finalizers::{finalize_schema, SchemaDefinition, SchemaParts};
use crate::{
    ast::{private::ParseNode, ASTContext, Directives, Value},
    error::{get_location, print_span, Error, ErrorType, Result},
    lexer::Token,
    schema::{
        Deprecation, DirectiveLocation, OwnedSchemaType, Schema, SchemaDirective, SchemaEnum,
        SchemaEnumValue, SchemaField, SchemaFields, SchemaInputField, SchemaInputObject,
        SchemaInterface, SchemaInterfaces, SchemaObject, SchemaPossibleTypes, SchemaScalar,
        SchemaUnion, TypeRef,
    },
};
use bumpalo::collections::Vec;

pub type ParseResult<T> = std::result::Result<T, SchemaError>;

pub(crate) mod private {
    use super::*;
    use crate::ast::{private::ParserContext as DocumentParserContext, Span};

    /// Private Parser context state that's kept to keep track of the current parser's progress and
    /// state. SDL shares its tokens, values and directives with executable documents, so this
    /// wraps the document parser's context.
    pub struct ParserContext<'a> {
        pub(crate) ast_ctx: &'a ASTContext,
        pub(crate) inner: DocumentParserContext<'a>,
    }

    impl<'a> ParserContext<'a> {
        /// Create a new Parser context for a given AST context and initialize it with an input source
        /// string to parse from.
        pub(crate) fn new(ctx: &'a ASTContext, source: &'a str) -> Self {
            ParserContext {
                ast_ctx: ctx,
                inner: DocumentParserContext::new(ctx, source),
            }
        }

        #[inline]
        pub(crate) fn next(&mut self) -> Token<'a> {
            self.inner.next()
        }

        #[inline]
        pub(crate) fn peek(&mut self) -> &Token<'a> {
            self.inner.peek()
        }

        #[inline]
        pub(crate) fn source(&self) -> &str {
            self.inner.source()
        }

        #[inline]
        pub(crate) fn span(&self) -> Span {
            self.inner.span()
        }

        #[inline]
        pub(crate) fn arena(&self) -> &'a bumpalo::Bump {
            &self.ast_ctx.arena
        }

        /// Descriptions carry no meaning for validation and are dropped.
        #[inline]
        pub(crate) fn skip_description(&mut self) {
            if let Token::String(_) = self.peek() {
                self.next();
            }
        }

        pub(crate) fn name(&mut self, expected: &str) -> ParseResult<&'a str> {
            match self.next() {
                Token::Name(name) => Ok(name),
                t => syntax_err!("Expected {}, got {:?}", expected, t),
            }
        }

        pub(crate) fn expect(&mut self, token: Token<'a>) -> ParseResult<()> {
            match self.next() {
                t if t == token => Ok(()),
                t => syntax_err!("Expected {:?}, got {:?}", token, t),
            }
        }

        pub(crate) fn directives(&mut self) -> ParseResult<Directives<'a>> {
            Ok(Directives::new_with_ctx(&mut self.inner)?)
        }

        /// Parses a constant value, as used for default values.
        pub(crate) fn const_value(&mut self) -> ParseResult<Value<'a>> {
            self.inner.in_var_def = true;
            let value = Value::new_with_ctx(&mut self.inner);
            self.inner.in_var_def = false;
            Ok(value?)
        }

        pub(crate) fn type_ref(&mut self) -> ParseResult<&'a TypeRef<'a>> {
            let type_ref = match self.next() {
                Token::Name(name) => TypeRef::Type(name),
                Token::BracketOpen => {
                    let inner = self.type_ref()?;
                    if self.next() != Token::BracketClose {
                        return syntax_err!("Unterminated list");
                    }
                    TypeRef::ListType(inner)
                }
                t => return syntax_err!("Expected type name or list type start `[`, got {:?}", t),
            };

            let type_ref = self.ast_ctx.alloc(type_ref);
            match self.peek() {
                Token::Exclam => {
                    self.next();
                    Ok(self.ast_ctx.alloc(TypeRef::NonNullType(type_ref)))
                }
                _ => Ok(type_ref),
            }
        }

        pub(crate) fn get_implements_interfaces(&mut self) -> ParseResult<Vec<'a, &'a str>> {
            let mut interfaces = Vec::new_in(self.arena());
            if self.peek() == &Token::Name("implements") {
                self.next();

                // Skip optional leading `&`
                if self.peek() == &Token::Ampersand {
                    self.next();
                }

                interfaces.push(self.name("interface name")?);
                while self.peek() == &Token::Ampersand {
                    self.next();
                    interfaces.push(self.name("interface name")?);
                }
            }

            Ok(interfaces)
        }
    }

    /// (Private) Trait for parsing SDL definitions from a Parser Context.
    /// The [`super::ParseSdl`] trait implements the public `parse` method instead.
    pub trait ParseFromCtx<'a>: Sized {
        fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self>;
    }
}

impl<'a, T: private::ParseFromCtx<'a>> ParseSdl<'a> for T {}

/// Trait for parsing schema definitions from SDL source text using recursive descent.
///
/// Mostly this will be used via `Schema::parse`.
pub trait ParseSdl<'a>: private::ParseFromCtx<'a> {
    /// Parse an input source text into the implementor's structure and allocate the result into
    /// the context arena.
    fn parse<T: ToString>(ctx: &'a ASTContext, source: T) -> Result<&'a Self> {
        let source = ctx.alloc_string(source.to_string());
        let mut parser_ctx = private::ParserContext::new(ctx, source);
        match Self::parse_from_ctx(&mut parser_ctx) {
            Ok(value) => Ok(ctx.alloc(value)),
            Err(SchemaError::SyntaxError(message)) => {
                let span = parser_ctx.span();
                Err(Error::new_with_context(
                    message,
                    Some(get_location(parser_ctx.source(), span.clamp_to(source))),
                    print_span(parser_ctx.source(), span),
                    Some(ErrorType::Syntax),
                ))
            }
            Err(error) => Err(Error::new(error.to_string(), Some(ErrorType::Schema))),
        }
    }
}

/// Reads the `@deprecated` marker and its optional reason off a definition's directives.
fn deprecation<'a>(directives: &Directives<'a>) -> Option<Deprecation<'a>> {
    let directive = directives
        .children
        .iter()
        .find(|directive| directive.name == "deprecated")?;
    let reason = directive
        .arguments
        .children
        .iter()
        .find(|argument| argument.name == "reason")
        .and_then(|argument| match &argument.value {
            Value::String(reason) => Some(reason.value),
            _ => None,
        });
    Some(Deprecation { reason })
}

impl<'a> private::ParseFromCtx<'a> for Schema<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        let mut parts = SchemaParts::new(ctx.ast_ctx);
        loop {
            ctx.skip_description();
            match ctx.peek() {
                Token::End => break,
                Token::Name("schema") => {
                    if parts.schema_def.is_some() {
                        return syntax_err!("Must not specify more than one Schema Definition.");
                    }
                    parts.schema_def = Some(SchemaDefinition::parse_from_ctx(ctx)?);
                }
                Token::Name("directive") => {
                    let directive = SchemaDirective::parse_from_ctx(ctx)?;
                    if parts.directives.contains_key(directive.name) {
                        return Err(validation!(
                            "Directive `@{}` is defined more than once.",
                            directive.name
                        ));
                    }
                    parts.directives.insert(directive.name, directive);
                }
                Token::Name("extend") => {
                    ctx.next();
                    if let Token::Name("schema") = ctx.peek() {
                        let extension = SchemaDefinition::parse_from_ctx(ctx)?;
                        let schema_def = parts.schema_def.get_or_insert_with(Default::default);
                        schema_def.merge(extension);
                    } else {
                        let extension = OwnedSchemaType::parse_from_ctx(ctx)?;
                        parts.extensions.push(extension);
                    }
                }
                _ => {
                    let type_def = OwnedSchemaType::parse_from_ctx(ctx)?;
                    let name = type_def.name();
                    if parts.types.contains_key(name) {
                        return Err(validation!("Type `{}` is defined more than once.", name));
                    }
                    parts.order.push(name);
                    parts.types.insert(name, type_def);
                }
            }
        }

        finalize_schema(ctx.ast_ctx, parts)
    }
}

impl<'a> private::ParseFromCtx<'a> for SchemaDefinition<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        if ctx.next() != Token::Name("schema") {
            return syntax_err!("Schema definition must start with the `schema` keyword.");
        }
        ctx.directives()?;

        let mut defs = SchemaDefinition::default();
        if ctx.peek() != &Token::BraceOpen {
            return Ok(defs);
        }
        ctx.next();

        while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
            let operation_type = match ctx.next() {
                Token::Name(op @ ("query" | "mutation" | "subscription")) => op,
                t => return syntax_err!("Expected operation type, got {:?}", t),
            };
            ctx.expect(Token::Colon)?;
            let type_name = ctx.name("named type")?;

            match operation_type {
                "query" => defs.query_root_type_name = Some(type_name),
                "mutation" => defs.mutation_root_type_name = Some(type_name),
                _ => defs.subscription_root_type_name = Some(type_name),
            }
        }

        ctx.expect(Token::BraceClose)?;
        Ok(defs)
    }
}

impl<'a> private::ParseFromCtx<'a> for SchemaDirective<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        if ctx.next() != Token::Name("directive") {
            return syntax_err!("Directive definition must start with the `directive` keyword.");
        }

        let name = match ctx.next() {
            Token::DirectiveName(name) => name,
            t => return syntax_err!("Expected directive name, got {:?}", t),
        };

        let mut directive = SchemaDirective::new(ctx.ast_ctx, name);
        for argument in parse_arguments_definition(ctx)? {
            directive.add_argument(ctx.ast_ctx, argument);
        }

        if let Token::Name("repeatable") = ctx.peek() {
            ctx.next();
            directive.is_repeatable = true;
        }

        if ctx.next() != Token::Name("on") {
            return syntax_err!("Expected `on`");
        }

        // Skip optional leading `|`
        if ctx.peek() == &Token::Pipe {
            ctx.next();
        }
        loop {
            let location = ctx.name("directive location")?;
            match DirectiveLocation::from_name(location) {
                Some(location) => directive.locations.push(location),
                None => return syntax_err!("Unknown directive location `{}`", location),
            }
            if ctx.peek() == &Token::Pipe {
                ctx.next();
            } else {
                break;
            }
        }

        Ok(directive)
    }
}

impl<'a> private::ParseFromCtx<'a> for OwnedSchemaType<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        match ctx.peek() {
            Token::Name("type") => SchemaObject::parse_from_ctx(ctx).map(OwnedSchemaType::Object),
            Token::Name("input") => {
                SchemaInputObject::parse_from_ctx(ctx).map(OwnedSchemaType::InputObject)
            }
            Token::Name("enum") => SchemaEnum::parse_from_ctx(ctx).map(OwnedSchemaType::Enum),
            Token::Name("scalar") => SchemaScalar::parse_from_ctx(ctx).map(OwnedSchemaType::Scalar),
            Token::Name("interface") => {
                SchemaInterface::parse_from_ctx(ctx).map(OwnedSchemaType::Interface)
            }
            Token::Name("union") => SchemaUnion::parse_from_ctx(ctx).map(OwnedSchemaType::Union),
            t => syntax_err!("Expected valid type definition, got {:?}.", t),
        }
    }
}

/// Parses an optional list of field definitions enclosed by braces.
fn parse_fields_definition<'a>(
    ctx: &mut private::ParserContext<'a>,
) -> ParseResult<std::vec::Vec<SchemaField<'a>>> {
    let mut fields = std::vec::Vec::new();
    if ctx.peek() != &Token::BraceOpen {
        return Ok(fields);
    }
    ctx.next();

    while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
        ctx.skip_description();
        let name = ctx.name("field name")?;
        let arguments = parse_arguments_definition(ctx)?;
        ctx.expect(Token::Colon)?;
        let output_type = ctx.type_ref()?;
        let directives = ctx.directives()?;

        let mut field = SchemaField::new(ctx.ast_ctx, name, output_type);
        field.deprecation = deprecation(&directives);
        for argument in arguments {
            field.add_argument(ctx.ast_ctx, argument);
        }
        fields.push(field);
    }

    ctx.expect(Token::BraceClose)?;
    Ok(fields)
}

/// Parses a single argument or input field definition.
fn parse_input_value_definition<'a>(
    ctx: &mut private::ParserContext<'a>,
) -> ParseResult<SchemaInputField<'a>> {
    ctx.skip_description();
    let name = ctx.name("input field name")?;
    ctx.expect(Token::Colon)?;
    let input_type = ctx.type_ref()?;
    if ctx.peek() == &Token::Equal {
        ctx.next();
        ctx.const_value()?;
    }
    let directives = ctx.directives()?;

    let mut input_field = SchemaInputField::new(name, input_type);
    input_field.deprecation = deprecation(&directives);
    Ok(input_field)
}

/// Parses an optional list of argument definitions enclosed by parentheses.
fn parse_arguments_definition<'a>(
    ctx: &mut private::ParserContext<'a>,
) -> ParseResult<std::vec::Vec<SchemaInputField<'a>>> {
    let mut arguments = std::vec::Vec::new();
    if ctx.peek() != &Token::ParenOpen {
        return Ok(arguments);
    }
    ctx.next();

    while !matches!(ctx.peek(), Token::ParenClose | Token::End) {
        arguments.push(parse_input_value_definition(ctx)?);
    }

    ctx.expect(Token::ParenClose)?;
    Ok(arguments)
}

impl<'a> private::ParseFromCtx<'a> for SchemaObject<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        if ctx.next() != Token::Name("type") {
            return syntax_err!("Object type must start with the `type` keyword.");
        }

        let name = ctx.name("type name")?;
        let mut object = SchemaObject::new(ctx.ast_ctx, name);
        for interface in ctx.get_implements_interfaces()? {
            object.add_interface(ctx.ast_ctx, interface);
        }
        ctx.directives()?;
        for field in parse_fields_definition(ctx)? {
            object.add_field(ctx.ast_ctx, field);
        }
        Ok(object)
    }
}

impl<'a> private::ParseFromCtx<'a> for SchemaInterface<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        if ctx.next() != Token::Name("interface") {
            return syntax_err!("Interface type must start with the `interface` keyword.");
        }

        let name = ctx.name("type name")?;
        let mut interface = SchemaInterface::new(ctx.ast_ctx, name);
        for implemented in ctx.get_implements_interfaces()? {
            interface.add_interface(ctx.ast_ctx, implemented);
        }
        ctx.directives()?;
        for field in parse_fields_definition(ctx)? {
            interface.add_field(ctx.ast_ctx, field);
        }
        Ok(interface)
    }
}

impl<'a> private::ParseFromCtx<'a> for SchemaInputObject<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        if ctx.next() != Token::Name("input") {
            return syntax_err!("Input object type must start with the `input` keyword.");
        }

        let name = ctx.name("input type name")?;
        ctx.directives()?;
        let mut input_object = SchemaInputObject::new(ctx.ast_ctx, name);
        if ctx.peek() == &Token::BraceOpen {
            ctx.next();
            while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
                let field = parse_input_value_definition(ctx)?;
                input_object.add_field(ctx.ast_ctx, field);
            }
            ctx.expect(Token::BraceClose)?;
        }
        Ok(input_object)
    }
}

impl<'a> private::ParseFromCtx<'a> for SchemaUnion<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        if ctx.next() != Token::Name("union") {
            return syntax_err!("Union type must start with the `union` keyword.");
        }

        let name = ctx.name("type name")?;
        ctx.directives()?;
        let mut union_type = SchemaUnion::new(ctx.ast_ctx, name);
        if ctx.peek() == &Token::Equal {
            ctx.next();

            // Skip optional leading `|`
            if ctx.peek() == &Token::Pipe {
                ctx.next();
            }

            union_type.add_possible_type(ctx.ast_ctx, ctx.name("type name")?);
            while ctx.peek() == &Token::Pipe {
                ctx.next();
                union_type.add_possible_type(ctx.ast_ctx, ctx.name("type name")?);
            }
        }

        Ok(union_type)
    }
}

impl<'a> private::ParseFromCtx<'a> for SchemaEnum<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        if ctx.next() != Token::Name("enum") {
            return syntax_err!("Enum definition must start with the `enum` keyword.");
        }

        let name = ctx.name("type name")?;
        ctx.directives()?;
        let mut enum_type = SchemaEnum::new(ctx.ast_ctx, name);
        if ctx.peek() != &Token::BraceOpen {
            return Ok(enum_type);
        }
        ctx.next();

        while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
            ctx.skip_description();
            let value = match ctx.next() {
                Token::Name(name @ ("true" | "false" | "null")) => {
                    return syntax_err!("Enum value `{}` is reserved", name)
                }
                Token::Name(name) => name,
                t => return syntax_err!("Expected either closing brace or value name, got {:?}", t),
            };
            let directives = ctx.directives()?;
            enum_type.add_value(
                ctx.ast_ctx,
                SchemaEnumValue {
                    name: value,
                    deprecation: deprecation(&directives),
                },
            );
        }

        ctx.expect(Token::BraceClose)?;
        Ok(enum_type)
    }
}

impl<'a> private::ParseFromCtx<'a> for SchemaScalar<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        if ctx.next() != Token::Name("scalar") {
            return syntax_err!("Scalar definition must start with the `scalar` keyword.");
        }

        let name = ctx.name("type name")?;
        ctx.directives()?;
        Ok(SchemaScalar { name })
    }
}
