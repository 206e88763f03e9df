use crate::ast::*;
use crate::schema::{
    OutputType, Schema, SchemaDirective, SchemaField, SchemaInputField, SchemaType, TypeRef,
};

/// Tracks which schema types, field definitions and argument definitions the traversal of a
/// document currently sits in.
///
/// The [`VisitNode`](super::VisitNode) traversal updates this before calling `enter_` callbacks and
/// after calling `leave_` callbacks, so that visitors receive type information of the node they're
/// looking at via [`VisitInfo`](super::VisitInfo). When a name can't be resolved against the schema
/// the corresponding getter returns `None` for the node and all its children.
///
/// `__typename` resolves to a `String!` field on every composite type. The `__schema` and `__type`
/// meta fields have no definition, so nothing below them is type-checked.
#[derive(Debug, Default, Clone)]
pub struct TypeInfo<'a> {
    schema: Option<&'a Schema<'a>>,
    typename_field: Option<&'a SchemaField<'a>>,
    types: Vec<Option<OutputType<'a>>>,
    parent_types: Vec<Option<OutputType<'a>>>,
    field_defs: Vec<Option<&'a SchemaField<'a>>>,
    directive: Option<&'a SchemaDirective<'a>>,
    argument: Option<&'a SchemaInputField<'a>>,
}

impl<'a> TypeInfo<'a> {
    pub fn new(ctx: &'a ASTContext, schema: &'a Schema<'a>) -> Self {
        let string = ctx.alloc(TypeRef::Type("String"));
        let output_type = ctx.alloc(TypeRef::NonNullType(string));
        let typename_field = ctx.alloc(SchemaField::new(ctx, "__typename", output_type));
        TypeInfo {
            schema: Some(schema),
            typename_field: Some(typename_field),
            ..TypeInfo::default()
        }
    }

    #[inline]
    pub fn schema(&self) -> Option<&'a Schema<'a>> {
        self.schema
    }

    /// The named output type of the current field, fragment or operation.
    #[inline]
    pub fn output_type(&self) -> Option<OutputType<'a>> {
        self.types.last().copied().flatten()
    }

    /// The composite type whose fields the current selection set selects.
    #[inline]
    pub fn parent_type(&self) -> Option<OutputType<'a>> {
        self.parent_types.last().copied().flatten()
    }

    /// The definition of the field that's currently visited.
    #[inline]
    pub fn field_def(&self) -> Option<&'a SchemaField<'a>> {
        self.field_defs.last().copied().flatten()
    }

    /// The definition of the directive that's currently visited.
    #[inline]
    pub fn directive(&self) -> Option<&'a SchemaDirective<'a>> {
        self.directive
    }

    /// The definition of the argument that's currently visited, either of a field or a directive.
    #[inline]
    pub fn argument(&self) -> Option<&'a SchemaInputField<'a>> {
        self.argument
    }

    fn named_output_type(&self, name: &str) -> Option<OutputType<'a>> {
        self.schema
            .and_then(|schema| schema.get_type(name))
            .and_then(SchemaType::output_type)
    }

    fn resolve_field(
        &self,
        parent_type: OutputType<'a>,
        name: &str,
    ) -> Option<&'a SchemaField<'a>> {
        if name == "__typename" {
            return match parent_type {
                OutputType::Object(_) | OutputType::Interface(_) | OutputType::Union(_) => {
                    self.typename_field
                }
                _ => None,
            };
        }
        parent_type.get_field(name)
    }

    pub(crate) fn enter_operation(&mut self, operation: &OperationDefinition<'a>) {
        let root_type = self
            .schema
            .and_then(|schema| schema.get_root_type(operation.operation))
            .map(OutputType::Object);
        self.types.push(root_type);
    }

    pub(crate) fn enter_fragment(&mut self, fragment: &FragmentDefinition<'a>) {
        let type_condition = self.named_output_type(fragment.type_condition.name);
        self.types.push(type_condition);
    }

    pub(crate) fn enter_inline_fragment(&mut self, fragment: &InlineFragment<'a>) {
        let type_condition = match &fragment.type_condition {
            Some(type_condition) => self.named_output_type(type_condition.name),
            None => self.output_type(),
        };
        self.types.push(type_condition);
    }

    pub(crate) fn enter_selection_set(&mut self) {
        let parent_type = self.output_type();
        self.parent_types.push(parent_type);
    }

    pub(crate) fn leave_selection_set(&mut self) {
        self.parent_types.pop();
    }

    pub(crate) fn enter_field(&mut self, field: &Field<'a>) {
        let field_def = self
            .parent_type()
            .and_then(|parent_type| self.resolve_field(parent_type, field.name));
        let output_type = match (self.schema, field_def) {
            (Some(schema), Some(field_def)) => field_def
                .output_type
                .of_type(schema)
                .and_then(SchemaType::output_type),
            _ => None,
        };
        self.field_defs.push(field_def);
        self.types.push(output_type);
    }

    pub(crate) fn leave_field(&mut self) {
        self.field_defs.pop();
        self.types.pop();
    }

    /// Pops the type pushed by an operation, fragment or inline fragment.
    pub(crate) fn leave_type(&mut self) {
        self.types.pop();
    }

    pub(crate) fn enter_directive(&mut self, directive: &Directive<'a>) {
        self.directive = self
            .schema
            .and_then(|schema| schema.get_directive(directive.name));
    }

    pub(crate) fn leave_directive(&mut self) {
        self.directive = None;
    }

    pub(crate) fn enter_argument(&mut self, argument: &Argument<'a>) {
        self.argument = match self.directive {
            Some(directive) => directive.arguments.get(argument.name),
            None => self
                .field_def()
                .and_then(|field_def| field_def.arguments.get(argument.name)),
        };
    }

    pub(crate) fn leave_argument(&mut self) {
        self.argument = None;
    }
}
