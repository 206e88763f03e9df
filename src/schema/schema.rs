use crate::ast::{ASTContext, DefaultIn, OperationKind};
use bumpalo::collections::Vec;
use bumpalo::Bump;
use hashbrown::hash_map::DefaultHashBuilder;
use hashbrown::HashMap;

pub type SchemaMap<'a, V> = HashMap<&'a str, V, DefaultHashBuilder, &'a Bump>;

/// Schema Definition
///
/// A schema is created from root types for each kind of operation and is then used against
/// AST documents for validation. In this library the schema is never executable and serves only
/// for metadata and type information, including which fields, arguments and enum values have
/// been deprecated.
/// [Reference](https://spec.graphql.org/October2021/#sec-Schema)
#[derive(Debug, Clone)]
pub struct Schema<'a> {
    pub(crate) query_type: Option<&'a SchemaObject<'a>>,
    pub(crate) mutation_type: Option<&'a SchemaObject<'a>>,
    pub(crate) subscription_type: Option<&'a SchemaObject<'a>>,
    pub(crate) types: SchemaMap<'a, &'a SchemaType<'a>>,
    pub(crate) directives: SchemaMap<'a, &'a SchemaDirective<'a>>,
}

impl<'a> DefaultIn<'a> for Schema<'a> {
    fn default_in(arena: &'a Bump) -> Self {
        Schema {
            query_type: None,
            mutation_type: None,
            subscription_type: None,
            types: HashMap::new_in(arena),
            directives: HashMap::new_in(arena),
        }
    }
}

impl<'a> Schema<'a> {
    /// Returns whether the schema is a default, empty schema
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.query_type.is_none()
            && self.mutation_type.is_none()
            && self.subscription_type.is_none()
    }

    /// Returns the root object type for query operations
    #[inline]
    pub fn query_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.query_type
    }

    /// Returns the root object type for mutation operations
    #[inline]
    pub fn mutation_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.mutation_type
    }

    /// Returns the root object type for subscription operations
    #[inline]
    pub fn subscription_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.subscription_type
    }

    /// Returns the appropriate object type depending on the passed operation kind
    #[inline]
    pub fn get_root_type(&self, operation_kind: OperationKind) -> Option<&'a SchemaObject<'a>> {
        match operation_kind {
            OperationKind::Query => self.query_type,
            OperationKind::Mutation => self.mutation_type,
            OperationKind::Subscription => self.subscription_type,
        }
    }

    /// Retrieves a kind by name from known schema types.
    #[inline]
    pub fn get_type(&self, name: &str) -> Option<&'a SchemaType<'a>> {
        self.types.get(name).copied()
    }

    /// Retrieves a directive definition by name.
    #[inline]
    pub fn get_directive(&self, name: &str) -> Option<&'a SchemaDirective<'a>> {
        self.directives.get(name).copied()
    }

    /// Returns a copy of this schema that additionally knows the given directive definition.
    ///
    /// A directive of the same name that's already defined is replaced.
    pub fn with_directive(&self, ctx: &'a ASTContext, directive: SchemaDirective<'a>) -> Self {
        let mut schema = self.clone();
        schema.directives.insert(directive.name, ctx.alloc(directive));
        schema
    }
}

/// Marks a field, argument, input field or enum value as deprecated.
///
/// [Reference](https://spec.graphql.org/October2021/#sec--deprecated)
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Deprecation<'a> {
    pub reason: Option<&'a str>,
}

impl<'a> Deprecation<'a> {
    /// Returns the deprecation reason unless it's missing or empty.
    #[inline]
    pub fn reason(&self) -> Option<&'a str> {
        self.reason.filter(|reason| !reason.is_empty())
    }
}

/// Generic trait for any schema type that implements fields
pub trait SchemaFields<'a>: Sized {
    /// Add a new [SchemaField] to the list of fields
    fn add_field(&mut self, ctx: &'a ASTContext, field: SchemaField<'a>);

    /// Get a [Map] of all fields
    fn get_fields(&self) -> &SchemaMap<'a, &'a SchemaField<'a>>;

    /// Get a known field by name
    #[inline]
    fn get_field(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        self.get_fields().get(name).copied()
    }
}

/// Generic trait for any schema type that implements interfaces
pub trait SchemaInterfaces<'a>: Sized {
    /// Add a new [SchemaInterface] to the list of implemented interfaces
    fn add_interface(&mut self, ctx: &'a ASTContext, interface: &'a str);

    /// Get list of implemented [SchemaInterface]s
    fn get_interfaces(&self) -> &Vec<'a, &'a str>;

    /// Checks whether given [SchemaInterface] is implemented
    #[inline]
    fn implements_interface(&self, schema_interface: &SchemaInterface<'a>) -> bool {
        self.get_interfaces()
            .iter()
            .any(|interface| *interface == schema_interface.name)
    }
}

/// Generic trait for any schema type that has possible object types
pub trait SchemaPossibleTypes<'a>: Sized {
    /// Add a new [SchemaObject] to the list of possible types
    fn add_possible_type(&mut self, ctx: &'a ASTContext, object: &'a str);

    /// Get list of possible [SchemaObject] types
    fn get_possible_types(&self) -> &Vec<'a, &'a str>;

    /// Checks whether given [SchemaObject] is a possible subtype
    #[inline]
    fn is_possible_type(&self, schema_object: &SchemaObject<'a>) -> bool {
        self.get_possible_types()
            .iter()
            .any(|possible_type| *possible_type == schema_object.name)
    }
}

/// An Object type definition.
///
/// Most types in GraphQL are objects and define a set of fields and the interfaces they implement.
/// [Reference](https://spec.graphql.org/October2021/#sec-Objects)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaObject<'a> {
    pub name: &'a str,
    pub(crate) fields: SchemaMap<'a, &'a SchemaField<'a>>,
    pub(crate) interfaces: Vec<'a, &'a str>,
}

impl<'a> SchemaObject<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaObject {
            name,
            fields: HashMap::new_in(&ctx.arena),
            interfaces: Vec::new_in(&ctx.arena),
        }
    }
}

impl<'a> SchemaFields<'a> for SchemaObject<'a> {
    fn add_field(&mut self, ctx: &'a ASTContext, field: SchemaField<'a>) {
        self.fields.insert(field.name, ctx.alloc(field));
    }

    #[inline]
    fn get_fields(&self) -> &SchemaMap<'a, &'a SchemaField<'a>> {
        &self.fields
    }
}

impl<'a> SchemaInterfaces<'a> for SchemaObject<'a> {
    fn add_interface(&mut self, _ctx: &'a ASTContext, interface: &'a str) {
        self.interfaces.push(interface);
    }

    #[inline]
    fn get_interfaces(&self) -> &Vec<'a, &'a str> {
        &self.interfaces
    }
}

/// An Interface type definition.
///
/// Any object or other interfaces may implement one or more interfaces and must then adhere to the
/// definition of this interface. A field that returns an interface as its return type may return
/// any object that implements this interface.
/// [Reference](https://spec.graphql.org/October2021/#sec-Interfaces)
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaInterface<'a> {
    pub name: &'a str,
    pub(crate) fields: SchemaMap<'a, &'a SchemaField<'a>>,
    pub(crate) interfaces: Vec<'a, &'a str>,
    pub(crate) possible_types: Vec<'a, &'a str>,
}

impl<'a> SchemaInterface<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaInterface {
            name,
            fields: HashMap::new_in(&ctx.arena),
            interfaces: Vec::new_in(&ctx.arena),
            possible_types: Vec::new_in(&ctx.arena),
        }
    }
}

impl<'a> SchemaFields<'a> for SchemaInterface<'a> {
    fn add_field(&mut self, ctx: &'a ASTContext, field: SchemaField<'a>) {
        self.fields.insert(field.name, ctx.alloc(field));
    }

    #[inline]
    fn get_fields(&self) -> &SchemaMap<'a, &'a SchemaField<'a>> {
        &self.fields
    }
}

impl<'a> SchemaInterfaces<'a> for SchemaInterface<'a> {
    fn add_interface(&mut self, _ctx: &'a ASTContext, interface: &'a str) {
        self.interfaces.push(interface);
    }

    #[inline]
    fn get_interfaces(&self) -> &Vec<'a, &'a str> {
        &self.interfaces
    }
}

impl<'a> SchemaPossibleTypes<'a> for SchemaInterface<'a> {
    fn add_possible_type(&mut self, _ctx: &'a ASTContext, object: &'a str) {
        self.possible_types.push(object);
    }

    #[inline]
    fn get_possible_types(&self) -> &Vec<'a, &'a str> {
        &self.possible_types
    }
}

/// An object Field type definition.
///
/// A field is like a function that given its arguments as input values produces an output value.
/// [Reference](https://spec.graphql.org/October2021/#FieldsDefinition)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField<'a> {
    pub name: &'a str,
    pub arguments: SchemaMap<'a, SchemaInputField<'a>>,
    pub output_type: &'a TypeRef<'a>,
    pub deprecation: Option<Deprecation<'a>>,
}

impl<'a> SchemaField<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str, output_type: &'a TypeRef<'a>) -> Self {
        SchemaField {
            name,
            arguments: HashMap::new_in(&ctx.arena),
            output_type,
            deprecation: None,
        }
    }

    pub fn add_argument(&mut self, _ctx: &'a ASTContext, arg: SchemaInputField<'a>) {
        self.arguments.insert(arg.name, arg);
    }

    #[inline]
    pub fn get_argument(&self, name: &str) -> Option<&SchemaInputField<'a>> {
        self.arguments.get(name)
    }
}

/// A Union type definition.
///
/// A union contains a list of possible types that can be returned in its stead when its defined as
/// an output type.
/// [Reference](https://spec.graphql.org/October2021/#sec-Unions)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaUnion<'a> {
    pub name: &'a str,
    pub(crate) possible_types: Vec<'a, &'a str>,
}

impl<'a> SchemaUnion<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaUnion {
            name,
            possible_types: Vec::new_in(&ctx.arena),
        }
    }
}

impl<'a> SchemaPossibleTypes<'a> for SchemaUnion<'a> {
    fn add_possible_type(&mut self, _ctx: &'a ASTContext, object: &'a str) {
        self.possible_types.push(object);
    }

    #[inline]
    fn get_possible_types(&self) -> &Vec<'a, &'a str> {
        &self.possible_types
    }
}

/// A Scalar type definition.
///
/// Scalars represent primitive leaf values in GraphQL.
/// [Reference](https://spec.graphql.org/October2021/#sec-Scalars)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaScalar<'a> {
    pub name: &'a str,
}

impl<'a> SchemaScalar<'a> {
    #[inline]
    pub fn new(name: &'a str) -> Self {
        SchemaScalar { name }
    }
}

/// An Enum type definition and its values.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Enums)
#[derive(Debug, PartialEq, Clone)]
pub struct SchemaEnum<'a> {
    pub name: &'a str,
    pub values: SchemaMap<'a, SchemaEnumValue<'a>>,
}

impl<'a> SchemaEnum<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaEnum {
            name,
            values: HashMap::new_in(&ctx.arena),
        }
    }

    pub fn add_value(&mut self, _ctx: &'a ASTContext, value: SchemaEnumValue<'a>) {
        self.values.insert(value.name, value);
    }

    #[inline]
    pub fn get_value(&self, name: &str) -> Option<&SchemaEnumValue<'a>> {
        self.values.get(name)
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SchemaEnumValue<'a> {
    pub name: &'a str,
    pub deprecation: Option<Deprecation<'a>>,
}

/// An Input Object type definition.
///
/// Inputs, such as arguments, may sometimes be nested and accept objects that must adhere to the
/// shape of an Input Object definition. This is often used to represent more complex inputs.
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Objects)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaInputObject<'a> {
    pub name: &'a str,
    pub fields: SchemaMap<'a, SchemaInputField<'a>>,
}

impl<'a> SchemaInputObject<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaInputObject {
            name,
            fields: HashMap::new_in(&ctx.arena),
        }
    }

    pub fn add_field(&mut self, _ctx: &'a ASTContext, field: SchemaInputField<'a>) {
        self.fields.insert(field.name, field);
    }
}

/// An argument or input object field definition.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SchemaInputField<'a> {
    pub name: &'a str,
    pub input_type: &'a TypeRef<'a>,
    pub deprecation: Option<Deprecation<'a>>,
}

impl<'a> SchemaInputField<'a> {
    #[inline]
    pub fn new(name: &'a str, input_type: &'a TypeRef<'a>) -> Self {
        SchemaInputField {
            name,
            input_type,
            deprecation: None,
        }
    }
}

/// The places in executable documents and type system definitions that directives may annotate.
///
/// [Reference](https://spec.graphql.org/October2021/#DirectiveLocations)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

impl DirectiveLocation {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "QUERY" => DirectiveLocation::Query,
            "MUTATION" => DirectiveLocation::Mutation,
            "SUBSCRIPTION" => DirectiveLocation::Subscription,
            "FIELD" => DirectiveLocation::Field,
            "FRAGMENT_DEFINITION" => DirectiveLocation::FragmentDefinition,
            "FRAGMENT_SPREAD" => DirectiveLocation::FragmentSpread,
            "INLINE_FRAGMENT" => DirectiveLocation::InlineFragment,
            "VARIABLE_DEFINITION" => DirectiveLocation::VariableDefinition,
            "SCHEMA" => DirectiveLocation::Schema,
            "SCALAR" => DirectiveLocation::Scalar,
            "OBJECT" => DirectiveLocation::Object,
            "FIELD_DEFINITION" => DirectiveLocation::FieldDefinition,
            "ARGUMENT_DEFINITION" => DirectiveLocation::ArgumentDefinition,
            "INTERFACE" => DirectiveLocation::Interface,
            "UNION" => DirectiveLocation::Union,
            "ENUM" => DirectiveLocation::Enum,
            "ENUM_VALUE" => DirectiveLocation::EnumValue,
            "INPUT_OBJECT" => DirectiveLocation::InputObject,
            "INPUT_FIELD_DEFINITION" => DirectiveLocation::InputFieldDefinition,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            DirectiveLocation::Query => "QUERY",
            DirectiveLocation::Mutation => "MUTATION",
            DirectiveLocation::Subscription => "SUBSCRIPTION",
            DirectiveLocation::Field => "FIELD",
            DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
            DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
            DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
            DirectiveLocation::VariableDefinition => "VARIABLE_DEFINITION",
            DirectiveLocation::Schema => "SCHEMA",
            DirectiveLocation::Scalar => "SCALAR",
            DirectiveLocation::Object => "OBJECT",
            DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
            DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
            DirectiveLocation::Interface => "INTERFACE",
            DirectiveLocation::Union => "UNION",
            DirectiveLocation::Enum => "ENUM",
            DirectiveLocation::EnumValue => "ENUM_VALUE",
            DirectiveLocation::InputObject => "INPUT_OBJECT",
            DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }
}

/// A Directive definition.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Type-System.Directives)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDirective<'a> {
    pub name: &'a str,
    pub arguments: SchemaMap<'a, SchemaInputField<'a>>,
    pub locations: Vec<'a, DirectiveLocation>,
    pub is_repeatable: bool,
}

impl<'a> SchemaDirective<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaDirective {
            name,
            arguments: HashMap::new_in(&ctx.arena),
            locations: Vec::new_in(&ctx.arena),
            is_repeatable: false,
        }
    }

    pub fn add_argument(&mut self, _ctx: &'a ASTContext, arg: SchemaInputField<'a>) {
        self.arguments.insert(arg.name, arg);
    }

    #[inline]
    pub fn get_argument(&self, name: &str) -> Option<&SchemaInputField<'a>> {
        self.arguments.get(name)
    }

    #[inline]
    pub fn is_valid_location(&self, location: DirectiveLocation) -> bool {
        self.locations.contains(&location)
    }
}

/// A named type enum that represents all possible GraphQL definition types.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Types)
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SchemaType<'a> {
    InputObject(&'a SchemaInputObject<'a>),
    Object(&'a SchemaObject<'a>),
    Union(&'a SchemaUnion<'a>),
    Interface(&'a SchemaInterface<'a>),
    Scalar(&'a SchemaScalar<'a>),
    Enum(&'a SchemaEnum<'a>),
}

impl<'a> SchemaType<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            SchemaType::InputObject(x) => x.name,
            SchemaType::Object(x) => x.name,
            SchemaType::Union(x) => x.name,
            SchemaType::Interface(x) => x.name,
            SchemaType::Scalar(x) => x.name,
            SchemaType::Enum(x) => x.name,
        }
    }

    pub fn object(&self) -> Option<&'a SchemaObject<'a>> {
        match self {
            SchemaType::Object(x) => Some(x),
            _ => None,
        }
    }

    pub fn input_type(&self) -> Option<InputType<'a>> {
        match self {
            SchemaType::Scalar(x) => Some(InputType::Scalar(x)),
            SchemaType::Enum(x) => Some(InputType::Enum(x)),
            SchemaType::InputObject(x) => Some(InputType::InputObject(x)),
            _ => None,
        }
    }

    pub fn output_type(&self) -> Option<OutputType<'a>> {
        match self {
            SchemaType::Object(x) => Some(OutputType::Object(x)),
            SchemaType::Union(x) => Some(OutputType::Union(x)),
            SchemaType::Interface(x) => Some(OutputType::Interface(x)),
            SchemaType::Scalar(x) => Some(OutputType::Scalar(x)),
            SchemaType::Enum(x) => Some(OutputType::Enum(x)),
            _ => None,
        }
    }
}

/// An owned named type, used while a schema is being assembled and before its types are moved
/// into the arena.
#[derive(Debug, PartialEq, Clone)]
pub enum OwnedSchemaType<'a> {
    InputObject(SchemaInputObject<'a>),
    Object(SchemaObject<'a>),
    Union(SchemaUnion<'a>),
    Interface(SchemaInterface<'a>),
    Scalar(SchemaScalar<'a>),
    Enum(SchemaEnum<'a>),
}

impl<'a> OwnedSchemaType<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            OwnedSchemaType::InputObject(x) => x.name,
            OwnedSchemaType::Object(x) => x.name,
            OwnedSchemaType::Union(x) => x.name,
            OwnedSchemaType::Interface(x) => x.name,
            OwnedSchemaType::Scalar(x) => x.name,
            OwnedSchemaType::Enum(x) => x.name,
        }
    }

    /// Moves this type into the arena and returns a reference to it.
    pub fn into_schema_type(self, ctx: &'a ASTContext) -> &'a SchemaType<'a> {
        let schema_type = match self {
            OwnedSchemaType::InputObject(x) => SchemaType::InputObject(ctx.alloc(x)),
            OwnedSchemaType::Object(x) => SchemaType::Object(ctx.alloc(x)),
            OwnedSchemaType::Union(x) => SchemaType::Union(ctx.alloc(x)),
            OwnedSchemaType::Interface(x) => SchemaType::Interface(ctx.alloc(x)),
            OwnedSchemaType::Scalar(x) => SchemaType::Scalar(ctx.alloc(x)),
            OwnedSchemaType::Enum(x) => SchemaType::Enum(ctx.alloc(x)),
        };
        ctx.alloc(schema_type)
    }
}

impl<'a> From<&'a SchemaObject<'a>> for SchemaType<'a> {
    #[inline]
    fn from(schema_object: &'a SchemaObject<'a>) -> Self {
        SchemaType::Object(schema_object)
    }
}

impl<'a> From<OutputType<'a>> for SchemaType<'a> {
    #[inline]
    fn from(type_ref: OutputType<'a>) -> Self {
        match type_ref {
            OutputType::Object(x) => SchemaType::Object(x),
            OutputType::Union(x) => SchemaType::Union(x),
            OutputType::Interface(x) => SchemaType::Interface(x),
            OutputType::Scalar(x) => SchemaType::Scalar(x),
            OutputType::Enum(x) => SchemaType::Enum(x),
        }
    }
}

impl<'a> From<InputType<'a>> for SchemaType<'a> {
    #[inline]
    fn from(type_ref: InputType<'a>) -> Self {
        match type_ref {
            InputType::InputObject(x) => SchemaType::InputObject(x),
            InputType::Scalar(x) => SchemaType::Scalar(x),
            InputType::Enum(x) => SchemaType::Enum(x),
        }
    }
}

/// An output type enum that represents all possible GraphQL definition types that a field may
/// return.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-and-Output-Types)
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum OutputType<'a> {
    Object(&'a SchemaObject<'a>),
    Union(&'a SchemaUnion<'a>),
    Interface(&'a SchemaInterface<'a>),
    Scalar(&'a SchemaScalar<'a>),
    Enum(&'a SchemaEnum<'a>),
}

impl<'a> OutputType<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            OutputType::Object(x) => x.name,
            OutputType::Union(x) => x.name,
            OutputType::Interface(x) => x.name,
            OutputType::Scalar(x) => x.name,
            OutputType::Enum(x) => x.name,
        }
    }

    /// Returns the field of the given name if this type is an object or interface type.
    #[inline]
    pub fn get_field(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        match self {
            OutputType::Object(x) => x.get_field(name),
            OutputType::Interface(x) => x.get_field(name),
            _ => None,
        }
    }
}

/// An input type enum that represents all possible GraphQL definition types that an argument or
/// input object field may accept.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-and-Output-Types)
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputType<'a> {
    InputObject(&'a SchemaInputObject<'a>),
    Scalar(&'a SchemaScalar<'a>),
    Enum(&'a SchemaEnum<'a>),
}

impl<'a> InputType<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            InputType::InputObject(o) => o.name,
            InputType::Scalar(s) => s.name,
            InputType::Enum(e) => e.name,
        }
    }
}

/// A reference to a named type, wrapped by any number of list and non-null modifiers.
#[derive(Clone, Copy)]
pub enum TypeRef<'a> {
    Type(&'a str),
    ListType(&'a TypeRef<'a>),
    NonNullType(&'a TypeRef<'a>),
}

impl<'a> TypeRef<'a> {
    /// Returns the name of the named type inside all wrappers.
    #[inline]
    pub fn named_type(&self) -> &'a str {
        match self {
            TypeRef::Type(of_type) => of_type,
            TypeRef::ListType(of_type) | TypeRef::NonNullType(of_type) => of_type.named_type(),
        }
    }

    /// Resolves the named type inside all wrappers against a schema.
    #[inline]
    pub fn of_type(&self, schema: &Schema<'a>) -> Option<&'a SchemaType<'a>> {
        schema.get_type(self.named_type())
    }

    /// Returns the type inside a list wrapper, looking through a non-null wrapper first.
    #[inline]
    pub fn list_item_type(&self) -> Option<&'a TypeRef<'a>> {
        match self {
            TypeRef::ListType(of_type) => Some(of_type),
            TypeRef::NonNullType(of_type) => of_type.list_item_type(),
            TypeRef::Type(_) => None,
        }
    }
}

/// This implementation is necessary to circuit break circular types.
/// Without this impl, `Debug` would print on and on, overflowing the stack as it's bouncing between types over and over.
impl<'a> std::fmt::Debug for TypeRef<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type(arg0) => f.debug_tuple("Type").field(&arg0).finish(),
            Self::ListType(arg0) => f.debug_tuple("ListType").field(arg0).finish(),
            Self::NonNullType(arg0) => f.debug_tuple("NonNullType").field(arg0).finish(),
        }
    }
}

/// Type references only ever compare type names, which is all we need for comparing references.
impl<'a> PartialEq for TypeRef<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Type(left), Self::Type(right)) => left == right,
            (Self::ListType(left), Self::ListType(right)) => left == right,
            (Self::NonNullType(left), Self::NonNullType(right)) => left == right,
            _ => false,
        }
    }
}

impl<'a> std::fmt::Display for TypeRef<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Type(name) => write!(f, "{}", name),
            TypeRef::ListType(of_type) => write!(f, "[{}]", of_type),
            TypeRef::NonNullType(of_type) => write!(f, "{}!", of_type),
        }
    }
}
