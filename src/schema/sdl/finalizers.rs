use super::error::{validation, SchemaError};
use super::parser::ParseResult;
use crate::ast::{ASTContext, DefaultIn};
use crate::schema::{
    DirectiveLocation, OwnedSchemaType, Schema, SchemaDirective, SchemaFields, SchemaInputField,
    SchemaInterfaces, SchemaMap, SchemaPossibleTypes, SchemaScalar, TypeRef,
};
use bumpalo::collections::Vec;
use hashbrown::HashMap;

const DEFAULT_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Root operation type names as given by `schema { ... }` definitions and extensions.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct SchemaDefinition<'a> {
    pub(super) query_root_type_name: Option<&'a str>,
    pub(super) mutation_root_type_name: Option<&'a str>,
    pub(super) subscription_root_type_name: Option<&'a str>,
}

impl<'a> SchemaDefinition<'a> {
    pub(super) fn merge(&mut self, other: SchemaDefinition<'a>) {
        self.query_root_type_name = other.query_root_type_name.or(self.query_root_type_name);
        self.mutation_root_type_name = other
            .mutation_root_type_name
            .or(self.mutation_root_type_name);
        self.subscription_root_type_name = other
            .subscription_root_type_name
            .or(self.subscription_root_type_name);
    }
}

/// Everything the SDL parser collected before types are cross-checked and moved into the arena.
pub(super) struct SchemaParts<'a> {
    pub(super) schema_def: Option<SchemaDefinition<'a>>,
    pub(super) types: SchemaMap<'a, OwnedSchemaType<'a>>,
    /// Type names in declaration order, so that checks report in a stable order.
    pub(super) order: Vec<'a, &'a str>,
    pub(super) extensions: Vec<'a, OwnedSchemaType<'a>>,
    pub(super) directives: SchemaMap<'a, SchemaDirective<'a>>,
}

impl<'a> SchemaParts<'a> {
    pub(super) fn new(ctx: &'a ASTContext) -> Self {
        SchemaParts {
            schema_def: None,
            types: HashMap::new_in(&ctx.arena),
            order: Vec::new_in(&ctx.arena),
            extensions: Vec::new_in(&ctx.arena),
            directives: HashMap::new_in(&ctx.arena),
        }
    }
}

/// Merges a type extension into the type it extends.
fn merge_extension<'a>(
    ctx: &'a ASTContext,
    base: &mut OwnedSchemaType<'a>,
    extension: OwnedSchemaType<'a>,
) -> ParseResult<()> {
    let name = base.name();
    match (base, extension) {
        (OwnedSchemaType::Object(base), OwnedSchemaType::Object(extension)) => {
            for (field_name, field) in extension.fields.into_iter() {
                if base.fields.contains_key(field_name) {
                    return Err(validation!(
                        "Field `{}.{}` can only be defined once.",
                        name,
                        field_name
                    ));
                }
                base.fields.insert(field_name, field);
            }
            for interface in extension.interfaces.into_iter() {
                base.add_interface(ctx, interface);
            }
        }
        (OwnedSchemaType::Interface(base), OwnedSchemaType::Interface(extension)) => {
            for (field_name, field) in extension.fields.into_iter() {
                if base.fields.contains_key(field_name) {
                    return Err(validation!(
                        "Field `{}.{}` can only be defined once.",
                        name,
                        field_name
                    ));
                }
                base.fields.insert(field_name, field);
            }
            for interface in extension.interfaces.into_iter() {
                base.add_interface(ctx, interface);
            }
        }
        (OwnedSchemaType::InputObject(base), OwnedSchemaType::InputObject(extension)) => {
            for (_, field) in extension.fields.into_iter() {
                base.add_field(ctx, field);
            }
        }
        (OwnedSchemaType::Enum(base), OwnedSchemaType::Enum(extension)) => {
            for (_, value) in extension.values.into_iter() {
                base.add_value(ctx, value);
            }
        }
        (OwnedSchemaType::Union(base), OwnedSchemaType::Union(extension)) => {
            for possible_type in extension.possible_types.into_iter() {
                base.add_possible_type(ctx, possible_type);
            }
        }
        (OwnedSchemaType::Scalar(_), OwnedSchemaType::Scalar(_)) => {}
        _ => {
            return Err(validation!(
                "Cannot extend type `{}` with a different kind of type.",
                name
            ))
        }
    }
    Ok(())
}

fn builtin_directives<'a>(ctx: &'a ASTContext) -> [SchemaDirective<'a>; 4] {
    let boolean = ctx.alloc(TypeRef::NonNullType(ctx.alloc(TypeRef::Type("Boolean"))));
    let string = ctx.alloc(TypeRef::Type("String"));
    let url = ctx.alloc(TypeRef::NonNullType(string));

    let conditional = |name: &'a str| {
        let mut directive = SchemaDirective::new(ctx, name);
        directive.add_argument(ctx, SchemaInputField::new("if", boolean));
        directive.locations.extend([
            DirectiveLocation::Field,
            DirectiveLocation::FragmentSpread,
            DirectiveLocation::InlineFragment,
        ]);
        directive
    };

    let mut deprecated = SchemaDirective::new(ctx, "deprecated");
    deprecated.add_argument(ctx, SchemaInputField::new("reason", string));
    deprecated.locations.extend([
        DirectiveLocation::FieldDefinition,
        DirectiveLocation::ArgumentDefinition,
        DirectiveLocation::InputFieldDefinition,
        DirectiveLocation::EnumValue,
    ]);

    let mut specified_by = SchemaDirective::new(ctx, "specifiedBy");
    specified_by.add_argument(ctx, SchemaInputField::new("url", url));
    specified_by.locations.push(DirectiveLocation::Scalar);

    [
        conditional("skip"),
        conditional("include"),
        deprecated,
        specified_by,
    ]
}

fn is_input_type(types: &SchemaMap<'_, OwnedSchemaType<'_>>, type_ref: &TypeRef) -> bool {
    matches!(
        types.get(type_ref.named_type()),
        Some(
            OwnedSchemaType::Scalar(_)
                | OwnedSchemaType::Enum(_)
                | OwnedSchemaType::InputObject(_)
        )
    )
}

fn is_output_type(types: &SchemaMap<'_, OwnedSchemaType<'_>>, type_ref: &TypeRef) -> bool {
    !matches!(
        types.get(type_ref.named_type()),
        None | Some(OwnedSchemaType::InputObject(_))
    )
}

/// Checks that every type reference inside a definition points at a type of the right kind.
fn check_references<'a>(
    types: &SchemaMap<'a, OwnedSchemaType<'a>>,
    type_def: &OwnedSchemaType<'a>,
) -> ParseResult<()> {
    let name = type_def.name();
    let check_fields = |fields: &SchemaMap<'a, &'a crate::schema::SchemaField<'a>>| {
        for field in fields.values() {
            if !is_output_type(types, field.output_type) {
                return Err(validation!(
                    "Field `{}.{}` has an invalid type `{}`.",
                    name,
                    field.name,
                    field.output_type
                ));
            }
            for argument in field.arguments.values() {
                if !is_input_type(types, argument.input_type) {
                    return Err(validation!(
                        "Argument `{}` of `{}.{}` has an invalid type `{}`.",
                        argument.name,
                        name,
                        field.name,
                        argument.input_type
                    ));
                }
            }
        }
        Ok(())
    };
    let check_interfaces = |interfaces: &Vec<'a, &'a str>| {
        for interface in interfaces.iter() {
            if !matches!(types.get(interface), Some(OwnedSchemaType::Interface(_))) {
                return Err(validation!(
                    "Interface `{}` on type `{}` does not exist.",
                    interface,
                    name
                ));
            }
        }
        Ok(())
    };

    match type_def {
        OwnedSchemaType::Object(object) => {
            check_fields(object.get_fields())?;
            check_interfaces(object.get_interfaces())
        }
        OwnedSchemaType::Interface(interface) => {
            check_fields(interface.get_fields())?;
            check_interfaces(interface.get_interfaces())
        }
        OwnedSchemaType::InputObject(input_object) => {
            for field in input_object.fields.values() {
                if !is_input_type(types, field.input_type) {
                    return Err(validation!(
                        "Field `{}.{}` has an invalid type `{}`.",
                        name,
                        field.name,
                        field.input_type
                    ));
                }
            }
            Ok(())
        }
        OwnedSchemaType::Union(union_type) => {
            for member in union_type.get_possible_types().iter() {
                if !matches!(types.get(member), Some(OwnedSchemaType::Object(_))) {
                    return Err(validation!(
                        "Type `{}` on union `{}` is not a valid object type.",
                        member,
                        name
                    ));
                }
            }
            Ok(())
        }
        OwnedSchemaType::Scalar(_) | OwnedSchemaType::Enum(_) => Ok(()),
    }
}

/// Resolves extensions, adds built-in scalars and directives, checks all type references and
/// finally moves all definitions into the arena-allocated [Schema].
pub(super) fn finalize_schema<'a>(
    ctx: &'a ASTContext,
    parts: SchemaParts<'a>,
) -> ParseResult<Schema<'a>> {
    let SchemaParts {
        schema_def,
        mut types,
        mut order,
        extensions,
        mut directives,
    } = parts;

    for scalar in DEFAULT_SCALARS {
        if !types.contains_key(scalar) {
            types.insert(scalar, OwnedSchemaType::Scalar(SchemaScalar::new(scalar)));
            order.push(scalar);
        }
    }

    for extension in extensions.into_iter() {
        let name = extension.name();
        match types.get_mut(name) {
            Some(base) => merge_extension(ctx, base, extension)?,
            None => {
                return Err(validation!(
                    "Cannot extend type `{}` because it is not defined.",
                    name
                ))
            }
        }
    }

    for directive in builtin_directives(ctx) {
        directives.entry(directive.name).or_insert(directive);
    }

    // Objects register themselves as possible types of the interfaces they implement
    let mut implementations = std::vec::Vec::new();
    for name in order.iter() {
        if let Some(OwnedSchemaType::Object(object)) = types.get(name) {
            for interface in object.get_interfaces().iter() {
                implementations.push((*interface, object.name));
            }
        }
    }
    for (interface, object) in implementations {
        if let Some(OwnedSchemaType::Interface(interface)) = types.get_mut(interface) {
            interface.add_possible_type(ctx, object);
        }
    }

    for name in order.iter() {
        if let Some(type_def) = types.get(name) {
            check_references(&types, type_def)?;
        }
    }
    for directive in directives.values() {
        for argument in directive.arguments.values() {
            if !is_input_type(&types, argument.input_type) {
                return Err(validation!(
                    "Argument `{}` of directive `@{}` has an invalid type `{}`.",
                    argument.name,
                    directive.name,
                    argument.input_type
                ));
            }
        }
    }

    let mut schema = Schema::default_in(&ctx.arena);
    for name in order.iter() {
        if let Some(type_def) = types.remove(name) {
            schema.types.insert(*name, type_def.into_schema_type(ctx));
        }
    }
    for (name, directive) in directives.into_iter() {
        schema.directives.insert(name, ctx.alloc(directive));
    }

    let root_type = |explicit: Option<&'a str>, default: &'a str, kind: &str| {
        let name = match (schema_def, explicit) {
            (Some(_), Some(name)) => name,
            (Some(_), None) => return Ok(None),
            (None, _) => default,
        };
        match schema.get_type(name) {
            Some(schema_type) => match schema_type.object() {
                Some(object) => Ok(Some(object)),
                None => Err(validation!(
                    "{} root type `{}` must be an object type.",
                    kind,
                    name
                )),
            },
            None if schema_def.is_some() => Err(validation!(
                "{} root type `{}` does not exist.",
                kind,
                name
            )),
            None => Ok(None),
        }
    };

    let definition = schema_def.unwrap_or_default();
    let query_type = root_type(definition.query_root_type_name, "Query", "Query")?;
    let mutation_type = root_type(definition.mutation_root_type_name, "Mutation", "Mutation")?;
    let subscription_type = root_type(
        definition.subscription_root_type_name,
        "Subscription",
        "Subscription",
    )?;
    schema.query_type = query_type;
    schema.mutation_type = mutation_type;
    schema.subscription_type = subscription_type;

    Ok(schema)
}
