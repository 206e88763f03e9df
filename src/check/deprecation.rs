use super::DeprecationWarning;
use crate::ast::*;
use crate::schema::{Deprecation, Schema, SchemaType};
use crate::visit::*;

/// Scans a document for usages of deprecated schema elements and returns one warning per usage,
/// in the order the usages appear in the document.
///
/// Fields, arguments and enum values count as deprecated whenever the schema marks them with
/// `@deprecated`, with or without a reason. Arguments of directives are reported against the field
/// the directive is placed on, and aren't reported outside of fields. Enum values are found in
/// argument values, in nested lists and input objects, and in the default values of variables.
pub fn scan_deprecations<'a>(
    ctx: &'a ASTContext,
    schema: &'a Schema<'a>,
    document: &'a Document<'a>,
) -> Vec<DeprecationWarning> {
    let mut warnings = Vec::new();
    let mut scanner = DeprecationScanner { schema };
    document.visit_with_types(TypeInfo::new(ctx, schema), &mut warnings, &mut scanner);
    tracing::trace!(warnings = warnings.len(), "scanned for deprecated usages");
    warnings
}

fn with_reason(mut message: String, deprecation: &Deprecation) -> String {
    if let Some(reason) = deprecation.reason() {
        message.push(' ');
        message.push_str(reason);
    }
    message
}

struct DeprecationScanner<'a> {
    schema: &'a Schema<'a>,
}

impl<'a> DeprecationScanner<'a> {
    fn scan_value(
        &self,
        warnings: &mut Vec<DeprecationWarning>,
        value: &'a Value<'a>,
        type_name: &'a str,
        path: &Path,
    ) {
        let mut stack = vec![(value, type_name)];
        while let Some((value, type_name)) = stack.pop() {
            match (value, self.schema.get_type(type_name)) {
                (Value::Enum(enum_value), Some(SchemaType::Enum(enum_type))) => {
                    let deprecation = enum_type
                        .get_value(enum_value.value)
                        .and_then(|value| value.deprecation);
                    if let Some(deprecation) = deprecation {
                        let message = format!(
                            "The enum value '{}.{}' is deprecated.",
                            enum_type.name, enum_value.value
                        );
                        warnings.push(DeprecationWarning {
                            message: with_reason(message, &deprecation),
                            location: None,
                            path: path.clone(),
                            span: enum_value.span,
                        });
                    }
                }
                (Value::List(list), _) => {
                    stack.extend(list.children.iter().rev().map(|item| (item, type_name)));
                }
                (Value::Object(object), Some(SchemaType::InputObject(input_object))) => {
                    stack.extend(object.children.iter().rev().filter_map(|field| {
                        let definition = input_object.fields.get(field.name)?;
                        Some((&field.value, definition.input_type.named_type()))
                    }));
                }
                _ => {}
            }
        }
    }
}

impl<'a> Visitor<'a, Vec<DeprecationWarning>> for DeprecationScanner<'a> {
    fn enter_variable_definition(
        &mut self,
        warnings: &mut Vec<DeprecationWarning>,
        var_def: &'a VariableDefinition<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        let type_name = var_def.of_type.of_type().name;
        self.scan_value(warnings, &var_def.default_value, type_name, &info.path);
        VisitFlow::Next
    }

    fn enter_field(
        &mut self,
        warnings: &mut Vec<DeprecationWarning>,
        field: &'a Field<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        let (Some(field_def), Some(parent_type)) =
            (info.types.field_def(), info.types.parent_type())
        else {
            return VisitFlow::Next;
        };
        if let Some(deprecation) = &field_def.deprecation {
            let message = format!(
                "The field '{}.{}' is deprecated.",
                parent_type.name(),
                field_def.name
            );
            warnings.push(DeprecationWarning {
                message: with_reason(message, deprecation),
                location: None,
                path: info.path.clone(),
                span: field.span,
            });
        }
        VisitFlow::Next
    }

    fn enter_argument(
        &mut self,
        warnings: &mut Vec<DeprecationWarning>,
        argument: &'a Argument<'a>,
        info: &VisitInfo<'a>,
    ) -> VisitFlow {
        let Some(argument_def) = info.types.argument() else {
            return VisitFlow::Skip;
        };
        // Directive arguments are reported against the field the directive is placed on
        if let (Some(deprecation), Some(field_def)) =
            (&argument_def.deprecation, info.types.field_def())
        {
            let message = format!(
                "The argument '{}' of '{}' is deprecated.",
                argument.name, field_def.name
            );
            warnings.push(DeprecationWarning {
                message: with_reason(message, deprecation),
                location: None,
                path: info.path.clone(),
                span: argument.span,
            });
        }
        let type_name = argument_def.input_type.named_type();
        self.scan_value(warnings, &argument.value, type_name, &info.path);
        VisitFlow::Next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParseSdl;
    use indoc::indoc;

    const SCHEMA: &str = indoc! {r#"
        type Query {
            user(id: ID, name: String @deprecated(reason: "use id"), legacy: Int @deprecated): User
            users(filter: UserFilter, roles: [Role!], sort: Role = NAME): [User]
        }
        type User {
            name: String
            oldEmail: String @deprecated
            nickname: String @deprecated(reason: "use newField")
            role(format: Role): Role
        }
        input UserFilter { role: Role, nested: UserFilter }
        enum Role { ADMIN GUEST @deprecated(reason: "use VISITOR") VISITOR LEGACY @deprecated NAME }
        directive @tag(role: Role, old: Int @deprecated(reason: "use role")) on FIELD | QUERY
    "#};

    fn scan(source: &str) -> Vec<(String, String)> {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        let document = Document::parse(&ctx, source).unwrap();
        scan_deprecations(&ctx, schema, document)
            .into_iter()
            .map(|warning| (warning.message, warning.path.to_string()))
            .collect()
    }

    #[test]
    fn deprecated_fields() {
        assert_eq!(
            scan("{ user { name oldEmail nickname } }"),
            vec![
                (
                    "The field 'User.oldEmail' is deprecated.".to_string(),
                    "0.selectionSet.0.selectionSet.1".to_string()
                ),
                (
                    "The field 'User.nickname' is deprecated. use newField".to_string(),
                    "0.selectionSet.0.selectionSet.2".to_string()
                ),
            ]
        );
    }

    #[test]
    fn deprecated_arguments() {
        assert_eq!(
            scan("{ user(id: 1, name: \"a\", legacy: 1) { name } }"),
            vec![
                (
                    "The argument 'name' of 'user' is deprecated. use id".to_string(),
                    "0.selectionSet.0.arguments.1".to_string()
                ),
                (
                    "The argument 'legacy' of 'user' is deprecated.".to_string(),
                    "0.selectionSet.0.arguments.2".to_string()
                ),
            ]
        );
    }

    #[test]
    fn deprecated_directive_arguments() {
        assert_eq!(
            scan("query @tag(old: 1) { user { name @tag(old: 2) } }"),
            vec![(
                "The argument 'old' of 'name' is deprecated. use role".to_string(),
                "0.selectionSet.0.selectionSet.0.directives.0.arguments.0".to_string()
            )]
        );
    }

    #[test]
    fn deprecated_enum_values() {
        let warnings = scan(indoc! {r#"
            query ($role: Role = LEGACY) {
                users(filter: { role: GUEST, nested: { role: LEGACY } }, roles: [ADMIN, GUEST]) {
                    role(format: VISITOR) @tag(role: LEGACY)
                }
            }
        "#});
        let messages: Vec<&str> = warnings.iter().map(|(message, _)| message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "The enum value 'Role.LEGACY' is deprecated.",
                "The enum value 'Role.GUEST' is deprecated. use VISITOR",
                "The enum value 'Role.LEGACY' is deprecated.",
                "The enum value 'Role.GUEST' is deprecated. use VISITOR",
                "The enum value 'Role.LEGACY' is deprecated.",
            ]
        );
        assert_eq!(warnings[0].1, "0.variableDefinitions.0");
        assert_eq!(warnings[1].1, "0.selectionSet.0.arguments.0");
        assert_eq!(
            warnings[4].1,
            "0.selectionSet.0.selectionSet.0.directives.0.arguments.0"
        );
    }

    #[test]
    fn usages_inside_fragments_in_document_order() {
        let warnings = scan(indoc! {r#"
            { user { ...F } }
            fragment F on User { oldEmail role(format: GUEST) }
        "#});
        assert_eq!(
            warnings,
            vec![
                (
                    "The field 'User.oldEmail' is deprecated.".to_string(),
                    "1.selectionSet.0".to_string()
                ),
                (
                    "The enum value 'Role.GUEST' is deprecated. use VISITOR".to_string(),
                    "1.selectionSet.1.arguments.0".to_string()
                ),
            ]
        );
    }

    #[test]
    fn unknown_elements_are_ignored() {
        let source = "{ missing(role: LEGACY) { oldEmail } user { role(other: LEGACY) } }";
        assert!(scan(source).is_empty());
    }
}
