use super::parser::ParseSdl;
use crate::{
    ast::ASTContext,
    error::ErrorType,
    schema::{
        DirectiveLocation, OutputType, Schema, SchemaFields, SchemaInterfaces,
        SchemaPossibleTypes, SchemaType, TypeRef,
    },
};
use indoc::indoc;

const DEFAULT_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

#[test]
fn empty_schema() {
    let ctx = ASTContext::new();
    let schema = Schema::parse(&ctx, "").unwrap();
    for scalar in DEFAULT_SCALARS {
        assert!(matches!(schema.get_type(scalar), Some(SchemaType::Scalar(_))));
    }
    assert!(schema.query_type().is_none());
    for directive in ["skip", "include", "deprecated", "specifiedBy"] {
        assert!(schema.get_directive(directive).is_some());
    }
}

#[test]
fn schema_definition() {
    let ctx = ASTContext::new();
    let source = indoc! {"
        schema {
            query: Root
            mutation: Change
        }

        type Root { a: String }
        type Change { b: String }
        type Query { c: String }
    "};
    let schema = Schema::parse(&ctx, source).unwrap();
    assert_eq!(schema.query_type().unwrap().name, "Root");
    assert_eq!(schema.mutation_type().unwrap().name, "Change");
    assert!(schema.subscription_type().is_none());
}

#[test]
fn default_root_type_names() {
    let ctx = ASTContext::new();
    let source = indoc! {"
        type Query { a: String }
        type Subscription { b: String }
    "};
    let schema = Schema::parse(&ctx, source).unwrap();
    assert_eq!(schema.query_type().unwrap().name, "Query");
    assert!(schema.mutation_type().is_none());
    assert_eq!(schema.subscription_type().unwrap().name, "Subscription");
}

#[test]
fn schema_definition_repeated() {
    let ctx = ASTContext::new();
    let source = indoc! {"
        schema { query: Query }
        schema { query: Query }
        type Query { a: String }
    "};
    let error = Schema::parse(&ctx, source).unwrap_err();
    assert_eq!(error.error_type(), ErrorType::Syntax);
    assert_eq!(
        error.message(),
        "Must not specify more than one Schema Definition."
    );
}

#[test]
fn schema_definition_non_object_type() {
    let ctx = ASTContext::new();
    let source = indoc! {"
        schema { query: Name }
        scalar Name
    "};
    let error = Schema::parse(&ctx, source).unwrap_err();
    assert_eq!(error.error_type(), ErrorType::Schema);
    assert_eq!(
        error.message(),
        "Validation error: Query root type `Name` must be an object type."
    );
}

#[test]
fn object_and_interface_types() {
    let ctx = ASTContext::new();
    let source = indoc! {r#"
        """
        Something with an id
        """
        interface Node { id: ID! }

        interface Named implements Node { id: ID! name: String }

        type User implements & Node & Named {
            "The identifier"
            id: ID!
            name: String
            friends(first: Int = 10, after: String): [User!]!
        }

        type Query { user: User node: Node }
    "#};
    let schema = Schema::parse(&ctx, source).unwrap();

    let user = schema.get_type("User").unwrap().object().unwrap();
    assert_eq!(user.get_interfaces().len(), 2);
    let friends = user.get_field("friends").unwrap();
    assert_eq!(friends.output_type.to_string(), "[User!]!");
    assert_eq!(friends.arguments.len(), 2);
    assert_eq!(
        *friends.get_argument("first").unwrap().input_type,
        TypeRef::Type("Int")
    );

    match schema.get_type("Node") {
        Some(SchemaType::Interface(node)) => {
            assert_eq!(node.get_possible_types().iter().copied().collect::<Vec<_>>(), vec!["User"]);
        }
        other => panic!("expected an interface, got {:?}", other),
    }
    match schema.get_type("Named") {
        Some(SchemaType::Interface(named)) => {
            assert!(named.get_field("name").is_some());
            assert_eq!(named.get_interfaces().len(), 1);
        }
        other => panic!("expected an interface, got {:?}", other),
    }
}

#[test]
fn unions_enums_scalars_and_inputs() {
    let ctx = ASTContext::new();
    let source = indoc! {"
        scalar Date @specifiedBy(url: \"https://example.com\")
        type Cat { name: String }
        type Dog { name: String }
        union Pet = | Cat | Dog
        enum Color { RED GREEN BLUE }
        input Filter { color: Color = RED, before: Date, tags: [String!] }
        type Query { pets(filter: Filter): [Pet] }
    "};
    let schema = Schema::parse(&ctx, source).unwrap();

    match schema.get_type("Pet") {
        Some(SchemaType::Union(pet)) => assert_eq!(pet.get_possible_types().len(), 2),
        other => panic!("expected a union, got {:?}", other),
    }
    match schema.get_type("Color") {
        Some(SchemaType::Enum(color)) => {
            assert_eq!(color.values.len(), 3);
            assert!(color.get_value("GREEN").is_some());
        }
        other => panic!("expected an enum, got {:?}", other),
    }
    match schema.get_type("Filter") {
        Some(SchemaType::InputObject(filter)) => assert_eq!(filter.fields.len(), 3),
        other => panic!("expected an input object, got {:?}", other),
    }
    assert!(matches!(schema.get_type("Date"), Some(SchemaType::Scalar(_))));
}

#[test]
fn deprecations() {
    let ctx = ASTContext::new();
    let source = indoc! {r#"
        enum Role { ADMIN GUEST @deprecated(reason: "use VISITOR") VISITOR }
        input Filter { old: String @deprecated }
        type User {
            email: String
            oldEmail: String @deprecated
            legacyId: ID @deprecated(reason: "use id")
            posts(sort: String @deprecated(reason: "unsorted"), first: Int): [String]
        }
        type Query { user: User }
    "#};
    let schema = Schema::parse(&ctx, source).unwrap();
    let user = schema.get_type("User").unwrap().object().unwrap();

    assert_eq!(user.get_field("email").unwrap().deprecation, None);
    let old_email = user.get_field("oldEmail").unwrap().deprecation.unwrap();
    assert_eq!(old_email.reason(), None);
    let legacy_id = user.get_field("legacyId").unwrap().deprecation.unwrap();
    assert_eq!(legacy_id.reason(), Some("use id"));

    let posts = user.get_field("posts").unwrap();
    assert_eq!(
        posts.get_argument("sort").unwrap().deprecation.unwrap().reason(),
        Some("unsorted")
    );
    assert!(posts.get_argument("first").unwrap().deprecation.is_none());

    match schema.get_type("Role") {
        Some(SchemaType::Enum(role)) => {
            let guest = role.get_value("GUEST").unwrap().deprecation.unwrap();
            assert_eq!(guest.reason(), Some("use VISITOR"));
            assert!(role.get_value("ADMIN").unwrap().deprecation.is_none());
        }
        other => panic!("expected an enum, got {:?}", other),
    }
    match schema.get_type("Filter") {
        Some(SchemaType::InputObject(filter)) => {
            assert!(filter.fields.get("old").unwrap().deprecation.is_some());
        }
        other => panic!("expected an input object, got {:?}", other),
    }
}

#[test]
fn directive_definitions() {
    let ctx = ASTContext::new();
    let source = indoc! {"
        directive @cached(ttl: Int!) repeatable on | FIELD | QUERY
        type Query { a: String }
    "};
    let schema = Schema::parse(&ctx, source).unwrap();
    let cached = schema.get_directive("cached").unwrap();
    assert!(cached.is_repeatable);
    assert!(cached.is_valid_location(DirectiveLocation::Field));
    assert!(cached.is_valid_location(DirectiveLocation::Query));
    assert!(!cached.is_valid_location(DirectiveLocation::Mutation));
    assert!(cached.get_argument("ttl").is_some());

    let skip = schema.get_directive("skip").unwrap();
    assert!(skip.is_valid_location(DirectiveLocation::InlineFragment));
}

#[test]
fn type_extensions() {
    let ctx = ASTContext::new();
    let source = indoc! {"
        extend type Query { extra: Int }
        type Query { a: String }
        interface Node { id: ID! }
        type User { name: String }
        extend type User implements Node { id: ID! }
        enum Color { RED }
        extend enum Color { GREEN }
    "};
    let schema = Schema::parse(&ctx, source).unwrap();

    let query = schema.query_type().unwrap();
    assert!(query.get_field("a").is_some());
    assert!(query.get_field("extra").is_some());

    let user = schema.get_type("User").unwrap().object().unwrap();
    assert!(user.get_field("id").is_some());
    assert_eq!(user.get_interfaces().len(), 1);

    match schema.get_type("Color") {
        Some(SchemaType::Enum(color)) => assert_eq!(color.values.len(), 2),
        other => panic!("expected an enum, got {:?}", other),
    }
}

#[test]
fn invalid_extensions() {
    let ctx = ASTContext::new();
    let error = Schema::parse(&ctx, "extend type Missing { a: String }").unwrap_err();
    assert_eq!(
        error.message(),
        "Validation error: Cannot extend type `Missing` because it is not defined."
    );

    let error = Schema::parse(
        &ctx,
        "type Query { a: String } extend type Query { a: Int }",
    )
    .unwrap_err();
    assert_eq!(
        error.message(),
        "Validation error: Field `Query.a` can only be defined once."
    );
}

#[test]
fn unknown_types_are_rejected() {
    let ctx = ASTContext::new();

    let error = Schema::parse(&ctx, "type Query { a: Missing }").unwrap_err();
    assert_eq!(error.error_type(), ErrorType::Schema);
    assert_eq!(
        error.message(),
        "Validation error: Field `Query.a` has an invalid type `Missing`."
    );

    let error = Schema::parse(
        &ctx,
        "input Filter { a: String } type Query { a: Filter }",
    )
    .unwrap_err();
    assert_eq!(
        error.message(),
        "Validation error: Field `Query.a` has an invalid type `Filter`."
    );

    let error = Schema::parse(
        &ctx,
        "type Query { a: String } type User implements Missing { a: String }",
    )
    .unwrap_err();
    assert_eq!(
        error.message(),
        "Validation error: Interface `Missing` on type `User` does not exist."
    );

    let error = Schema::parse(&ctx, "scalar Date union U = Date").unwrap_err();
    assert_eq!(
        error.message(),
        "Validation error: Type `Date` on union `U` is not a valid object type."
    );
}

#[test]
fn duplicate_types_are_rejected() {
    let ctx = ASTContext::new();
    let error =
        Schema::parse(&ctx, "type Query { a: String } type Query { b: String }").unwrap_err();
    assert_eq!(
        error.message(),
        "Validation error: Type `Query` is defined more than once."
    );
}

#[test]
fn syntax_errors_have_locations() {
    let ctx = ASTContext::new();
    let error = Schema::parse(&ctx, "type Query {\n  a String\n}").unwrap_err();
    assert_eq!(error.error_type(), ErrorType::Syntax);
    assert_eq!(error.location().unwrap().line, 2);

    assert!(Schema::parse(&ctx, "type Query { a: [String }").is_err());
    assert!(Schema::parse(&ctx, "directive @a on NOWHERE").is_err());
    assert!(Schema::parse(&ctx, "query { a }").is_err());
}

#[test]
fn output_types_resolve_fields() {
    let ctx = ASTContext::new();
    let schema = Schema::parse(
        &ctx,
        "interface Node { id: ID } type Query { node: Node }",
    )
    .unwrap();
    let node = schema
        .query_type()
        .unwrap()
        .get_field("node")
        .unwrap()
        .output_type
        .of_type(schema)
        .unwrap()
        .output_type()
        .unwrap();
    assert!(matches!(node, OutputType::Interface(_)));
    assert!(node.get_field("id").is_some());
}
