use graphql_validate::check::{
    document_depth, find_duplicate_fragments, Depth, ErrorKind, FragmentGraph,
};
use graphql_validate::engine::InvalidDocument;
use graphql_validate::{ast::*, schema::*, validate, DocumentSource, Report, ValidateOptions};
use indoc::indoc;

const SCHEMA: &str = indoc! {r#"
    type Query {
        user(id: ID): User
        a: A
    }

    type User {
        id: ID!
        email: String
        oldEmail: String @deprecated
        handle: String @deprecated(reason: "use newField")
        friends: [User]
    }

    type A { b: B }
    type B { c: String }
"#};

fn run(sources: &[(&str, &str)], options: ValidateOptions) -> Report {
    let ctx = ASTContext::new();
    let schema = Schema::parse(&ctx, SCHEMA).unwrap();
    let sources: Vec<DocumentSource> = sources
        .iter()
        .map(|(origin, text)| DocumentSource::new(*origin, *text))
        .collect();
    validate(&ctx, schema, &sources, options).unwrap()
}

fn messages(document: &InvalidDocument) -> Vec<&str> {
    document
        .errors
        .iter()
        .map(|error| error.message.as_str())
        .collect()
}

#[test]
fn fragment_only_sources_are_never_validated_alone() {
    let report = run(
        &[("fragments.graphql", "fragment Broken on User { doesNotExist }")],
        ValidateOptions::default().with_max_depth(1),
    );
    assert!(report.documents.is_empty());
}

#[test]
fn cyclic_fragments_resolve_once_each() {
    let ctx = ASTContext::new();
    let document = Document::parse(
        &ctx,
        indoc! {"
            fragment A on User { ...B }
            fragment B on User { ...C }
            fragment C on User { ...D }
            fragment D on User { ...A ...B }
        "},
    )
    .unwrap();
    let graph = FragmentGraph::from_document(&ctx, document);
    for root in ["A", "B", "C", "D"] {
        let closure = graph.resolve_closure(&[root]);
        let mut names: Vec<&str> = closure.fragments.iter().map(|node| node.name()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }
}

#[test]
fn cyclic_fragments_are_reported_not_hung() {
    let report = run(
        &[(
            "cycle.graphql",
            "{ user(id: 1) { ...A } } fragment A on User { friends { ...A } }",
        )],
        ValidateOptions::default().with_max_depth(10),
    );
    assert_eq!(
        messages(&report.documents[0]),
        vec!["Cannot spread fragment \"A\" within itself."]
    );
}

#[test]
fn depth_limit_is_exclusive() {
    let query = "{ a { b { c } } }";
    assert!(run(&[("q.graphql", query)], ValidateOptions::default().with_max_depth(3))
        .documents
        .is_empty());

    let report = run(&[("q.graphql", query)], ValidateOptions::default().with_max_depth(2));
    assert_eq!(report.documents.len(), 1);
    let errors = &report.documents[0].errors;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::DepthExceeded);
    assert_eq!(errors[0].message, "Query exceeds maximum depth of 2");
    assert_eq!(
        errors[0].path.as_ref().unwrap().to_string(),
        "0.selectionSet.0.selectionSet.0.selectionSet.0"
    );
    assert_eq!(errors[0].location.unwrap().to_string(), "1:11");
}

#[test]
fn introspection_never_adds_depth() {
    let ctx = ASTContext::new();
    let document = Document::parse(
        &ctx,
        "{ __schema { types { name } } a { __typename b { __type(name: \"B\") { fields { name } } } } }",
    )
    .unwrap();
    let graph = FragmentGraph::from_document(&ctx, document);
    assert_eq!(document_depth(document, Some(2), &graph), Depth::Within(2));
}

#[test]
fn duplicate_names_count_every_repeat() {
    let duplicates = find_duplicate_fragments(["A", "B", "A", "A"]);
    assert_eq!(duplicates.len(), 2);
}

#[test]
fn deprecated_field_messages() {
    let report = run(
        &[("user.graphql", "{ user { oldEmail handle } }")],
        ValidateOptions::default(),
    );
    let warnings: Vec<&str> = report.documents[0]
        .deprecated
        .iter()
        .map(|warning| warning.message.as_str())
        .collect();
    assert_eq!(
        warnings,
        vec![
            "The field 'User.oldEmail' is deprecated.",
            "The field 'User.handle' is deprecated. use newField",
        ]
    );
}

#[test]
fn deprecated_usage_is_only_a_warning() {
    let report = run(
        &[("user.graphql", "{ user { oldEmail } }")],
        ValidateOptions::default(),
    );
    assert_eq!(report.documents.len(), 1);
    assert!(report.documents[0].errors.is_empty());
    assert_eq!(report.documents[0].deprecated.len(), 1);
    assert_eq!(
        report.documents[0].deprecated[0].message,
        "The field 'User.oldEmail' is deprecated."
    );
    assert_eq!(report.error_count(), 0);
    assert!(report.status());

    let strict = report.fail_on_deprecated();
    assert_eq!(strict.error_count(), 1);
    assert!(!strict.status());
}

#[test]
fn deprecated_argument_without_reason() {
    let ctx = ASTContext::new();
    let sdl = "type Query { user(legacy: Int @deprecated): String }";
    let schema = Schema::parse(&ctx, sdl).unwrap();
    let sources = vec![DocumentSource::new("legacy.graphql", "{ user(legacy: 1) }")];
    let report = validate(&ctx, schema, &sources, ValidateOptions::default()).unwrap();
    assert_eq!(report.documents.len(), 1);
    let warnings = &report.documents[0].deprecated;
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "The argument 'legacy' of 'user' is deprecated.");
    assert_eq!(warnings[0].location.unwrap().to_string(), "1:8");
}

#[test]
fn duplicate_fragment_is_reported_once() {
    let report = run(
        &[
            ("a.graphql", "query A { user(id: 1) { ...F } }"),
            ("b.graphql", "fragment F on User { id }"),
            ("c.graphql", "query C { user(id: 2) { oldEmail } }"),
            ("d.graphql", "fragment F on User { email }"),
        ],
        ValidateOptions::default(),
    );
    let duplicates: Vec<(&str, &str)> = report
        .documents
        .iter()
        .flat_map(|document| {
            document
                .errors
                .iter()
                .filter(|error| error.kind == ErrorKind::DuplicateFragment)
                .map(move |error| (document.origin.as_str(), error.message.as_str()))
        })
        .collect();
    assert_eq!(
        duplicates,
        vec![("d.graphql", "Name of 'F' fragment is not unique")]
    );

    let origins: Vec<&str> = report
        .documents
        .iter()
        .map(|document| document.origin.as_str())
        .collect();
    assert_eq!(origins, vec!["c.graphql", "d.graphql"]);
}

#[test]
fn findings_accumulate_per_document() {
    let report = run(
        &[(
            "all.graphql",
            indoc! {"
                query All($unused: ID) {
                    user(id: 1) { oldEmail friends { friends { id } } ...Missing }
                }
            "},
        )],
        ValidateOptions::default().with_max_depth(2),
    );
    assert_eq!(report.documents.len(), 1);
    let document = &report.documents[0];
    let kinds: Vec<ErrorKind> = document.errors.iter().map(|error| error.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ErrorKind::SchemaViolation,
            ErrorKind::UnknownFragment,
            ErrorKind::DepthExceeded,
        ]
    );
    assert_eq!(
        messages(document)[0],
        "Variable \"$unused\" is never used in operation \"All\"."
    );
    assert_eq!(document.deprecated.len(), 1);
}

#[cfg(feature = "json")]
#[test]
fn json_report() {
    let report = run(
        &[("q.graphql", "{ a { b { c } } }")],
        ValidateOptions::default().with_max_depth(1),
    );
    let output = report.output(&[] as &[&str]).to_json().unwrap();
    assert_eq!(
        output,
        serde_json::json!({
            "status": false,
            "documents": [{
                "origin": "q.graphql",
                "errors": [{
                    "kind": "DepthExceeded",
                    "message": "Query exceeds maximum depth of 1",
                    "location": { "line": 1, "column": 7 },
                    "path": "0.selectionSet.0.selectionSet.0"
                }],
                "deprecated": []
            }]
        })
    );
}
