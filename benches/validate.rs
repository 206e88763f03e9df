#[macro_use]
extern crate bencher;

use bencher::Bencher;

fn graphql_ast_parse(bench: &mut Bencher) {
    use graphql_validate::ast::*;
    bench.iter(|| {
        let ctx = ASTContext::new();
        Document::parse(&ctx, QUERY).ok();
    });
}

fn graphql_schema_parse(bench: &mut Bencher) {
    use graphql_validate::ast::*;
    use graphql_validate::schema::*;
    bench.iter(|| {
        let ctx = ASTContext::new();
        Schema::parse(&ctx, SCHEMA).ok();
    });
}

fn graphql_standard_rules(bench: &mut Bencher) {
    use graphql_validate::ast::*;
    use graphql_validate::schema::*;
    use graphql_validate::validate::*;
    let ctx = ASTContext::new();
    let schema = Schema::parse(&ctx, SCHEMA).unwrap();
    let document = Document::parse(&ctx, QUERY).unwrap();
    bench.iter(|| StandardRules.validate(&ctx, schema, document));
}

fn graphql_depth_and_deprecations(bench: &mut Bencher) {
    use graphql_validate::ast::*;
    use graphql_validate::check::*;
    use graphql_validate::schema::*;
    let ctx = ASTContext::new();
    let schema = Schema::parse(&ctx, SCHEMA).unwrap();
    let document = Document::parse(&ctx, QUERY).unwrap();
    let graph = FragmentGraph::from_document(&ctx, document);
    bench.iter(|| {
        document_depth(document, Some(10), &graph);
        scan_deprecations(&ctx, schema, document)
    });
}

fn graphql_validate_sources(bench: &mut Bencher) {
    use graphql_validate::ast::*;
    use graphql_validate::schema::*;
    use graphql_validate::*;
    let sources = vec![
        DocumentSource::new("query.graphql", QUERY),
        DocumentSource::new("fragments.graphql", FRAGMENTS),
    ];
    bench.iter(|| {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        validate(&ctx, schema, &sources, ValidateOptions::default().with_max_depth(10)).unwrap()
    });
}

benchmark_group!(
    checks,
    graphql_ast_parse,
    graphql_schema_parse,
    graphql_standard_rules,
    graphql_depth_and_deprecations,
    graphql_validate_sources
);

benchmark_main!(checks);

static SCHEMA: &str = r#"
type Query {
  user(id: ID!): User
  feed(first: Int = 10, order: Order = NEWEST): [Post!]!
}

type User {
  id: ID!
  name: String
  avatar(size: Int, format: String @deprecated(reason: "use size")): String
  email: String @deprecated(reason: "use contact")
  contact: Contact
  posts(first: Int): [Post!]!
}

type Contact { email: String phone: String }

type Post {
  id: ID!
  title: String!
  author: User!
  comments(order: Order): [Comment!]!
}

type Comment { id: ID! body: String author: User }

enum Order { NEWEST OLDEST POPULAR @deprecated }
"#;

static QUERY: &str = r#"
query Feed($first: Int = 20, $order: Order = POPULAR) {
  feed(first: $first, order: $order) {
    id
    title
    author { ...UserFields }
    comments(order: NEWEST) {
      id
      body
      author { ...UserFields posts(first: 2) { id comments { id author { id } } } }
    }
  }
}

query Profile($id: ID!) {
  user(id: $id) {
    ...UserFields
    contact { email phone }
    posts(first: 5) { ... on Post { title __typename } }
  }
}

fragment UserFields on User {
  id
  name
  email
  avatar(size: 64, format: "png")
}
"#;

static FRAGMENTS: &str = r#"
fragment PostFields on Post {
  id
  title
  author { id }
}
"#;
