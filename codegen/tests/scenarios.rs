//! End-to-end pipeline tests over the public API

use tablesmith_codegen::registry::DialectGenerator;
use tablesmith_codegen::state::Marker;
use tablesmith_codegen::{
    GenState, GenerateOptions, create_models, generate, load_raw_schema, normalize_schema,
};

const BLOG_DOC: &str = r#"{
    "tables": [
        {
            "table_name": "users",
            "columns": [
                {"name": "id", "type": "serial", "nullable": false},
                {"name": "name", "type": "varchar"}
            ],
            "primary_key": ["id"]
        },
        {
            "table_name": "posts",
            "columns": [
                {"name": "id", "type": "serial", "nullable": false},
                {"name": "user_id", "type": "integer", "references": {"table": "users", "column": "id"}}
            ],
            "primary_key": ["id"]
        }
    ]
}"#;

fn opts() -> GenerateOptions {
    GenerateOptions::default()
}

#[test]
fn identical_inputs_produce_identical_output() {
    let raw = load_raw_schema(Some(BLOG_DOC), None).unwrap();
    for dialect in ["orm", "record", "validator", "sql", "openapi"] {
        let first = create_models(&raw, dialect, &opts()).unwrap().code;
        let second = create_models(&raw, dialect, &opts()).unwrap().code;
        assert_eq!(first, second, "dialect {dialect}");
    }
}

// Scenario A: relationship inference over users/posts
#[test]
fn relationship_pair_is_symmetric() {
    let raw = load_raw_schema(Some(BLOG_DOC), None).unwrap();
    let options = GenerateOptions {
        relationships: true,
        ..opts()
    };
    let code = create_models(&raw, "orm", &options).unwrap().code;

    // Child side: singular reference named after the stripped FK column
    assert!(code.contains("#[many_to_one(model = \"Users\", back_populates = \"posts\")]"));
    assert!(code.contains("    pub user: ManyToOne<Users>,"));

    // Parent side: collection named after the child table
    assert!(code.contains("#[one_to_many(model = \"Posts\", back_populates = \"user\")]"));
    assert!(code.contains("    pub posts: OneToMany<Posts>,"));

    assert!(code.contains("use tablesmith::relation::{ManyToOne, OneToMany};"));
}

#[test]
fn relationships_off_by_default() {
    let raw = load_raw_schema(Some(BLOG_DOC), None).unwrap();
    let code = create_models(&raw, "orm", &opts()).unwrap().code;
    assert!(!code.contains("many_to_one"));
    assert!(!code.contains("relation::"));
}

// Scenario B: enum values emit lexicographically sorted
#[test]
fn enum_values_are_sorted() {
    let doc = r#"{
        "types": [{
            "type_name": "material_type",
            "base_type": "ENUM",
            "properties": {"values": ["'b'", "'a'"]}
        }]
    }"#;
    let raw = load_raw_schema(Some(doc), None).unwrap();
    let code = create_models(&raw, "orm", &opts()).unwrap().code;
    let a = code.find("#[value(\"a\")]").expect("member a");
    let b = code.find("#[value(\"b\")]").expect("member b");
    assert!(a < b, "a must emit before b:\n{code}");
}

// Scenario C: repeated array columns record the marker exactly once
#[test]
fn array_marker_recorded_once_per_run() {
    let doc = r#"{
        "tables": [{
            "table_name": "metrics",
            "columns": [
                {"name": "a", "type": "integer[]"},
                {"name": "b", "type": "integer[]"},
                {"name": "c", "type": "integer[]"},
                {"name": "d", "type": "integer[]"},
                {"name": "e", "type": "integer[]"}
            ],
            "primary_key": []
        }]
    }"#;
    let raw = load_raw_schema(Some(doc), None).unwrap();
    let schema = normalize_schema(&raw).unwrap();

    let generator = tablesmith_codegen::generators::OrmGenerator;
    let mut state = GenState::new();
    let body = generator.generate_model(&schema.tables[0], &mut state, &[], &opts());

    assert_eq!(body.matches("array(integer())").count(), 5);
    assert_eq!(
        state.markers().filter(|m| *m == Marker::Array).count(),
        1,
        "array marker must be recorded exactly once"
    );
}

// Scenario D: current-time defaults resolve to the dialect's now expression
#[test]
fn now_default_never_quoted() {
    for spelling in ["NOW()", "now()", "Now()", "CURRENT_TIMESTAMP"] {
        let doc = format!(
            r#"{{
                "tables": [{{
                    "table_name": "events",
                    "columns": [
                        {{"name": "id", "type": "serial", "nullable": false}},
                        {{"name": "created_at", "type": "timestamp", "default": "{spelling}"}}
                    ],
                    "primary_key": ["id"]
                }}]
            }}"#
        );
        let raw = load_raw_schema(Some(&doc), None).unwrap();

        let orm = create_models(&raw, "orm", &opts()).unwrap().code;
        assert!(orm.contains("default_fn = now"), "{spelling}: {orm}");
        assert!(!orm.contains(&format!("\"{spelling}\"")), "{spelling}");

        let sql = create_models(&raw, "sql", &opts()).unwrap().code;
        assert!(sql.contains("DEFAULT now()"), "{spelling}: {sql}");
        assert!(!sql.contains(&format!("'{spelling}'")), "{spelling}");
    }
}

// Scenario E: a dirty generator state must not leak into an unrelated run
#[test]
fn fresh_instances_are_isolated() {
    let uuid_doc = r#"{
        "tables": [{
            "table_name": "tokens",
            "columns": [{"name": "id", "type": "uuid", "nullable": false}],
            "primary_key": ["id"]
        }]
    }"#;
    let plain_doc = r#"{
        "tables": [{
            "table_name": "notes",
            "columns": [{"name": "body", "type": "text"}],
            "primary_key": []
        }]
    }"#;

    let uuid_raw = load_raw_schema(Some(uuid_doc), None).unwrap();
    let plain_raw = load_raw_schema(Some(plain_doc), None).unwrap();

    let first = create_models(&uuid_raw, "orm", &opts()).unwrap().code;
    assert!(first.contains("use uuid::Uuid;"));

    // The second, unrelated run gets a fresh generator and state: no
    // markers from the first run may survive.
    let second = create_models(&plain_raw, "orm", &opts()).unwrap().code;
    assert!(!second.contains("use uuid::Uuid;"));
    assert!(!second.contains("Uuid"));
}

#[test]
fn primary_key_never_emits_not_null() {
    let doc = r#"{
        "tables": [{
            "table_name": "users",
            "columns": [
                {"name": "id", "type": "integer", "nullable": false},
                {"name": "email", "type": "varchar", "nullable": false}
            ],
            "primary_key": ["id"]
        }]
    }"#;
    let raw = load_raw_schema(Some(doc), None).unwrap();

    let orm = create_models(&raw, "orm", &opts()).unwrap().code;
    assert!(orm.contains("#[column(integer(), primary)]"));
    assert!(orm.contains("#[column(varchar(), not_null)]"));

    let sql = create_models(&raw, "sql", &opts()).unwrap().code;
    assert!(sql.contains("\"id\" integer PRIMARY KEY"));
    assert!(!sql.contains("\"id\" integer NOT NULL"));
    assert!(sql.contains("\"email\" varchar NOT NULL"));
}

#[test]
fn unknown_type_still_generates() {
    let doc = r#"{
        "tables": [{
            "table_name": "shapes",
            "columns": [
                {"name": "id", "type": "serial", "nullable": false},
                {"name": "area", "type": "geometry"}
            ],
            "primary_key": ["id"]
        }]
    }"#;
    let raw = load_raw_schema(Some(doc), None).unwrap();
    for dialect in ["orm", "record", "validator", "sql", "openapi"] {
        let output = create_models(&raw, dialect, &opts()).unwrap();
        assert!(!output.code.is_empty(), "dialect {dialect}");
    }
    let sql = create_models(&raw, "sql", &opts()).unwrap().code;
    assert!(sql.contains("\"area\" geometry"));
}

#[test]
fn enum_only_schema_generates() {
    let doc = r#"{
        "types": [{
            "type_name": "mood",
            "base_type": "ENUM",
            "properties": {"values": ["'sad'", "'happy'"]}
        }]
    }"#;
    let raw = load_raw_schema(Some(doc), None).unwrap();
    let sql = create_models(&raw, "sql", &opts()).unwrap().code;
    assert!(sql.contains("CREATE TYPE mood AS ENUM ('happy', 'sad');"));
}

#[test]
fn enum_typed_column_resolves_to_class() {
    let doc = r#"{
        "types": [{
            "type_name": "material_type",
            "base_type": "ENUM",
            "properties": {"values": ["'article'", "'video'"]}
        }],
        "tables": [{
            "table_name": "materials",
            "columns": [
                {"name": "id", "type": "serial", "nullable": false},
                {"name": "kind", "type": "material_type", "nullable": false}
            ],
            "primary_key": ["id"]
        }]
    }"#;
    let raw = load_raw_schema(Some(doc), None).unwrap();

    let orm = create_models(&raw, "orm", &opts()).unwrap().code;
    assert!(orm.contains("#[column(enum(MaterialType), not_null)]"));
    assert!(orm.contains("    pub kind: MaterialType,"));

    let sql = create_models(&raw, "sql", &opts()).unwrap().code;
    assert!(sql.contains("\"kind\" material_type NOT NULL"));
}

#[test]
fn naming_options_apply() {
    let raw = load_raw_schema(Some(BLOG_DOC), None).unwrap();
    let options = GenerateOptions {
        singular: true,
        table_prefix: "Db".into(),
        table_suffix: "Model".into(),
        ..opts()
    };
    let code = create_models(&raw, "orm", &options).unwrap().code;
    assert!(code.contains("pub struct DbUserModel {"));
    assert!(code.contains("pub struct DbPostModel {"));
}

#[test]
fn generate_accepts_normalized_schema() {
    let raw = load_raw_schema(Some(BLOG_DOC), None).unwrap();
    let schema = normalize_schema(&raw).unwrap();
    let code = generate(&schema, "sql", &opts()).unwrap();
    assert!(code.contains("CREATE TABLE \"users\""));
    assert!(code.contains("CREATE TABLE \"posts\""));
    assert!(code.contains("REFERENCES \"users\" (\"id\")"));
}
