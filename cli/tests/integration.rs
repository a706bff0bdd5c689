//! End-to-end CLI tests

use assert_cmd::Command;
use predicates::prelude::*;

const USERS_DOC: &str = r#"{
    "tables": [{
        "table_name": "users",
        "columns": [
            {"name": "id", "type": "serial", "nullable": false},
            {"name": "email", "type": "varchar", "size": 160, "nullable": false, "unique": true}
        ],
        "primary_key": ["id"]
    }]
}"#;

fn tablesmith() -> Command {
    Command::cargo_bin("tablesmith").unwrap()
}

#[test]
fn generate_to_stdout() {
    tablesmith()
        .args(["generate", "--schema-json", USERS_DOC, "--dialect", "orm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pub struct Users"))
        .stdout(predicate::str::contains("use tablesmith::prelude::*;"));
}

#[test]
fn generate_sql_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("schema.json");
    let out_path = dir.path().join("schema.sql");
    std::fs::write(&schema_path, USERS_DOC).unwrap();

    tablesmith()
        .args(["generate", "--dialect", "sql"])
        .arg("--schema")
        .arg(&schema_path)
        .arg("--out")
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"));

    let sql = std::fs::read_to_string(&out_path).unwrap();
    assert!(sql.contains("CREATE TABLE \"users\""));
    assert!(sql.contains("\"email\" varchar(160) NOT NULL UNIQUE"));
}

#[test]
fn missing_input_fails() {
    tablesmith()
        .arg("generate")
        .current_dir(tempfile::tempdir().unwrap().path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn empty_schema_fails_without_exit_silent() {
    tablesmith()
        .args(["generate", "--schema-json", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no tables or enum types"));
}

#[test]
fn empty_schema_is_silent_with_flag() {
    tablesmith()
        .args(["generate", "--schema-json", "{}", "--exit-silent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to generate."));
}

#[test]
fn dialects_lists_builtins() {
    tablesmith()
        .arg("dialects")
        .assert()
        .success()
        .stdout(predicate::str::contains("orm"))
        .stdout(predicate::str::contains("openapi"));
}

#[test]
fn init_writes_config() {
    let dir = tempfile::tempdir().unwrap();
    tablesmith()
        .args(["init", "--dialect", "sql"])
        .current_dir(dir.path())
        .assert()
        .success();

    let config = std::fs::read_to_string(dir.path().join("tablesmith.toml")).unwrap();
    assert!(config.contains("dialect = \"sql\""));

    // Re-running refuses to overwrite
    tablesmith()
        .args(["init"])
        .current_dir(dir.path())
        .assert()
        .failure();
}

#[test]
fn config_file_supplies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("schema.json"), USERS_DOC).unwrap();
    std::fs::write(
        dir.path().join("tablesmith.toml"),
        "dialect = \"sql\"\nschema = \"./schema.json\"\n",
    )
    .unwrap();

    tablesmith()
        .arg("generate")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE TABLE \"users\""));
}
