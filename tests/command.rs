use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use superschema::SchemaError;
use superschema::command::{Cli, Command};
use superschema::settings::{OutputFormat, Settings};

fn schema_file(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(format!("{}.json", name));
    fs::write(&path, json).unwrap();
    path
}

const V1: &str = r#"{ "columns": [
    { "name": "a", "tag": 1, "type": { "varchar": { "max_len": 16383 } }, "pk": true },
    { "name": "b", "tag": 2, "type": { "varchar": { "max_len": 16383 } } }
] }"#;
const V2: &str = r#"{ "columns": [
    { "name": "a", "tag": 1, "type": { "varchar": { "max_len": 16383 } }, "pk": true },
    { "name": "b", "tag": 22, "type": { "varchar": { "max_len": 16383 } } }
] }"#;
const CONFLICT: &str = r#"{ "columns": [
    { "name": "collision", "tag": 2, "type": { "int": { "bits": 32 } } }
] }"#;

#[test]
fn parse_commands() {
    let cli = Cli::try_parse_from(["superschema", "generate", "x.json", "y.json"]).unwrap();
    assert_eq!(cli.config, None);
    assert_eq!(
        cli.command,
        Command::Generate { schemas: vec![PathBuf::from("x.json"), PathBuf::from("y.json")] }
    );

    let cli = Cli::try_parse_from([
        "superschema", "union", "--older", "a.json", "a2.json", "--newer", "b.json",
    ])
    .unwrap();
    assert_eq!(
        cli.command,
        Command::Union {
            older: vec![PathBuf::from("a.json"), PathBuf::from("a2.json")],
            newer: vec![PathBuf::from("b.json")],
        }
    );

    let cli = Cli::try_parse_from(["superschema", "history", "--config", "s.toml", "x.json"]).unwrap();
    assert_eq!(cli.config.as_deref(), Some("s.toml"));
    assert_eq!(cli.command, Command::History { schemas: vec![PathBuf::from("x.json")] });

    let bad_args: [&[&str]; 5] = [
        &["superschema"],
        &["superschema", "frobnicate"],
        &["superschema", "generate"],
        &["superschema", "history"],
        &["superschema", "union", "--older", "a.json"],
    ];
    for bad in bad_args {
        assert!(Cli::try_parse_from(bad).is_err(), "accepted {:?}", bad);
    }
}

#[test]
fn generate_prints_disambiguated_schema() {
    let dir = tempfile::tempdir().unwrap();
    let v1 = schema_file(dir.path(), "v1", V1);
    let v2 = schema_file(dir.path(), "v2", V2);
    let output = Command::Generate { schemas: vec![v1, v2] }
        .run(&Settings::default())
        .unwrap();
    assert!(output.contains("a varchar(16383) PRIMARY KEY (tag: 1)"));
    assert!(output.contains("b_2 varchar(16383) (tag: 2)"));
    assert!(output.contains("b_22 varchar(16383) (tag: 22)"));
}

#[test]
fn history_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let v1 = schema_file(dir.path(), "v1", V1);
    let settings = Settings {
        output: OutputFormat::Json,
        pretty: false,
        ..Settings::default()
    };
    let output = Command::History { schemas: vec![v1.clone(), v1] }
        .run(&settings)
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json[1]["names"], serde_json::json!(["b", "b"]));
}

#[test]
fn union_reports_tag_collisions() {
    let dir = tempfile::tempdir().unwrap();
    let v1 = schema_file(dir.path(), "v1", V1);
    let conflict = schema_file(dir.path(), "conflict", CONFLICT);
    let err = Command::Union { older: vec![v1], newer: vec![conflict] }
        .run(&Settings::default())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "tag collision for columns b and collision, different definitions (tag: 2)"
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Command::Generate { schemas: vec![dir.path().join("missing.json")] }
        .run(&Settings::default())
        .unwrap_err();
    assert!(matches!(err, SchemaError::Io(_)));
}

#[test]
fn settings_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "output = \"json\"\npretty = false\n").unwrap();
    let settings = Settings::load(path.to_str()).unwrap();
    assert_eq!(settings.output, OutputFormat::Json);
    assert!(!settings.pretty);
    assert_eq!(settings.log_level, "warn");
}
