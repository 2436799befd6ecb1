//! Loading list defaults from disk.

use std::fs;

use insta::assert_yaml_snapshot;
use ledgerly::{ConfigError, ExportFormat, ListDefaults};

#[test]
fn loads_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lists.yaml");
    fs::write(
        &path,
        "page_size: 25\nwindow_size: 7\nexport_format: json\nsearch_fields:\n  - name\n  - email\n",
    )
    .unwrap();

    let defaults = ListDefaults::from_path(&path).unwrap();
    assert_eq!(
        defaults,
        ListDefaults {
            page_size: 25,
            window_size: 7,
            export_format: ExportFormat::Json,
            search_fields: vec!["name".into(), "email".into()],
        }
    );
}

#[test]
fn loads_json_file_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lists.JSON");
    fs::write(&path, r#"{"page_size": 50}"#).unwrap();

    let defaults = ListDefaults::from_path(&path).unwrap();
    assert_eq!(defaults.page_size, 50);
    assert_eq!(defaults.export_format, ExportFormat::Csv);
    assert_yaml_snapshot!(defaults, @r"
    page_size: 50
    window_size: 5
    export_format: csv
    search_fields: []
    ");
}

#[test]
fn parse_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yml");
    fs::write(&path, "page_size: [oops").unwrap();

    match ListDefaults::from_path(&path) {
        Err(ConfigError::Parse { path: Some(p), .. }) => assert_eq!(p, path),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn validation_errors_pass_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zero.yaml");
    fs::write(&path, "page_size: 0\n").unwrap();

    assert!(matches!(
        ListDefaults::from_path(&path),
        Err(ConfigError::Invalid {
            field: "page_size",
            ..
        })
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ListDefaults::from_path(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().starts_with("failed to read "));
}
