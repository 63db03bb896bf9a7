use pmark_kernel::config::{load_config, load_plotmark_config};
use pmark_kernel::domain::config::NullDefaultPolicy;
use std::io::Write;

#[test]
fn loads_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[schema]\nnull_defaults = \"permit\"\nsignal_capacity = 16\n\n[logging]\nlevel = \"debug\"\njson = true"
    )
    .unwrap();

    let cfg = load_plotmark_config(Some(file.path())).unwrap();
    assert_eq!(cfg.schema.null_defaults, NullDefaultPolicy::Permit);
    assert_eq!(cfg.schema.signal_capacity, 16);
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
}

#[test]
fn loads_json_file_into_any_type() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{ "name": "demo", "port": 8080 }}"#).unwrap();

    #[derive(serde::Deserialize)]
    struct Small {
        name: String,
        port: u16,
    }

    let small: Small = load_config(Some(file.path())).unwrap();
    assert_eq!(small.name, "demo");
    assert_eq!(small.port, 8080);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = load_plotmark_config(Some(&missing)).unwrap_err();
    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
fn no_file_yields_defaults() {
    let cfg = load_plotmark_config(None::<&str>).unwrap();
    assert_eq!(cfg.schema.null_defaults, NullDefaultPolicy::Reject);
}
