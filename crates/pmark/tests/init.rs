use pmark::domain::config::{NullDefaultPolicy, PlotmarkConfig};
use pmark::schema::{SchemaError, Value};

#[test]
fn init_installs_the_catalog_with_configured_policy() {
    let mut config = PlotmarkConfig::default();
    config.schema.null_defaults = NullDefaultPolicy::Permit;

    let catalog = pmark::init(&config).unwrap();
    assert_eq!(catalog.schema().config().null_defaults, NullDefaultPolicy::Permit);

    let label = catalog
        .construct(pmark::annotations::models::HTML_LABEL, [("x", Value::Int(0)), ("y", Value::Int(0))])
        .unwrap();
    assert_eq!(label.get("border_line_color").unwrap(), &Value::Null);
}

#[test]
fn invalid_signal_capacity_is_reported() {
    let mut config = PlotmarkConfig::default();
    config.schema.signal_capacity = 0;
    let err = pmark::init(&config).unwrap_err();
    assert!(matches!(err.schema_error(), Some(SchemaError::Signal { .. })));
}
