use parking_lot::Mutex;
use pmark_annotations::{Catalog, HTML_LABEL_SET_DEPRECATION, html_label_set, models};
use pmark_domain::deprecation::{Deprecated, Version};
use pmark_schema::{Schema, SchemaError, Value};
use std::sync::Arc;

fn catalog_with_notices() -> (Catalog, Arc<Mutex<Vec<Deprecated>>>) {
    let catalog = Catalog::install(Schema::default()).unwrap();
    let notices = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&notices);
    catalog
        .schema()
        .hub()
        .connect::<Deprecated>(move |notice| sink.lock().push(notice.clone()))
        .unwrap();
    (catalog, notices)
}

#[test]
fn y_offset_is_negated_and_one_notice_is_emitted() {
    let (catalog, notices) = catalog_with_notices();
    let set = html_label_set(catalog.schema(), [("y_offset", Value::Int(10))]).unwrap();

    assert_eq!(set.glyph().get("y_offset").unwrap(), &Value::Float(-10.0));
    assert_eq!(set.glyph().model_name(), models::HTML_TEXT);

    let notices = notices.lock();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].since, Version::new(3, 7, 0));
    assert_eq!(notices[0].old, "annotations.HTMLLabelSet");
    assert_eq!(notices[0].replacement, "glyphs.HTMLText or figure.html_text()");
    assert_eq!(notices[0], HTML_LABEL_SET_DEPRECATION);
}

#[test]
fn legacy_path_matches_direct_construction() {
    let (catalog, _) = catalog_with_notices();
    let kwargs = [
        ("x", Value::from("px")),
        ("y_offset", Value::Float(4.5)),
        ("text_color", Value::from("red")),
        ("level", Value::from("overlay")),
        ("name", Value::from("labels")),
    ];
    let legacy = catalog.html_label_set(kwargs.clone()).unwrap();

    let mut direct_kwargs = kwargs.to_vec();
    direct_kwargs[1].1 = Value::Float(-4.5);
    let direct = catalog.build_glyph_renderer(models::HTML_TEXT, direct_kwargs).unwrap();

    assert_eq!(legacy.snapshot().unwrap(), direct.snapshot().unwrap());
}

#[test]
fn renderer_keywords_are_routed_to_the_renderer() {
    let (catalog, _) = catalog_with_notices();
    let set = catalog
        .build_glyph_renderer(
            models::HTML_TEXT,
            [("visible", Value::Bool(false)), ("x_range_name", Value::from("right"))],
        )
        .unwrap();

    assert_eq!(set.renderer().get("visible").unwrap(), &Value::Bool(false));
    assert_eq!(set.renderer().get("x_range_name").unwrap(), &Value::from("right"));
    assert_eq!(set.renderer().get("level").unwrap(), &Value::from("glyph"));
    assert!(set.glyph().get("visible").is_err());
    assert_eq!(set.glyph().get("x").unwrap(), &Value::from("x"));
}

#[test]
fn unknown_keywords_are_rejected() {
    let (catalog, notices) = catalog_with_notices();
    let err = html_label_set(catalog.schema(), [("source", Value::from("data"))]).unwrap_err();
    assert!(matches!(
        err.schema_error(),
        Some(SchemaError::UnknownAttribute { name, .. }) if name == "source"
    ));
    assert_eq!(notices.lock().len(), 1);
}

#[test]
fn snapshot_serializes_both_halves() {
    let (catalog, _) = catalog_with_notices();
    let set = html_label_set(catalog.schema(), Vec::<(String, Value)>::new()).unwrap();
    let json = serde_json::to_value(set.snapshot().unwrap()).unwrap();
    assert_eq!(json["renderer"]["model"], "GlyphRenderer");
    assert_eq!(json["glyph"]["model"], "HTMLText");
}
