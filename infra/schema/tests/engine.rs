use pmark_domain::config::{NullDefaultPolicy, SchemaConfig};
use pmark_domain::enums::AngleUnits;
use pmark_domain::flags::DescriptorFlags;
use pmark_schema::prelude::*;
use pmark_schema::{DefaultValue, Origin, PropertyChanged};
use std::f64::consts::PI;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn align() -> EnumDomain {
    EnumDomain::new("Align", ["left", "center", "right"])
}

fn scenario_t() -> (Schema, Arc<Model>) {
    let schema = Schema::default();
    schema
        .define_group(
            PropertyGroup::builder("text")
                .scalar("color", PropertyKind::Color, "#444444", "The text color.")
                .build()
                .unwrap(),
        )
        .unwrap();
    let model = schema
        .register(
            ModelBuilder::new("T")
                .required("x", PropertyKind::float(), "")
                .enumeration("align", align(), "left", "")
                .include("text", "", ""),
        )
        .unwrap();
    (schema, model)
}

fn no_values() -> Vec<(&'static str, Value)> {
    Vec::new()
}

#[test]
fn scenario_t_constructs_with_defaults() {
    let (_schema, model) = scenario_t();
    let t = model.construct([("x", 5)]).unwrap();

    assert_eq!(t.get("x").unwrap(), &Value::Float(5.0));
    assert_eq!(t.get("align").unwrap(), &Value::from("left"));
    assert_eq!(t.get("color").unwrap().to_string(), "#444444");

    let names: Vec<_> = t.properties().unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["x", "align", "color"]);
}

#[test]
fn scenario_t_reports_missing_required() {
    let (_schema, model) = scenario_t();
    let err = model.construct(no_values()).unwrap_err();
    assert!(matches!(err, SchemaError::MissingRequiredAttribute { ref name, .. } if name == "x"));
}

#[test]
fn scenario_t_rejects_non_member() {
    let (_schema, model) = scenario_t();
    let err = model.construct([("x", Value::Int(5)), ("align", Value::from("up"))]).unwrap_err();
    match err {
        SchemaError::Validation { name, value, expected, .. } => {
            assert_eq!(name, "align");
            assert_eq!(value, Value::from("up"));
            assert!(expected.contains("left|center|right"), "{expected}");
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_names_are_reported_before_missing_required() {
    let (_schema, model) = scenario_t();
    let err = model.construct([("colour", "red")]).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownAttribute { ref name, .. } if name == "colour"));
}

#[test]
fn duplicate_declaration_fails() {
    let schema = Schema::default();
    let err = schema
        .register(
            ModelBuilder::new("Dup")
                .scalar("a", PropertyKind::Bool, true, "")
                .scalar("a", PropertyKind::Bool, false, ""),
        )
        .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateAttribute { ref name, .. } if name == "a"));
}

#[test]
fn inherited_names_cannot_be_redeclared() {
    let schema = Schema::default();
    schema.register(ModelBuilder::new("Base").scalar("a", PropertyKind::Bool, true, "")).unwrap();
    let err = schema
        .register(ModelBuilder::new("Child").extends("Base").scalar("a", PropertyKind::Bool, true, ""))
        .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateAttribute { .. }));
}

#[test]
fn include_collision_fails() {
    let (schema, _) = scenario_t();
    let err = schema
        .register(
            ModelBuilder::new("Clash")
                .scalar("color", PropertyKind::String, "", "")
                .include("text", "", ""),
        )
        .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateAttribute { ref name, .. } if name == "color"));
}

#[test]
fn enum_default_must_be_a_member() {
    let schema = Schema::default();
    let err = schema
        .register(ModelBuilder::new("Bad").enumeration("align", align(), "up", ""))
        .unwrap_err();
    assert!(matches!(err, SchemaError::InvalidDefault { ref name, .. } if name == "align"));
}

#[test]
fn unknown_group_fails() {
    let schema = Schema::default();
    let err = schema.register(ModelBuilder::new("M").include("nope", "", "")).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownGroup { ref name } if name == "nope"));
}

#[test]
fn group_names_are_unique() {
    let schema = Schema::default();
    let group = PropertyGroup::builder("g").build().unwrap();
    schema.define_group(group.clone()).unwrap();
    assert!(matches!(schema.define_group(group), Err(SchemaError::DuplicateGroup { .. })));
}

#[test]
fn double_include_gives_independent_sets() {
    let (schema, _) = scenario_t();
    let model = schema
        .register(
            ModelBuilder::new("Two")
                .include("text", "major", "The {prop} of major labels.")
                .include("text", "minor", ""),
        )
        .unwrap();

    let major = model.descriptor("major_color").unwrap();
    let minor = model.descriptor("minor_color").unwrap();
    assert_eq!(major.kind(), minor.kind());
    assert_eq!(major.help(), "The color of major labels.");
    assert_eq!(minor.help(), "The text color.");
    assert!(major.flags().contains(DescriptorFlags::INCLUDED));
    assert_eq!(
        major.origin(),
        &Origin::Included { model: "Two".into(), group: "text".into(), prefix: "major".into() }
    );

    let mut two = model.construct(no_values()).unwrap();
    two.set("major_color", "red").unwrap();
    assert_eq!(two.get("major_color").unwrap().to_string(), "#ff0000");
    assert_eq!(two.get("minor_color").unwrap().to_string(), "#444444");
    assert!(two.set("minor_color", 12).is_err());
}

#[test]
fn override_changes_only_the_default() {
    let schema = Schema::default();
    schema
        .register(ModelBuilder::new("Base").enumeration("align", align(), "left", "Alignment."))
        .unwrap();
    let child = schema
        .register(ModelBuilder::new("Child").extends("Base").override_default("align", "center"))
        .unwrap();

    let descriptor = child.descriptor("align").unwrap();
    assert_eq!(descriptor.default(), &DefaultValue::Value(Value::from("center")));
    assert!(descriptor.flags().contains(DescriptorFlags::OVERRIDDEN | DescriptorFlags::INHERITED));
    assert_eq!(descriptor.help(), "Alignment.");

    let base = schema.model("Base").unwrap();
    assert_eq!(base.descriptor("align").unwrap().kind(), descriptor.kind());
    assert_eq!(base.construct(no_values()).unwrap().get("align").unwrap(), &Value::from("left"));

    let mut instance = child.construct(no_values()).unwrap();
    assert_eq!(instance.get("align").unwrap(), &Value::from("center"));
    assert!(instance.set("align", "up").is_err());
}

#[test]
fn override_of_missing_attribute_fails() {
    let schema = Schema::default();
    let err = schema
        .register(ModelBuilder::new("M").override_default("ghost", 1))
        .unwrap_err();
    assert!(matches!(err, SchemaError::UnknownAttribute { ref name, .. } if name == "ghost"));
}

#[test]
fn override_default_is_validated() {
    let schema = Schema::default();
    let err = schema
        .register(
            ModelBuilder::new("M")
                .scalar("alpha", PropertyKind::alpha(), 1.0, "")
                .override_default("alpha", 2.0),
        )
        .unwrap_err();
    assert!(matches!(err, SchemaError::InvalidDefault { .. }));
}

#[test]
fn override_makes_required_optional() {
    let schema = Schema::default();
    schema.register(ModelBuilder::new("Base").required("x", PropertyKind::float(), "")).unwrap();
    let child = schema
        .register(ModelBuilder::new("Child").extends("Base").override_default("x", 0))
        .unwrap();
    assert!(!child.descriptor("x").unwrap().is_required());
    assert_eq!(child.construct(no_values()).unwrap().get("x").unwrap(), &Value::Float(0.0));
}

#[test]
fn null_default_policy() {
    let strict = Schema::default();
    let err = strict
        .register(ModelBuilder::new("M").scalar("text", PropertyKind::String, Value::Null, ""))
        .unwrap_err();
    assert!(matches!(err, SchemaError::InvalidDefault { .. }));

    let config = SchemaConfig { null_defaults: NullDefaultPolicy::Permit, ..SchemaConfig::default() };
    let lenient = Schema::new(config).unwrap();
    let model = lenient
        .register(ModelBuilder::new("M").scalar("text", PropertyKind::String, Value::Null, ""))
        .unwrap();
    let mut instance = model.construct(no_values()).unwrap();
    assert_eq!(instance.get("text").unwrap(), &Value::Null);
    assert!(instance.set("text", Value::Null).is_err());
    assert!(instance.set("text", "hello").unwrap());
}

#[test]
fn failed_set_keeps_prior_value() {
    let (_schema, model) = scenario_t();
    let mut t = model.construct([("x", 1)]).unwrap();
    t.set("align", "right").unwrap();

    let err = t.set("align", "up").unwrap_err();
    assert!(matches!(err, SchemaError::Validation { .. }));
    assert_eq!(t.get("align").unwrap(), &Value::from("right"));
    assert!(matches!(t.set("nope", 1), Err(SchemaError::UnknownAttribute { .. })));
}

#[test]
fn observers_see_effective_changes_only() {
    let (_schema, model) = scenario_t();
    let mut t = model.construct([("x", 1)]).unwrap();
    let seen = Arc::new(parking_lot::Mutex::new(Vec::<PropertyChanged>::new()));
    let sink = Arc::clone(&seen);
    let id = t.on_change(move |change| sink.lock().push(change.clone()));

    assert!(t.set("align", "center").unwrap());
    assert!(!t.set("align", "center").unwrap());
    {
        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].name, "align");
        assert_eq!(seen[0].old, Value::from("left"));
        assert_eq!(seen[0].new, Value::from("center"));
    }

    assert!(t.unobserve(id));
    t.set("align", "right").unwrap();
    assert_eq!(seen.lock().len(), 1);
}

#[test]
fn hub_receives_property_changes() {
    let (schema, model) = scenario_t();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    schema
        .hub()
        .connect::<PropertyChanged>(move |change| {
            assert_eq!(change.model, "T");
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    let mut t = model.construct([("x", 1)]).unwrap();
    t.set("x", 2).unwrap();
    t.set("x", 2.0).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn angle_is_read_through_its_units() {
    let schema = Schema::default();
    let model = schema
        .register(
            ModelBuilder::new("Rotated")
                .scalar("angle", PropertyKind::angle("angle_units"), 0, "")
                .enumeration("angle_units", EnumDomain::of::<AngleUnits>(), "rad", ""),
        )
        .unwrap();

    let mut r = model.construct([("angle", 180)]).unwrap();
    assert_eq!(r.angle_radians("angle").unwrap(), Some(180.0));
    r.set("angle_units", "deg").unwrap();
    assert!((r.angle_radians("angle").unwrap().unwrap() - PI).abs() < 1e-12);
    assert_eq!(r.get("angle").unwrap(), &Value::Float(180.0));
    assert!(r.angle_radians("angle_units").is_err());
}

#[test]
fn angle_without_units_fails_registration() {
    let schema = Schema::default();
    let err = schema
        .register(ModelBuilder::new("M").scalar("angle", PropertyKind::angle("angle_units"), 0, ""))
        .unwrap_err();
    assert!(matches!(err, SchemaError::UnknownAttribute { ref name, .. } if name == "angle_units"));
}

#[test]
fn reopening_follows_the_lifecycle() {
    let schema = Schema::default();
    schema.register(ModelBuilder::new("M").scalar("a", PropertyKind::int(), 1, "")).unwrap();

    let builder = schema.reopen("M").unwrap().scalar("b", PropertyKind::int(), 2, "");
    let model = schema.register(builder).unwrap();
    assert_eq!(model.descriptors().len(), 2);
    assert_eq!(schema.models().len(), 1);

    model.construct(no_values()).unwrap();
    assert!(model.is_sealed());
    assert!(matches!(schema.reopen("M"), Err(SchemaError::SchemaReopened { .. })));
    assert!(matches!(
        schema.register(ModelBuilder::new("M")),
        Err(SchemaError::SchemaReopened { .. })
    ));
    assert!(matches!(schema.reopen("Other"), Err(SchemaError::UnknownModel { .. })));
}

#[test]
fn replaced_model_handles_cannot_construct() {
    let schema = Schema::default();
    let old =
        schema.register(ModelBuilder::new("M").scalar("a", PropertyKind::int(), 1, "")).unwrap();
    let new =
        schema.register(ModelBuilder::new("M").scalar("b", PropertyKind::int(), 2, "")).unwrap();
    assert!(old.is_retired());
    assert!(!new.is_retired());

    assert!(matches!(old.construct(no_values()), Err(SchemaError::SchemaReopened { .. })));
    assert!(!old.is_sealed());

    let instance = schema.construct("M", no_values()).unwrap();
    assert_eq!(instance.get("b").unwrap(), &Value::Int(2));
    assert!(matches!(instance.get("a"), Err(SchemaError::UnknownAttribute { .. })));
    assert!(new.is_sealed());
}

#[test]
fn extending_seals_the_parent() {
    let schema = Schema::default();
    schema.register(ModelBuilder::new("Base")).unwrap();
    schema.register(ModelBuilder::new("Child").extends("Base")).unwrap();
    assert!(matches!(schema.reopen("Base"), Err(SchemaError::SchemaReopened { .. })));
    assert!(matches!(
        schema.register(ModelBuilder::new("Orphan").extends("Missing")),
        Err(SchemaError::UnknownModel { .. })
    ));
}

#[test]
fn instances_outliving_their_model_fail_cleanly() {
    let (schema, model) = scenario_t();
    let t = model.construct([("x", 1)]).unwrap();
    drop(model);
    drop(schema);
    assert!(matches!(t.get("x"), Err(SchemaError::ModelDropped { .. })));
    assert_eq!(t.model_name(), "T");
}

#[test]
fn snapshot_is_stable_and_serializable() {
    let (schema, _) = scenario_t();
    let t = schema.construct("T", [("x", 5)]).unwrap();
    let first = t.snapshot().unwrap();
    assert_eq!(first, t.snapshot().unwrap());
    assert_eq!(first.get("color"), Some(&Value::Color(Color::rgb(0x44, 0x44, 0x44))));

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["model"], "T");
    assert_eq!(json["properties"][0]["name"], "x");
    assert_eq!(json["properties"][0]["value"], 5.0);
    assert_eq!(json["properties"][2]["kind"], "Color");
    assert_eq!(json["properties"][2]["value"], "#444444");
}

#[test]
fn zero_signal_capacity_is_rejected() {
    let config = SchemaConfig { signal_capacity: 0, ..SchemaConfig::default() };
    assert!(matches!(Schema::new(config), Err(SchemaError::Signal { .. })));
}
