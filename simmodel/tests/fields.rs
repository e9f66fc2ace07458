use simmodel::error::{ErrorContext, ErrorSource};
use simmodel::fields::{self, FieldError, Fields};
use simmodel::model::{DeviceType, ModelType, TypeMemory};

mod common;
use common::fields;

fn field_error(fields: &Fields) -> FieldError {
    let err = fields::decode(fields, &["1", "2"]).unwrap_err();
    match err.into_inner() {
        ErrorSource::Field(err) => err,
        other => panic!("expected a field error, got {other:?}"),
    }
}

#[test]
fn test_fields_ordering_and_removal() {
    let mut stored = fields(&[("Reference", "R1"), ("Value", "1k")]);
    stored.set("Sim.Device", "R");
    stored.set("Reference", "R2");
    let names: Vec<&str> = stored.iter().map(|field| field.name.as_str()).collect();
    assert_eq!(names, vec!["Reference", "Value", "Sim.Device"]);

    stored.set("Value", "");
    assert_eq!(stored.get("Value"), None);
    assert_eq!(stored.len(), 2);
}

#[test]
fn test_fields_serialize_in_order() {
    let stored = fields(&[("Sim.Device", "R"), ("Sim.Params", "r=1k")]);
    let json = serde_json::to_string(&stored).unwrap();
    assert_eq!(
        json,
        r#"[{"name":"Sim.Device","text":"R"},{"name":"Sim.Params","text":"r=1k"}]"#
    );
    let back: Fields = serde_json::from_str(&json).unwrap();
    assert_eq!(back, stored);
}

#[test]
fn test_read_type() {
    let memory = TypeMemory::default();
    let read = |pairs: &[(&str, &str)]| fields::read_type(&fields(pairs), &memory);

    assert_eq!(read(&[("Sim.Device", "r")]), Ok(ModelType::R));
    assert_eq!(
        read(&[("Sim.Device", "KIBIS"), ("Sim.Type", "rectdriver")]),
        Ok(ModelType::BufferDriverRect)
    );
    assert_eq!(read(&[("Reference", "C3"), ("Value", "=2*x")]), Ok(ModelType::CBehavioral));
    assert_eq!(
        read(&[("Sim.Device", "Q")]),
        Err(FieldError::UnknownDevice("Q".to_string()))
    );
    assert!(matches!(
        read(&[("Sim.Device", "R"), ("Sim.Type", "POLY")]),
        Err(FieldError::UnknownType { .. })
    ));
    assert!(matches!(
        read(&[("Reference", "U1"), ("Value", "LM358")]),
        Err(FieldError::CannotInferType { .. })
    ));
}

#[test]
fn test_read_type_uses_type_memory() {
    let mut memory = TypeMemory::default();
    let stored = fields(&[("Sim.Device", "KIBIS")]);
    assert_eq!(
        fields::read_type(&stored, &memory),
        Ok(DeviceType::Kibis.default_model_type())
    );
    memory.remember(ModelType::BufferDriverPrbs);
    assert_eq!(
        fields::read_type(&stored, &memory),
        Ok(ModelType::BufferDriverPrbs)
    );
}

#[test]
fn test_decode_params() {
    let stored = fields(&[
        ("Sim.Device", "V"),
        ("Sim.Type", "="),
        ("Sim.Params", r#"v="SIN(0 5 1k)""#),
    ]);
    let model = fields::decode(&stored, &["1", "2"]).unwrap();
    assert_eq!(model.model_type(), ModelType::VBehavioral);
    assert_eq!(model.param(0).unwrap().value().as_str(), Some("SIN(0 5 1k)"));
}

#[test]
fn test_decode_is_all_or_nothing() {
    let stored = fields(&[("Sim.Device", "D"), ("Sim.Params", "is=1p n=oops")]);
    let err = fields::decode(&stored, &["1", "2"]).unwrap_err();
    assert!(err
        .context()
        .contains(&ErrorContext::DecodeField("Sim.Params".into())));
    assert!(matches!(
        err.source(),
        ErrorSource::Field(FieldError::InvalidParamValue { name, .. }) if name == "n"
    ));
}

#[test]
fn test_decode_errors() {
    assert_eq!(
        field_error(&fields(&[("Sim.Device", "D"), ("Sim.Params", "bogus=1")])),
        FieldError::UnknownParam("bogus".to_string())
    );
    assert!(matches!(
        field_error(&fields(&[("Sim.Device", "D"), ("Sim.Params", "is")])),
        FieldError::MalformedParams { .. }
    ));
    assert!(matches!(
        field_error(&fields(&[("Sim.Device", "D"), ("Sim.Pins", "1=2 3")])),
        FieldError::MalformedPins { .. }
    ));
    assert_eq!(
        field_error(&fields(&[("Sim.Device", "D"), ("Sim.Pins", "K=1")])),
        FieldError::UnknownPin("K".to_string())
    );
}

#[test]
fn test_output_params_in_fields_are_ignored() {
    let stored = fields(&[("Sim.Device", "D"), ("Sim.Params", "vd=0.7 is=1p")]);
    let model = fields::decode(&stored, &["1", "2"]).unwrap();
    assert!(!model.find_param("vd").unwrap().1.value().is_set());
    assert!(model.find_param("is").unwrap().1.value().is_set());
}

#[test]
fn test_decode_pins() {
    let by_name = fields(&[("Sim.Device", "R"), ("Sim.Params", "r=1k"), ("Sim.Pins", "-=A +=B")]);
    let model = fields::decode(&by_name, &["A", "B"]).unwrap();
    assert_eq!(model.pin(0).unwrap().symbol_pin_number().unwrap(), "B");
    assert_eq!(model.pin(1).unwrap().symbol_pin_number().unwrap(), "A");

    let positional = fields(&[("Sim.Device", "R"), ("Sim.Params", "r=1k"), ("Sim.Pins", "~ 1")]);
    let model = fields::decode(&positional, &["1", "2"]).unwrap();
    assert!(!model.pin(0).unwrap().is_connected());
    assert_eq!(model.pin(1).unwrap().symbol_pin_number().unwrap(), "1");
}

#[test]
fn test_default_pins_follow_natural_order() {
    let stored = fields(&[("Sim.Device", "R"), ("Sim.Params", "r=1k")]);
    let model = fields::decode(&stored, &["10", "2"]).unwrap();
    assert_eq!(model.pin(0).unwrap().symbol_pin_number().unwrap(), "2");
    assert_eq!(model.pin(1).unwrap().symbol_pin_number().unwrap(), "10");
}

#[test]
fn test_enable_field() {
    for (text, enabled) in [("0", false), ("N", false), ("false", false), ("1", true), ("", true)] {
        let stored = fields(&[("Sim.Device", "D"), ("Sim.Enable", text)]);
        let model = fields::decode(&stored, &["1", "2"]).unwrap();
        assert_eq!(model.is_enabled(), enabled, "Sim.Enable = {text:?}");
    }
}

#[test]
fn test_encode_writes_no_pins_for_pinless_models() {
    let model = simmodel::model::Model::new(ModelType::Subckt);
    let mut stored = fields(&[("Sim.Pins", "1=1")]);
    fields::encode(&model, &mut stored);
    assert_eq!(stored.get("Sim.Pins"), None);
    assert_eq!(stored.get("Sim.Device"), Some("SUBCKT"));
    assert_eq!(stored.get("Sim.Type"), None);
}

#[test]
fn test_encode_library_ref() {
    let mut stored = Fields::new();
    fields::encode_library_ref(&mut stored, "models/diodes.lib", "1N4148");
    assert_eq!(stored.get("Sim.Library"), Some("models/diodes.lib"));
    assert_eq!(stored.get("Sim.Name"), Some("1N4148"));
}
