use float_eq::assert_float_eq;

use super::*;
use crate::error::ErrorSource;

#[test]
fn test_new_model_layout() {
    let model = Model::new(ModelType::D);
    assert_eq!(model.device_type(), DeviceType::D);
    assert_eq!(model.pin_count(), 2);
    assert_eq!(model.pin(0).unwrap().name(), "+");
    assert!(model.params().iter().all(|param| !param.value().is_set()));
    assert!(model.is_enabled());
    assert!(!model.is_edited());
    assert_eq!(model.inference_state(), InferenceState::Explicit);
}

#[test]
fn test_raw_spice_pins_follow_symbol() {
    let model = Model::with_symbol_pin_count(ModelType::RawSpice, 3);
    let names: Vec<&str> = model.pins().iter().map(|pin| pin.name().as_str()).collect();
    assert_eq!(names, vec!["1", "2", "3"]);

    let model = Model::with_symbol_pin_count(ModelType::R, 3);
    assert_eq!(model.pin_count(), 2);
}

#[test]
fn test_set_param_value() {
    let mut model = Model::new(ModelType::R);
    model.set_param_value(0, "4.7k").unwrap();
    assert_float_eq!(
        model.param(0).unwrap().value().as_f64().unwrap(),
        4700.0,
        rmax <= 1e-15
    );
    assert!(model.is_edited());
}

#[test]
fn test_invalid_value_leaves_model_unchanged() {
    let mut model = Model::new(ModelType::R);
    model.set_param_value(0, "1k").unwrap();
    let before = model.clone();
    let err = model.set_param_value(0, "ten").unwrap_err();
    assert!(matches!(err.source(), ErrorSource::Parse(_)));
    assert_eq!(model, before);
}

#[test]
fn test_param_index_out_of_bounds() {
    let model = Model::new(ModelType::C);
    let err = model.param(5).unwrap_err();
    assert!(matches!(
        err.source(),
        ErrorSource::ParamIndexOutOfBounds { index: 5, count: 1 }
    ));
    assert!(model.pin(2).is_err());
}

#[test]
fn test_output_params_are_read_only() {
    let mut model = Model::new(ModelType::D);
    let err = model.set_param_value_by_name("vd", "1").unwrap_err();
    assert!(matches!(err.source(), ErrorSource::ReadOnlyParam(name) if name == "vd"));
}

#[test]
fn test_unknown_param_name() {
    let mut model = Model::new(ModelType::D);
    let err = model.set_param_value_by_name("bogus", "1").unwrap_err();
    assert!(matches!(err.source(), ErrorSource::ParamNotFound(_)));
}

#[test]
fn test_enum_values() {
    let mut model = Model::new(ModelType::BufferDriverDc);
    model.set_param_value_by_name("dc", "HIGH").unwrap();
    assert_eq!(model.find_param("dc").unwrap().1.value().as_str(), Some("high"));
    assert!(model.set_param_value_by_name("dc", "middle").is_err());
}

#[test]
fn test_other_variant_default() {
    let mut model = Model::new(ModelType::D);
    let (index, param) = model.find_param("cjo").unwrap();
    assert_eq!(param.default_text(), "0");
    model.set_param_other_variant(index, true).unwrap();
    let param = model.param(index).unwrap();
    assert!(param.is_other_variant());
    assert_eq!(param.default_text(), "");
    assert!(!param.default_value().is_set());
}

#[test]
fn test_pin_reassignment_is_unique() {
    let mut model = Model::new(ModelType::R);
    model.set_pin_symbol_pin_number(0, Some("1")).unwrap();
    model.set_pin_symbol_pin_number(1, Some("1")).unwrap();
    assert_eq!(model.pin(0).unwrap().symbol_pin_number(), None);
    assert_eq!(model.pin(1).unwrap().symbol_pin_number().unwrap(), "1");

    model.set_pin_symbol_pin_number(1, Some(NOT_CONNECTED)).unwrap();
    assert!(!model.pin(1).unwrap().is_connected());
}

#[test]
fn test_remove_orphaned_pin_assignments() {
    let mut model = Model::new(ModelType::R);
    model.set_pin_symbol_pin_number(0, Some("1")).unwrap();
    model.set_pin_symbol_pin_number(1, Some("3")).unwrap();
    assert_eq!(model.remove_orphaned_pin_assignments(&["1", "2"]), 1);
    assert_eq!(model.remove_orphaned_pin_assignments(&["1", "2"]), 0);
    assert_eq!(model.pin(0).unwrap().symbol_pin_number().unwrap(), "1");
    assert!(!model.pin(1).unwrap().is_connected());
}

#[test]
fn test_rect_driver_autofill() {
    let frequency = |model: &Model| model.find_param("f").unwrap().1.value().as_f64().unwrap();

    let mut model = Model::new(ModelType::BufferDriverRect);
    assert!(model.has_autofill());
    assert_float_eq!(frequency(&model), 500e6, rmax <= 1e-12);

    model.set_param_value_by_name("ton", "1n").unwrap();
    assert_float_eq!(frequency(&model), 500e6, rmax <= 1e-12);

    model.set_param_value_by_name("toff", "3n").unwrap();
    assert_float_eq!(frequency(&model), 250e6, rmax <= 1e-12);

    model.set_param_value_by_name("toff", "").unwrap();
    assert_float_eq!(frequency(&model), 500e6, rmax <= 1e-12);

    model.set_param_value_by_name("ton", "0").unwrap();
    model.set_param_value_by_name("toff", "0").unwrap();
    assert!(!model.find_param("f").unwrap().1.value().is_set());
}

#[test]
fn test_non_instance_overrides() {
    let base = Model::new(ModelType::D);
    let mut model = base.clone();
    model.set_param_value_by_name("area", "2").unwrap();
    assert!(!model.has_non_instance_overrides(&base));
    model.set_param_value_by_name("is", "1p").unwrap();
    assert!(model.has_non_instance_overrides(&base));
}

#[test]
fn test_editing_clears_inference() {
    let mut model = Model::new(ModelType::R);
    assert!(inference::apply(&mut model, "R1", "10k"));
    assert!(model.is_inferred());
    model.set_param_value(0, "22k").unwrap();
    assert!(!model.is_inferred());
}

#[test]
fn test_principal_param_present_for_value_models() {
    for ty in ModelType::ALL {
        let model = Model::with_symbol_pin_count(ty, 2);
        if matches!(
            ty.class(),
            ModelClass::Ideal | ModelClass::Behavioral | ModelClass::RawSpice
        ) {
            assert!(model.param_count() > 0, "{ty:?}");
            assert!(model.param(0).is_ok(), "{ty:?}");
        }
    }
}
