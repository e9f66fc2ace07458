use float_eq::assert_float_eq;

use super::*;
use crate::tests::{fields, DIODE_LIBRARY};

#[test]
fn test_parse_library() {
    let library = Library::parse(DIODE_LIBRARY).unwrap();
    let names: Vec<&str> = library.entries().iter().map(|e| e.name().as_str()).collect();
    assert_eq!(names, vec!["1N4148", "BAT54", "amp"]);

    let diode = library.find("1n4148").unwrap().model();
    assert_eq!(diode.model_type(), ModelType::D);
    let is = diode.find_param("is").unwrap().1.value().as_f64().unwrap();
    assert_float_eq!(is, 2.52e-9, rmax <= 1e-12);
    let rs = diode.find_param("rs").unwrap().1.value().as_f64().unwrap();
    assert_float_eq!(rs, 0.568, rmax <= 1e-12);

    let amp = library.find("amp").unwrap().model();
    assert_eq!(amp.model_type(), ModelType::Subckt);
    assert_eq!(amp.pin_count(), 3);
    assert_eq!(amp.param_count(), 2);
    assert_eq!(amp.param(0).unwrap().default_text(), "100");
}

#[test]
fn test_other_variant_card_name() {
    let library = Library::parse(DIODE_LIBRARY).unwrap();
    let bat54 = library.find("BAT54").unwrap().model();
    let (_, cjo) = bat54.find_param("cjo").unwrap();
    assert!(cjo.is_other_variant());
    assert_float_eq!(cjo.value().as_f64().unwrap(), 10e-12, rmax <= 1e-12);
}

#[test]
fn test_unsupported_models_are_skipped() {
    let library = Library::parse(".model nch NMOS(vto=0.7)\n.model d1 D(is=1f)\n").unwrap();
    assert_eq!(library.len(), 1);
    assert!(library.find("nch").is_none());
}

#[test]
fn test_duplicate_names() {
    let err = Library::parse(".model d1 D(is=1f)\n.model D1 D(n=2)\n").unwrap_err();
    assert!(matches!(
        err.source(),
        ErrorSource::Library(LibraryError::DuplicateName(name)) if name == "D1"
    ));
}

#[test]
fn test_bad_card_value() {
    let err = Library::parse(".model d1 D(is=lots)\n").unwrap_err();
    assert!(matches!(
        err.source(),
        ErrorSource::Library(LibraryError::InvalidParamValue { .. })
    ));
}

#[test]
fn test_instantiate_applies_instance_overrides_only() {
    let library = Library::parse(DIODE_LIBRARY).unwrap();
    let overrides = fields(&[("Sim.Params", "area=3 is=1p"), ("Sim.Enable", "0")]);
    let model = library
        .instantiate("1N4148", &["1", "2"], Some(&overrides))
        .unwrap();

    assert_eq!(model.find_param("area").unwrap().1.value().as_f64(), Some(3.0));
    let is = model.find_param("is").unwrap().1.value().as_f64().unwrap();
    assert_float_eq!(is, 2.52e-9, rmax <= 1e-12);
    assert!(!model.is_enabled());
    assert_eq!(model.pin(0).unwrap().symbol_pin_number().unwrap(), "1");

    // The base model is a template and never changes.
    let base = library.find("1N4148").unwrap().model();
    assert!(!base.find_param("area").unwrap().1.value().is_set());
}

#[test]
fn test_instantiate_missing_model() {
    let library = Library::parse(DIODE_LIBRARY).unwrap();
    let err = library
        .instantiate("nope", &["1", "2"], None)
        .unwrap_err();
    assert!(matches!(err.source(), ErrorSource::ModelNotFound(_)));
}

#[test]
fn test_instantiate_reports_context() {
    let library = Library::parse(DIODE_LIBRARY).unwrap();
    let overrides = fields(&[("Sim.Params", "gain=2 missing=1")]);
    let err = library
        .instantiate("amp", &["1", "2", "3"], Some(&overrides))
        .unwrap_err();
    assert!(err
        .context()
        .contains(&ErrorContext::Instantiate(ArcStr::from("amp"))));
}

#[test]
fn test_from_models() {
    let mut driver = Model::new(ModelType::BufferDriverDc);
    driver.set_param_value_by_name("vcc", "1.8").unwrap();
    let library = Library::from_models([("drv", driver), ("pad", Model::new(ModelType::BufferDevice))])
        .unwrap();
    let model = library.instantiate("drv", &["1", "2"], None).unwrap();
    assert_eq!(model.find_param("vcc").unwrap().1.value().as_f64(), Some(1.8));
}

#[test]
fn test_fs_source_resolves_relative_paths() {
    let source = FsLibrarySource::new("/projects/amp");
    assert_eq!(
        source.resolve("models/diodes.lib"),
        PathBuf::from("/projects/amp/models/diodes.lib")
    );
    assert_eq!(source.resolve("/lib/x.lib"), PathBuf::from("/lib/x.lib"));
}
