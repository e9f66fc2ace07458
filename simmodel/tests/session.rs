use simmodel::error::ErrorSource;
use simmodel::library::FsLibrarySource;
use simmodel::model::{Category, DeviceType, ModelType};
use simmodel::session::{ModelSession, ModelSource};
use tempdir::TempDir;

mod common;
use common::{fields, write_library, DIODE_LIBRARY};

fn no_libraries() -> FsLibrarySource {
    FsLibrarySource::new("/nonexistent")
}

#[test]
fn test_load_and_save_instance() {
    let mut session = ModelSession::new(&["2", "1"]);
    let mut stored = fields(&[("Reference", "R1"), ("Value", "10k")]);
    session.load_fields(&stored, &no_libraries()).unwrap();
    assert_eq!(session.model_source(), ModelSource::Instance(ModelType::R));
    assert!(session.cur_model().is_inferred());

    session.cur_model_mut().set_param_value(0, "4.7k").unwrap();
    session.save_fields(&mut stored);
    assert_eq!(stored.get("Sim.Device"), Some("R"));
    assert_eq!(stored.get("Sim.Params"), Some("r=4.7k"));
}

#[test]
fn test_failed_load_leaves_session_unchanged() {
    let mut session = ModelSession::new(&["1", "2"]);
    session.select_model_type(ModelType::CBehavioral);
    let stored = fields(&[("Sim.Device", "C"), ("Sim.Params", "c=1x")]);
    assert!(session.load_fields(&stored, &no_libraries()).is_err());
    assert_eq!(
        session.model_source(),
        ModelSource::Instance(ModelType::CBehavioral)
    );
}

#[test]
fn test_switching_types_keeps_edits() {
    let mut session = ModelSession::new(&["1", "2"]);
    session.cur_model_mut().set_param_value(0, "1k").unwrap();
    session.select_device_type(DeviceType::C);
    assert_eq!(session.cur_model().model_type(), ModelType::C);
    session.select_model_type(ModelType::R);
    assert_eq!(session.cur_model().param(0).unwrap().value().as_f64(), Some(1e3));
}

#[test]
fn test_type_memory_per_device() {
    let mut session = ModelSession::new(&["1", "2"]);
    session.select_model_type(ModelType::BufferDriverRect);
    session.select_device_type(DeviceType::R);
    session.select_device_type(DeviceType::Kibis);
    assert_eq!(
        session.model_source(),
        ModelSource::Instance(ModelType::BufferDriverRect)
    );
}

#[test]
fn test_library_models() {
    let dir = TempDir::new("simmodel_session").unwrap();
    write_library(dir.path(), "diodes.lib", DIODE_LIBRARY);
    let source = FsLibrarySource::new(dir.path());

    let mut session = ModelSession::new(&["1", "2"]);
    session.set_library("diodes.lib", &source).unwrap();
    assert_eq!(session.model_source(), ModelSource::Library(0));
    session.select_library_model("1N4148").unwrap();
    session.cur_model_mut().set_param_value_by_name("area", "4").unwrap();

    let mut stored = fields(&[("Reference", "D1")]);
    session.save_fields(&mut stored);
    assert_eq!(stored.get("Sim.Library"), Some("diodes.lib"));
    assert_eq!(stored.get("Sim.Name"), Some("1N4148"));
    assert_eq!(stored.get("Sim.Params"), Some("area=4"));

    let mut reloaded = ModelSession::new(&["1", "2"]);
    reloaded.load_fields(&stored, &source).unwrap();
    assert_eq!(reloaded.model_source(), ModelSource::Library(0));
    let area = reloaded.cur_model().find_param("area").unwrap().1.value().as_f64();
    assert_eq!(area, Some(4.0));
}

#[test]
fn test_select_library_model_errors() {
    let mut session = ModelSession::new(&["1", "2"]);
    let err = session.select_library_model("1N4148").unwrap_err();
    assert!(matches!(err.source(), ErrorSource::NoLibrary));
}

#[test]
fn test_param_editability() {
    let dir = TempDir::new("simmodel_session").unwrap();
    write_library(dir.path(), "diodes.lib", DIODE_LIBRARY);
    let source = FsLibrarySource::new(dir.path());

    let mut session = ModelSession::new(&["1", "2"]);
    session.set_library("diodes.lib", &source).unwrap();
    let model = session.cur_model();
    let is = model.find_param("is").unwrap().0;
    let area = model.find_param("area").unwrap().0;
    let vd = model.find_param("vd").unwrap().0;

    assert!(!session.is_param_editable(is, false).unwrap());
    assert!(session.is_param_editable(is, true).unwrap());
    assert!(session.is_param_editable(area, false).unwrap());
    assert!(!session.is_param_editable(vd, true).unwrap());
    assert!(session.is_param_editable(99, true).is_err());
}

#[test]
fn test_param_groups() {
    let mut session = ModelSession::new(&["1", "2"]);
    session.select_device_type(DeviceType::D);
    let groups = session.param_groups();
    let categories: Vec<Category> = groups.iter().map(|(category, _)| *category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Geometry,
            Category::Dc,
            Category::Capacitance,
            Category::Temperature,
            Category::LimitingValues,
            Category::Flags,
        ]
    );
    let model = session.cur_model();
    for (_, indices) in groups.iter() {
        for &i in indices {
            assert!(model.param(i).unwrap().info().is_relevant());
        }
    }
}

#[test]
fn test_pin_assignment() {
    let mut session = ModelSession::new(&["1", "2", "3"]);
    assert_eq!(session.pin_assignments()[2].1, None);

    session.assign_pin(2, Some(0)).unwrap();
    let assignments = session.pin_assignments();
    assert_eq!(assignments[0].1, None);
    assert_eq!(assignments[2].1, Some(0));

    session.assign_pin(2, None).unwrap();
    assert!(session.pin_assignments().iter().all(|(_, pin)| *pin != Some(0)));
    assert!(session.assign_pin(7, Some(0)).is_err());
}

#[test]
fn test_orphaned_pins_after_symbol_change() {
    let mut session = ModelSession::new(&["1", "2"]);
    let stored = fields(&[("Sim.Device", "R"), ("Sim.Params", "r=1k"), ("Sim.Pins", "1=1 2=5")]);
    session.load_fields(&stored, &no_libraries()).unwrap();
    assert_eq!(session.remove_orphaned_pin_assignments(), 1);
    assert_eq!(session.remove_orphaned_pin_assignments(), 0);
}

#[test]
fn test_preview() {
    let mut session = ModelSession::new(&["1", "2"]);
    session.cur_model_mut().set_param_value(0, "330").unwrap();
    assert_eq!(session.preview("R5"), "R5 + - 330\n");
}
