//! State behind a component's model editor.
//!
//! A session keeps one model per model type, so switching types and switching back keeps
//! earlier edits, plus one instance per entry of the selected library.

use std::collections::HashMap;

use crate::deps::arcstr::ArcStr;
use crate::error::{ErrorSource, Result};
use crate::fields::{self, apply_pins, Fields, LIBRARY_FIELD, NAME_FIELD};
use crate::library::{Library, LibrarySource};
use crate::log;
use crate::model::pin::sorted_symbol_pins;
use crate::model::{Category, DeviceType, Direction, Model, ModelType, TypeMemory};

/// Where the current model comes from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ModelSource {
    /// A built-in model of the given type.
    Instance(ModelType),
    /// Entry `index` of the session's library.
    Library(usize),
}

#[derive(Clone, Debug)]
struct LoadedLibrary {
    path: String,
    library: Library,
    models: Vec<Model>,
}

#[derive(Clone, Debug)]
pub struct ModelSession {
    symbol_pins: Vec<ArcStr>,
    last_types: TypeMemory,
    instances: HashMap<ModelType, Model>,
    library: Option<LoadedLibrary>,
    source: ModelSource,
}

impl ModelSession {
    pub fn new<S: AsRef<str>>(symbol_pins: &[S]) -> Self {
        let last_types = TypeMemory::default();
        let ty = last_types.get(DeviceType::R);
        let mut session = Self {
            symbol_pins: sorted_symbol_pins(symbol_pins),
            last_types,
            instances: HashMap::new(),
            library: None,
            source: ModelSource::Instance(ty),
        };
        session.ensure_instance(ty);
        session
    }

    /// Symbol pin numbers in natural order.
    #[inline]
    pub fn symbol_pins(&self) -> &[ArcStr] {
        &self.symbol_pins
    }

    #[inline]
    pub fn model_source(&self) -> ModelSource {
        self.source
    }

    #[inline]
    pub fn library(&self) -> Option<&Library> {
        self.library.as_ref().map(|loaded| &loaded.library)
    }

    #[inline]
    pub fn type_memory(&self) -> &TypeMemory {
        &self.last_types
    }

    fn new_instance(&self, ty: ModelType) -> Model {
        let mut model = Model::with_symbol_pin_count(ty, self.symbol_pins.len());
        // An absent pin field only applies the default mapping, which cannot fail.
        let _ = apply_pins(&mut model, None, &self.symbol_pins);
        model
    }

    fn ensure_instance(&mut self, ty: ModelType) {
        if !self.instances.contains_key(&ty) {
            let model = self.new_instance(ty);
            self.instances.insert(ty, model);
        }
    }

    fn instantiate_all(&self, path: &str, library: Library) -> Result<LoadedLibrary> {
        let models = library
            .entries()
            .iter()
            .map(|entry| library.instantiate(entry.name(), &self.symbol_pins, None))
            .collect::<Result<Vec<_>>>()?;
        Ok(LoadedLibrary {
            path: path.to_string(),
            library,
            models,
        })
    }

    /// Replaces the session state with the model stored in `fields`.
    ///
    /// On error the session is left unchanged.
    pub fn load_fields(&mut self, fields: &Fields, source: &dyn LibrarySource) -> Result<()> {
        if let Some(path) = fields.get(LIBRARY_FIELD) {
            let library = source.load(path)?;
            let name = fields.text(NAME_FIELD);
            let index = library
                .index_of(name)
                .ok_or_else(|| ErrorSource::ModelNotFound(ArcStr::from(name)))?;
            let mut loaded = self.instantiate_all(path, library)?;
            loaded.models[index] =
                loaded
                    .library
                    .instantiate(name, &self.symbol_pins, Some(fields))?;
            self.library = Some(loaded);
            self.source = ModelSource::Library(index);
        } else {
            let model = fields::decode_with(fields, &self.symbol_pins, &self.last_types)?;
            let ty = model.model_type();
            self.last_types.remember(ty);
            self.instances.insert(ty, model);
            self.source = ModelSource::Instance(ty);
        }
        Ok(())
    }

    /// Writes the current model into `fields`.
    pub fn save_fields(&self, fields: &mut Fields) {
        match (self.source, self.library.as_ref()) {
            (ModelSource::Library(index), Some(loaded)) => {
                let entry = &loaded.library.entries()[index];
                fields::encode_library_ref(fields, &loaded.path, entry.name());
                fields::encode_with_base(&loaded.models[index], entry.model(), fields);
            }
            _ => {
                fields.remove(LIBRARY_FIELD);
                fields.remove(NAME_FIELD);
                fields::encode(self.cur_model(), fields);
            }
        }
    }

    pub fn cur_model(&self) -> &Model {
        match (self.source, self.library.as_ref()) {
            (ModelSource::Library(index), Some(loaded)) => &loaded.models[index],
            (ModelSource::Instance(ty), _) => &self.instances[&ty],
            (ModelSource::Library(_), None) => unreachable!("library source without a library"),
        }
    }

    pub fn cur_model_mut(&mut self) -> &mut Model {
        match (self.source, self.library.as_mut()) {
            (ModelSource::Library(index), Some(loaded)) => &mut loaded.models[index],
            (ModelSource::Instance(ty), _) => self
                .instances
                .get_mut(&ty)
                .unwrap_or_else(|| unreachable!("no model for selected type {ty:?}")),
            (ModelSource::Library(_), None) => unreachable!("library source without a library"),
        }
    }

    /// Switches to the type last chosen for `device`.
    pub fn select_device_type(&mut self, device: DeviceType) {
        self.select_model_type(self.last_types.get(device));
    }

    pub fn select_model_type(&mut self, ty: ModelType) {
        self.last_types.remember(ty);
        self.ensure_instance(ty);
        self.source = ModelSource::Instance(ty);
    }

    /// Loads the library at `path` and selects its first model, if any.
    pub fn set_library(&mut self, path: &str, source: &dyn LibrarySource) -> Result<()> {
        let library = source.load(path)?;
        let loaded = self.instantiate_all(path, library)?;
        let empty = loaded.models.is_empty();
        self.library = Some(loaded);
        if empty {
            log::warn!("library `{}` defines no models", path);
            if let ModelSource::Library(_) = self.source {
                let ty = self.last_types.get(DeviceType::R);
                self.select_model_type(ty);
            }
        } else {
            self.source = ModelSource::Library(0);
        }
        Ok(())
    }

    pub fn select_library_model(&mut self, name: &str) -> Result<()> {
        let loaded = self.library.as_ref().ok_or(ErrorSource::NoLibrary)?;
        let index = loaded
            .library
            .index_of(name)
            .ok_or_else(|| ErrorSource::ModelNotFound(ArcStr::from(name)))?;
        self.source = ModelSource::Library(index);
        Ok(())
    }

    /// Wires symbol pin `symbol_pin` (an index into [`ModelSession::symbol_pins`]) to
    /// `model_pin`, or disconnects it.
    pub fn assign_pin(&mut self, symbol_pin: usize, model_pin: Option<usize>) -> Result<()> {
        let number = self
            .symbol_pins
            .get(symbol_pin)
            .cloned()
            .ok_or(ErrorSource::PinIndexOutOfBounds {
                index: symbol_pin,
                count: self.symbol_pins.len(),
            })?;
        let model = self.cur_model_mut();
        match model_pin {
            Some(index) => model.set_pin_symbol_pin_number(index, Some(number.as_str()))?,
            None => {
                let held = model
                    .pins()
                    .iter()
                    .position(|pin| pin.symbol_pin_number() == Some(&number));
                if let Some(index) = held {
                    model.set_pin_symbol_pin_number(index, None)?;
                }
            }
        }
        Ok(())
    }

    /// Clears assignments to symbol pins that no longer exist, in every model of the
    /// session. Returns the number of assignments cleared.
    pub fn remove_orphaned_pin_assignments(&mut self) -> usize {
        let pins = &self.symbol_pins;
        let library_models = self
            .library
            .iter_mut()
            .flat_map(|loaded| loaded.models.iter_mut());
        self.instances
            .values_mut()
            .chain(library_models)
            .map(|model| model.remove_orphaned_pin_assignments(pins))
            .sum()
    }

    /// The model pin holding each symbol pin, in symbol pin order.
    pub fn pin_assignments(&self) -> Vec<(ArcStr, Option<usize>)> {
        let model = self.cur_model();
        self.symbol_pins
            .iter()
            .map(|number| {
                let pin = model
                    .pins()
                    .iter()
                    .position(|pin| pin.symbol_pin_number() == Some(number));
                (number.clone(), pin)
            })
            .collect()
    }

    /// Indices of the current model's presentable parameters, grouped by category.
    pub fn param_groups(&self) -> Vec<(Category, Vec<usize>)> {
        let params = self.cur_model().params();
        Category::PRESENTATION_ORDER
            .iter()
            .filter_map(|category| {
                let indices: Vec<usize> = params
                    .iter()
                    .enumerate()
                    .filter(|(_, param)| {
                        param.info().category == *category && param.info().is_relevant()
                    })
                    .map(|(i, _)| i)
                    .collect();
                (!indices.is_empty()).then_some((*category, indices))
            })
            .collect()
    }

    /// Whether parameter `index` of the current model may be edited.
    ///
    /// Model parameters of library models are locked unless `allow_overrides` is set.
    pub fn is_param_editable(&self, index: usize, allow_overrides: bool) -> Result<bool> {
        let info = self.cur_model().param(index)?.info();
        if info.dir == Direction::Out {
            return Ok(false);
        }
        match self.source {
            ModelSource::Library(_) => Ok(info.is_instance_param || allow_overrides),
            ModelSource::Instance(_) => Ok(true),
        }
    }

    /// The current model's netlist lines for a component named `reference`.
    pub fn preview(&self, reference: &str) -> String {
        let name = match (self.source, self.library.as_ref()) {
            (ModelSource::Library(index), Some(loaded)) => {
                loaded.library.entries()[index].name().to_string()
            }
            _ => reference.to_string(),
        };
        self.cur_model().spice_generator().preview(reference, &name)
    }
}
