//! Libraries of named base models that component instances are created from.

use std::path::{Path, PathBuf};

use spicelib::parser::{ModelLine, SubcktLine};
use spicelib::Definition;

use crate::deps::arcstr::ArcStr;
use crate::error::{with_err_context, ErrorContext, ErrorSource, Result};
use crate::fields::{apply_params, apply_pins, read_enable, Fields, ParamScope};
use crate::fields::{PARAMS_FIELD, PINS_FIELD};
use crate::log;
use crate::model::{diode, subckt, Model, ModelType};
use crate::value::{Notation, Value, ValueType};

pub use error::LibraryError;

pub mod error;

#[cfg(test)]
mod tests;

/// A named base model.
#[derive(Clone, Debug, PartialEq)]
pub struct LibraryEntry {
    name: ArcStr,
    model: Model,
}

impl LibraryEntry {
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    #[inline]
    pub fn model(&self) -> &Model {
        &self.model
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Library {
    path: Option<PathBuf>,
    entries: Vec<LibraryEntry>,
}

impl Library {
    /// Reads base models from SPICE library text.
    pub fn parse(text: &str) -> Result<Self> {
        let parsed = spicelib::parse(text).map_err(LibraryError::from)?;
        let mut library = Self::default();
        for definition in parsed.definitions() {
            let entry = match definition {
                Definition::Subckt(line) => Some(subckt_entry(line)),
                Definition::Model(line) => model_entry(line)?,
            };
            if let Some(entry) = entry {
                library.push(entry)?;
            }
        }
        Ok(library)
    }

    /// Reads a library file. Nothing is returned unless the whole file loads.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = crate::io::read_to_string(path)?;
        let mut library = with_err_context(Self::parse(&text), || {
            ErrorContext::LoadLibrary(path.to_path_buf())
        })?;
        library.path = Some(path.to_path_buf());
        Ok(library)
    }

    /// Builds a library from models constructed in code.
    pub fn from_models<N, I>(models: I) -> Result<Self>
    where
        N: Into<ArcStr>,
        I: IntoIterator<Item = (N, Model)>,
    {
        let mut library = Self::default();
        for (name, model) in models {
            library.push(LibraryEntry {
                name: name.into(),
                model,
            })?;
        }
        Ok(library)
    }

    fn push(&mut self, entry: LibraryEntry) -> Result<()> {
        if self.index_of(&entry.name).is_some() {
            return Err(LibraryError::DuplicateName(entry.name.to_string()).into());
        }
        self.entries.push(entry);
        Ok(())
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline]
    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a model name, exactly first and then ignoring case.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name == name)
            .or_else(|| {
                self.entries
                    .iter()
                    .position(|entry| entry.name.eq_ignore_ascii_case(name))
            })
    }

    pub fn find(&self, name: &str) -> Option<&LibraryEntry> {
        self.index_of(name).map(|index| &self.entries[index])
    }

    /// Creates an instance of base model `name`.
    ///
    /// `fields` may override instance parameters, pins and the enable flag. Overrides of
    /// model parameters are ignored since those belong to the library.
    pub fn instantiate<S: AsRef<str>>(
        &self,
        name: &str,
        symbol_pins: &[S],
        fields: Option<&Fields>,
    ) -> Result<Model> {
        let entry = self
            .find(name)
            .ok_or_else(|| ErrorSource::ModelNotFound(ArcStr::from(name)))?;
        let mut model = entry.model.clone();

        let ctx = || ErrorContext::Instantiate(entry.name.clone());
        if let Some(fields) = fields {
            if let Some(text) = fields.get(PARAMS_FIELD) {
                with_err_context(
                    apply_params(&mut model, text, ParamScope::InstanceOnly),
                    ctx,
                )?;
            }
            model.set_enabled(read_enable(fields));
        }
        let pins = fields.and_then(|fields| fields.get(PINS_FIELD));
        with_err_context(apply_pins(&mut model, pins, symbol_pins), ctx)?;

        model.run_autofill();
        Ok(model)
    }
}

fn subckt_entry(line: &SubcktLine<'_>) -> LibraryEntry {
    let ports = line.ports.iter().map(|port| ArcStr::from(*port));
    LibraryEntry {
        name: ArcStr::from(line.name),
        model: Model::with_layout(ModelType::Subckt, subckt::params(&line.params), ports),
    }
}

fn model_entry(line: &ModelLine<'_>) -> Result<Option<LibraryEntry>> {
    if !line.kind.eq_ignore_ascii_case("d") {
        log::warn!(
            "skipping model `{}` of unsupported kind `{}`",
            line.name,
            line.kind
        );
        return Ok(None);
    }

    let mut model = Model::new(ModelType::D);
    for assign in line.params.iter() {
        let (name, other_variant) = match diode::other_variant_of(assign.name) {
            Some(name) => (name, true),
            None => (assign.name, false),
        };
        let Some((index, param)) = model.find_param(name) else {
            log::warn!("model `{}`: skipping unknown parameter `{}`", line.name, assign.name);
            continue;
        };
        let value = match assign.value {
            Some(text) => param.info().parse_value(text, Notation::Spice).map_err(|source| {
                LibraryError::InvalidParamValue {
                    model: line.name.to_string(),
                    param: assign.name.to_string(),
                    source,
                }
            })?,
            None if param.info().ty == ValueType::Bool => {
                Value::Bool(true)
            }
            None => {
                log::warn!("model `{}`: `{}` is not a flag", line.name, assign.name);
                continue;
            }
        };
        model.params[index].set_value(value);
        if other_variant {
            model.params[index].set_other_variant(true);
        }
    }

    Ok(Some(LibraryEntry {
        name: ArcStr::from(line.name),
        model,
    }))
}

/// Resolves the library path stored in a component's fields.
pub trait LibrarySource {
    fn resolve(&self, path: &str) -> PathBuf;

    fn load(&self, path: &str) -> Result<Library> {
        Library::load(self.resolve(path))
    }
}

/// Resolves relative library paths against a project directory.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FsLibrarySource {
    project_dir: PathBuf,
}

impl FsLibrarySource {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }
}

impl LibrarySource for FsLibrarySource {
    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }
}
