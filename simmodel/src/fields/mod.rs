//! Persistence of models in a component's named text fields.
//!
//! A model is stored either explicitly, through the `Sim.*` fields, or through the legacy
//! `Reference`/`Value` pair when it was inferred from them in the first place.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::deps::arcstr::ArcStr;
use crate::error::{with_err_context, ErrorContext, Result};
use crate::log;
use crate::model::pin::sorted_symbol_pins;
use crate::model::{
    inference, infer_type_from_ref_and_value, Direction, InferenceState, Model, ModelClass,
    ModelType, TypeMemory, NOT_CONNECTED,
};
use crate::value::{Notation, Value};
use tokens::PinToken;

pub use error::FieldError;

pub mod error;
pub(crate) mod tokens;

pub const DEVICE_FIELD: &str = "Sim.Device";
pub const TYPE_FIELD: &str = "Sim.Type";
pub const PINS_FIELD: &str = "Sim.Pins";
pub const PARAMS_FIELD: &str = "Sim.Params";
pub const ENABLE_FIELD: &str = "Sim.Enable";
pub const LIBRARY_FIELD: &str = "Sim.Library";
pub const NAME_FIELD: &str = "Sim.Name";
pub const REFERENCE_FIELD: &str = "Reference";
pub const VALUE_FIELD: &str = "Value";

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: ArcStr,
    pub text: String,
}

/// The ordered text fields of one component.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields {
    fields: Vec<Field>,
}

impl Fields {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text of field `name`, treating empty text as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.text.as_str())
            .filter(|text| !text.trim().is_empty())
    }

    /// Returns the text of field `name`, or the empty string.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    /// Sets field `name`, keeping its position. Empty text removes the field.
    pub fn set(&mut self, name: &str, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            self.remove(name);
            return;
        }
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => field.text = text,
            None => self.fields.push(Field {
                name: ArcStr::from(name),
                text,
            }),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.fields.retain(|field| field.name != name);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<N, T> FromIterator<(N, T)> for Fields
where
    N: AsRef<str>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (name, text) in iter {
            fields.set(name.as_ref(), text);
        }
        fields
    }
}

/// Which parameters a parameter field may set.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum ParamScope {
    All,
    /// Library instances: model parameters belong to the library and are ignored.
    InstanceOnly,
}

/// Selects the model type described by `fields`.
///
/// A device whose type field is empty and that has no plain variant falls back to the
/// type last chosen for that device. Without a device field the type is inferred from the
/// legacy reference and value.
pub fn read_type(fields: &Fields, last_types: &TypeMemory) -> std::result::Result<ModelType, FieldError> {
    let device_text = fields.text(DEVICE_FIELD).trim();
    let type_text = fields.text(TYPE_FIELD).trim();

    if device_text.is_empty() {
        let reference = fields.text(REFERENCE_FIELD);
        let value = fields.text(VALUE_FIELD);
        return infer_type_from_ref_and_value(reference, value).ok_or_else(|| {
            FieldError::CannotInferType {
                reference: reference.to_string(),
                value: value.to_string(),
            }
        });
    }

    let device = crate::model::DeviceType::from_field(device_text)
        .ok_or_else(|| FieldError::UnknownDevice(device_text.to_string()))?;
    if let Some(ty) = ModelType::from_fields(device, type_text) {
        return Ok(ty);
    }
    if type_text.is_empty() {
        return Ok(last_types.get(device));
    }
    Err(FieldError::UnknownType {
        device: device_text.to_string(),
        ty: type_text.to_string(),
    })
}

pub(crate) fn read_enable(fields: &Fields) -> bool {
    !matches!(
        fields.text(ENABLE_FIELD).trim().to_ascii_lowercase().as_str(),
        "0" | "n" | "no" | "false"
    )
}

/// Decodes a model from `fields` for a symbol with the given pin numbers.
pub fn decode<S: AsRef<str>>(fields: &Fields, symbol_pins: &[S]) -> Result<Model> {
    decode_with(fields, symbol_pins, &TypeMemory::default())
}

/// Like [`decode`], resolving device-only fields through the session's type memory.
pub fn decode_with<S: AsRef<str>>(
    fields: &Fields,
    symbol_pins: &[S],
    last_types: &TypeMemory,
) -> Result<Model> {
    let ty = with_err_context(read_type(fields, last_types), || {
        ErrorContext::DecodeField(ArcStr::from(DEVICE_FIELD))
    })?;

    let mut model = Model::with_symbol_pin_count(ty, symbol_pins.len());
    model.set_enabled(read_enable(fields));

    match fields.get(PARAMS_FIELD) {
        Some(text) => with_err_context(apply_params(&mut model, text, ParamScope::All), || {
            ErrorContext::DecodeField(ArcStr::from(PARAMS_FIELD))
        })?,
        None => {
            inference::apply(
                &mut model,
                fields.text(REFERENCE_FIELD),
                fields.text(VALUE_FIELD),
            );
        }
    }

    with_err_context(
        apply_pins(&mut model, fields.get(PINS_FIELD), symbol_pins),
        || ErrorContext::DecodeField(ArcStr::from(PINS_FIELD)),
    )?;

    model.run_autofill();
    Ok(model)
}

/// Applies a parameter field. Either every value is applied or none is.
pub(crate) fn apply_params(
    model: &mut Model,
    text: &str,
    scope: ParamScope,
) -> std::result::Result<(), FieldError> {
    let pairs = tokens::params(text).ok_or_else(|| FieldError::MalformedParams {
        text: text.to_string(),
    })?;

    let mut values = Vec::with_capacity(pairs.len());
    for (name, value) in pairs {
        let (index, param) = model
            .find_param(name)
            .ok_or_else(|| FieldError::UnknownParam(name.to_string()))?;
        let info = param.info();
        if info.dir == Direction::Out {
            log::warn!("ignoring computed parameter `{}` found in fields", name);
            continue;
        }
        if scope == ParamScope::InstanceOnly && !info.is_instance_param {
            log::debug!("ignoring override of model parameter `{}`", name);
            continue;
        }
        let value = info
            .parse_value(&value, Notation::Si)
            .map_err(|source| FieldError::InvalidParamValue {
                name: name.to_string(),
                source,
            })?;
        values.push((index, value));
    }

    for (index, value) in values {
        model.params[index].set_value(value);
    }
    Ok(())
}

fn resolve_model_pin(model: &Model, token: &str) -> std::result::Result<usize, FieldError> {
    if let Ok(number) = token.parse::<usize>() {
        if (1..=model.pin_count()).contains(&number) {
            return Ok(number - 1);
        }
    }
    model
        .pins()
        .iter()
        .position(|pin| pin.name().as_str() == token)
        .or_else(|| {
            model
                .pins()
                .iter()
                .position(|pin| pin.name().eq_ignore_ascii_case(token))
        })
        .ok_or_else(|| FieldError::UnknownPin(token.to_string()))
}

/// Applies a pin field, or the default mapping onto the sorted symbol pins when absent.
pub(crate) fn apply_pins<S: AsRef<str>>(
    model: &mut Model,
    text: Option<&str>,
    symbol_pins: &[S],
) -> std::result::Result<(), FieldError> {
    model.default_pins = sorted_symbol_pins(symbol_pins);
    let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) else {
        for (pin, number) in model.pins.iter_mut().zip(&model.default_pins) {
            pin.set_symbol_pin_number(Some(number.clone()));
        }
        return Ok(());
    };

    let malformed = || FieldError::MalformedPins {
        text: text.to_string(),
    };
    let tokens = tokens::pins(text).ok_or_else(malformed)?;

    let mut assignments: Vec<(usize, Option<&str>)> = Vec::with_capacity(tokens.len());
    if tokens.iter().all(|t| matches!(t, PinToken::Positional(_))) {
        if tokens.len() > model.pin_count() {
            log::warn!(
                "pin field lists {} pins for a model with {}; ignoring the rest",
                tokens.len(),
                model.pin_count()
            );
        }
        for (index, token) in tokens.iter().take(model.pin_count()).enumerate() {
            if let PinToken::Positional(number) = token {
                assignments.push((index, Some(*number)));
            }
        }
    } else if tokens.iter().all(|t| matches!(t, PinToken::Assign(..))) {
        for token in tokens.iter() {
            if let PinToken::Assign(pin, number) = token {
                assignments.push((resolve_model_pin(model, pin)?, Some(*number)));
            }
        }
    } else {
        return Err(malformed());
    }

    for pin in model.pins.iter_mut() {
        pin.set_symbol_pin_number(None);
    }
    for (index, number) in assignments {
        // Indices were checked above.
        let _ = model.set_pin_symbol_pin_number(index, number);
    }
    Ok(())
}

/// Writes an instance model into `fields`.
pub fn encode(model: &Model, fields: &mut Fields) {
    match model.inference_state() {
        InferenceState::Inferred => write_inferred(model, fields),
        InferenceState::Explicit => write_explicit(model, None, fields),
    }
    write_enable(model, fields);
}

/// Writes a model instantiated from library model `base` into `fields`.
///
/// Only instance parameters that differ from the base are stored.
pub fn encode_with_base(model: &Model, base: &Model, fields: &mut Fields) {
    write_explicit(model, Some(base), fields);
    write_enable(model, fields);
}

/// Records the library file and model name a component uses.
pub fn encode_library_ref(fields: &mut Fields, path: &str, name: &str) {
    fields.set(LIBRARY_FIELD, path);
    fields.set(NAME_FIELD, name);
}

fn write_enable(model: &Model, fields: &mut Fields) {
    if model.is_enabled() {
        fields.remove(ENABLE_FIELD);
    } else {
        fields.set(ENABLE_FIELD, "0");
    }
}

fn write_type(model: &Model, fields: &mut Fields) {
    fields.set(DEVICE_FIELD, model.device_type().field());
    fields.set(TYPE_FIELD, model.model_type().field());
}

fn param_entry(name: &str, value: &Value) -> String {
    format!("{}={}", name, tokens::quote(&value.render(Notation::Si)))
}

fn write_explicit(model: &Model, base: Option<&Model>, fields: &mut Fields) {
    write_type(model, fields);

    let mut entries: Vec<String> = match base {
        Some(base) => model
            .params()
            .iter()
            .zip(base.params())
            .filter(|(param, _)| {
                param.info().is_instance_param && param.info().dir != Direction::Out
            })
            .filter(|(param, base)| param.value() != base.value())
            .map(|(param, _)| param_entry(param.name(), param.value()))
            .collect(),
        None => model
            .params()
            .iter()
            .filter(|param| param.info().dir != Direction::Out && param.value().is_set())
            .map(|param| param_entry(param.name(), param.value()))
            .collect(),
    };

    // An explicit entry keeps an unset value from being re-inferred from a stale `Value`.
    let inferable = matches!(
        model.model_type().class(),
        ModelClass::Ideal | ModelClass::Behavioral
    );
    if entries.is_empty() && base.is_none() && inferable {
        entries.push(param_entry(model.params()[0].name(), model.params()[0].value()));
    }
    fields.set(PARAMS_FIELD, entries.join(" "));

    write_pins(model, fields);
}

fn write_pins(model: &Model, fields: &mut Fields) {
    if model.pin_count() == 0 {
        fields.remove(PINS_FIELD);
        return;
    }
    let text = if model.pins().iter().any(|pin| pin.is_connected()) {
        model
            .pins()
            .iter()
            .filter_map(|pin| {
                pin.symbol_pin_number()
                    .map(|number| format!("{}={}", pin.index() + 1, number))
            })
            .join(" ")
    } else {
        vec![NOT_CONNECTED; model.pin_count()].join(" ")
    };
    fields.set(PINS_FIELD, text);
}

/// Whether decoding without a pin field would reproduce the current wiring.
fn has_default_pins(model: &Model) -> bool {
    model
        .pins()
        .iter()
        .all(|pin| pin.symbol_pin_number() == model.default_pins.get(pin.index()))
}

fn write_inferred(model: &Model, fields: &mut Fields) {
    let rendered = model.params()[0].render(Notation::Si);
    let value = match (rendered.is_empty(), model.model_type().class()) {
        (true, _) => model.device_type().field().to_string(),
        (false, ModelClass::Behavioral) => format!("={rendered}"),
        (false, _) => rendered,
    };

    let reinferred = infer_type_from_ref_and_value(fields.text(REFERENCE_FIELD), &value);
    fields.set(VALUE_FIELD, value);
    fields.remove(PARAMS_FIELD);

    if reinferred == Some(model.model_type()) {
        fields.remove(DEVICE_FIELD);
        fields.remove(TYPE_FIELD);
    } else {
        write_type(model, fields);
    }

    if has_default_pins(model) {
        fields.remove(PINS_FIELD);
    } else {
        write_pins(model, fields);
    }
}
