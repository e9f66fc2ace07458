//! Simulation models: typed parameters and pins bound to a netlist generator.

use std::sync::Arc;

use crate::deps::arcstr::ArcStr;
use crate::error::{ErrorSource, Result};
use crate::netlist::{Generator, SpiceGen};
use crate::value::{Notation, Value, ValueType};

pub use inference::{infer_type_from_ref_and_value, InferenceState};
pub use param::{Category, Direction, Param, ParamInfo};
pub use pin::{str_num_cmp, Pin, NOT_CONNECTED};
pub use types::{DeviceType, ModelClass, ModelType, TypeMemory};

pub(crate) mod behavioral;
pub(crate) mod buffer;
pub(crate) mod diode;
pub(crate) mod ideal;
pub mod inference;
pub mod param;
pub mod pin;
pub(crate) mod raw_spice;
pub(crate) mod subckt;
pub mod types;

#[cfg(test)]
mod tests;

#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    ty: ModelType,
    pub(crate) params: Vec<Param>,
    pub(crate) pins: Vec<Pin>,
    /// Sorted symbol pins the model was last bound to; an absent pin field maps onto these.
    pub(crate) default_pins: Vec<ArcStr>,
    generator: Generator,
    enabled: bool,
    pub(crate) inference: InferenceState,
    edited: bool,
}

fn catalog(ty: ModelType) -> &'static [Arc<ParamInfo>] {
    match ty.class() {
        ModelClass::Ideal => ideal::params(ty),
        ModelClass::Behavioral => behavioral::params(ty),
        ModelClass::Spice => diode::params(),
        ModelClass::Buffer => buffer::params(ty),
        ModelClass::RawSpice => raw_spice::params(),
        ModelClass::Subckt => &[],
    }
}

impl Model {
    /// Creates a model with every parameter unset and every pin unassigned.
    pub fn new(ty: ModelType) -> Self {
        let pin_names = ty.pin_names().iter().map(|name| ArcStr::from(*name));
        Self::with_layout(ty, catalog(ty).to_vec(), pin_names)
    }

    /// Creates a model whose pin count follows the symbol.
    ///
    /// Only raw elements take their pins from the symbol; pins are named `1..=n`.
    pub fn with_symbol_pin_count(ty: ModelType, count: usize) -> Self {
        if ty == ModelType::RawSpice {
            let pin_names = (1..=count).map(|i| ArcStr::from(i.to_string()));
            Self::with_layout(ty, catalog(ty).to_vec(), pin_names)
        } else {
            Self::new(ty)
        }
    }

    /// Creates a model with an explicit parameter and pin layout.
    ///
    /// Only subcircuit models take a layout from outside the built-in catalogs.
    pub(crate) fn with_layout(
        ty: ModelType,
        params: Vec<Arc<ParamInfo>>,
        pin_names: impl IntoIterator<Item = ArcStr>,
    ) -> Self {
        let mut model = Self {
            ty,
            params: params.into_iter().map(Param::new).collect(),
            pins: pin_names
                .into_iter()
                .enumerate()
                .map(|(i, name)| Pin::new(i, name))
                .collect(),
            default_pins: Vec::new(),
            generator: Generator::for_class(ty.class()),
            enabled: true,
            inference: InferenceState::Explicit,
            edited: false,
        };
        model.autofill();
        model
    }

    #[inline]
    pub fn model_type(&self) -> ModelType {
        self.ty
    }

    #[inline]
    pub fn device_type(&self) -> DeviceType {
        self.ty.device_type()
    }

    #[inline]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn param(&self, index: usize) -> Result<&Param> {
        self.params.get(index).ok_or_else(|| {
            ErrorSource::ParamIndexOutOfBounds {
                index,
                count: self.params.len(),
            }
            .into()
        })
    }

    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Finds a parameter by name, ignoring case.
    pub fn find_param(&self, name: &str) -> Option<(usize, &Param)> {
        self.params
            .iter()
            .enumerate()
            .find(|(_, param)| param.name().eq_ignore_ascii_case(name))
    }

    /// Parses `text` into parameter `index`.
    ///
    /// On success the model is marked edited and explicit, and dependent parameters are
    /// recomputed. On failure the model is unchanged.
    pub fn set_param_value(&mut self, index: usize, text: &str) -> Result<()> {
        let param = self.param(index)?;
        if param.info().dir == Direction::Out {
            return Err(ErrorSource::ReadOnlyParam(param.name().clone()).into());
        }
        self.assign_param(index, text, Notation::Si)?;
        self.edited = true;
        self.inference = InferenceState::Explicit;
        self.autofill();
        Ok(())
    }

    pub fn set_param_value_by_name(&mut self, name: &str, text: &str) -> Result<()> {
        let (index, _) = self
            .find_param(name)
            .ok_or_else(|| ErrorSource::ParamNotFound(ArcStr::from(name)))?;
        self.set_param_value(index, text)
    }

    /// Selects which default of parameter `index` is authoritative.
    pub fn set_param_other_variant(
        &mut self,
        index: usize,
        is_other_variant: bool,
    ) -> Result<()> {
        self.param(index)?;
        self.params[index].set_other_variant(is_other_variant);
        Ok(())
    }

    /// Parses and stores a value without touching the edit and inference state.
    pub(crate) fn assign_param(
        &mut self,
        index: usize,
        text: &str,
        notation: Notation,
    ) -> Result<()> {
        let value = self.param(index)?.info().parse_value(text, notation)?;
        self.params[index].set_value(value);
        Ok(())
    }

    #[inline]
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    pub fn pin(&self, index: usize) -> Result<&Pin> {
        self.pins.get(index).ok_or_else(|| {
            ErrorSource::PinIndexOutOfBounds {
                index,
                count: self.pins.len(),
            }
            .into()
        })
    }

    #[inline]
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Wires model pin `index` to a symbol pin, or disconnects it with `None`.
    ///
    /// A symbol pin is held by at most one model pin, so any other model pin holding
    /// `number` is disconnected first.
    pub fn set_pin_symbol_pin_number(&mut self, index: usize, number: Option<&str>) -> Result<()> {
        self.pin(index)?;
        let number = number
            .map(str::trim)
            .filter(|n| !n.is_empty() && *n != NOT_CONNECTED)
            .map(ArcStr::from);

        if let Some(number) = &number {
            for pin in self.pins.iter_mut() {
                if pin.index() != index && pin.symbol_pin_number() == Some(number) {
                    pin.set_symbol_pin_number(None);
                }
            }
        }
        self.pins[index].set_symbol_pin_number(number);
        Ok(())
    }

    /// Disconnects pins wired to symbol pins that no longer exist.
    ///
    /// Returns the number of pins disconnected.
    pub fn remove_orphaned_pin_assignments<S: AsRef<str>>(&mut self, symbol_pins: &[S]) -> usize {
        let mut removed = 0;
        for pin in self.pins.iter_mut() {
            let orphaned = match pin.symbol_pin_number() {
                Some(number) => !symbol_pins.iter().any(|p| p.as_ref() == number.as_str()),
                None => false,
            };
            if orphaned {
                pin.set_symbol_pin_number(None);
                removed += 1;
            }
        }
        removed
    }

    /// Whether setting one parameter may change others.
    pub fn has_autofill(&self) -> bool {
        self.ty == ModelType::BufferDriverRect
    }

    fn autofill(&mut self) {
        if !self.has_autofill() {
            return;
        }
        let period = |model: &Self, name: &str| {
            model
                .find_param(name)
                .and_then(|(_, param)| param.effective_value().as_f64())
        };
        let f = match (period(self, "ton"), period(self, "toff")) {
            (Some(ton), Some(toff)) if ton + toff > 0.0 => Value::Float(1.0 / (ton + toff)),
            _ => Value::Unset(ValueType::Float),
        };
        if let Some((index, _)) = self.find_param("f") {
            self.params[index].set_value(f);
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[inline]
    pub fn inference_state(&self) -> InferenceState {
        self.inference
    }

    #[inline]
    pub fn is_inferred(&self) -> bool {
        self.inference == InferenceState::Inferred
    }

    /// Whether a parameter was changed through [`Model::set_param_value`].
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    /// Whether any model (non-instance) parameter differs from `base`.
    pub fn has_non_instance_overrides(&self, base: &Model) -> bool {
        self.params
            .iter()
            .zip(base.params.iter())
            .any(|(param, base)| !param.info().is_instance_param && param.value() != base.value())
    }

    /// The netlist generator bound to this model.
    pub fn spice_generator(&self) -> SpiceGen<'_> {
        SpiceGen::new(self, &self.generator)
    }

    pub(crate) fn run_autofill(&mut self) {
        self.autofill();
    }
}
