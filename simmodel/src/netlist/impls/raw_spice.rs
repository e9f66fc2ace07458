//! Passthrough of hand-written SPICE elements.

use crate::model::raw_spice::{LIB_PARAM, MODEL_PARAM, TYPE_PARAM};
use crate::model::Model;
use crate::netlist::{item_name, item_pins, line, SpiceGenerator};
use crate::value::Notation;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct RawSpiceGenerator;

fn text(model: &Model, index: usize) -> String {
    model.params()[index].render(Notation::Si).trim().to_string()
}

impl SpiceGenerator for RawSpiceGenerator {
    fn model_line(&self, _model: &Model, _name: &str) -> String {
        String::new()
    }

    fn item_line(
        &self,
        model: &Model,
        reference: &str,
        _name: &str,
        symbol_pin_numbers: &[&str],
        net_names: &[&str],
    ) -> String {
        let prefix = match text(model, TYPE_PARAM) {
            ty if ty.is_empty() => "X".to_string(),
            ty => ty,
        };
        let mut parts = vec![item_name(&prefix, reference)];
        parts.extend(item_pins(model, reference, symbol_pin_numbers, net_names));
        parts.push(text(model, MODEL_PARAM));
        line(parts)
    }

    fn includes(&self, model: &Model) -> Vec<String> {
        match text(model, LIB_PARAM) {
            lib if lib.is_empty() => Vec::new(),
            lib => vec![lib],
        }
    }
}
