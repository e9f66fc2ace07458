//! Instances of library subcircuits.

use crate::model::Model;
use crate::netlist::{item_name, item_pins, line, SpiceGenerator};
use crate::value::Notation;

/// Generator for subcircuits defined in an included library.
///
/// Only parameters that differ from the definition's defaults are passed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SubcktGenerator;

impl SpiceGenerator for SubcktGenerator {
    fn model_line(&self, _model: &Model, _name: &str) -> String {
        String::new()
    }

    fn item_line(
        &self,
        model: &Model,
        reference: &str,
        name: &str,
        symbol_pin_numbers: &[&str],
        net_names: &[&str],
    ) -> String {
        let mut parts = vec![item_name("X", reference)];
        parts.extend(item_pins(model, reference, symbol_pin_numbers, net_names));
        parts.push(name.to_string());
        parts.extend(
            model
                .params()
                .iter()
                .filter(|param| param.value().is_set() && *param.value() != param.default_value())
                .map(|param| format!("{}={}", param.name(), param.render(Notation::Spice))),
        );
        line(parts)
    }
}
