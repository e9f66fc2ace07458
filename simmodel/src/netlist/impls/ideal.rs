//! Ideal resistors, capacitors and inductors.

use crate::model::Model;
use crate::netlist::{item_name, item_pins, line, SpiceGenerator};
use crate::value::Notation;

/// Generator for ideal passives.
///
/// An unset value produces no line at all; there is no implicit default.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct IdealGenerator;

impl SpiceGenerator for IdealGenerator {
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
        let value = model.params()[0].render(Notation::Spice);
        if value.is_empty() {
            return String::new();
        }

        let mut parts = vec![item_name(model.device_type().field(), reference)];
        parts.extend(item_pins(model, reference, symbol_pin_numbers, net_names));
        parts.push(value);
        line(parts)
    }
}
