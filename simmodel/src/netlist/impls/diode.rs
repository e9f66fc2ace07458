//! Devices described by a `.model` card.

use crate::model::{Direction, Model, Param};
use crate::netlist::{item_name, item_pins, line, SpiceGenerator};
use crate::value::{Notation, Value};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiodeGenerator;

/// Set parameters of the given kind, formatted for a netlist.
///
/// Boolean flags appear as their bare name when true and are omitted when false.
fn set_params(model: &Model, instance: bool) -> Vec<String> {
    model
        .params()
        .iter()
        .filter(|param| param.info().is_instance_param == instance)
        .filter(|param| param.info().dir != Direction::Out)
        .filter_map(format_param)
        .collect()
}

fn format_param(param: &Param) -> Option<String> {
    match param.value() {
        Value::Unset(_) => None,
        Value::Bool(true) => Some(param.name().to_string()),
        Value::Bool(false) => None,
        value => Some(format!("{}={}", param.name(), value.render(Notation::Spice))),
    }
}

impl SpiceGenerator for DiodeGenerator {
    fn model_line(&self, model: &Model, name: &str) -> String {
        format!(
            ".model {} {}({})\n",
            name,
            model.device_type().field(),
            set_params(model, false).join(" ")
        )
    }

    fn item_line(
        &self,
        model: &Model,
        reference: &str,
        name: &str,
        symbol_pin_numbers: &[&str],
        net_names: &[&str],
    ) -> String {
        let mut parts = vec![item_name(model.device_type().field(), reference)];
        parts.extend(item_pins(model, reference, symbol_pin_numbers, net_names));
        parts.push(name.to_string());
        parts.extend(set_params(model, true));
        line(parts)
    }
}
