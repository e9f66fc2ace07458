//! Elements driven by an arbitrary expression.

use crate::model::{Model, ModelType};
use crate::netlist::{item_name, item_pins, line, SpiceGenerator};
use crate::value::Notation;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct BehavioralGenerator;

impl SpiceGenerator for BehavioralGenerator {
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
        let expr = model.params()[0].render(Notation::Si);
        let expr = expr.trim();
        if expr.is_empty() {
            return String::new();
        }

        // Sources become arbitrary `B` sources; passives take the expression as their value.
        let (prefix, value) = match model.model_type() {
            ModelType::RBehavioral | ModelType::CBehavioral | ModelType::LBehavioral => {
                (model.device_type().field(), expr.to_string())
            }
            ModelType::VBehavioral => ("B", format!("V={expr}")),
            ModelType::IBehavioral => ("B", format!("I={expr}")),
            ty => panic!("behavioral generator used for {ty:?}"),
        };

        let mut parts = vec![item_name(prefix, reference)];
        parts.extend(item_pins(model, reference, symbol_pin_numbers, net_names));
        parts.push(value);
        line(parts)
    }
}
