//! Netlist text generation for simulation models.

use enum_dispatch::enum_dispatch;

use crate::deps::arcstr::ArcStr;
use crate::model::{Model, ModelClass};

pub use impls::{
    BehavioralGenerator, BufferGenerator, DiodeGenerator, IdealGenerator, RawSpiceGenerator,
    SubcktGenerator,
};

pub mod impls;

/// Renders a model's current state as simulator text.
///
/// Every line ends in `\n`. An empty string means the model contributes nothing.
#[enum_dispatch]
pub trait SpiceGenerator {
    /// Returns the `.model`-style definition named `name`, possibly empty.
    fn model_line(&self, model: &Model, name: &str) -> String;

    /// Returns the instance line for one component.
    ///
    /// `net_names[i]` is the net attached to symbol pin `symbol_pin_numbers[i]`.
    fn item_line(
        &self,
        model: &Model,
        reference: &str,
        name: &str,
        symbol_pin_numbers: &[&str],
        net_names: &[&str],
    ) -> String;

    /// Files the netlist must include for this model.
    #[allow(unused_variables)]
    fn includes(&self, model: &Model) -> Vec<String> {
        Vec::new()
    }

    /// Shows the model and instance lines with each model pin on a net of its own name.
    fn preview(&self, model: &Model, reference: &str, name: &str) -> String {
        let mut shown = model.clone();
        let numbers: Vec<String> = (1..=shown.pin_count()).map(|i| i.to_string()).collect();
        for (pin, number) in shown.pins.iter_mut().zip(numbers.iter()) {
            pin.set_symbol_pin_number(Some(ArcStr::from(number.as_str())));
        }
        let numbers: Vec<&str> = numbers.iter().map(String::as_str).collect();
        let nets: Vec<&str> = shown.pins().iter().map(|pin| pin.name().as_str()).collect();
        format!(
            "{}{}",
            self.model_line(&shown, name),
            self.item_line(&shown, reference, name, &numbers, &nets)
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[enum_dispatch(SpiceGenerator)]
pub enum Generator {
    Ideal(IdealGenerator),
    Behavioral(BehavioralGenerator),
    Diode(DiodeGenerator),
    Buffer(BufferGenerator),
    Subckt(SubcktGenerator),
    RawSpice(RawSpiceGenerator),
}

impl Generator {
    pub fn for_class(class: ModelClass) -> Self {
        match class {
            ModelClass::Ideal => IdealGenerator.into(),
            ModelClass::Behavioral => BehavioralGenerator.into(),
            ModelClass::Spice => DiodeGenerator.into(),
            ModelClass::Buffer => BufferGenerator.into(),
            ModelClass::Subckt => SubcktGenerator.into(),
            ModelClass::RawSpice => RawSpiceGenerator.into(),
        }
    }
}

/// A model together with its generator.
#[derive(Copy, Clone, Debug)]
pub struct SpiceGen<'a> {
    model: &'a Model,
    generator: &'a Generator,
}

fn as_strs<S: AsRef<str>>(items: &[S]) -> Vec<&str> {
    items.iter().map(|item| item.as_ref()).collect()
}

impl<'a> SpiceGen<'a> {
    pub(crate) fn new(model: &'a Model, generator: &'a Generator) -> Self {
        Self { model, generator }
    }

    pub fn model_line(&self, name: &str) -> String {
        self.generator.model_line(self.model, name)
    }

    pub fn item_line<S, T>(
        &self,
        reference: &str,
        name: &str,
        symbol_pin_numbers: &[S],
        net_names: &[T],
    ) -> String
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        self.generator.item_line(
            self.model,
            reference,
            name,
            &as_strs(symbol_pin_numbers),
            &as_strs(net_names),
        )
    }

    pub fn includes(&self) -> Vec<String> {
        self.generator.includes(self.model)
    }

    pub fn preview(&self, reference: &str, name: &str) -> String {
        self.generator.preview(self.model, reference, name)
    }
}

/// The element name: `reference` if it already carries `prefix`, else `prefix` prepended.
pub(crate) fn item_name(prefix: &str, reference: &str) -> String {
    let carries_prefix = reference
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false);
    if carries_prefix {
        reference.to_string()
    } else {
        format!("{prefix}{reference}")
    }
}

/// The net attached to each model pin, in model pin order.
///
/// Pins that are unassigned, or whose symbol pin is missing, get a unique `NC-` net.
pub(crate) fn item_pins(
    model: &Model,
    reference: &str,
    symbol_pin_numbers: &[&str],
    net_names: &[&str],
) -> Vec<String> {
    let mut nc = 0;
    model
        .pins()
        .iter()
        .map(|pin| {
            let net = pin.symbol_pin_number().and_then(|number| {
                symbol_pin_numbers
                    .iter()
                    .position(|n| *n == number.as_str())
                    .and_then(|i| net_names.get(i))
            });
            match net {
                Some(net) => net.to_string(),
                None => {
                    let name = format!("NC-{reference}-{nc}");
                    nc += 1;
                    name
                }
            }
        })
        .collect()
}

/// Joins the parts of one netlist line.
pub(crate) fn line<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for part in parts {
        let part = part.as_ref();
        if part.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(part);
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelType;

    #[test]
    fn test_item_name() {
        assert_eq!(item_name("R", "R1"), "R1");
        assert_eq!(item_name("R", "r1"), "r1");
        assert_eq!(item_name("B", "V1"), "BV1");
        assert_eq!(item_name("X", ""), "X");
    }

    #[test]
    fn test_unassigned_pins_get_unique_nets() {
        let mut model = Model::new(ModelType::R);
        model.set_pin_symbol_pin_number(1, Some("2")).unwrap();
        let pins = item_pins(&model, "R7", &["1", "2"], &["A", "B"]);
        assert_eq!(pins, vec!["NC-R7-0", "B"]);
    }

    #[test]
    fn test_line_skips_empty_parts() {
        assert_eq!(line(["R1", "", "a", "b", "1k"]), "R1 a b 1k\n");
    }
}
