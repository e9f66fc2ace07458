//! I/O buffer models, emitted as a subcircuit per model.

use bitvec::vec::BitVec;

use crate::model::buffer::{DC_HIGH, DC_HI_Z};
use crate::model::{Model, ModelType};
use crate::netlist::{item_name, item_pins, line, SpiceGenerator};
use crate::units::format_float;
use crate::value::{Notation, Value, ValueType};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct BufferGenerator;

fn value(model: &Model, name: &str) -> Value {
    model
        .find_param(name)
        .map(|(_, param)| param.effective_value())
        .unwrap_or(Value::Unset(ValueType::Float))
}

fn float(model: &Model, name: &str) -> f64 {
    value(model, name).as_f64().unwrap_or(0.0)
}

fn spice(x: f64) -> String {
    format_float(x, Notation::Spice)
}

/// Bits of a maximal-length 7-bit shift register (x^7 + x^6 + 1).
pub(crate) fn prbs7(seed: i64, count: usize) -> BitVec {
    let mut state = (seed & 0x7f) as u8;
    if state == 0 {
        state = 1;
    }
    let mut bits = BitVec::with_capacity(count);
    for _ in 0..count {
        let bit = ((state >> 6) ^ (state >> 5)) & 1;
        state = ((state << 1) | bit) & 0x7f;
        bits.push(bit == 1);
    }
    bits
}

/// The driving source between the `drv` node and ground, if the buffer drives at all.
fn source(model: &Model) -> Option<String> {
    let vcc = float(model, "vcc");
    match model.model_type() {
        ModelType::BufferDevice => None,
        ModelType::BufferDriverDc => match value(model, "dc").as_str() {
            Some(DC_HIGH) => Some(format!("DC {}", spice(vcc))),
            Some(DC_HI_Z) | None => None,
            Some(_) => Some("DC 0".to_string()),
        },
        ModelType::BufferDriverRect => {
            let ton = float(model, "ton");
            let toff = float(model, "toff");
            let mut args = vec![
                "0".to_string(),
                spice(vcc),
                spice(float(model, "td")),
                spice(float(model, "tr")),
                spice(float(model, "tf")),
                spice(ton),
                spice(ton + toff),
            ];
            if let Some(n) = value(model, "n").as_i64() {
                args.push(n.to_string());
            }
            Some(format!("PULSE({})", args.join(" ")))
        }
        ModelType::BufferDriverPrbs => {
            let f0 = float(model, "f0");
            let period = if f0 > 0.0 { 1.0 / f0 } else { 0.0 };
            let td = float(model, "td");
            let count = value(model, "bits").as_i64().unwrap_or(0).max(0) as usize;
            let seed = value(model, "seed").as_i64().unwrap_or(1);

            let mut points = Vec::with_capacity(4 * count);
            for (k, bit) in prbs7(seed, count).iter().enumerate() {
                let start = td + k as f64 * period;
                let level = if *bit { spice(vcc) } else { "0".to_string() };
                points.push(spice(start));
                points.push(level.clone());
                points.push(spice(start + 0.9 * period));
                points.push(level);
            }
            Some(format!("PWL({})", points.join(" ")))
        }
        ty => panic!("buffer generator used for {ty:?}"),
    }
}

impl SpiceGenerator for BufferGenerator {
    fn model_line(&self, model: &Model, name: &str) -> String {
        let mut out = String::new();
        out.push_str(&line([".subckt", name, "pin", "gnd"]));
        out.push_str(&line(["RPIN", "pin", "pkg", spice(float(model, "rpin")).as_str()]));
        out.push_str(&line(["LPIN", "pkg", "die", spice(float(model, "lpin")).as_str()]));
        out.push_str(&line(["CPIN", "pin", "gnd", spice(float(model, "cpin")).as_str()]));
        out.push_str(&line(["CCOMP", "die", "gnd", spice(float(model, "c_comp")).as_str()]));
        if let Some(source) = source(model) {
            out.push_str(&line(["ROUT", "die", "drv", spice(float(model, "rout")).as_str()]));
            out.push_str(&line(["VDRV", "drv", "gnd", source.as_str()]));
        }
        out.push_str(&line([".ends", name]));
        out
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
        line(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorSource;
    use crate::model::buffer::MAX_PRBS_BITS;
    use crate::value::ParseError;

    #[test]
    fn test_prbs7_period() {
        let bits = prbs7(1, 254);
        assert_eq!(bits[..127], bits[127..]);
        assert_eq!(bits[..127].count_ones(), 64);
    }

    #[test]
    fn test_zero_seed_is_not_stuck() {
        assert!(prbs7(0, 16).any());
    }

    #[test]
    fn test_dc_high() {
        let mut model = Model::new(ModelType::BufferDriverDc);
        model.set_param_value_by_name("dc", "high").unwrap();
        let text = model.spice_generator().model_line("drv");
        assert!(text.starts_with(".subckt drv pin gnd\n"));
        assert!(text.contains("VDRV drv gnd DC 3.3\n"));
        assert!(text.contains("ROUT die drv 50\n"));
        assert!(text.ends_with(".ends drv\n"));
    }

    #[test]
    fn test_hi_z_has_no_driver() {
        let model = Model::new(ModelType::BufferDriverDc);
        let text = model.spice_generator().model_line("drv");
        assert!(!text.contains("VDRV"));
        assert!(text.contains("RPIN pin pkg 200m\n"));
    }

    #[test]
    fn test_rect_pulse() {
        let mut model = Model::new(ModelType::BufferDriverRect);
        model.set_param_value_by_name("ton", "2n").unwrap();
        model.set_param_value_by_name("toff", "2n").unwrap();
        model.set_param_value_by_name("n", "4").unwrap();
        let text = model.spice_generator().model_line("clk");
        assert!(text.contains("VDRV drv gnd PULSE(0 3.3 0 100p 100p 2n 4n 4)\n"));
    }

    #[test]
    fn test_prbs_bit_count_is_bounded() {
        let mut model = Model::new(ModelType::BufferDriverPrbs);
        let err = model.set_param_value_by_name("bits", "1G").unwrap_err();
        assert!(matches!(
            err.source(),
            ErrorSource::Parse(ParseError::OutOfRange { .. })
        ));
        assert!(!model.find_param("bits").unwrap().1.value().is_set());

        model
            .set_param_value_by_name("bits", &MAX_PRBS_BITS.to_string())
            .unwrap();
        let text = model.spice_generator().model_line("prbs");
        let pwl = text.lines().find(|l| l.starts_with("VDRV")).unwrap();
        let points = pwl.trim_start_matches("VDRV drv gnd PWL(").trim_end_matches(')');
        assert_eq!(
            points.split(' ').count(),
            4 * MAX_PRBS_BITS as usize
        );
    }
}
