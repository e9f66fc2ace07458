//! Typed parameter values and their text forms.

use std::fmt::Display;

use num::complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::units::{format_float, parse_float};

pub use crate::units::Notation;
pub use error::ParseError;

pub mod error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    Complex,
    String,
    BoolVector,
    IntVector,
    FloatVector,
    ComplexVector,
}

impl ValueType {
    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            ValueType::BoolVector
                | ValueType::IntVector
                | ValueType::FloatVector
                | ValueType::ComplexVector
        )
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Complex => "complex",
            ValueType::String => "string",
            ValueType::BoolVector => "bool vector",
            ValueType::IntVector => "int vector",
            ValueType::FloatVector => "float vector",
            ValueType::ComplexVector => "complex vector",
        };
        write!(f, "{s}")
    }
}

/// A parameter value.
///
/// Empty text parses to [`Value::Unset`], which is distinct from zero and renders
/// back to empty text.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Unset(ValueType),
    Bool(bool),
    Int(i64),
    Float(f64),
    Complex(Complex64),
    String(String),
    BoolVector(Vec<bool>),
    IntVector(Vec<i64>),
    FloatVector(Vec<f64>),
    ComplexVector(Vec<Complex64>),
}

impl Value {
    pub fn parse(ty: ValueType, text: &str, notation: Notation) -> Result<Self, ParseError> {
        if text.trim().is_empty() {
            return Ok(Value::Unset(ty));
        }
        let invalid = || ParseError::invalid(ty, text);

        Ok(match ty {
            ValueType::Bool => Value::Bool(parse_bool(text).ok_or_else(invalid)?),
            ValueType::Int => Value::Int(parse_int(ty, text, notation)?),
            ValueType::Float => Value::Float(parse_float(text, notation).ok_or_else(invalid)?),
            ValueType::Complex => {
                Value::Complex(parse_complex(text, notation).ok_or_else(invalid)?)
            }
            ValueType::String => Value::String(text.to_string()),
            ValueType::BoolVector => Value::BoolVector(
                elements(text)
                    .map(|e| parse_bool(e).ok_or_else(invalid))
                    .collect::<Result<_, _>>()?,
            ),
            ValueType::IntVector => Value::IntVector(
                elements(text)
                    .map(|e| parse_int(ty, e, notation))
                    .collect::<Result<_, _>>()?,
            ),
            ValueType::FloatVector => Value::FloatVector(
                elements(text)
                    .map(|e| parse_float(e, notation).ok_or_else(invalid))
                    .collect::<Result<_, _>>()?,
            ),
            ValueType::ComplexVector => Value::ComplexVector(
                elements(text)
                    .map(|e| parse_complex(e, notation).ok_or_else(invalid))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    pub fn render(&self, notation: Notation) -> String {
        match self {
            Value::Unset(_) => String::new(),
            Value::Bool(b) => render_bool(*b).to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(x) => format_float(*x, notation),
            Value::Complex(c) => render_complex(*c, notation),
            Value::String(s) => s.clone(),
            Value::BoolVector(v) => v.iter().map(|b| render_bool(*b)).collect::<Vec<_>>().join(" "),
            Value::IntVector(v) => v.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(" "),
            Value::FloatVector(v) => v
                .iter()
                .map(|x| format_float(*x, notation))
                .collect::<Vec<_>>()
                .join(" "),
            Value::ComplexVector(v) => v
                .iter()
                .map(|c| render_complex(*c, notation))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Unset(ty) => *ty,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Complex(_) => ValueType::Complex,
            Value::String(_) => ValueType::String,
            Value::BoolVector(_) => ValueType::BoolVector,
            Value::IntVector(_) => ValueType::IntVector,
            Value::FloatVector(_) => ValueType::FloatVector,
            Value::ComplexVector(_) => ValueType::ComplexVector,
        }
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        !matches!(self, Value::Unset(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

fn elements(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|e| !e.is_empty())
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn render_bool(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

fn parse_int(ty: ValueType, text: &str, notation: Notation) -> Result<i64, ParseError> {
    let text = text.trim();
    if let Ok(i) = text.parse::<i64>() {
        return Ok(i);
    }
    let x = parse_float(text, notation).ok_or_else(|| ParseError::invalid(ty, text))?;
    if x.fract() != 0.0 || !x.is_finite() {
        return Err(ParseError::invalid(ty, text));
    }
    if x.abs() > (1i64 << 53) as f64 {
        return Err(ParseError::OutOfRange {
            ty,
            text: text.to_string(),
        });
    }
    Ok(x as i64)
}

fn parse_complex(text: &str, notation: Notation) -> Option<Complex64> {
    let text = text.trim();
    let Some(body) = text.strip_suffix(['j', 'i']) else {
        return Some(Complex64::new(parse_float(text, notation)?, 0.0));
    };

    // The real and imaginary parts are split at the last sign that is not part of an exponent.
    let split = body
        .char_indices()
        .filter(|(i, c)| (*c == '+' || *c == '-') && *i > 0)
        .filter(|(i, _)| !matches!(body[..*i].chars().last(), Some('e' | 'E')))
        .map(|(i, _)| i)
        .last();

    match split {
        Some(i) => {
            let re = parse_float(&body[..i], notation)?;
            let im = match &body[i..] {
                "+" => 1.0,
                "-" => -1.0,
                im => parse_float(im, notation)?,
            };
            Some(Complex64::new(re, im))
        }
        None => {
            let im = match body {
                "" | "+" => 1.0,
                "-" => -1.0,
                im => parse_float(im, notation)?,
            };
            Some(Complex64::new(0.0, im))
        }
    }
}

fn render_complex(c: Complex64, notation: Notation) -> String {
    let mut re = format_float(c.re, notation);
    // A trailing exa prefix would read as an exponent marker before the imaginary sign.
    if re.ends_with('E') {
        re = format!("{:e}", c.re);
    }
    let im = format_float(c.im, notation);
    if c.im < 0.0 {
        format!("{re}{im}j")
    } else {
        format!("{re}+{im}j")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_unset() {
        let value = Value::parse(ValueType::Float, "  ", Notation::Si).unwrap();
        assert_eq!(value, Value::Unset(ValueType::Float));
        assert_eq!(value.render(Notation::Si), "");
        assert_ne!(value, Value::Float(0.0));
    }

    #[test]
    fn test_bool() {
        for text in ["1", "true", "Yes", "ON"] {
            assert_eq!(
                Value::parse(ValueType::Bool, text, Notation::Si).unwrap(),
                Value::Bool(true)
            );
        }
        assert_eq!(Value::Bool(false).render(Notation::Si), "0");
        assert!(Value::parse(ValueType::Bool, "maybe", Notation::Si).is_err());
    }

    #[test]
    fn test_int_with_prefix() {
        assert_eq!(
            Value::parse(ValueType::Int, "2k", Notation::Si).unwrap(),
            Value::Int(2000)
        );
        assert!(matches!(
            Value::parse(ValueType::Int, "1.5", Notation::Si),
            Err(ParseError::Invalid { .. })
        ));
    }

    #[test]
    fn test_complex() {
        let value = Value::parse(ValueType::Complex, "1k-2.5mj", Notation::Si).unwrap();
        assert_eq!(value, Value::Complex(Complex64::new(1e3, -2.5e-3)));
        assert_eq!(value.render(Notation::Si), "1k-2.5mj");
        assert_eq!(
            Value::parse(ValueType::Complex, "1e-3+2j", Notation::Si).unwrap(),
            Value::Complex(Complex64::new(1e-3, 2.0))
        );
        assert_eq!(
            Value::parse(ValueType::Complex, "3j", Notation::Si).unwrap(),
            Value::Complex(Complex64::new(0.0, 3.0))
        );

        let exa = Value::Complex(Complex64::new(1e18, -2.0));
        assert_eq!(exa.render(Notation::Si), "1e18-2j");
        assert_eq!(
            Value::parse(ValueType::Complex, &exa.render(Notation::Si), Notation::Si).unwrap(),
            exa
        );
    }

    #[test]
    fn test_vectors() {
        let value = Value::parse(ValueType::FloatVector, "1k, 2.2u 3", Notation::Si).unwrap();
        assert_eq!(value, Value::FloatVector(vec![1e3, 2.2e-6, 3.0]));
        assert_eq!(value.render(Notation::Si), "1k 2.2u 3");
        assert_eq!(
            Value::parse(ValueType::BoolVector, "1 0 1", Notation::Si).unwrap(),
            Value::BoolVector(vec![true, false, true])
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let cases = [
            (ValueType::Float, "4.7k"),
            (ValueType::Float, "0.000001"),
            (ValueType::Int, "-12"),
            (ValueType::Complex, "2+3j"),
            (ValueType::String, "SIN(0 5 1k)"),
            (ValueType::IntVector, "1,2,3"),
            (ValueType::ComplexVector, "1+1j 2-2j"),
            (ValueType::Complex, "1E-2j"),
            (ValueType::Complex, "1.5e18+3j"),
        ];
        for notation in [Notation::Si, Notation::Spice] {
            for (ty, text) in cases {
                let value = Value::parse(ty, text, notation).unwrap();
                let rendered = value.render(notation);
                assert_eq!(Value::parse(ty, &rendered, notation).unwrap(), value);
            }
        }
    }
}
