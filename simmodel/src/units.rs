use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The text convention used when rendering or parsing numbers.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Notation {
    /// Metric prefixes as used in persisted fields, eg. `4.7k`, `10u`, `2M`.
    #[default]
    Si,
    /// SPICE engineering suffixes, eg. `4.7k`, `10u`, `2Meg`.
    Spice,
}

#[derive(
    Copy, Clone, Default, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum SiPrefix {
    Yocto,
    Zepto,
    Atto,
    Femto,
    Pico,
    Nano,
    Micro,
    Milli,
    #[default]
    None,
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
    Zetta,
    Yotta,
}

impl SiPrefix {
    pub fn multiplier(&self) -> f64 {
        match self {
            SiPrefix::Yocto => 1e-24,
            SiPrefix::Zepto => 1e-21,
            SiPrefix::Atto => 1e-18,
            SiPrefix::Femto => 1e-15,
            SiPrefix::Pico => 1e-12,
            SiPrefix::Nano => 1e-9,
            SiPrefix::Micro => 1e-6,
            SiPrefix::Milli => 1e-3,
            SiPrefix::None => 1e0,
            SiPrefix::Kilo => 1e3,
            SiPrefix::Mega => 1e6,
            SiPrefix::Giga => 1e9,
            SiPrefix::Tera => 1e12,
            SiPrefix::Peta => 1e15,
            SiPrefix::Exa => 1e18,
            SiPrefix::Zetta => 1e21,
            SiPrefix::Yotta => 1e24,
        }
    }

    /// The power of ten this prefix stands for.
    pub fn exponent(&self) -> i32 {
        match self {
            SiPrefix::Yocto => -24,
            SiPrefix::Zepto => -21,
            SiPrefix::Atto => -18,
            SiPrefix::Femto => -15,
            SiPrefix::Pico => -12,
            SiPrefix::Nano => -9,
            SiPrefix::Micro => -6,
            SiPrefix::Milli => -3,
            SiPrefix::None => 0,
            SiPrefix::Kilo => 3,
            SiPrefix::Mega => 6,
            SiPrefix::Giga => 9,
            SiPrefix::Tera => 12,
            SiPrefix::Peta => 15,
            SiPrefix::Exa => 18,
            SiPrefix::Zetta => 21,
            SiPrefix::Yotta => 24,
        }
    }

    pub fn from_exponent(exponent: i32) -> Option<Self> {
        Some(match exponent {
            -24 => SiPrefix::Yocto,
            -21 => SiPrefix::Zepto,
            -18 => SiPrefix::Atto,
            -15 => SiPrefix::Femto,
            -12 => SiPrefix::Pico,
            -9 => SiPrefix::Nano,
            -6 => SiPrefix::Micro,
            -3 => SiPrefix::Milli,
            0 => SiPrefix::None,
            3 => SiPrefix::Kilo,
            6 => SiPrefix::Mega,
            9 => SiPrefix::Giga,
            12 => SiPrefix::Tera,
            15 => SiPrefix::Peta,
            18 => SiPrefix::Exa,
            21 => SiPrefix::Zetta,
            24 => SiPrefix::Yotta,
            _ => return None,
        })
    }

    /// The suffix written for this prefix, or `None` if the notation has no such suffix.
    pub fn symbol(&self, notation: Notation) -> Option<&'static str> {
        match notation {
            Notation::Si => Some(match self {
                SiPrefix::Yocto => "y",
                SiPrefix::Zepto => "z",
                SiPrefix::Atto => "a",
                SiPrefix::Femto => "f",
                SiPrefix::Pico => "p",
                SiPrefix::Nano => "n",
                SiPrefix::Micro => "u",
                SiPrefix::Milli => "m",
                SiPrefix::None => "",
                SiPrefix::Kilo => "k",
                SiPrefix::Mega => "M",
                SiPrefix::Giga => "G",
                SiPrefix::Tera => "T",
                SiPrefix::Peta => "P",
                SiPrefix::Exa => "E",
                SiPrefix::Zetta => "Z",
                SiPrefix::Yotta => "Y",
            }),
            Notation::Spice => match self {
                SiPrefix::Femto => Some("f"),
                SiPrefix::Pico => Some("p"),
                SiPrefix::Nano => Some("n"),
                SiPrefix::Micro => Some("u"),
                SiPrefix::Milli => Some("m"),
                SiPrefix::None => Some(""),
                SiPrefix::Kilo => Some("k"),
                SiPrefix::Mega => Some("Meg"),
                SiPrefix::Giga => Some("G"),
                SiPrefix::Tera => Some("T"),
                _ => None,
            },
        }
    }

    fn from_si_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "y" => SiPrefix::Yocto,
            "z" => SiPrefix::Zepto,
            "a" => SiPrefix::Atto,
            "f" => SiPrefix::Femto,
            "p" => SiPrefix::Pico,
            "n" => SiPrefix::Nano,
            "u" | "µ" | "μ" => SiPrefix::Micro,
            "m" => SiPrefix::Milli,
            "" => SiPrefix::None,
            "k" | "K" => SiPrefix::Kilo,
            "M" => SiPrefix::Mega,
            "G" => SiPrefix::Giga,
            "T" => SiPrefix::Tera,
            "P" => SiPrefix::Peta,
            "E" => SiPrefix::Exa,
            "Z" => SiPrefix::Zetta,
            "Y" => SiPrefix::Yotta,
            _ => return None,
        })
    }
}

impl Display for SiPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Every prefix has an SI symbol.
        write!(f, "{}", self.symbol(Notation::Si).unwrap_or_default())
    }
}

/// Splits the leading decimal number (with optional exponent) from its suffix.
fn split_number(text: &str, allow_exponent: bool) -> Option<(&str, &str)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - digits_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return None;
    }
    if allow_exponent && i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    Some(text.split_at(i))
}

/// Combines a decimal number and a power of ten without going through a multiplication,
/// so that `1.5k` parses to exactly the same float as `1500`.
fn scale(number: &str, exponent: i32) -> Option<f64> {
    let (mantissa, own_exponent) = match number.find(['e', 'E']) {
        Some(pos) => (&number[..pos], number[pos + 1..].parse::<i32>().ok()?),
        None => (number, 0),
    };
    format!("{mantissa}e{}", own_exponent + exponent).parse().ok()
}

/// Parses a number followed by an optional metric prefix.
///
/// In [`Notation::Spice`] the suffix is case-insensitive, `meg` is mega, `mil` is a
/// thousandth of an inch, and any letters after a recognized suffix are treated as a unit.
pub fn parse_float(text: &str, notation: Notation) -> Option<f64> {
    let text = text.trim();
    if let Ok(special) = text.parse::<f64>() {
        return Some(special);
    }
    match notation {
        Notation::Si => {
            // `E` is the exa prefix, so an exponent must be followed by digits.
            let (number, suffix) = split_number(text, true)?;
            let prefix = SiPrefix::from_si_symbol(suffix)?;
            scale(number, prefix.exponent())
        }
        Notation::Spice => {
            let (number, suffix) = split_number(text, true)?;
            let lower = suffix.to_ascii_lowercase();
            if !lower.chars().all(|c| c.is_ascii_alphabetic()) {
                return None;
            }
            if lower.starts_with("meg") {
                scale(number, 6)
            } else if lower.starts_with("mil") {
                Some(scale(number, 0)? * 25.4e-6)
            } else {
                let exponent = match lower.chars().next() {
                    None => 0,
                    Some('f') => -15,
                    Some('p') => -12,
                    Some('n') => -9,
                    Some('u') => -6,
                    Some('m') => -3,
                    Some('k') => 3,
                    Some('g') => 9,
                    Some('t') => 12,
                    Some(_) => 0,
                };
                scale(number, exponent)
            }
        }
    }
}

/// Renders `value` exactly, moving the decimal point into engineering position.
///
/// Falls back to scientific notation when the notation has no prefix for the exponent.
pub fn format_float(value: f64, notation: Notation) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // Shortest representation that parses back to `value`.
    let sci = format!("{:e}", value.abs());
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let eng_exponent = exponent.div_euclid(3) * 3;
    let int_len = (exponent - eng_exponent) as usize + 1;
    let (int_part, frac_part) = if digits.len() > int_len {
        (digits[..int_len].to_string(), &digits[int_len..])
    } else {
        (format!("{:0<int_len$}", digits), "")
    };

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }

    let symbol = SiPrefix::from_exponent(eng_exponent).and_then(|p| p.symbol(notation));
    match symbol {
        Some(symbol) => out.push_str(symbol),
        None => out.push_str(&format!("e{eng_exponent}")),
    }
    out
}
