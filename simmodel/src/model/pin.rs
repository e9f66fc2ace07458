use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::deps::arcstr::ArcStr;

/// Token used in pin fields for a model pin that is not connected.
pub const NOT_CONNECTED: &str = "~";

/// A model-side connection point.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Pin {
    index: usize,
    name: ArcStr,
    symbol_pin_number: Option<ArcStr>,
}

impl Pin {
    pub(crate) fn new(index: usize, name: impl Into<ArcStr>) -> Self {
        Self {
            index,
            name: name.into(),
            symbol_pin_number: None,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// The symbol pin this model pin is wired to, if any.
    #[inline]
    pub fn symbol_pin_number(&self) -> Option<&ArcStr> {
        self.symbol_pin_number.as_ref()
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.symbol_pin_number.is_some()
    }

    pub(crate) fn set_symbol_pin_number(&mut self, number: Option<ArcStr>) {
        self.symbol_pin_number = number;
    }
}

/// Compares strings so that embedded numbers sort by value, eg. `2 < 10` and `A2 < A10`.
pub fn str_num_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let mut na = String::new();
                while let Some(c) = a.next_if(|c| c.is_ascii_digit()) {
                    na.push(c);
                }
                let mut nb = String::new();
                while let Some(c) = b.next_if(|c| c.is_ascii_digit()) {
                    nb.push(c);
                }
                let ta = na.trim_start_matches('0');
                let tb = nb.trim_start_matches('0');
                let ord = ta.len().cmp(&tb.len()).then_with(|| ta.cmp(tb));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.to_ascii_uppercase().cmp(&y.to_ascii_uppercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                a.next();
                b.next();
            }
        }
    }
}

/// Returns the symbol pin numbers in natural order.
pub fn sorted_symbol_pins<S: AsRef<str>>(symbol_pins: &[S]) -> Vec<ArcStr> {
    let mut pins: Vec<ArcStr> = symbol_pins.iter().map(|p| ArcStr::from(p.as_ref())).collect();
    pins.sort_by(|a, b| str_num_cmp(a, b));
    pins
}
