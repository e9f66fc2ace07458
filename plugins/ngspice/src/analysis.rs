//! Analysis commands appended to an exported deck.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use simmodel::units::format_float;
use simmodel::value::Notation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Analysis {
    Op,
    Tran(TranAnalysis),
    Ac(AcAnalysis),
    Dc(DcAnalysis),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SweepMode {
    Dec,
    Oct,
    Lin,
}

#[derive(Debug, Clone, Builder, PartialEq, Serialize, Deserialize)]
pub struct DcAnalysis {
    /// The name of the source or parameter to sweep.
    #[builder(setter(into))]
    pub sweep: String,
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl DcAnalysis {
    #[inline]
    pub fn builder() -> DcAnalysisBuilder {
        DcAnalysisBuilder::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct TranAnalysis {
    pub stop: f64,
    pub step: f64,
    #[builder(default)]
    pub start: f64,
}

impl TranAnalysis {
    #[inline]
    pub fn builder() -> TranAnalysisBuilder {
        TranAnalysisBuilder::default()
    }
}

#[derive(Debug, Clone, Builder, PartialEq, Serialize, Deserialize)]
pub struct AcAnalysis {
    pub fstart: f64,
    pub fstop: f64,
    pub points: usize,
    pub sweep: SweepMode,
}

impl AcAnalysis {
    #[inline]
    pub fn builder() -> AcAnalysisBuilder {
        AcAnalysisBuilder::default()
    }
}

fn fmt_sweep_mode(mode: SweepMode) -> &'static str {
    match mode {
        SweepMode::Dec => "dec",
        SweepMode::Oct => "oct",
        SweepMode::Lin => "lin",
    }
}

fn num(x: f64) -> String {
    format_float(x, Notation::Spice)
}

/// The control line for one analysis, numbers in SPICE notation.
pub(crate) fn analysis_line(input: &Analysis) -> String {
    match input {
        Analysis::Op => String::from(".op"),
        Analysis::Tran(a) => format!(".tran {} {} {}", num(a.step), num(a.stop), num(a.start)),
        Analysis::Ac(a) => format!(
            ".ac {} {} {} {}",
            fmt_sweep_mode(a.sweep),
            a.points,
            num(a.fstart),
            num(a.fstop)
        ),
        Analysis::Dc(a) => format!(
            ".dc {} {} {} {}",
            a.sweep,
            num(a.start),
            num(a.stop),
            num(a.step)
        ),
    }
}
