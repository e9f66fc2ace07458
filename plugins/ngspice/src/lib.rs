//! Export of component models as an ngspice deck.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use itertools::Itertools;
use simmodel::error::Result;
use simmodel::model::Model;

pub use analysis::{
    AcAnalysis, AcAnalysisBuilder, Analysis, DcAnalysis, DcAnalysisBuilder, SweepMode,
    TranAnalysis, TranAnalysisBuilder,
};
use templates::{render_netlist as render_ctx, NetlistCtx};

pub mod analysis;
pub(crate) mod templates;

pub const NETLIST_FILE_NAME: &str = "netlist.spice";

/// One component of the exported circuit.
#[derive(Debug, Clone, Builder, PartialEq)]
pub struct NetlistItem {
    #[builder(setter(into))]
    pub reference: String,
    pub model: Model,
    /// Name of the `.model` card or subcircuit the item refers to.
    #[builder(setter(into), default)]
    pub model_name: String,
    /// Symbol pin numbers, in the same order as `net_names`.
    #[builder(default)]
    pub symbol_pins: Vec<String>,
    #[builder(default)]
    pub net_names: Vec<String>,
    /// Library file defining the model, included once per deck.
    #[builder(setter(into, strip_option), default)]
    pub library: Option<String>,
}

impl NetlistItem {
    #[inline]
    pub fn builder() -> NetlistItemBuilder {
        NetlistItemBuilder::default()
    }
}

#[derive(Debug, Clone, Default, Builder, PartialEq)]
pub struct NetlistInput {
    #[builder(setter(into), default)]
    pub title: String,
    #[builder(default)]
    pub items: Vec<NetlistItem>,
    /// Extra files included ahead of any library.
    #[builder(default)]
    pub includes: Vec<String>,
    /// Control lines written verbatim before the analyses.
    #[builder(default)]
    pub directives: Vec<String>,
    #[builder(default)]
    pub analyses: Vec<Analysis>,
}

impl NetlistInput {
    #[inline]
    pub fn builder() -> NetlistInputBuilder {
        NetlistInputBuilder::default()
    }
}

fn netlist_ctx(input: &NetlistInput) -> NetlistCtx<'_> {
    let enabled = input
        .items
        .iter()
        .filter(|item| {
            if !item.model.is_enabled() {
                log::debug!("omitting disabled component {}", item.reference);
            }
            item.model.is_enabled()
        })
        .collect::<Vec<_>>();

    let includes = input
        .includes
        .iter()
        .cloned()
        .chain(enabled.iter().flat_map(|item| {
            let generator = item.model.spice_generator();
            item.library.iter().cloned().chain(generator.includes())
        }))
        .unique()
        .collect();

    let mut defined = HashSet::new();
    let models = enabled
        .iter()
        .map(|item| {
            let line = item.model.spice_generator().model_line(&item.model_name);
            (item.model_name.as_str(), line)
        })
        .filter(|(name, line)| !line.is_empty() && defined.insert(*name))
        .map(|(_, line)| line)
        .collect();

    let items = enabled
        .iter()
        .map(|item| {
            item.model.spice_generator().item_line(
                &item.reference,
                &item.model_name,
                &item.symbol_pins,
                &item.net_names,
            )
        })
        .filter(|line| !line.is_empty())
        .collect();

    NetlistCtx {
        title: &input.title,
        includes,
        models,
        items,
        directives: &input.directives,
        analyses: input.analyses.iter().map(analysis::analysis_line).collect(),
    }
}

/// Writes the deck for `input` to `out`.
pub fn render_netlist(input: &NetlistInput, out: impl Write) -> Result<()> {
    render_ctx(netlist_ctx(input), out)
}

/// Writes the deck for `input` to `netlist.spice` in `work_dir` and returns its path.
pub fn write_netlist(input: &NetlistInput, work_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let work_dir = work_dir.as_ref();
    simmodel::io::create_dir_all(work_dir)?;
    let path = work_dir.join(NETLIST_FILE_NAME);
    let file = simmodel::io::create_file(&path)?;
    render_netlist(input, file)?;
    Ok(path)
}
