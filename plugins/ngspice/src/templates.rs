use std::io::Write;

use lazy_static::lazy_static;
use serde::Serialize;
use simmodel::error::{ErrorSource, Result};
use tera::{Context, Tera};

pub(crate) const TEMPLATES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");

lazy_static! {
    pub(crate) static ref TEMPLATES: Tera = {
        match Tera::new(&format!("{TEMPLATES_PATH}/*")) {
            Ok(t) => t,
            Err(e) => {
                panic!("Encountered errors while parsing Tera templates: {e}");
            }
        }
    };
}

#[derive(Serialize)]
pub(crate) struct NetlistCtx<'a> {
    pub(crate) title: &'a str,
    pub(crate) includes: Vec<String>,
    pub(crate) models: Vec<String>,
    pub(crate) items: Vec<String>,
    pub(crate) directives: &'a [String],
    pub(crate) analyses: Vec<String>,
}

pub(crate) fn render_netlist(ctx: NetlistCtx<'_>, out: impl Write) -> Result<()> {
    let ctx = Context::from_serialize(ctx)
        .map_err(|e| ErrorSource::Internal(format!("template error: {e}")))?;

    TEMPLATES
        .render_to("netlist.spice", &ctx, out)
        .map_err(|e| ErrorSource::Internal(format!("template error: {e}")))?;

    Ok(())
}
