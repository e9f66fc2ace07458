use std::sync::Arc;

use spicelib::parser::ParamAssign;

use super::param::ParamInfo;
use crate::value::ValueType;

/// Builds the instance parameters declared on a `.subckt` line.
///
/// Values are kept as text so that expressions survive unchanged.
pub(crate) fn params(declared: &[ParamAssign<'_>]) -> Vec<Arc<ParamInfo>> {
    declared
        .iter()
        .map(|param| {
            Arc::new(
                ParamInfo::new(param.name, ValueType::String)
                    .with_default(param.value.unwrap_or_default())
                    .instance(),
            )
        })
        .collect()
}
