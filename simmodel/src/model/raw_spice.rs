use std::sync::Arc;

use lazy_static::lazy_static;

use super::param::ParamInfo;
use crate::value::ValueType;

pub(crate) const TYPE_PARAM: usize = 0;
pub(crate) const MODEL_PARAM: usize = 1;
pub(crate) const LIB_PARAM: usize = 2;

lazy_static! {
    static ref PARAMS: Vec<Arc<ParamInfo>> = vec![
        Arc::new(
            ParamInfo::new("type", ValueType::String)
                .with_description("Spice element type")
                .instance()
        ),
        Arc::new(
            ParamInfo::new("model", ValueType::String)
                .with_description("Model")
                .instance()
        ),
        Arc::new(
            ParamInfo::new("lib", ValueType::String)
                .with_description("Library path")
                .instance()
        ),
    ];
}

pub(crate) fn params() -> &'static [Arc<ParamInfo>] {
    &PARAMS
}
