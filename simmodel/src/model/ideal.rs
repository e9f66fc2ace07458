use std::sync::Arc;

use lazy_static::lazy_static;

use super::param::ParamInfo;
use super::types::ModelType;
use crate::value::ValueType;

lazy_static! {
    static ref R_PARAMS: Vec<Arc<ParamInfo>> = vec![principal("r", "Resistance", "Ω")];
    static ref C_PARAMS: Vec<Arc<ParamInfo>> = vec![principal("c", "Capacitance", "F")];
    static ref L_PARAMS: Vec<Arc<ParamInfo>> = vec![principal("l", "Inductance", "H")];
}

fn principal(name: &str, description: &str, unit: &str) -> Arc<ParamInfo> {
    Arc::new(
        ParamInfo::new(name, ValueType::Float)
            .with_description(description)
            .with_unit(unit)
            .instance(),
    )
}

pub(crate) fn params(ty: ModelType) -> &'static [Arc<ParamInfo>] {
    match ty {
        ModelType::R => &R_PARAMS,
        ModelType::C => &C_PARAMS,
        ModelType::L => &L_PARAMS,
        _ => panic!("{ty:?} is not an ideal model type"),
    }
}
