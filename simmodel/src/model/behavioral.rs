use std::sync::Arc;

use lazy_static::lazy_static;

use super::param::ParamInfo;
use super::types::ModelType;
use crate::value::ValueType;

lazy_static! {
    static ref R_PARAMS: Vec<Arc<ParamInfo>> = vec![expression("r", "Expression for resistance", "Ω")];
    static ref C_PARAMS: Vec<Arc<ParamInfo>> = vec![expression("c", "Expression for capacitance", "F")];
    static ref L_PARAMS: Vec<Arc<ParamInfo>> = vec![expression("l", "Expression for inductance", "H")];
    static ref V_PARAMS: Vec<Arc<ParamInfo>> = vec![expression("v", "Expression for voltage", "V")];
    static ref I_PARAMS: Vec<Arc<ParamInfo>> = vec![expression("i", "Expression for current", "A")];
}

/// Behavioral parameters hold free-form expressions rather than numbers.
fn expression(name: &str, description: &str, unit: &str) -> Arc<ParamInfo> {
    Arc::new(
        ParamInfo::new(name, ValueType::String)
            .with_description(description)
            .with_unit(unit)
            .instance(),
    )
}

pub(crate) fn params(ty: ModelType) -> &'static [Arc<ParamInfo>] {
    match ty {
        ModelType::RBehavioral => &R_PARAMS,
        ModelType::CBehavioral => &C_PARAMS,
        ModelType::LBehavioral => &L_PARAMS,
        ModelType::VBehavioral => &V_PARAMS,
        ModelType::IBehavioral => &I_PARAMS,
        _ => panic!("{ty:?} is not a behavioral model type"),
    }
}
