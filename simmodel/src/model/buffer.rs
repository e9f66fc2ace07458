use std::sync::Arc;

use lazy_static::lazy_static;

use super::param::{Category, Direction, ParamInfo};
use super::types::ModelType;
use crate::value::ValueType;

pub(crate) const DC_HIGH: &str = "high";
pub(crate) const DC_LOW: &str = "low";
pub(crate) const DC_HI_Z: &str = "hi-Z";

/// Longest bit sequence a PRBS driver emits.
pub const MAX_PRBS_BITS: i64 = 1 << 16;

lazy_static! {
    static ref DEVICE_PARAMS: Vec<Arc<ParamInfo>> = package_params();
    static ref DC_DRIVER_PARAMS: Vec<Arc<ParamInfo>> = {
        let mut params = driver_params();
        params.push(Arc::new(
            ParamInfo::new("dc", ValueType::String)
                .with_description("DC output state")
                .with_category(Category::Waveform)
                .with_enum_values(&[DC_HI_Z, DC_LOW, DC_HIGH])
                .with_default(DC_HI_Z)
                .instance(),
        ));
        params
    };
    static ref RECT_DRIVER_PARAMS: Vec<Arc<ParamInfo>> = {
        let mut params = driver_params();
        params.extend([
            waveform("ton", "ON time", "s", "1n"),
            waveform("toff", "OFF time", "s", "1n"),
            waveform("td", "Delay", "s", "0"),
            waveform("tr", "Rise time", "s", "100p"),
            waveform("tf", "Fall time", "s", "100p"),
            Arc::new(
                ParamInfo::new("n", ValueType::Int)
                    .with_description("Number of cycles")
                    .with_category(Category::Waveform)
                    .instance(),
            ),
            Arc::new(
                ParamInfo::new("f", ValueType::Float)
                    .with_description("Frequency")
                    .with_unit("Hz")
                    .with_category(Category::Waveform)
                    .with_dir(Direction::Out)
                    .instance(),
            ),
        ]);
        params
    };
    static ref PRBS_DRIVER_PARAMS: Vec<Arc<ParamInfo>> = {
        let mut params = driver_params();
        params.extend([
            waveform("f0", "Bit rate", "Hz", "10M"),
            Arc::new(
                ParamInfo::new("bits", ValueType::Int)
                    .with_description("Number of bits")
                    .with_category(Category::Waveform)
                    .with_default("10")
                    .with_max(MAX_PRBS_BITS)
                    .instance(),
            ),
            waveform("td", "Delay", "s", "0"),
            Arc::new(
                ParamInfo::new("seed", ValueType::Int)
                    .with_description("Shift register seed")
                    .with_category(Category::Advanced)
                    .with_default("1")
                    .instance(),
            ),
        ]);
        params
    };
}

fn model(
    name: &str,
    description: &str,
    unit: &str,
    category: Category,
    default: &str,
) -> Arc<ParamInfo> {
    Arc::new(
        ParamInfo::new(name, ValueType::Float)
            .with_description(description)
            .with_unit(unit)
            .with_category(category)
            .with_default(default),
    )
}

fn waveform(name: &str, description: &str, unit: &str, default: &str) -> Arc<ParamInfo> {
    Arc::new(
        ParamInfo::new(name, ValueType::Float)
            .with_description(description)
            .with_unit(unit)
            .with_category(Category::Waveform)
            .with_default(default)
            .instance(),
    )
}

fn package_params() -> Vec<Arc<ParamInfo>> {
    vec![
        model("vcc", "Supply voltage", "V", Category::Principal, "3.3"),
        model("rpin", "Package resistance", "Ω", Category::DistributedQuantities, "200m"),
        model("lpin", "Package inductance", "H", Category::DistributedQuantities, "5n"),
        model("cpin", "Package capacitance", "F", Category::DistributedQuantities, "1p"),
        model("c_comp", "Die capacitance", "F", Category::Capacitance, "2p"),
    ]
}

fn driver_params() -> Vec<Arc<ParamInfo>> {
    let mut params = package_params();
    params.push(model("rout", "Output resistance", "Ω", Category::Principal, "50"));
    params
}

pub(crate) fn params(ty: ModelType) -> &'static [Arc<ParamInfo>] {
    match ty {
        ModelType::BufferDevice => &DEVICE_PARAMS,
        ModelType::BufferDriverDc => &DC_DRIVER_PARAMS,
        ModelType::BufferDriverRect => &RECT_DRIVER_PARAMS,
        ModelType::BufferDriverPrbs => &PRBS_DRIVER_PARAMS,
        _ => panic!("{ty:?} is not a buffer model type"),
    }
}
