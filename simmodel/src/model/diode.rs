use std::sync::Arc;

use lazy_static::lazy_static;

use super::param::{Category, Direction, ParamInfo};
use crate::value::ValueType;

lazy_static! {
    static ref PARAMS: Vec<Arc<ParamInfo>> = vec![
        model("is", "Saturation current", "A", Category::Dc, "1e-14"),
        model("n", "Emission coefficient", "", Category::Dc, "1"),
        model("rs", "Ohmic resistance", "Ω", Category::Dc, "0"),
        Arc::new(
            ParamInfo::new("cjo", ValueType::Float)
                .with_description("Zero-bias junction capacitance")
                .with_unit("F")
                .with_category(Category::Capacitance)
                .with_default("0")
                .with_default_of_other_variant("")
        ),
        model("vj", "Junction potential", "V", Category::Capacitance, "1"),
        model("m", "Grading coefficient", "", Category::Capacitance, "0.5"),
        model("tt", "Transit time", "s", Category::Capacitance, "0"),
        model("bv", "Reverse breakdown voltage", "V", Category::LimitingValues, ""),
        model("ibv", "Current at breakdown voltage", "A", Category::LimitingValues, "1m"),
        Arc::new(
            ParamInfo::new("area", ValueType::Float)
                .with_description("Area factor")
                .with_category(Category::Geometry)
                .with_default("1")
                .instance()
        ),
        Arc::new(
            ParamInfo::new("off", ValueType::Bool)
                .with_description("Initially off")
                .with_category(Category::Flags)
                .with_default("0")
                .instance()
        ),
        Arc::new(
            ParamInfo::new("ic", ValueType::Float)
                .with_description("Initial device voltage")
                .with_unit("V")
                .with_category(Category::InitialConditions)
                .instance()
        ),
        Arc::new(
            ParamInfo::new("temp", ValueType::Float)
                .with_description("Instance temperature")
                .with_unit("°C")
                .with_category(Category::Temperature)
                .with_default("27")
                .instance()
        ),
        Arc::new(
            ParamInfo::new("dtemp", ValueType::Float)
                .with_description("Instance temperature difference")
                .with_unit("°C")
                .with_category(Category::Superfluous)
                .with_default("0")
                .instance()
        ),
        output("vd", "Diode voltage", "V"),
        output("id", "Diode current", "A"),
    ];
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

fn output(name: &str, description: &str, unit: &str) -> Arc<ParamInfo> {
    Arc::new(
        ParamInfo::new(name, ValueType::Float)
            .with_description(description)
            .with_unit(unit)
            .with_dir(Direction::Out),
    )
}

pub(crate) fn params() -> &'static [Arc<ParamInfo>] {
    &PARAMS
}

/// Card names that set a catalog parameter through its other variant.
pub(crate) fn other_variant_of(name: &str) -> Option<&'static str> {
    if name.eq_ignore_ascii_case("cj0") {
        Some("cjo")
    } else {
        None
    }
}
