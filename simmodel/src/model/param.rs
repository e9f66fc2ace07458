use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::deps::arcstr::ArcStr;
use crate::value::{Notation, ParseError, Value, ValueType};

/// Grouping of parameters for presentation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    Principal,
    Ac,
    Dc,
    Capacitance,
    Temperature,
    Noise,
    DistributedQuantities,
    Waveform,
    Geometry,
    LimitingValues,
    Advanced,
    Flags,
    InitialConditions,
    Superfluous,
}

impl Category {
    /// Order in which relevant categories are presented.
    pub const PRESENTATION_ORDER: [Category; 12] = [
        Category::Principal,
        Category::Geometry,
        Category::Ac,
        Category::Dc,
        Category::Capacitance,
        Category::Temperature,
        Category::Noise,
        Category::DistributedQuantities,
        Category::Waveform,
        Category::LimitingValues,
        Category::Advanced,
        Category::Flags,
    ];

    pub fn is_relevant(&self) -> bool {
        !matches!(self, Category::InitialConditions | Category::Superfluous)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Principal => "Principal",
            Category::Ac => "AC",
            Category::Dc => "DC",
            Category::Capacitance => "Capacitance",
            Category::Temperature => "Temperature",
            Category::Noise => "Noise",
            Category::DistributedQuantities => "Distributed Quantities",
            Category::Waveform => "Waveform",
            Category::Geometry => "Geometry",
            Category::LimitingValues => "Limiting Values",
            Category::Advanced => "Advanced",
            Category::Flags => "Flags",
            Category::InitialConditions => "Initial Conditions",
            Category::Superfluous => "Superfluous",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    In,
    /// Computed by the model; never edited or persisted.
    Out,
    InOut,
}

/// Static description of one model parameter.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParamInfo {
    pub name: ArcStr,
    pub description: ArcStr,
    pub unit: ArcStr,
    pub category: Category,
    pub ty: ValueType,
    pub dir: Direction,
    pub is_instance_param: bool,
    pub enum_values: Vec<ArcStr>,
    pub default_value: ArcStr,
    pub default_value_of_other_variant: ArcStr,
    /// Largest accepted value of an integer parameter.
    pub max: Option<i64>,
}

impl ParamInfo {
    pub fn new(name: impl Into<ArcStr>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            description: ArcStr::new(),
            unit: ArcStr::new(),
            category: Category::Principal,
            ty,
            dir: Direction::In,
            is_instance_param: false,
            enum_values: Vec::new(),
            default_value: ArcStr::new(),
            default_value_of_other_variant: ArcStr::new(),
            max: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<ArcStr>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_dir(mut self, dir: Direction) -> Self {
        self.dir = dir;
        self
    }

    pub fn instance(mut self) -> Self {
        self.is_instance_param = true;
        self
    }

    pub fn with_enum_values(mut self, values: &[&str]) -> Self {
        self.enum_values = values.iter().map(|v| ArcStr::from(*v)).collect();
        self
    }

    pub fn with_default(mut self, value: impl Into<ArcStr>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn with_default_of_other_variant(mut self, value: impl Into<ArcStr>) -> Self {
        self.default_value_of_other_variant = value.into();
        self
    }

    pub fn with_max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// Whether the parameter is offered for presentation at all.
    pub fn is_relevant(&self) -> bool {
        self.dir != Direction::Out && self.category.is_relevant()
    }

    /// Parses `text` under this parameter's type, rejecting values outside `enum_values`
    /// or above `max`.
    pub fn parse_value(&self, text: &str, notation: Notation) -> Result<Value, ParseError> {
        if !self.enum_values.is_empty() && !text.trim().is_empty() {
            return self
                .enum_values
                .iter()
                .find(|v| v.eq_ignore_ascii_case(text.trim()))
                .map(|v| Value::String(v.to_string()))
                .ok_or_else(|| ParseError::NotAllowed {
                    text: text.to_string(),
                    allowed: self.enum_values.iter().map(|v| v.to_string()).collect(),
                });
        }
        let value = Value::parse(self.ty, text, notation)?;
        match (self.max, value.as_i64()) {
            (Some(max), Some(x)) if x > max => Err(ParseError::OutOfRange {
                ty: self.ty,
                text: text.to_string(),
            }),
            _ => Ok(value),
        }
    }
}

/// A live parameter of one model.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    info: Arc<ParamInfo>,
    value: Value,
    is_other_variant: bool,
}

impl Param {
    pub fn new(info: Arc<ParamInfo>) -> Self {
        let value = Value::Unset(info.ty);
        Self {
            info,
            value,
            is_other_variant: false,
        }
    }

    #[inline]
    pub fn info(&self) -> &ParamInfo {
        &self.info
    }

    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.info.name
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn is_other_variant(&self) -> bool {
        self.is_other_variant
    }

    /// The default text that applies to the active variant.
    pub fn default_text(&self) -> &ArcStr {
        if self.is_other_variant {
            &self.info.default_value_of_other_variant
        } else {
            &self.info.default_value
        }
    }

    /// The parsed default, or [`Value::Unset`] if the default does not parse.
    pub fn default_value(&self) -> Value {
        self.info
            .parse_value(self.default_text(), Notation::Si)
            .unwrap_or(Value::Unset(self.info.ty))
    }

    /// The value if set, otherwise the default.
    pub fn effective_value(&self) -> Value {
        if self.value.is_set() {
            self.value.clone()
        } else {
            self.default_value()
        }
    }

    pub fn render(&self, notation: Notation) -> String {
        self.value.render(notation)
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    pub(crate) fn set_other_variant(&mut self, is_other_variant: bool) {
        self.is_other_variant = is_other_variant;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_values() {
        let info = ParamInfo::new("dc", ValueType::String).with_enum_values(&["hi-Z", "low", "high"]);
        assert_eq!(
            info.parse_value("HIGH", Notation::Si).unwrap(),
            Value::String("high".to_string())
        );
        assert!(matches!(
            info.parse_value("mid", Notation::Si),
            Err(ParseError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_other_variant_default() {
        let info = ParamInfo::new("cjo", ValueType::Float)
            .with_default("0")
            .with_default_of_other_variant("1p");
        let mut param = Param::new(Arc::new(info));
        assert_eq!(param.effective_value(), Value::Float(0.0));
        param.set_other_variant(true);
        assert_eq!(param.effective_value(), Value::Float(1e-12));
    }

    #[test]
    fn test_relevance() {
        let out = ParamInfo::new("f", ValueType::Float).with_dir(Direction::Out);
        assert!(!out.is_relevant());
        let ic = ParamInfo::new("ic", ValueType::Float).with_category(Category::InitialConditions);
        assert!(!ic.is_relevant());
        assert!(ParamInfo::new("r", ValueType::Float).is_relevant());
    }
}
