//! Reconstruction of models from legacy `Reference`/`Value` pairs.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::types::{ModelClass, ModelType};
use super::Model;
use crate::log;
use crate::value::{Notation, Value};

/// Whether a model's state came from explicit fields or was inferred from legacy ones.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum InferenceState {
    #[default]
    Explicit,
    Inferred,
}

pub struct InferenceRule {
    pub reference: Regex,
    pub value: Regex,
    pub ty: ModelType,
}

fn rule(reference: &str, value: &str, ty: ModelType) -> InferenceRule {
    InferenceRule {
        reference: Regex::new(reference).expect("invalid reference pattern"),
        value: Regex::new(value).expect("invalid value pattern"),
        ty,
    }
}

lazy_static! {
    /// Checked in order; the first rule matching both fields wins.
    pub static ref INFERENCE_RULES: Vec<InferenceRule> = vec![
        rule(r"(?i)^R(\d|\?|$)", "=", ModelType::RBehavioral),
        rule(r"(?i)^C(\d|\?|$)", "=", ModelType::CBehavioral),
        rule(r"(?i)^L(\d|\?|$)", "=", ModelType::LBehavioral),
        rule(r"(?i)^V(\d|\?|$)", "=", ModelType::VBehavioral),
        rule(r"(?i)^I(\d|\?|$)", "=", ModelType::IBehavioral),
        rule(r"(?i)^R(\d|\?|$)", "", ModelType::R),
        rule(r"(?i)^C(\d|\?|$)", "", ModelType::C),
        rule(r"(?i)^L(\d|\?|$)", "", ModelType::L),
        rule(r"(?i)^D(\d|\?|$)", "", ModelType::D),
    ];

    /// An empty or identifier left-hand side followed by `=`.
    static ref ASSIGNMENT: Regex =
        Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)?\s*=(.*)$").expect("invalid assignment pattern");

    /// Component marking with the prefix in place of the decimal point, eg. `4k7` or `2R2`.
    static ref RKM: Regex =
        Regex::new(r"^(\d+)([pnuµmkKMGTRr])(\d+)$").expect("invalid RKM pattern");
}

/// Guesses a model type from a component's designator and value text.
pub fn infer_type_from_ref_and_value(reference: &str, value: &str) -> Option<ModelType> {
    let reference = reference.trim();
    INFERENCE_RULES
        .iter()
        .find(|rule| rule.reference.is_match(reference) && rule.value.is_match(value))
        .map(|rule| rule.ty)
}

/// Installs the model's principal value from legacy fields when they describe this model type.
///
/// Returns `true` and marks the model inferred on success. Only ideal and behavioral models
/// take part; other models are left untouched.
pub(crate) fn apply(model: &mut Model, reference: &str, value: &str) -> bool {
    let class = model.model_type().class();
    if !matches!(class, ModelClass::Ideal | ModelClass::Behavioral) {
        return false;
    }

    let candidate = infer_type_from_ref_and_value(reference, value);
    if candidate == Some(model.model_type()) {
        let installed = match class {
            ModelClass::Ideal => ideal_value(model, value),
            _ => behavioral_value(value),
        };
        if let Some(installed) = installed {
            log::debug!(
                "inferred {:?} = {:?} from reference `{}`",
                model.model_type(),
                installed,
                reference
            );
            model.params[0].set_value(installed);
            model.inference = InferenceState::Inferred;
            return true;
        }
    }

    if value.trim() == model.device_type().field() {
        log::debug!("reference `{}` marks a default {:?}", reference, model.model_type());
        model.inference = InferenceState::Inferred;
        return true;
    }

    false
}

fn ideal_value(model: &Model, value: &str) -> Option<Value> {
    let info = model.params[0].info();
    let text = value.trim();
    let text = text
        .strip_suffix(info.unit.as_str())
        .filter(|_| !info.unit.is_empty())
        .unwrap_or(text)
        .trim_end();
    let parse = |text: &str| {
        info.parse_value(text, Notation::Si)
            .ok()
            .filter(Value::is_set)
    };
    parse(text).or_else(|| parse(&from_rkm(text)?))
}

fn from_rkm(text: &str) -> Option<String> {
    let captures = RKM.captures(text)?;
    let prefix = match &captures[2] {
        "R" | "r" => "",
        "K" => "k",
        prefix => prefix,
    };
    Some(format!("{}.{}{}", &captures[1], &captures[3], prefix))
}

fn behavioral_value(value: &str) -> Option<Value> {
    let captures = ASSIGNMENT.captures(value)?;
    let expr = captures.get(2)?.as_str().trim();
    Some(Value::String(expr.to_string()))
}
