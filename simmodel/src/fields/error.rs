use thiserror::Error;

use crate::value::ParseError;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum FieldError {
    #[error("unknown device type `{0}`")]
    UnknownDevice(String),

    #[error("unknown type `{ty}` for device `{device}`")]
    UnknownType { device: String, ty: String },

    #[error("cannot infer a model from reference `{reference}` and value `{value}`")]
    CannotInferType { reference: String, value: String },

    #[error("`{text}` cannot be split into name=value pairs")]
    MalformedParams { text: String },

    #[error("`{text}` is not a valid pin map")]
    MalformedPins { text: String },

    #[error("unknown parameter `{0}`")]
    UnknownParam(String),

    #[error("invalid value for parameter `{name}`: {source}")]
    InvalidParamValue { name: String, source: ParseError },

    #[error("unknown model pin `{0}`")]
    UnknownPin(String),
}
