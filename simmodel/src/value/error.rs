use thiserror::Error;

use super::ValueType;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("`{text}` is not a valid {ty} value")]
    Invalid { ty: ValueType, text: String },

    #[error("`{text}` is out of range for a {ty} value")]
    OutOfRange { ty: ValueType, text: String },

    #[error("`{text}` is not one of the allowed values: {}", allowed.join(", "))]
    NotAllowed { text: String, allowed: Vec<String> },
}

impl ParseError {
    pub(crate) fn invalid(ty: ValueType, text: &str) -> Self {
        Self::Invalid {
            ty,
            text: text.to_string(),
        }
    }
}
