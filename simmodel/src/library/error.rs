use thiserror::Error;

use crate::value::ParseError;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("malformed library text: {0}")]
    Parse(#[from] spicelib::error::Error),

    #[error("model `{0}` is defined more than once")]
    DuplicateName(String),

    #[error("invalid value for `{param}` in model `{model}`: {source}")]
    InvalidParamValue {
        model: String,
        param: String,
        source: ParseError,
    },
}
