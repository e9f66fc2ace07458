use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
    #[error("error parsing SPICE library")]
    Parse,

    #[error("malformed `{directive}` directive: {line}")]
    MalformedDirective { directive: String, line: String },

    #[error("subcircuit `{0}` is missing its `.ends` line")]
    UnterminatedSubckt(String),

    #[error("`.ends` without a matching `.subckt`")]
    UnexpectedEnds,
}

pub type Result<T> = std::result::Result<T, Error>;
