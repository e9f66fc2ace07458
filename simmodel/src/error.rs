use std::fmt::{Debug, Display};
use std::path::PathBuf;

use thiserror::Error;

use crate::deps::arcstr::ArcStr;
use crate::fields::FieldError;
use crate::library::LibraryError;
use crate::value::ParseError;

pub type Result<T> = std::result::Result<T, SimModelError>;

pub struct SimModelError {
    pub(crate) source: ErrorSource,
    pub(crate) context: Vec<ErrorContext>,
}

impl SimModelError {
    pub fn source(&self) -> &ErrorSource {
        &self.source
    }

    pub fn context(&self) -> &[ErrorContext] {
        &self.context
    }
}

impl std::error::Error for SimModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl Display for SimModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Error:\n{}", self.source)?;
        if !self.context.is_empty() {
            writeln!(f, "\nError occurred:")?;
            for item in self.context.iter() {
                writeln!(f, "\twhile {}", item)?;
            }
        }
        Ok(())
    }
}

impl Debug for SimModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.source)?;
        if !self.context.is_empty() {
            writeln!(f, "\nError occurred:")?;
            for (i, item) in self.context.iter().enumerate() {
                writeln!(f, "\t{}: {:?}", i, item)?;
            }
        }
        Ok(())
    }
}

impl<T> From<T> for SimModelError
where
    T: Into<ErrorSource>,
{
    fn from(value: T) -> Self {
        Self {
            source: value.into(),
            context: Vec::new(),
        }
    }
}

impl SimModelError {
    pub fn new(source: impl Into<ErrorSource>) -> Self {
        Self {
            source: source.into(),
            context: Vec::new(),
        }
    }

    pub fn from_context(source: impl Into<ErrorSource>, ctx: impl Into<ErrorContext>) -> Self {
        Self {
            source: source.into(),
            context: vec![ctx.into()],
        }
    }

    pub fn with_context(mut self, ctx: impl Into<ErrorContext>) -> Self {
        self.context.push(ctx.into());
        self
    }

    #[inline]
    pub fn into_inner(self) -> ErrorSource {
        self.source
    }
}

#[inline]
pub fn with_err_context<T, E, C>(result: std::result::Result<T, E>, ctx: C) -> Result<T>
where
    C: FnOnce() -> ErrorContext,
    E: Into<SimModelError>,
{
    result.map_err(|err| err.into().with_context(ctx()))
}

#[derive(Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorContext {
    DecodeField(ArcStr),
    ReadFile(PathBuf),
    CreateFile(PathBuf),
    CreateDir(PathBuf),
    LoadLibrary(PathBuf),
    Instantiate(ArcStr),
    Task(ArcStr),
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ErrorContext::*;
        match self {
            DecodeField(name) => write!(f, "decoding field `{name}`"),
            ReadFile(path) => write!(f, "reading file {path:?}"),
            CreateFile(path) => write!(f, "creating file {path:?}"),
            CreateDir(path) => write!(f, "creating directory {path:?}"),
            LoadLibrary(path) => write!(f, "loading library {path:?}"),
            Instantiate(name) => write!(f, "instantiating library model `{name}`"),
            Task(task) => write!(f, "{task}"),
        }
    }
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ErrorSource {
    #[error("error parsing value: {0}")]
    Parse(#[from] ParseError),

    #[error("malformed field: {0}")]
    Field(#[from] FieldError),

    #[error("error reading library: {0}")]
    Library(#[from] LibraryError),

    #[error("parameter index {index} out of bounds for model with {count} parameters")]
    ParamIndexOutOfBounds { index: usize, count: usize },

    #[error("pin index {index} out of bounds for model with {count} pins")]
    PinIndexOutOfBounds { index: usize, count: usize },

    #[error("no such parameter: {0}")]
    ParamNotFound(ArcStr),

    #[error("parameter `{0}` is computed and cannot be set")]
    ReadOnlyParam(ArcStr),

    #[error("no such library model: {0}")]
    ModelNotFound(ArcStr),

    #[error("no library loaded")]
    NoLibrary,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}
