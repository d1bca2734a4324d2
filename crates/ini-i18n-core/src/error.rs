use alloc::string::String;
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    InvalidInput(&'static str),
    InvalidLanguageTag(String),
    InvalidPluralIndex { token: String, index: usize },
    UnsupportedType(&'static str),
    InvalidNumber(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidInput(message) => write!(f, "invalid input: {message}"),
            CoreError::InvalidLanguageTag(message) => {
                write!(f, "invalid language tag: {message}")
            }
            CoreError::InvalidPluralIndex { token, index } => {
                write!(f, "the smallest index is 1 but got {index} for \"{token}\"")
            }
            CoreError::UnsupportedType(kind) => write!(
                f,
                "unsupported argument type {kind}: expected integer or decimal string"
            ),
            CoreError::InvalidNumber(input) => write!(f, "invalid number {input:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}
