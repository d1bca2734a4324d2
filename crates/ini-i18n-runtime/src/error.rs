use ini_i18n_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("source line {line}: {message}")]
    Source { line: usize, message: String },
    #[error("language tag: {0}")]
    LanguageTag(CoreError),
    #[error("new locale: {0}")]
    Compile(CoreError),
    #[error("duplicated locales for \"{0}\"")]
    DuplicateLocale(String),
    #[error("locale not found for \"{0}\"")]
    LocaleNotFound(String),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
