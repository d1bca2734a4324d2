#![forbid(unsafe_code)]

mod config;
mod error;
mod source;
mod store;

pub use crate::config::{LocaleConfig, StoreConfig, load_config, load_config_or_default};
pub use crate::error::{RuntimeError, RuntimeResult};
pub use crate::source::{CatalogSource, DEFAULT_SECTION, IniCatalog, read_sources};
pub use crate::store::Store;

pub use ini_i18n_core::{
    Arg, CompileWarning, CompiledMessages, Confidence, CoreError, LanguageTag, Locale, Message,
    Operands, PluralForm, PluralForms, PluralPlaceholder, PluralRule, PluralRules, SourceEntry,
    args, compile_messages, tr,
};
