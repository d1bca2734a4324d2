use std::fs;
use std::path::Path;
use std::sync::Arc;

use ini_i18n_core::Locale;
use serde::Deserialize;

use crate::error::RuntimeResult;
use crate::source::CatalogSource;
use crate::store::Store;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub fallback: Option<String>,
    #[serde(default)]
    pub locales: Vec<LocaleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocaleConfig {
    pub lang: String,
    #[serde(default)]
    pub description: String,
    pub sources: Vec<String>,
}

pub fn load_config(path: &Path) -> RuntimeResult<StoreConfig> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn load_config_or_default(path: &Path) -> RuntimeResult<StoreConfig> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(StoreConfig::default())
    }
}

impl Store {
    /// Registers every configured locale in order. Relative source paths
    /// resolve against `base_dir`. Returns the store and the configured
    /// fallback locale, if any.
    pub fn from_config(
        config: &StoreConfig,
        base_dir: &Path,
    ) -> RuntimeResult<(Store, Option<Arc<Locale>>)> {
        let mut store = Store::new();
        for locale in &config.locales {
            let sources: Vec<CatalogSource> = locale
                .sources
                .iter()
                .map(|source| CatalogSource::File(base_dir.join(source)))
                .collect();
            store.add_locale_sources(&locale.lang, &locale.description, &sources)?;
        }
        let fallback = match &config.fallback {
            Some(lang) => Some(store.locale(lang)?),
            None => None,
        };
        Ok((store, fallback))
    }
}
