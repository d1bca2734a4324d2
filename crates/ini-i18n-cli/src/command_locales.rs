use std::path::PathBuf;

use ini_i18n_runtime::{PluralForm, RuntimeError};
use serde::Serialize;
use thiserror::Error;

use crate::cli::load_store;

#[derive(Debug, Error)]
pub enum LocalesCommandError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct LocalesOptions {
    pub config_path: PathBuf,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleSummary {
    pub lang: String,
    pub description: String,
    pub messages: usize,
    pub plural_forms: Vec<&'static str>,
}

pub fn run_locales(options: &LocalesOptions) -> Result<Vec<LocaleSummary>, LocalesCommandError> {
    let (store, _) = load_store(&options.config_path)?;
    let mut summaries = Vec::with_capacity(store.len());
    for (lang, description) in store.languages() {
        let locale = store.locale(lang)?;
        let plural_forms = match locale.plural_rule() {
            Some(rule) => rule.forms.iter().map(|form| form.as_str()).collect(),
            None => vec![PluralForm::Other.as_str()],
        };
        summaries.push(LocaleSummary {
            lang: lang.to_string(),
            description: description.to_string(),
            messages: locale.len(),
            plural_forms,
        });
    }
    Ok(summaries)
}

pub fn render_locales(
    summaries: &[LocaleSummary],
    json: bool,
) -> Result<String, LocalesCommandError> {
    if json {
        return Ok(serde_json::to_string_pretty(summaries)?);
    }
    let lines: Vec<String> = summaries
        .iter()
        .map(|summary| {
            format!(
                "{}\t{}\t{} messages\t{}",
                summary.lang,
                summary.description,
                summary.messages,
                summary.plural_forms.join(",")
            )
        })
        .collect();
    Ok(lines.join("\n"))
}
