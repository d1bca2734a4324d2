use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use ini_i18n_runtime::{
    CatalogSource, LanguageTag, RuntimeError, compile_messages, load_config_or_default,
    read_sources,
};
use thiserror::Error;

use crate::cli::base_dir;

#[derive(Debug, Error)]
pub enum CheckCommandError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("check failed with {0} errors")]
    Failed(usize),
}

#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub config_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckDiagnostic {
    pub severity: Severity,
    pub lang: String,
    pub message: String,
}

impl CheckDiagnostic {
    fn error(lang: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            lang: lang.to_string(),
            message: message.into(),
        }
    }

    fn warning(lang: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            lang: lang.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for CheckDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}[{}]: {}", self.lang, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub checked: Vec<(String, usize)>,
    pub diagnostics: Vec<CheckDiagnostic>,
}

impl CheckReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Error)
            .count()
    }

    pub fn into_result(self) -> Result<(), CheckCommandError> {
        match self.error_count() {
            0 => Ok(()),
            errors => Err(CheckCommandError::Failed(errors)),
        }
    }
}

/// Compiles every configured locale without stopping at the first failure.
/// Keys present in the fallback locale but missing elsewhere are warnings.
pub fn run_check(options: &CheckOptions) -> Result<CheckReport, CheckCommandError> {
    let config = load_config_or_default(&options.config_path)?;
    let base_dir = base_dir(&options.config_path);
    let mut report = CheckReport::default();
    let mut seen = BTreeSet::new();
    let mut keys: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for locale in &config.locales {
        let lang = locale.lang.as_str();
        let tag = match LanguageTag::parse(lang) {
            Ok(tag) => tag,
            Err(err) => {
                report.diagnostics.push(CheckDiagnostic::error(lang, err.to_string()));
                continue;
            }
        };
        if !seen.insert(tag.as_str().to_string()) {
            report.diagnostics.push(CheckDiagnostic::error(
                lang,
                RuntimeError::DuplicateLocale(lang.to_string()).to_string(),
            ));
            continue;
        }

        let sources: Vec<CatalogSource> = locale
            .sources
            .iter()
            .map(|source| CatalogSource::File(base_dir.join(source)))
            .collect();
        let entries = match read_sources(&sources) {
            Ok(entries) => entries,
            Err(err) => {
                report.diagnostics.push(CheckDiagnostic::error(lang, err.to_string()));
                continue;
            }
        };
        let compiled = match compile_messages(&entries) {
            Ok(compiled) => compiled,
            Err(err) => {
                report
                    .diagnostics
                    .push(CheckDiagnostic::error(lang, RuntimeError::Compile(err).to_string()));
                continue;
            }
        };
        for warning in &compiled.warnings {
            report
                .diagnostics
                .push(CheckDiagnostic::warning(lang, warning.to_string()));
        }
        report.checked.push((tag.as_str().to_string(), compiled.messages.len()));
        keys.insert(tag.as_str().to_string(), compiled.messages.into_keys().collect());
    }

    if let Some(fallback) = &config.fallback {
        let normalized = LanguageTag::parse(fallback)
            .map(|tag| tag.as_str().to_string())
            .unwrap_or_else(|_| fallback.clone());
        match keys.get(&normalized) {
            Some(reference) => {
                for (lang, present) in keys.iter().filter(|(lang, _)| **lang != normalized) {
                    for key in reference.difference(present) {
                        report.diagnostics.push(CheckDiagnostic::warning(
                            lang,
                            format!("missing {key} (served from {normalized})"),
                        ));
                    }
                }
            }
            None => report.diagnostics.push(CheckDiagnostic::error(
                fallback,
                RuntimeError::LocaleNotFound(fallback.clone()).to_string(),
            )),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{CheckCommandError, CheckOptions, Severity, run_check};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("ini_i18n_cli_{name}_{nanos}"));
        fs::create_dir_all(&path).expect("create dir");
        path
    }

    #[test]
    fn clean_config_passes() {
        let dir = temp_dir("check_clean");
        fs::write(dir.join("en.ini"), "[m]\na = A\n").expect("write");
        let config = dir.join("ini-i18n.toml");
        fs::write(
            &config,
            "[[locales]]\nlang = \"en-US\"\nsources = [\"en.ini\"]\n",
        )
        .expect("write");
        let report = run_check(&CheckOptions { config_path: config }).expect("check");
        assert_eq!(report.checked, [("en-US".to_string(), 1)]);
        assert!(report.diagnostics.is_empty());
        report.into_result().expect("no errors");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn reports_every_problem() {
        let dir = temp_dir("check_errors");
        fs::write(
            dir.join("en.ini"),
            "[plurals]\nfile.lots = many\n[m]\na = A\nb = %[1]d ${cat, 1}\n",
        )
        .expect("write");
        fs::write(dir.join("fr.ini"), "[m]\na = ${cat, 0}\n").expect("write");
        fs::write(dir.join("de.ini"), "[m]\nb = B\n").expect("write");
        let config = dir.join("ini-i18n.toml");
        fs::write(
            &config,
            "fallback = \"en-US\"\n\
             [[locales]]\nlang = \"en-US\"\nsources = [\"en.ini\"]\n\
             [[locales]]\nlang = \"en-us\"\nsources = [\"en.ini\"]\n\
             [[locales]]\nlang = \"fr-FR\"\nsources = [\"fr.ini\"]\n\
             [[locales]]\nlang = \"de-DE\"\nsources = [\"de.ini\"]\n\
             [[locales]]\nlang = \"it-IT\"\nsources = [\"missing.ini\"]\n",
        )
        .expect("write");

        let report = run_check(&CheckOptions { config_path: config }).expect("check");
        let errors: Vec<&str> = report
            .diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Error)
            .map(|diagnostic| diagnostic.lang.as_str())
            .collect();
        assert_eq!(errors, ["en-us", "fr-FR", "it-IT"]);
        let warnings: Vec<String> = report
            .diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Warning)
            .map(|diagnostic| diagnostic.to_string())
            .collect();
        assert_eq!(warnings.len(), 3);
        assert!(warnings.contains(&"warning[de-DE]: missing m::a (served from en-US)".to_string()));
        let err = report.into_result().expect_err("errors");
        assert!(matches!(err, CheckCommandError::Failed(3)));
        fs::remove_dir_all(&dir).ok();
    }
}
