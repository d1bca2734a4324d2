use std::path::{Path, PathBuf};
use std::sync::Arc;

use ini_i18n_runtime::{Locale, RuntimeResult, Store, load_config_or_default};
use thiserror::Error;
use tracing::debug;

use crate::command_check::{CheckCommandError, CheckOptions, run_check};
use crate::command_locales::{LocalesCommandError, LocalesOptions, render_locales, run_locales};
use crate::command_translate::{TranslateCommandError, TranslateOptions, run_translate};

const DEFAULT_CONFIG: &str = "ini-i18n.toml";

#[derive(Debug, Error)]
pub enum CliAppError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Translate(#[from] TranslateCommandError),
    #[error(transparent)]
    Locales(#[from] LocalesCommandError),
    #[error(transparent)]
    Check(#[from] CheckCommandError),
}

pub fn run() -> Result<(), CliAppError> {
    let mut args = std::env::args().skip(1);
    let command = args.next().ok_or_else(|| CliAppError::Usage(usage()))?;
    match command.as_str() {
        "translate" => {
            let options = parse_translate_options(args.collect())?;
            println!("{}", run_translate(&options)?);
            Ok(())
        }
        "locales" => {
            let options = parse_locales_options(args.collect())?;
            let summaries = run_locales(&options)?;
            println!("{}", render_locales(&summaries, options.json)?);
            Ok(())
        }
        "check" => {
            let options = parse_check_options(args.collect())?;
            let report = run_check(&options)?;
            for diagnostic in &report.diagnostics {
                eprintln!("{diagnostic}");
            }
            for (lang, messages) in &report.checked {
                println!("{lang}: {messages} messages");
            }
            report.into_result()?;
            Ok(())
        }
        _ => Err(CliAppError::Usage(usage())),
    }
}

/// Builds the store described by the config at `config_path`, or an empty
/// store when the file does not exist.
pub(crate) fn load_store(config_path: &Path) -> RuntimeResult<(Store, Option<Arc<Locale>>)> {
    let config = load_config_or_default(config_path)?;
    debug!(
        config = %config_path.display(),
        locales = config.locales.len(),
        "loading store"
    );
    Store::from_config(&config, &base_dir(config_path))
}

pub(crate) fn base_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf()
}

fn parse_translate_options(args: Vec<String>) -> Result<TranslateOptions, CliAppError> {
    let mut lang = None;
    let mut key = None;
    let mut fallback = None;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG);
    let mut positional = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--lang" => lang = Some(next_value("--lang", &mut iter)?),
            "--key" => key = Some(next_value("--key", &mut iter)?),
            "--fallback" => fallback = Some(next_value("--fallback", &mut iter)?),
            "--config" => config_path = PathBuf::from(next_value("--config", &mut iter)?),
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            "--" => positional.extend(iter.by_ref()),
            _ if arg.starts_with("--") => return Err(CliAppError::Usage(usage())),
            _ => positional.push(arg),
        }
    }
    let lang = lang.ok_or_else(|| CliAppError::Usage(usage()))?;
    let key = key.ok_or_else(|| CliAppError::Usage(usage()))?;
    Ok(TranslateOptions {
        lang,
        key,
        fallback,
        config_path,
        args: positional,
    })
}

fn parse_locales_options(args: Vec<String>) -> Result<LocalesOptions, CliAppError> {
    let mut config_path = PathBuf::from(DEFAULT_CONFIG);
    let mut json = false;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config_path = PathBuf::from(next_value("--config", &mut iter)?),
            "--json" => json = true,
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    Ok(LocalesOptions { config_path, json })
}

fn parse_check_options(args: Vec<String>) -> Result<CheckOptions, CliAppError> {
    let mut config_path = PathBuf::from(DEFAULT_CONFIG);
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config_path = PathBuf::from(next_value("--config", &mut iter)?),
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    Ok(CheckOptions { config_path })
}

fn next_value(flag: &str, iter: &mut impl Iterator<Item = String>) -> Result<String, CliAppError> {
    iter.next()
        .ok_or_else(|| CliAppError::Usage(format!("{flag} requires a value\n\n{}", usage())))
}

fn usage() -> String {
    "usage: ini-i18n-cli translate --lang <tag> --key <section::key> [--fallback <tag>] [--config <path>] [args...]\n       ini-i18n-cli locales [--config <path>] [--json]\n       ini-i18n-cli check [--config <path>]".to_string()
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{
        CliAppError, base_dir, parse_check_options, parse_locales_options,
        parse_translate_options,
    };

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_translate_flags_and_arguments() {
        let options = parse_translate_options(strings(&[
            "--lang",
            "zh-CN",
            "1",
            "--key",
            "messages::test1",
            "--fallback",
            "en-US",
            "2",
            "--",
            "--literal",
        ]))
        .expect("options");
        assert_eq!(options.lang, "zh-CN");
        assert_eq!(options.key, "messages::test1");
        assert_eq!(options.fallback.as_deref(), Some("en-US"));
        assert_eq!(options.config_path, PathBuf::from("ini-i18n.toml"));
        assert_eq!(options.args, ["1", "2", "--literal"]);
    }

    #[test]
    fn translate_requires_lang_and_key() {
        let err = parse_translate_options(strings(&["--key", "m::a"])).expect_err("no lang");
        assert!(matches!(err, CliAppError::Usage(_)));
        let err = parse_translate_options(strings(&["--lang", "en", "--bogus"]))
            .expect_err("unknown flag");
        assert!(matches!(err, CliAppError::Usage(_)));
    }

    #[test]
    fn missing_flag_value_is_reported() {
        let err = parse_check_options(strings(&["--config"])).expect_err("no value");
        assert!(err.to_string().starts_with("--config requires a value"));
    }

    #[test]
    fn parses_locales_flags() {
        let options =
            parse_locales_options(strings(&["--json", "--config", "conf/i18n.toml"])).expect("options");
        assert!(options.json);
        assert_eq!(options.config_path, PathBuf::from("conf/i18n.toml"));
    }

    #[test]
    fn base_dir_is_config_parent() {
        assert_eq!(base_dir(Path::new("conf/i18n.toml")), PathBuf::from("conf"));
        assert_eq!(base_dir(Path::new("i18n.toml")), PathBuf::from(""));
    }
}
