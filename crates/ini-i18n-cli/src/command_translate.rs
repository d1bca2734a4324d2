use std::path::PathBuf;

use ini_i18n_runtime::{Arg, RuntimeError};
use thiserror::Error;

use crate::cli::load_store;

#[derive(Debug, Error)]
pub enum TranslateCommandError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

#[derive(Debug, Clone)]
pub struct TranslateOptions {
    pub lang: String,
    pub key: String,
    pub fallback: Option<String>,
    pub config_path: PathBuf,
    pub args: Vec<String>,
}

/// Translates one key. `--fallback` wins over the configured fallback.
pub fn run_translate(options: &TranslateOptions) -> Result<String, TranslateCommandError> {
    let (store, configured) = load_store(&options.config_path)?;
    let locale = store.locale(&options.lang)?;
    let fallback = match &options.fallback {
        Some(lang) => Some(store.locale(lang)?),
        None => configured,
    };

    let args: Vec<Arg> = options.args.iter().map(|value| parse_arg(value)).collect();
    let output = match fallback {
        Some(fallback) => locale.translate_with_fallback(&fallback, &options.key, &args),
        None => locale.translate(&options.key, &args),
    };
    Ok(output)
}

/// Integer-looking arguments become numbers, everything else stays a string.
fn parse_arg(value: &str) -> Arg {
    if let Ok(number) = value.parse::<i64>() {
        return Arg::Int(number);
    }
    if let Ok(number) = value.parse::<u64>() {
        return Arg::Uint(number);
    }
    Arg::from(value)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use ini_i18n_runtime::{Arg, RuntimeError};

    use super::{TranslateCommandError, TranslateOptions, parse_arg, run_translate};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("ini_i18n_cli_{name}_{nanos}"));
        fs::create_dir_all(&path).expect("create dir");
        path
    }

    fn write_fixture(dir: &PathBuf) -> PathBuf {
        fs::write(
            dir.join("en.ini"),
            "[plurals]\nfile.one = file\nfile.other = files\n[messages]\nfiles = %[1]d ${file, 1}\nhello = Hello, %s\n",
        )
        .expect("write en");
        fs::write(dir.join("de.ini"), "[messages]\nhello = Hallo, %s\n").expect("write de");
        let config = dir.join("ini-i18n.toml");
        fs::write(
            &config,
            "fallback = \"en-US\"\n\n[[locales]]\nlang = \"en-US\"\ndescription = \"English\"\nsources = [\"en.ini\"]\n\n[[locales]]\nlang = \"de-DE\"\ndescription = \"Deutsch\"\nsources = [\"de.ini\"]\n",
        )
        .expect("write config");
        config
    }

    fn options(config_path: PathBuf, lang: &str, key: &str, args: &[&str]) -> TranslateOptions {
        TranslateOptions {
            lang: lang.to_string(),
            key: key.to_string(),
            fallback: None,
            config_path,
            args: args.iter().map(|value| value.to_string()).collect(),
        }
    }

    #[test]
    fn parses_numeric_arguments() {
        assert_eq!(parse_arg("-3"), Arg::Int(-3));
        assert_eq!(parse_arg("18446744073709551615"), Arg::Uint(u64::MAX));
        assert_eq!(parse_arg("1.5"), Arg::Str("1.5".to_string()));
        assert_eq!(parse_arg("Ann"), Arg::Str("Ann".to_string()));
    }

    #[test]
    fn translates_through_configured_fallback() {
        let dir = temp_dir("translate");
        let config = write_fixture(&dir);
        let output =
            run_translate(&options(config.clone(), "de-DE", "messages::hello", &["Ann"]))
                .expect("translate");
        assert_eq!(output, "Hallo, Ann");
        let output = run_translate(&options(config, "de-DE", "messages::files", &["2"]))
            .expect("translate");
        assert_eq!(output, "2 files");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unknown_locale_is_an_error() {
        let dir = temp_dir("translate_missing");
        let config = write_fixture(&dir);
        let err = run_translate(&options(config, "fr-FR", "messages::hello", &[]))
            .expect_err("missing locale");
        assert!(matches!(
            err,
            TranslateCommandError::Runtime(RuntimeError::LocaleNotFound(_))
        ));
        fs::remove_dir_all(&dir).ok();
    }
}
