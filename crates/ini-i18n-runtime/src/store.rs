use std::collections::BTreeMap;
use std::sync::Arc;

use ini_i18n_core::{LanguageTag, Locale, PluralRules, compile_messages};
use tracing::{debug, warn};

use crate::error::{RuntimeError, RuntimeResult};
use crate::source::{CatalogSource, read_sources};

/// Registry of compiled locales.
///
/// Registration takes `&mut self`; once every locale is added the store can
/// be shared (for example behind an `Arc`) and read from any thread.
#[derive(Debug)]
pub struct Store {
    langs: Vec<String>,
    descs: Vec<String>,
    locales: BTreeMap<String, Arc<Locale>>,
    rules: PluralRules,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_rules(PluralRules::cldr())
    }

    /// A store resolving plural rules from a custom table.
    pub fn with_rules(rules: PluralRules) -> Self {
        Self {
            langs: Vec::new(),
            descs: Vec::new(),
            locales: BTreeMap::new(),
            rules,
        }
    }

    pub fn add_locale(
        &mut self,
        lang: &str,
        description: &str,
        source: impl Into<CatalogSource>,
    ) -> RuntimeResult<Arc<Locale>> {
        self.add_locale_sources(lang, description, &[source.into()])
    }

    /// Compiles `sources` (later sources override earlier ones) and registers
    /// the result. A language can be registered once; a second attempt fails
    /// and leaves the store unchanged.
    pub fn add_locale_sources(
        &mut self,
        lang: &str,
        description: &str,
        sources: &[CatalogSource],
    ) -> RuntimeResult<Arc<Locale>> {
        let tag = LanguageTag::parse(lang).map_err(RuntimeError::LanguageTag)?;
        let entries = read_sources(sources)?;
        let compiled = compile_messages(&entries).map_err(RuntimeError::Compile)?;
        for warning in &compiled.warnings {
            warn!(lang = tag.as_str(), "{warning}");
        }

        let rule = self.rules.rule(&tag).copied();
        let locale = Arc::new(Locale::new(tag, description, rule, compiled.messages));
        if self.locales.contains_key(locale.lang()) {
            warn!(lang, "rejected duplicate locale registration");
            return Err(RuntimeError::DuplicateLocale(lang.to_string()));
        }

        debug!(
            lang = locale.lang(),
            messages = locale.len(),
            plural_rule = rule.is_some(),
            "registered locale"
        );
        self.langs.push(locale.lang().to_string());
        self.descs.push(description.to_string());
        self.locales
            .insert(locale.lang().to_string(), Arc::clone(&locale));
        Ok(locale)
    }

    /// Looks up a registered locale. `lang` is normalized first, so
    /// `en-us` finds a locale registered as `en-US`.
    pub fn locale(&self, lang: &str) -> RuntimeResult<Arc<Locale>> {
        let found = match LanguageTag::parse(lang) {
            Ok(tag) => self.locales.get(tag.as_str()),
            Err(_) => self.locales.get(lang),
        };
        found
            .cloned()
            .ok_or_else(|| RuntimeError::LocaleNotFound(lang.to_string()))
    }

    /// Registered `(lang, description)` pairs in registration order.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.langs
            .iter()
            .map(String::as_str)
            .zip(self.descs.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    pub fn rules(&self) -> &PluralRules {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use ini_i18n_core::{Arg, LanguageTag, PluralForm, PluralRule, PluralRules};

    use super::Store;
    use crate::error::RuntimeError;

    const EN: &str = "[plurals]\nfile.one = file\nfile.other = files\n[messages]\nfiles = %[1]d ${file, 1}\n";

    #[test]
    fn registers_in_insertion_order() {
        let mut store = Store::new();
        store.add_locale("zh-CN", "简体中文", "[m]\na = 甲\n").expect("zh");
        store.add_locale("en-us", "English", EN).expect("en");
        let langs: Vec<(&str, &str)> = store.languages().collect();
        assert_eq!(langs, [("zh-CN", "简体中文"), ("en-US", "English")]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn lookup_normalizes_tag() {
        let mut store = Store::new();
        store.add_locale("en-US", "English", EN).expect("en");
        let locale = store.locale("en-us").expect("lookup");
        assert_eq!(locale.lang(), "en-US");
        assert_eq!(locale.description(), "English");
        assert_eq!(locale.translate("messages::files", &[Arg::Int(1)]), "1 file");
    }

    #[test]
    fn missing_locale_is_an_error() {
        let store = Store::new();
        let err = store.locale("fr-FR").expect_err("missing");
        assert_eq!(err.to_string(), "locale not found for \"fr-FR\"");
    }

    #[test]
    fn duplicate_leaves_store_unchanged() {
        let mut store = Store::new();
        store.add_locale("en-US", "English", EN).expect("first");
        let err = store
            .add_locale("en-US", "Other", "[messages]\nfiles = changed\n")
            .expect_err("duplicate");
        assert!(matches!(err, RuntimeError::DuplicateLocale(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.languages().count(), 1);
        let locale = store.locale("en-US").expect("lookup");
        assert_eq!(locale.description(), "English");
        assert_eq!(locale.translate("messages::files", &[Arg::Int(2)]), "2 files");
    }

    #[test]
    fn rejects_invalid_language_tag() {
        let mut store = Store::new();
        let err = store.add_locale("not a tag", "", EN).expect_err("bad tag");
        assert!(matches!(err, RuntimeError::LanguageTag(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_language_uses_other_form() {
        let mut store = Store::with_rules(PluralRules::new());
        let locale = store.add_locale("en-US", "English", EN).expect("en");
        assert!(locale.plural_rule().is_none());
        assert_eq!(locale.translate("messages::files", &[Arg::Int(1)]), "1 files");
    }

    #[test]
    fn custom_rules_apply() {
        fn always_one(_: &ini_i18n_core::Operands) -> PluralForm {
            PluralForm::One
        }
        let mut rules = PluralRules::new();
        rules.insert(
            &LanguageTag::parse("en").expect("tag"),
            PluralRule {
                forms: &[PluralForm::One],
                select: always_one,
            },
        );
        let mut store = Store::with_rules(rules);
        let locale = store.add_locale("en-GB", "English", EN).expect("en");
        assert_eq!(locale.translate("messages::files", &[Arg::Int(5)]), "5 file");
    }

    #[test]
    fn store_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Store>();
    }
}
