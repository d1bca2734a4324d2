use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;

use crate::{Arg, LanguageTag, Message, PluralRule};

/// One language's compiled catalog. Immutable once built, so it can be
/// shared across threads behind an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct Locale {
    tag: LanguageTag,
    description: String,
    rule: Option<PluralRule>,
    messages: BTreeMap<String, Message>,
}

impl Locale {
    pub fn new(
        tag: LanguageTag,
        description: impl Into<String>,
        rule: Option<PluralRule>,
        messages: BTreeMap<String, Message>,
    ) -> Self {
        Self {
            tag,
            description: description.into(),
            rule,
            messages,
        }
    }

    pub fn tag(&self) -> &LanguageTag {
        &self.tag
    }

    pub fn lang(&self) -> &str {
        self.tag.as_str()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// `None` when no CLDR rule covers the language; every plural then
    /// takes its `other` form.
    pub fn plural_rule(&self) -> Option<&PluralRule> {
        self.rule.as_ref()
    }

    pub fn message(&self, key: &str) -> Option<&Message> {
        self.messages.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Translates `key`, or returns `<no such key: key>` when it is missing.
    pub fn translate(&self, key: &str, args: &[Arg]) -> String {
        match self.messages.get(key) {
            Some(message) => message.translate(self.rule.as_ref(), args),
            None => format!("<no such key: {key}>"),
        }
    }

    /// Like [`Locale::translate`], but a missing key is looked up in
    /// `fallback` once. The fallback's own fallback is never consulted.
    pub fn translate_with_fallback(&self, fallback: &Locale, key: &str, args: &[Arg]) -> String {
        if self.messages.contains_key(key) {
            return self.translate(key, args);
        }
        fallback.translate(key, args)
    }
}
