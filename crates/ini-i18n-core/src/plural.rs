use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::{Confidence, CoreError, LanguageTag, Operands};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluralForm {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralForm {
    pub const ALL: [PluralForm; 6] = [
        PluralForm::Zero,
        PluralForm::One,
        PluralForm::Two,
        PluralForm::Few,
        PluralForm::Many,
        PluralForm::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PluralForm::Zero => "zero",
            PluralForm::One => "one",
            PluralForm::Two => "two",
            PluralForm::Few => "few",
            PluralForm::Many => "many",
            PluralForm::Other => "other",
        }
    }
}

impl fmt::Display for PluralForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralForm {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PluralForm::ALL
            .into_iter()
            .find(|form| form.as_str() == value)
            .ok_or(CoreError::InvalidInput("unknown plural form"))
    }
}

/// CLDR cardinal plural rule of one language.
#[derive(Clone, Copy)]
pub struct PluralRule {
    pub forms: &'static [PluralForm],
    pub select: fn(&Operands) -> PluralForm,
}

impl PluralRule {
    pub fn plural_form(&self, operands: &Operands) -> PluralForm {
        (self.select)(operands)
    }

    pub fn has_form(&self, form: PluralForm) -> bool {
        self.forms.contains(&form)
    }
}

impl fmt::Debug for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluralRule")
            .field("forms", &self.forms)
            .finish_non_exhaustive()
    }
}

impl PartialEq for PluralRule {
    fn eq(&self, other: &Self) -> bool {
        self.forms == other.forms && core::ptr::fn_addr_eq(self.select, other.select)
    }
}

/// Plural rules keyed by normalized language tag.
#[derive(Clone, Debug, Default)]
pub struct PluralRules {
    rules: BTreeMap<String, PluralRule>,
}

impl PluralRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// The CLDR cardinal rules for every language shipped with the crate.
    pub fn cldr() -> Self {
        let mut rules = Self::new();
        crate::cldr::register(&mut rules);
        rules
    }

    pub fn insert(&mut self, tag: &LanguageTag, rule: PluralRule) -> Option<PluralRule> {
        self.rules.insert(String::from(tag.as_str()), rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Looks up the exact tag first, then its base language. A rule under a
    /// base language never shadows a more specific registration because the
    /// exact tag is always tried first.
    pub fn rule(&self, tag: &LanguageTag) -> Option<&PluralRule> {
        if let Some(rule) = self.rules.get(tag.as_str()) {
            return Some(rule);
        }
        let (base, confidence) = tag.base();
        if confidence != Confidence::Exact {
            return None;
        }
        self.rules.get(base.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{PluralForm, PluralRule, PluralRules};
    use crate::{LanguageTag, Operands};

    fn always_other(_: &Operands) -> PluralForm {
        PluralForm::Other
    }

    fn always_one(_: &Operands) -> PluralForm {
        PluralForm::One
    }

    const OTHER: PluralRule = PluralRule {
        forms: &[PluralForm::Other],
        select: always_other,
    };

    const ONE: PluralRule = PluralRule {
        forms: &[PluralForm::One, PluralForm::Other],
        select: always_one,
    };

    fn tag(value: &str) -> LanguageTag {
        LanguageTag::parse(value).expect("valid tag")
    }

    fn rules(entries: &[(&str, PluralRule)]) -> PluralRules {
        let mut rules = PluralRules::new();
        for (id, rule) in entries {
            rules.insert(&tag(id), *rule);
        }
        rules
    }

    #[test]
    fn exact_match() {
        let rules = rules(&[("en", ONE), ("es", OTHER)]);
        assert_eq!(rules.rule(&tag("en")), Some(&ONE));
    }

    #[test]
    fn inexact_match_uses_base_language() {
        let rules = rules(&[("en", ONE)]);
        assert_eq!(rules.rule(&tag("en-US")), Some(&ONE));
    }

    #[test]
    fn portuguese_does_not_match_european_portuguese() {
        let rules = rules(&[("pt-PT", ONE)]);
        assert_eq!(rules.rule(&tag("pt")), None);
    }

    #[test]
    fn european_portuguese_preferred() {
        let rules = rules(&[("pt", OTHER), ("pt-PT", ONE)]);
        assert_eq!(rules.rule(&tag("pt-PT")), Some(&ONE));
        assert_eq!(rules.rule(&tag("pt-BR")), Some(&OTHER));
    }

    #[test]
    fn script_variants_fall_back_to_language() {
        let rules = rules(&[("zh", OTHER)]);
        assert_eq!(rules.rule(&tag("zh-Hans")), Some(&OTHER));
        assert_eq!(rules.rule(&tag("zh-Hant-TW")), Some(&OTHER));
    }

    #[test]
    fn undetermined_language_has_no_rule() {
        let rules = rules(&[("und", OTHER)]);
        assert_eq!(rules.rule(&tag("und-US")), None);
    }

    #[test]
    fn forms_round_trip_through_names() {
        for form in PluralForm::ALL {
            let parsed: PluralForm = form.as_str().parse().expect("known form");
            assert_eq!(parsed, form);
        }
        assert!("several".parse::<PluralForm>().is_err());
    }
}
