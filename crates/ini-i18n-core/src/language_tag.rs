use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::{CoreError, CoreResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    No,
    Exact,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageTag {
    normalized: String,
    match_subtags: Vec<String>,
}

impl LanguageTag {
    pub fn parse(input: &str) -> CoreResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidLanguageTag(String::from("empty")));
        }

        let subtags: Vec<&str> = trimmed.split(['-', '_']).collect();
        if subtags.iter().any(|part| part.is_empty()) {
            return Err(invalid(trimmed, "empty subtag"));
        }

        let mut normalized_parts = Vec::with_capacity(subtags.len());
        let mut match_parts = Vec::with_capacity(subtags.len());
        let mut script_seen = false;
        let mut region_seen = false;
        let mut stop_for_match = false;

        for (idx, part) in subtags.iter().enumerate() {
            if !part.chars().all(|ch| ch.is_ascii_alphanumeric()) || part.len() > 8 {
                return Err(invalid(trimmed, "invalid subtag"));
            }
            if idx == 0 {
                if !is_alpha(part) || !(2..=8).contains(&part.len()) {
                    return Err(invalid(trimmed, "invalid language subtag"));
                }
                let lower = part.to_ascii_lowercase();
                normalized_parts.push(lower.clone());
                match_parts.push(lower);
                continue;
            }

            if part.len() == 1 {
                stop_for_match = true;
                normalized_parts.push(part.to_ascii_lowercase());
                continue;
            }

            let normalized = if stop_for_match {
                part.to_ascii_lowercase()
            } else if !script_seen && !region_seen && part.len() == 4 && is_alpha(part) {
                script_seen = true;
                titlecase(part)
            } else if !region_seen && is_region(part) {
                region_seen = true;
                part.to_ascii_uppercase()
            } else {
                part.to_ascii_lowercase()
            };

            normalized_parts.push(normalized.clone());
            if !stop_for_match {
                match_parts.push(normalized);
            }
        }

        Ok(Self {
            normalized: normalized_parts.join("-"),
            match_subtags: match_parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn language(&self) -> &str {
        &self.match_subtags[0]
    }

    pub fn match_subtags(&self) -> &[String] {
        &self.match_subtags
    }

    /// Reduces the tag to its primary language subtag.
    ///
    /// `und` carries no language information, so its base is reported with
    /// [`Confidence::No`].
    pub fn base(&self) -> (LanguageTag, Confidence) {
        let language = self.language().to_string();
        let confidence = if language == "und" {
            Confidence::No
        } else {
            Confidence::Exact
        };
        let base = LanguageTag {
            normalized: language.clone(),
            match_subtags: alloc::vec![language],
        };
        (base, confidence)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl core::str::FromStr for LanguageTag {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        LanguageTag::parse(value)
    }
}

fn invalid(input: &str, reason: &str) -> CoreError {
    CoreError::InvalidLanguageTag(format!("{reason} in \"{input}\""))
}

fn is_alpha(value: &str) -> bool {
    value.chars().all(|ch| ch.is_ascii_alphabetic())
}

fn is_region(value: &str) -> bool {
    (value.len() == 2 && is_alpha(value))
        || (value.len() == 3 && value.chars().all(|ch| ch.is_ascii_digit()))
}

fn titlecase(value: &str) -> String {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut output = String::with_capacity(value.len());
    output.push(first.to_ascii_uppercase());
    for ch in chars {
        output.push(ch.to_ascii_lowercase());
    }
    output
}
