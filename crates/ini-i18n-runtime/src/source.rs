use std::fs;
use std::path::{Path, PathBuf};

use ini_i18n_core::SourceEntry;

use crate::error::{RuntimeError, RuntimeResult};

/// Section holding keys that appear before any `[section]` header.
pub const DEFAULT_SECTION: &str = "DEFAULT";

const MAX_INTERPOLATION_DEPTH: usize = 99;
const MAX_INTERPOLATED_LEN: usize = 64 * 1024;

/// Where an INI catalog is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Bytes(Vec<u8>),
    Text(String),
    File(PathBuf),
}

impl CatalogSource {
    pub fn read(&self) -> RuntimeResult<String> {
        match self {
            CatalogSource::Text(text) => Ok(text.clone()),
            CatalogSource::Bytes(bytes) => decode_utf8(bytes.clone()),
            CatalogSource::File(path) => decode_utf8(fs::read(path)?),
        }
    }
}

impl From<&str> for CatalogSource {
    fn from(value: &str) -> Self {
        CatalogSource::Text(value.to_string())
    }
}

impl From<String> for CatalogSource {
    fn from(value: String) -> Self {
        CatalogSource::Text(value)
    }
}

impl From<&[u8]> for CatalogSource {
    fn from(value: &[u8]) -> Self {
        CatalogSource::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for CatalogSource {
    fn from(value: Vec<u8>) -> Self {
        CatalogSource::Bytes(value)
    }
}

impl From<&Path> for CatalogSource {
    fn from(value: &Path) -> Self {
        CatalogSource::File(value.to_path_buf())
    }
}

impl From<PathBuf> for CatalogSource {
    fn from(value: PathBuf) -> Self {
        CatalogSource::File(value)
    }
}

fn decode_utf8(bytes: Vec<u8>) -> RuntimeResult<String> {
    String::from_utf8(bytes).map_err(|err| {
        let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
        RuntimeError::Source {
            line: valid.iter().filter(|byte| **byte == b'\n').count() + 1,
            message: "invalid utf-8".to_string(),
        }
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct IniSection {
    name: String,
    keys: Vec<(String, String)>,
}

impl IniSection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            keys: Vec::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.keys
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn set(&mut self, key: &str, value: String) {
        match self.keys.iter_mut().find(|(name, _)| name == key) {
            Some((_, existing)) => *existing = value,
            None => self.keys.push((key.to_string(), value)),
        }
    }
}

/// An INI document merged from one or more sources.
///
/// Sections keep first-seen order; a repeated section merges into the
/// earlier one and a repeated key overrides its value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniCatalog {
    sections: Vec<IniSection>,
}

impl Default for IniCatalog {
    fn default() -> Self {
        Self {
            sections: vec![IniSection::new(DEFAULT_SECTION)],
        }
    }
}

impl IniCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(input: &str) -> RuntimeResult<Self> {
        let mut catalog = Self::new();
        catalog.merge_str(input)?;
        Ok(catalog)
    }

    pub fn from_sources(sources: &[CatalogSource]) -> RuntimeResult<Self> {
        let mut catalog = Self::new();
        for source in sources {
            catalog.merge_str(&source.read()?)?;
        }
        Ok(catalog)
    }

    pub fn merge_str(&mut self, input: &str) -> RuntimeResult<()> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        let mut current = self.section_index(DEFAULT_SECTION);
        let mut lines = input.lines().enumerate();

        while let Some((idx, raw_line)) = lines.next() {
            let line_no = idx + 1;
            let trimmed = raw_line.trim();
            if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix('[') {
                let name = rest
                    .strip_suffix(']')
                    .ok_or_else(|| source_error(line_no, "unclosed section header"))?
                    .trim();
                if name.is_empty() {
                    return Err(source_error(line_no, "empty section name"));
                }
                current = self.section_index(name);
                continue;
            }

            let (key, value) = split_key_value(trimmed).ok_or_else(|| {
                source_error(line_no, &format!("key-value delimiter not found: {trimmed}"))
            })?;
            if key.is_empty() {
                return Err(source_error(line_no, "missing key"));
            }

            let mut value = value.to_string();
            while let Some(stripped) = value.strip_suffix('\\') {
                let Some((_, next)) = lines.next() else {
                    value = stripped.trim_end().to_string();
                    break;
                };
                value = format!("{stripped}{}", next.trim());
            }

            self.sections[current].set(key, clean_value(&value));
        }
        Ok(())
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_str())
    }

    /// The raw value of `key`, before interpolation.
    pub fn raw_value(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    /// The value of `key` with `%(name)s` references expanded. Expansion
    /// stops, leaving the remaining references literal, once a substitution
    /// would grow the value past 64 KiB.
    pub fn value(&self, section: &str, key: &str) -> Option<String> {
        let section = self.section(section)?;
        let value = section.get(key)?;
        Some(self.interpolate(section, key, value))
    }

    /// Flattens the document into `(section, key, value)` triples with
    /// interpolation applied.
    pub fn entries(&self) -> Vec<SourceEntry> {
        self.sections
            .iter()
            .flat_map(|section| {
                section.keys.iter().map(move |(key, value)| {
                    SourceEntry::new(
                        section.name.as_str(),
                        key.as_str(),
                        self.interpolate(section, key, value),
                    )
                })
            })
            .collect()
    }

    fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|section| section.name == name)
    }

    fn section_index(&mut self, name: &str) -> usize {
        if let Some(index) = self.sections.iter().position(|section| section.name == name) {
            return index;
        }
        self.sections.push(IniSection::new(name));
        self.sections.len() - 1
    }

    fn interpolate(&self, section: &IniSection, key: &str, value: &str) -> String {
        let mut value = value.to_string();
        for _ in 0..MAX_INTERPOLATION_DEPTH {
            let Some(reference) = find_reference(&value) else {
                break;
            };
            let name = &reference[2..reference.len() - 2];
            let local = section.get(name).filter(|_| name != key);
            let Some(replacement) = local.or_else(|| {
                self.section(DEFAULT_SECTION)
                    .and_then(|defaults| defaults.get(name))
            }) else {
                break;
            };
            let count = value.matches(reference.as_str()).count();
            let expanded = value.len() - count * reference.len() + count * replacement.len();
            if expanded > MAX_INTERPOLATED_LEN {
                break;
            }
            value = value.replace(&reference, replacement);
        }
        value
    }
}

/// Reads every source in order into one list of catalog triples.
pub fn read_sources(sources: &[CatalogSource]) -> RuntimeResult<Vec<SourceEntry>> {
    Ok(IniCatalog::from_sources(sources)?.entries())
}

fn source_error(line: usize, message: &str) -> RuntimeError {
    RuntimeError::Source {
        line,
        message: message.to_string(),
    }
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let index = line.find(['=', ':'])?;
    Some((line[..index].trim(), line[index + 1..].trim()))
}

fn clean_value(value: &str) -> String {
    for quote in ['"', '`'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.replace("\\;", ";").replace("\\#", "#")
}

/// Finds the first `%(name)s` reference with a non-empty name.
fn find_reference(value: &str) -> Option<String> {
    let mut rest = value;
    while let Some(start) = rest.find("%(") {
        let after = &rest[start + 2..];
        let Some(close) = after.find(')') else {
            return None;
        };
        if close > 0 && after[close + 1..].starts_with('s') {
            return Some(rest[start..start + 2 + close + 2].to_string());
        }
        rest = &rest[start + 2..];
    }
    None
}
