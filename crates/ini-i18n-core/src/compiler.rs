use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use crate::message::Segment;
use crate::placeholder::{Piece, scan};
use crate::{
    CoreError, CoreResult, Message, PLURALS_SECTION, PluralForm, PluralForms, PluralPlaceholder,
    SourceEntry,
};

/// Data-quality problems found while compiling; they never fail compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileWarning {
    /// A message references a noun with no entry in the plurals section.
    UnknownPlural { key: String, noun: String },
    /// A plurals key that is not `<noun>.<form>` with a known form.
    UnknownPluralForm { key: String },
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileWarning::UnknownPlural { key, noun } => {
                write!(f, "message {key} references undefined plural {noun:?}")
            }
            CompileWarning::UnknownPluralForm { key } => {
                write!(f, "ignoring plural key {key:?} without a known form suffix")
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CompiledMessages {
    pub messages: BTreeMap<String, Message>,
    pub warnings: Vec<CompileWarning>,
}

/// Builds messages keyed `<section>::<key>` from catalog triples. The
/// plurals section only contributes plural forms and yields no messages.
pub fn compile_messages(entries: &[SourceEntry]) -> CoreResult<CompiledMessages> {
    let mut compiler = Compiler::new();
    compiler.collect_plurals(entries);

    let mut messages = BTreeMap::new();
    for entry in entries.iter().filter(|entry| entry.section != PLURALS_SECTION) {
        let key = entry.message_key();
        let message = compiler.compile_message(&key, &entry.value)?;
        messages.insert(key, message);
    }

    Ok(CompiledMessages {
        messages,
        warnings: compiler.warnings,
    })
}

struct Compiler {
    plurals: BTreeMap<String, Arc<PluralForms>>,
    warnings: Vec<CompileWarning>,
}

impl Compiler {
    fn new() -> Self {
        Self {
            plurals: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    fn collect_plurals(&mut self, entries: &[SourceEntry]) {
        let mut groups: BTreeMap<String, PluralForms> = BTreeMap::new();
        for entry in entries.iter().filter(|entry| entry.section == PLURALS_SECTION) {
            let Some((noun, form)) = entry.key.split_once('.') else {
                self.warnings.push(CompileWarning::UnknownPluralForm {
                    key: entry.key.clone(),
                });
                continue;
            };
            let forms = groups.entry(noun.to_string()).or_default();
            match form.parse::<PluralForm>() {
                Ok(form) => {
                    forms.insert(form, entry.value.clone());
                }
                Err(_) => self.warnings.push(CompileWarning::UnknownPluralForm {
                    key: entry.key.clone(),
                }),
            }
        }
        self.plurals = groups
            .into_iter()
            .map(|(noun, forms)| (noun, Arc::new(forms)))
            .collect();
    }

    fn compile_message(&mut self, key: &str, template: &str) -> CoreResult<Message> {
        if !template.contains("${") {
            return Ok(Message::plain(template));
        }

        let mut segments = Vec::new();
        let mut placeholders = BTreeMap::new();
        let mut text = String::new();
        for piece in scan(template) {
            let token = match piece {
                Piece::Text(value) => {
                    text.push_str(value);
                    continue;
                }
                Piece::Token(token) => token,
            };

            let index = token.index();
            if index < 1 {
                return Err(CoreError::InvalidPluralIndex {
                    token: token.literal.to_string(),
                    index,
                });
            }

            let Some(forms) = self.plurals.get(token.noun) else {
                self.warnings.push(CompileWarning::UnknownPlural {
                    key: key.to_string(),
                    noun: token.noun.to_string(),
                });
                let _ = write!(text, "<no such plural: {}>", token.noun);
                continue;
            };

            if !text.is_empty() {
                segments.push(Segment::Text(core::mem::take(&mut text)));
            }
            segments.push(Segment::Marker(index));
            placeholders.insert(
                index,
                PluralPlaceholder::new(index, token.noun, Arc::clone(forms)),
            );
        }

        if placeholders.is_empty() {
            return Ok(Message::plain(text));
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(Message::from_parts(segments, placeholders))
    }
}
