use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::printf::{Printer, sprintf};
use crate::{Arg, Operands, PluralForm, PluralRule};

/// Per-form replacement strings of one plural noun.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PluralForms {
    forms: BTreeMap<PluralForm, String>,
}

impl PluralForms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, form: PluralForm, value: impl Into<String>) -> Option<String> {
        self.forms.insert(form, value.into())
    }

    pub fn get(&self, form: PluralForm) -> Option<&str> {
        self.forms.get(&form).map(String::as_str)
    }

    /// The string for `form`, falling back to `other` when the noun does not
    /// define that form.
    pub fn select(&self, form: PluralForm) -> &str {
        self.get(form)
            .or_else(|| self.get(PluralForm::Other))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluralPlaceholder {
    name: String,
    noun: String,
    forms: Arc<PluralForms>,
}

impl PluralPlaceholder {
    pub(crate) fn new(index: usize, noun: &str, forms: Arc<PluralForms>) -> Self {
        Self {
            name: marker_name(index),
            noun: String::from(noun),
            forms,
        }
    }

    /// The marker standing in for this placeholder in [`Message::format`].
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn noun(&self) -> &str {
        &self.noun
    }

    pub fn forms(&self) -> &PluralForms {
        &self.forms
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Segment {
    Text(String),
    Marker(usize),
}

/// A compiled message template.
///
/// Messages without plural placeholders keep only their format string, so
/// translating them costs a single formatting pass at most.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    format: String,
    segments: Vec<Segment>,
    placeholders: BTreeMap<usize, PluralPlaceholder>,
}

impl Message {
    pub fn plain(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            segments: Vec::new(),
            placeholders: BTreeMap::new(),
        }
    }

    pub(crate) fn from_parts(
        segments: Vec<Segment>,
        placeholders: BTreeMap<usize, PluralPlaceholder>,
    ) -> Self {
        let mut format = String::new();
        for segment in &segments {
            match segment {
                Segment::Text(text) => format.push_str(text),
                Segment::Marker(index) => format.push_str(&marker_name(*index)),
            }
        }
        Self {
            format,
            segments,
            placeholders,
        }
    }

    /// The template with plural tokens rewritten to `${index}` markers.
    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn placeholders(&self) -> &BTreeMap<usize, PluralPlaceholder> {
        &self.placeholders
    }

    pub fn placeholder(&self, index: usize) -> Option<&PluralPlaceholder> {
        self.placeholders.get(&index)
    }

    pub fn has_plurals(&self) -> bool {
        !self.placeholders.is_empty()
    }

    /// Resolves plural markers with `rule` (every marker takes the `other`
    /// form when there is no rule), then formats positional arguments.
    ///
    /// Without arguments no formatting pass runs, so `%` in plain prose is
    /// returned as written. Plural markers still resolve, and with no
    /// arguments each one renders `<no arg for index N>`; the surrounding
    /// directives such as `%[1]d` are left untouched.
    pub fn translate(&self, rule: Option<&PluralRule>, args: &[Arg]) -> String {
        if self.placeholders.is_empty() {
            if args.is_empty() {
                return self.format.clone();
            }
            return sprintf(&self.format, args);
        }

        let mut printer = Printer::new(args);
        for segment in &self.segments {
            match segment {
                Segment::Text(text) if args.is_empty() => printer.push_literal(text),
                Segment::Text(text) => printer.write_format(text),
                Segment::Marker(index) => {
                    let resolved = self.resolve(*index, rule, args);
                    printer.push_literal(&resolved);
                }
            }
        }
        printer.finish()
    }

    fn resolve(&self, index: usize, rule: Option<&PluralRule>, args: &[Arg]) -> String {
        let Some(placeholder) = self.placeholders.get(&index) else {
            return marker_name(index);
        };
        let Some(arg) = index.checked_sub(1).and_then(|position| args.get(position)) else {
            return format!("<no arg for index {index}>");
        };
        let operands = match Operands::try_from(arg) {
            Ok(operands) => operands,
            Err(err) => return format!("<{err}>"),
        };
        let form = rule.map_or(PluralForm::Other, |rule| rule.plural_form(&operands));
        String::from(placeholder.forms.select(form))
    }
}

fn marker_name(index: usize) -> String {
    format!("${{{index}}}")
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;

    use super::{Message, PluralForms, PluralPlaceholder, Segment};
    use crate::{Arg, Operands, PluralForm, PluralRule};

    fn one_other(ops: &Operands) -> PluralForm {
        if ops.i == 1 && ops.v == 0 {
            PluralForm::One
        } else {
            PluralForm::Other
        }
    }

    const ENGLISH: PluralRule = PluralRule {
        forms: &[PluralForm::One, PluralForm::Other],
        select: one_other,
    };

    fn files() -> Arc<PluralForms> {
        let mut forms = PluralForms::new();
        forms.insert(PluralForm::One, "file");
        forms.insert(PluralForm::Other, "files");
        Arc::new(forms)
    }

    fn file_message() -> Message {
        let mut placeholders = BTreeMap::new();
        placeholders.insert(1, PluralPlaceholder::new(1, "file", files()));
        Message::from_parts(
            vec![
                Segment::Text(String::from("%[1]d ")),
                Segment::Marker(1),
                Segment::Text(String::from(" (100%%)")),
            ],
            placeholders,
        )
    }

    #[test]
    fn format_uses_index_markers() {
        assert_eq!(file_message().format(), "%[1]d ${1} (100%%)");
    }

    #[test]
    fn selects_form_by_rule() {
        let message = file_message();
        assert_eq!(message.translate(Some(&ENGLISH), &[Arg::Int(1)]), "1 file (100%)");
        assert_eq!(message.translate(Some(&ENGLISH), &[Arg::Int(3)]), "3 files (100%)");
        assert_eq!(
            message.translate(Some(&ENGLISH), &[Arg::Str(String::from("1.0"))]),
            "%!d(string=1.0) files (100%)"
        );
    }

    #[test]
    fn missing_rule_selects_other() {
        let message = file_message();
        assert_eq!(message.translate(None, &[Arg::Int(1)]), "1 files (100%)");
    }

    #[test]
    fn reports_extraction_errors_inline() {
        let message = file_message();
        assert_eq!(
            message.translate(Some(&ENGLISH), &[Arg::Float(1.0)]),
            "%!d(float64=1) <unsupported argument type float: expected integer or decimal string> (100%)"
        );
    }

    #[test]
    fn without_args_text_is_not_formatted() {
        let message = file_message();
        assert_eq!(
            message.translate(Some(&ENGLISH), &[]),
            "%[1]d <no arg for index 1> (100%%)"
        );
    }

    #[test]
    fn plain_message_returned_verbatim_without_args() {
        let message = Message::plain("100% sure");
        assert!(!message.has_plurals());
        assert_eq!(message.translate(None, &[]), "100% sure");
    }

    #[test]
    fn selected_form_is_never_reinterpreted() {
        let mut forms = PluralForms::new();
        forms.insert(PluralForm::Other, "%d ${2} items");
        let mut placeholders = BTreeMap::new();
        placeholders.insert(1, PluralPlaceholder::new(1, "item", Arc::new(forms)));
        let message = Message::from_parts(
            vec![Segment::Marker(1), Segment::Text(String::from(" / %[1]d"))],
            placeholders,
        );
        assert_eq!(message.translate(None, &[Arg::Int(4)]), "%d ${2} items / 4");
    }

    #[test]
    fn missing_form_falls_back_to_other() {
        let mut forms = PluralForms::new();
        forms.insert(PluralForm::Other, "文件");
        assert_eq!(forms.select(PluralForm::One), "文件");
        assert_eq!(PluralForms::new().select(PluralForm::Few), "");
    }
}
