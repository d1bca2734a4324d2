//! Printf-style positional formatting with Go `fmt` verb semantics.
//!
//! Directives are `%[flags][width][.precision][argument index]verb`, where the
//! argument index is written `[n]` and is 1-based. Problems never abort the
//! output; they render inline as `%!d(MISSING)`, `%!d(BADINDEX)`,
//! `%!(NOVERB)` or `%!s(int=1)` for a verb the argument cannot satisfy.
//! Arguments that no directive consumes are ignored.

use alloc::format;
use alloc::string::String;
use core::fmt::Write;

use crate::Arg;

const MAX_NUM: usize = 1_000_000;

pub fn sprintf(format: &str, args: &[Arg]) -> String {
    let mut printer = Printer::new(args);
    printer.write_format(format);
    printer.finish()
}

#[derive(Clone, Copy, Debug, Default)]
struct Directive {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Incremental formatter. Argument numbering carries over between calls to
/// [`Printer::write_format`], and text passed to [`Printer::push_literal`]
/// is copied without interpretation.
pub struct Printer<'a> {
    args: &'a [Arg],
    arg_num: usize,
    output: String,
}

impl<'a> Printer<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            args,
            arg_num: 0,
            output: String::new(),
        }
    }

    pub fn push_literal(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub fn finish(self) -> String {
        self.output
    }

    pub fn write_format(&mut self, format: &str) {
        let bytes = format.as_bytes();
        let end = bytes.len();
        let mut i = 0;
        while i < end {
            let start = i;
            while i < end && bytes[i] != b'%' {
                i += 1;
            }
            if i > start {
                self.output.push_str(&format[start..i]);
            }
            if i >= end {
                break;
            }
            i += 1;

            let mut directive = Directive::default();
            while i < end {
                match bytes[i] {
                    b'#' => directive.sharp = true,
                    b'0' => directive.zero = !directive.minus,
                    b'+' => directive.plus = true,
                    b'-' => {
                        directive.minus = true;
                        directive.zero = false;
                    }
                    b' ' => directive.space = true,
                    _ => break,
                }
                i += 1;
            }

            let mut good_arg_num = true;
            let mut after_index = self.arg_number(bytes, &mut i, &mut good_arg_num);

            if i < end && bytes[i] == b'*' {
                i += 1;
                match self.int_from_arg() {
                    Some(width) => {
                        if width < 0 {
                            directive.minus = true;
                            directive.zero = false;
                        }
                        directive.width = Some(width.unsigned_abs() as usize);
                    }
                    None => self.output.push_str("%!(BADWIDTH)"),
                }
                after_index = false;
            } else {
                let (width, next) = parse_num(bytes, i);
                i = next;
                if after_index && width.is_some() {
                    good_arg_num = false;
                }
                directive.width = width;
            }

            if i < end && bytes[i] == b'.' {
                i += 1;
                if after_index {
                    good_arg_num = false;
                }
                after_index = self.arg_number(bytes, &mut i, &mut good_arg_num);
                if i < end && bytes[i] == b'*' {
                    i += 1;
                    match self.int_from_arg() {
                        Some(precision) if precision >= 0 => {
                            directive.precision = Some(precision as usize);
                        }
                        _ => self.output.push_str("%!(BADPREC)"),
                    }
                    after_index = false;
                } else {
                    let (precision, next) = parse_num(bytes, i);
                    i = next;
                    directive.precision = Some(precision.unwrap_or(0));
                }
            }

            if !after_index {
                self.arg_number(bytes, &mut i, &mut good_arg_num);
            }

            let Some(verb) = format[i..].chars().next() else {
                self.output.push_str("%!(NOVERB)");
                break;
            };
            i += verb.len_utf8();

            if verb == '%' {
                self.output.push('%');
                continue;
            }
            if !good_arg_num {
                let _ = write!(self.output, "%!{verb}(BADINDEX)");
                continue;
            }
            let Some(arg) = self.args.get(self.arg_num) else {
                let _ = write!(self.output, "%!{verb}(MISSING)");
                continue;
            };
            self.arg_num += 1;
            self.print_arg(arg, verb, &directive);
        }
    }

    /// Consumes an explicit `[n]` index at `*i`. Returns whether one was
    /// present; an out-of-range or malformed index clears `good`.
    fn arg_number(&mut self, bytes: &[u8], i: &mut usize, good: &mut bool) -> bool {
        if *i >= bytes.len() || bytes[*i] != b'[' {
            return false;
        }
        let (index, width, ok) = parse_arg_number(&bytes[*i..]);
        *i += width;
        match index {
            Some(index) if ok && index < self.args.len() => {
                self.arg_num = index;
                true
            }
            _ => {
                *good = false;
                ok
            }
        }
    }

    fn int_from_arg(&mut self) -> Option<i64> {
        let arg = self.args.get(self.arg_num)?;
        self.arg_num += 1;
        let value = match arg {
            Arg::Int(value) => *value,
            Arg::Uint(value) => i64::try_from(*value).ok()?,
            _ => return None,
        };
        let limit = MAX_NUM as i64;
        (-limit..=limit).contains(&value).then_some(value)
    }

    fn print_arg(&mut self, arg: &Arg, verb: char, directive: &Directive) {
        if verb == 'T' {
            self.pad(arg.type_name(), directive, false);
            return;
        }
        match arg {
            Arg::Int(value) => {
                self.fmt_integer(value.unsigned_abs(), *value < 0, verb, directive, arg)
            }
            Arg::Uint(value) => self.fmt_integer(*value, false, verb, directive, arg),
            Arg::Str(value) => self.fmt_string(value, verb, directive, arg),
            Arg::Float(value) => self.fmt_float(*value, verb, directive, arg),
            Arg::Bool(value) => match verb {
                't' | 'v' => self.pad(if *value { "true" } else { "false" }, directive, false),
                _ => self.bad_verb(verb, arg),
            },
        }
    }

    fn fmt_integer(
        &mut self,
        magnitude: u64,
        negative: bool,
        verb: char,
        directive: &Directive,
        arg: &Arg,
    ) {
        let mut digits = match verb {
            'd' | 'v' => format!("{magnitude}"),
            'x' => format!("{magnitude:x}"),
            'X' => format!("{magnitude:X}"),
            'o' | 'O' => format!("{magnitude:o}"),
            'b' => format!("{magnitude:b}"),
            'c' => {
                let ch = u32::try_from(magnitude)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                let mut buf = [0u8; 4];
                self.pad(ch.encode_utf8(&mut buf), directive, false);
                return;
            }
            'q' => {
                let ch = u32::try_from(magnitude)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                self.pad(&format!("{ch:?}"), directive, false);
                return;
            }
            _ => return self.bad_verb(verb, arg),
        };

        if let Some(precision) = directive.precision {
            if precision == 0 && magnitude == 0 {
                digits.clear();
            }
            while digits.len() < precision {
                digits.insert(0, '0');
            }
        }
        let prefix = match (directive.sharp, verb) {
            (true, 'x') => "0x",
            (true, 'X') => "0X",
            (true, 'o') => "0",
            (true, 'b') => "0b",
            (_, 'O') => "0o",
            _ => "",
        };
        let sign = sign_for(negative, directive);
        if directive.zero && directive.precision.is_none() {
            if let Some(width) = directive.width {
                let used = sign.len() + prefix.len();
                while digits.len() + used < width {
                    digits.insert(0, '0');
                }
            }
        }
        let body = format!("{sign}{prefix}{digits}");
        self.pad(&body, directive, false);
    }

    fn fmt_string(&mut self, value: &str, verb: char, directive: &Directive, arg: &Arg) {
        let text = truncate(value, directive.precision);
        match verb {
            's' | 'v' => self.pad(text, directive, directive.zero),
            'q' => self.pad(&format!("{text:?}"), directive, false),
            'x' | 'X' => {
                let mut hex = String::with_capacity(text.len() * 2 + 2);
                if directive.sharp {
                    hex.push_str(if verb == 'x' { "0x" } else { "0X" });
                }
                for byte in text.bytes() {
                    let _ = if verb == 'x' {
                        write!(hex, "{byte:02x}")
                    } else {
                        write!(hex, "{byte:02X}")
                    };
                }
                self.pad(&hex, directive, false);
            }
            _ => self.bad_verb(verb, arg),
        }
    }

    fn fmt_float(&mut self, value: f64, verb: char, directive: &Directive, arg: &Arg) {
        if !matches!(verb, 'f' | 'F' | 'e' | 'E' | 'g' | 'G' | 'v') {
            return self.bad_verb(verb, arg);
        }
        if value.is_nan() {
            self.pad("NaN", directive, false);
            return;
        }
        if value.is_infinite() {
            self.pad(if value > 0.0 { "+Inf" } else { "-Inf" }, directive, false);
            return;
        }

        let body = match verb {
            'f' | 'F' => format!("{:.*}", directive.precision.unwrap_or(6), value),
            'e' | 'E' => exponent(value, directive.precision.unwrap_or(6), verb == 'E'),
            _ => general(value, directive.precision, verb == 'G'),
        };
        let (negative, magnitude) = match body.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, body.as_str()),
        };
        let sign = sign_for(negative, directive);
        let mut digits = String::from(magnitude);
        if directive.zero {
            if let Some(width) = directive.width {
                while digits.len() + sign.len() < width {
                    digits.insert(0, '0');
                }
            }
        }
        let body = format!("{sign}{digits}");
        self.pad(&body, directive, false);
    }

    fn bad_verb(&mut self, verb: char, arg: &Arg) {
        let _ = write!(self.output, "%!{verb}({}={arg})", arg.type_name());
    }

    fn pad(&mut self, body: &str, directive: &Directive, zero: bool) {
        let len = body.chars().count();
        let fill = directive.width.unwrap_or(0).saturating_sub(len);
        if fill == 0 {
            self.output.push_str(body);
        } else if directive.minus {
            self.output.push_str(body);
            self.output.extend(core::iter::repeat_n(' ', fill));
        } else {
            let ch = if zero { '0' } else { ' ' };
            self.output.extend(core::iter::repeat_n(ch, fill));
            self.output.push_str(body);
        }
    }
}

fn sign_for(negative: bool, directive: &Directive) -> &'static str {
    if negative {
        "-"
    } else if directive.plus {
        "+"
    } else if directive.space {
        " "
    } else {
        ""
    }
}

fn truncate(value: &str, precision: Option<usize>) -> &str {
    match precision.and_then(|precision| value.char_indices().nth(precision)) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

fn parse_num(bytes: &[u8], start: usize) -> (Option<usize>, usize) {
    let mut i = start;
    let mut value: Option<usize> = None;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        let digit = usize::from(bytes[i] - b'0');
        value = value
            .map(|current| current * 10 + digit)
            .or(Some(digit))
            .filter(|value| *value <= MAX_NUM);
        if value.is_none() {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            return (None, i);
        }
        i += 1;
    }
    (value, i)
}

/// Parses `[n]` at the start of `bytes`, returning the 0-based index, the
/// number of bytes consumed and whether the brackets were well formed.
fn parse_arg_number(bytes: &[u8]) -> (Option<usize>, usize, bool) {
    if bytes.len() < 3 {
        return (None, 1, false);
    }
    for close in 1..bytes.len() {
        if bytes[close] == b']' {
            let (value, next) = parse_num(bytes, 1);
            return match value {
                Some(value) if next == close => (value.checked_sub(1), close + 1, true),
                _ => (None, close + 1, false),
            };
        }
    }
    (None, 1, false)
}

fn split_exponent(scientific: &str) -> (&str, i32) {
    match scientific.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (scientific, 0),
    }
}

fn join_exponent(mantissa: &str, exp: i32, upper: bool) -> String {
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{sign}{:02}", exp.unsigned_abs())
}

fn exponent(value: f64, precision: usize, upper: bool) -> String {
    let scientific = format!("{value:.precision$e}");
    let (mantissa, exp) = split_exponent(&scientific);
    join_exponent(mantissa, exp, upper)
}

/// `%g`: scientific notation for large or small exponents, plain decimal
/// otherwise, without trailing zeros.
fn general(value: f64, precision: Option<usize>, upper: bool) -> String {
    let significant = precision.map(|precision| precision.max(1));
    let scientific = match significant {
        Some(digits) => format!("{:.*e}", digits - 1, value),
        None => format!("{value:e}"),
    };
    let (mantissa, exp) = split_exponent(&scientific);
    let limit = significant.map_or(6, |digits| digits as i32);
    if exp < -4 || exp >= limit {
        let mantissa = trim_fraction(mantissa);
        return join_exponent(mantissa, exp, upper);
    }
    match significant {
        None => format!("{value}"),
        Some(digits) => {
            let decimals = (digits as i32 - 1 - exp).max(0) as usize;
            String::from(trim_fraction(&format!("{value:.decimals$}")))
        }
    }
}

fn trim_fraction(value: &str) -> &str {
    if value.contains('.') {
        value.trim_end_matches('0').trim_end_matches('.')
    } else {
        value
    }
}
