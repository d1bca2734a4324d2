//! Scanner for plural placeholder tokens of the form `${noun, index}`.

/// A slice of a message template: plain text or a placeholder token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Piece<'a> {
    Text(&'a str),
    Token(Token<'a>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token exactly as written, e.g. `${file, 1}`.
    pub literal: &'a str,
    pub noun: &'a str,
    pub digits: &'a str,
}

impl Token<'_> {
    /// Saturates on overflow; such an index never matches an argument.
    pub fn index(&self) -> usize {
        self.digits.parse().unwrap_or(usize::MAX)
    }
}

pub struct Scanner<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    fn match_token(&self, start: usize) -> Option<(Token<'a>, usize)> {
        let bytes = self.input.as_bytes();
        let mut pos = start + 2;

        let noun_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == noun_start || bytes.get(pos) != Some(&b',') {
            return None;
        }
        let noun_end = pos;
        pos += 1;

        while pos < bytes.len() && is_space(bytes[pos]) {
            pos += 1;
        }
        let digits_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == digits_start || bytes.get(pos) != Some(&b'}') {
            return None;
        }
        let digits_end = pos;
        pos += 1;

        let token = Token {
            literal: &self.input[start..pos],
            noun: &self.input[noun_start..noun_end],
            digits: &self.input[digits_start..digits_end],
        };
        Some((token, pos))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.input.len() {
            return None;
        }
        let start = self.offset;
        let rest = &self.input[start..];
        if rest.starts_with("${") {
            if let Some((token, end)) = self.match_token(start) {
                self.offset = end;
                return Some(Piece::Token(token));
            }
        }

        let mut search = start + rest.chars().next().map_or(1, char::len_utf8);
        while let Some(found) = self.input[search..].find("${") {
            let candidate = search + found;
            if self.match_token(candidate).is_some() {
                self.offset = candidate;
                return Some(Piece::Text(&self.input[start..candidate]));
            }
            search = candidate + 1;
        }
        self.offset = self.input.len();
        Some(Piece::Text(&self.input[start..]))
    }
}

pub fn scan(input: &str) -> Scanner<'_> {
    Scanner::new(input)
}

fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}
