//! Word scanner for the line-oriented OBJ/MTL grammars.

use crate::error::ScanError;

/// Characters that separate words. Parens and quotes are treated as blanks so
/// names written as `"foo"` or `(foo)` come out bare.
const DELIMITERS: [char; 5] = ['\t', ' ', '(', ')', '"'];

#[inline]
fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Cursor over one line of text.
#[derive(Clone, Debug)]
pub struct Scanner<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, cursor: 0 }
    }

    /// Next word, or `None` once only delimiters remain.
    pub fn next_word(&mut self) -> Option<&'a str> {
        let rest = self.text.get(self.cursor..)?;
        let start = rest.find(|c: char| !is_delimiter(c))?;
        let word_and_tail = &rest[start..];
        let len = word_and_tail
            .find(is_delimiter)
            .unwrap_or(word_and_tail.len());

        let word = &word_and_tail[..len];
        // step over the word and the single delimiter that ended it
        let mut consumed = self.cursor + start + len;
        if let Some(c) = word_and_tail[len..].chars().next() {
            consumed += c.len_utf8();
        }
        self.cursor = consumed;
        Some(word)
    }

    pub fn next_int(&mut self) -> Result<i32, ScanError> {
        parse_int(self.next_word().ok_or(ScanError::MissingToken)?)
    }

    pub fn next_float(&mut self) -> Result<f32, ScanError> {
        parse_float(self.next_word().ok_or(ScanError::MissingToken)?)
    }

    /// Reads `N` floats in a row; fails on the first missing or malformed one.
    pub fn next_floats<const N: usize>(&mut self) -> Result<[f32; N], ScanError> {
        let mut out = [0.0; N];
        for slot in out.iter_mut() {
            *slot = self.next_float()?;
        }
        Ok(out)
    }
}

pub fn parse_int(token: &str) -> Result<i32, ScanError> {
    token.parse().map_err(|_| ScanError::InvalidNumber {
        token: token.to_owned(),
    })
}

/// Finite floats only: `nan`, `inf` and `infinity` are rejected like any other
/// malformed token.
pub fn parse_float(token: &str) -> Result<f32, ScanError> {
    token
        .parse::<f32>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| ScanError::InvalidNumber {
            token: token.to_owned(),
        })
}
