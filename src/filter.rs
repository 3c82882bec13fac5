use crate::error::{Error, Result};
use std::fmt;

/// A single text transformation applied to a password candidate.
///
/// Filters carry no state; applying the same filter to the same input always
/// yields the same output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Replaces every non-overlapping occurrence of `from` with `to`.
    ///
    /// An empty `from` follows `str::replace` and inserts `to` before every
    /// character and at the end. The parser never produces this form.
    Replace { from: String, to: String },
    /// Removes every occurrence of one character.
    Skip(char),
    /// Keeps `length` characters starting at `start`, or everything from
    /// `start` when `length` is `None`. Indices count characters.
    Substring { start: i64, length: Option<usize> },
    /// Maps `a..t`/`A..T` to digits cyclically and drops `u..z`, `U..Z`, `+`, `/`.
    DigitMap,
    Uppercase,
    Lowercase,
}

impl Filter {
    pub fn apply(&self, input: &str) -> Result<String> {
        match self {
            Filter::Replace { from, to } => Ok(input.replace(from.as_str(), to)),
            Filter::Skip(c) => Ok(input.chars().filter(|ch| ch != c).collect()),
            Filter::Substring { start, length } => substring(input, *start, *length),
            Filter::DigitMap => Ok(input.chars().filter_map(to_digit).collect()),
            Filter::Uppercase => Ok(input.to_ascii_uppercase()),
            Filter::Lowercase => Ok(input.to_ascii_lowercase()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Filter::Replace { .. } => "replace",
            Filter::Skip(_) => "skip",
            Filter::Substring { .. } => "substring",
            Filter::DigitMap => "digit",
            Filter::Uppercase => "uppercase",
            Filter::Lowercase => "lowercase",
        }
    }
}

/// Applies `filters` in order, feeding each output into the next filter.
pub fn apply_chain(filters: &[Filter], input: &str) -> Result<String> {
    filters
        .iter()
        .try_fold(input.to_owned(), |current, filter| filter.apply(&current))
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Replace { from, to } => write!(f, "@replace {} {}", from, to),
            Filter::Skip(c) => write!(f, "@skip {}", c),
            Filter::Substring {
                start,
                length: Some(length),
            } => write!(f, "@substring {} {}", start, length),
            Filter::Substring {
                start,
                length: None,
            } => write!(f, "@substring {}", start),
            other => write!(f, "@{}", other.kind()),
        }
    }
}

fn substring(input: &str, start: i64, length: Option<usize>) -> Result<String> {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();

    let begin = usize::try_from(start)
        .ok()
        .filter(|&begin| begin <= len)
        .ok_or(Error::SubstringOutOfRange { start, len })?;

    let end = match length {
        Some(length) => begin.saturating_add(length).min(len),
        None => len,
    };

    Ok(chars[begin..end].iter().collect())
}

fn to_digit(c: char) -> Option<char> {
    match c {
        'a'..='t' => Some(char::from(b'0' + (c as u8 - b'a') % 10)),
        'A'..='T' => Some(char::from(b'0' + (c as u8 - b'A') % 10)),
        'u'..='z' | 'U'..='Z' | '+' | '/' => None,
        other => Some(other),
    }
}
