//! Conversions between the three ways of indexing a string.
//!
//! Operations measure everything in unicode codepoints (`char`s). Hosts
//! usually index their text in some other unit: editors built on JavaScript or
//! Java strings count UTF-16 code units, while Rust strings are sliced by
//! UTF-8 bytes. The helpers here are the only place where those units meet.
//!
//! ```text
//! "a👻b"
//!  codepoints:  a  👻        b     -> 3
//!  utf-16:      a  \ud83d \udc7b b -> 4
//!  utf-8:       a  f0 9f 91 bb  b  -> 6
//! ```
//!
//! A UTF-16 offset that lands between the two halves of a surrogate pair does
//! not name a codepoint boundary and is rejected with
//! [`UnicodeError::InvalidOffset`].

pub use ropey::str_utils::{
  byte_to_char_idx,
  char_to_byte_idx,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UnicodeError>;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnicodeError {
  #[error("invalid offset {offset}: splits a utf-16 surrogate pair")]
  InvalidOffset { offset: usize },
  #[error("utf-16 offset {offset} is out of bounds for length {len}")]
  OffsetOutOfBounds { offset: usize, len: usize },
}

/// Number of codepoints in `text`.
#[inline]
pub fn char_len(text: &str) -> usize {
  byte_to_char_idx(text, text.len())
}

/// Number of UTF-16 code units needed to encode `text`.
#[inline]
pub fn utf16_len(text: &str) -> usize {
  text.chars().map(char::len_utf16).sum()
}

/// Counts the codepoints contained in the first `offset` UTF-16 code units of
/// `text`.
///
/// Characters outside the basic multilingual plane occupy two code units but
/// count as a single codepoint.
pub fn utf16_to_char_idx(text: &str, offset: usize) -> Result<usize> {
  let mut units = 0;
  let mut chars = 0;

  for ch in text.chars() {
    if units >= offset {
      break;
    }
    units += ch.len_utf16();
    chars += 1;
  }

  if units > offset {
    return Err(UnicodeError::InvalidOffset { offset });
  }
  if units < offset {
    return Err(UnicodeError::OffsetOutOfBounds {
      offset,
      len: units,
    });
  }
  Ok(chars)
}

/// Walks `char_idx` codepoints forward and returns the UTF-16 offset reached.
///
/// Past-the-end indices clamp to the UTF-16 length of `text`.
pub fn char_to_utf16_idx(text: &str, char_idx: usize) -> usize {
  text.chars().take(char_idx).map(char::len_utf16).sum()
}

/// Like [`char_to_byte_idx`], but returns `None` when `char_idx` is past the
/// end of `text` instead of clamping.
pub fn checked_char_to_byte_idx(text: &str, char_idx: usize) -> Option<usize> {
  let byte_idx = char_to_byte_idx(text, char_idx);
  (byte_idx < text.len() || char_len(text) == char_idx).then_some(byte_idx)
}

/// Slices `text` by codepoint indices. `end` defaults to the end of the
/// string and both bounds clamp to it.
pub fn char_slice(text: &str, start: usize, end: Option<usize>) -> &str {
  let start = char_to_byte_idx(text, start);
  let end = match end {
    Some(end) => char_to_byte_idx(text, end).max(start),
    None => text.len(),
  };
  &text[start..end]
}
