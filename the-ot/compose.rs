//! Merging two sequential operations into one.
//!
//! `compose(a, b)` is equivalent to applying `a` and then `b`:
//!
//! ```text
//! apply(apply(doc, a), b) == apply(doc, compose(a, b))
//! ```
//!
//! Text inserted by `a` and deleted by `b` cancels out and leaves no trace in
//! the result.

use the_ot_core::unicode::char_len;

use crate::{
  Component,
  Kind,
  Result,
  TextOp,
  cursor::OpCursor,
};

/// Combine `first` and `second`, where `second` applies to the output of
/// `first`.
pub fn compose(first: &TextOp, second: &TextOp) -> Result<TextOp> {
  first.validate()?;
  second.validate()?;

  let mut result = TextOp::with_capacity(first.len() + second.len());
  let mut cursor = OpCursor::new(first);

  for component in second.components() {
    match component {
      Component::Skip(len) => {
        let mut remaining = *len;
        while remaining > 0 {
          let piece = cursor.take(remaining, Some(Kind::Delete));
          // deleted text isn't part of the document `second` skips over
          if !matches!(piece, Component::Delete(_)) {
            remaining -= piece.len_chars();
          }
          result.push(piece);
        }
      },
      Component::Insert(text) => result.insert(text.clone()),
      Component::Delete(deletion) => {
        let len = deletion.len_chars();
        // how much of `deletion` has been matched up so far
        let mut offset = 0;
        while offset < len {
          match cursor.take(len - offset, Some(Kind::Delete)) {
            Component::Skip(n) => {
              result.delete(deletion.slice(offset, Some(offset + n)));
              offset += n;
            },
            Component::Insert(text) => offset += char_len(&text),
            piece @ Component::Delete(_) => result.push(piece),
          }
        }
      },
    }
  }

  while let Some(piece) = cursor.take_rest() {
    result.push(piece);
  }
  result.trim();

  tracing::trace!(
    first = first.len(),
    second = second.len(),
    result = result.len(),
    "composed operations"
  );
  Ok(result)
}
