//! Rebasing an operation over a concurrent one.
//!
//! Given two operations `a` and `b` made against the same document,
//! `transform(a, b, side)` rewrites `a` so it applies after `b`. Transforming
//! each over the other converges:
//!
//! ```text
//! apply(apply(doc, a), transform(b, a, Right))
//!   == apply(apply(doc, b), transform(a, b, Left))
//! ```
//!
//! `side` breaks the tie when both operations insert at the same position:
//! the insert of the operation transformed as [`Side::Left`] ends up first.

use std::{
  fmt,
  str::FromStr,
};

use the_ot_core::unicode::char_len;

use crate::{
  Component,
  Kind,
  OtError,
  Result,
  TextOp,
  cursor::OpCursor,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
  Left,
  Right,
}

impl Side {
  pub fn opposite(self) -> Self {
    match self {
      Side::Left => Side::Right,
      Side::Right => Side::Left,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Side::Left => "left",
      Side::Right => "right",
    }
  }
}

impl FromStr for Side {
  type Err = OtError;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "left" => Ok(Side::Left),
      "right" => Ok(Side::Right),
      _ => Err(OtError::InvalidSide { side: s.to_string() }),
    }
  }
}

impl fmt::Display for Side {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Transform `op` so that it applies after `other`.
pub fn transform(op: &TextOp, other: &TextOp, side: Side) -> Result<TextOp> {
  op.validate()?;
  other.validate()?;

  let mut result = TextOp::with_capacity(op.len() + other.len());
  let mut cursor = OpCursor::new(op);

  for component in other.components() {
    match component {
      Component::Skip(len) => {
        let mut remaining = *len;
        while remaining > 0 {
          let piece = cursor.take(remaining, Some(Kind::Insert));
          // our inserts are new to `other` and don't use up its skip
          if !matches!(piece, Component::Insert(_)) {
            remaining -= piece.len_chars();
          }
          result.push(piece);
        }
      },
      Component::Insert(text) => {
        if side == Side::Left && matches!(cursor.peek(), Some(Component::Insert(_))) {
          if let Some(piece) = cursor.take_rest() {
            result.push(piece);
          }
        }
        result.skip(char_len(text));
      },
      Component::Delete(deletion) => {
        let mut remaining = deletion.len_chars();
        while remaining > 0 {
          match cursor.take(remaining, Some(Kind::Insert)) {
            Component::Skip(n) => remaining -= n,
            piece @ Component::Insert(_) => result.push(piece),
            // already gone
            Component::Delete(d) => remaining -= d.len_chars(),
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
    %side,
    op = op.len(),
    other = other.len(),
    result = result.len(),
    "transformed operation"
  );
  Ok(result)
}
