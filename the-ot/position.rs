//! Carrying cursors and selections across an operation.
//!
//! Positions are codepoint offsets into the document the operation applies
//! to, and come out as offsets into the resulting document:
//!
//! - text inserted before the cursor pushes it forward. An insert exactly at
//!   the cursor does not: the cursor stays in front of the new text.
//! - text deleted before the cursor pulls it back. A cursor inside a deleted
//!   range collapses to the start of that range.

use serde::{
  Deserialize,
  Serialize,
};
use the_ot_core::unicode::char_len;

use crate::{
  Component,
  TextOp,
};

/// A cursor, or a selection between an anchor and a focus. The anchor may come
/// after the focus.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
  Cursor(usize),
  Range(usize, usize),
}

impl Selection {
  pub fn transform(self, op: &TextOp) -> Self {
    transform_selection(self, op)
  }
}

impl From<usize> for Selection {
  fn from(cursor: usize) -> Self {
    Selection::Cursor(cursor)
  }
}

/// Map `cursor` through `op`.
pub fn transform_position(mut cursor: usize, op: &TextOp) -> usize {
  let mut pos = 0;

  for component in op.components() {
    if cursor <= pos {
      break;
    }

    match component {
      Component::Skip(n) => pos = pos.saturating_add(*n),
      Component::Insert(text) => {
        let len = char_len(text);
        pos = pos.saturating_add(len);
        cursor = cursor.saturating_add(len);
      },
      Component::Delete(deletion) => cursor -= deletion.len_chars().min(cursor - pos),
    }
  }

  cursor
}

/// Map both ends of a selection through `op`.
pub fn transform_selection(selection: Selection, op: &TextOp) -> Selection {
  match selection {
    Selection::Cursor(cursor) => Selection::Cursor(transform_position(cursor, op)),
    Selection::Range(anchor, focus) => {
      Selection::Range(transform_position(anchor, op), transform_position(focus, op))
    },
  }
}
