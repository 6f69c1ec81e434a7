//! An operation as a sequence of plain insert/remove edits.
//!
//! Editors that keep their own buffer usually expose "insert text at" and
//! "remove range at" primitives. [`TextOp::edits`] translates an operation
//! into calls to those: each edit's position is taken in the document with
//! all previous edits already applied, so they can be replayed one after the
//! other.

use crate::{
  Component,
  Tendril,
  TextOp,
  operation::Step,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Edit {
  Insert { pos: usize, text: Tendril },
  Remove { pos: usize, len: usize },
}

impl TextOp {
  /// The inserts and removals making up this operation, in order.
  pub fn edits(&self) -> impl Iterator<Item = Edit> + '_ {
    self.walk().filter_map(|Step { component, post, .. }| {
      match component {
        Component::Skip(_) => None,
        Component::Insert(text) => {
          Some(Edit::Insert {
            pos:  post,
            text: text.clone(),
          })
        },
        Component::Delete(deletion) => {
          Some(Edit::Remove {
            pos: post,
            len: deletion.len_chars(),
          })
        },
      }
    })
  }
}
