//! Undoing operations.
//!
//! An operation can only be inverted when every delete carries the text it
//! removes. Deletes encoded as a plain count are filled in from the document
//! the operation applies to with [`make_invertible`].

use crate::{
  Component,
  Deletion,
  OtError,
  Result,
  Snapshot,
  TextOp,
};

/// Replace count deletes with the text they remove from `snapshot`, the
/// document `op` applies to.
pub fn make_invertible<S: Snapshot>(op: &TextOp, snapshot: &S) -> Result<TextOp> {
  let mut result = TextOp::with_capacity(op.len());

  for step in op.walk() {
    match step.component {
      Component::Delete(Deletion::Count(n)) => {
        let text = snapshot.slice(step.pre, Some(step.pre.saturating_add(*n)))?;
        result.delete(Deletion::Text(text.into()));
      },
      component => result.push(component.clone()),
    }
  }
  result.trim();

  Ok(result)
}

/// The operation that undoes `op`: inserts become deletes of the same text and
/// deletes become inserts.
pub fn invert(op: &TextOp) -> Result<TextOp> {
  let mut result = TextOp::with_capacity(op.len());

  for (index, component) in op.components().iter().enumerate() {
    match component {
      Component::Skip(n) => result.skip(*n),
      Component::Insert(text) => result.delete(Deletion::Text(text.clone())),
      Component::Delete(Deletion::Text(text)) => result.insert(text.clone()),
      Component::Delete(Deletion::Count(_)) => return Err(OtError::NotInvertible { index }),
    }
  }
  result.trim();

  tracing::trace!(components = result.len(), "inverted operation");
  Ok(result)
}

/// [`make_invertible`] followed by [`invert`].
pub fn invert_with_doc<S: Snapshot>(op: &TextOp, snapshot: &S) -> Result<TextOp> {
  invert(&make_invertible(op, snapshot)?)
}
