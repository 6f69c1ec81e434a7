use crate::{
  Component,
  Result,
  Snapshot,
  SnapshotBuilder,
  TextOp,
};

/// Apply `op` to `snapshot`, returning the new document.
///
/// The snapshot is left untouched. Fails when the operation is not in
/// normalized form or walks past the end of the document.
pub fn apply<S: Snapshot>(snapshot: &S, op: &TextOp) -> Result<S> {
  op.validate()?;

  let mut builder = snapshot.builder();
  for component in op.components() {
    use Component::*;
    match component {
      Skip(n) => builder.skip(*n)?,
      Insert(text) => builder.append(text),
      Delete(deletion) => builder.delete(deletion.len_chars())?,
    }
  }

  let result = builder.build();
  tracing::trace!(
    components = op.len(),
    before = snapshot.len_chars(),
    after = result.len_chars(),
    "applied operation"
  );
  Ok(result)
}
