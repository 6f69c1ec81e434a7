//! Incremental reader over the components of an operation.
//!
//! Both [`transform`](crate::transform) and [`compose`](crate::compose) walk
//! one operation component by component while consuming the other one in
//! pieces of whatever length they need. [`OpCursor`] serves those pieces:
//!
//! ```text
//! op:   [ Skip(4)      | Insert("abc") | Delete(2) ]
//! take(3)  -> Skip(3)
//! take(5)  -> Skip(1)           (never crosses a component boundary)
//! take(2)  -> Insert("ab")
//! take(9)  -> Insert("c")
//! ...
//! past the end: take(n) -> Skip(n), take_rest() -> None
//! ```

use the_ot_core::unicode::char_to_byte_idx;

use crate::{
  Component,
  Deletion,
  Kind,
  TextOp,
};

pub struct OpCursor<'a> {
  components: &'a [Component],
  /// Index of the next component to take from.
  index:      usize,
  /// How much of that component has been taken already. A byte offset for
  /// string payloads, a character count otherwise.
  offset:     usize,
}

impl<'a> OpCursor<'a> {
  pub fn new(op: &'a TextOp) -> Self {
    Self {
      components: op.components(),
      index:      0,
      offset:     0,
    }
  }

  /// The component the next piece will come from.
  pub fn peek(&self) -> Option<&'a Component> {
    self.components.get(self.index)
  }

  pub fn is_exhausted(&self) -> bool {
    self.index >= self.components.len()
  }

  /// The untaken remainder of the current component, or `None` once the
  /// operation is exhausted.
  pub fn take_rest(&mut self) -> Option<Component> {
    if self.is_exhausted() {
      return None;
    }
    Some(self.take(usize::MAX, None))
  }

  /// Take up to `n` characters from the current component.
  ///
  /// Components of the `indivisible` kind are never split and come out
  /// whole, whatever `n` is. Past the end of the operation this returns
  /// `Skip(n)`: an operation implicitly keeps the rest of the document.
  pub fn take(&mut self, n: usize, indivisible: Option<Kind>) -> Component {
    let components = self.components;
    let Some(component) = components.get(self.index) else {
      return Component::Skip(n);
    };
    let whole = indivisible == Some(component.kind());

    match component {
      Component::Skip(len) => Component::Skip(self.take_count(*len, n, whole)),
      Component::Insert(text) => Component::Insert(self.take_str(text, n, whole).into()),
      Component::Delete(Deletion::Count(len)) => {
        Component::Delete(Deletion::Count(self.take_count(*len, n, whole)))
      },
      Component::Delete(Deletion::Text(text)) => {
        Component::Delete(Deletion::Text(self.take_str(text, n, whole).into()))
      },
    }
  }

  fn take_count(&mut self, len: usize, n: usize, whole: bool) -> usize {
    let remaining = len - self.offset;
    if whole || remaining <= n {
      self.advance();
      remaining
    } else {
      self.offset += n;
      n
    }
  }

  fn take_str(&mut self, text: &'a str, n: usize, whole: bool) -> &'a str {
    let rest = &text[self.offset..];
    let end = if whole {
      rest.len()
    } else {
      char_to_byte_idx(rest, n)
    };

    if end == rest.len() {
      self.advance();
      rest
    } else {
      self.offset += end;
      &rest[..end]
    }
  }

  fn advance(&mut self) {
    self.index += 1;
    self.offset = 0;
  }
}
