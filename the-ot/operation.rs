//! The operation model.
//!
//! A [`TextOp`] is a list of [`Component`]s interpreted as a walk over the
//! document it applies to, starting at the first character:
//!
//! - **Skip(n)** - Keep `n` characters unchanged
//! - **Insert(s)** - Insert string `s` at the current position
//! - **Delete(d)** - Remove characters at the current position. `d` is either
//!   a plain count or the removed text itself; only the latter can be
//!   inverted.
//!
//! Lengths are unicode codepoints. An operation does not need to skip to the
//! end of the document: whatever it doesn't mention is kept.
//!
//! Operations are kept in normalized form: adjacent skips are merged, nothing
//! is empty and there is no trailing skip. The builder methods ([`TextOp::skip`],
//! [`TextOp::insert`], [`TextOp::delete`] and [`TextOp::push`]) maintain this by
//! merging a new component into the previous one when both have the same kind.
//!
//! ```ignore
//! let mut op = TextOp::new();
//! op.skip(3);
//! op.insert("hi".into());
//! op.skip(5);
//! op.delete(Deletion::Count(8));
//! // [3, "hi", 5, {d: 8}]
//! ```

use std::{
  fmt,
  iter::FromIterator,
  slice,
};

use the_ot_core::unicode::{
  char_len,
  char_slice,
  utf16_to_char_idx,
};

use crate::{
  OtError,
  Result,
  Tendril,
};

/// Payload of a delete component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Deletion {
  /// Number of deleted characters. Can't be inverted.
  Count(usize),
  /// The deleted text.
  Text(Tendril),
}

impl Deletion {
  /// Length of the deletion in characters, whichever form it is in.
  pub fn len_chars(&self) -> usize {
    match self {
      Deletion::Count(n) => *n,
      Deletion::Text(s) => char_len(s),
    }
  }

  pub fn is_empty(&self) -> bool {
    match self {
      Deletion::Count(n) => *n == 0,
      Deletion::Text(s) => s.is_empty(),
    }
  }

  /// Whether the deleted content is known.
  pub fn is_invertible(&self) -> bool {
    matches!(self, Deletion::Text(_))
  }

  /// The characters `start..end` of this deletion, in the same form.
  pub fn slice(&self, start: usize, end: Option<usize>) -> Deletion {
    match self {
      Deletion::Count(n) => {
        let end = end.map_or(*n, |end| end.min(*n));
        Deletion::Count(end.saturating_sub(start))
      },
      Deletion::Text(s) => Deletion::Text(char_slice(s, start, end).into()),
    }
  }

  /// Concatenate `other` onto this deletion. The text is only kept when both
  /// sides carry it; counts saturate at `usize::MAX`.
  fn merge(&mut self, other: &Deletion) {
    if let (Deletion::Text(prev), Deletion::Text(text)) = (&mut *self, other) {
      prev.push_str(text);
      return;
    }
    let len = self.len_chars().saturating_add(other.len_chars());
    *self = Deletion::Count(len);
  }
}

impl From<usize> for Deletion {
  fn from(n: usize) -> Self {
    Deletion::Count(n)
  }
}

impl From<&str> for Deletion {
  fn from(s: &str) -> Self {
    Deletion::Text(s.into())
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
  Skip,
  Insert,
  Delete,
}

impl fmt::Display for Kind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Kind::Skip => "skip",
      Kind::Insert => "insert",
      Kind::Delete => "delete",
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Component {
  /// Move over n characters.
  Skip(usize),

  /// Insert text at the current position.
  Insert(Tendril),

  /// Delete characters at the current position.
  Delete(Deletion),
}

impl Component {
  pub fn kind(&self) -> Kind {
    match self {
      Component::Skip(_) => Kind::Skip,
      Component::Insert(_) => Kind::Insert,
      Component::Delete(_) => Kind::Delete,
    }
  }

  pub fn len_chars(&self) -> usize {
    match self {
      Component::Skip(n) => *n,
      Component::Insert(s) => char_len(s),
      Component::Delete(d) => d.len_chars(),
    }
  }

  /// Components that don't do anything are dropped by the builder.
  pub fn is_noop(&self) -> bool {
    match self {
      Component::Skip(n) => *n == 0,
      Component::Insert(s) => s.is_empty(),
      Component::Delete(d) => d.is_empty(),
    }
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct TextOp {
  components: Vec<Component>,
}

impl TextOp {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      components: Vec::with_capacity(capacity),
    }
  }

  /// Wrap a list of components as is. The result may violate the normalized
  /// form; run [`TextOp::validate`] or [`TextOp::normalize`] before use.
  pub fn from_components(components: Vec<Component>) -> Self {
    Self { components }
  }

  /// An operation inserting `text` at character `pos`.
  pub fn insert_at(pos: usize, text: &str) -> Self {
    let mut op = Self::with_capacity(2);
    op.skip(pos);
    op.insert(text.into());
    op.trim();
    op
  }

  /// An operation deleting at character `pos`.
  pub fn remove_at(pos: usize, deletion: Deletion) -> Self {
    let mut op = Self::with_capacity(2);
    op.skip(pos);
    op.delete(deletion);
    op.trim();
    op
  }

  /// Like [`TextOp::insert_at`], with `pos` counted in UTF-16 code units of
  /// `doc`.
  pub fn insert_at_utf16(doc: &str, pos: usize, text: &str) -> Result<Self> {
    Ok(Self::insert_at(utf16_to_char_idx(doc, pos)?, text))
  }

  /// Like [`TextOp::remove_at`], with `pos` counted in UTF-16 code units of
  /// `doc`.
  pub fn remove_at_utf16(doc: &str, pos: usize, deletion: Deletion) -> Result<Self> {
    Ok(Self::remove_at(utf16_to_char_idx(doc, pos)?, deletion))
  }

  pub fn components(&self) -> &[Component] {
    &self.components
  }

  pub fn into_components(self) -> Vec<Component> {
    self.components
  }

  /// Number of components.
  pub fn len(&self) -> usize {
    self.components.len()
  }

  /// An empty operation leaves every document unchanged.
  pub fn is_empty(&self) -> bool {
    self.components.is_empty()
  }

  /// Whether every delete in this operation carries its text.
  pub fn is_invertible(&self) -> bool {
    self.components.iter().all(|component| match component {
      Component::Delete(d) => d.is_invertible(),
      _ => true,
    })
  }

  // Builder operations: skip/insert/delete.
  //

  pub fn skip(&mut self, n: usize) {
    self.push(Component::Skip(n));
  }

  pub fn insert(&mut self, fragment: Tendril) {
    self.push(Component::Insert(fragment));
  }

  pub fn delete(&mut self, deletion: Deletion) {
    self.push(Component::Delete(deletion));
  }

  /// Append a component, merging it into the last one when they have the same
  /// kind. No-op components are dropped. Merged lengths saturate at
  /// `usize::MAX`, which no document can reach.
  pub fn push(&mut self, component: Component) {
    use Component::*;

    if component.is_noop() {
      return;
    }

    let merged = match (self.components.last_mut(), &component) {
      (Some(Skip(count)), Skip(n)) => {
        *count = count.saturating_add(*n);
        true
      },
      (Some(Insert(prev)), Insert(fragment)) => {
        prev.push_str(fragment);
        true
      },
      (Some(Delete(prev)), Delete(deletion)) => {
        prev.merge(deletion);
        true
      },
      _ => false,
    };

    if !merged {
      self.components.push(component);
    }
  }

  /// Drop the trailing skip, if any. Operations built with [`TextOp::push`]
  /// have at most one.
  pub fn trim(&mut self) {
    if let Some(Component::Skip(_)) = self.components.last() {
      self.components.pop();
    }
  }

  /// Rebuild the operation through the merging builder and trim it.
  #[must_use]
  pub fn normalize(self) -> Self {
    let mut op: Self = self.components.into_iter().collect();
    op.trim();
    op
  }

  /// Check that the operation is in normalized form.
  pub fn validate(&self) -> Result<()> {
    let result = self.check();
    if let Err(err) = &result {
      tracing::debug!(%err, "rejected operation: {:?}", self.components);
    }
    result
  }

  fn check(&self) -> Result<()> {
    use Component::*;

    let mut last_was_skip = false;
    for (index, component) in self.components.iter().enumerate() {
      match component {
        Skip(0) => {
          return Err(OtError::InvalidComponent {
            index,
            reason: "skip components must be >0",
          });
        },
        Skip(_) if last_was_skip => return Err(OtError::UnmergedSkips { index }),
        Insert(s) if s.is_empty() => {
          return Err(OtError::InvalidComponent {
            index,
            reason: "inserts cannot be empty",
          });
        },
        Delete(d) if d.is_empty() => {
          return Err(OtError::InvalidComponent {
            index,
            reason: "deletes must not be empty",
          });
        },
        _ => {},
      }
      last_was_skip = matches!(component, Skip(_));
    }

    if last_was_skip {
      return Err(OtError::TrailingSkip);
    }
    Ok(())
  }

  /// Iterate the components along with their position in the document before
  /// and after the operation.
  pub fn walk(&self) -> Walk<'_> {
    Walk {
      iter: self.components.iter(),
      pre:  0,
      post: 0,
    }
  }
}

impl FromIterator<Component> for TextOp {
  /// Collects through [`TextOp::push`]. The result is not trimmed.
  fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
    let iter = iter.into_iter();
    let mut op = Self::with_capacity(iter.size_hint().0);
    for component in iter {
      op.push(component);
    }
    op
  }
}

impl From<Vec<Component>> for TextOp {
  fn from(components: Vec<Component>) -> Self {
    Self::from_components(components)
  }
}

/// A component together with where it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
  pub component: &'a Component,
  /// Position in the document the operation applies to.
  pub pre:       usize,
  /// Position in the document with all preceding components applied.
  pub post:      usize,
}

pub struct Walk<'a> {
  iter: slice::Iter<'a, Component>,
  pre:  usize,
  post: usize,
}

impl<'a> Iterator for Walk<'a> {
  type Item = Step<'a>;

  fn next(&mut self) -> Option<Self::Item> {
    use Component::*;

    let component = self.iter.next()?;
    let step = Step {
      component,
      pre: self.pre,
      post: self.post,
    };

    match component {
      Skip(n) => {
        self.pre = self.pre.saturating_add(*n);
        self.post = self.post.saturating_add(*n);
      },
      Insert(s) => self.post = self.post.saturating_add(char_len(s)),
      Delete(d) => self.pre = self.pre.saturating_add(d.len_chars()),
    }

    Some(step)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.iter.size_hint()
  }
}
