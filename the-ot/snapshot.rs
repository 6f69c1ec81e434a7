//! Document representations operations can be applied to.
//!
//! A [`Snapshot`] is an immutable document. Applying an operation never
//! touches it: [`Snapshot::builder`] starts a walk over the old document that
//! assembles a new one as the operation's components are fed in.
//!
//! Two representations are provided. `String` suits short documents; for
//! anything an editor would hold, `ropey::Rope` avoids copying the untouched
//! parts of the text.

use ropey::{
  Rope,
  RopeBuilder,
};
use the_ot_core::unicode::{
  char_len,
  checked_char_to_byte_idx,
};

use crate::{
  OtError,
  Result,
};

pub trait Snapshot: Sized {
  type Builder<'a>: SnapshotBuilder<Output = Self>
  where
    Self: 'a;

  fn create(initial: &str) -> Self;

  /// The whole document as a string.
  fn text(&self) -> String;

  fn len_chars(&self) -> usize;

  /// Characters `start..end` of the document. `end` defaults to the end of
  /// the document.
  fn slice(&self, start: usize, end: Option<usize>) -> Result<String>;

  fn builder(&self) -> Self::Builder<'_>;
}

/// Assembles a new document from an old one.
///
/// Every call moves forward through the old document; whatever hasn't been
/// consumed when [`SnapshotBuilder::build`] is called is kept.
pub trait SnapshotBuilder {
  type Output;

  /// Copy the next `n` characters of the old document.
  fn skip(&mut self, n: usize) -> Result<()>;

  fn append(&mut self, text: &str);

  /// Drop the next `n` characters of the old document.
  fn delete(&mut self, n: usize) -> Result<()>;

  fn build(self) -> Self::Output;
}

fn range_error(start: usize, end: Option<usize>, len: usize) -> OtError {
  OtError::RangeOutOfBounds {
    start,
    end: end.unwrap_or(len),
    len,
  }
}

impl Snapshot for String {
  type Builder<'a> = StringBuilder<'a>;

  fn create(initial: &str) -> Self {
    initial.to_string()
  }

  fn text(&self) -> String {
    self.clone()
  }

  fn len_chars(&self) -> usize {
    char_len(self)
  }

  fn slice(&self, start: usize, end: Option<usize>) -> Result<String> {
    let start_byte = checked_char_to_byte_idx(self, start);
    let end_byte = match end {
      Some(end) => checked_char_to_byte_idx(self, end),
      None => Some(self.len()),
    };

    match (start_byte, end_byte) {
      (Some(from), Some(to)) if from <= to => Ok(self[from..to].to_string()),
      _ => Err(range_error(start, end, self.len_chars())),
    }
  }

  fn builder(&self) -> StringBuilder<'_> {
    StringBuilder {
      rest: self,
      out:  String::with_capacity(self.len()),
    }
  }
}

pub struct StringBuilder<'a> {
  /// The part of the old document not walked over yet.
  rest: &'a str,
  out:  String,
}

impl<'a> StringBuilder<'a> {
  /// Split off the next `n` characters of the old document.
  fn advance(&mut self, n: usize) -> Result<&'a str> {
    let Some(end) = checked_char_to_byte_idx(self.rest, n) else {
      return Err(OtError::OpTooLong {
        requested: n,
        remaining: char_len(self.rest),
      });
    };
    let (head, tail) = self.rest.split_at(end);
    self.rest = tail;
    Ok(head)
  }
}

impl SnapshotBuilder for StringBuilder<'_> {
  type Output = String;

  fn skip(&mut self, n: usize) -> Result<()> {
    let kept = self.advance(n)?;
    self.out.push_str(kept);
    Ok(())
  }

  fn append(&mut self, text: &str) {
    self.out.push_str(text);
  }

  fn delete(&mut self, n: usize) -> Result<()> {
    self.advance(n).map(|_| ())
  }

  fn build(mut self) -> String {
    self.out.push_str(self.rest);
    self.out
  }
}

impl Snapshot for Rope {
  type Builder<'a> = RopeSnapshotBuilder<'a>;

  fn create(initial: &str) -> Self {
    Rope::from(initial)
  }

  fn text(&self) -> String {
    self.to_string()
  }

  fn len_chars(&self) -> usize {
    Rope::len_chars(self)
  }

  fn slice(&self, start: usize, end: Option<usize>) -> Result<String> {
    let len = Rope::len_chars(self);
    self
      .get_slice(start..end.unwrap_or(len))
      .map(String::from)
      .ok_or_else(|| range_error(start, end, len))
  }

  fn builder(&self) -> RopeSnapshotBuilder<'_> {
    RopeSnapshotBuilder {
      source:  self,
      pos:     0,
      builder: RopeBuilder::new(),
    }
  }
}

pub struct RopeSnapshotBuilder<'a> {
  source:  &'a Rope,
  /// Characters of `source` walked over so far.
  pos:     usize,
  builder: RopeBuilder,
}

impl RopeSnapshotBuilder<'_> {
  fn check(&self, n: usize) -> Result<()> {
    let remaining = self.source.len_chars() - self.pos;
    if n > remaining {
      return Err(OtError::OpTooLong {
        requested: n,
        remaining,
      });
    }
    Ok(())
  }

  fn append_source(&mut self, from: usize, to: usize) {
    if from >= to {
      return;
    }
    for chunk in self.source.slice(from..to).chunks() {
      self.builder.append(chunk);
    }
  }
}

impl SnapshotBuilder for RopeSnapshotBuilder<'_> {
  type Output = Rope;

  fn skip(&mut self, n: usize) -> Result<()> {
    self.check(n)?;
    self.append_source(self.pos, self.pos + n);
    self.pos += n;
    Ok(())
  }

  fn append(&mut self, text: &str) {
    self.builder.append(text);
  }

  fn delete(&mut self, n: usize) -> Result<()> {
    self.check(n)?;
    self.pos += n;
    Ok(())
  }

  fn build(mut self) -> Rope {
    let end = self.source.len_chars();
    self.append_source(self.pos, end);
    self.builder.finish()
  }
}
