//! A text operational-transformation type.
//!
//! Operations ([`TextOp`]) are lists of skip/insert/delete components that walk
//! a document from the start. Concurrent operations are reconciled with
//! [`transform`], sequential ones merged with [`compose`], cursors carried
//! across edits with [`transform_selection`] and edits undone with
//! [`invert_with_doc`]. All lengths are unicode codepoints.
//!
//! ```ignore
//! use the_ot::{Side, TextOp, apply, transform};
//!
//! let doc = String::from("hello");
//! let ours = TextOp::insert_at(5, " world");
//! let theirs = TextOp::insert_at(0, ">> ");
//!
//! let ours = transform(&ours, &theirs, Side::Left)?;
//! let doc = apply(&apply(&doc, &theirs)?, &ours)?;
//! assert_eq!(doc, ">> hello world");
//! ```

use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod apply;
pub mod compose;
pub mod cursor;
pub mod edits;
pub mod error;
pub mod invert;
pub mod operation;
pub mod position;
pub mod snapshot;
pub mod transform;
pub mod wire;

pub use apply::apply;
pub use compose::compose;
pub use edits::Edit;
pub use error::{
  OtError,
  Result,
};
pub use invert::{
  invert,
  invert_with_doc,
  make_invertible,
};
pub use operation::{
  Component,
  Deletion,
  Kind,
  TextOp,
};
pub use position::{
  Selection,
  transform_position,
  transform_selection,
};
pub use snapshot::{
  Snapshot,
  SnapshotBuilder,
};
pub use transform::{
  Side,
  transform,
};
pub use wire::snapshot_from_value;

pub type Tendril = SmartString<LazyCompact>;

/// Registered name of this type.
pub const NAME: &str = "text-unicode";
/// Canonical identifier of this type.
pub const URI: &str = "http://sharejs.org/types/text-unicode";
