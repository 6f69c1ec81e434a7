use the_ot_core::unicode::UnicodeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OtError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum OtError {
  #[error("op must be an array of components")]
  MalformedOp,
  #[error("invalid component at {index}: {reason}")]
  InvalidComponent { index: usize, reason: &'static str },
  #[error("adjacent skip components at {index} should be combined")]
  UnmergedSkips { index: usize },
  #[error("op has a trailing skip")]
  TrailingSkip,
  #[error("side ({side}) must be 'left' or 'right'")]
  InvalidSide { side: String },
  #[error(
    "cannot invert delete at {index}: deleted characters missing from operation, call \
     make_invertible first"
  )]
  NotInvertible { index: usize },
  #[error("the op is too long for this document: {requested} chars requested, {remaining} left")]
  OpTooLong { requested: usize, remaining: usize },
  #[error("slice {start}..{end} is out of bounds for document length {len}")]
  RangeOutOfBounds {
    start: usize,
    end:   usize,
    len:   usize,
  },
  #[error("initial data must be a string, got {found}")]
  InvalidSnapshot { found: &'static str },
  #[error(transparent)]
  Unicode(#[from] UnicodeError),
}
