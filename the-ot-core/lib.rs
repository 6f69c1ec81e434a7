//! Low level text utilities shared by the-ot.

pub mod unicode;
