//! Field-level value generators.
//!
//! Each submodule turns an RNG into one kind of field value; the record
//! generator composes them into whole entities.

pub mod date;
pub mod numeric;
pub mod text;
pub mod uuid;
