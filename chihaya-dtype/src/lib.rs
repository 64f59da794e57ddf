#![deny(missing_docs)]

//! The type system for delayed arrays.
//!
//! Every node of a delayed-array tree resolves to an [`ArrayDetails`]: the element [`ArrayType`]
//! of the array it represents and its dimensions. This is the only value that flows between the
//! validators.

pub use array_type::*;
pub use details::*;

mod array_type;
mod details;
