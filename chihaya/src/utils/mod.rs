//! Version-aware helpers shared by the array and operation validators.

mod dimnames;
mod fields;
mod list;
mod methods;
mod seeds;
mod types;
mod unary;

pub(crate) use dimnames::*;
pub(crate) use fields::*;
pub(crate) use list::*;
pub(crate) use methods::*;
pub(crate) use seeds::*;
pub(crate) use types::*;
pub(crate) use unary::*;
