//! Validators for delayed operations, each of which transforms one or more seeds.

mod arithmetic;
mod combine;
mod comparison;
mod dimnames;
mod logic;
mod math;
mod matrix_product;
mod subset;
mod transpose;

pub use arithmetic::*;
pub use combine::*;
pub use comparison::*;
pub use dimnames::*;
pub use logic::*;
pub use math::*;
pub use matrix_product::*;
pub use subset::*;
pub use transpose::*;
