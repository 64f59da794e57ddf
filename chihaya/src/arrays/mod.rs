//! Validators for the leaves of a delayed tree.

mod constant;
mod dense;
mod minimal;
mod sparse;

pub use constant::*;
pub use dense::*;
pub use minimal::*;
pub use sparse::*;
