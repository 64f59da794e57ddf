#![deny(missing_docs)]

//! Low-level access to a hierarchical group/dataset/attribute store.
//!
//! This crate provides the narrow capability that the delayed-array validators need from an
//! HDF5-like store: opening named children, loading small scalar and 1-dimensional values with
//! shape and type checks, checking integer and float widths, validating missing value
//! placeholders, and streaming large datasets in bounded memory. The [`Group`] and [`Dataset`]
//! traits are implemented by an in-memory store ([`MemGroup`], [`MemDataset`]); other backends
//! implement the same traits.

pub use checks::*;
pub use datatype::*;
pub use limits::*;
pub use load::*;
pub use memory::*;
pub use store::*;
pub use stream::*;
pub use version::*;

mod checks;
mod datatype;
mod limits;
mod load;
mod memory;
mod store;
mod stream;
mod version;
