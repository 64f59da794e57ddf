//! Validation and type inference for delayed arrays.
//!
//! A delayed array is a tree of groups in an HDF5-like store. Leaves hold data (dense arrays,
//! sparse matrices, constants, or opaque custom arrays) and interior nodes describe operations
//! (arithmetic, subsetting, combining, transposition, ...) applied to their seeds. Validating the
//! root walks the whole tree, checks every node against the format for its version, and reports the
//! type and shape of the array that would result from evaluating it.
//!
//! ```
//! use chihaya::{ArrayType, Options, validate_root};
//! use ritsuko::{Attribute, Datatype, MemDataset, MemGroup};
//!
//! let data = MemDataset::float(Datatype::F64, vec![10, 5], vec![0.0; 50])
//!     .unwrap()
//!     .with_attribute("type", Attribute::string("FLOAT"));
//! let native = MemDataset::int(Datatype::I8, vec![], vec![0]).unwrap();
//! let root = MemGroup::new()
//!     .with_attribute("delayed_type", Attribute::string("array"))
//!     .with_attribute("delayed_array", Attribute::string("dense array"))
//!     .with_attribute("delayed_version", Attribute::string("1.1.0"))
//!     .with_dataset("data", data)
//!     .with_dataset("native", native);
//!
//! let details = validate_root(&root, &mut Options::default()).unwrap();
//! assert_eq!(details.array_type, ArrayType::Float);
//! assert_eq!(details.dimensions, vec![5, 10]);
//! ```
//!
//! Callers can register their own validators for new kinds of arrays or operations through
//! [`Options`], which take precedence over the built-in [`default_array_registry`] and
//! [`default_operation_registry`].

pub use chihaya_dtype::{ArrayDetails, ArrayType};
pub use options::*;
pub use registry::*;
pub use ritsuko::Version;
pub use validate::*;
pub use vtable::*;

pub mod aliases;
pub mod arrays;
pub mod operations;
mod options;
mod registry;
#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;
mod utils;
mod validate;
mod vtable;
