//! Builders for delayed-array trees held in the in-memory store.
//!
//! Every builder takes the format version so that the same tree can be laid out both with the
//! legacy conventions and with explicit `type` attributes.

use chihaya_dtype::ArrayType;
use ritsuko::{Attribute, Datatype, MemDataset, MemGroup, MemObject, Version};

/// A version before typed attributes were introduced.
pub const LEGACY: Version = Version::new(0, 99, 0);
/// A version with typed attributes and attribute-free lists.
pub const CURRENT: Version = Version::new(1, 1, 0);

/// An empty group tagged as the delayed array `kind`.
pub fn array_node(kind: &str) -> MemGroup {
    MemGroup::new()
        .with_attribute("delayed_type", Attribute::string("array"))
        .with_attribute("delayed_array", Attribute::string(kind))
}

/// An empty group tagged as the delayed operation `kind`.
pub fn operation_node(kind: &str) -> MemGroup {
    MemGroup::new()
        .with_attribute("delayed_type", Attribute::string("operation"))
        .with_attribute("delayed_operation", Attribute::string(kind))
}

/// Tag a root group with its format version.
pub fn with_version(group: MemGroup, version: &Version) -> MemGroup {
    group.with_attribute("delayed_version", Attribute::string(version.to_string()))
}

/// A dataset of `shape` holding values of `array_type`, laid out for `version`.
#[allow(clippy::unwrap_used)]
pub fn typed_values(array_type: ArrayType, shape: Vec<u64>, version: &Version) -> MemDataset {
    let count = shape.iter().product::<u64>();
    let dataset = match array_type {
        ArrayType::Boolean => {
            let values = (0..count).map(|i| (i % 2) as i64).collect();
            let dataset = MemDataset::int(Datatype::I8, shape, values).unwrap();
            if version.lt(1, 1, 0) {
                dataset.with_attribute("is_boolean", Attribute::int(Datatype::I8, 1).unwrap())
            } else {
                dataset
            }
        }
        ArrayType::Integer => {
            MemDataset::int(Datatype::I32, shape, (0..count).map(|i| i as i64).collect()).unwrap()
        }
        ArrayType::Float => {
            MemDataset::float(Datatype::F64, shape, (0..count).map(|i| i as f64 / 2.0).collect())
                .unwrap()
        }
        ArrayType::String => {
            MemDataset::strings(shape, (0..count).map(|i| Some(format!("x{}", i))).collect())
                .unwrap()
        }
    };
    if version.lt(1, 1, 0) {
        dataset
    } else {
        dataset.with_attribute("type", Attribute::string(array_type.name()))
    }
}

/// A scalar dataset holding a value of `array_type`.
pub fn typed_scalar(array_type: ArrayType, version: &Version) -> MemDataset {
    typed_values(array_type, Vec::new(), version)
}

/// A 1-dimensional unsigned integer dataset.
#[allow(clippy::unwrap_used)]
pub fn unsigned_vector(values: &[u64]) -> MemDataset {
    MemDataset::uint(Datatype::U64, vec![values.len() as u64], values.to_vec()).unwrap()
}

/// A scalar unsigned integer dataset.
#[allow(clippy::unwrap_used)]
pub fn unsigned_scalar(value: u64) -> MemDataset {
    MemDataset::uint(Datatype::U64, Vec::new(), vec![value]).unwrap()
}

/// A scalar 8-bit flag.
#[allow(clippy::unwrap_used)]
pub fn flag(value: bool) -> MemDataset {
    MemDataset::int(Datatype::I8, Vec::new(), vec![i64::from(value)]).unwrap()
}

/// A list group with the given entries, declaring `length` under legacy versions.
#[allow(clippy::unwrap_used)]
pub fn list<I: IntoIterator<Item = (usize, MemObject)>>(
    entries: I,
    length: usize,
    version: &Version,
) -> MemGroup {
    let mut group = MemGroup::new();
    if version.lt(1, 1, 0) {
        group.set_attribute("delayed_type", Attribute::string("list"));
        group.set_attribute(
            "delayed_length",
            Attribute::int(Datatype::I32, length as i64).unwrap(),
        );
    }
    for (index, entry) in entries {
        group.insert(index.to_string(), entry);
    }
    group
}

/// A natively ordered dense array of `dimensions`.
pub fn dense_array(array_type: ArrayType, dimensions: &[u64], version: &Version) -> MemGroup {
    array_node("dense array")
        .with_dataset("data", typed_values(array_type, dimensions.to_vec(), version))
        .with_dataset("native", flag(true))
}

/// A constant array of `dimensions`.
pub fn constant_array(array_type: ArrayType, dimensions: &[u64], version: &Version) -> MemGroup {
    array_node("constant array")
        .with_dataset("dimensions", unsigned_vector(dimensions))
        .with_dataset("value", typed_scalar(array_type, version))
}

/// A compressed sparse column matrix with the given structure.
pub fn sparse_matrix(
    array_type: ArrayType,
    shape: [u64; 2],
    indptr: &[u64],
    indices: &[u64],
    version: &Version,
) -> MemGroup {
    let group = array_node("sparse matrix")
        .with_dataset("shape", unsigned_vector(&shape))
        .with_dataset(
            "data",
            typed_values(array_type, vec![indices.len() as u64], version),
        )
        .with_dataset("indptr", unsigned_vector(indptr))
        .with_dataset("indices", unsigned_vector(indices));
    if version.lt(1, 1, 0) {
        group
    } else {
        group.with_dataset("by_column", flag(true))
    }
}

/// A custom array of `kind`, which should start with `"custom "`.
pub fn custom_array(
    kind: &str,
    array_type: ArrayType,
    dimensions: &[u64],
    version: &Version,
) -> MemGroup {
    let group = array_node(kind).with_dataset("dimensions", unsigned_vector(dimensions));
    if version.lt(1, 1, 0) {
        group.with_dataset("type", MemDataset::scalar_string(array_type.name()))
    } else {
        group.with_attribute("type", Attribute::string(array_type.name()))
    }
}

/// A unary operation of `kind` applying `method` to `seed` with a scalar `value`.
pub fn unary_with_scalar(
    kind: &str,
    seed: MemGroup,
    method: &str,
    side: &str,
    value: ArrayType,
    version: &Version,
) -> MemGroup {
    operation_node(kind)
        .with_group("seed", seed)
        .with_dataset("method", MemDataset::scalar_string(method))
        .with_dataset("side", MemDataset::scalar_string(side))
        .with_dataset("value", typed_scalar(value, version))
}

/// A binary operation of `kind` applying `method` to `left` and `right`.
pub fn binary(kind: &str, left: MemGroup, right: MemGroup, method: &str) -> MemGroup {
    operation_node(kind)
        .with_group("left", left)
        .with_group("right", right)
        .with_dataset("method", MemDataset::scalar_string(method))
}
