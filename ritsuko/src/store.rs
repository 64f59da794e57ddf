//! The capability that validators need from a hierarchical store.
//!
//! The traits are object safe so that validators can walk any backend through `&dyn Group`
//! without being generic over it.

use std::fmt::{Display, Formatter};

use chihaya_error::{ChihayaResult, chihaya_bail, chihaya_err};

use crate::{Datatype, Values};

/// The kind of an object stored inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A group, holding other objects.
    Group,
    /// A dataset, holding an N-dimensional payload.
    Dataset,
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Group => write!(f, "group"),
            ObjectKind::Dataset => write!(f, "dataset"),
        }
    }
}

/// A small payload attached to a group or dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    datatype: Datatype,
    shape: Vec<u64>,
    values: Values,
}

impl Attribute {
    /// Create an attribute. The number of values must match the shape.
    pub fn try_new(datatype: Datatype, shape: Vec<u64>, values: Values) -> ChihayaResult<Self> {
        check_payload(&datatype, &shape, &values)?;
        Ok(Self {
            datatype,
            shape,
            values,
        })
    }

    /// A scalar string attribute.
    pub fn string<S: Into<String>>(value: S) -> Self {
        Self {
            datatype: Datatype::String,
            shape: Vec::new(),
            values: Values::Str(vec![Some(value.into())]),
        }
    }

    /// A scalar signed integer attribute of the given datatype.
    pub fn int(datatype: Datatype, value: i64) -> ChihayaResult<Self> {
        Self::try_new(datatype, Vec::new(), Values::Int(vec![value]))
    }

    /// A scalar unsigned integer attribute of the given datatype.
    pub fn uint(datatype: Datatype, value: u64) -> ChihayaResult<Self> {
        Self::try_new(datatype, Vec::new(), Values::UInt(vec![value]))
    }

    /// A scalar float attribute of the given datatype.
    pub fn float(datatype: Datatype, value: f64) -> ChihayaResult<Self> {
        Self::try_new(datatype, Vec::new(), Values::Float(vec![value]))
    }

    /// The stored datatype.
    pub fn datatype(&self) -> Datatype {
        self.datatype
    }

    /// The dataspace of the attribute, empty for scalars.
    pub fn shape(&self) -> &[u64] {
        &self.shape
    }

    /// Check if the attribute has a scalar dataspace.
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// All stored values, flattened in row-major order.
    pub fn values(&self) -> &Values {
        &self.values
    }
}

/// Anything that can carry attributes.
pub trait Node {
    /// Look up an attribute by name.
    fn attribute(&self, name: &str) -> Option<Attribute>;

    /// Check if an attribute exists.
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// A group of named children.
pub trait Group: Node {
    /// The kind of the child called `name`, if it exists.
    fn child_kind(&self, name: &str) -> Option<ObjectKind>;

    /// Names of all children, in a stable order.
    fn children(&self) -> Vec<String>;

    /// Open the child group called `name`.
    fn open_group(&self, name: &str) -> ChihayaResult<Box<dyn Group + '_>>;

    /// Open the child dataset called `name`.
    fn open_dataset(&self, name: &str) -> ChihayaResult<Box<dyn Dataset + '_>>;
}

/// An N-dimensional array of stored values.
pub trait Dataset: Node {
    /// The stored datatype.
    fn datatype(&self) -> Datatype;

    /// The extent of each dimension, empty for scalars.
    fn shape(&self) -> Vec<u64>;

    /// Read `count` elements of the row-major flattened payload, starting at `start`.
    fn read(&self, start: u64, count: usize) -> ChihayaResult<Values>;

    /// Total number of elements.
    fn num_elements(&self) -> ChihayaResult<u64> {
        count_elements(&self.shape())
    }
}

/// Number of elements in a payload of `shape`, failing if it does not fit in a `u64`.
pub fn count_elements(shape: &[u64]) -> ChihayaResult<u64> {
    shape
        .iter()
        .try_fold(1u64, |count, extent| count.checked_mul(*extent))
        .ok_or_else(|| {
            chihaya_err!(
                Unsupported: "number of elements in a payload of rank {} does not fit in a 64-bit integer",
                shape.len()
            )
        })
}

pub(crate) fn check_payload(
    datatype: &Datatype,
    shape: &[u64],
    values: &Values,
) -> ChihayaResult<()> {
    datatype.check_values(values)?;
    let expected = count_elements(shape)?;
    if expected != values.len() as u64 {
        chihaya_bail!(
            Unsupported: "expected {} values for a payload of rank {}, got {}",
            expected,
            shape.len(),
            values.len()
        );
    }
    Ok(())
}

impl<T: Node + ?Sized> Node for &T {
    fn attribute(&self, name: &str) -> Option<Attribute> {
        (**self).attribute(name)
    }
}

impl<T: Group + ?Sized> Group for &T {
    fn child_kind(&self, name: &str) -> Option<ObjectKind> {
        (**self).child_kind(name)
    }

    fn children(&self) -> Vec<String> {
        (**self).children()
    }

    fn open_group(&self, name: &str) -> ChihayaResult<Box<dyn Group + '_>> {
        (**self).open_group(name)
    }

    fn open_dataset(&self, name: &str) -> ChihayaResult<Box<dyn Dataset + '_>> {
        (**self).open_dataset(name)
    }
}

impl<T: Dataset + ?Sized> Dataset for &T {
    fn datatype(&self) -> Datatype {
        (**self).datatype()
    }

    fn shape(&self) -> Vec<u64> {
        (**self).shape()
    }

    fn read(&self, start: u64, count: usize) -> ChihayaResult<Values> {
        (**self).read(start, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Huge;

    impl Node for Huge {
        fn attribute(&self, _name: &str) -> Option<Attribute> {
            None
        }
    }

    impl Dataset for Huge {
        fn datatype(&self) -> Datatype {
            Datatype::String
        }

        fn shape(&self) -> Vec<u64> {
            vec![u64::MAX, 3]
        }

        fn read(&self, _start: u64, _count: usize) -> ChihayaResult<Values> {
            Ok(Values::Str(Vec::new()))
        }
    }

    #[test]
    fn element_counts() {
        assert_eq!(count_elements(&[]).unwrap(), 1);
        assert_eq!(count_elements(&[4, 0, 7]).unwrap(), 0);
        assert_eq!(count_elements(&[2, 3, 5]).unwrap(), 30);
        assert_eq!(
            count_elements(&[u64::MAX, 2]).unwrap_err().to_string(),
            "number of elements in a payload of rank 2 does not fit in a 64-bit integer"
        );
    }

    #[test]
    fn oversized_shapes_are_errors() {
        assert!(Huge.num_elements().is_err());
        assert!(crate::DatasetStream::<Option<String>>::new(&Huge, 16).is_err());
        assert!(
            Attribute::try_new(Datatype::U8, vec![u64::MAX, 2], Values::UInt(vec![1])).is_err()
        );
    }
}
