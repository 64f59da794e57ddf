use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::ArrayType;

/// The inferred type and shape of a (possibly delayed) array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayDetails {
    /// Element type of the array.
    pub array_type: ArrayType,
    /// Extent of each dimension, in logical order.
    pub dimensions: Vec<u64>,
}

impl ArrayDetails {
    /// Create a new [`ArrayDetails`].
    pub fn new(array_type: ArrayType, dimensions: Vec<u64>) -> Self {
        Self {
            array_type,
            dimensions,
        }
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.dimensions.len()
    }

    /// Check if `self` and `other` have the same rank and the same extents, in order.
    pub fn has_same_dimensions(&self, other: &ArrayDetails) -> bool {
        self.dimensions == other.dimensions
    }

    /// Same details with a different element type.
    pub fn with_type(self, array_type: ArrayType) -> Self {
        Self { array_type, ..self }
    }
}

impl Display for ArrayDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}]",
            self.array_type,
            self.dimensions.iter().join(", ")
        )
    }
}
