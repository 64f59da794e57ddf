use std::fmt::{Display, Formatter};

use chihaya_error::{ChihayaError, ChihayaResult, chihaya_bail, chihaya_err};

/// The element type of a delayed array.
///
/// Variants are ordered from the least to the most general, so that the promoted type of two
/// numeric operands is simply their maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArrayType {
    /// Logical values.
    Boolean,
    /// 32-bit signed integers.
    Integer,
    /// Double-precision floating point numbers.
    Float,
    /// UTF-8 strings.
    String,
}

impl ArrayType {
    /// All types, in promotion order.
    pub const ALL: [ArrayType; 4] = [
        ArrayType::Boolean,
        ArrayType::Integer,
        ArrayType::Float,
        ArrayType::String,
    ];

    /// The name used for this type in `type` fields.
    pub const fn name(&self) -> &'static str {
        match self {
            ArrayType::Boolean => "BOOLEAN",
            ArrayType::Integer => "INTEGER",
            ArrayType::Float => "FLOAT",
            ArrayType::String => "STRING",
        }
    }

    /// Check if `self` is [`ArrayType::String`].
    pub fn is_string(&self) -> bool {
        matches!(self, ArrayType::String)
    }

    /// Check if `self` is a boolean, integer or float.
    pub fn is_numeric(&self) -> bool {
        !self.is_string()
    }

    /// The type holding values of both `self` and `other`.
    ///
    /// Strings never mix with numbers, so promoting a string with a non-string fails.
    pub fn promote(self, other: ArrayType) -> ChihayaResult<ArrayType> {
        if self.is_string() != other.is_string() {
            chihaya_bail!("cannot promote {} and {} to a common type", self, other);
        }
        Ok(self.max(other))
    }

    /// Like [`ArrayType::promote`], for operations whose result is never boolean.
    ///
    /// Booleans are widened to integers, as arithmetic on logical values yields integers.
    pub fn promote_numeric(self, other: ArrayType) -> ChihayaResult<ArrayType> {
        if self.is_string() || other.is_string() {
            chihaya_bail!("cannot apply numeric promotion to {} and {}", self, other);
        }
        Ok(self.max(other).max(ArrayType::Integer))
    }
}

impl Display for ArrayType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<&str> for ArrayType {
    type Error = ChihayaError;

    fn try_from(value: &str) -> ChihayaResult<Self> {
        ArrayType::ALL
            .into_iter()
            .find(|t| t.name() == value)
            .ok_or_else(|| chihaya_err!("unknown array type '{}'", value))
    }
}
