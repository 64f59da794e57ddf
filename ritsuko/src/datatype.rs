use std::fmt::{Display, Formatter};

use chihaya_error::{ChihayaResult, chihaya_bail, chihaya_err};

/// The class of a stored datatype, ignoring its width and signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatatypeClass {
    /// Fixed-point integers.
    Integer,
    /// IEEE floating point numbers.
    Float,
    /// Fixed or variable length strings.
    String,
    /// Anything else: compounds, enums, bitfields, references...
    Opaque,
}

impl Display for DatatypeClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DatatypeClass::Integer => write!(f, "integer"),
            DatatypeClass::Float => write!(f, "float"),
            DatatypeClass::String => write!(f, "string"),
            DatatypeClass::Opaque => write!(f, "opaque"),
        }
    }
}

/// The stored datatype of a dataset or attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    /// An integer of `bits` width.
    Integer {
        /// Width in bits, one of 8, 16, 32 or 64.
        bits: u8,
        /// Whether negative values can be represented.
        signed: bool,
    },
    /// A floating point number of `bits` width.
    Float {
        /// Width in bits, typically 32 or 64.
        bits: u8,
    },
    /// A string.
    String,
    /// A datatype that this crate does not interpret.
    Opaque,
}

impl Datatype {
    /// `int8`
    pub const I8: Self = Self::Integer {
        bits: 8,
        signed: true,
    };
    /// `int16`
    pub const I16: Self = Self::Integer {
        bits: 16,
        signed: true,
    };
    /// `int32`
    pub const I32: Self = Self::Integer {
        bits: 32,
        signed: true,
    };
    /// `int64`
    pub const I64: Self = Self::Integer {
        bits: 64,
        signed: true,
    };
    /// `uint8`
    pub const U8: Self = Self::Integer {
        bits: 8,
        signed: false,
    };
    /// `uint16`
    pub const U16: Self = Self::Integer {
        bits: 16,
        signed: false,
    };
    /// `uint32`
    pub const U32: Self = Self::Integer {
        bits: 32,
        signed: false,
    };
    /// `uint64`
    pub const U64: Self = Self::Integer {
        bits: 64,
        signed: false,
    };
    /// `float32`
    pub const F32: Self = Self::Float { bits: 32 };
    /// `float64`
    pub const F64: Self = Self::Float { bits: 64 };

    /// The class of this datatype.
    pub fn class(&self) -> DatatypeClass {
        match self {
            Datatype::Integer { .. } => DatatypeClass::Integer,
            Datatype::Float { .. } => DatatypeClass::Float,
            Datatype::String => DatatypeClass::String,
            Datatype::Opaque => DatatypeClass::Opaque,
        }
    }

    /// Check that `values` is the physical representation of this datatype.
    pub fn check_values(&self, values: &Values) -> ChihayaResult<()> {
        let consistent = matches!(
            (self, values),
            (Datatype::Integer { signed: true, .. }, Values::Int(_))
                | (Datatype::Integer { signed: false, .. }, Values::UInt(_))
                | (Datatype::Float { .. }, Values::Float(_))
                | (Datatype::String, Values::Str(_))
                | (Datatype::Opaque, _)
        );
        if !consistent {
            chihaya_bail!(Unsupported: "{} values cannot be stored as {}", values.kind(), self);
        }
        Ok(())
    }
}

impl Display for Datatype {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Datatype::Integer { bits, signed: true } => write!(f, "int{}", bits),
            Datatype::Integer {
                bits,
                signed: false,
            } => write!(f, "uint{}", bits),
            Datatype::Float { bits } => write!(f, "float{}", bits),
            Datatype::String => write!(f, "string"),
            Datatype::Opaque => write!(f, "opaque"),
        }
    }
}

/// A flat, row-major buffer of stored values.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    /// Signed integers.
    Int(Vec<i64>),
    /// Unsigned integers.
    UInt(Vec<u64>),
    /// Floating point numbers.
    Float(Vec<f64>),
    /// Strings, where `None` is a null string.
    Str(Vec<Option<String>>),
}

impl Values {
    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            Values::Int(v) => v.len(),
            Values::UInt(v) => v.len(),
            Values::Float(v) => v.len(),
            Values::Str(v) => v.len(),
        }
    }

    /// Check if there are no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A copy of the values in `start..start + count`.
    pub fn slice(&self, start: usize, count: usize) -> ChihayaResult<Values> {
        let end = start
            .checked_add(count)
            .filter(|end| *end <= self.len())
            .ok_or_else(|| chihaya_err!(OutOfBounds: start.saturating_add(count) as u64, 0, self.len() as u64))?;
        Ok(match self {
            Values::Int(v) => Values::Int(v[start..end].to_vec()),
            Values::UInt(v) => Values::UInt(v[start..end].to_vec()),
            Values::Float(v) => Values::Float(v[start..end].to_vec()),
            Values::Str(v) => Values::Str(v[start..end].to_vec()),
        })
    }

    fn kind(&self) -> &'static str {
        match self {
            Values::Int(_) => "signed integer",
            Values::UInt(_) => "unsigned integer",
            Values::Float(_) => "float",
            Values::Str(_) => "string",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes() {
        assert_eq!(Datatype::U16.class(), DatatypeClass::Integer);
        assert_eq!(Datatype::F32.class(), DatatypeClass::Float);
        assert_eq!(Datatype::String.class(), DatatypeClass::String);
        assert_eq!(Datatype::Opaque.class(), DatatypeClass::Opaque);
    }

    #[test]
    fn values_must_match_signedness() {
        assert!(Datatype::I32.check_values(&Values::Int(vec![-1])).is_ok());
        assert!(Datatype::U32.check_values(&Values::Int(vec![1])).is_err());
        assert!(Datatype::String.check_values(&Values::Float(vec![1.0])).is_err());
    }

    #[test]
    fn slicing_checks_bounds() {
        let values = Values::UInt(vec![1, 2, 3, 4]);
        assert_eq!(values.slice(1, 2).unwrap(), Values::UInt(vec![2, 3]));
        assert!(values.slice(3, 2).is_err());
    }
}
