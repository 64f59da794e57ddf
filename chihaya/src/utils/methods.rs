use std::fmt::{Display, Formatter};

use chihaya_dtype::ArrayType;
use chihaya_error::{ChihayaError, ChihayaResult, chihaya_bail, chihaya_err};
use ritsuko::{Group, load_scalar_string_dataset, open_dataset};

/// Load the scalar string `method` child of an operation.
pub(crate) fn load_method(group: &dyn Group) -> ChihayaResult<String> {
    let dataset = open_dataset(group, "method")?;
    load_scalar_string_dataset(&*dataset, "method")
}

/// Element-wise arithmetic, following R's operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArithmeticMethod {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulo,
    IntegerDivide,
}

impl ArithmeticMethod {
    /// Whether the operation can be applied to the seed alone, i.e. unary plus and minus.
    pub fn allows_no_operand(self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }

    /// Type of the result for operands of types `a` and `b`, neither of which may be a string.
    pub fn output_type(self, a: ArrayType, b: ArrayType) -> ChihayaResult<ArrayType> {
        let promoted = a.promote_numeric(b)?;
        Ok(match self {
            Self::Divide => ArrayType::Float,
            Self::IntegerDivide => ArrayType::Integer,
            _ => promoted,
        })
    }
}

impl TryFrom<&str> for ArithmeticMethod {
    type Error = ChihayaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(match value {
            "+" => Self::Add,
            "-" => Self::Subtract,
            "*" => Self::Multiply,
            "/" => Self::Divide,
            "^" => Self::Power,
            "%%" => Self::Modulo,
            "%/%" => Self::IntegerDivide,
            _ => return Err(chihaya_err!("unrecognized 'method' ({})", value)),
        })
    }
}

impl Display for ArithmeticMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
            Self::Modulo => "%%",
            Self::IntegerDivide => "%/%",
        };
        write!(f, "{}", symbol)
    }
}

/// Check that `method` is one of the element-wise comparisons, which always produce booleans.
pub(crate) fn check_comparison_method(method: &str) -> ChihayaResult<()> {
    if !matches!(method, "==" | ">" | "<" | ">=" | "<=" | "!=") {
        chihaya_bail!("unrecognized 'method' ({})", method);
    }
    Ok(())
}

/// Element-wise logical operators, always producing booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogicMethod {
    Not,
    And,
    Or,
}

impl TryFrom<&str> for LogicMethod {
    type Error = ChihayaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(match value {
            "!" => Self::Not,
            "&&" => Self::And,
            "||" => Self::Or,
            _ => return Err(chihaya_err!("unrecognized 'method' ({})", value)),
        })
    }
}
