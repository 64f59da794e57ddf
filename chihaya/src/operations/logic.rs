use chihaya_dtype::{ArrayDetails, ArrayType};
use chihaya_error::{ChihayaResult, chihaya_bail};
use ritsuko::{Group, Version};

use crate::utils::{
    LogicMethod, Side, load_binary_seeds, load_method, load_seed_details, load_side,
    load_value_type,
};
use crate::{Options, ValidateVTable};

/// Logical negation of a seed, or a logical operation between a seed and a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnaryLogic;

impl ValidateVTable for UnaryLogic {
    fn id(&self) -> &str {
        "unary logic"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let seed = load_seed_details(group, "seed", version, options)?;
        if seed.array_type.is_string() {
            chihaya_bail!("'seed' should not contain strings");
        }

        let method = LogicMethod::try_from(load_method(group)?.as_str())?;
        if method != LogicMethod::Not {
            if load_side(group)? == Side::None {
                chihaya_bail!("'side' should be either 'left' or 'right'");
            }
            if load_value_type(group, &seed, version, options)?.is_string() {
                chihaya_bail!("'value' should not contain strings");
            }
        }

        Ok(seed.with_type(ArrayType::Boolean))
    }
}

/// Element-wise `&&` or `||` between two seeds of the same shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryLogic;

impl ValidateVTable for BinaryLogic {
    fn id(&self) -> &str {
        "binary logic"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let (left, right) = load_binary_seeds(group, version, options)?;
        if left.array_type.is_string() || right.array_type.is_string() {
            chihaya_bail!("'left' and 'right' should not contain strings");
        }

        let method = load_method(group)?;
        if LogicMethod::try_from(method.as_str())? == LogicMethod::Not {
            chihaya_bail!("unrecognized 'method' ({})", method);
        }
        Ok(left.with_type(ArrayType::Boolean))
    }
}

#[cfg(test)]
mod tests {
    use ritsuko::MemDataset;

    use super::*;
    use crate::test_harness::{CURRENT, binary, dense_array, operation_node, unary_with_scalar};

    #[test]
    fn negation_needs_no_operand() {
        let group = operation_node("unary logic")
            .with_group("seed", dense_array(ArrayType::Float, &[5], &CURRENT))
            .with_dataset("method", MemDataset::scalar_string("!"));
        assert_eq!(
            UnaryLogic
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap(),
            ArrayDetails::new(ArrayType::Boolean, vec![5])
        );
    }

    #[test]
    fn conjunction_needs_a_value() {
        let group = operation_node("unary logic")
            .with_group("seed", dense_array(ArrayType::Float, &[5], &CURRENT))
            .with_dataset("method", MemDataset::scalar_string("&&"));
        assert_eq!(
            UnaryLogic
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "expected a dataset at 'side'"
        );

        let group = unary_with_scalar(
            "unary logic",
            dense_array(ArrayType::Integer, &[5], &CURRENT),
            "||",
            "right",
            ArrayType::Boolean,
            &CURRENT,
        );
        assert!(
            UnaryLogic
                .validate(&group, &CURRENT, &mut Options::default())
                .is_ok()
        );

        let group = unary_with_scalar(
            "unary logic",
            dense_array(ArrayType::Integer, &[5], &CURRENT),
            "||",
            "right",
            ArrayType::String,
            &CURRENT,
        );
        assert!(
            UnaryLogic
                .validate(&group, &CURRENT, &mut Options::default())
                .is_err()
        );
    }

    #[test]
    fn binary_methods() {
        let group = binary(
            "binary logic",
            dense_array(ArrayType::Boolean, &[2, 2], &CURRENT),
            dense_array(ArrayType::Integer, &[2, 2], &CURRENT),
            "&&",
        );
        assert_eq!(
            BinaryLogic
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap(),
            ArrayDetails::new(ArrayType::Boolean, vec![2, 2])
        );

        let group = binary(
            "binary logic",
            dense_array(ArrayType::Boolean, &[2, 2], &CURRENT),
            dense_array(ArrayType::Boolean, &[2, 2], &CURRENT),
            "!",
        );
        assert_eq!(
            BinaryLogic
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "unrecognized 'method' (!)"
        );
    }
}
