use chihaya_dtype::{ArrayDetails, ArrayType};
use chihaya_error::{ChihayaResult, chihaya_bail};
use ritsuko::{Group, Version};

use crate::utils::{
    Side, check_comparison_method, load_binary_seeds, load_method, load_seed_details, load_side,
    load_value_type,
};
use crate::{Options, ValidateVTable};

/// Comparison of a seed against a scalar or a vector recycled along one dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnaryComparison;

impl ValidateVTable for UnaryComparison {
    fn id(&self) -> &str {
        "unary comparison"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let seed = load_seed_details(group, "seed", version, options)?;
        check_comparison_method(&load_method(group)?)?;
        if load_side(group)? == Side::None {
            chihaya_bail!("'side' should be either 'left' or 'right'");
        }

        let value = load_value_type(group, &seed, version, options)?;
        if value.is_string() != seed.array_type.is_string() {
            chihaya_bail!("both or neither of 'seed' and 'value' should contain strings");
        }

        Ok(seed.with_type(ArrayType::Boolean))
    }
}

/// Element-wise comparison between two seeds of the same shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryComparison;

impl ValidateVTable for BinaryComparison {
    fn id(&self) -> &str {
        "binary comparison"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let (left, right) = load_binary_seeds(group, version, options)?;
        if left.array_type.is_string() != right.array_type.is_string() {
            chihaya_bail!("both or neither of 'left' and 'right' should contain strings");
        }
        check_comparison_method(&load_method(group)?)?;
        Ok(left.with_type(ArrayType::Boolean))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::test_harness::{CURRENT, LEGACY, binary, dense_array, unary_with_scalar};

    #[rstest]
    #[case(ArrayType::Integer, ArrayType::Float, true)]
    #[case(ArrayType::String, ArrayType::String, true)]
    #[case(ArrayType::Boolean, ArrayType::Integer, true)]
    #[case(ArrayType::String, ArrayType::Integer, false)]
    #[case(ArrayType::Float, ArrayType::String, false)]
    fn unary_string_mixing(#[case] seed: ArrayType, #[case] value: ArrayType, #[case] ok: bool) {
        let group = unary_with_scalar(
            "unary comparison",
            dense_array(seed, &[2, 3], &LEGACY),
            ">=",
            "left",
            value,
            &LEGACY,
        );
        let result = UnaryComparison.validate(&group, &LEGACY, &mut Options::default());
        assert_eq!(result.is_ok(), ok);
        if ok {
            assert_eq!(
                result.unwrap(),
                ArrayDetails::new(ArrayType::Boolean, vec![2, 3])
            );
        }
    }

    #[test]
    fn unary_needs_a_side() {
        let group = unary_with_scalar(
            "unary comparison",
            dense_array(ArrayType::Integer, &[2], &CURRENT),
            "==",
            "none",
            ArrayType::Integer,
            &CURRENT,
        );
        assert_eq!(
            UnaryComparison
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "'side' should be either 'left' or 'right'"
        );
    }

    #[test]
    fn binary_string_mixing() {
        let group = binary(
            "binary comparison",
            dense_array(ArrayType::String, &[4, 2], &CURRENT),
            dense_array(ArrayType::String, &[4, 2], &CURRENT),
            "!=",
        );
        assert_eq!(
            BinaryComparison
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap(),
            ArrayDetails::new(ArrayType::Boolean, vec![4, 2])
        );

        let group = binary(
            "binary comparison",
            dense_array(ArrayType::String, &[4, 2], &CURRENT),
            dense_array(ArrayType::Float, &[4, 2], &CURRENT),
            "==",
        );
        assert!(
            BinaryComparison
                .validate(&group, &CURRENT, &mut Options::default())
                .is_err()
        );

        let group = binary(
            "binary comparison",
            dense_array(ArrayType::Float, &[4, 2], &CURRENT),
            dense_array(ArrayType::Float, &[4, 2], &CURRENT),
            "=<",
        );
        assert_eq!(
            BinaryComparison
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "unrecognized 'method' (=<)"
        );
    }
}
