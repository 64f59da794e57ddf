use chihaya_dtype::{ArrayDetails, ArrayType};
use chihaya_error::{ChihayaResult, chihaya_bail};
use ritsuko::{
    DatatypeClass, Group, Version, check_scalar, exceeds_float_limit, exceeds_integer_limit,
    open_dataset,
};

use crate::utils::{load_method, load_seed_details};
use crate::{Options, ValidateVTable};

/// Methods that always produce floating-point results.
const FLOAT_METHODS: &[&str] = &[
    "sqrt", "exp", "expm1", "log", "log2", "log10", "log1p", "ceiling", "floor", "trunc", "round",
    "signif", "sin", "cos", "tan", "acos", "asin", "atan", "sinh", "cosh", "tanh", "acosh",
    "asinh", "atanh", "gamma", "lgamma", "digamma", "trigamma", "cospi", "sinpi", "tanpi",
];

/// An element-wise mathematical function of a seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnaryMath;

impl ValidateVTable for UnaryMath {
    fn id(&self) -> &str {
        "unary math"
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

        let method = load_method(group)?;
        let array_type = match method.as_str() {
            "abs" | "sign" => seed.array_type.promote_numeric(ArrayType::Boolean)?,
            other if FLOAT_METHODS.contains(&other) => {
                match other {
                    "log" if group.child_kind("base").is_some() => check_base(group, version)?,
                    "round" | "signif" => check_digits(group, version)?,
                    _ => {}
                }
                ArrayType::Float
            }
            other => chihaya_bail!("unrecognized 'method' ({})", other),
        };

        Ok(seed.with_type(array_type))
    }
}

fn check_base(group: &dyn Group, version: &Version) -> ChihayaResult<()> {
    let base = open_dataset(group, "base")?;
    check_scalar(&*base, "base")?;
    if version.lt(1, 1, 0) {
        if base.datatype().class() != DatatypeClass::Float {
            chihaya_bail!("'base' should be a floating-point scalar");
        }
    } else if exceeds_float_limit(base.datatype(), 64) {
        chihaya_bail!("'base' should have a datatype that fits in a 64-bit float");
    }
    Ok(())
}

fn check_digits(group: &dyn Group, version: &Version) -> ChihayaResult<()> {
    let digits = open_dataset(group, "digits")?;
    check_scalar(&*digits, "digits")?;
    if version.lt(1, 1, 0) {
        if digits.datatype().class() != DatatypeClass::Integer {
            chihaya_bail!("'digits' should be an integer scalar");
        }
    } else if exceeds_integer_limit(digits.datatype(), 32, true) {
        chihaya_bail!("'digits' should have a datatype that fits in a 32-bit signed integer");
    }
    Ok(())
}

/// Element-wise checks for special floating-point values, always producing booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnarySpecialCheck;

impl ValidateVTable for UnarySpecialCheck {
    fn id(&self) -> &str {
        "unary special check"
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

        let method = load_method(group)?;
        if !matches!(method.as_str(), "is_nan" | "is_finite" | "is_infinite") {
            chihaya_bail!("unrecognized 'method' ({})", method);
        }

        Ok(seed.with_type(ArrayType::Boolean))
    }
}

#[cfg(test)]
mod tests {
    use ritsuko::{Datatype, MemDataset, MemGroup};
    use rstest::rstest;

    use super::*;
    use crate::test_harness::{CURRENT, LEGACY, dense_array, operation_node};

    fn math(seed: ArrayType, method: &str, version: &Version) -> MemGroup {
        operation_node("unary math")
            .with_group("seed", dense_array(seed, &[6], version))
            .with_dataset("method", MemDataset::scalar_string(method))
    }

    #[rstest]
    #[case(ArrayType::Boolean, "abs", ArrayType::Integer)]
    #[case(ArrayType::Integer, "sign", ArrayType::Integer)]
    #[case(ArrayType::Float, "abs", ArrayType::Float)]
    #[case(ArrayType::Integer, "sqrt", ArrayType::Float)]
    #[case(ArrayType::Boolean, "log", ArrayType::Float)]
    #[case(ArrayType::Integer, "tanpi", ArrayType::Float)]
    fn output_types(#[case] seed: ArrayType, #[case] method: &str, #[case] expected: ArrayType) {
        let group = math(seed, method, &CURRENT);
        assert_eq!(
            UnaryMath
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap(),
            ArrayDetails::new(expected, vec![6])
        );
    }

    #[test]
    fn log_base() {
        let group = math(ArrayType::Integer, "log", &LEGACY).with_dataset(
            "base",
            MemDataset::float(Datatype::F64, vec![], vec![2.0]).unwrap(),
        );
        assert!(
            UnaryMath
                .validate(&group, &LEGACY, &mut Options::default())
                .is_ok()
        );

        let group = math(ArrayType::Integer, "log", &LEGACY).with_dataset(
            "base",
            MemDataset::int(Datatype::I32, vec![], vec![2]).unwrap(),
        );
        assert_eq!(
            UnaryMath
                .validate(&group, &LEGACY, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "'base' should be a floating-point scalar"
        );
    }

    #[test]
    fn rounding_needs_digits() {
        let group = math(ArrayType::Float, "round", &CURRENT);
        assert_eq!(
            UnaryMath
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "expected a dataset at 'digits'"
        );

        let group = math(ArrayType::Float, "signif", &CURRENT).with_dataset(
            "digits",
            MemDataset::int(Datatype::I64, vec![], vec![3]).unwrap(),
        );
        assert!(
            UnaryMath
                .validate(&group, &CURRENT, &mut Options::default())
                .is_err()
        );

        let group = math(ArrayType::Float, "signif", &CURRENT).with_dataset(
            "digits",
            MemDataset::int(Datatype::I32, vec![], vec![3]).unwrap(),
        );
        assert!(
            UnaryMath
                .validate(&group, &CURRENT, &mut Options::default())
                .is_ok()
        );
    }

    #[test]
    fn unknown_and_string_inputs() {
        let group = math(ArrayType::Float, "cbrt", &CURRENT);
        assert_eq!(
            UnaryMath
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "unrecognized 'method' (cbrt)"
        );
        let group = math(ArrayType::String, "abs", &CURRENT);
        assert!(
            UnaryMath
                .validate(&group, &CURRENT, &mut Options::default())
                .is_err()
        );
    }

    #[test]
    fn special_checks() {
        for method in ["is_nan", "is_finite", "is_infinite"] {
            let group = operation_node("unary special check")
                .with_group("seed", dense_array(ArrayType::Float, &[2, 2], &CURRENT))
                .with_dataset("method", MemDataset::scalar_string(method));
            assert_eq!(
                UnarySpecialCheck
                    .validate(&group, &CURRENT, &mut Options::default())
                    .unwrap(),
                ArrayDetails::new(ArrayType::Boolean, vec![2, 2])
            );
        }

        let group = operation_node("unary special check")
            .with_group("seed", dense_array(ArrayType::Float, &[2, 2], &CURRENT))
            .with_dataset("method", MemDataset::scalar_string("is_na"));
        assert!(
            UnarySpecialCheck
                .validate(&group, &CURRENT, &mut Options::default())
                .is_err()
        );
    }
}
