use chihaya_dtype::{ArrayDetails, ArrayType};
use chihaya_error::{ChihayaResult, chihaya_bail};
use ritsuko::{Group, Version};

use crate::utils::{
    ArithmeticMethod, Side, load_binary_seeds, load_method, load_seed_details, load_side,
    load_value_type,
};
use crate::{Options, ValidateVTable};

/// Arithmetic between a seed and a scalar or a vector recycled along one dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnaryArithmetic;

impl ValidateVTable for UnaryArithmetic {
    fn id(&self) -> &str {
        "unary arithmetic"
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

        let method = ArithmeticMethod::try_from(load_method(group)?.as_str())?;
        let array_type = match load_side(group)? {
            Side::None => {
                if !method.allows_no_operand() {
                    chihaya_bail!("'side' should not be 'none' for method '{}'", method);
                }
                method.output_type(seed.array_type, ArrayType::Boolean)?
            }
            Side::Left | Side::Right => {
                let value = load_value_type(group, &seed, version, options)?;
                if value.is_string() {
                    chihaya_bail!("'value' should not contain strings");
                }
                method.output_type(seed.array_type, value)?
            }
        };

        Ok(seed.with_type(array_type))
    }
}

/// Element-wise arithmetic between two seeds of the same shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryArithmetic;

impl ValidateVTable for BinaryArithmetic {
    fn id(&self) -> &str {
        "binary arithmetic"
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

        let method = ArithmeticMethod::try_from(load_method(group)?.as_str())?;
        let array_type = method.output_type(left.array_type, right.array_type)?;
        Ok(left.with_type(array_type))
    }
}
