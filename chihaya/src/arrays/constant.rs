use chihaya_dtype::ArrayDetails;
use chihaya_error::{ChihayaResult, chihaya_bail};
use ritsuko::{Group, Version, check_scalar, open_dataset};

use crate::utils::{check_data_values, fetch_data_type, load_dimensions};
use crate::{Options, ValidateVTable};

/// An array where every element is the scalar `value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantArray;

impl ValidateVTable for ConstantArray {
    fn id(&self) -> &str {
        "constant array"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let dimensions = load_dimensions(group, "dimensions", version, options)?;
        if dimensions.is_empty() {
            chihaya_bail!("'dimensions' should have non-zero length");
        }

        let value = open_dataset(group, "value")?;
        check_scalar(&*value, "value")?;
        let array_type = fetch_data_type(&*value, "value", version)?;
        check_data_values(&*value, "value", array_type, version, options)?;

        Ok(ArrayDetails::new(array_type, dimensions))
    }
}
