use chihaya_dtype::{ArrayDetails, ArrayType};
use chihaya_error::{ChihayaResult, chihaya_bail};
use ritsuko::{Group, Version, load_scalar_string_dataset, open_dataset};

use crate::utils::load_seed_details;
use crate::{Options, ValidateVTable};

/// Whether a matrix product operand is used as stored or transposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Normal,
    Transposed,
}

fn load_orientation(group: &dyn Group, name: &str) -> ChihayaResult<Orientation> {
    let dataset = open_dataset(group, name)?;
    Ok(match load_scalar_string_dataset(&*dataset, name)?.as_str() {
        "N" => Orientation::Normal,
        "T" => Orientation::Transposed,
        _ => chihaya_bail!("'{}' should be either 'N' or 'T'", name),
    })
}

/// Load one operand, returning its details with the extents in the order they are multiplied.
fn load_operand(
    group: &dyn Group,
    seed: &str,
    orientation: &str,
    version: &Version,
    options: &mut Options,
) -> ChihayaResult<(ArrayType, u64, u64)> {
    let details = load_seed_details(group, seed, version, options)?;
    let [rows, columns] = details.dimensions.as_slice() else {
        chihaya_bail!("'{}' should be a 2-dimensional array", seed);
    };
    if details.array_type.is_string() {
        chihaya_bail!("'{}' should not contain strings", seed);
    }
    Ok(match load_orientation(group, orientation)? {
        Orientation::Normal => (details.array_type, *rows, *columns),
        Orientation::Transposed => (details.array_type, *columns, *rows),
    })
}

/// Matrix multiplication of two 2-dimensional seeds, each optionally transposed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixProduct;

impl ValidateVTable for MatrixProduct {
    fn id(&self) -> &str {
        "matrix product"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let (left_type, rows, left_common) =
            load_operand(group, "left_seed", "left_orientation", version, options)?;
        let (right_type, right_common, columns) =
            load_operand(group, "right_seed", "right_orientation", version, options)?;

        if !options.details_only && left_common != right_common {
            chihaya_bail!(
                "inconsistent common dimensions ({} vs {})",
                left_common,
                right_common
            );
        }

        let array_type = if left_type == ArrayType::Float || right_type == ArrayType::Float {
            ArrayType::Float
        } else {
            ArrayType::Integer
        };
        Ok(ArrayDetails::new(array_type, vec![rows, columns]))
    }
}
