use chihaya_dtype::{ArrayDetails, ArrayType};
use chihaya_error::{ChihayaResult, chihaya_bail};
use ritsuko::{Group, Version, load_scalar_string_dataset, open_dataset};

use super::{check_data_values, fetch_data_type, load_along};
use crate::Options;

/// Which side of the operator the seed sits on, relative to the `value` operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    /// The value is the left operand.
    Left,
    /// The value is the right operand.
    Right,
    /// There is no value, the operator applies to the seed alone.
    None,
}

/// Load the scalar string `side` child of a unary operation.
pub(crate) fn load_side(group: &dyn Group) -> ChihayaResult<Side> {
    let dataset = open_dataset(group, "side")?;
    Ok(match load_scalar_string_dataset(&*dataset, "side")?.as_str() {
        "left" => Side::Left,
        "right" => Side::Right,
        "none" => Side::None,
        other => chihaya_bail!("unrecognized 'side' ({})", other),
    })
}

/// Validate the `value` operand of a unary operation applied to `seed`, returning its type.
///
/// A scalar value applies to every element. A 1-dimensional value is recycled along the dimension
/// named by `along`, so its length must match that dimension.
pub(crate) fn load_value_type(
    group: &dyn Group,
    seed: &ArrayDetails,
    version: &Version,
    options: &Options,
) -> ChihayaResult<ArrayType> {
    let value = open_dataset(group, "value")?;
    match value.shape().as_slice() {
        [] => {}
        [length] => {
            let along = load_along(group, version)?;
            if along >= seed.ndim() {
                chihaya_bail!("'along' should be less than the seed dimensionality");
            }
            if !options.details_only && *length != seed.dimensions[along] {
                chihaya_bail!("length of 'value' should be equal to the 'along' dimension extent");
            }
        }
        _ => chihaya_bail!("'value' dataset should be scalar or 1-dimensional"),
    }

    let array_type = fetch_data_type(&*value, "value", version)?;
    check_data_values(&*value, "value", array_type, version, options)?;
    Ok(array_type)
}

#[cfg(test)]
mod tests {
    use ritsuko::{Attribute, Datatype, MemDataset, MemGroup};

    use super::*;

    const CURRENT: Version = Version::new(1, 1, 0);

    fn float_value(shape: Vec<u64>) -> MemDataset {
        let count = shape.iter().product::<u64>() as usize;
        MemDataset::float(Datatype::F64, shape, vec![1.5; count])
            .unwrap()
            .with_attribute("type", Attribute::string("FLOAT"))
    }

    fn along(value: u64) -> MemDataset {
        MemDataset::uint(Datatype::U8, vec![], vec![value]).unwrap()
    }

    #[test]
    fn sides() {
        for (text, side) in [("left", Side::Left), ("right", Side::Right), ("none", Side::None)] {
            let group = MemGroup::new().with_dataset("side", MemDataset::scalar_string(text));
            assert_eq!(load_side(&group).unwrap(), side);
        }
        let group = MemGroup::new().with_dataset("side", MemDataset::scalar_string("up"));
        assert_eq!(
            load_side(&group).unwrap_err().to_string(),
            "unrecognized 'side' (up)"
        );
    }

    #[test]
    fn scalar_and_vector_values() {
        let seed = ArrayDetails::new(ArrayType::Integer, vec![10, 5]);
        let options = Options::default();

        let scalar = MemGroup::new().with_dataset("value", float_value(vec![]));
        assert_eq!(
            load_value_type(&scalar, &seed, &CURRENT, &options).unwrap(),
            ArrayType::Float
        );

        let vector = MemGroup::new()
            .with_dataset("value", float_value(vec![5]))
            .with_dataset("along", along(1));
        assert!(load_value_type(&vector, &seed, &CURRENT, &options).is_ok());

        let mismatched = MemGroup::new()
            .with_dataset("value", float_value(vec![5]))
            .with_dataset("along", along(0));
        assert_eq!(
            load_value_type(&mismatched, &seed, &CURRENT, &options)
                .unwrap_err()
                .to_string(),
            "length of 'value' should be equal to the 'along' dimension extent"
        );
        let details_only = options.clone().with_details_only(true);
        assert!(load_value_type(&mismatched, &seed, &CURRENT, &details_only).is_ok());

        let out_of_range = MemGroup::new()
            .with_dataset("value", float_value(vec![5]))
            .with_dataset("along", along(2));
        assert!(load_value_type(&out_of_range, &seed, &CURRENT, &details_only).is_err());

        let matrix = MemGroup::new().with_dataset("value", float_value(vec![2, 5]));
        assert!(load_value_type(&matrix, &seed, &CURRENT, &options).is_err());
    }
}
