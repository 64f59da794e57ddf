use chihaya_dtype::ArrayDetails;
use chihaya_error::{ChihayaResult, chihaya_bail};
use ritsuko::{Group, Version, open_dataset};

use crate::utils::{check_data_values, fetch_data_type, load_flag, validate_optional_dimnames};
use crate::{Options, ValidateVTable};

/// An array whose values are stored in full in the `data` dataset.
///
/// Unless `native` is set, the stored layout is the transpose of the array, so the reported
/// dimensions are those of `data` in reverse.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseArray;

impl ValidateVTable for DenseArray {
    fn id(&self) -> &str {
        "dense array"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let data = open_dataset(group, "data")?;
        let mut dimensions = data.shape();
        if dimensions.is_empty() {
            chihaya_bail!("'data' should have non-zero dimensions");
        }

        let array_type = fetch_data_type(&*data, "data", version)?;
        check_data_values(&*data, "data", array_type, version, options)?;

        let native = load_flag(group, "native", version)?;

        // Names are stored against the layout of 'data', not the reported dimensions.
        validate_optional_dimnames(group, &dimensions, version, options)?;

        if !native {
            dimensions.reverse();
        }
        Ok(ArrayDetails::new(array_type, dimensions))
    }
}

#[cfg(test)]
mod tests {
    use chihaya_dtype::ArrayType;
    use ritsuko::{Attribute, Datatype, MemDataset, MemGroup};
    use rstest::rstest;

    use super::*;
    use crate::test_harness::{CURRENT, LEGACY, dense_array, flag, typed_scalar, typed_values};

    #[rstest]
    #[case(ArrayType::Boolean, LEGACY)]
    #[case(ArrayType::Integer, LEGACY)]
    #[case(ArrayType::Float, CURRENT)]
    #[case(ArrayType::String, CURRENT)]
    fn infers_type_and_shape(#[case] array_type: ArrayType, #[case] version: Version) {
        let group = dense_array(array_type, &[10, 5], &version);
        assert_eq!(
            DenseArray
                .validate(&group, &version, &mut Options::default())
                .unwrap(),
            ArrayDetails::new(array_type, vec![10, 5])
        );
    }

    #[test]
    fn non_native_reverses_dimensions() {
        let mut group = dense_array(ArrayType::Integer, &[10, 5, 2], &CURRENT);
        group.insert("native", ritsuko::MemObject::Dataset(flag(false)));
        assert_eq!(
            DenseArray
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap()
                .dimensions,
            vec![2, 5, 10]
        );
    }

    #[test]
    fn scalar_data_is_rejected() {
        let group = MemGroup::new()
            .with_dataset("data", typed_scalar(ArrayType::Float, &CURRENT))
            .with_dataset("native", flag(true));
        assert_eq!(
            DenseArray
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "'data' should have non-zero dimensions"
        );
    }

    #[test]
    fn native_is_required() {
        let group =
            MemGroup::new().with_dataset("data", typed_values(ArrayType::Float, vec![3], &CURRENT));
        assert_eq!(
            DenseArray
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "expected a dataset at 'native'"
        );
    }

    #[test]
    fn placeholder_must_match_datatype() {
        let data = typed_values(ArrayType::Integer, vec![4], &CURRENT).with_attribute(
            "missing_placeholder",
            Attribute::float(Datatype::F64, -1.0).unwrap(),
        );
        let group = MemGroup::new()
            .with_dataset("data", data)
            .with_dataset("native", flag(true));
        assert!(
            DenseArray
                .validate(&group, &CURRENT, &mut Options::default())
                .is_err()
        );
        assert!(
            DenseArray
                .validate(&group, &CURRENT, &mut Options::default().with_details_only(true))
                .is_ok()
        );
    }

    #[test]
    fn string_data_cannot_hold_nulls() {
        let data = MemDataset::strings(vec![2], vec![Some("a".into()), None])
            .unwrap()
            .with_attribute("type", Attribute::string("STRING"));
        let group = MemGroup::new()
            .with_dataset("data", data)
            .with_dataset("native", flag(true));
        assert_eq!(
            DenseArray
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "'data' should not contain null strings"
        );
    }
}
