use chihaya_dtype::{ArrayDetails, ArrayType};
use chihaya_error::{ChihayaResult, chihaya_err};
use ritsuko::{
    Group, Version, load_scalar_string_attribute, load_scalar_string_dataset, open_dataset,
};

use crate::utils::load_dimensions;
use crate::{Options, ValidateVTable};

/// Validate the fields every opaque array must carry: its `dimensions` and its declared `type`.
fn validate_minimal(
    group: &dyn Group,
    version: &Version,
    options: &Options,
) -> ChihayaResult<ArrayDetails> {
    let dimensions = load_dimensions(group, "dimensions", version, options)?;

    let declared = if version.lt(1, 1, 0) {
        let dataset = open_dataset(group, "type")?;
        load_scalar_string_dataset(&*dataset, "type")?
    } else {
        load_scalar_string_attribute(group, "type")?
    };
    let array_type = ArrayType::try_from(declared.as_str()).map_err(|_| {
        chihaya_err!("'type' should be one of 'BOOLEAN', 'INTEGER', 'FLOAT' or 'STRING'")
    })?;

    Ok(ArrayDetails::new(array_type, dimensions))
}

/// Arrays whose `delayed_array` starts with `"custom "`, stored in an application-defined way.
///
/// Only the type and dimensions can be checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomArray;

impl ValidateVTable for CustomArray {
    fn id(&self) -> &str {
        "custom array"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        validate_minimal(group, version, options)
    }
}

/// Arrays held in another HDF5 file, named by `file` and `name`. Only recognized before 1.1.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalHdf5Array;

impl ValidateVTable for ExternalHdf5Array {
    fn id(&self) -> &str {
        "external hdf5 array"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let details = validate_minimal(group, version, options)?;
        for field in ["file", "name"] {
            let dataset = open_dataset(group, field)?;
            load_scalar_string_dataset(&*dataset, field)?;
        }
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use ritsuko::{Attribute, MemDataset};

    use super::*;
    use crate::test_harness::{CURRENT, LEGACY, custom_array};

    #[test]
    fn custom_by_version() {
        for version in [LEGACY, CURRENT] {
            let group = custom_array("custom foo", ArrayType::Float, &[4, 6], &version);
            assert_eq!(
                CustomArray
                    .validate(&group, &version, &mut Options::default())
                    .unwrap(),
                ArrayDetails::new(ArrayType::Float, vec![4, 6])
            );
        }
    }

    #[test]
    fn type_location_depends_on_version() {
        let group = custom_array("custom foo", ArrayType::Float, &[4, 6], &CURRENT);
        assert_eq!(
            CustomArray
                .validate(&group, &LEGACY, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "expected a dataset at 'type'"
        );

        let group = custom_array("custom foo", ArrayType::Float, &[4, 6], &LEGACY);
        assert_eq!(
            CustomArray
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "expected a 'type' attribute"
        );
    }

    #[test]
    fn unknown_type() {
        let group = custom_array("custom foo", ArrayType::Float, &[4], &CURRENT)
            .with_attribute("type", Attribute::string("COMPLEX"));
        assert_eq!(
            CustomArray
                .validate(&group, &CURRENT, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "'type' should be one of 'BOOLEAN', 'INTEGER', 'FLOAT' or 'STRING'"
        );
    }

    #[test]
    fn external_needs_a_location() {
        let group = custom_array("external hdf5 dense", ArrayType::Integer, &[4], &LEGACY);
        assert_eq!(
            ExternalHdf5Array
                .validate(&group, &LEGACY, &mut Options::default())
                .unwrap_err()
                .to_string(),
            "expected a dataset at 'file'"
        );

        let group = group
            .with_dataset("file", MemDataset::scalar_string("other.h5"))
            .with_dataset("name", MemDataset::scalar_string("matrix"));
        assert_eq!(
            ExternalHdf5Array
                .validate(&group, &LEGACY, &mut Options::default())
                .unwrap(),
            ArrayDetails::new(ArrayType::Integer, vec![4])
        );
    }
}
