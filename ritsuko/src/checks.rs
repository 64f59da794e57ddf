use chihaya_error::{ChihayaResult, chihaya_bail};

use crate::{Dataset, DatasetStream, DatatypeClass, Values};

/// Name of the attribute holding a dataset's missing value placeholder.
pub const MISSING_PLACEHOLDER: &str = "missing_placeholder";

/// Validate the missing value placeholder attribute called `attr_name` on `dataset`, if any.
///
/// The placeholder must be a scalar. With `type_class_only`, it only needs to share the class of
/// the dataset's datatype, otherwise the datatypes must be identical. String placeholders cannot
/// be null.
pub fn check_missing_placeholder_attribute(
    dataset: &dyn Dataset,
    attr_name: &str,
    type_class_only: bool,
) -> ChihayaResult<()> {
    let Some(attribute) = dataset.attribute(attr_name) else {
        return Ok(());
    };

    if !attribute.is_scalar() {
        chihaya_bail!("the '{}' attribute should be a scalar", attr_name);
    }

    if type_class_only {
        if attribute.datatype().class() != dataset.datatype().class() {
            chihaya_bail!(
                "the '{}' attribute should have the same type class as its dataset",
                attr_name
            );
        }
    } else if attribute.datatype() != dataset.datatype() {
        chihaya_bail!(
            "the '{}' attribute should have the same datatype as its dataset",
            attr_name
        );
    }

    if let Values::Str(values) = attribute.values() {
        if values.iter().any(Option::is_none) {
            chihaya_bail!("the '{}' attribute should not be a null string", attr_name);
        }
    }

    Ok(())
}

/// Check that every element of a string dataset of any rank is a non-null string.
pub fn validate_string_dataset(
    dataset: &dyn Dataset,
    name: &str,
    buffer_size: usize,
) -> ChihayaResult<()> {
    if dataset.datatype().class() != DatatypeClass::String {
        chihaya_bail!("'{}' should be a string dataset", name);
    }
    for value in DatasetStream::<Option<String>>::new(dataset, buffer_size)? {
        if value?.is_none() {
            chihaya_bail!("'{}' should not contain null strings", name);
        }
    }
    Ok(())
}
