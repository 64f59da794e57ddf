use chihaya_error::{ChihayaResult, chihaya_bail};
use ritsuko::{
    DatatypeClass, Group, ObjectKind, Version, get_1d_length, open_dataset, open_group,
    validate_string_dataset,
};

use super::read_list;
use crate::Options;

/// Validate a `dimnames` list against the extents of the array it annotates.
///
/// Each entry is optional; a present entry must be a 1-dimensional string dataset without nulls,
/// with one name per position along its dimension.
pub(crate) fn validate_dimnames(
    dimnames: &dyn Group,
    dimensions: &[u64],
    version: &Version,
    options: &Options,
) -> ChihayaResult<()> {
    let list = read_list(dimnames, "dimnames", version)?;
    list.check_rank("dimnames", dimensions.len())?;

    for (axis, child) in &list.present {
        let name = format!("dimnames/{}", child);
        let dataset = open_dataset(dimnames, child)?;
        let length = get_1d_length(&*dataset, &name)?;
        if dataset.datatype().class() != DatatypeClass::String {
            chihaya_bail!("'{}' should be a string dataset", name);
        }
        if length != dimensions[*axis] {
            chihaya_bail!(
                "'{}' should have length equal to the extent of its dimension ({})",
                name,
                dimensions[*axis]
            );
        }
        validate_string_dataset(&*dataset, &name, options.buffer_size)?;
    }
    Ok(())
}

/// Validate the `dimnames` child of `group` if it has one.
pub(crate) fn validate_optional_dimnames(
    group: &dyn Group,
    dimensions: &[u64],
    version: &Version,
    options: &Options,
) -> ChihayaResult<()> {
    if options.details_only {
        return Ok(());
    }
    match group.child_kind("dimnames") {
        None => Ok(()),
        Some(ObjectKind::Dataset) => chihaya_bail!("expected a group at 'dimnames'"),
        Some(ObjectKind::Group) => {
            let dimnames = open_group(group, "dimnames")?;
            validate_dimnames(&*dimnames, dimensions, version, options)
        }
    }
}

#[cfg(test)]
mod tests {
    use ritsuko::{MemDataset, MemGroup};

    use super::*;

    const CURRENT: Version = Version::new(1, 1, 0);

    #[test]
    fn names_match_extents() {
        let options = Options::default();
        let dimnames = MemGroup::new().with_dataset("1", MemDataset::string_vector(["a", "b"]));
        assert!(validate_dimnames(&dimnames, &[5, 2], &CURRENT, &options).is_ok());
        assert_eq!(
            validate_dimnames(&dimnames, &[2, 5], &CURRENT, &options)
                .unwrap_err()
                .to_string(),
            "'dimnames/1' should have length equal to the extent of its dimension (5)"
        );
        assert!(validate_dimnames(&dimnames, &[2], &CURRENT, &options).is_err());
    }

    #[test]
    fn names_are_non_null_strings() {
        let options = Options::default();
        let nulls = MemGroup::new().with_dataset(
            "0",
            MemDataset::strings(vec![2], vec![Some("a".into()), None]).unwrap(),
        );
        assert_eq!(
            validate_dimnames(&nulls, &[2], &CURRENT, &options)
                .unwrap_err()
                .to_string(),
            "'dimnames/0' should not contain null strings"
        );
    }

    #[test]
    fn optional_dimnames() {
        let options = Options::default();
        assert!(validate_optional_dimnames(&MemGroup::new(), &[2], &CURRENT, &options).is_ok());

        let as_dataset =
            MemGroup::new().with_dataset("dimnames", MemDataset::string_vector(["a", "b"]));
        assert!(validate_optional_dimnames(&as_dataset, &[2], &CURRENT, &options).is_err());
        let options = options.with_details_only(true);
        assert!(validate_optional_dimnames(&as_dataset, &[2], &CURRENT, &options).is_ok());
    }
}
