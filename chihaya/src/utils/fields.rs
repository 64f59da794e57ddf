use chihaya_error::{ChihayaResult, chihaya_bail, chihaya_err};
use ritsuko::{
    Dataset, DatasetStream, Datatype, DatatypeClass, Group, Version, check_scalar,
    exceeds_integer_limit, get_1d_length, load_1d_u64, load_scalar_i64, load_scalar_u64,
    open_dataset,
};

use crate::Options;

/// Check that `dataset` holds integers usable as dimension extents or indices.
pub(crate) fn check_unsigned_type(
    dataset: &dyn Dataset,
    name: &str,
    version: &Version,
) -> ChihayaResult<()> {
    if version.lt(1, 1, 0) {
        if dataset.datatype().class() != DatatypeClass::Integer {
            chihaya_bail!("expected '{}' to be an integer dataset", name);
        }
    } else if exceeds_integer_limit(dataset.datatype(), 64, false) {
        chihaya_bail!(
            "expected '{}' to have a datatype that fits into a 64-bit unsigned integer",
            name
        );
    }
    Ok(())
}

/// Load a small 1-dimensional vector of non-negative integers, e.g. dimensions or a permutation.
pub(crate) fn load_unsigned_vector(
    dataset: &dyn Dataset,
    name: &str,
    version: &Version,
    options: &Options,
) -> ChihayaResult<Vec<u64>> {
    get_1d_length(dataset, name)?;
    check_unsigned_type(dataset, name, version)?;
    load_1d_u64(dataset, name, options.buffer_size)
}

/// Load the `name` child of `group` as a vector of dimension extents.
pub(crate) fn load_dimensions(
    group: &dyn Group,
    name: &str,
    version: &Version,
    options: &Options,
) -> ChihayaResult<Vec<u64>> {
    let dataset = open_dataset(group, name)?;
    load_unsigned_vector(&*dataset, name, version, options)
}

/// Load the scalar `along` child of `group`, which names a dimension.
pub(crate) fn load_along(group: &dyn Group, version: &Version) -> ChihayaResult<usize> {
    let dataset = open_dataset(group, "along")?;
    check_scalar(&*dataset, "along")?;
    check_unsigned_type(&*dataset, "along", version)?;
    let along = load_scalar_u64(&*dataset, "along")?;
    usize::try_from(along).map_err(|_| chihaya_err!("'along' is too large"))
}

/// Load a scalar boolean flag such as `native` or `by_column`.
pub(crate) fn load_flag(group: &dyn Group, name: &str, version: &Version) -> ChihayaResult<bool> {
    let dataset = open_dataset(group, name)?;
    check_scalar(&*dataset, name)?;
    if version.lt(1, 1, 0) {
        if dataset.datatype().class() != DatatypeClass::Integer {
            chihaya_bail!("expected '{}' to be an integer scalar", name);
        }
    } else if exceeds_integer_limit(dataset.datatype(), 8, true) {
        chihaya_bail!(
            "expected '{}' to have a datatype that fits into an 8-bit signed integer",
            name
        );
    }
    Ok(load_scalar_i64(&*dataset, name)? != 0)
}

/// Validate a 1-dimensional vector of indices into a dimension of `extent`, returning its length.
///
/// Indices are streamed, so the vector can be arbitrarily long. Bounds are only checked when full
/// validation is requested.
pub(crate) fn validate_index_vector(
    dataset: &dyn Dataset,
    name: &str,
    extent: u64,
    version: &Version,
    options: &Options,
) -> ChihayaResult<u64> {
    let length = get_1d_length(dataset, name)?;
    check_unsigned_type(dataset, name, version)?;

    // Signed legacy storage still needs a pass to rule out negative indices.
    let signed_storage = matches!(dataset.datatype(), Datatype::Integer { signed: true, .. });
    if options.details_only && !signed_storage {
        return Ok(length);
    }

    for index in DatasetStream::<u64>::new(dataset, options.buffer_size)? {
        let index =
            index.map_err(|_| chihaya_err!("'{}' should contain non-negative values", name))?;
        if !options.details_only && index >= extent {
            chihaya_bail!(
                "'{}' should contain indices less than the extent of the dimension ({})",
                name,
                extent
            );
        }
    }
    Ok(length)
}

#[cfg(test)]
mod tests {
    use ritsuko::{MemDataset, MemGroup};

    use super::*;

    const LEGACY: Version = Version::new(0, 99, 0);
    const CURRENT: Version = Version::new(1, 1, 0);

    #[test]
    fn dimensions_by_version() {
        let options = Options::default();
        let signed = MemGroup::new().with_dataset(
            "dimensions",
            MemDataset::int(Datatype::I32, vec![2], vec![10, 5]).unwrap(),
        );
        assert_eq!(
            load_dimensions(&signed, "dimensions", &LEGACY, &options).unwrap(),
            vec![10, 5]
        );
        assert_eq!(
            load_dimensions(&signed, "dimensions", &CURRENT, &options)
                .unwrap_err()
                .to_string(),
            "expected 'dimensions' to have a datatype that fits into a 64-bit unsigned integer"
        );

        let negative = MemGroup::new().with_dataset(
            "dimensions",
            MemDataset::int(Datatype::I32, vec![2], vec![10, -5]).unwrap(),
        );
        assert_eq!(
            load_dimensions(&negative, "dimensions", &LEGACY, &options)
                .unwrap_err()
                .to_string(),
            "'dimensions' should contain non-negative values"
        );

        let unsigned = MemGroup::new().with_dataset(
            "dimensions",
            MemDataset::uint(Datatype::U32, vec![2], vec![10, 5]).unwrap(),
        );
        assert_eq!(
            load_dimensions(&unsigned, "dimensions", &CURRENT, &options).unwrap(),
            vec![10, 5]
        );
    }

    #[test]
    fn flags_by_version() {
        let group = MemGroup::new()
            .with_dataset(
                "native",
                MemDataset::int(Datatype::I32, vec![], vec![1]).unwrap(),
            )
            .with_dataset(
                "by_column",
                MemDataset::int(Datatype::I8, vec![], vec![0]).unwrap(),
            );
        assert!(load_flag(&group, "native", &LEGACY).unwrap());
        assert!(load_flag(&group, "native", &CURRENT).is_err());
        assert!(!load_flag(&group, "by_column", &CURRENT).unwrap());
        assert_eq!(
            load_flag(&group, "missing", &CURRENT)
                .unwrap_err()
                .to_string(),
            "expected a dataset at 'missing'"
        );
    }

    #[test]
    fn index_vectors() {
        let indices = MemDataset::uint(Datatype::U32, vec![4], vec![0, 2, 4, 1]).unwrap();
        let options = Options::default().with_buffer_size(3);
        assert_eq!(
            validate_index_vector(&indices, "index/0", 5, &CURRENT, &options).unwrap(),
            4
        );
        assert!(validate_index_vector(&indices, "index/0", 4, &CURRENT, &options).is_err());

        let options = options.with_details_only(true);
        assert_eq!(
            validate_index_vector(&indices, "index/0", 4, &CURRENT, &options).unwrap(),
            4
        );

        let negative = MemDataset::int(Datatype::I32, vec![2], vec![0, -1]).unwrap();
        assert!(validate_index_vector(&negative, "index/0", 4, &LEGACY, &options).is_err());
    }
}
