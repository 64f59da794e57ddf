use chihaya_dtype::ArrayDetails;
use chihaya_error::{ChihayaResult, ResultExt, chihaya_bail};
use ritsuko::{Group, Version, open_group};

use crate::Options;

/// Validate the delayed tree in the `name` child of `parent`.
pub(crate) fn load_seed_details(
    parent: &dyn Group,
    name: &str,
    version: &Version,
    options: &mut Options,
) -> ChihayaResult<ArrayDetails> {
    let seed = open_group(parent, name)?;
    validate_seed(&*seed, name, version, options)
}

/// Validate a seed, prefixing any failure with its `label`.
pub(crate) fn validate_seed(
    seed: &dyn Group,
    label: &str,
    version: &Version,
    options: &mut Options,
) -> ChihayaResult<ArrayDetails> {
    crate::validate(seed, version, options)
        .with_context(|| format!("failed to validate '{}'", label))
}

/// Validate the `left` and `right` seeds of a binary operation.
pub(crate) fn load_binary_seeds(
    group: &dyn Group,
    version: &Version,
    options: &mut Options,
) -> ChihayaResult<(ArrayDetails, ArrayDetails)> {
    let left = load_seed_details(group, "left", version, options)?;
    let right = load_seed_details(group, "right", version, options)?;
    if !options.details_only && !left.has_same_dimensions(&right) {
        chihaya_bail!("'left' and 'right' should have the same dimensions");
    }
    Ok((left, right))
}
