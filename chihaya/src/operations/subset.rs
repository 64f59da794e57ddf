use std::collections::BTreeMap;

use chihaya_dtype::ArrayDetails;
use chihaya_error::{ChihayaResult, chihaya_bail, chihaya_err};
use ritsuko::{Group, Version, open_dataset, open_group};

use crate::utils::{load_seed_details, read_list, validate_index_vector};
use crate::{Options, ValidateVTable};

/// Validate the `index` list of `group` against `seed`, returning the length of each listed index
/// vector keyed by its dimension.
fn validate_index(
    group: &dyn Group,
    seed: &ArrayDetails,
    version: &Version,
    options: &Options,
) -> ChihayaResult<BTreeMap<usize, u64>> {
    let index = open_group(group, "index")?;
    let list = read_list(&*index, "index", version)?;
    list.check_rank("index", seed.ndim())?;

    let mut lengths = BTreeMap::new();
    for (axis, child) in &list.present {
        let name = format!("index/{}", child);
        let dataset = open_dataset(&*index, child)?;
        let length =
            validate_index_vector(&*dataset, &name, seed.dimensions[*axis], version, options)?;
        lengths.insert(*axis, length);
    }
    Ok(lengths)
}

/// Selection of a subset of positions along any number of dimensions of a seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Subset;

impl ValidateVTable for Subset {
    fn id(&self) -> &str {
        "subset"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let mut seed = load_seed_details(group, "seed", version, options)?;
        for (axis, length) in validate_index(group, &seed, version, options)? {
            seed.dimensions[axis] = length;
        }
        Ok(seed)
    }
}

/// Replacement of a subset of a seed with the contents of another array.
///
/// The `value` array has one extent per dimension of the seed, equal to the length of the index
/// vector for that dimension or to the seed's extent where no index vector is listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsetAssignment;

impl ValidateVTable for SubsetAssignment {
    fn id(&self) -> &str {
        "subset assignment"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let seed = load_seed_details(group, "seed", version, options)?;
        let value = load_seed_details(group, "value", version, options)?;
        if value.ndim() != seed.ndim() {
            chihaya_bail!("'value' and 'seed' should have the same dimensionality");
        }
        let array_type = seed
            .array_type
            .promote(value.array_type)
            .map_err(|_| {
                chihaya_err!("both or neither of 'seed' and 'value' should contain strings")
            })?;

        let lengths = validate_index(group, &seed, version, options)?;
        if !options.details_only {
            let extents = value.dimensions.iter().zip(&seed.dimensions);
            for (axis, (extent, original)) in extents.enumerate() {
                let expected = lengths.get(&axis).unwrap_or(original);
                if extent != expected {
                    chihaya_bail!(
                        "'value' should have extent {} along dimension {} to match 'index'",
                        expected,
                        axis
                    );
                }
            }
        }

        Ok(seed.with_type(array_type))
    }
}
