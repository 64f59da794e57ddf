use chihaya_dtype::ArrayDetails;
use chihaya_error::{ChihayaResult, chihaya_bail};
use itertools::Itertools;
use ritsuko::{Group, Version, open_dataset};

use crate::utils::{load_seed_details, load_unsigned_vector};
use crate::{Options, ValidateVTable};

/// Permutation of the dimensions of a seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transpose;

impl ValidateVTable for Transpose {
    fn id(&self) -> &str {
        "transpose"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let seed = load_seed_details(group, "seed", version, options)?;

        let dataset = open_dataset(group, "permutation")?;
        let permutation = load_unsigned_vector(&*dataset, "permutation", version, options)?;
        if permutation.len() != seed.ndim() {
            chihaya_bail!("length of 'permutation' should match dimensionality of 'seed'");
        }

        let mut dimensions = Vec::with_capacity(permutation.len());
        for p in &permutation {
            match usize::try_from(*p).ok().and_then(|p| seed.dimensions.get(p)) {
                Some(extent) => dimensions.push(*extent),
                None => chihaya_bail!(
                    "'permutation' should contain indices less than the dimensionality of 'seed'"
                ),
            }
        }
        if !options.details_only && !permutation.iter().all_unique() {
            chihaya_bail!("'permutation' should contain unique indices");
        }

        Ok(ArrayDetails::new(seed.array_type, dimensions))
    }
}
