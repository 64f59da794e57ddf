use chihaya_dtype::ArrayDetails;
use chihaya_error::{ChihayaResult, chihaya_bail, chihaya_err};
use ritsuko::{Group, Version, open_group};

use crate::utils::{load_along, read_list, validate_seed};
use crate::{Options, ValidateVTable};

/// Concatenation of seeds along one dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct Combine;

impl ValidateVTable for Combine {
    fn id(&self) -> &str {
        "combine"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let along = load_along(group, version)?;

        let seeds = open_group(group, "seeds")?;
        let list = read_list(&*seeds, "seeds", version)?;
        if list.dense_length("seeds")? == 0 {
            chihaya_bail!("'seeds' should contain at least one seed");
        }

        let mut combined: Option<ArrayDetails> = None;
        for child in list.present.values() {
            let seed = open_group(&*seeds, child)?;
            let details = validate_seed(&*seed, &format!("seeds/{}", child), version, options)?;
            if along >= details.ndim() {
                chihaya_bail!("'along' should be less than the seed dimensionality");
            }

            match combined.as_mut() {
                Some(output) => merge(output, details, along, options)?,
                None => combined = Some(details),
            }
        }

        combined.ok_or_else(|| chihaya_err!("'seeds' should contain at least one seed"))
    }
}

fn merge(
    output: &mut ArrayDetails,
    details: ArrayDetails,
    along: usize,
    options: &Options,
) -> ChihayaResult<()> {
    if output.array_type.is_string() != details.array_type.is_string() {
        chihaya_bail!("either all or none of the 'seeds' should contain strings");
    }
    output.array_type = output.array_type.max(details.array_type);

    if !options.details_only {
        if output.ndim() != details.ndim() {
            chihaya_bail!("all 'seeds' should have the same dimensionality");
        }
        let mismatched = (0..output.ndim())
            .any(|d| d != along && output.dimensions[d] != details.dimensions[d]);
        if mismatched {
            chihaya_bail!("all 'seeds' should have the same extents for dimensions other than 'along'");
        }
    }

    output.dimensions[along] = output.dimensions[along]
        .checked_add(details.dimensions[along])
        .ok_or_else(|| chihaya_err!("combined extent along dimension {} overflows", along))?;
    Ok(())
}
