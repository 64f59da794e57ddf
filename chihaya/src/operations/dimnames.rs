use chihaya_dtype::ArrayDetails;
use chihaya_error::ChihayaResult;
use ritsuko::{Group, Version, open_group};

use crate::utils::{load_seed_details, validate_dimnames};
use crate::{Options, ValidateVTable};

/// Assignment of dimension names to a seed, which leaves its type and shape unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dimnames;

impl ValidateVTable for Dimnames {
    fn id(&self) -> &str {
        "dimnames"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let seed = load_seed_details(group, "seed", version, options)?;
        let dimnames = open_group(group, "dimnames")?;
        if !options.details_only {
            validate_dimnames(&*dimnames, &seed.dimensions, version, options)?;
        }
        Ok(seed)
    }
}

#[cfg(test)]
mod tests {
    use chihaya_dtype::ArrayType;
    use ritsuko::{MemDataset, MemObject};

    use super::*;
    use crate::test_harness::{CURRENT, LEGACY, dense_array, list, operation_node};

    #[test]
    fn names_are_checked_against_the_seed() {
        for version in [LEGACY, CURRENT] {
            let names = list(
                [(1, MemObject::Dataset(MemDataset::string_vector(["a", "b", "c"])))],
                2,
                &version,
            );
            let group = operation_node("dimnames")
                .with_group("seed", dense_array(ArrayType::Integer, &[5, 3], &version))
                .with_group("dimnames", names.clone());
            assert_eq!(
                Dimnames
                    .validate(&group, &version, &mut Options::default())
                    .unwrap(),
                ArrayDetails::new(ArrayType::Integer, vec![5, 3])
            );

            let group = operation_node("dimnames")
                .with_group("seed", dense_array(ArrayType::Integer, &[3, 5], &version))
                .with_group("dimnames", names);
            assert!(
                Dimnames
                    .validate(&group, &version, &mut Options::default())
                    .is_err()
            );
            assert!(
                Dimnames
                    .validate(&group, &version, &mut Options::default().with_details_only(true))
                    .is_ok()
            );
        }
    }

    #[test]
    fn dimnames_group_is_required() {
        let group = operation_node("dimnames")
            .with_group("seed", dense_array(ArrayType::Integer, &[5, 3], &CURRENT));
        assert_eq!(
            Dimnames
                .validate(&group, &CURRENT, &mut Options::default().with_details_only(true))
                .unwrap_err()
                .to_string(),
            "expected a group at 'dimnames'"
        );
    }
}
