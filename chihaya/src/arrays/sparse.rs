use chihaya_dtype::ArrayDetails;
use chihaya_error::{ChihayaResult, chihaya_bail, chihaya_err};
use itertools::Itertools;
use ritsuko::{DatasetStream, Group, Version, get_1d_length, open_dataset};

use crate::utils::{
    check_data_values, check_unsigned_type, fetch_data_type, load_dimensions, load_flag,
    load_unsigned_vector, validate_optional_dimnames,
};
use crate::{Options, ValidateVTable};

/// A 2-dimensional matrix in compressed sparse column or row form.
///
/// Before 1.1 every sparse matrix is compressed by column. Later versions say which with the
/// `by_column` flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseMatrix;

impl ValidateVTable for SparseMatrix {
    fn id(&self) -> &str {
        "sparse matrix"
    }

    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails> {
        let shape = load_dimensions(group, "shape", version, options)?;
        let [rows, columns] = shape.as_slice() else {
            chihaya_bail!("'shape' should have length 2");
        };
        let (rows, columns) = (*rows, *columns);

        let data = open_dataset(group, "data")?;
        let nonzeros = get_1d_length(&*data, "data")?;
        let array_type = fetch_data_type(&*data, "data", version)?;
        if array_type.is_string() {
            chihaya_bail!("'data' should be integer, float or boolean");
        }
        check_data_values(&*data, "data", array_type, version, options)?;

        let by_column = if version.lt(1, 1, 0) {
            true
        } else {
            load_flag(group, "by_column", version)?
        };

        if !options.details_only {
            let layout = if by_column {
                Layout {
                    primary: columns,
                    secondary: rows,
                    primary_name: "column",
                    secondary_name: "rows",
                }
            } else {
                Layout {
                    primary: rows,
                    secondary: columns,
                    primary_name: "row",
                    secondary_name: "columns",
                }
            };
            let indptr = validate_indptr(group, &layout, nonzeros, version, options)?;
            validate_indices(group, &layout, &indptr, nonzeros, version, options)?;
        }

        validate_optional_dimnames(group, &shape, version, options)?;

        Ok(ArrayDetails::new(array_type, shape))
    }
}

/// Which dimension is compressed.
struct Layout {
    primary: u64,
    secondary: u64,
    primary_name: &'static str,
    secondary_name: &'static str,
}

fn validate_indptr(
    group: &dyn Group,
    layout: &Layout,
    nonzeros: u64,
    version: &Version,
    options: &Options,
) -> ChihayaResult<Vec<u64>> {
    let dataset = open_dataset(group, "indptr")?;
    let length = get_1d_length(&*dataset, "indptr")?;
    if length != layout.primary.saturating_add(1) {
        chihaya_bail!(
            "'indptr' should have length equal to the number of {}s plus 1",
            layout.primary_name
        );
    }

    let indptr = load_unsigned_vector(&*dataset, "indptr", version, options)?;
    if indptr.first().is_some_and(|first| *first != 0) {
        chihaya_bail!("first entry of 'indptr' should be zero");
    }
    if indptr.last().is_some_and(|last| *last != nonzeros) {
        chihaya_bail!("last entry of 'indptr' should be equal to the length of 'data'");
    }
    if !indptr.iter().tuple_windows().all(|(a, b)| a <= b) {
        chihaya_bail!("'indptr' should be sorted");
    }
    Ok(indptr)
}

fn validate_indices(
    group: &dyn Group,
    layout: &Layout,
    indptr: &[u64],
    nonzeros: u64,
    version: &Version,
    options: &Options,
) -> ChihayaResult<()> {
    let dataset = open_dataset(group, "indices")?;
    if get_1d_length(&*dataset, "indices")? != nonzeros {
        chihaya_bail!("'indices' and 'data' should have the same length");
    }
    check_unsigned_type(&*dataset, "indices", version)?;

    let mut stream = DatasetStream::<u64>::new(&*dataset, options.buffer_size)?;
    for (start, end) in indptr.iter().tuple_windows() {
        let mut previous = None;
        for _ in *start..*end {
            let index = stream
                .next()
                .ok_or_else(|| chihaya_err!("'indices' ended early"))?
                .map_err(|_| chihaya_err!("'indices' should contain non-negative values"))?;
            if index >= layout.secondary {
                chihaya_bail!(
                    "'indices' should contain values less than the number of {}",
                    layout.secondary_name
                );
            }
            if previous.is_some_and(|p| index <= p) {
                chihaya_bail!(
                    "'indices' should be strictly increasing within each {}",
                    layout.primary_name
                );
            }
            previous = Some(index);
        }
    }
    Ok(())
}
