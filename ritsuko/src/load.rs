//! Opening children and loading small values with the usual shape and type checks.

use chihaya_error::{ChihayaResult, chihaya_bail, chihaya_err};

use crate::{Attribute, Dataset, DatasetStream, DatatypeClass, Group, Node, ObjectKind, Values};

/// Open the child group called `name`, failing if it is absent or not a group.
pub fn open_group<'a, G: Group + ?Sized>(
    parent: &'a G,
    name: &str,
) -> ChihayaResult<Box<dyn Group + 'a>> {
    match parent.child_kind(name) {
        Some(ObjectKind::Group) => parent.open_group(name),
        _ => chihaya_bail!("expected a group at '{}'", name),
    }
}

/// Open the child dataset called `name`, failing if it is absent or not a dataset.
pub fn open_dataset<'a, G: Group + ?Sized>(
    parent: &'a G,
    name: &str,
) -> ChihayaResult<Box<dyn Dataset + 'a>> {
    match parent.child_kind(name) {
        Some(ObjectKind::Dataset) => parent.open_dataset(name),
        _ => chihaya_bail!("expected a dataset at '{}'", name),
    }
}

/// Check if a dataset has a scalar dataspace.
pub fn is_scalar(dataset: &dyn Dataset) -> bool {
    dataset.shape().is_empty()
}

/// Fail unless `dataset` is a scalar.
pub fn check_scalar(dataset: &dyn Dataset, name: &str) -> ChihayaResult<()> {
    if !is_scalar(dataset) {
        chihaya_bail!("'{}' should be a scalar", name);
    }
    Ok(())
}

/// Length of a 1-dimensional dataset, failing for any other rank.
pub fn get_1d_length(dataset: &dyn Dataset, name: &str) -> ChihayaResult<u64> {
    match dataset.shape().as_slice() {
        [len] => Ok(*len),
        _ => chihaya_bail!("'{}' should be a 1-dimensional dataset", name),
    }
}

/// Open a scalar attribute, failing if it is absent or not a scalar.
pub fn open_scalar_attribute<N: Node + ?Sized>(node: &N, name: &str) -> ChihayaResult<Attribute> {
    let attribute = node
        .attribute(name)
        .ok_or_else(|| chihaya_err!("expected a '{}' attribute", name))?;
    if !attribute.is_scalar() {
        chihaya_bail!("expected the '{}' attribute to be a scalar", name);
    }
    Ok(attribute)
}

/// Load a scalar string attribute.
pub fn load_scalar_string_attribute<N: Node + ?Sized>(
    node: &N,
    name: &str,
) -> ChihayaResult<String> {
    let attribute = open_scalar_attribute(node, name)?;
    if attribute.datatype().class() != DatatypeClass::String {
        chihaya_bail!("expected the '{}' attribute to be a string", name);
    }
    match attribute.values() {
        Values::Str(values) => match values.first() {
            Some(Some(value)) => Ok(value.clone()),
            _ => chihaya_bail!("expected the '{}' attribute to be a non-null string", name),
        },
        _ => chihaya_bail!("expected the '{}' attribute to be a string", name),
    }
}

/// Load a scalar integer attribute.
pub fn load_scalar_int_attribute<N: Node + ?Sized>(node: &N, name: &str) -> ChihayaResult<i64> {
    let attribute = open_scalar_attribute(node, name)?;
    match attribute.values() {
        Values::Int(values) => values.first().copied(),
        Values::UInt(values) => values.first().and_then(|v| i64::try_from(*v).ok()),
        _ => None,
    }
    .ok_or_else(|| chihaya_err!("expected the '{}' attribute to be an integer", name))
}

/// Load a scalar string dataset.
pub fn load_scalar_string_dataset(dataset: &dyn Dataset, name: &str) -> ChihayaResult<String> {
    check_scalar(dataset, name)?;
    if dataset.datatype().class() != DatatypeClass::String {
        chihaya_bail!("'{}' should be a string", name);
    }
    match load_first::<Option<String>>(dataset, name)? {
        Some(value) => Ok(value),
        None => chihaya_bail!("'{}' should not be a null string", name),
    }
}

/// Load a scalar non-negative integer dataset.
pub fn load_scalar_u64(dataset: &dyn Dataset, name: &str) -> ChihayaResult<u64> {
    check_scalar(dataset, name)?;
    if dataset.datatype().class() != DatatypeClass::Integer {
        chihaya_bail!("'{}' should be an integer", name);
    }
    load_first::<u64>(dataset, name)
        .map_err(|_| chihaya_err!("'{}' should be non-negative", name))
}

/// Load a scalar integer dataset.
pub fn load_scalar_i64(dataset: &dyn Dataset, name: &str) -> ChihayaResult<i64> {
    check_scalar(dataset, name)?;
    if dataset.datatype().class() != DatatypeClass::Integer {
        chihaya_bail!("'{}' should be an integer", name);
    }
    load_first::<i64>(dataset, name)
}

/// Load a scalar numeric dataset as a float.
pub fn load_scalar_f64(dataset: &dyn Dataset, name: &str) -> ChihayaResult<f64> {
    check_scalar(dataset, name)?;
    if !matches!(
        dataset.datatype().class(),
        DatatypeClass::Integer | DatatypeClass::Float
    ) {
        chihaya_bail!("'{}' should be numeric", name);
    }
    load_first::<f64>(dataset, name)
}

/// Load a whole 1-dimensional integer dataset of non-negative values.
///
/// Meant for small vectors such as dimensions; stream large ones with [`DatasetStream`].
pub fn load_1d_u64(
    dataset: &dyn Dataset,
    name: &str,
    buffer_size: usize,
) -> ChihayaResult<Vec<u64>> {
    get_1d_length(dataset, name)?;
    if dataset.datatype().class() != DatatypeClass::Integer {
        chihaya_bail!("'{}' should be an integer dataset", name);
    }
    DatasetStream::<u64>::new(dataset, buffer_size)?
        .collect::<ChihayaResult<Vec<_>>>()
        .map_err(|_| chihaya_err!("'{}' should contain non-negative values", name))
}

fn load_first<T: crate::StreamElement>(dataset: &dyn Dataset, name: &str) -> ChihayaResult<T> {
    DatasetStream::<T>::new(dataset, 1)?
        .next()
        .ok_or_else(|| chihaya_err!("'{}' should contain a value", name))?
}
