use std::collections::BTreeMap;

use chihaya_error::{ChihayaResult, chihaya_bail, chihaya_err};
use ritsuko::{Group, Version, load_scalar_int_attribute, load_scalar_string_attribute};

/// The children of a list group, keyed by their position.
///
/// Lists are groups whose children are named by decimal indices. Before 1.1 the group is tagged
/// with `delayed_type = "list"` and declares its length in `delayed_length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListDetails {
    pub declared_length: Option<usize>,
    pub present: BTreeMap<usize, String>,
}

impl ListDetails {
    /// Check that the list has at most one entry per dimension of an array of rank `ndim`.
    pub fn check_rank(&self, name: &str, ndim: usize) -> ChihayaResult<()> {
        if let Some(declared) = self.declared_length {
            if declared != ndim {
                chihaya_bail!(
                    "'{}' should have length equal to the number of dimensions",
                    name
                );
            }
        }
        if let Some((index, _)) = self.present.last_key_value() {
            if *index >= ndim {
                chihaya_bail!(
                    "'{}' should have length equal to the number of dimensions",
                    name
                );
            }
        }
        Ok(())
    }

    /// The number of entries, requiring every position from zero to be filled.
    pub fn dense_length(&self, name: &str) -> ChihayaResult<usize> {
        let length = self.declared_length.unwrap_or(self.present.len());
        if self.present.len() != length || self.present.keys().enumerate().any(|(i, k)| i != *k) {
            chihaya_bail!("'{}' should contain consecutive entries from '0'", name);
        }
        Ok(length)
    }
}

/// Read the entries of the list group `group`, referred to as `name` in messages.
pub(crate) fn read_list(
    group: &dyn Group,
    name: &str,
    version: &Version,
) -> ChihayaResult<ListDetails> {
    let declared_length = if version.lt(1, 1, 0) {
        let delayed_type = load_scalar_string_attribute(group, "delayed_type")?;
        if delayed_type != "list" {
            chihaya_bail!("'{}' should be a list", name);
        }
        let length = load_scalar_int_attribute(group, "delayed_length")?;
        Some(
            usize::try_from(length)
                .map_err(|_| chihaya_err!("'delayed_length' of '{}' should be non-negative", name))?,
        )
    } else {
        None
    };

    let mut present = BTreeMap::new();
    for child in group.children() {
        let index = parse_index(&child)
            .ok_or_else(|| chihaya_err!("'{}' contains a non-integer name '{}'", name, child))?;
        if declared_length.is_some_and(|length| index >= length) {
            chihaya_bail!(
                "'{}/{}' is out of range of the declared list length",
                name,
                child
            );
        }
        present.insert(index, child);
    }

    Ok(ListDetails {
        declared_length,
        present,
    })
}

fn parse_index(name: &str) -> Option<usize> {
    if name.is_empty()
        || !name.bytes().all(|b| b.is_ascii_digit())
        || (name.len() > 1 && name.starts_with('0'))
    {
        return None;
    }
    name.parse().ok()
}
