use chihaya_dtype::ArrayDetails;
use chihaya_error::{ChihayaResult, chihaya_bail, chihaya_err};
use ritsuko::{
    DatatypeClass, Group, Version, load_scalar_string_attribute, open_group,
    open_scalar_attribute, parse_version_string,
};

use crate::aliases::hash_map::HashMap;
use crate::{Options, Registry, ValidatorRef, default_array_registry, default_operation_registry};

/// Version assumed for files without a `delayed_version` attribute.
pub const LEGACY_VERSION: Version = Version::new(0, 99, 0);

/// Validate the delayed array or operation in `group` and infer its type and shape.
///
/// This is the entry point for every node of a delayed tree, including seeds.
pub fn validate(
    group: &dyn Group,
    version: &Version,
    options: &mut Options,
) -> ChihayaResult<ArrayDetails> {
    let delayed_type = load_scalar_string_attribute(group, "delayed_type")?;
    let validator = match delayed_type.as_str() {
        "array" => {
            let kind = load_scalar_string_attribute(group, "delayed_array")?;
            resolve(
                "array",
                &kind,
                version,
                &options.array_validate_registry,
                default_array_registry(),
            )?
        }
        "operation" => {
            let kind = load_scalar_string_attribute(group, "delayed_operation")?;
            resolve(
                "operation",
                &kind,
                version,
                &options.operation_validate_registry,
                default_operation_registry(),
            )?
        }
        other => chihaya_bail!("unknown delayed type '{}'", other),
    };
    validator.validate(group, version, options)
}

fn resolve(
    noun: &str,
    kind: &str,
    version: &Version,
    overrides: &HashMap<String, ValidatorRef>,
    defaults: &Registry,
) -> ChihayaResult<ValidatorRef> {
    if let Some(validator) = overrides.get(kind) {
        log::debug!("Validating {} '{}' with a caller-supplied validator", noun, kind);
        return Ok(validator.clone());
    }
    if let Some(validator) = defaults.lookup_exact(kind) {
        log::debug!("Validating {} '{}' with the built-in validator", noun, kind);
        return Ok(validator);
    }
    if let Some(fallback) = defaults.lookup_fallback(kind, version) {
        log::debug!(
            "Validating {} '{}' with the '{}' fallback",
            noun,
            kind,
            fallback.prefix()
        );
        return Ok(fallback.validator().clone());
    }
    Err(chihaya_err!("unknown {} type '{}'", noun, kind))
}

/// Read the format version of a delayed tree from its root group.
pub fn extract_version(group: &dyn Group) -> ChihayaResult<Version> {
    if !group.has_attribute("delayed_version") {
        return Ok(LEGACY_VERSION);
    }

    let attribute = open_scalar_attribute(group, "delayed_version")?;
    if attribute.datatype().class() != DatatypeClass::String {
        chihaya_bail!(
            "expected 'delayed_version' to use a datatype that can be represented by a UTF-8 encoded string"
        );
    }
    let text = load_scalar_string_attribute(group, "delayed_version")?;
    if text == "1.0.0" {
        return Ok(Version::new(1, 0, 0));
    }
    parse_version_string(&text, true)
}

/// Validate a delayed tree rooted at `group`, reading its version first.
pub fn validate_root(group: &dyn Group, options: &mut Options) -> ChihayaResult<ArrayDetails> {
    let version = extract_version(group)?;
    validate(group, &version, options)
}

/// Validate the delayed tree rooted at the slash-separated `path` below `root`.
pub fn validate_path(
    root: &dyn Group,
    path: &str,
    options: &mut Options,
) -> ChihayaResult<ArrayDetails> {
    let segments = path.split('/').filter(|s| !s.is_empty()).collect::<Vec<_>>();
    descend(root, &segments, options)
}

fn descend(
    group: &dyn Group,
    segments: &[&str],
    options: &mut Options,
) -> ChihayaResult<ArrayDetails> {
    match segments.split_first() {
        None => validate_root(group, options),
        Some((first, rest)) => {
            let child = open_group(group, first)?;
            descend(&*child, rest, options)
        }
    }
}
