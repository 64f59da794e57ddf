use chihaya_dtype::ArrayType;
use chihaya_error::{ChihayaResult, chihaya_bail, chihaya_err};
use ritsuko::{
    Dataset, DatatypeClass, MISSING_PLACEHOLDER, Version, check_missing_placeholder_attribute,
    exceeds_float_limit, exceeds_integer_limit, load_scalar_int_attribute,
    load_scalar_string_attribute, validate_string_dataset,
};

use crate::Options;

/// Infer the array type of the values stored in `dataset`.
///
/// Before 1.1 the type follows the datatype class, with integers flagged by a non-zero
/// `is_boolean` attribute treated as booleans. From 1.1 the type is declared by the `type`
/// attribute and the datatype must fit within the limits of the declared type.
pub(crate) fn fetch_data_type(
    dataset: &dyn Dataset,
    name: &str,
    version: &Version,
) -> ChihayaResult<ArrayType> {
    let datatype = dataset.datatype();

    if version.lt(1, 1, 0) {
        return match datatype.class() {
            DatatypeClass::Integer => {
                if dataset.has_attribute("is_boolean")
                    && load_scalar_int_attribute(dataset, "is_boolean")? != 0
                {
                    Ok(ArrayType::Boolean)
                } else {
                    Ok(ArrayType::Integer)
                }
            }
            DatatypeClass::Float => Ok(ArrayType::Float),
            DatatypeClass::String => Ok(ArrayType::String),
            DatatypeClass::Opaque => chihaya_bail!("'{}' has an unsupported datatype", name),
        };
    }

    let declared = load_scalar_string_attribute(dataset, "type")?;
    let array_type = ArrayType::try_from(declared.as_str())
        .map_err(|_| chihaya_err!("unknown type '{}' for '{}'", declared, name))?;

    match array_type {
        ArrayType::Boolean if exceeds_integer_limit(datatype, 8, true) => chihaya_bail!(
            "expected '{}' to have a datatype that fits into an 8-bit signed integer",
            name
        ),
        ArrayType::Integer if exceeds_integer_limit(datatype, 32, true) => chihaya_bail!(
            "expected '{}' to have a datatype that fits into a 32-bit signed integer",
            name
        ),
        ArrayType::Float if exceeds_float_limit(datatype, 64) => chihaya_bail!(
            "expected '{}' to have a datatype that fits into a 64-bit float",
            name
        ),
        ArrayType::String if datatype.class() != DatatypeClass::String => {
            chihaya_bail!("expected '{}' to have a string datatype", name)
        }
        _ => Ok(array_type),
    }
}

/// Check the missing value placeholder and, for strings, the absence of nulls.
///
/// Skipped entirely when only details are requested.
pub(crate) fn check_data_values(
    dataset: &dyn Dataset,
    name: &str,
    array_type: ArrayType,
    version: &Version,
    options: &Options,
) -> ChihayaResult<()> {
    if options.details_only {
        return Ok(());
    }
    check_missing_placeholder_attribute(dataset, MISSING_PLACEHOLDER, version.lt(1, 1, 0))?;
    if array_type.is_string() {
        validate_string_dataset(dataset, name, options.buffer_size)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use ritsuko::{Attribute, Datatype, MemDataset, Values};
    use rstest::rstest;

    use super::*;

    const LEGACY: Version = Version::new(0, 99, 0);
    const CURRENT: Version = Version::new(1, 1, 0);

    fn typed(datatype: Datatype, declared: &str) -> MemDataset {
        let values = match datatype {
            Datatype::Integer { signed: false, .. } => Values::UInt(vec![0, 1]),
            _ => Values::Int(vec![0, 1]),
        };
        MemDataset::try_new(datatype, vec![2], values)
            .unwrap()
            .with_attribute("type", Attribute::string(declared))
    }

    #[rstest]
    #[case(Datatype::I8, "BOOLEAN", true)]
    #[case(Datatype::I16, "BOOLEAN", false)]
    #[case(Datatype::U8, "BOOLEAN", false)]
    #[case(Datatype::I32, "INTEGER", true)]
    #[case(Datatype::U16, "INTEGER", true)]
    #[case(Datatype::U32, "INTEGER", false)]
    #[case(Datatype::I64, "INTEGER", false)]
    #[case(Datatype::I32, "FLOAT", true)]
    #[case(Datatype::I64, "FLOAT", false)]
    #[case(Datatype::I32, "STRING", false)]
    fn current_width_checks(#[case] datatype: Datatype, #[case] declared: &str, #[case] ok: bool) {
        assert_eq!(
            fetch_data_type(&typed(datatype, declared), "data", &CURRENT).is_ok(),
            ok
        );
    }

    #[test]
    fn current_requires_declared_type() {
        let untyped = MemDataset::float(Datatype::F64, vec![1], vec![0.5]).unwrap();
        assert_eq!(
            fetch_data_type(&untyped, "data", &CURRENT)
                .unwrap_err()
                .to_string(),
            "expected a 'type' attribute"
        );
        assert_eq!(
            fetch_data_type(&untyped, "data", &LEGACY).unwrap(),
            ArrayType::Float
        );
    }

    #[test]
    fn legacy_uses_class_and_boolean_flag() {
        let integer = MemDataset::int(Datatype::I32, vec![2], vec![0, 1]).unwrap();
        assert_eq!(
            fetch_data_type(&integer, "data", &LEGACY).unwrap(),
            ArrayType::Integer
        );

        let boolean = integer
            .clone()
            .with_attribute("is_boolean", Attribute::int(Datatype::I8, 1).unwrap());
        assert_eq!(
            fetch_data_type(&boolean, "data", &LEGACY).unwrap(),
            ArrayType::Boolean
        );

        let strings = MemDataset::string_vector(["a"]);
        assert_eq!(
            fetch_data_type(&strings, "data", &LEGACY).unwrap(),
            ArrayType::String
        );
    }

    #[test]
    fn data_value_checks_respect_details_only() {
        let strings = MemDataset::strings(vec![2], vec![Some("a".into()), None]).unwrap();
        let options = Options::default();
        assert!(
            check_data_values(&strings, "data", ArrayType::String, &CURRENT, &options).is_err()
        );
        let options = Options::default().with_details_only(true);
        assert!(
            check_data_values(&strings, "data", ArrayType::String, &CURRENT, &options).is_ok()
        );
    }
}
