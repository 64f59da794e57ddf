use std::sync::{Arc, LazyLock};

use ritsuko::Version;

use crate::ValidatorRef;
use crate::aliases::hash_map::HashMap;
use crate::arrays::{ConstantArray, CustomArray, DenseArray, ExternalHdf5Array, SparseMatrix};
use crate::operations::{
    BinaryArithmetic, BinaryComparison, BinaryLogic, Combine, Dimnames, MatrixProduct, Subset,
    SubsetAssignment, Transpose, UnaryArithmetic, UnaryComparison, UnaryLogic, UnaryMath,
    UnarySpecialCheck,
};

/// A validator that serves every kind name starting with `prefix`.
#[derive(Debug, Clone)]
pub struct PrefixFallback {
    prefix: String,
    legacy_only: bool,
    validator: ValidatorRef,
}

impl PrefixFallback {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether the fallback only applies to files older than version 1.1.
    pub fn legacy_only(&self) -> bool {
        self.legacy_only
    }

    pub fn validator(&self) -> &ValidatorRef {
        &self.validator
    }

    fn applies(&self, kind: &str, version: &Version) -> bool {
        kind.starts_with(&self.prefix) && (!self.legacy_only || version.lt(1, 1, 0))
    }
}

/// A mapping from kind names to validators, with ordered prefix fallbacks for open-ended kinds.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    validators: HashMap<String, ValidatorRef>,
    fallbacks: Vec<PrefixFallback>,
}

impl Registry {
    pub fn with_validator(mut self, validator: ValidatorRef) -> Self {
        self.validators
            .insert(validator.id().to_string(), validator);
        self
    }

    pub fn with_validators<V: IntoIterator<Item = ValidatorRef>>(mut self, validators: V) -> Self {
        self.validators
            .extend(validators.into_iter().map(|v| (v.id().to_string(), v)));
        self
    }

    /// Append a fallback, tried after every exact name and every earlier fallback.
    pub fn with_prefix_fallback<S: Into<String>>(
        mut self,
        prefix: S,
        legacy_only: bool,
        validator: ValidatorRef,
    ) -> Self {
        self.fallbacks.push(PrefixFallback {
            prefix: prefix.into(),
            legacy_only,
            validator,
        });
        self
    }

    pub fn validators(&self) -> impl Iterator<Item = ValidatorRef> + '_ {
        self.validators.values().cloned()
    }

    pub fn fallbacks(&self) -> &[PrefixFallback] {
        &self.fallbacks
    }

    /// The validator registered under exactly `kind`.
    pub fn lookup_exact(&self, kind: &str) -> Option<ValidatorRef> {
        self.validators.get(kind).cloned()
    }

    /// The first fallback that serves `kind` under `version`.
    pub fn lookup_fallback(&self, kind: &str, version: &Version) -> Option<&PrefixFallback> {
        self.fallbacks.iter().find(|f| f.applies(kind, version))
    }

    /// Exact names first, then the fallbacks in order.
    pub fn lookup(&self, kind: &str, version: &Version) -> Option<ValidatorRef> {
        self.lookup_exact(kind).or_else(|| {
            self.lookup_fallback(kind, version)
                .map(|f| f.validator.clone())
        })
    }
}

static ARRAY_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    Registry::default()
        .with_validators([
            Arc::new(DenseArray) as ValidatorRef,
            Arc::new(SparseMatrix),
            Arc::new(ConstantArray),
        ])
        .with_prefix_fallback("custom ", false, Arc::new(CustomArray))
        .with_prefix_fallback("external hdf5 ", true, Arc::new(ExternalHdf5Array))
});

static OPERATION_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    Registry::default().with_validators([
        Arc::new(UnaryArithmetic) as ValidatorRef,
        Arc::new(BinaryArithmetic),
        Arc::new(UnaryComparison),
        Arc::new(BinaryComparison),
        Arc::new(UnaryLogic),
        Arc::new(BinaryLogic),
        Arc::new(UnaryMath),
        Arc::new(UnarySpecialCheck),
        Arc::new(Subset),
        Arc::new(SubsetAssignment),
        Arc::new(Combine),
        Arc::new(Transpose),
        Arc::new(Dimnames),
        Arc::new(MatrixProduct),
    ])
});

/// The built-in validators for delayed arrays.
pub fn default_array_registry() -> &'static Registry {
    &ARRAY_REGISTRY
}

/// The built-in validators for delayed operations.
pub fn default_operation_registry() -> &'static Registry {
    &OPERATION_REGISTRY
}
