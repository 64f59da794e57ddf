use ritsuko::DEFAULT_BUFFER_SIZE;

use crate::ValidatorRef;
use crate::aliases::hash_map::HashMap;

/// Per-call settings for validation.
#[derive(Debug, Clone)]
pub struct Options {
    /// Only infer the type and shape, skipping checks that compare one field against another.
    pub details_only: bool,
    /// Number of elements to read per block when streaming large datasets.
    pub buffer_size: usize,
    /// Array validators that take precedence over the built-ins, keyed by `delayed_array`.
    pub array_validate_registry: HashMap<String, ValidatorRef>,
    /// Operation validators that take precedence over the built-ins, keyed by `delayed_operation`.
    pub operation_validate_registry: HashMap<String, ValidatorRef>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            details_only: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
            array_validate_registry: HashMap::new(),
            operation_validate_registry: HashMap::new(),
        }
    }
}

impl Options {
    pub fn with_details_only(mut self, details_only: bool) -> Self {
        self.details_only = details_only;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Register an array validator under its [`id`](crate::ValidateVTable::id).
    pub fn with_array_validator(mut self, validator: ValidatorRef) -> Self {
        self.array_validate_registry
            .insert(validator.id().to_string(), validator);
        self
    }

    /// Register an operation validator under its [`id`](crate::ValidateVTable::id).
    pub fn with_operation_validator(mut self, validator: ValidatorRef) -> Self {
        self.operation_validate_registry
            .insert(validator.id().to_string(), validator);
        self
    }
}
