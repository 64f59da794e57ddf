use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use chihaya_dtype::ArrayDetails;
use chihaya_error::ChihayaResult;
use ritsuko::{Group, Version};

use crate::Options;

/// A shared reference to a validator.
pub type ValidatorRef = Arc<dyn ValidateVTable>;

/// Validation and type inference for one kind of delayed array or delayed operation.
///
/// Implementations check the group they are handed, recursing into any seeds through
/// [`crate::validate`], and report the type and shape of the array that the group represents.
pub trait ValidateVTable: 'static + Send + Sync {
    /// The kind name this validator is registered under, e.g. `"dense array"` or `"subset"`.
    fn id(&self) -> &str;

    /// Validate `group` under the format `version` and infer its details.
    fn validate(
        &self,
        group: &dyn Group,
        version: &Version,
        options: &mut Options,
    ) -> ChihayaResult<ArrayDetails>;
}

impl Debug for dyn ValidateVTable + '_ {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Validator").field(&self.id()).finish()
    }
}

impl Display for dyn ValidateVTable + '_ {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
