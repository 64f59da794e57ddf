#![deny(missing_docs)]

//! Error type shared by the chihaya crates.
//!
//! Validation is all-or-nothing: the first violation aborts the whole call. To make a failure deep
//! inside a delayed-array tree actionable, every recursive boundary wraps the inner error with
//! [`ChihayaError::with_context`], so the rendered message reads as a breadcrumb trail from the
//! root to the offending field.

mod ext;

use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;

pub use ext::*;

/// A string that is either static or owned, used for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrString(Cow<'static, str>);

impl<T> From<T> for ErrString
where
    T: Into<Cow<'static, str>>,
{
    fn from(msg: T) -> Self {
        Self(msg.into())
    }
}

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// All the errors that can be raised while validating a delayed array.
#[derive(thiserror::Error)]
#[non_exhaustive]
pub enum ChihayaError {
    /// A field is missing, has the wrong kind, rank or datatype, or is inconsistent with another
    /// field.
    #[error("{0}")]
    Invalid(ErrString),
    /// A read from a dataset fell outside of its extent.
    #[error("index {0} out of bounds from {1} to {2}")]
    OutOfBounds(u64, u64, u64),
    /// A stored value could not be converted into the requested element type.
    #[error("{0}")]
    Unsupported(ErrString),
    /// An error with some additional context about where it happened.
    #[error("{0}; {1}")]
    Context(ErrString, Box<ChihayaError>),
}

impl ChihayaError {
    /// Wrap this error with a context message, which is rendered in front of the original message.
    pub fn with_context<T: Into<ErrString>>(self, msg: T) -> Self {
        ChihayaError::Context(msg.into(), Box::new(self))
    }

    /// The innermost error, skipping over any context wrappers.
    pub fn root_cause(&self) -> &ChihayaError {
        match self {
            ChihayaError::Context(_, inner) => inner.root_cause(),
            other => other,
        }
    }
}

impl Debug for ChihayaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// A type alias for results that can return a [`ChihayaError`].
pub type ChihayaResult<T> = Result<T, ChihayaError>;

/// Construct a [`ChihayaError`].
///
/// Without a variant prefix the message becomes [`ChihayaError::Invalid`].
#[macro_export]
macro_rules! chihaya_err {
    (OutOfBounds: $idx:expr, $start:expr, $stop:expr) => {{
        $crate::ChihayaError::OutOfBounds($idx, $start, $stop)
    }};
    (Unsupported: $fmt:literal $(, $arg:expr)* $(,)?) => {{
        $crate::ChihayaError::Unsupported($crate::ErrString::from(format!($fmt, $($arg),*)))
    }};
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        $crate::ChihayaError::Invalid($crate::ErrString::from(format!($fmt, $($arg),*)))
    }};
}

/// Return early with a [`ChihayaError`], see [`chihaya_err`].
#[macro_export]
macro_rules! chihaya_bail {
    ($($tt:tt)+) => {
        return Err($crate::chihaya_err!($($tt)+))
    };
}
