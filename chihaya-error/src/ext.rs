use crate::{ChihayaResult, ErrString};

/// Extension trait for [`ChihayaResult`].
pub trait ResultExt<T>: private::Sealed {
    /// Wrap the error, if any, with a lazily computed context message.
    fn with_context<M, F>(self, msg: F) -> ChihayaResult<T>
    where
        M: Into<ErrString>,
        F: FnOnce() -> M;
}

mod private {
    use crate::ChihayaResult;

    pub trait Sealed {}

    impl<T> Sealed for ChihayaResult<T> {}
}

impl<T> ResultExt<T> for ChihayaResult<T> {
    fn with_context<M, F>(self, msg: F) -> ChihayaResult<T>
    where
        M: Into<ErrString>,
        F: FnOnce() -> M,
    {
        self.map_err(|e| e.with_context(msg()))
    }
}
