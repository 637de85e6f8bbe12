use crate::error::Error;

/// Conversion used by [`wrap_err!`](crate::wrap_err) to box any backend error
/// as the source of a context variant.
pub trait IntoPruneError {
    fn into_prune_error(self) -> Error;
}

impl<E> IntoPruneError for E
where
    E: Into<Error>,
{
    fn into_prune_error(self) -> Error {
        self.into()
    }
}

/// Wrap the error of a `Result` into a context variant of [`Error`] whose
/// `source` is the boxed original error.
#[macro_export]
macro_rules! wrap_err {
    ($result:expr, $variant:ident { $($field:ident : $value:expr),* $(,)? }) => {
        $result.map_err(|e| $crate::error::Error::$variant {
            $($field: $value,)*
            source: Box::new($crate::storage::utils::error::IntoPruneError::into_prune_error(e)),
        })
    };
}
