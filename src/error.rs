//! Error types.

/// Errors returned by tree mutations.
///
/// A lookup or removal that finds nothing is not an error; it is `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An absent value was passed where a real value is required.
    #[error("value cannot be absent (key {key:?})")]
    InvalidValue {
        /// Lossy rendering of the key the insert was attempted under.
        key: String,
    },
}

impl Error {
    pub(crate) fn invalid_value(key: &[u8]) -> Self {
        Error::InvalidValue {
            key: String::from_utf8_lossy(key).into_owned(),
        }
    }
}

/// Result alias for tree operations.
pub type Result<T> = std::result::Result<T, Error>;
