//! Error type shared by schema stores and the initializer.

use thiserror::Error;

/// MongoDB server error code for "namespace already exists".
pub(crate) const NAMESPACE_EXISTS: i32 = 48;
/// MongoDB server error code for "index options conflict".
pub(crate) const INDEX_OPTIONS_CONFLICT: i32 = 85;
/// MongoDB server error code for "index key specs conflict".
pub(crate) const INDEX_KEY_SPECS_CONFLICT: i32 = 86;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("collection '{0}' already exists")]
    CollectionExists(String),

    #[error("index '{index}' on '{collection}' conflicts with an existing index: {message}")]
    IndexConflict {
        collection: String,
        index: String,
        message: String,
    },

    #[error("collection '{0}' does not exist")]
    UnknownCollection(String),

    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}

impl SchemaError {
    /// Server-side error code carried by a driver command failure.
    pub(crate) fn command_code(err: &mongodb::error::Error) -> Option<i32> {
        match err.kind.as_ref() {
            mongodb::error::ErrorKind::Command(command) => Some(command.code),
            _ => None,
        }
    }
}
