//! Mapping of driver failures onto taxo errors.
//!
//! The query contract returns `taxo_core::Error`, so driver errors are
//! flattened to their message here rather than carried as sources.

use taxo_core::Error;

/// A statement failed to execute or stream.
pub(crate) fn query_error(e: neo4rs::Error) -> Error {
    Error::store(e.to_string())
}

/// A returned column could not be decoded into the expected type.
pub(crate) fn decode_error(e: neo4rs::DeError) -> Error {
    Error::store(format!("unexpected result shape: {e}"))
}
