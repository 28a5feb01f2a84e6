//! Error types for mock operations.

use thiserror::Error;

/// Errors that can occur while building or driving the mock world.
///
/// These signal mistakes in test setup; nothing in this crate retries them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MockError {
    /// No record with this identity exists in the pool.
    #[error("{kind} {id} does not exist")]
    NotFound { kind: &'static str, id: String },

    /// A record with this identity was already created in the pool.
    #[error("{kind} {id} has already been created, use load({id}) to get it back")]
    AlreadyExists { kind: &'static str, id: String },

    /// The abstract contact kind was used instead of a concrete one.
    #[error("the abstract {0} kind can not be used directly, create contacts through a concrete kind")]
    DirectUse(&'static str),

    /// A message was addressed to something that is neither a contact nor a room.
    #[error("unknown conversation type: {0}")]
    UnknownConversationType(String),

    /// The mocker owning this record has been dropped.
    #[error("mocker has been dropped")]
    Detached,
}
