use thiserror::Error;

use crate::contact::ContactField;

/// A required contact field was left empty. Raised before any request is made.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill out the {0} field")]
    MissingField(ContactField),
}

/// The form service could not be reached or refused the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("no form identifier configured")]
    Unconfigured,

    #[error("invalid form endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("network failure: {0}")]
    Network(String),

    #[error("form service responded with status {status}")]
    Rejected { status: u16 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error("a submission is already in flight")]
    Busy,
}

/// Durable storage for the performance mode is missing or failing.
/// Never shown to the visitor; the store falls back to memory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),
}
