use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown time window '{0}' (expected daily, weekly or monthly)")]
    UnknownWindow(String),

    #[error("Unknown listing type '{0}' (expected repositories or developers)")]
    UnknownListing(String),
}
