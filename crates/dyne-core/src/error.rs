//! Error types

use thiserror::Error;

/// Failure reading from or writing to the restaurant store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store returned malformed data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Invalid concept dictionary asset
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("concept dictionary is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read concept dictionary: {0}")]
    Io(#[from] std::io::Error),

    #[error("concept `{0}` has no triggers")]
    EmptyConcept(String),

    #[error("concept dictionary is empty")]
    Empty,
}

/// Rejected admin payload
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name, cuisine and area are required")]
    MissingRequired,

    #[error("Rating must be between 0 and 5")]
    RatingOutOfRange,

    #[error("Dish name is required")]
    MissingDishName,

    #[error("Base price must not be negative")]
    NegativePrice,

    #[error("Restaurant {0} does not exist")]
    UnknownRestaurant(u64),
}

/// Admin insert failure
#[derive(Error, Debug)]
pub enum InsertError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors surfaced by the assistant to the transport layer
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Upstream fetch failed; reported as a retryable service error
    #[error("restaurant store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    /// Store answered with zero restaurants
    #[error("No restaurants found in Dyne yet.")]
    EmptyCatalog,
}
