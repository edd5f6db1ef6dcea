//! Common error types used across the workspace.
//!
//! Every expected failure travels as a value of these types. Layers above the
//! domain convert their own typed errors into [`DepotError`] via `From`; the
//! HTTP adapter maps each variant to a status code.

/// Validation failures raised by domain rules and use-case input checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Name missing or blank after trimming.
    #[error("name is required")]
    EmptyName,

    /// Brand missing or blank after trimming.
    #[error("brand is required")]
    EmptyBrand,

    /// State missing or blank where one is mandatory.
    #[error("state is required")]
    EmptyState,

    /// Name or brand change attempted while the device is in use.
    #[error("cannot update name or brand while device is in use")]
    NameBrandLocked,

    /// Deletion attempted while the device is in use.
    #[error("in-use devices cannot be deleted")]
    DeviceInUse,

    /// A state string that matches none of the known states.
    #[error("unknown device state: {0}")]
    UnknownState(String),
}

/// Lookup miss for a record of a given kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up.
    pub entity: &'static str,
    /// Identifier that produced no match.
    pub id: String,
}

/// Top-level error enum for the depot workspace.
#[derive(Debug, thiserror::Error)]
pub enum DepotError {
    /// A domain rule or input check failed.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A record lookup produced no match.
    #[error("record not found")]
    NotFound(#[from] NotFoundError),

    /// The storage layer failed; the source carries the adapter error.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}
