use thiserror::Error;

/// Error taxonomy of the coordination core.
///
/// Race losses (already checked in, too late to buzz, session closed) are
/// NOT errors; they are ordinary outcome values returned through `Ok`.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Precondition violation; nothing was mutated.
    #[error("{0}")]
    Validation(String),

    /// A referenced session, round, or record does not exist.
    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: i64 },

    /// Store unavailability or another database failure. Propagated as-is;
    /// callers retry user-initiated actions manually.
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: &'static str, id: i64) -> Self {
        Self::NotFound { what, id }
    }
}
