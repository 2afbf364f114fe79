//! Error types

mod config;
mod gateway;
mod query;

pub use config::*;
pub use gateway::*;
pub use query::*;

/// Top-level error for the grid library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid grid or column configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A fetch request was rejected.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The data gateway failed to produce a page.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The grid session is no longer running.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors returned by a [`GridHandle`](crate::session::GridHandle).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The session task has shut down and no longer accepts intents.
    #[error("Grid session closed")]
    Closed,
}
