use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong talking to the platform or preparing a
/// request for it. Warnings (e.g. dropped unknown column ids on a write) are
/// not errors and are reported alongside results instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A required input was missing or empty. Raised before any network call.
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    /// A raw column value carried a type this client has no decode rule for.
    #[error("column '{column_id}' has a type this client cannot decode")]
    UnknownColumnType { column_id: String },

    /// The parent board exposes no subitem column, so the subitem board's
    /// schema cannot be resolved.
    #[error("board '{board_id}' has no subitem column; cannot resolve the subitem board")]
    UnresolvedSubitemBoard { board_id: String },

    /// An item lookup came back empty.
    #[error("item '{item_id}' not found")]
    ItemNotFound { item_id: String },

    /// The server answered with a non-empty GraphQL error list; the messages
    /// are joined verbatim.
    #[error("server reported: {0}")]
    Remote(String),

    #[error("http transport failed")]
    Http(#[from] reqwest::Error),

    /// The response parsed as JSON but did not match the expected shape.
    #[error("response did not match the expected shape")]
    MalformedResponse(#[from] serde_json::Error),

    /// The server kept returning cursors past the page cap.
    #[error("board '{board_id}' still returned a cursor after {pages} pages")]
    PageLimitExceeded { board_id: String, pages: usize },
}
