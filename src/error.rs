use thiserror::Error;

/// Errors raised while decomposing URLs or loading detector settings.
///
/// Detection itself never fails: every rejection degrades to an unset
/// [`PaginationResult`](crate::results::PaginationResult).
#[derive(Debug, Error)]
pub enum PagingError {
    /// The string could not be parsed as an absolute URL with a host.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// The URL does not accept a username or password.
    #[error("cannot set credentials on url: {0}")]
    Credentials(String),
    /// Reading a config or event file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A config or event file is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PagingError>;
