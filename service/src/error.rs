use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("not authorized, log in again")]
    Unauthorized,

    #[error("resource not found")]
    NotFound,

    #[error(transparent)]
    Abi(#[from] abi::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
