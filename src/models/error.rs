use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    /// The FTP store could not be reached, refused the login, or failed a transfer.
    #[error("transfer error: {0}")]
    Transfer(String),

    #[error("malformed leaderboard: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("publish error: {0}")]
    Publish(String),
}

impl Error {
    pub fn config(key: &str) -> Self {
        Self::Config(format!("{key} not set"))
    }

    pub fn publish_status(action: &str, status: StatusCode, body: &str) -> Self {
        Self::Publish(format!("{action} returned {status}: {body}"))
    }
}

impl From<suppaftp::FtpError> for Error {
    fn from(error: suppaftp::FtpError) -> Self {
        Self::Transfer(error.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Transfer(error.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::Transfer(format!("ftp worker stopped: {error}"))
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Publish(error.to_string())
    }
}
