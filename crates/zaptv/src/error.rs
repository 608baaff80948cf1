use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZapError {
    #[error("HTTP error: {0}")]
    HttpError(reqwest::StatusCode),

    #[error("Failed to kill player process: {0}")]
    KillError(std::io::Error),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    RequestError(#[from] reqwest::Error),

    #[error(transparent)]
    MissingExecutable(#[from] which::Error),
}

pub type ZapResult<T> = Result<T, ZapError>;
