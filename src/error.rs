use std::path::PathBuf;

use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type TokenReaderResult<T> = std::result::Result<T, MalformedResponse>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request failed : {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("random source unavailable, nonce could not be generated : {0}")]
    EntropyUnavailable(#[from] rand::Error),
    #[error("media file {path} could not be read : {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("response could not be parsed : {0}")]
    MalformedResponse(#[from] MalformedResponse),
    #[error("request rejected with status {status} : {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("parameters could not be serialized : {0}")]
    Serialize(#[from] serde_urlencoded::ser::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}

#[derive(Error, Debug)]
pub enum MalformedResponse {
    #[error("response has malformed format: not found {0} in {1}")]
    TokenKeyNotFound(&'static str, String),
    #[error("oauth_callback_confirmed is missing or not true")]
    CallbackNotConfirmed,
    #[error("response is not valid JSON : {0}")]
    Json(#[from] serde_json::Error),
}
