use serde::Serializer;
use warp::reject::Reject;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("missing signature headers")]
    MissingSignatureHeaders,

    #[error("invalid request signature")]
    InvalidSignature,

    #[error("error while decoding json payload: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("error while publishing interaction: {0}")]
    PublishError(#[from] event_stream::StreamError),
}

impl Reject for Error {}

impl serde::Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{}", self)[..])
    }
}
