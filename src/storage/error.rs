use thiserror::Error;

/// Failure outcome of a storage call
///
/// Service answers carry the error code, message and request id returned by
/// the object store. Transport and local failures use the `RequestError` and
/// `ClientError` codes with an empty request id.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{code}: {message} (request id: {request_id})")]
pub struct ServiceError {
    pub code: String,
    pub message: String,
    pub request_id: String,
    pub status: Option<u16>,
}

impl ServiceError {
    #[must_use]
    pub fn new(code: &str, message: &str, request_id: &str, status: Option<u16>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            request_id: request_id.to_string(),
            status,
        }
    }

    /// Local failure: reading files, signing, decoding responses
    #[must_use]
    pub fn client(message: &str) -> Self {
        Self::new("ClientError", message, "", None)
    }

    /// The request never got an answer from the service
    #[must_use]
    pub fn request(message: &str) -> Self {
        Self::new("RequestError", message, "", None)
    }
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<Self>() {
            Ok(service_error) => service_error,
            Err(err) => {
                if err.downcast_ref::<reqwest::Error>().is_some() {
                    Self::request(&format!("{err:#}"))
                } else {
                    Self::client(&format!("{err:#}"))
                }
            }
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        Self::client(&err.to_string())
    }
}
