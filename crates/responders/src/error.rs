use thiserror::Error;

/// Failures inside a responder. These never leave the responder boundary:
/// each one is rendered into the reply text instead.
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{upstream} returned HTTP {status}")]
    Status { upstream: &'static str, status: u16 },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("no {0} in upstream response")]
    MissingData(&'static str),
}

impl ResponderError {
    pub fn is_missing_data(&self) -> bool {
        matches!(self, ResponderError::MissingData(_))
    }
}

pub(crate) fn check_status(
    response: reqwest::Response,
    upstream: &'static str,
) -> Result<reqwest::Response, ResponderError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ResponderError::Status {
            upstream,
            status: status.as_u16(),
        })
    }
}
