use crate::{
    chat::{ForwardError, Message},
    newrelic::event::DecodeError,
};
use axum::http::{Method, StatusCode};
use std::fmt;

/// Sum type representing every way a relay request can be refused.
#[derive(Debug)]
pub enum RelayError {
    MethodNotAllowed(Method),
    UnacceptableContentType(Option<String>),
    FormParse(String),
    /// Carries the names of the fields that were supplied instead.
    MissingPayloadField(Vec<String>),
    PayloadDecode(DecodeError),
    Forward(ForwardError, Box<Message>),
}

impl RelayError {
    /// Wrong methods are reported exactly as an unknown path would be, so that
    /// valid tokens can't be discovered by probing.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed(_) => StatusCode::NOT_FOUND,
            RelayError::UnacceptableContentType(_) => StatusCode::NOT_ACCEPTABLE,
            RelayError::FormParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::MissingPayloadField(_) => StatusCode::BAD_REQUEST,
            RelayError::PayloadDecode(_) => StatusCode::BAD_REQUEST,
            RelayError::Forward(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DecodeError> for RelayError {
    fn from(e: DecodeError) -> Self {
        RelayError::PayloadDecode(e)
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            RelayError::MethodNotAllowed(m) => format!("Bad method: {}", m),
            RelayError::UnacceptableContentType(Some(c)) => format!("Bad content type: {}", c),
            RelayError::UnacceptableContentType(None) => "Missing content type".into(),
            RelayError::FormParse(e) => format!("Failed to parse request body: {}", e),
            RelayError::MissingPayloadField(fields) => {
                format!("Invalid message, found fields: {:?}", fields)
            }
            RelayError::PayloadDecode(e) => e.to_string(),
            RelayError::Forward(e, msg) => format!("Failed to send {:?}: {}", msg, e),
        };

        write!(f, "{}", x)
    }
}
