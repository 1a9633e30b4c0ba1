use std::fmt;

/// Sum type representing every way a forward can fail.
#[derive(Debug)]
pub enum ForwardError {
    Serialize(serde_json::Error),
    RequestFailed(reqwest::Error),
}

impl From<serde_json::Error> for ForwardError {
    fn from(e: serde_json::Error) -> Self {
        ForwardError::Serialize(e)
    }
}

impl From<reqwest::Error> for ForwardError {
    fn from(e: reqwest::Error) -> Self {
        ForwardError::RequestFailed(e)
    }
}

impl fmt::Display for ForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            ForwardError::Serialize(e) => format!("Failed to serialize message: {}", e),
            ForwardError::RequestFailed(e) => format!("Webhook request failed: {:?}", e),
        };

        write!(f, "{}", x)
    }
}
