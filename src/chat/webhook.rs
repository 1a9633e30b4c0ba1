//! Deliver a [Message] to an incoming webhook.

use super::{ForwardError, Message};
use std::time::Duration;
use url::Url;

/// A reusable client that holds a connection pool internally, as per
/// [reqwest::Client]. Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
}

impl WebhookClient {
    /// Without a timeout a request waits on the destination for as long as
    /// the connection stays open.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }

        Ok(WebhookClient {
            http: builder.build()?,
        })
    }

    /// Post a message to `endpoint` exactly once.
    ///
    /// The response is drained but otherwise ignored, status included. Only
    /// serialization and transport errors count as failure.
    pub async fn send(&self, endpoint: &Url, msg: &Message) -> Result<(), ForwardError> {
        let payload = serde_json::to_string(msg)?;

        let res = self
            .http
            .post(endpoint.clone())
            .form(&[("payload", payload)])
            .send()
            .await?;

        res.bytes().await?;

        Ok(())
    }
}
