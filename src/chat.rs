//! Post messages to a chat platform's incoming webhook.
//!
//! The wire format is the `payload` form field understood by Mattermost and
//! Slack-compatible incoming webhooks. See [message::Message].

pub mod error;
pub mod message;
pub mod webhook;

pub use error::ForwardError;
pub use message::Message;
pub use webhook::WebhookClient;
