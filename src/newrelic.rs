//! Receive alert and deployment webhooks from New Relic, render them as chat
//! messages, and forward them to the destination bound to the request's token.
//!
//! New Relic posts `application/x-www-form-urlencoded` bodies carrying a
//! single JSON-encoded field, either `alert` or `deployment`. See [event].

pub mod event;
pub mod format;
pub mod router;
