//! New Relic subrouter definition.
//!
//! The following subroute is supported:
//!
//! - POST: `/:token`

use super::{
    event::{decode, select_payload},
    format,
};
use crate::{binding::Binding, chat::Message, error::RelayError, router::Deps};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, ConnectInfo, Path, State},
    http::{Method, StatusCode},
    routing::any,
    Router,
};
use axum_extra::{headers, TypedHeader};
use std::net::SocketAddr;
use tracing::{error, info, warn};

const FORM_URL_ENCODED: &str = "application/x-www-form-urlencoded";

/// Instantiate a new New Relic subrouter.
pub fn newrelic_router() -> Router<Deps> {
    // Every method is routed here so that a wrong one can be answered like an
    // unknown path rather than with a 405.
    Router::new().route("/:token", any(webhook_handler))
}

/// Handler for the subroute `/:token`.
///
/// Accepts an `application/x-www-form-urlencoded` POST body with either an
/// `alert` or a `deployment` field holding New Relic's JSON payload. The
/// rendered message is forwarded to the destination bound to `token`.
///
/// Responses have no body; the status alone tells the caller what happened.
async fn webhook_handler(
    State(deps): State<Deps>,
    Path(token): Path<String>,
    ConnectInfo(origin): ConnectInfo<SocketAddr>,
    method: Method,
    content_type: Option<TypedHeader<headers::ContentType>>,
    // Read failures, e.g. an oversized body, are ours to report.
    body: Result<Bytes, BytesRejection>,
) -> StatusCode {
    let Some(binding) = deps.bindings.get(&token) else {
        return StatusCode::NOT_FOUND;
    };

    match relay(&deps, binding, method, content_type, body).await {
        Ok(msg) => {
            info!(%origin, "Message sent: {:?}", msg);
            StatusCode::OK
        }
        Err(e) => {
            let code = e.status();
            if code.is_server_error() {
                error!(%origin, "{}", e);
            } else {
                warn!(%origin, "{}", e);
            }

            code
        }
    }
}

/// Validate, decode, render, and forward a single request, returning the
/// message that was sent.
async fn relay(
    deps: &Deps,
    binding: &Binding,
    method: Method,
    content_type: Option<TypedHeader<headers::ContentType>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Message, RelayError> {
    if method != Method::POST {
        return Err(RelayError::MethodNotAllowed(method));
    }

    let content_type = content_type.map(|TypedHeader(x)| x.to_string());
    if !content_type.as_deref().is_some_and(is_form_url_encoded) {
        return Err(RelayError::UnacceptableContentType(content_type));
    }

    let body = body.map_err(|e| RelayError::FormParse(e.to_string()))?;
    check_escapes(&body).map_err(RelayError::FormParse)?;
    let form: Vec<(String, String)> =
        serde_urlencoded::from_bytes(&body).map_err(|e| RelayError::FormParse(e.to_string()))?;

    let (kind, raw) = select_payload(&form).ok_or_else(|| {
        RelayError::MissingPayloadField(form.iter().map(|(k, _)| k.clone()).collect())
    })?;

    let event = decode(kind, raw)?;
    let msg = Message::new(binding, format::render(&event));

    match deps.webhook_client.send(&binding.endpoint, &msg).await {
        Ok(()) => Ok(msg),
        Err(e) => Err(RelayError::Forward(e, Box::new(msg))),
    }
}

/// Reject any `%` not followed by two hex digits. The form decoder would
/// otherwise keep such sequences as literal text.
fn check_escapes(body: &[u8]) -> Result<(), String> {
    let mut i = 0;
    while i < body.len() {
        if body[i] == b'%' {
            let valid = body
                .get(i + 1..i + 3)
                .is_some_and(|xs| xs.iter().all(u8::is_ascii_hexdigit));

            if !valid {
                return Err(format!("invalid URL escape at byte {}", i));
            }

            i += 3;
        } else {
            i += 1;
        }
    }

    Ok(())
}

/// Compare media types only. This is wider than an exact header match: case
/// is ignored, as are parameters such as `charset`.
fn is_form_url_encoded(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|x| x.eq_ignore_ascii_case(FORM_URL_ENCODED))
}
