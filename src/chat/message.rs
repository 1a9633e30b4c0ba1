//! The message posted to a destination webhook.

use crate::binding::Binding;
use serde::Serialize;
use url::Url;

/// A rendered message addressed to a channel under a given identity.
///
/// Serializes to the JSON object incoming webhooks expect inside their
/// `payload` form field:
///
/// ```json
/// {"channel": "ops", "text": "...", "username": "New Relic", "icon_url": "https://..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub channel: String,
    pub text: String,
    pub username: String,
    pub icon_url: Url,
}

impl Message {
    /// Address `text` as per a token's [Binding].
    pub fn new(binding: &Binding, text: String) -> Self {
        Message {
            channel: binding.channel.clone(),
            text,
            username: binding.identity.username.clone(),
            icon_url: binding.identity.icon_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Identity;

    #[test]
    fn test_new_and_serialize() {
        let binding = Binding {
            endpoint: Url::parse("https://chat.example.com/hooks/1").unwrap(),
            channel: "ops".into(),
            identity: Identity {
                username: "New Relic".into(),
                icon_url: Url::parse("https://example.com/nr.png").unwrap(),
            },
        };

        let msg = Message::new(&binding, "**hi**\n*there*".into());

        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"channel":"ops","text":"**hi**\n*there*","username":"New Relic","icon_url":"https://example.com/nr.png"}"#
        );
    }
}
