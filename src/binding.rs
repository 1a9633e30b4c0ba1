//! The immutable association between secret tokens and where their
//! messages go.

use crate::config::Config;
use std::collections::HashMap;
use url::Url;

/// Who a message appears to come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub icon_url: Url,
}

/// Everything needed to deliver a message for one token.
#[derive(Debug, Clone)]
pub struct Binding {
    pub endpoint: Url,
    pub channel: String,
    pub identity: Identity,
}

/// Maps each configured token to its [Binding]. Built once at startup and
/// never mutated afterwards.
#[derive(Debug, Default)]
pub struct Bindings(HashMap<String, Binding>);

impl Bindings {
    pub fn get(&self, token: &str) -> Option<&Binding> {
        self.0.get(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, Binding)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (String, Binding)>>(iter: I) -> Self {
        Bindings(iter.into_iter().collect())
    }
}

impl From<&Config> for Bindings {
    /// Per-token identity overrides fall back to the config-wide defaults.
    fn from(config: &Config) -> Self {
        config
            .tokens
            .iter()
            .map(|t| {
                let identity = Identity {
                    username: t.username.clone().unwrap_or_else(|| config.username.clone()),
                    icon_url: t.icon_url.clone().unwrap_or_else(|| config.icon_url.clone()),
                };

                let binding = Binding {
                    endpoint: t.webhook.clone(),
                    channel: t.channel.clone(),
                    identity,
                };

                (t.token.clone(), binding)
            })
            .collect()
    }
}
