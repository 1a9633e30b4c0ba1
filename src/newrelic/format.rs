//! Render events as Markdown chat messages.
//!
//! Nothing is escaped. Field contents come straight from New Relic and are
//! trusted not to break the surrounding formatting.

use super::event::{Alert, Deployment, InboundEvent};

pub fn render(event: &InboundEvent) -> String {
    match event {
        InboundEvent::Alert(x) => alert_text(x),
        InboundEvent::Deployment(x) => deployment_text(x),
    }
}

/// ```text
/// **[DB down](http://x/1): critical**
/// *connection refused*
/// ```
pub fn alert_text(alert: &Alert) -> String {
    format!(
        "**[{}]({}): {}**\n*{}*",
        alert.short_description, alert.url, alert.severity, alert.message
    )
}

pub fn deployment_text(deployment: &Deployment) -> String {
    format!(
        "**[{} deployed]({}) revision {}**\n```\n{}\n```",
        deployment.application_name, deployment.url, deployment.revision, deployment.changelog
    )
}
