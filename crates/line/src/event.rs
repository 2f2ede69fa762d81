use {serde::Deserialize, tracing::debug};

use crate::error::Result;

/// Top-level webhook body. `events` may be empty when the console sends a
/// connectivity check.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub reply_token: Option<String>,
    pub message: Option<WebhookMessage>,
    pub webhook_event_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    pub id: Option<String>,
    pub text: Option<String>,
}

/// One event the bot knows how to route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Text {
        reply_token: String,
        message_id: Option<String>,
        text: String,
    },
    Image {
        reply_token: String,
        message_id: String,
    },
    /// Anything without a handler: follow/unfollow/postback events, other
    /// message kinds, or messages that cannot be answered.
    Other { kind: String },
}

impl InboundEvent {
    pub fn kind(&self) -> &str {
        match self {
            Self::Text { .. } => "message:text",
            Self::Image { .. } => "message:image",
            Self::Other { kind } => kind,
        }
    }
}

impl From<WebhookEvent> for InboundEvent {
    fn from(event: WebhookEvent) -> Self {
        let WebhookEvent {
            event_type,
            reply_token,
            message,
            ..
        } = event;
        if event_type != "message" {
            return Self::Other { kind: event_type };
        }
        let Some(message) = message else {
            return Self::Other { kind: event_type };
        };
        let kind = format!("message:{}", message.message_type);
        let Some(reply_token) = reply_token.filter(|t| !t.is_empty()) else {
            return Self::Other { kind };
        };

        match (message.message_type.as_str(), message.text, message.id) {
            ("text", Some(text), id) => Self::Text {
                reply_token,
                message_id: id,
                text,
            },
            ("image", _, Some(message_id)) => Self::Image {
                reply_token,
                message_id,
            },
            _ => Self::Other { kind },
        }
    }
}

/// Parse a raw webhook body into events, preserving payload order.
pub fn parse_events(body: &[u8]) -> Result<Vec<InboundEvent>> {
    let payload: WebhookPayload = serde_json::from_slice(body)?;
    Ok(payload
        .events
        .into_iter()
        .map(|event| {
            debug!(
                webhook_event_id = event.webhook_event_id.as_deref().unwrap_or("-"),
                event_type = %event.event_type,
                "webhook event received"
            );
            InboundEvent::from(event)
        })
        .collect())
}
