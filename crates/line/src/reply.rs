use serde::Serialize;

/// LINE rejects text messages longer than this many characters.
pub const MAX_TEXT_CHARS: usize = 5000;

/// Body of `POST /v2/bot/message/reply`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub reply_token: String,
    pub messages: Vec<OutboundMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    Text { text: String },
}

impl ReplyRequest {
    /// A single text reply, truncated to the platform limit.
    pub fn text(reply_token: impl Into<String>, text: &str) -> Self {
        Self {
            reply_token: reply_token.into(),
            messages: vec![OutboundMessage::Text {
                text: truncate_chars(text, MAX_TEXT_CHARS),
            }],
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
