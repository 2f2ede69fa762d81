//! Routes parsed webhook events to their handlers.

use std::sync::Arc;

use {
    miru_vision::{VisionService, analyze, synthesize},
    tracing::{debug, info, warn},
};

use crate::{
    error::Result,
    event::InboundEvent,
    reply::ReplyRequest,
    transport::{ContentFetcher, ReplyTransport},
};

/// Sent when the image itself could not be downloaded.
pub const IMAGE_UNAVAILABLE: &str = "画像を取得できませんでした。";

/// Outcome counts for one webhook batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub replied: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Event router. Built once at startup and shared across requests.
#[derive(Clone)]
pub struct Dispatcher {
    replies: Arc<dyn ReplyTransport>,
    content: Arc<dyn ContentFetcher>,
    vision: Arc<dyn VisionService>,
}

impl Dispatcher {
    pub fn new(
        replies: Arc<dyn ReplyTransport>,
        content: Arc<dyn ContentFetcher>,
        vision: Arc<dyn VisionService>,
    ) -> Self {
        Self {
            replies,
            content,
            vision,
        }
    }

    /// Handle every event in payload order.
    ///
    /// A failed reply only affects its own event; the rest of the batch is
    /// still processed.
    pub async fn dispatch(&self, events: Vec<InboundEvent>) -> DispatchReport {
        let mut report = DispatchReport::default();

        for event in events {
            let kind = event.kind().to_string();
            let outcome = match event {
                InboundEvent::Text {
                    reply_token,
                    message_id,
                    text,
                } => {
                    self.handle_text(&reply_token, message_id.as_deref(), &text)
                        .await
                },
                InboundEvent::Image {
                    reply_token,
                    message_id,
                } => self.handle_image(&reply_token, &message_id).await,
                InboundEvent::Other { .. } => {
                    debug!(event_kind = %kind, "no handler for event, skipping");
                    report.skipped += 1;
                    continue;
                },
            };

            match outcome {
                Ok(()) => report.replied += 1,
                Err(e) => {
                    warn!(event_kind = %kind, error = %e, "failed to reply to event");
                    report.failed += 1;
                },
            }
        }

        info!(
            replied = report.replied,
            skipped = report.skipped,
            failed = report.failed,
            "webhook batch dispatched"
        );
        report
    }

    /// Echo the received text back.
    async fn handle_text(
        &self,
        reply_token: &str,
        message_id: Option<&str>,
        text: &str,
    ) -> Result<()> {
        debug!(
            message_id = message_id.unwrap_or("-"),
            chars = text.chars().count(),
            "echoing text message"
        );
        self.send(reply_token, text).await
    }

    /// Describe the image using the vision service.
    async fn handle_image(&self, reply_token: &str, message_id: &str) -> Result<()> {
        let text = match self.content.fetch_content(message_id).await {
            Ok(image) => {
                let result = analyze(self.vision.as_ref(), &image).await;
                debug!(
                    message_id,
                    faces = result.faces.len(),
                    celebrities = result.celebrities.len(),
                    texts = result.texts.len(),
                    "image analyzed"
                );
                synthesize(&result)
            },
            Err(e) => {
                warn!(message_id, error = %e, "failed to download image");
                IMAGE_UNAVAILABLE.to_string()
            },
        };
        self.send(reply_token, &text).await
    }

    async fn send(&self, reply_token: &str, text: &str) -> Result<()> {
        self.replies
            .reply(&ReplyRequest::text(reply_token, text))
            .await
    }
}
