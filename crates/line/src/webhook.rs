//! Webhook entry point: authenticate, parse, dispatch.

use tracing::{debug, warn};

use crate::{
    dispatch::{DispatchReport, Dispatcher},
    error::Result,
    event::parse_events,
    signature::authenticate,
};

/// Process one webhook request.
///
/// Authentication and parse failures are returned before any handler runs.
/// Once dispatch starts, per-event failures are absorbed into the report.
pub async fn handle_webhook(
    dispatcher: &Dispatcher,
    channel_secret: &str,
    body: &[u8],
    signature: Option<&str>,
) -> Result<DispatchReport> {
    if let Err(e) = authenticate(body, channel_secret, signature) {
        warn!(error = %e, "rejecting webhook");
        return Err(e);
    }
    let events = match parse_events(body) {
        Ok(events) => events,
        Err(e) => {
            warn!(error = %e, "rejecting webhook");
            return Err(e);
        },
    };
    debug!(count = events.len(), "webhook authenticated");
    Ok(dispatcher.dispatch(events).await)
}
