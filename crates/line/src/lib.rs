//! LINE Messaging API channel.
//!
//! Verifies inbound webhook signatures, parses event batches, and dispatches
//! each event to the text (echo) or image (vision description) handler.
//! Replies and image downloads go through the [`ReplyTransport`] and
//! [`ContentFetcher`] traits; [`LineClient`] implements both over HTTP.

pub mod client;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod reply;
pub mod signature;
pub mod transport;
pub mod webhook;

pub use {
    client::LineClient,
    dispatch::{DispatchReport, Dispatcher},
    error::{Error, Result},
    event::{InboundEvent, parse_events},
    reply::ReplyRequest,
    signature::SIGNATURE_HEADER,
    transport::{ContentFetcher, ReplyTransport},
    webhook::handle_webhook,
};
