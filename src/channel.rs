//! Channel-based dispatch of completed messages.
//!
//! A [`ChannelRouter`] maps channel names to payload handlers. It is built
//! and owned by the application receiving messages; the reassembler never
//! sees it.

use std::{collections::HashMap, fmt, sync::Arc};

use crate::{error::RouteError, reassembler::AssembledMessage};

/// Interprets the payload of messages on one channel.
///
/// Implemented for every `Fn(&AssembledMessage) + Send + Sync` closure, so
/// most routes are registered as plain closures.
pub trait ChannelHandler: Send + Sync {
    /// Handle one completed message.
    fn handle(&self, message: &AssembledMessage);
}

impl<F> ChannelHandler for F
where
    F: Fn(&AssembledMessage) + Send + Sync,
{
    fn handle(&self, message: &AssembledMessage) { self(message) }
}

/// Shared handler stored by a [`ChannelRouter`].
pub type Handler = Arc<dyn ChannelHandler>;

/// Outcome of [`ChannelRouter::dispatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// A handler registered for the channel ran.
    Routed,
    /// No route matched and the fallback handler ran.
    Fallback,
    /// No route matched and no fallback is configured.
    Unrouted,
}

/// Routes messages to handlers keyed by exact channel name.
///
/// # Examples
///
/// ```
/// use std::sync::{
///     Arc,
///     atomic::{AtomicUsize, Ordering},
/// };
///
/// use lcmframe::{AssembledMessage, ChannelRouter, Defragmenter, Dispatch};
///
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&seen);
/// let router = ChannelRouter::new()
///     .route(
///         "POSE",
///         Arc::new(move |_message: &AssembledMessage| {
///             counter.fetch_add(1, Ordering::SeqCst);
///         }),
///     )
///     .expect("first route for POSE");
///
/// let mut wire = Vec::new();
/// wire.extend_from_slice(&0x4c43_3032_u32.to_be_bytes());
/// wire.extend_from_slice(&1_u32.to_be_bytes());
/// wire.extend_from_slice(b"POSE\0payload");
/// let message = Defragmenter::new()
///     .submit(wire)
///     .expect("valid datagram")
///     .expect("complete message");
///
/// assert_eq!(router.dispatch(&message), Dispatch::Routed);
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone, Default)]
pub struct ChannelRouter {
    routes: HashMap<String, Handler>,
    fallback: Option<Handler>,
}

impl ChannelRouter {
    /// Create a router without routes or fallback.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Register `handler` for messages published on `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DuplicateChannel`] if `channel` already has a
    /// handler.
    pub fn route(mut self, channel: impl Into<String>, handler: Handler) -> Result<Self, RouteError> {
        let channel = channel.into();
        if self.routes.contains_key(&channel) {
            return Err(RouteError::DuplicateChannel(channel));
        }
        self.routes.insert(channel, handler);
        Ok(self)
    }

    /// Handle messages on channels without a route.
    #[must_use]
    pub fn fallback(mut self, handler: Handler) -> Self {
        self.fallback = Some(handler);
        self
    }

    /// Report whether `channel` has a registered handler.
    #[must_use]
    pub fn has_route(&self, channel: &str) -> bool { self.routes.contains_key(channel) }

    /// Invoke the handler for the message's channel.
    pub fn dispatch(&self, message: &AssembledMessage) -> Dispatch {
        if let Some(handler) = self.routes.get(message.channel_name()) {
            handler.handle(message);
            return Dispatch::Routed;
        }
        match &self.fallback {
            Some(handler) => {
                handler.handle(message);
                Dispatch::Fallback
            }
            None => Dispatch::Unrouted,
        }
    }
}

impl fmt::Debug for ChannelRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut channels: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        channels.sort_unstable();
        f.debug_struct("ChannelRouter")
            .field("channels", &channels)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
