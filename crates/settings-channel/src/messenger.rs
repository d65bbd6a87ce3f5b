// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Binary message transport between the UI layer and native handlers.
//
// A messenger routes opaque byte messages by channel name. Each channel has
// at most one handler; the handler answers through a one-shot reply callback
// or, by dropping it, not at all.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use settings_core::error::{Result, SettingsError};

/// One-shot reply callback handed to a message handler.
pub type BinaryReply = Box<dyn FnOnce(Vec<u8>) + Send>;

/// Handler bound to a single channel name.
pub type BinaryMessageHandler = Arc<dyn Fn(&[u8], BinaryReply) + Send + Sync>;

/// Byte-level transport the UI runtime provides.
pub trait BinaryMessenger: Send + Sync {
    /// Bind `handler` to `channel`.
    ///
    /// Fails with `ChannelAlreadyRegistered` if the channel already has one.
    fn set_message_handler(&self, channel: &str, handler: BinaryMessageHandler) -> Result<()>;

    /// Unbind whatever handler `channel` has. Returns whether one existed.
    fn remove_message_handler(&self, channel: &str) -> bool;

    /// Unbind `channel` only if `handler` is the one currently bound to it.
    /// Returns whether it was removed.
    fn remove_message_handler_if(&self, channel: &str, handler: &BinaryMessageHandler) -> bool;

    /// Deliver `message` to the handler on `channel`.
    ///
    /// `Ok(None)` means the handler returned without replying.
    fn send(&self, channel: &str, message: &[u8]) -> Result<Option<Vec<u8>>>;
}

/// Synchronous messenger for a single process.
///
/// Handlers run on the sending thread and must reply before they return;
/// a reply sent later is discarded.
#[derive(Default)]
pub struct InProcessMessenger {
    handlers: Mutex<HashMap<String, BinaryMessageHandler>>,
}

impl InProcessMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `channel` currently has a handler.
    pub fn has_handler(&self, channel: &str) -> bool {
        self.handlers().contains_key(channel)
    }

    fn handlers(&self) -> MutexGuard<'_, HashMap<String, BinaryMessageHandler>> {
        // Handlers are only inserted or removed under the lock, so the map is
        // consistent even if a holder panicked.
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BinaryMessenger for InProcessMessenger {
    fn set_message_handler(&self, channel: &str, handler: BinaryMessageHandler) -> Result<()> {
        let mut handlers = self.handlers();
        if handlers.contains_key(channel) {
            return Err(SettingsError::ChannelAlreadyRegistered(channel.to_string()));
        }
        handlers.insert(channel.to_string(), handler);
        info!(channel, "message handler registered");
        Ok(())
    }

    fn remove_message_handler(&self, channel: &str) -> bool {
        let removed = self.handlers().remove(channel).is_some();
        if removed {
            info!(channel, "message handler removed");
        }
        removed
    }

    fn remove_message_handler_if(&self, channel: &str, handler: &BinaryMessageHandler) -> bool {
        let mut handlers = self.handlers();
        let is_bound = handlers.get(channel).map(|bound| Arc::ptr_eq(bound, handler));
        match is_bound {
            Some(true) => {
                handlers.remove(channel);
                info!(channel, "message handler removed");
                true
            }
            Some(false) => {
                debug!(channel, "channel rebound since registration; leaving it");
                false
            }
            None => false,
        }
    }

    fn send(&self, channel: &str, message: &[u8]) -> Result<Option<Vec<u8>>> {
        // Clone the handler out so it runs without the lock held; a handler
        // may itself send on another channel.
        let handler = self
            .handlers()
            .get(channel)
            .cloned()
            .ok_or_else(|| SettingsError::ChannelNotRegistered(channel.to_string()))?;

        let slot: Arc<Mutex<Option<Vec<u8>>>> = Arc::default();
        let reply_slot = Arc::clone(&slot);
        handler(
            message,
            Box::new(move |reply: Vec<u8>| {
                *reply_slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(reply);
            }),
        );

        let reply = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        debug!(channel, replied = reply.is_some(), "message delivered");
        Ok(reply)
    }
}

/// Scoped ownership of a channel's handler slot.
///
/// The handler stays bound for as long as this guard lives and is removed
/// when it drops, so tie the guard to the hosting controller. A guard only
/// ever removes its own handler, never one bound to the channel later.
#[must_use = "dropping the registration unbinds the handler immediately"]
pub struct HandlerRegistration<M: BinaryMessenger + ?Sized> {
    messenger: Arc<M>,
    channel: String,
    handler: BinaryMessageHandler,
}

impl<M: BinaryMessenger + ?Sized> HandlerRegistration<M> {
    /// Bind `handler` to `channel` and return the guard that owns it.
    pub fn acquire(
        messenger: Arc<M>,
        channel: impl Into<String>,
        handler: BinaryMessageHandler,
    ) -> Result<Self> {
        let channel = channel.into();
        messenger.set_message_handler(&channel, Arc::clone(&handler))?;
        Ok(Self {
            messenger,
            channel,
            handler,
        })
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl<M: BinaryMessenger + ?Sized> Drop for HandlerRegistration<M> {
    fn drop(&mut self) {
        self.messenger
            .remove_message_handler_if(&self.channel, &self.handler);
    }
}

impl<M: BinaryMessenger + ?Sized> std::fmt::Debug for HandlerRegistration<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistration")
            .field("channel", &self.channel)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo() -> BinaryMessageHandler {
        Arc::new(|message: &[u8], reply: BinaryReply| reply(message.to_vec()))
    }

    #[test]
    fn send_reaches_registered_handler() {
        let messenger = InProcessMessenger::new();
        messenger.set_message_handler("a/b", echo()).unwrap();
        assert_eq!(messenger.send("a/b", b"hi").unwrap(), Some(b"hi".to_vec()));
    }

    #[test]
    fn handler_that_never_replies_yields_none() {
        let messenger = InProcessMessenger::new();
        messenger
            .set_message_handler("a/b", Arc::new(|_: &[u8], _reply: BinaryReply| {}))
            .unwrap();
        assert_eq!(messenger.send("a/b", b"hi").unwrap(), None);
    }

    #[test]
    fn channel_names_match_exactly() {
        let messenger = InProcessMessenger::new();
        messenger.set_message_handler("com.example/settings", echo()).unwrap();
        for near_miss in ["com.example/Settings", "com.example/settings ", "com.example"] {
            assert!(matches!(
                messenger.send(near_miss, b"x"),
                Err(SettingsError::ChannelNotRegistered(_))
            ));
        }
    }

    #[test]
    fn second_handler_is_refused() {
        let messenger = InProcessMessenger::new();
        messenger.set_message_handler("a/b", echo()).unwrap();
        assert!(matches!(
            messenger.set_message_handler("a/b", echo()),
            Err(SettingsError::ChannelAlreadyRegistered(_))
        ));
    }

    #[test]
    fn registration_releases_channel_on_drop() {
        let messenger = Arc::new(InProcessMessenger::new());
        let registration =
            HandlerRegistration::acquire(Arc::clone(&messenger), "a/b", echo()).unwrap();
        assert_eq!(registration.channel(), "a/b");
        assert!(messenger.has_handler("a/b"));

        drop(registration);
        assert!(!messenger.has_handler("a/b"));
        // The slot is free again.
        let _again = HandlerRegistration::acquire(Arc::clone(&messenger), "a/b", echo()).unwrap();
    }

    #[test]
    fn stale_registration_leaves_newer_handler_bound() {
        let messenger = Arc::new(InProcessMessenger::new());
        let stale = HandlerRegistration::acquire(Arc::clone(&messenger), "a/b", echo()).unwrap();

        assert!(messenger.remove_message_handler("a/b"));
        let _current =
            HandlerRegistration::acquire(Arc::clone(&messenger), "a/b", echo()).unwrap();

        drop(stale);
        assert!(messenger.has_handler("a/b"));
        assert_eq!(messenger.send("a/b", b"hi").unwrap(), Some(b"hi".to_vec()));
    }

    #[test]
    fn conditional_remove_matches_identity() {
        let messenger = InProcessMessenger::new();
        let bound = echo();
        messenger.set_message_handler("a/b", Arc::clone(&bound)).unwrap();

        assert!(!messenger.remove_message_handler_if("a/b", &echo()));
        assert!(messenger.has_handler("a/b"));
        assert!(messenger.remove_message_handler_if("a/b", &bound));
        assert!(!messenger.has_handler("a/b"));
        assert!(!messenger.remove_message_handler_if("a/b", &bound));
    }
}
