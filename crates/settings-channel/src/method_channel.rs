// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Named method channel over a binary messenger.
//
// The receiving side binds one method-call handler; the calling side invokes
// methods by name and decodes the reply envelope.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, warn};

use settings_core::error::Result;
use settings_core::types::{MethodCall, MethodResponse};

use crate::codec::{JsonMethodCodec, MethodCodec};
use crate::messenger::{BinaryMessageHandler, BinaryMessenger, BinaryReply, HandlerRegistration};

/// Error code sent back when incoming bytes don't decode as a method call.
pub const MALFORMED_CALL: &str = "malformed_call";

/// One-shot continuation for answering a method call.
///
/// Every answering method consumes `self`, so a call is answered at most
/// once. Dropping it without answering leaves the caller with no reply.
#[must_use = "dropping a MethodResult leaves the call unanswered"]
pub struct MethodResult {
    reply: BinaryReply,
    codec: Arc<dyn MethodCodec>,
}

impl MethodResult {
    fn new(reply: BinaryReply, codec: Arc<dyn MethodCodec>) -> Self {
        Self { reply, codec }
    }

    pub fn success(self, result: Value) {
        let encoded = self.codec.encode_success_envelope(&result);
        self.send(encoded);
    }

    pub fn error(self, code: &str, message: Option<&str>, details: Value) {
        let encoded = self.codec.encode_error_envelope(code, message, &details);
        self.send(encoded);
    }

    /// Answer with the empty reply the caller reads as "no such method".
    pub fn not_implemented(self) {
        (self.reply)(Vec::new());
    }

    fn send(self, encoded: Result<Vec<u8>>) {
        match encoded {
            Ok(bytes) => (self.reply)(bytes),
            Err(e) => error!(error = %e, "failed to encode method reply; call left unanswered"),
        }
    }
}

/// A named channel carrying method calls.
pub struct MethodChannel<M: BinaryMessenger + ?Sized, C = JsonMethodCodec> {
    name: String,
    messenger: Arc<M>,
    codec: Arc<C>,
}

impl<M: BinaryMessenger + ?Sized> MethodChannel<M> {
    /// A channel using the JSON method codec.
    pub fn new(messenger: Arc<M>, name: impl Into<String>) -> Self {
        Self::with_codec(messenger, name, JsonMethodCodec)
    }
}

impl<M, C> MethodChannel<M, C>
where
    M: BinaryMessenger + ?Sized,
    C: MethodCodec + 'static,
{
    pub fn with_codec(messenger: Arc<M>, name: impl Into<String>, codec: C) -> Self {
        Self {
            name: name.into(),
            messenger,
            codec: Arc::new(codec),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind `handler` as the only method-call handler of this channel.
    ///
    /// The handler stays bound until the returned registration is dropped.
    /// Calls that fail to decode are answered with a [`MALFORMED_CALL`] error
    /// and never reach `handler`.
    pub fn set_method_call_handler<F>(&self, handler: F) -> Result<HandlerRegistration<M>>
    where
        F: Fn(MethodCall, MethodResult) + Send + Sync + 'static,
    {
        let codec = Arc::clone(&self.codec);
        let channel = self.name.clone();
        let binary: BinaryMessageHandler = Arc::new(move |message: &[u8], reply: BinaryReply| {
            let result = MethodResult::new(reply, Arc::clone(&codec) as Arc<dyn MethodCodec>);
            match codec.decode_method_call(message) {
                Ok(call) => handler(call, result),
                Err(e) => {
                    warn!(channel = %channel, error = %e, "rejecting malformed method call");
                    result.error(MALFORMED_CALL, Some(&e.to_string()), Value::Null);
                }
            }
        });
        HandlerRegistration::acquire(Arc::clone(&self.messenger), self.name.clone(), binary)
    }

    /// Invoke `method` on the other side of the channel.
    ///
    /// `Ok(None)` means the handler returned without answering.
    pub fn invoke_method(&self, method: &str, arguments: Value) -> Result<Option<MethodResponse>> {
        let message = self
            .codec
            .encode_method_call(&MethodCall::with_arguments(method, arguments))?;
        match self.messenger.send(&self.name, &message)? {
            Some(envelope) => Ok(Some(self.codec.decode_envelope(&envelope)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::messenger::InProcessMessenger;
    use settings_core::error::SettingsError;

    fn channel() -> MethodChannel<InProcessMessenger> {
        MethodChannel::new(Arc::new(InProcessMessenger::new()), "test/channel")
    }

    #[test]
    fn handler_sees_method_and_arguments() {
        let channel = channel();
        let _registration = channel
            .set_method_call_handler(|call, result| {
                assert_eq!(call.method, "echo");
                result.success(call.arguments);
            })
            .unwrap();

        let reply = channel.invoke_method("echo", json!({"n": 1})).unwrap();
        assert_eq!(reply, Some(MethodResponse::Success(json!({"n": 1}))));
    }

    #[test]
    fn error_reply_reaches_caller() {
        let channel = channel();
        let _registration = channel
            .set_method_call_handler(|_, result| {
                result.error("denied", Some("nope"), Value::Null)
            })
            .unwrap();

        let reply = channel.invoke_method("anything", Value::Null).unwrap();
        assert_eq!(
            reply,
            Some(MethodResponse::Error {
                code: "denied".into(),
                message: Some("nope".into()),
                details: Value::Null,
            })
        );
    }

    #[test]
    fn garbage_bytes_get_malformed_call_error() {
        let messenger = Arc::new(InProcessMessenger::new());
        let channel = MethodChannel::new(Arc::clone(&messenger), "test/channel");
        let _registration = channel
            .set_method_call_handler(|_, _| panic!("handler must not run"))
            .unwrap();

        let envelope = messenger.send("test/channel", b"\xff not json").unwrap().unwrap();
        match JsonMethodCodec.decode_envelope(&envelope).unwrap() {
            MethodResponse::Error { code, .. } => assert_eq!(code, MALFORMED_CALL),
            other => panic!("expected error envelope, got {other:?}"),
        }
    }

    #[test]
    fn unregistered_channel_is_an_error() {
        assert!(matches!(
            channel().invoke_method("x", Value::Null),
            Err(SettingsError::ChannelNotRegistered(_))
        ));
    }
}
