// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Caller side of the settings channel, as the UI layer uses it.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use settings_core::error::{Result, SettingsError};
use settings_core::types::{METHOD_OPEN_APP_SETTING_SCREEN, MethodResponse};

use crate::messenger::BinaryMessenger;
use crate::method_channel::MethodChannel;

/// Typed wrapper around the settings channel.
pub struct SettingsClient<M: BinaryMessenger + ?Sized> {
    channel: MethodChannel<M>,
}

impl<M: BinaryMessenger + ?Sized> SettingsClient<M> {
    /// `channel_name` must match the registered name byte for byte.
    pub fn new(messenger: Arc<M>, channel_name: impl Into<String>) -> Self {
        Self {
            channel: MethodChannel::new(messenger, channel_name),
        }
    }

    /// Ask the native side to open this app's settings screen.
    ///
    /// `Ok(false)` is a normal outcome: the OS declined or failed to open it.
    pub fn open_app_settings(&self) -> Result<bool> {
        let method = METHOD_OPEN_APP_SETTING_SCREEN;
        let response = self.channel.invoke_method(method, Value::Null)?;
        debug!(channel = self.channel.name(), ?response, "settings call returned");

        match response {
            Some(MethodResponse::Success(Value::Bool(opened))) => Ok(opened),
            Some(MethodResponse::Success(other)) => Err(SettingsError::UnexpectedResult {
                method: method.to_string(),
                value: other.to_string(),
            }),
            Some(MethodResponse::Error { code, message, .. }) => Err(SettingsError::Remote {
                code,
                message: message.unwrap_or_default(),
            }),
            Some(MethodResponse::NotImplemented) => {
                Err(SettingsError::MethodNotImplemented(method.to_string()))
            }
            None => Err(SettingsError::NoResponse(method.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messenger::{BinaryMessageHandler, BinaryReply, InProcessMessenger};
    use crate::registrar::register_settings_channel;
    use settings_bridge::SettingsOpener;
    use settings_core::AppConfig;
    use settings_core::types::CHANNEL_NAME;

    struct Declines;

    impl SettingsOpener for Declines {
        fn open_app_settings(&self) -> Result<()> {
            Err(SettingsError::Bridge("canOpenURL: reported app-settings: as unresolvable".into()))
        }
    }

    fn raw(messenger: &InProcessMessenger, reply: &'static [u8]) {
        let handler: BinaryMessageHandler =
            Arc::new(move |_: &[u8], r: BinaryReply| r(reply.to_vec()));
        messenger.set_message_handler(CHANNEL_NAME, handler).unwrap();
    }

    #[test]
    fn false_is_a_normal_outcome() {
        let messenger = Arc::new(InProcessMessenger::new());
        let _registration =
            register_settings_channel(Arc::clone(&messenger), &AppConfig::default(), Declines)
                .unwrap();

        let client = SettingsClient::new(messenger, CHANNEL_NAME);
        assert!(!client.open_app_settings().unwrap());
    }

    #[test]
    fn not_implemented_reply_maps_to_error() {
        let messenger = Arc::new(InProcessMessenger::new());
        raw(&messenger, b"");
        let client = SettingsClient::new(messenger, CHANNEL_NAME);
        assert!(matches!(
            client.open_app_settings(),
            Err(SettingsError::MethodNotImplemented(_))
        ));
    }

    #[test]
    fn non_boolean_result_is_rejected() {
        let messenger = Arc::new(InProcessMessenger::new());
        raw(&messenger, br#"["yes"]"#);
        let client = SettingsClient::new(messenger, CHANNEL_NAME);
        assert!(matches!(
            client.open_app_settings(),
            Err(SettingsError::UnexpectedResult { .. })
        ));
    }

    #[test]
    fn error_envelope_maps_to_remote() {
        let messenger = Arc::new(InProcessMessenger::new());
        raw(&messenger, br#"["malformed_call", "bad bytes", null]"#);
        let client = SettingsClient::new(messenger, CHANNEL_NAME);
        match client.open_app_settings() {
            Err(SettingsError::Remote { code, message }) => {
                assert_eq!(code, "malformed_call");
                assert_eq!(message, "bad bytes");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn silence_maps_to_no_response() {
        let messenger = Arc::new(InProcessMessenger::new());
        messenger
            .set_message_handler(CHANNEL_NAME, Arc::new(|_: &[u8], _: BinaryReply| {}))
            .unwrap();
        let client = SettingsClient::new(messenger, CHANNEL_NAME);
        assert!(matches!(
            client.open_app_settings(),
            Err(SettingsError::NoResponse(_))
        ));
    }
}
