// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method codecs — turn method calls and their replies into channel bytes.
//
// Wire format of the JSON codec:
//
//   call     {"method": "<name>", "args": <value>}
//   success  [<result>]
//   error    ["<code>", "<message>" | null, <details>]
//
// A zero-length reply means the receiving side has no handler for the method.

use serde_json::{Value, json};

use settings_core::error::{Result, SettingsError};
use settings_core::types::{MethodCall, MethodResponse};

/// Encoding seam between method-level and byte-level channel traffic.
pub trait MethodCodec: Send + Sync {
    fn encode_method_call(&self, call: &MethodCall) -> Result<Vec<u8>>;

    fn decode_method_call(&self, message: &[u8]) -> Result<MethodCall>;

    fn encode_success_envelope(&self, result: &Value) -> Result<Vec<u8>>;

    fn encode_error_envelope(
        &self,
        code: &str,
        message: Option<&str>,
        details: &Value,
    ) -> Result<Vec<u8>>;

    /// Decode a reply. Empty bytes decode to [`MethodResponse::NotImplemented`].
    fn decode_envelope(&self, envelope: &[u8]) -> Result<MethodResponse>;
}

/// JSON method codec, wire-compatible with the UI runtime's JSON codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMethodCodec;

impl MethodCodec for JsonMethodCodec {
    fn encode_method_call(&self, call: &MethodCall) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(call)?)
    }

    fn decode_method_call(&self, message: &[u8]) -> Result<MethodCall> {
        serde_json::from_slice(message)
            .map_err(|e| SettingsError::Codec(format!("invalid method call: {e}")))
    }

    fn encode_success_envelope(&self, result: &Value) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&json!([result]))?)
    }

    fn encode_error_envelope(
        &self,
        code: &str,
        message: Option<&str>,
        details: &Value,
    ) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&json!([code, message, details]))?)
    }

    fn decode_envelope(&self, envelope: &[u8]) -> Result<MethodResponse> {
        if envelope.is_empty() {
            return Ok(MethodResponse::NotImplemented);
        }

        let value: Value = serde_json::from_slice(envelope)
            .map_err(|e| SettingsError::Codec(format!("invalid envelope: {e}")))?;

        match value {
            Value::Array(mut items) if items.len() == 1 => {
                Ok(MethodResponse::Success(items.remove(0)))
            }
            Value::Array(items) if items.len() == 3 => {
                let mut items = items.into_iter();
                let code = match items.next() {
                    Some(Value::String(code)) => code,
                    other => {
                        return Err(SettingsError::Codec(format!(
                            "error code must be a string, got {other:?}"
                        )));
                    }
                };
                let message = match items.next() {
                    Some(Value::String(message)) => Some(message),
                    Some(Value::Null) | None => None,
                    Some(other) => {
                        return Err(SettingsError::Codec(format!(
                            "error message must be a string or null, got {other}"
                        )));
                    }
                };
                let details = items.next().unwrap_or(Value::Null);
                Ok(MethodResponse::Error {
                    code,
                    message,
                    details,
                })
            }
            other => Err(SettingsError::Codec(format!("invalid envelope: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use settings_core::types::METHOD_OPEN_APP_SETTING_SCREEN;

    #[test]
    fn call_is_method_and_args_object() {
        let bytes = JsonMethodCodec
            .encode_method_call(&MethodCall::new(METHOD_OPEN_APP_SETTING_SCREEN))
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({"method": "openAppSettingScreen", "args": null}));
    }

    #[test]
    fn boolean_success_is_single_element_array() {
        let bytes = JsonMethodCodec
            .encode_success_envelope(&Value::Bool(true))
            .unwrap();
        assert_eq!(bytes, b"[true]");
    }

    #[test]
    fn error_envelope_decodes() {
        let reply = JsonMethodCodec
            .decode_envelope(br#"["malformed_call", null, {"at": 3}]"#)
            .unwrap();
        assert_eq!(
            reply,
            MethodResponse::Error {
                code: "malformed_call".into(),
                message: None,
                details: json!({"at": 3}),
            }
        );
    }

    #[test]
    fn empty_reply_is_not_implemented() {
        assert_eq!(
            JsonMethodCodec.decode_envelope(&[]).unwrap(),
            MethodResponse::NotImplemented
        );
    }

    #[test]
    fn two_element_envelope_is_rejected() {
        assert!(matches!(
            JsonMethodCodec.decode_envelope(b"[1, 2]"),
            Err(SettingsError::Codec(_))
        ));
    }

    #[test]
    fn call_without_method_is_rejected() {
        assert!(matches!(
            JsonMethodCodec.decode_method_call(br#"{"args": null}"#),
            Err(SettingsError::Codec(_))
        ));
    }
}
