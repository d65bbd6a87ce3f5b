// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Startup wiring for the settings channel.
//
// Call `register_settings_channel` once from the hosting controller before
// the UI can issue calls, and keep the returned registration alive for the
// controller's lifetime.

use std::sync::Arc;

use tracing::info;

use settings_bridge::SettingsOpener;
use settings_core::AppConfig;
use settings_core::error::Result;
use settings_core::types::CHANNEL_NAME;

use crate::dispatch::settings_dispatcher;
use crate::messenger::{BinaryMessenger, HandlerRegistration};
use crate::method_channel::MethodChannel;

/// Bind the settings handler to [`CHANNEL_NAME`] on `messenger`.
///
/// Only the unhandled-method policy comes from `config`; the channel name is
/// fixed so callers built against the same constant always reach it.
///
/// Fails with `ChannelAlreadyRegistered` if the channel is already bound.
pub fn register_settings_channel<M, O>(
    messenger: Arc<M>,
    config: &AppConfig,
    opener: O,
) -> Result<HandlerRegistration<M>>
where
    M: BinaryMessenger + ?Sized,
    O: SettingsOpener + Send + Sync + 'static,
{
    let channel = MethodChannel::new(messenger, CHANNEL_NAME);
    let dispatcher = settings_dispatcher(opener, config.unhandled_methods);
    let registration =
        channel.set_method_call_handler(move |call, result| dispatcher.handle(call, result))?;

    info!(
        channel = channel.name(),
        unhandled = ?config.unhandled_methods,
        "settings channel registered"
    );
    Ok(registration)
}
