// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings channel — the named method channel between the UI layer and the
// native settings opener.
//
//   UI layer ── SettingsClient ── MethodChannel ── BinaryMessenger
//                                                      │
//   native OS ── SettingsOpener ── MethodDispatcher ───┘

pub mod client;
pub mod codec;
pub mod dispatch;
pub mod messenger;
pub mod method_channel;
pub mod registrar;

pub use client::SettingsClient;
pub use codec::{JsonMethodCodec, MethodCodec};
pub use dispatch::{MethodDispatcher, settings_dispatcher};
pub use messenger::{BinaryMessenger, HandlerRegistration, InProcessMessenger};
pub use method_channel::{MethodChannel, MethodResult};
pub use registrar::register_settings_channel;
