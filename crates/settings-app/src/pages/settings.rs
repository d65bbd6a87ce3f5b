// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings screen — one button that sends the user to the OS settings page
// for this app.

use dioxus::prelude::*;

use settings_core::UnhandledPolicy;
use settings_core::human_errors::Severity;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn SettingsScreen() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let data_dir = svc.data_dir().display().to_string();

    rsx! {
        div {
            h1 { "App settings" }
            p { style: "color: #666; font-size: 14px;",
                "Permissions, notifications and storage for this app are managed by your device."
            }

            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 8px;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let attempt = svc.open_app_settings();
                        tracing::info!(opened = attempt.opened, "settings button pressed");
                        state.write().last_attempt = Some(attempt);
                    }
                },
                "Open app settings"
            }

            if let Some(ref attempt) = state.read().last_attempt {
                if attempt.opened {
                    p { style: "color: #34c759; font-size: 14px; text-align: center; margin-top: 8px;",
                        "Opened at {attempt.time_label()}"
                    }
                }
                if let Some(ref problem) = attempt.problem {
                    div { style: "margin-top: 12px; padding: 12px; border-radius: 8px; background: {severity_colour(problem.severity)};",
                        strong { "{problem.message}" }
                        p { style: "margin: 4px 0 0 0; font-size: 14px;", "{problem.suggestion}" }
                    }
                }
            }

            section { style: "margin: 24px 0;",
                h3 { "About" }
                InfoRow { label: "Platform", value: state.read().platform.clone() }
                InfoRow { label: "Channel", value: state.read().channel.clone() }
                InfoRow { label: "Unknown methods", value: unhandled_label(state.read().unhandled).to_string() }
                InfoRow { label: "Data", value: data_dir }
            }
        }
    }
}

#[component]
fn InfoRow(label: &'static str, value: String) -> Element {
    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
            span { "{label}" }
            span { style: "color: #666; font-family: monospace;", "{value}" }
        }
    }
}

fn severity_colour(severity: Severity) -> &'static str {
    match severity {
        Severity::Transient => "#fff8e1",
        Severity::ActionRequired => "#e3f2fd",
        Severity::Permanent => "#fdecea",
    }
}

fn unhandled_label(policy: UnhandledPolicy) -> &'static str {
    match policy {
        UnhandledPolicy::NotImplemented => "reply \"not implemented\"",
        UnhandledPolicy::Drop => "ignored",
    }
}
