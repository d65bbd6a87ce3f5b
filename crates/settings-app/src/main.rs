// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings — app shell that opens the OS settings page for itself.
//
// Entry point. Initialises logging, registers the settings channel, and only
// then launches the Dioxus UI, so no UI call can reach an unbound channel.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::settings::SettingsScreen;
use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Settings starting");

    let services = match AppServices::init() {
        Ok(services) => services,
        Err(e) => {
            tracing::error!(error = %e, "could not register the settings channel");
            std::process::exit(1);
        }
    };

    dioxus::LaunchBuilder::new().with_context(services).launch(app);
}

/// Root component.
fn app() -> Element {
    let svc = use_context::<AppServices>();
    use_context_provider(|| Signal::new(state::AppState::new(&svc)));

    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",
            div { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 16px;",
                SettingsScreen {}
            }
        }
    }
}
