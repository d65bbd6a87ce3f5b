// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method-name dispatch for a channel handler.
//
// Routes are a lookup table from method name to handler function. A name with
// no route is answered according to the configured `UnhandledPolicy`.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use settings_bridge::SettingsOpener;
use settings_core::config::UnhandledPolicy;
use settings_core::types::{METHOD_OPEN_APP_SETTING_SCREEN, MethodCall};

use crate::method_channel::MethodResult;

/// A route: computes the success value for one call against `target`.
pub type MethodFn<T> = fn(&T, &MethodCall) -> Value;

/// Dispatches method calls by name to functions over a shared target.
pub struct MethodDispatcher<T> {
    target: T,
    routes: HashMap<&'static str, MethodFn<T>>,
    unhandled: UnhandledPolicy,
}

impl<T> MethodDispatcher<T> {
    pub fn new(target: T, unhandled: UnhandledPolicy) -> Self {
        Self {
            target,
            routes: HashMap::new(),
            unhandled,
        }
    }

    /// Add a route. A later route for the same name replaces the earlier one.
    pub fn route(mut self, method: &'static str, handler: MethodFn<T>) -> Self {
        self.routes.insert(method, handler);
        self
    }

    /// Names this dispatcher answers.
    pub fn methods(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.keys().copied()
    }

    /// Answer `call` through `result`, exactly once, or not at all under
    /// [`UnhandledPolicy::Drop`].
    pub fn handle(&self, call: MethodCall, result: MethodResult) {
        match self.routes.get(call.method.as_str()) {
            Some(handler) => {
                debug!(method = %call.method, "dispatching method call");
                result.success(handler(&self.target, &call));
            }
            None => match self.unhandled {
                UnhandledPolicy::NotImplemented => {
                    warn!(method = %call.method, "no route for method; answering not implemented");
                    result.not_implemented();
                }
                UnhandledPolicy::Drop => {
                    warn!(method = %call.method, "no route for method; leaving call unanswered");
                    drop(result);
                }
            },
        }
    }
}

/// Dispatcher for the settings channel: one route, backed by `opener`.
pub fn settings_dispatcher<O: SettingsOpener>(
    opener: O,
    unhandled: UnhandledPolicy,
) -> MethodDispatcher<O> {
    MethodDispatcher::new(opener, unhandled)
        .route(METHOD_OPEN_APP_SETTING_SCREEN, open_app_setting_screen::<O>)
}

/// `openAppSettingScreen`: one fresh native attempt, reported as a boolean.
fn open_app_setting_screen<O: SettingsOpener>(opener: &O, _call: &MethodCall) -> Value {
    Value::Bool(opener.try_open_app_settings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use settings_core::error::Result;

    struct AlwaysOpens;

    impl SettingsOpener for AlwaysOpens {
        fn open_app_settings(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn settings_dispatcher_has_exactly_one_route() {
        let dispatcher = settings_dispatcher(AlwaysOpens, UnhandledPolicy::default());
        let methods: Vec<_> = dispatcher.methods().collect();
        assert_eq!(methods, vec![METHOD_OPEN_APP_SETTING_SCREEN]);
    }

    #[test]
    fn route_computes_boolean() {
        let call = MethodCall::new(METHOD_OPEN_APP_SETTING_SCREEN);
        assert_eq!(open_app_setting_screen(&AlwaysOpens, &call), Value::Bool(true));
    }
}
