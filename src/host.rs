use std::sync::Arc;

use rhai::{Dynamic, Engine, ImmutableString};
use serde_json::Value;
use tracing::debug;

/// API surface that a host exposes to script modules.
///
/// These are the only two channels script code has back into native code.
/// Guarded callables report caught errors through [`pass_value`] as well, so
/// the value channel must accept arbitrary shapes.
///
/// [`pass_value`]: HostApi::pass_value
pub trait HostApi: Send + Sync + 'static {
    /// Receive a log line emitted by script code.
    fn std_clog(&self, message: &str);

    /// Receive a structured value forwarded by script code.
    fn pass_value(&self, value: Value);
}

/// Script-side handle for the host capability object.
///
/// Bound into scope as `ExposedObject` before any module body runs; module
/// code references it unconditionally, with no null-check.
#[derive(Clone)]
pub struct ExposedObject {
    api: Arc<dyn HostApi>,
}

impl ExposedObject {
    /// Wrap a host API for injection into script scope.
    pub fn new(api: Arc<dyn HostApi>) -> Self {
        Self { api }
    }

    fn std_clog(&mut self, message: ImmutableString) {
        debug!(%message, "stdClog");
        self.api.std_clog(&message);
    }

    fn pass_value(&mut self, value: Dynamic) {
        // Thrown error objects and other non-serde values still travel the
        // channel, degraded to their display form.
        let json = rhai::serde::from_dynamic(&value)
            .unwrap_or_else(|_| Value::String(value.to_string()));
        debug!(%json, "passValue");
        self.api.pass_value(json);
    }
}

/// Register the capability type and its script-facing methods.
///
/// The method names are the wire contract: scripts call `stdClog` and
/// `passValue` exactly.
pub(crate) fn register(engine: &mut Engine) {
    engine.register_type_with_name::<ExposedObject>("ExposedObject");
    engine.register_fn("stdClog", ExposedObject::std_clog);
    engine.register_fn("passValue", ExposedObject::pass_value);
}
