//! Test utilities for `scriptmod`.
//!
//! Kept as a public module so that external test crates (and downstream
//! users writing their own suites) can record host calls without
//! re-implementing the boiler-plate of a mock [`HostApi`].

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::{HostApi, ModuleLoader, ScriptConfig};

/// One recorded call across the host boundary, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    /// A `stdClog` line.
    Clog(String),
    /// A `passValue` payload, already converted to JSON.
    Value(Value),
}

/// Host API implementation that records every call for later assertions.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Only the recorded log lines, in order.
    pub fn clogs(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Clog(message) => Some(message),
                HostCall::Value(_) => None,
            })
            .collect()
    }

    /// Only the recorded values, in order.
    pub fn values(&self) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Value(value) => Some(value),
                HostCall::Clog(_) => None,
            })
            .collect()
    }

    fn record(&self, call: HostCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

impl HostApi for RecordingHost {
    fn std_clog(&self, message: &str) {
        self.record(HostCall::Clog(message.to_string()));
    }

    fn pass_value(&self, value: Value) {
        self.record(HostCall::Value(value));
    }
}

/// A loader wired to a fresh [`RecordingHost`] with default limits.
pub fn loader() -> (Arc<RecordingHost>, ModuleLoader<RecordingHost>) {
    let host = Arc::new(RecordingHost::default());
    let loader = ModuleLoader::new(host.clone(), ScriptConfig::default());
    (host, loader)
}
