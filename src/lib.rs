#![warn(missing_docs)]

//! Host/script interop over an embedded Rhai engine.
//!
//! A *script module* is a source file that declares one top-level object of
//! zero-argument callables and ends with a bare string naming that object.
//! The host binds a capability object (`ExposedObject`) into scope before the
//! module body runs, loads the module, resolves the exported callable surface
//! from the trailing name, and invokes callables by name on demand.
//!
//! Script code talks back to the host through exactly two entry points:
//! `ExposedObject.stdClog(message)` for log lines and
//! `ExposedObject.passValue(value)` for structured values. Guarded callables
//! catch their own errors and report them through `passValue` as well, so
//! nothing thrown inside them ever crosses the host boundary.

mod config;
mod engine;
mod error;
mod host;
mod module;

pub mod testutils;

pub use config::ScriptConfig;
pub use error::{Error, ErrorInfo, Result};
pub use host::{ExposedObject, HostApi};
pub use module::{ModuleLoader, ScriptModule};
