use std::{collections::BTreeMap, sync::Arc, time::Duration};

use rhai::{AST, Dynamic, Engine, FnPtr, Map, Scope};
use tracing::debug;

use crate::{
    config::ScriptConfig,
    engine::{arm_timeout, build_engine},
    error::{Error, Result},
    host::{self, ExposedObject, HostApi},
};

/// Loads script modules against a host API and a fixed configuration.
pub struct ModuleLoader<A> {
    api: Arc<A>,
    config: ScriptConfig,
}

impl<A: HostApi> ModuleLoader<A> {
    /// Create a loader over the given host API and configuration.
    pub fn new(api: Arc<A>, config: ScriptConfig) -> Self {
        Self { api, config }
    }

    /// Execute a module body and resolve its exported callable surface.
    ///
    /// Each load gets a fresh engine and a fresh scope with `ExposedObject`
    /// pre-bound, so modules cannot observe each other. Top-level side
    /// effects of the module body (load-time log lines) happen here.
    ///
    /// The module body's final expression is its self-reported export name;
    /// the scope variable of that name must be an object, otherwise loading
    /// fails with a resolution error. Its callable properties form the
    /// module surface; data properties are ignored.
    pub fn load(&self, source: &str) -> Result<ScriptModule> {
        let mut engine = build_engine(&self.config);
        host::register(&mut engine);

        let mut scope = Scope::new();
        scope.push(
            "ExposedObject",
            ExposedObject::new(self.api.clone() as Arc<dyn HostApi>),
        );

        let ast = engine.compile_with_scope(&scope, source)?;

        arm_timeout(&mut engine, self.config.timeout);
        let result = engine
            .eval_ast_with_scope::<Dynamic>(&mut scope, &ast)
            .map_err(Error::from)?;

        let name = result
            .into_string()
            .map_err(|type_name| Error::ExportName(type_name.to_string()))?;

        let Some(export) = scope.get(&name) else {
            return Err(Error::ExportNotFound { name });
        };
        let Some(map) = export.clone().try_cast::<Map>() else {
            return Err(Error::NotCallable { name });
        };

        let mut callables = BTreeMap::new();
        for (property, value) in &map {
            let Some(fn_ptr) = value.clone().try_cast::<FnPtr>() else {
                debug!(module = %name, property = %property, "skipping non-callable property");
                continue;
            };
            callables.insert(property.to_string(), fn_ptr);
        }

        debug!(module = %name, callables = callables.len(), "module loaded");

        Ok(ScriptModule {
            name,
            engine,
            ast,
            timeout: self.config.timeout,
            callables,
        })
    }
}

/// A loaded module: an export name plus a table of zero-argument callables.
///
/// The module owns its engine and compiled AST; callables close over the
/// `ExposedObject` bound at load time and hold no other state.
#[derive(Debug)]
pub struct ScriptModule {
    name: String,
    engine: Engine,
    ast: AST,
    timeout: Duration,
    callables: BTreeMap<String, FnPtr>,
}

impl ScriptModule {
    /// The module's self-reported export name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Callable names in sorted order.
    pub fn callables(&self) -> impl Iterator<Item = &str> {
        self.callables.keys().map(String::as_str)
    }

    /// Invoke a callable by name with zero arguments.
    ///
    /// Return values are discarded; a callable's observable effects travel
    /// through the host API. An error thrown past a callable (one that does
    /// not guard its own body) propagates to the caller here, and the host
    /// decides how severe that is.
    pub fn invoke(&mut self, name: &str) -> Result<()> {
        let Some(fn_ptr) = self.callables.get(name).cloned() else {
            return Err(Error::CallableNotFound {
                module: self.name.clone(),
                name: name.to_string(),
            });
        };
        debug!(module = %self.name, callable = %name, "invoking");
        arm_timeout(&mut self.engine, self.timeout);
        fn_ptr
            .call::<Dynamic>(&self.engine, &self.ast, ())
            .map_err(Error::from)?;
        Ok(())
    }
}
