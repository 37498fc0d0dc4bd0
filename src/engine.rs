use std::time::{Duration, Instant};

use rhai::{
    Dynamic, Engine,
    default_limits::MAX_STRINGS_INTERNED,
    packages::{Package, StandardPackage},
};

use crate::{config::ScriptConfig, error::Error};

pub(crate) fn build_engine(config: &ScriptConfig) -> Engine {
    let mut engine = Engine::new_raw();
    engine.register_global_module(StandardPackage::new().as_shared_module());

    engine.set_max_strings_interned(MAX_STRINGS_INTERNED);
    engine.set_strict_variables(true);
    engine.set_fail_on_invalid_map_property(true);

    engine.set_max_operations(config.max_operations);
    engine.set_max_call_levels(config.max_call_levels);
    engine.set_max_expr_depths(config.max_expr_depth, config.max_function_expr_depth);
    engine.set_max_string_size(config.max_string_size);
    engine.set_max_array_size(config.max_array_size);
    engine.set_max_map_size(config.max_map_size);
    engine.set_max_variables(config.max_variables);
    engine.set_max_functions(config.max_functions);
    engine.set_max_modules(config.max_modules);

    engine
}

/// Give the engine a fresh wall-clock budget.
///
/// Must be called before every evaluation; a previously installed hook keeps
/// its old start instant and would trip immediately.
pub(crate) fn arm_timeout(engine: &mut Engine, timeout: Duration) {
    let start = Instant::now();
    let ms = timeout.as_millis() as u64;
    engine.on_progress(move |_| {
        if start.elapsed() > timeout {
            Some(Dynamic::from(Error::Timeout { ms }))
        } else {
            None
        }
    });
}
