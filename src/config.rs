use std::time::Duration;

/// Limits and configuration for module loading and callable invocation.
///
/// The timeout applies per evaluation: one module load or one callable
/// invocation each gets the full budget.
#[derive(Debug, Clone)]
pub struct ScriptConfig {
    /// Wall-clock budget for a single load or invocation.
    pub timeout: Duration,
    /// Maximum number of engine operations (0 disables the cap).
    pub max_operations: u64,
    /// Maximum call stack depth.
    pub max_call_levels: usize,
    /// Maximum expression nesting depth.
    pub max_expr_depth: usize,
    /// Maximum expression nesting depth inside functions.
    pub max_function_expr_depth: usize,
    /// Maximum size of any string value.
    pub max_string_size: usize,
    /// Maximum size of any array.
    pub max_array_size: usize,
    /// Maximum size of any object map.
    pub max_map_size: usize,
    /// Maximum number of variables in scope.
    pub max_variables: usize,
    /// Maximum number of script functions.
    pub max_functions: usize,
    /// Maximum number of modules a script may load.
    pub max_modules: usize,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        // Module bodies only declare an object of callables, and callables
        // run one-shot forwarding calls; generous limits would just delay
        // detection of a runaway script.
        Self {
            timeout: Duration::from_secs(5),
            max_operations: 500_000,
            max_call_levels: 32,
            max_expr_depth: 64,
            max_function_expr_depth: 32,
            max_string_size: 100_000,
            max_array_size: 10_000,
            max_map_size: 10_000,
            max_variables: 1_000,
            max_functions: 256,
            max_modules: 4,
        }
    }
}
