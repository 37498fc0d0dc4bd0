use std::sync::Arc;

use rhai::{EvalAltResult, ParseError, Position};
use serde::{Deserialize, Serialize};

/// Result alias using the crate error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from loading a script module or invoking its callables.
///
/// `Clone` is required because the timeout hook smuggles an [`Error`] through
/// the engine as a `Dynamic` token.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The module source failed to compile.
    #[error("Parse error: {0}")]
    Parse(ParseError),

    /// The module body or a callable failed at runtime.
    #[error("Runtime error: {0}")]
    Runtime(Arc<EvalAltResult>),

    /// Evaluation exceeded the configured wall-clock budget.
    #[error("Script timed out after {ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds.
        ms: u64,
    },

    /// The module body did not finish with an export-name string.
    #[error("Resolution error: module result is {0}, not an export name string")]
    ExportName(String),

    /// The self-reported export name matches no top-level variable.
    #[error("Resolution error: no top-level variable named '{name}'")]
    ExportNotFound {
        /// The export name the module reported.
        name: String,
    },

    /// The exported variable is not an object.
    #[error("Resolution error: '{name}' is not an object of callables")]
    NotCallable {
        /// The export name the module reported.
        name: String,
    },

    /// Invocation named a callable the module does not define.
    #[error("No callable named '{name}' in module '{module}'")]
    CallableNotFound {
        /// The module's export name.
        module: String,
        /// The requested callable.
        name: String,
    },
}

/// Serializable report of a load or invocation failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Short error category.
    pub error_type: String,
    /// Human-readable error message.
    pub message: String,
    /// Location in the script, when available.
    pub location: Option<String>,
}

impl Error {
    /// Classify the error for serialized host-side reporting.
    pub fn info(&self) -> ErrorInfo {
        let (error_type, location) = match self {
            Error::Parse(err) => ("parse", format_location(err.position())),
            Error::Runtime(err) => ("runtime", format_location(err.position())),
            Error::Timeout { .. } => ("timeout", None),
            Error::ExportName(_) | Error::ExportNotFound { .. } | Error::NotCallable { .. } => {
                ("resolution", None)
            }
            Error::CallableNotFound { .. } => ("invocation", None),
        };
        ErrorInfo {
            error_type: error_type.to_string(),
            message: self.to_string(),
            location,
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<Box<EvalAltResult>> for Error {
    fn from(err: Box<EvalAltResult>) -> Self {
        // A timeout surfaces as a termination token carrying our own error;
        // unwrap it so callers see `Error::Timeout` instead of a generic
        // runtime failure.
        match err.as_ref() {
            EvalAltResult::ErrorTerminated(token, _) | EvalAltResult::ErrorRuntime(token, _) => {
                if let Some(inner) = token.clone().try_cast::<Error>() {
                    return inner;
                }
            }
            _ => {}
        }
        Error::Runtime(Arc::from(err))
    }
}

fn format_location(pos: Position) -> Option<String> {
    pos.line().map(|line| format!("line {line}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_classified_as_timeout() {
        let info = Error::Timeout { ms: 250 }.info();
        assert_eq!(info.error_type, "timeout");
        assert_eq!(info.message, "Script timed out after 250ms");
        assert!(info.location.is_none());
    }

    #[test]
    fn resolution_errors_share_a_category() {
        let missing = Error::ExportNotFound {
            name: "Main".to_string(),
        };
        let not_callable = Error::NotCallable {
            name: "Main".to_string(),
        };
        assert_eq!(missing.info().error_type, "resolution");
        assert_eq!(not_callable.info().error_type, "resolution");
        assert!(not_callable.to_string().contains("'Main'"));
    }

    #[test]
    fn error_info_round_trips_through_json() {
        let info = Error::CallableNotFound {
            module: "Main".to_string(),
            name: "Fourth".to_string(),
        }
        .info();
        let json = serde_json::to_string(&info).unwrap();
        let parsed: ErrorInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.error_type, "invocation");
        assert_eq!(parsed.message, info.message);
    }
}
