use thiserror::Error;

use crate::core::platform::lifecycle::{BuildState, Hook};

/// Errors a communication function may report back through `send_data`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LibraryError {
    #[error("Function {function} cannot handle payload: {reason}")]
    InvalidPayload { function: String, reason: String },

    #[error("Function {function} failed: {reason}")]
    Failed { function: String, reason: String },
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Function {} is not supported by node {node}.", .function.as_deref().unwrap_or("<none requested>"))]
    UnsupportedFunction {
        function: Option<String>,
        node: String,
    },

    #[error("Hook {hook} is not valid while the platform is {state}")]
    InvalidLifecycleTransition { hook: Hook, state: BuildState },

    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    #[error("Unknown platform: {name}")]
    UnknownPlatform { name: String },

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_function_message_names_key_and_node() {
        let err = PlatformError::UnsupportedFunction {
            function: Some("ssh_cmd".to_string()),
            node: "sw1".to_string(),
        };
        assert_eq!(err.to_string(), "Function ssh_cmd is not supported by node sw1.");
    }

    #[test]
    fn test_unsupported_function_without_request() {
        let err = PlatformError::UnsupportedFunction {
            function: None,
            node: "hs1".to_string(),
        };
        assert!(err.to_string().contains("<none requested>"));
    }

    #[test]
    fn test_library_error_converts() {
        let err: PlatformError = LibraryError::Failed {
            function: "echo".to_string(),
            reason: "boom".to_string(),
        }
        .into();
        assert!(matches!(err, PlatformError::Library(_)));
    }
}
