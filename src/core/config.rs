use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// How strictly a platform enforces the build hook ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePolicy {
    /// Out-of-order hooks fail with `InvalidLifecycleTransition`.
    #[default]
    Strict,
    /// Out-of-order hooks are logged and accepted.
    Permissive,
}

/// Options shared by every platform implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub lifecycle: LifecyclePolicy,
}

impl PlatformConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lifecycle(mut self, lifecycle: LifecyclePolicy) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Parses a config from JSON, e.g. `{"lifecycle": "permissive"}`.
    /// Missing fields fall back to their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
