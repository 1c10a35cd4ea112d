use crate::core::NodeValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

/// A single structured record of a hook or dispatch call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub timestamp: DateTime<Utc>,
    pub build_id: Uuid,
    pub component: String,
    pub method: String,
    pub arguments: NodeValue,
    /// Set when the call was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DiagnosticRecord {
    pub fn new(
        build_id: Uuid,
        component: impl Into<String>,
        method: impl Into<String>,
        arguments: NodeValue,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            build_id,
            component: component.into(),
            method: method.into(),
            arguments,
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn is_rejected(&self) -> bool {
        self.error.is_some()
    }
}

/// Sink for diagnostic records.
///
/// Implementations must not panic; a sink that cannot store a record drops it.
pub trait Diagnostics: Send + Sync {
    fn record(&self, entry: DiagnosticRecord);
    fn flush(&self);
}

/// Simple in-memory collector for diagnostic records.
#[derive(Default)]
pub struct MemoryDiagnostics {
    records: Mutex<Vec<DiagnosticRecord>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_records(&self) -> Vec<DiagnosticRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Method names in recording order, handy for asserting call sequences.
    pub fn methods(&self) -> Vec<String> {
        self.get_records().into_iter().map(|r| r.method).collect()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn record(&self, entry: DiagnosticRecord) {
        match self.records.lock() {
            Ok(mut records) => records.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }

    fn flush(&self) {
        // No-op for memory collector
    }
}
