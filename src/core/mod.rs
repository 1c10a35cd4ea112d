pub mod config;
pub mod error;
pub mod libraries;
pub mod platform;
pub mod telemetry;

use std::any::Any;

/// Payloads, results and metadata values are plain JSON values.
pub type NodeValue = serde_json::Value;

/// A helper trait that just provides the `as_any` method.
/// Lets callers downcast a `Box<dyn Platform>` loaded by name back to its
/// concrete backend.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
