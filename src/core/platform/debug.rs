//! Debug engine platform.
//!
//! Builds nothing. Every hook is logged and recorded, commands are echoed back
//! and data is dispatched straight to the node's communication functions.

use super::lifecycle::{BuildState, Hook, Lifecycle};
use super::{
    BiportSpec, BilinkSpec, DescriptionHandle, NodePort, NodeSpec, Platform, PlatformArgs,
    PlatformNode,
};
use crate::core::NodeValue;
use crate::core::error::{PlatformError, Result};
use crate::core::libraries::LibrarySource;
use crate::core::libraries::registry::FunctionRegistry;
use crate::core::telemetry::{DiagnosticRecord, Diagnostics};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Name the debug platform is registered under.
pub const DEBUG_PLATFORM: &str = "debug";

/// Emits a diagnostic for a call: a debug log line, plus a structured record
/// when a sink is attached.
#[derive(Clone)]
struct Tracer {
    build_id: Uuid,
    sink: Option<Arc<dyn Diagnostics>>,
}

impl Tracer {
    fn emit(&self, component: &str, method: &str, arguments: NodeValue) {
        self.record(DiagnosticRecord::new(self.build_id, component, method, arguments));
    }

    fn record(&self, entry: DiagnosticRecord) {
        if let Some(sink) = &self.sink {
            sink.record(entry);
        }
    }
}

/// Platform that builds a topology for debugging.
pub struct DebugPlatform {
    timestamp: DateTime<Utc>,
    description: DescriptionHandle,
    libraries: Arc<dyn LibrarySource>,
    lifecycle: Lifecycle,
    tracer: Tracer,
}

impl DebugPlatform {
    pub fn new(args: PlatformArgs) -> Self {
        let PlatformArgs {
            timestamp,
            description,
            config,
            libraries,
            diagnostics,
        } = args;

        Self {
            timestamp,
            description,
            libraries,
            lifecycle: Lifecycle::new(config.lifecycle),
            tracer: Tracer {
                build_id: Uuid::new_v4(),
                sink: diagnostics,
            },
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn description(&self) -> &DescriptionHandle {
        &self.description
    }

    /// Random id shared by every diagnostic record of this build.
    pub fn build_id(&self) -> Uuid {
        self.tracer.build_id
    }

    /// Applies the lifecycle rule for `hook` and records the call, rejected or not.
    fn hook(&mut self, hook: Hook, arguments: NodeValue) -> Result<()> {
        let outcome = self.lifecycle.advance(hook);
        let mut entry =
            DiagnosticRecord::new(self.tracer.build_id, "DebugPlatform", hook.name(), arguments);
        if let Err(err) = &outcome {
            log::debug!("[HOOK] {} rejected: {}", hook, err);
            entry = entry.with_error(err.to_string());
        }
        self.tracer.record(entry);
        outcome.map(|_| ())
    }
}

impl Platform for DebugPlatform {
    fn pre_build(&mut self) -> Result<()> {
        log::debug!("[HOOK] pre_build()");
        self.hook(Hook::PreBuild, json!([]))
    }

    fn add_node(&mut self, node: &NodeSpec) -> Result<Box<dyn PlatformNode>> {
        log::debug!("[HOOK] add_node({})", node);
        self.hook(Hook::AddNode, json!([node.identifier]))?;
        let created = DebugNode::new(node, self.libraries.as_ref()).with_tracer(self.tracer.clone());
        Ok(Box::new(created))
    }

    fn add_biport(&mut self, node: &NodeSpec, biport: &BiportSpec) -> Result<()> {
        log::debug!("[HOOK] add_biport({}, {})", node, biport);
        self.hook(Hook::AddBiport, json!([node.identifier, biport.identifier]))
    }

    fn add_bilink(
        &mut self,
        nodeport_a: NodePort<'_>,
        nodeport_b: NodePort<'_>,
        bilink: &BilinkSpec,
    ) -> Result<()> {
        log::debug!("[HOOK] add_bilink({}, {}, {})", nodeport_a, nodeport_b, bilink);
        self.hook(
            Hook::AddBilink,
            json!([
                nodeport_a.to_string(),
                nodeport_b.to_string(),
                bilink.identifier
            ]),
        )
    }

    fn post_build(&mut self) -> Result<()> {
        log::debug!("[HOOK] post_build()");
        self.hook(Hook::PostBuild, json!([]))
    }

    fn destroy(&mut self) -> Result<()> {
        log::debug!("[HOOK] destroy()");
        self.hook(Hook::Destroy, json!([]))?;
        if let Some(sink) = &self.tracer.sink {
            sink.flush();
        }
        Ok(())
    }

    fn state(&self) -> BuildState {
        self.lifecycle.state()
    }
}

/// Engine node for debugging.
pub struct DebugNode {
    identifier: String,
    name: Option<String>,
    metadata: HashMap<String, NodeValue>,
    functions: FunctionRegistry,
    tracer: Tracer,
}

impl DebugNode {
    /// Creates a node from its spec, snapshotting every library `libraries`
    /// currently exposes.
    pub fn new(spec: &NodeSpec, libraries: &dyn LibrarySource) -> Self {
        Self {
            identifier: spec.identifier.clone(),
            name: spec.name.clone(),
            metadata: spec.metadata.clone(),
            functions: FunctionRegistry::from_source(libraries),
            tracer: Tracer {
                build_id: Uuid::nil(),
                sink: None,
            },
        }
    }

    fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }
}

impl PlatformNode for DebugNode {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn metadata(&self) -> &HashMap<String, NodeValue> {
        &self.metadata
    }

    fn send_command(&self, command: &str, shell: Option<&str>) -> Result<String> {
        log::debug!("{}.send_command({}, shell={:?})", self, command, shell);
        self.tracer.emit(
            "DebugNode",
            "send_command",
            json!({ "node": self.identifier, "command": command, "shell": shell }),
        );
        Ok(command.to_string())
    }

    fn available_shells(&self) -> Vec<String> {
        log::debug!("{}.available_shells()", self);
        self.tracer
            .emit("DebugNode", "available_shells", json!({ "node": self.identifier }));
        Vec::new()
    }

    fn send_data(&self, data: NodeValue, function: Option<&str>) -> Result<NodeValue> {
        log::debug!("{}.send_data(data={}, function={:?})", self, data, function);
        self.tracer.emit(
            "DebugNode",
            "send_data",
            json!({ "node": self.identifier, "data": data, "function": function }),
        );

        let resolved = match function {
            None => self.functions.first(),
            Some(key) => self.functions.get(key).map(|f| (key, f)),
        };
        let (key, entry) = resolved.ok_or_else(|| PlatformError::UnsupportedFunction {
            function: function.map(str::to_string),
            node: self.identifier.clone(),
        })?;

        log::debug!("{} dispatching to {}", self, key);
        Ok(entry.call(data)?)
    }

    fn available_functions(&self) -> Vec<String> {
        log::debug!("{}.available_functions()", self);
        self.tracer
            .emit("DebugNode", "available_functions", json!({ "node": self.identifier }));
        self.functions.keys().map(str::to_string).collect()
    }
}

impl fmt::Display for DebugNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metadata: serde_json::Map<String, NodeValue> = self
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        write!(
            f,
            "DebugNode(identifier={}, metadata={})",
            self.identifier,
            NodeValue::Object(metadata)
        )
    }
}
