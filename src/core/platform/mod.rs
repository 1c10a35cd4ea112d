//! The engine platform contract.
//!
//! A topology builder drives a [`Platform`] through
//! `pre_build → add_node* → add_biport* → add_bilink* → post_build → destroy`.
//! Every `add_node` returns a [`PlatformNode`] the command layer uses to talk to
//! the instantiated element.

pub mod debug;
pub mod lifecycle;
pub mod manager;

use crate::core::config::PlatformConfig;
use crate::core::error::Result;
use crate::core::libraries::LibrarySource;
use crate::core::telemetry::Diagnostics;
use crate::core::{AsAny, NodeValue};
use chrono::{DateTime, Utc};
use lifecycle::BuildState;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Opaque handle to the topology's description manager. Platforms carry it
/// around but never look inside.
pub type DescriptionHandle = Arc<dyn Any + Send + Sync>;

/// A node as described by the topology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub identifier: String,
    pub name: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, NodeValue>,
}

impl NodeSpec {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for NodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node(identifier={})", self.identifier)
    }
}

/// A bidirectional port as described by the topology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiportSpec {
    pub identifier: String,
    #[serde(default)]
    pub metadata: HashMap<String, NodeValue>,
}

impl BiportSpec {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for BiportSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BiPort(identifier={})", self.identifier)
    }
}

/// A bidirectional link as described by the topology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BilinkSpec {
    pub identifier: String,
    #[serde(default)]
    pub metadata: HashMap<String, NodeValue>,
}

impl BilinkSpec {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for BilinkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BiLink(identifier={})", self.identifier)
    }
}

/// One end of a link: a node together with one of its ports.
#[derive(Debug, Clone, Copy)]
pub struct NodePort<'a> {
    pub node: &'a NodeSpec,
    pub port: &'a BiportSpec,
}

impl<'a> NodePort<'a> {
    pub fn new(node: &'a NodeSpec, port: &'a BiportSpec) -> Self {
        Self { node, port }
    }
}

impl fmt::Display for NodePort<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node.identifier, self.port.identifier)
    }
}

/// Everything a platform receives when it is instantiated.
#[derive(Clone)]
pub struct PlatformArgs {
    pub timestamp: DateTime<Utc>,
    pub description: DescriptionHandle,
    pub config: PlatformConfig,
    pub libraries: Arc<dyn LibrarySource>,
    pub diagnostics: Option<Arc<dyn Diagnostics>>,
}

impl PlatformArgs {
    /// Args with no communication libraries, default config and no diagnostics sink.
    pub fn new(timestamp: DateTime<Utc>, description: DescriptionHandle) -> Self {
        Self {
            timestamp,
            description,
            config: PlatformConfig::default(),
            libraries: Arc::new(Vec::new()),
            diagnostics: None,
        }
    }

    pub fn with_config(mut self, config: PlatformConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_libraries(mut self, libraries: Arc<dyn LibrarySource>) -> Self {
        self.libraries = libraries;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }
}

/// Backend that materializes a topology description.
pub trait Platform: AsAny + Send {
    /// Called once before any element is added.
    fn pre_build(&mut self) -> Result<()>;

    /// Instantiates a node and returns the handle used to talk to it.
    fn add_node(&mut self, node: &NodeSpec) -> Result<Box<dyn PlatformNode>>;

    /// Adds a bidirectional port to a node previously added.
    fn add_biport(&mut self, node: &NodeSpec, biport: &BiportSpec) -> Result<()>;

    /// Links two node ports.
    fn add_bilink(
        &mut self,
        nodeport_a: NodePort<'_>,
        nodeport_b: NodePort<'_>,
        bilink: &BilinkSpec,
    ) -> Result<()>;

    /// Called once the whole topology has been added.
    fn post_build(&mut self) -> Result<()>;

    /// Tears everything down. Terminal.
    fn destroy(&mut self) -> Result<()>;

    fn state(&self) -> BuildState;
}

impl dyn Platform {
    /// Downcasts a platform loaded by name to its concrete backend.
    pub fn downcast_ref<P: Platform + 'static>(&self) -> Option<&P> {
        self.as_any().downcast_ref::<P>()
    }

    pub fn downcast_mut<P: Platform + 'static>(&mut self) -> Option<&mut P> {
        self.as_any_mut().downcast_mut::<P>()
    }
}

/// A topology element instantiated by a platform.
pub trait PlatformNode: fmt::Display + Send + Sync {
    fn identifier(&self) -> &str;

    fn name(&self) -> Option<&str>;

    fn metadata(&self) -> &HashMap<String, NodeValue>;

    /// Runs `command` on `shell`, or on the platform's default shell when `None`.
    fn send_command(&self, command: &str, shell: Option<&str>) -> Result<String>;

    fn available_shells(&self) -> Vec<String>;

    /// Sends `data` through the communication function `function`, or through
    /// the node's default (first registered) function when `None`.
    fn send_data(&self, data: NodeValue, function: Option<&str>) -> Result<NodeValue>;

    /// Function keys in registry order.
    fn available_functions(&self) -> Vec<String>;
}
