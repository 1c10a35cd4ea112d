//! # topology-platform
//!
//! Pluggable engine platforms for a network-topology test framework.
//!
//! A topology description (nodes, bidirectional ports, bidirectional links) is
//! built against a swappable backend, the *platform*, which instantiates the
//! described infrastructure. Nodes created by a platform talk to the outside
//! world through communication functions supplied by independently registered
//! *libraries*.
//!
//! ## Features
//!
//! - **Typed Dispatch**: Library functions share one signature, `NodeValue -> Result<NodeValue, LibraryError>`
//! - **Deterministic Registries**: Function keys (`"<library>_<function>"`) keep discovery order
//! - **Explicit Lifecycle**: `pre_build → add_node → add_biport → add_bilink → post_build → destroy`, strict by default
//! - **Debug Backend**: A no-op platform that logs, records and echoes every call
//!
//! ## Quick Start
//!
//! ```rust
//! use topology_platform::prelude::*;
//! use std::sync::Arc;
//!
//! let libraries = LibraryCatalog::new()
//!     .with(Library::new("ssh").function("echo", |data: NodeValue| Ok(data)));
//!
//! let args = PlatformArgs::new(chrono::Utc::now(), Arc::new(()))
//!     .with_libraries(Arc::new(libraries));
//! let mut platform = PlatformManager::new().load("debug", args).unwrap();
//!
//! platform.pre_build().unwrap();
//! let node = platform
//!     .add_node(&NodeSpec::new("sw1").with_metadata("role", "switch"))
//!     .unwrap();
//! platform.post_build().unwrap();
//!
//! assert_eq!(node.available_functions(), vec!["ssh_echo"]);
//! assert_eq!(node.send_data("hello".into(), None).unwrap(), NodeValue::from("hello"));
//! assert_eq!(node.send_command("show version", None).unwrap(), "show version");
//!
//! platform.destroy().unwrap();
//! ```
//!
//! ## Module Organization
//!
//! - [`libraries`]: Communication libraries, discovery sources and the function registry
//! - [`platform`]: The platform/node contract, lifecycle, debug backend and platform manager
//! - [`prelude`]: Commonly used types and traits (import with `use topology_platform::prelude::*`)

// ============================================================================
// Core Module
// ============================================================================

mod core;

// ============================================================================
// Public Re-exports - Granular Imports
// ============================================================================

pub use crate::core::{AsAny, NodeValue};

pub use crate::core::config::{LifecyclePolicy, PlatformConfig};
pub use crate::core::error::{LibraryError, PlatformError, Result};
pub use crate::core::libraries;
pub use crate::core::platform;
pub use crate::core::telemetry::{DiagnosticRecord, Diagnostics, MemoryDiagnostics};

pub use crate::core::libraries::registry::{FunctionRegistry, function_key};
pub use crate::core::libraries::{CommCallable, CommFunction, Library, LibraryCatalog, LibrarySource};
pub use crate::core::platform::debug::{DEBUG_PLATFORM, DebugNode, DebugPlatform};
pub use crate::core::platform::lifecycle::{BuildState, Hook, Lifecycle};
pub use crate::core::platform::manager::{PlatformFactory, PlatformManager};
pub use crate::core::platform::{
    BilinkSpec, BiportSpec, DescriptionHandle, NodePort, NodeSpec, Platform, PlatformArgs,
    PlatformNode,
};

// ============================================================================
// Prelude Module - Convenient Bulk Imports
// ============================================================================

/// The main prelude: imports everything needed to drive a platform.
///
/// # Example
/// ```rust
/// use topology_platform::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        // Platforms
        BilinkSpec,
        BiportSpec,
        BuildState,
        // Libraries
        CommFunction,
        DebugNode,
        DebugPlatform,
        // Diagnostics
        DiagnosticRecord,
        Diagnostics,
        Library,
        LibraryCatalog,
        LibraryError,
        LibrarySource,
        // Configuration
        LifecyclePolicy,
        MemoryDiagnostics,
        NodePort,
        NodeSpec,
        // Core
        NodeValue,
        Platform,
        PlatformArgs,
        PlatformConfig,
        PlatformError,
        PlatformManager,
        PlatformNode,
    };
}

// ============================================================================
// Re-export commonly used external types for convenience
// ============================================================================

pub use serde_json::Value as JsonValue;

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");
