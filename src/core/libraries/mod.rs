//! Communication libraries and the per-node function registry built from them.
//!
//! A [`Library`] is a named bundle of [`CommFunction`]s. Libraries are
//! discovered through a [`LibrarySource`]; every node snapshots the source once,
//! at construction, into its own [`FunctionRegistry`].

pub mod registry;

use crate::core::NodeValue;
use crate::core::error::LibraryError;
use std::fmt;
use std::sync::{Arc, RwLock};

/// The uniform signature of a communication function: one payload in, one result out.
pub type CommCallable = dyn Fn(NodeValue) -> Result<NodeValue, LibraryError> + Send + Sync;

/// A named, invocable communication function.
#[derive(Clone)]
pub struct CommFunction {
    name: String,
    callable: Arc<CommCallable>,
}

impl CommFunction {
    pub fn new<F>(name: impl Into<String>, callable: F) -> Self
    where
        F: Fn(NodeValue) -> Result<NodeValue, LibraryError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            callable: Arc::new(callable),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, payload: NodeValue) -> Result<NodeValue, LibraryError> {
        (self.callable)(payload)
    }

    /// True when both handles point at the same registered callable.
    pub fn same_callable(&self, other: &CommFunction) -> bool {
        Arc::ptr_eq(&self.callable, &other.callable)
    }
}

impl fmt::Debug for CommFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommFunction").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A communication library: a name plus its functions in registration order.
#[derive(Debug, Clone)]
pub struct Library {
    pub name: String,
    pub functions: Vec<CommFunction>,
}

impl Library {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
        }
    }

    /// Appends a function to the library.
    pub fn function<F>(mut self, name: impl Into<String>, callable: F) -> Self
    where
        F: Fn(NodeValue) -> Result<NodeValue, LibraryError> + Send + Sync + 'static,
    {
        self.functions.push(CommFunction::new(name, callable));
        self
    }

    pub fn with(mut self, function: CommFunction) -> Self {
        self.functions.push(function);
        self
    }
}

/// Anything that can enumerate the currently discoverable libraries.
///
/// Reads must not mutate the source; platforms call this from
/// `add_node` and may share one source across many builds.
pub trait LibrarySource: Send + Sync {
    /// Libraries in discovery order.
    fn libraries(&self) -> Vec<Library>;
}

impl LibrarySource for Vec<Library> {
    fn libraries(&self) -> Vec<Library> {
        self.clone()
    }
}

/// An in-process, append-only catalogue of libraries.
///
/// Clones share the same catalogue. Registrations are seen by nodes created
/// afterwards; existing nodes keep the snapshot they were built from.
#[derive(Clone, Default)]
pub struct LibraryCatalog {
    libraries: Arc<RwLock<Vec<Library>>>,
}

impl LibraryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, library: Library) {
        log::debug!(
            "Registering library {} with {} function(s)",
            library.name,
            library.functions.len()
        );
        match self.libraries.write() {
            Ok(mut libraries) => libraries.push(library),
            Err(poisoned) => poisoned.into_inner().push(library),
        }
    }

    /// Builder-style registration.
    pub fn with(self, library: Library) -> Self {
        self.register(library);
        self
    }

    pub fn len(&self) -> usize {
        match self.libraries.read() {
            Ok(libraries) => libraries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LibrarySource for LibraryCatalog {
    fn libraries(&self) -> Vec<Library> {
        match self.libraries.read() {
            Ok(libraries) => libraries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl fmt::Debug for LibraryCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.libraries().into_iter().map(|l| l.name).collect();
        f.debug_struct("LibraryCatalog").field("libraries", &names).finish()
    }
}
