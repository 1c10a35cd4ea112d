use super::debug::{DEBUG_PLATFORM, DebugPlatform};
use super::{Platform, PlatformArgs};
use crate::core::error::{PlatformError, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a platform from its instantiation args.
pub type PlatformFactory = Arc<dyn Fn(PlatformArgs) -> Box<dyn Platform> + Send + Sync>;

/// Catalogue of engine platforms, looked up by name.
#[derive(Clone)]
pub struct PlatformManager {
    factories: HashMap<String, PlatformFactory>,
}

impl PlatformManager {
    /// A manager with the debug platform registered.
    pub fn new() -> Self {
        let mut manager = Self::empty();
        manager.register(DEBUG_PLATFORM, |args| Box::new(DebugPlatform::new(args)));
        manager
    }

    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers `factory` under `name`. A later registration with the same
    /// name replaces the earlier one.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(PlatformArgs) -> Box<dyn Platform> + Send + Sync + 'static,
    {
        if self.factories.contains_key(name) {
            log::warn!(
                "Warning: Platform {} was already registered, Overwriting key {}.",
                name,
                name
            );
        }
        self.factories.insert(name.to_string(), Arc::new(factory));
    }

    /// Registered platform names, sorted.
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Instantiates the platform registered under `name`.
    pub fn load(&self, name: &str, args: PlatformArgs) -> Result<Box<dyn Platform>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| PlatformError::UnknownPlatform {
                name: name.to_string(),
            })?;
        log::debug!("Loading platform {}", name);
        Ok(factory(args))
    }
}

impl Default for PlatformManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlatformManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformManager")
            .field("platforms", &self.available())
            .finish()
    }
}
