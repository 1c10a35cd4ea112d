use crate::core::config::LifecyclePolicy;
use crate::core::error::{PlatformError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a platform is in its build sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildState {
    Created,
    PreBuilt,
    Building,
    PostBuilt,
    Destroyed,
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildState::Created => "created",
            BuildState::PreBuilt => "pre_built",
            BuildState::Building => "building",
            BuildState::PostBuilt => "post_built",
            BuildState::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

/// The hooks a topology builder calls on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    PreBuild,
    AddNode,
    AddBiport,
    AddBilink,
    PostBuild,
    Destroy,
}

impl Hook {
    pub fn name(&self) -> &'static str {
        match self {
            Hook::PreBuild => "pre_build",
            Hook::AddNode => "add_node",
            Hook::AddBiport => "add_biport",
            Hook::AddBilink => "add_bilink",
            Hook::PostBuild => "post_build",
            Hook::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl BuildState {
    /// The state after `hook`, or `None` if `hook` is not valid here.
    ///
    /// `post_build` is also accepted straight after `pre_build` so that a
    /// topology without nodes can finish its build.
    pub fn next(self, hook: Hook) -> Option<BuildState> {
        use BuildState::*;
        match (self, hook) {
            (Created, Hook::PreBuild) => Some(PreBuilt),
            (PreBuilt | Building, Hook::AddNode) => Some(Building),
            (Building, Hook::AddBiport | Hook::AddBilink) => Some(Building),
            (PreBuilt | Building, Hook::PostBuild) => Some(PostBuilt),
            (Destroyed, Hook::Destroy) => None,
            (_, Hook::Destroy) => Some(Destroyed),
            _ => None,
        }
    }
}

/// Tracks a platform's build state and applies its ordering policy.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: BuildState,
    policy: LifecyclePolicy,
}

impl Lifecycle {
    pub fn new(policy: LifecyclePolicy) -> Self {
        Self {
            state: BuildState::Created,
            policy,
        }
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn policy(&self) -> LifecyclePolicy {
        self.policy
    }

    /// Moves to the state following `hook`.
    ///
    /// Under the permissive policy an out-of-order hook is accepted but leaves
    /// the state where it was, so `Destroyed` stays terminal.
    pub fn advance(&mut self, hook: Hook) -> Result<BuildState> {
        match (self.state.next(hook), self.policy) {
            (Some(next), _) => {
                self.state = next;
                Ok(next)
            }
            (None, LifecyclePolicy::Strict) => Err(PlatformError::InvalidLifecycleTransition {
                hook,
                state: self.state,
            }),
            (None, LifecyclePolicy::Permissive) => {
                log::warn!(
                    "Accepting out-of-order hook {} while {} (permissive lifecycle)",
                    hook,
                    self.state
                );
                Ok(self.state)
            }
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new(LifecyclePolicy::default())
    }
}
