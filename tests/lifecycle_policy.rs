//! The debug platform enforces the build order strictly unless configured
//! to be permissive.

use std::sync::Arc;
use topology_platform::prelude::*;

fn debug_platform(policy: LifecyclePolicy) -> DebugPlatform {
    let config = PlatformConfig::new().with_lifecycle(policy);
    DebugPlatform::new(PlatformArgs::new(chrono::Utc::now(), Arc::new(())).with_config(config))
}

fn is_invalid_transition<T>(result: Result<T, PlatformError>) -> bool {
    matches!(result, Err(PlatformError::InvalidLifecycleTransition { .. }))
}

#[test]
fn test_strict_rejects_hooks_before_pre_build() {
    let node = NodeSpec::new("sw1");
    let port = BiportSpec::new("1");
    let link = BilinkSpec::new("l1");

    let mut platform = debug_platform(LifecyclePolicy::Strict);
    assert!(is_invalid_transition(platform.add_node(&node)));
    assert!(is_invalid_transition(platform.add_biport(&node, &port)));
    assert!(is_invalid_transition(platform.add_bilink(
        NodePort::new(&node, &port),
        NodePort::new(&node, &port),
        &link
    )));
    assert!(is_invalid_transition(platform.post_build()));
    assert_eq!(platform.state(), BuildState::Created);

    // destroy is valid from any live state
    assert!(platform.destroy().is_ok());
}

#[test]
fn test_strict_rejects_additions_after_post_build() {
    let node = NodeSpec::new("sw1");
    let port = BiportSpec::new("1");
    let link = BilinkSpec::new("l1");

    let mut platform = debug_platform(LifecyclePolicy::Strict);
    platform.pre_build().unwrap();
    platform.add_node(&node).unwrap();
    platform.post_build().unwrap();

    assert!(is_invalid_transition(platform.pre_build()));
    assert!(is_invalid_transition(platform.add_node(&node)));
    assert!(is_invalid_transition(platform.add_biport(&node, &port)));
    assert!(is_invalid_transition(platform.add_bilink(
        NodePort::new(&node, &port),
        NodePort::new(&node, &port),
        &link
    )));
    assert!(is_invalid_transition(platform.post_build()));
    assert_eq!(platform.state(), BuildState::PostBuilt);
}

#[test]
fn test_strict_rejects_everything_after_destroy() {
    let node = NodeSpec::new("sw1");
    let port = BiportSpec::new("1");
    let link = BilinkSpec::new("l1");

    let mut platform = debug_platform(LifecyclePolicy::Strict);
    platform.pre_build().unwrap();
    platform.add_node(&node).unwrap();
    platform.post_build().unwrap();
    platform.destroy().unwrap();

    assert!(is_invalid_transition(platform.pre_build()));
    assert!(is_invalid_transition(platform.add_node(&node)));
    assert!(is_invalid_transition(platform.add_biport(&node, &port)));
    assert!(is_invalid_transition(platform.add_bilink(
        NodePort::new(&node, &port),
        NodePort::new(&node, &port),
        &link
    )));
    assert!(is_invalid_transition(platform.post_build()));
    assert!(is_invalid_transition(platform.destroy()));
    assert_eq!(platform.state(), BuildState::Destroyed);
}

#[test]
fn test_strict_error_names_hook_and_state() {
    let mut platform = debug_platform(LifecyclePolicy::Strict);
    let err = platform.post_build().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Hook post_build is not valid while the platform is created"
    );
}

#[test]
fn test_permissive_accepts_every_hook() {
    let node = NodeSpec::new("sw1");
    let port = BiportSpec::new("1");
    let link = BilinkSpec::new("l1");

    let mut platform = debug_platform(LifecyclePolicy::Permissive);
    assert!(platform.add_biport(&node, &port).is_ok());
    assert!(platform.add_node(&node).is_ok());
    assert!(platform
        .add_bilink(NodePort::new(&node, &port), NodePort::new(&node, &port), &link)
        .is_ok());
    assert!(platform.post_build().is_ok());
    assert_eq!(platform.state(), BuildState::Created);
    assert!(platform.destroy().is_ok());
    assert!(platform.destroy().is_ok());
    assert!(platform.add_node(&node).is_ok());
    assert!(platform.pre_build().is_ok());
    assert_eq!(platform.state(), BuildState::Destroyed);
}

#[test]
fn test_permissive_late_additions_keep_build_finished() {
    let node = NodeSpec::new("sw1");
    let port = BiportSpec::new("1");

    let mut platform = debug_platform(LifecyclePolicy::Permissive);
    platform.pre_build().unwrap();
    platform.add_node(&node).unwrap();
    platform.post_build().unwrap();

    assert!(platform.add_biport(&node, &port).is_ok());
    assert!(platform.add_node(&node).is_ok());
    assert_eq!(platform.state(), BuildState::PostBuilt);

    platform.destroy().unwrap();
    assert!(platform.pre_build().is_ok());
    assert_eq!(platform.state(), BuildState::Destroyed);
}

#[test]
fn test_policy_from_json_config() {
    let config = PlatformConfig::from_json(r#"{"lifecycle": "permissive"}"#).unwrap();
    let mut platform = DebugPlatform::new(
        PlatformArgs::new(chrono::Utc::now(), Arc::new(())).with_config(config),
    );
    assert!(platform.add_node(&NodeSpec::new("sw1")).is_ok());
}
