//! Maps matched routes to the permission expression guarding them.
//!
//! Every route behind the authorization layer must resolve here; anything
//! unresolved is denied.

use std::str::FromStr;

use axum::http::Method;
use warden_domain::{PermissionRequirement, Resource, ResourceAction};

/// Access rule for one protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePolicy {
    /// Any signed-in user.
    Authenticated,
    /// The effective set must intersect the requirement.
    Requires(PermissionRequirement),
}

/// Resolves the policy for a method and an axum matched path such as
/// `/users/{user_id}/edit`.
pub fn resolve_route_policy(method: &Method, matched_path: &str) -> Option<RoutePolicy> {
    let segments: Vec<&str> = matched_path
        .trim_start_matches('/')
        .split('/')
        .collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["dashboard"]) | ("GET", ["auth", "me"]) => Some(RoutePolicy::Authenticated),
        (_, [resource, rest @ ..]) => {
            let resource = Resource::from_str(resource).ok()?;
            let action = resource_action(method, resource, rest)?;
            Some(RoutePolicy::Requires(action.required_permissions(resource)))
        }
        _ => None,
    }
}

fn resource_action(method: &Method, resource: Resource, rest: &[&str]) -> Option<ResourceAction> {
    let action = match (method.as_str(), rest) {
        ("GET", []) => ResourceAction::Index,
        ("POST", []) => ResourceAction::Store,
        ("GET", ["create"]) => ResourceAction::Create,
        ("GET", [id]) if is_parameter(id) => ResourceAction::Show,
        ("GET", [id, "edit"]) if is_parameter(id) => ResourceAction::Edit,
        ("PUT" | "PATCH", [id]) if is_parameter(id) => ResourceAction::Update,
        ("PUT", [id, association])
            if is_parameter(id) && *association == association_segment(resource) =>
        {
            ResourceAction::Update
        }
        ("DELETE", [id]) if is_parameter(id) => ResourceAction::Destroy,
        _ => return None,
    };

    Some(action)
}

/// Sync endpoint segment: roles hold permissions, users hold roles.
fn association_segment(resource: Resource) -> &'static str {
    match resource {
        Resource::Roles => "permissions",
        Resource::Users => "roles",
    }
}

fn is_parameter(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}
