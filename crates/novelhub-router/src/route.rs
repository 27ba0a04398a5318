//! Route descriptors and path resolution.

use serde::Serialize;

/// Access requirements attached to a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    /// Navigation requires an authenticated session.
    pub requires_auth: bool,
    /// Navigation requires the admin role.
    pub requires_admin: bool,
}

impl RouteMeta {
    /// Combine with a child's meta. Requirements are inherited, never relaxed.
    pub fn merge(self, child: RouteMeta) -> RouteMeta {
        RouteMeta {
            requires_auth: self.requires_auth || child.requires_auth,
            requires_admin: self.requires_admin || child.requires_admin,
        }
    }
}

/// Static description of one route and its nested routes.
///
/// Child paths without a leading `/` are relative to the parent's path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    pub meta: RouteMeta,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            redirect: None,
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    pub fn requires_admin(mut self) -> Self {
        self.meta.requires_admin = true;
        self
    }

    /// Send navigations to this route on to `target` (a path).
    pub fn redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    pub fn children(mut self, children: Vec<RouteDescriptor>) -> Self {
        self.children = children;
        self
    }
}

/// A route matched against a concrete path, with inherited meta applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    /// Absolute path of the route.
    pub path: String,
    /// Name of the matched (innermost) route.
    pub name: String,
    /// Redirect target of the matched route, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    /// Meta merged over every matched ancestor.
    pub meta: RouteMeta,
    /// Names of the matched routes, outermost first.
    pub matched: Vec<String>,
}

/// Normalize a requested path: drop query/fragment and trailing slashes.
pub(crate) fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn join_path(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        return normalize_path(child);
    }
    normalize_path(&format!("{}/{}", parent.trim_end_matches('/'), child))
}

/// Flatten a route tree into resolved routes, parents before children.
pub(crate) fn flatten(routes: &[RouteDescriptor]) -> Vec<ResolvedRoute> {
    let mut out = Vec::new();
    flatten_into(routes, "/", RouteMeta::default(), &[], &mut out);
    out
}

fn flatten_into(
    routes: &[RouteDescriptor],
    parent_path: &str,
    parent_meta: RouteMeta,
    parent_matched: &[String],
    out: &mut Vec<ResolvedRoute>,
) {
    for route in routes {
        let path = join_path(parent_path, &route.path);
        let meta = parent_meta.merge(route.meta);
        let mut matched = parent_matched.to_vec();
        matched.push(route.name.clone());

        out.push(ResolvedRoute {
            path: path.clone(),
            name: route.name.clone(),
            redirect: route.redirect.as_deref().map(normalize_path),
            meta,
            matched: matched.clone(),
        });

        flatten_into(&route.children, &path, meta, &matched, out);
    }
}
