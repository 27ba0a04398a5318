//! Route guard and navigation.
//!
//! Every navigation attempt runs the same sequence:
//!
//! 1. reload persisted tokens into the session store
//! 2. resolve the target against the route table, following route redirects
//! 3. evaluate the guard:
//!    - route requires auth and the session is not authenticated → `/login`
//!    - route requires admin and the session lacks the admin role → `/`
//!    - session is authenticated and the target is `/login` → `/`
//!    - otherwise proceed
//!
//! Guard redirects are navigations themselves, so they are resolved and
//! guarded again until a route is let through.

use novelhub_session::SessionStore;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::route::{ResolvedRoute, RouteDescriptor, flatten, normalize_path};
use crate::table::{HOME, LOGIN, default_routes};

/// Redirect hops allowed before a navigation is abandoned.
pub const MAX_REDIRECTS: usize = 8;

/// Result of evaluating the guard for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Navigation may reach the target.
    Proceed,
    /// Navigation must go to this path instead.
    Redirect(&'static str),
}

/// A completed navigation.
#[derive(Debug, Clone, Serialize)]
pub struct Navigation {
    /// Path or name that was asked for.
    pub requested: String,
    /// Route the navigation ended on.
    pub route: ResolvedRoute,
    /// Paths passed through before reaching `route`, in order.
    pub redirects: Vec<String>,
}

impl Navigation {
    /// First path of the chain if the navigation did not land where asked.
    pub fn redirected_from(&self) -> Option<&str> {
        self.redirects.first().map(String::as_str)
    }

    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Route table plus guard.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<RouteDescriptor>,
    flat: Vec<ResolvedRoute>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(default_routes())
    }
}

impl Router {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        let flat = flatten(&routes);
        Self { routes, flat }
    }

    /// The route tree as configured.
    pub fn descriptors(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Every route, parents before children.
    pub fn routes(&self) -> &[ResolvedRoute] {
        &self.flat
    }

    /// Resolve a target given as an absolute path or a route name.
    pub fn resolve(&self, target: &str) -> Result<ResolvedRoute> {
        let found = if target.starts_with('/') {
            let path = normalize_path(target);
            self.flat.iter().find(|r| r.path == path)
        } else {
            self.flat.iter().find(|r| r.name == target)
        };
        found
            .cloned()
            .ok_or_else(|| Error::NotFound(target.to_string()))
    }

    /// Evaluate the guard for a resolved route against session flags.
    pub fn check(route: &ResolvedRoute, authenticated: bool, is_admin: bool) -> GuardOutcome {
        if route.meta.requires_auth && !authenticated {
            return GuardOutcome::Redirect(LOGIN);
        }
        if route.meta.requires_admin && !is_admin {
            return GuardOutcome::Redirect(HOME);
        }
        if authenticated && route.path == LOGIN {
            return GuardOutcome::Redirect(HOME);
        }
        GuardOutcome::Proceed
    }

    /// Reload persisted tokens, then evaluate the guard for `to`.
    pub fn guard(&self, session: &SessionStore, to: &ResolvedRoute) -> GuardOutcome {
        if let Err(e) = session.load_stored_token() {
            tracing::warn!("Could not reload stored session: {}", e);
        }
        Self::check(to, session.is_authenticated(), session.is_admin())
    }

    /// Navigate to a path or route name, following redirects.
    pub fn navigate(&self, session: &SessionStore, target: &str) -> Result<Navigation> {
        let mut route = self.resolve(target)?;
        let mut redirects = Vec::new();

        loop {
            if redirects.len() > MAX_REDIRECTS {
                return Err(Error::RedirectLoop(target.to_string()));
            }

            if let Some(next) = route.redirect.clone() {
                redirects.push(route.path.clone());
                route = self.resolve(&next)?;
                continue;
            }

            match self.guard(session, &route) {
                GuardOutcome::Proceed => {
                    tracing::debug!(requested = target, path = %route.path, "Navigation allowed");
                    return Ok(Navigation {
                        requested: target.to_string(),
                        route,
                        redirects,
                    });
                }
                GuardOutcome::Redirect(next) => {
                    tracing::debug!(from = %route.path, to = next, "Guard redirect");
                    redirects.push(route.path.clone());
                    route = self.resolve(next)?;
                }
            }
        }
    }
}
