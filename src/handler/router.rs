//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Routing is by path only; the
//! hash endpoint does not enforce a method, matching the downstream
//! contract of the credential-leak-checking flow.

use http_body_util::Full;
use hyper::body::{Body, Bytes, Incoming};
use hyper::{Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::{Config, RoutesConfig};
use crate::handler::hasher;
use crate::http;
use crate::logger;

/// Where a request path leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Hash,
    Liveness,
    Readiness,
    NotFound,
}

/// Match a request path against the configured routes
#[must_use]
pub fn match_route(path: &str, routes: &RoutesConfig) -> RouteKind {
    if routes.health.enabled {
        if path == routes.health.liveness_path {
            return RouteKind::Liveness;
        }
        if path == routes.health.readiness_path {
            return RouteKind::Readiness;
        }
    }

    if path == routes.hash_path {
        return RouteKind::Hash;
    }

    RouteKind::NotFound
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    config: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = match match_route(&path, &config.routes) {
        RouteKind::Hash => hasher::handle_hash(req, &config.http, &config.hash).await,
        RouteKind::Liveness | RouteKind::Readiness => http::build_health_response("ok"),
        RouteKind::NotFound => http::build_404_response(),
    };

    if config.logging.access_log {
        let body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
            .unwrap_or(usize::MAX);
        logger::log_request(&method, &path, response.status().as_u16(), body_bytes);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HealthConfig, RoutesConfig};

    fn routes() -> RoutesConfig {
        RoutesConfig {
            hash_path: "/hash".to_string(),
            health: HealthConfig::default(),
        }
    }

    #[test]
    fn test_hash_route() {
        assert_eq!(match_route("/hash", &routes()), RouteKind::Hash);
    }

    #[test]
    fn test_health_routes() {
        assert_eq!(match_route("/healthz", &routes()), RouteKind::Liveness);
        assert_eq!(match_route("/readyz", &routes()), RouteKind::Readiness);
    }

    #[test]
    fn test_health_routes_can_be_disabled() {
        let mut routes = routes();
        routes.health.enabled = false;
        assert_eq!(match_route("/healthz", &routes), RouteKind::NotFound);
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(match_route("/", &routes()), RouteKind::NotFound);
        assert_eq!(match_route("/hash/extra", &routes()), RouteKind::NotFound);
    }
}
