//! HTTP Basic Authentication for the host console and host-only endpoints

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

use crate::types::Role;
use crate::ws::{parse_role, WsQuery};

const REALM: &str = "Lucky Draw Host";

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Username for the host console (None = auth disabled)
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AuthConfig {
    /// HOST_USERNAME and HOST_PASSWORD must both be set to enable auth
    pub fn from_env() -> Self {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        Self::new(read("HOST_USERNAME"), read("HOST_PASSWORD"))
    }

    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        match (username, password) {
            (Some(u), Some(p)) => {
                tracing::info!("Host authentication enabled");
                Self {
                    username: Some(u),
                    password: Some(p),
                }
            }
            (u, p) => {
                if u.is_some() || p.is_some() {
                    tracing::warn!(
                        "HOST_USERNAME and HOST_PASSWORD must both be set to enable authentication"
                    );
                }
                tracing::warn!("Host authentication DISABLED - anyone can run the draw!");
                Self::default()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    pub fn validate(&self, username: &str, password: &str) -> bool {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => {
                // Evaluate both so timing doesn't reveal which one was wrong
                let user_ok = constant_time_eq(u.as_bytes(), username.as_bytes());
                let pass_ok = constant_time_eq(p.as_bytes(), password.as_bytes());
                user_ok & pass_ok
            }
            _ => true,
        }
    }

    fn authorizes(&self, headers: &HeaderMap) -> bool {
        basic_credentials(headers).is_some_and(|(user, pass)| self.validate(&user, &pass))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Username and password from an `Authorization: Basic ...` header
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

fn unauthorized(realm: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, format!("Basic realm=\"{}\"", realm))],
        "Unauthorized",
    )
        .into_response()
}

/// Middleware for HTTP Basic Authentication on host routes
pub async fn host_auth_middleware(
    State(auth_config): State<Arc<AuthConfig>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !auth_config.is_enabled() || auth_config.authorizes(request.headers()) {
        return next.run(request).await;
    }
    unauthorized(REALM)
}

/// Role the WebSocket handler will assign to this request. Uses the same
/// decoded query as `ws_handler`, so encoded variants resolve identically.
fn requested_ws_role(request: &Request<Body>) -> Option<Role> {
    // A query the handler can't decode is rejected there before any role is assigned
    let Query(params) = Query::<WsQuery>::try_from_uri(request.uri()).ok()?;
    Some(parse_role(params.role.as_deref()))
}

/// Require Basic Auth for host WebSocket connections so nobody else can
/// drive the draw.
pub async fn host_ws_auth_middleware(
    State(auth_config): State<Arc<AuthConfig>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if requested_ws_role(&request) != Some(Role::Host) {
        return next.run(request).await;
    }

    if !auth_config.is_enabled() {
        tracing::warn!(
            "Host WebSocket requested but host authentication is DISABLED; set HOST_USERNAME and HOST_PASSWORD"
        );
        return next.run(request).await;
    }

    if auth_config.authorizes(request.headers()) {
        return next.run(request).await;
    }
    unauthorized(&format!("{} (WebSocket)", REALM))
}

pub async fn redirect_host_html() -> Redirect {
    Redirect::temporary("/host")
}

async fn serve_page(path: &str, missing: &'static str) -> Response {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            content,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Could not read {}: {}", path, e);
            (StatusCode::NOT_FOUND, missing).into_response()
        }
    }
}

/// Host console (mounted behind the auth middleware)
pub async fn serve_host() -> Response {
    serve_page("static/host.html", "Host page not found").await
}

/// Projector screen that runs the draw animations
pub async fn serve_beamer() -> Response {
    serve_page("static/beamer.html", "Beamer page not found").await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    fn ws_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_requested_ws_role_decodes_query() {
        assert_eq!(requested_ws_role(&ws_request("/ws?role=host")), Some(Role::Host));
        assert_eq!(requested_ws_role(&ws_request("/ws?role=h%6Fst")), Some(Role::Host));
        assert_eq!(requested_ws_role(&ws_request("/ws?x=1&role=%68ost")), Some(Role::Host));
        assert_eq!(requested_ws_role(&ws_request("/ws?role=beamer")), Some(Role::Beamer));
        assert_eq!(requested_ws_role(&ws_request("/ws")), Some(Role::Audience));
    }

    #[test]
    fn test_auth_config_disabled_when_incomplete() {
        let config = AuthConfig::new(None, None);
        assert!(!config.is_enabled());
        assert!(config.validate("any", "thing"));

        let config = AuthConfig::new(Some("user".to_string()), None);
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_auth_config_enabled() {
        let config = AuthConfig::new(Some("admin".to_string()), Some("secret".to_string()));
        assert!(config.is_enabled());
        assert!(config.validate("admin", "secret"));
        assert!(!config.validate("admin", "wrong"));
        assert!(!config.validate("wrong", "secret"));
        assert!(!config.validate("", ""));
    }

    #[test]
    fn test_basic_credentials() {
        // "admin:secret"
        let headers = headers_with("Basic YWRtaW46c2VjcmV0");
        assert_eq!(
            basic_credentials(&headers),
            Some(("admin".to_string(), "secret".to_string()))
        );

        // Passwords may contain colons: "user:pa:ss"
        let headers = headers_with("Basic dXNlcjpwYTpzcw==");
        assert_eq!(
            basic_credentials(&headers),
            Some(("user".to_string(), "pa:ss".to_string()))
        );

        assert_eq!(basic_credentials(&headers_with("Bearer abc")), None);
        assert_eq!(basic_credentials(&headers_with("Basic !!!")), None);
        assert_eq!(basic_credentials(&HeaderMap::new()), None);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hell"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_unauthorized_response() {
        let response = unauthorized(REALM);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::WWW_AUTHENTICATE],
            "Basic realm=\"Lucky Draw Host\""
        );
    }
}
