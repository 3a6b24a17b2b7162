//! Gate de acceso por request
//!
//! Clasifica cada ruta como pública, de admin o autenticada con una
//! tabla plana de reglas y aplica el check de rol antes de cualquier
//! handler. Las rutas de API devuelven 401; las de páginas redirigen
//! a /sign-in.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;

use crate::state::AppState;
use crate::utils::jwt::{verify_session_token, SessionClaims};

/// Clase de acceso de una ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Admin,
    Authenticated,
}

/// Tabla plana de clasificación de rutas
pub fn classify_route(method: &Method, path: &str) -> RouteClass {
    // públicas: landing, sign-in/up, webhooks firmados y health check
    if path == "/"
        || path == "/health"
        || path.starts_with("/sign-in")
        || path.starts_with("/sign-up")
        || path.starts_with("/api/webhooks")
    {
        return RouteClass::Public;
    }

    // admin: dashboard/inducción/edición y el área /api/admin
    if path.starts_with("/admin")
        || path.starts_with("/api/admin")
        || (*method == Method::POST && path == "/api/cars")
    {
        return RouteClass::Admin;
    }

    RouteClass::Authenticated
}

pub fn is_api_route(path: &str) -> bool {
    path.starts_with("/api")
}

/// Extraer el token Bearer del header Authorization
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Respuesta de denegación: 401 JSON para API, redirect para páginas
fn deny(path: &str) -> Response {
    if is_api_route(path) {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "ok": false, "error": "Not authenticated" })),
        )
            .into_response()
    } else {
        Redirect::to("/sign-in").into_response()
    }
}

/// Middleware del gate de acceso
pub async fn access_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let class = classify_route(&method, &path);
    if class == RouteClass::Public {
        return next.run(request).await;
    }

    let Some(token) = bearer_token(request.headers()) else {
        return deny(&path);
    };

    let claims: SessionClaims =
        match verify_session_token(token, &state.config.session_jwt_secret) {
            Ok(claims) => claims,
            Err(_) => return deny(&path),
        };

    if class == RouteClass::Admin && !claims.is_admin() {
        return deny(&path);
    }

    request.extensions_mut().insert(claims);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert_eq!(classify_route(&Method::GET, "/"), RouteClass::Public);
        assert_eq!(
            classify_route(&Method::GET, "/sign-in/factor-one"),
            RouteClass::Public
        );
        assert_eq!(
            classify_route(&Method::POST, "/api/webhooks/identity"),
            RouteClass::Public
        );
        assert_eq!(classify_route(&Method::GET, "/health"), RouteClass::Public);
    }

    #[test]
    fn test_admin_routes() {
        assert_eq!(
            classify_route(&Method::GET, "/admin/dashboard"),
            RouteClass::Admin
        );
        assert_eq!(
            classify_route(&Method::POST, "/api/admin/sync-licensing"),
            RouteClass::Admin
        );
        // la inducción es admin aunque viva bajo /api/cars
        assert_eq!(classify_route(&Method::POST, "/api/cars"), RouteClass::Admin);
        // ...pero el listado es de miembros
        assert_eq!(
            classify_route(&Method::GET, "/api/cars"),
            RouteClass::Authenticated
        );
    }

    #[test]
    fn test_authenticated_fallback() {
        assert_eq!(
            classify_route(&Method::POST, "/api/trips"),
            RouteClass::Authenticated
        );
        assert_eq!(
            classify_route(&Method::GET, "/api/cars/5"),
            RouteClass::Authenticated
        );
        assert_eq!(classify_route(&Method::GET, "/cars"), RouteClass::Authenticated);
    }

    #[test]
    fn test_is_api_route() {
        assert!(is_api_route("/api/trips"));
        assert!(!is_api_route("/admin/dashboard"));
    }
}
