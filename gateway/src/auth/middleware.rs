//! Authentication middleware
//!
//! Authorization is a pre-check: it runs before any downstream call, so
//! an unauthenticated request causes no side effect anywhere.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::GatewayState;
use shared::ApiError;

/// Require a verified caller identity.
///
/// Extracts the JWT from `Authorization: Bearer <token>`, verifies it and
/// injects [`CurrentUser`] into the request extensions.
///
/// | Failure | Response |
/// |---------|----------|
/// | No Authorization header | 401 Unauthorized |
/// | Expired token | 401 TokenExpired |
/// | Invalid token | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<GatewayState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or(ApiError::InvalidToken)?
        }
        None => {
            tracing::warn!(uri = %req.uri(), "request without credentials");
            return Err(ApiError::Unauthorized);
        }
    };

    match state.jwt.validate_token(token) {
        Ok(claims) => {
            req.extensions_mut().insert(CurrentUser::from(claims));
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(uri = %req.uri(), error = %e, "authentication failed");
            match e {
                JwtError::ExpiredToken => Err(ApiError::TokenExpired),
                _ => Err(ApiError::InvalidToken),
            }
        }
    }
}

/// Require the admin role. Must run after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(ApiError::Unauthorized)?;

    if !user.is_admin() {
        tracing::warn!(user_id = %user.id, uri = %req.uri(), "admin role required");
        return Err(ApiError::forbidden("administrator role required"));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Config, GatewayState};
    use axum::body::Body;
    use axum::{Extension, Router, middleware, routing::get};
    use http::{Request as HttpRequest, StatusCode};
    use tower::ServiceExt;

    async fn whoami(Extension(user): Extension<CurrentUser>) -> String {
        user.id
    }

    fn protected_app(state: &GatewayState, admin_only: bool) -> Router {
        let mut router = Router::new().route("/probe", get(whoami));
        if admin_only {
            router = router.layer(middleware::from_fn(require_admin));
        }
        router
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state.clone())
    }

    fn test_state() -> GatewayState {
        GatewayState::initialize(&Config::default())
    }

    async fn probe(app: &Router, token: Option<&str>) -> StatusCode {
        let mut builder = HttpRequest::builder().uri("/probe");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let response = app
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn missing_token_is_unauthenticated() {
        let state = test_state();
        let app = protected_app(&state, false);
        assert_eq!(probe(&app, None).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_unauthenticated() {
        let state = test_state();
        let app = protected_app(&state, false);
        assert_eq!(probe(&app, Some("garbage")).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_passes_and_injects_identity() {
        let state = test_state();
        let app = protected_app(&state, false);
        let token = state.jwt.generate_token("c1", "a@b.c", "client").unwrap();
        assert_eq!(probe(&app, Some(&token)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn client_role_is_forbidden_on_admin_routes() {
        let state = test_state();
        let app = protected_app(&state, true);

        let client_token = state.jwt.generate_token("c1", "a@b.c", "client").unwrap();
        assert_eq!(probe(&app, Some(&client_token)).await, StatusCode::FORBIDDEN);

        let admin_token = state.jwt.generate_token("c2", "root@b.c", "admin").unwrap();
        assert_eq!(probe(&app, Some(&admin_token)).await, StatusCode::OK);
    }
}
