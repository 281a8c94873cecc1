use actix_web::{
    body::BoxBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{
    rc::Rc,
    task::{Context, Poll},
};

use crate::{domain::entities::token::Claims, errors::AuthError, AppState};

/// Bearer-token gate. Everything is protected except the landing page,
/// login, the `-front` read endpoints and served images.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path(), req.method().as_str()) {
                return service.call(req).await;
            }

            let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
                tracing::error!("AppState missing in middleware");
                AuthError::MissingJwtService
            })?;

            let token = extract_token(&req).ok_or_else(|| {
                tracing::warn!("missing or malformed Authorization header");
                AuthError::MissingCredentials
            })?;

            let claims = state
                .auth_handler
                .token_service
                .decode_jwt(&token)
                .map_err(|err| {
                    tracing::warn!("rejected token: {}", err);
                    err
                })?
                .claims;

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }
    if method == "GET"
        && (path.starts_with("/api/v1/articles-front")
            || path.starts_with("/api/v1/projects-front")
            || path.starts_with("/api/v1/certificates-front")
            || path.starts_with("/images/"))
    {
        return true;
    }
    matches!((path, method), ("/", "GET") | ("/api/v1/login", "POST"))
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

/// Claims stashed by the middleware, pulled back out by handlers that need
/// the caller's identity.
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        match claims {
            Some(claims) => ok(AuthenticatedUser(claims)),
            None => futures_util::future::err(AuthError::MissingCredentials.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::is_public_route;

    #[test]
    fn front_reads_and_login_are_public() {
        assert!(is_public_route("/", "GET"));
        assert!(is_public_route("/api/v1/login", "POST"));
        assert!(is_public_route("/api/v1/articles-front", "GET"));
        assert!(is_public_route("/api/v1/articles-front/some-slug-123", "GET"));
        assert!(is_public_route("/api/v1/projects-front", "GET"));
        assert!(is_public_route("/api/v1/certificates-front", "GET"));
        assert!(is_public_route("/images/articles/1.png", "GET"));
        assert!(is_public_route("/api/v1/articles", "OPTIONS"));
    }

    #[test]
    fn admin_routes_stay_protected() {
        assert!(!is_public_route("/api/v1/articles", "GET"));
        assert!(!is_public_route("/api/v1/articles", "POST"));
        assert!(!is_public_route("/api/v1/articles-front", "POST"));
        assert!(!is_public_route("/api/v1/login", "GET"));
        assert!(!is_public_route("/api/v1/validate-token", "POST"));
    }
}
