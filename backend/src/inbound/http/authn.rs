//! Request authenticator.
//!
//! Converts an inbound request's bearer credential into a request-scoped
//! [`Principal`], degrading gracefully to anonymous. This middleware never
//! rejects a request: a missing, malformed, expired, or tampered token
//! simply yields no principal, and the authorization middleware decides
//! whether anonymity is acceptable for the route. Fail open to anonymous,
//! fail closed at authorization.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::domain::ports::UserRepository;
use crate::domain::{Email, Error, Principal, TokenService};

/// Shared authenticator dependencies.
#[derive(Clone)]
pub struct AuthnState {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserRepository>,
}

impl AuthnState {
    /// Bundle the token verifier with the credential store.
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }

    /// Resolve the request's bearer credential to a principal, if any.
    ///
    /// The role and identifier come from the credential store, not the
    /// token claims: a role changed after issuance takes effect on the
    /// very next request, so the lookup stays on the hot path.
    async fn resolve_principal(&self, req: &HttpRequest) -> Option<Principal> {
        let token = bearer_token(req)?;
        let claims = match self.tokens.verify(token) {
            Ok(claims) => claims,
            Err(_) => {
                debug!("bearer token failed verification; continuing anonymously");
                return None;
            }
        };

        let email = Email::new(&claims.sub).ok()?;
        let user = match self.users.find_by_email(&email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(subject = %email, "token subject no longer exists");
                return None;
            }
            Err(error) => {
                debug!(%error, "credential store lookup failed during authentication");
                return None;
            }
        };
        if !user.is_active() {
            debug!(subject = %email, "token subject is not in good standing");
            return None;
        }

        Some(Principal {
            user_id: user.id,
            email: user.email,
            role: user.role,
            raw_token: token.to_owned(),
        })
    }
}

/// Extract a syntactically plausible token from the `Authorization` header.
///
/// Requires the `Bearer ` prefix, a non-empty body, and the `.` delimiter
/// characteristic of a signed-claims structure; anything else is treated
/// as no credential at all.
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let header = req.headers().get(actix_web::http::header::AUTHORIZATION)?;
    let value = header.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() || !token.contains('.') {
        return None;
    }
    Some(token)
}

/// Authenticator middleware. Register it outermost on the guarded scope so
/// the principal exists before the authorization middleware runs.
#[derive(Clone)]
pub struct Authenticate {
    state: AuthnState,
}

impl Authenticate {
    /// Build the middleware from its shared dependencies.
    pub fn new(state: AuthnState) -> Self {
        Self { state }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authenticate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthenticateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticateMiddleware {
            service: Rc::new(service),
            state: self.state.clone(),
        }))
    }
}

/// Service wrapper produced by [`Authenticate`].
pub struct AuthenticateMiddleware<S> {
    service: Rc<S>,
    state: AuthnState,
}

impl<S, B> Service<ServiceRequest> for AuthenticateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let state = self.state.clone();
        Box::pin(async move {
            if let Some(principal) = state.resolve_principal(req.request()).await {
                req.extensions_mut().insert(principal);
            }
            service.call(req).await
        })
    }
}

impl FromRequest for Principal {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let principal = req.extensions().get::<Principal>().cloned();
        ready(principal.ok_or_else(|| Error::unauthorized("authentication required").into()))
    }
}
