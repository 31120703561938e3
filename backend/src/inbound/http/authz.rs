//! Authorization enforcement middleware.
//!
//! Evaluates the static policy table against the path, method, and the
//! principal established by the authenticator, and rejects with 401/403
//! before any handler runs. Register it inside [`super::authn::Authenticate`]
//! on the guarded scope.

use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::HttpMessage;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::domain::policy::{Decision, Method, PolicyTable};
use crate::domain::{Error, Principal};

/// Policy-enforcement middleware.
#[derive(Clone, Copy)]
pub struct Authorize {
    policy: PolicyTable,
}

impl Authorize {
    /// Enforce the given policy table.
    pub fn new(policy: PolicyTable) -> Self {
        Self { policy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authorize
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthorizeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizeMiddleware {
            service,
            policy: self.policy,
        }))
    }
}

/// Service wrapper produced by [`Authorize`].
pub struct AuthorizeMiddleware<S> {
    service: S,
    policy: PolicyTable,
}

impl<S, B> Service<ServiceRequest> for AuthorizeMiddleware<S>
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
        let method = Method::from_name(req.method().as_str());
        let principal = req.extensions().get::<Principal>().cloned();
        let decision = self
            .policy
            .evaluate(req.path(), method, principal.as_ref());

        match decision {
            Decision::Permit => Box::pin(self.service.call(req)),
            Decision::Unauthenticated => {
                debug!(path = %req.path(), "anonymous request to protected route");
                Box::pin(ready(Err(
                    Error::unauthorized("authentication required").into()
                )))
            }
            Decision::Forbidden => {
                debug!(path = %req.path(), "principal lacks the required role");
                Box::pin(ready(Err(Error::forbidden(
                    "insufficient role for this route",
                )
                .into())))
            }
        }
    }
}
