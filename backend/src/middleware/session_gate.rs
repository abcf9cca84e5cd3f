//! Session gate rejecting anonymous requests to protected routes.
//!
//! Wrap the API scope once with [`SessionGate`]; it must sit inside the
//! session middleware so the session is already loaded. Paths listed in
//! [`OPEN_PATHS`] pass through untouched, everything else needs a current
//! user in the session or is answered with `401 Unauthorized` before the
//! handler runs.

use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::Error;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::inbound::http::session::SessionContext;

/// Paths reachable without a logged-in user.
pub const OPEN_PATHS: [&str; 3] = ["/signup", "/login", "/check_session"];

fn is_open(path: &str) -> bool {
    OPEN_PATHS.contains(&path)
}

/// Middleware enforcing a logged-in session outside [`OPEN_PATHS`].
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use recipe_backend::middleware::SessionGate;
///
/// let _app = App::new().service(web::scope("").wrap(SessionGate));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionGate;

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware { service }))
    }
}

/// Service wrapper produced by [`SessionGate`].
pub struct SessionGateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !is_open(req.path()) {
            let session = SessionContext::new(req.get_session());
            if let Err(error) = session.require_user_id() {
                debug!(path = %req.path(), "rejected request without a session");
                let response = req.error_response(error).map_into_right_body();
                return Box::pin(ready(Ok(response)));
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}

#[cfg(test)]
mod tests {
    //! Gate behaviour against a minimal app.
    use super::*;
    use crate::domain::UserId;
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};
    use rstest::rstest;

    async fn login(session: SessionContext) -> actix_web::Result<HttpResponse> {
        session.persist_user(&UserId::random())?;
        Ok(HttpResponse::Ok().finish())
    }

    macro_rules! gated_app {
        () => {
            actix_test::init_service(
                App::new().service(
                    web::scope("")
                        .wrap(SessionGate)
                        .wrap(test_session_middleware())
                        .route("/login", web::post().to(login))
                        .route(
                            "/check_session",
                            web::get().to(|| async { HttpResponse::Ok().finish() }),
                        )
                        .route(
                            "/recipes",
                            web::get().to(|| async { HttpResponse::Ok().finish() }),
                        ),
                ),
            )
            .await
        };
    }

    #[rstest]
    #[case("/signup", true)]
    #[case("/login", true)]
    #[case("/check_session", true)]
    #[case("/logout", false)]
    #[case("/recipes", false)]
    #[case("/login/extra", false)]
    fn open_paths_are_exact(#[case] path: &str, #[case] open: bool) {
        assert_eq!(is_open(path), open);
    }

    #[actix_web::test]
    async fn anonymous_request_to_protected_path_is_rejected() {
        let app = gated_app!();
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/recipes").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
    }

    #[actix_web::test]
    async fn open_path_reaches_handler_without_session() {
        let app = gated_app!();
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/check_session").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn logged_in_request_passes() {
        let app = gated_app!();
        let login_res =
            actix_test::call_service(&app, actix_test::TestRequest::post().uri("/login").to_request()).await;
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/recipes")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
