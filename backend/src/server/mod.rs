//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use recipe_backend::doc::ApiDoc;
use recipe_backend::inbound::http::configure_api;
use recipe_backend::inbound::http::health::{HealthState, live, ready};
use recipe_backend::inbound::http::session_config::SessionSettings;
use recipe_backend::inbound::http::state::HttpState;
use recipe_backend::middleware::{SessionGate, Trace};

use state_builders::build_http_state;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    // The gate must run after the session middleware has loaded the cookie,
    // so it is wrapped first (innermost).
    let api = web::scope("")
        .wrap(SessionGate)
        .wrap(session.middleware())
        .configure(configure_api);

    // The API scope matches every path, so everything else registers first.
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.service(api)
}

/// Construct an Actix HTTP server for `config`.
///
/// Handler state is built once and shared by every worker, so the in-memory
/// fallback store is process-wide.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        session,
        bind_addr,
        db_pool: _,
        bcrypt_cost: _,
    } = config;

    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        session,
    };
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Wiring tests for the assembled application.

    use super::*;
    use std::sync::Arc;

    use actix_web::cookie::{Key, SameSite};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use recipe_backend::outbound::crypto::BcryptPasswordHasher;
    use recipe_backend::outbound::memory::InMemoryStore;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn deps() -> AppDependencies {
        let store = Arc::new(InMemoryStore::new());
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(HttpState::from_adapters(
                store.clone(),
                store,
                Arc::new(BcryptPasswordHasher::new(4)),
            )),
            session: SessionSettings::new(Key::generate(), false, SameSite::Lax),
        }
    }

    #[rstest]
    #[case("/health/ready")]
    #[case("/health/live")]
    #[actix_web::test]
    async fn health_probes_bypass_the_session_gate(deps: AppDependencies, #[case] uri: &str) {
        let app = actix_test::init_service(build_app(deps)).await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[case(actix_test::TestRequest::get().uri("/recipes"))]
    #[case(actix_test::TestRequest::delete().uri("/logout"))]
    #[actix_web::test]
    async fn protected_routes_need_a_session(
        deps: AppDependencies,
        #[case] request: actix_test::TestRequest,
    ) {
        let app = actix_test::init_service(build_app(deps)).await;
        let res = actix_test::call_service(&app, request.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().contains_key("trace-id"));
    }

    #[rstest]
    #[actix_web::test]
    async fn signup_session_unlocks_recipes(deps: AppDependencies) {
        let app = actix_test::init_service(build_app(deps)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup")
                .set_json(json!({"username": "ChefHam", "password": "Hamtastic1"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();
        assert_eq!(cookie.http_only(), Some(true));

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

    #[cfg(debug_assertions)]
    #[rstest]
    #[actix_web::test]
    async fn openapi_document_is_served_without_a_session(deps: AppDependencies) {
        let app = actix_test::init_service(build_app(deps)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api-docs/openapi.json")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
