//! End-to-end flows across the account and recipe endpoints.

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

use super::test_utils::{api_app, in_memory_state, session_cookie};
use crate::domain::ports::{RecipeRepository, UserRepository};
use crate::domain::UserId;

const SHED_HAM: &str = "Hang the ham in the shed for a week, then bake it slowly with a \
honey glaze until golden.";

/// Send a request carrying the latest session cookie and refresh the jar
/// from the response.
macro_rules! send {
    ($app:expr, $jar:expr, $request:expr $(,)?) => {{
        let mut request = $request;
        if let Some(cookie) = $jar.clone() {
            request = request.cookie(cookie);
        }
        let res = actix_test::call_service($app, request.to_request()).await;
        if let Some(cookie) = session_cookie(&res) {
            *$jar = Some(cookie);
        }
        res
    }};
}

#[actix_web::test]
async fn chef_ham_signs_up_logs_in_and_cooks() {
    let (state, _) = in_memory_state();
    let app = actix_test::init_service(api_app(state)).await;
    let jar: &mut Option<Cookie<'static>> = &mut None;

    let res = send!(
        &app,
        jar,
        actix_test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({"username": "ChefHam", "password": "Hamtastic1"}))
    );
    assert_eq!(res.status(), StatusCode::CREATED);
    let signed_up: Value = actix_test::read_body_json(res).await;

    let res = send!(
        &app,
        jar,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"username": "ChefHam", "password": "Hamtastic1"}))
    );
    assert_eq!(res.status(), StatusCode::OK);
    let logged_in: Value = actix_test::read_body_json(res).await;
    assert_eq!(logged_in["id"], signed_up["id"]);

    let res = send!(&app, jar, actix_test::TestRequest::get().uri("/recipes"));
    assert_eq!(res.status(), StatusCode::OK);
    let listed: Value = actix_test::read_body_json(res).await;
    assert_eq!(listed, json!([]));

    let res = send!(
        &app,
        jar,
        actix_test::TestRequest::post().uri("/recipes").set_json(json!({
            "title": "Delicious Shed Ham",
            "instructions": SHED_HAM,
            "minutes_to_complete": 60
        }))
    );
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(res).await;

    let res = send!(&app, jar, actix_test::TestRequest::get().uri("/recipes"));
    let listed: Value = actix_test::read_body_json(res).await;
    assert_eq!(listed, json!([created]));
}

#[actix_web::test]
async fn logout_locks_the_jar_out_of_recipes() {
    let (state, _) = in_memory_state();
    let app = actix_test::init_service(api_app(state)).await;
    let jar: &mut Option<Cookie<'static>> = &mut None;

    let res = send!(
        &app,
        jar,
        actix_test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({"username": "ChefHam", "password": "Hamtastic1"}))
    );
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = send!(&app, jar, actix_test::TestRequest::delete().uri("/logout"));
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = send!(&app, jar, actix_test::TestRequest::get().uri("/recipes"));
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = send!(&app, jar, actix_test::TestRequest::delete().uri("/logout"));
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn deleting_a_user_removes_their_recipes() {
    let (state, store) = in_memory_state();
    let app = actix_test::init_service(api_app(state)).await;
    let jar: &mut Option<Cookie<'static>> = &mut None;

    let res = send!(
        &app,
        jar,
        actix_test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({"username": "ChefHam", "password": "Hamtastic1"}))
    );
    let user: Value = actix_test::read_body_json(res).await;
    let id = UserId::new(user["id"].as_str().expect("id string")).expect("valid id");

    let res = send!(
        &app,
        jar,
        actix_test::TestRequest::post()
            .uri("/recipes")
            .set_json(json!({"title": "Shed Ham", "instructions": SHED_HAM}))
    );
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(store.recipe_count().await, 1);

    assert!(UserRepository::delete(store.as_ref(), &id).await.expect("delete"));
    assert_eq!(store.recipe_count().await, 0);
    let remaining = RecipeRepository::list_by_owner(store.as_ref(), &id)
        .await
        .expect("listing succeeds");
    assert!(remaining.is_empty());

    let res = send!(&app, jar, actix_test::TestRequest::get().uri("/check_session"));
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn every_response_carries_a_trace_id() {
    let (state, _) = in_memory_state();
    let app = actix_test::init_service(api_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/recipes").to_request(),
    )
    .await;
    let header = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header");
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["traceId"], header.as_str());
}
