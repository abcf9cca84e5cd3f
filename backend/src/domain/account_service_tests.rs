//! Tests for the account service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
use crate::domain::{ErrorCode, PasswordDigest, UserCredentials, Username};

const DIGEST: &str = "$2b$04$abcdefghijklmnopqrstuu5Gl3QvTtyVqSmF7gM3nM8b1xYc5Dg1a";

fn make_service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
) -> AccountService<MockUserRepository, MockPasswordHasher> {
    AccountService::new(Arc::new(users), Arc::new(hasher))
}

fn digest() -> PasswordDigest {
    PasswordDigest::new(DIGEST).expect("fixture digest")
}

fn hashing_hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(1).returning(|_| Ok(digest()));
    hasher
}

fn signup_details(username: &str) -> SignupDetails {
    SignupDetails::try_from_parts(
        Some(username),
        Some("hashedpass"),
        Some("https://example.com/ham.png".to_owned()),
        None,
    )
    .expect("valid signup")
}

fn stored_credentials(username: &str) -> UserCredentials {
    let user = User::new(UserId::random(), Username::new(username).expect("username"));
    UserCredentials::new(user, digest())
}

#[tokio::test]
async fn signup_stores_hashed_digest_and_returns_profile() {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .withf(|user, digest| {
            user.username().as_ref() == "ChefHam" && digest.as_stored_str() == DIGEST
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let service = make_service(users, hashing_hasher());
    let user = service
        .signup(signup_details(" ChefHam "))
        .await
        .expect("signup succeeds");

    assert_eq!(user.username().as_ref(), "ChefHam");
    assert_eq!(user.image_url(), Some("https://example.com/ham.png"));
    assert_eq!(user.bio(), None);
}

#[rstest]
#[case(UserPersistenceError::username_taken("ChefHam"), ErrorCode::Conflict)]
#[case(UserPersistenceError::constraint("users_username_not_blank"), ErrorCode::InvalidRequest)]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn signup_maps_repository_errors(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .times(1)
        .return_once(move |_, _| Err(failure));

    let service = make_service(users, hashing_hasher());
    let err = service
        .signup(signup_details("ChefHam"))
        .await
        .expect_err("signup fails");
    assert_eq!(err.code(), expected);
}

#[tokio::test]
async fn duplicate_username_lists_a_reason() {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .return_once(|_, _| Err(UserPersistenceError::username_taken("ChefHam")));

    let service = make_service(users, hashing_hasher());
    let err = service
        .signup(signup_details("ChefHam"))
        .await
        .expect_err("duplicate fails");
    assert_eq!(err.reasons(), ["username has already been taken"]);
}

#[tokio::test]
async fn signup_does_not_store_when_hashing_fails() {
    let mut users = MockUserRepository::new();
    users.expect_create().never();
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(CredentialError::hashing("invalid cost")));

    let service = make_service(users, hasher);
    let err = service
        .signup(signup_details("ChefHam"))
        .await
        .expect_err("hash failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn authenticate_returns_user_on_matching_password() {
    let stored = stored_credentials("ChefHam");
    let expected = stored.user().clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_credentials_by_username()
        .withf(|username| username.as_ref() == "ChefHam")
        .return_once(move |_| Ok(Some(stored)));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|password, _| password.expose() == "hashedpass")
        .return_const(true);

    let service = make_service(users, hasher);
    let creds = LoginCredentials::try_from_parts("ChefHam", "hashedpass").expect("creds");
    let user = service.authenticate(&creds).await.expect("login succeeds");
    assert_eq!(user, expected);
}

#[rstest]
#[case(true, false)]
#[case(false, true)]
#[tokio::test]
async fn authenticate_rejects_unknown_user_and_wrong_password(
    #[case] user_exists: bool,
    #[case] password_matches: bool,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_credentials_by_username()
        .return_once(move |_| Ok(user_exists.then(|| stored_credentials("ChefHam"))));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().return_const(password_matches);

    let service = make_service(users, hasher);
    let creds = LoginCredentials::try_from_parts("ChefHam", "wrongpass").expect("creds");
    let err = service.authenticate(&creds).await.expect_err("login fails");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), INVALID_CREDENTIALS);
}

#[tokio::test]
async fn fetch_profile_of_missing_user_is_unauthorized() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let service = make_service(users, MockPasswordHasher::new());
    let err = service
        .fetch_profile(&UserId::random())
        .await
        .expect_err("missing user");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn fetch_profile_returns_stored_user() {
    let user = User::new(UserId::random(), Username::new("ChefHam").expect("username"));
    let id = user.id().clone();
    let returned = user.clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .withf(move |candidate| candidate.as_uuid() == id.as_uuid())
        .return_once(move |_| Ok(Some(returned)));

    let service = make_service(users, MockPasswordHasher::new());
    let profile = service.fetch_profile(user.id()).await.expect("profile");
    assert_eq!(profile, user);
}
