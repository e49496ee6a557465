//! Account provisioning tests over the in-memory user repository

mod common;

use std::sync::Arc;

use common::InMemoryUserRepository;
use recipe_api::domain::repositories::{RepositoryError, UserRepository};
use recipe_api::domain::user::{AccountError, Email, NewUser, UserManager};

const USER_EMAIL: &str = "test@example.com";
const USER_PASSWORD: &str = "testpass123";

fn manager() -> (UserManager, Arc<InMemoryUserRepository>) {
    let users = Arc::new(InMemoryUserRepository::default());
    (UserManager::new(users.clone()), users)
}

#[tokio::test]
async fn test_create_user_with_email_successful() {
    let (manager, _) = manager();

    let user = manager
        .create_user(USER_EMAIL, Some(USER_PASSWORD), NewUser::default())
        .await
        .expect("account created");

    assert_eq!(user.email.as_str(), USER_EMAIL);
    assert_ne!(user.password_hash, USER_PASSWORD);
    assert!(UserManager::check_password(&user, USER_PASSWORD).unwrap());
    assert!(!UserManager::check_password(&user, "wrong").unwrap());
    assert!(user.is_active);
    assert!(!user.is_staff);
    assert!(!user.is_superuser);
}

#[tokio::test]
async fn test_new_user_email_normalized() {
    let (manager, users) = manager();
    let sample_emails = [
        ("test1@EXAMPLE.com", "test1@example.com"),
        ("Test2@Example.com", "Test2@example.com"),
        ("TEST3@EXAMPLE.com", "TEST3@example.com"),
        ("test4@example.COM", "test4@example.com"),
    ];

    for (email, expected) in sample_emails {
        let user = manager
            .create_user(email, Some("sample123"), NewUser::default())
            .await
            .expect("account created");
        assert_eq!(user.email.as_str(), expected);

        // Queryable by the normalized address
        let found = users
            .find_by_email(&Email::new(expected).unwrap())
            .await
            .unwrap()
            .expect("stored under normalized email");
        assert_eq!(found.id, user.id);
    }
}

#[tokio::test]
async fn test_new_user_without_email_raises_error() {
    let (manager, _) = manager();

    let result = manager
        .create_user("", Some("test123"), NewUser::default())
        .await;

    assert!(matches!(result, Err(AccountError::Validation(_))));
}

#[tokio::test]
async fn test_create_user_without_password_cannot_log_in() {
    let (manager, _) = manager();

    let user = manager
        .create_user("nopass@example.com", None, NewUser::default())
        .await
        .expect("account created");
    assert!(!UserManager::check_password(&user, "").unwrap());

    let authenticated = manager
        .authenticate("nopass@example.com", "")
        .await
        .unwrap();
    assert!(authenticated.is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let (manager, _) = manager();
    manager
        .create_user(USER_EMAIL, Some(USER_PASSWORD), NewUser::default())
        .await
        .unwrap();

    let result = manager
        .create_user("test@EXAMPLE.COM", Some(USER_PASSWORD), NewUser::default())
        .await;

    assert!(matches!(
        result,
        Err(AccountError::Repository(RepositoryError::Duplicate(_)))
    ));
}

#[tokio::test]
async fn test_create_superuser() {
    let (manager, _) = manager();

    let user = manager
        .create_superuser(USER_EMAIL, USER_PASSWORD, NewUser::named("Admin"))
        .await
        .expect("superuser created");

    assert!(user.is_superuser);
    assert!(user.is_staff);
    assert_eq!(user.name, "Admin");
}

#[tokio::test]
async fn test_authenticate() {
    let (manager, users) = manager();
    let user = manager
        .create_user(USER_EMAIL, Some(USER_PASSWORD), NewUser::default())
        .await
        .unwrap();

    let found = manager
        .authenticate("test@EXAMPLE.com", USER_PASSWORD)
        .await
        .unwrap()
        .expect("valid credentials");
    assert_eq!(found.id, user.id);

    assert!(manager
        .authenticate(USER_EMAIL, "wrong-password")
        .await
        .unwrap()
        .is_none());

    users.deactivate(user.id);
    assert!(manager
        .authenticate(USER_EMAIL, USER_PASSWORD)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_overlong_account_fields_rejected() {
    let (manager, users) = manager();

    let long_email = format!("{}@example.com", "a".repeat(250));
    let result = manager
        .create_user(&long_email, Some(USER_PASSWORD), NewUser::default())
        .await;
    assert!(matches!(result, Err(AccountError::Validation(e)) if e.field() == "email"));

    let result = manager
        .create_user(USER_EMAIL, Some(USER_PASSWORD), NewUser::named("n".repeat(256)))
        .await;
    assert!(matches!(result, Err(AccountError::Validation(e)) if e.field() == "name"));

    let result = manager
        .create_user(USER_EMAIL, Some(&"p".repeat(73)), NewUser::default())
        .await;
    assert!(matches!(result, Err(AccountError::Validation(e)) if e.field() == "password"));

    let email = Email::new(USER_EMAIL).unwrap();
    assert!(users.find_by_email(&email).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_logins_all_succeed() {
    let (manager, _) = manager();
    manager
        .create_user(USER_EMAIL, Some(USER_PASSWORD), NewUser::default())
        .await
        .unwrap();

    let logins = (0..4).map(|_| {
        let manager = manager.clone();
        tokio::spawn(async move { manager.authenticate(USER_EMAIL, USER_PASSWORD).await })
    });

    for login in logins.collect::<Vec<_>>() {
        let user = login.await.unwrap().unwrap();
        assert!(user.is_some());
    }
}
