//! Authentication service tests over the in-memory credential store.

use std::sync::Arc;

use chrono::{Duration, Utc};

use kira_api::config::HashWorkFactor;
use kira_api::domain::{NewAccount, PasswordHasher, TokenIssuer};
use kira_api::errors::AppError;
use kira_api::infra::{InMemoryUserStore, UserRepository};
use kira_api::services::{AuthService, Authenticator};

const SECRET: &[u8] = b"test-secret-key-for-testing-only-32chars";

fn authenticator(store: Arc<InMemoryUserStore>, lifetime: Duration) -> Authenticator {
    let hasher = PasswordHasher::new(HashWorkFactor {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap();
    Authenticator::new(store, hasher, TokenIssuer::new(SECRET), lifetime)
}

fn account(email: &str, password: &str) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        first_name: "A".to_string(),
        last_name: None,
        password: password.to_string(),
        school_id: None,
    }
}

#[tokio::test]
async fn test_stored_hash_is_not_plaintext() {
    let store = Arc::new(InMemoryUserStore::new());
    let auth = authenticator(store.clone(), Duration::minutes(30));

    auth.register(account("a@x.com", "pw123")).await.unwrap();

    let stored = store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "pw123");
    assert!(stored.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_token_subject_and_expiry() {
    let store = Arc::new(InMemoryUserStore::new());
    let auth = authenticator(store, Duration::minutes(45));

    let user = auth.register(account("a@x.com", "pw123")).await.unwrap();
    let before = Utc::now().timestamp();
    let response = auth
        .login("a@x.com".to_string(), "pw123".to_string())
        .await
        .unwrap();
    let after = Utc::now().timestamp();

    let claims = auth.verify_token(&response.access_token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert!(claims.iat >= before && claims.iat <= after);
    assert_eq!(claims.exp, claims.iat + 45 * 60);
}

#[tokio::test]
async fn test_concurrent_registrations_yield_one_account() {
    let store = Arc::new(InMemoryUserStore::new());
    let auth = Arc::new(authenticator(store.clone(), Duration::minutes(30)));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let auth = auth.clone();
            tokio::spawn(async move {
                auth.register(account("race@x.com", &format!("pw{}", i)))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(e) => assert!(matches!(e, AppError::DuplicateAccount)),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_login_failures_are_distinct() {
    let store = Arc::new(InMemoryUserStore::new());
    let auth = authenticator(store, Duration::minutes(30));
    auth.register(account("a@x.com", "pw123")).await.unwrap();

    let unknown = auth
        .login("nobody@x.com".to_string(), "x".to_string())
        .await
        .unwrap_err();
    let wrong = auth
        .login("a@x.com".to_string(), "wrong".to_string())
        .await
        .unwrap_err();

    assert_eq!(unknown.to_string(), "No account found with this email address");
    assert_eq!(wrong.to_string(), "Incorrect password");
}
