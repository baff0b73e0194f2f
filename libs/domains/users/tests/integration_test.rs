//! PostgreSQL-backed tests for `PgUserRepository` and `UserService`.
//!
//! Each test starts its own container through `test_utils::TestDatabase`.

use domain_users::postgres::create_schema;
use domain_users::*;
use test_utils::assertions::{assert_none, assert_some};
use test_utils::{TestDataBuilder, TestDatabase};

async fn setup() -> (TestDatabase, PgUserRepository) {
    let db = TestDatabase::new().await;
    create_schema(&db.connection()).await.unwrap();
    let repo = PgUserRepository::new(db.connection());
    (db, repo)
}

fn new_user(name: String, email: String, age: i32) -> NewUser {
    NewUser { name, email, age }
}

#[tokio::test]
async fn test_create_schema_is_idempotent() {
    let (db, _repo) = setup().await;
    create_schema(&db.connection()).await.unwrap();
}

#[tokio::test]
async fn test_create_and_fetch() {
    let (_db, repo) = setup().await;
    let builder = TestDataBuilder::from_test_name("pg_create_and_fetch");

    let created = repo
        .create(new_user(builder.name("user", "a"), builder.email("a"), builder.age()))
        .await
        .unwrap();
    assert!(created.id > 0);

    let by_id = assert_some(repo.get_by_id(created.id).await.unwrap(), "get_by_id");
    assert_eq!(by_id, created);

    let by_email = assert_some(
        repo.get_by_email(&created.email).await.unwrap(),
        "get_by_email",
    );
    assert_eq!(by_email, created);

    assert_none(
        repo.get_by_email(&created.email.to_uppercase()).await.unwrap(),
        "email lookup is case-sensitive",
    );
}

#[tokio::test]
async fn test_serial_ids_are_not_reused() {
    let (_db, repo) = setup().await;
    let builder = TestDataBuilder::from_test_name("pg_serial_ids");

    let first = repo
        .create(new_user(builder.name("user", "a"), builder.email("a"), 30))
        .await
        .unwrap();
    assert!(repo.delete(first.id).await.unwrap());

    let second = repo
        .create(new_user(builder.name("user", "a"), builder.email("a"), 30))
        .await
        .unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_unique_constraint_reports_duplicate() {
    let (_db, repo) = setup().await;
    let builder = TestDataBuilder::from_test_name("pg_unique_email");
    let email = builder.email("shared");

    repo.create(new_user("Alice".into(), email.clone(), 30))
        .await
        .unwrap();

    let result = repo.create(new_user("Bob".into(), email, 40)).await;
    assert!(matches!(result, Err(StorageError::Duplicate(_))), "{result:?}");
}

#[tokio::test]
async fn test_update_and_duplicate_on_update() {
    let (_db, repo) = setup().await;
    let builder = TestDataBuilder::from_test_name("pg_update");

    let alice = repo
        .create(new_user("Alice".into(), builder.email("alice"), 30))
        .await
        .unwrap();
    let bob = repo
        .create(new_user("Bob".into(), builder.email("bob"), 40))
        .await
        .unwrap();

    let updated = repo
        .update(User {
            name: "Alicia".into(),
            age: 0,
            ..alice.clone()
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.age, 0);

    let clash = repo
        .update(User {
            email: bob.email.clone(),
            ..alice
        })
        .await;
    assert!(matches!(clash, Err(StorageError::Duplicate(_))), "{clash:?}");
}

#[tokio::test]
async fn test_update_missing_row_fails() {
    let (_db, repo) = setup().await;

    let result = repo
        .update(User {
            id: 4242,
            name: "Ghost".into(),
            email: "ghost@example.com".into(),
            age: 1,
        })
        .await;
    assert!(matches!(result, Err(StorageError::Backend(_))), "{result:?}");
}

#[tokio::test]
async fn test_out_of_range_ids_are_absent() {
    let (_db, repo) = setup().await;

    assert_none(repo.get_by_id(u32::MAX).await.unwrap(), "u32::MAX");
    assert!(!repo.delete(u32::MAX).await.unwrap());
    assert!(!repo.delete(12345).await.unwrap());
}

#[tokio::test]
async fn test_service_over_postgres() {
    let (_db, repo) = setup().await;
    let service = UserService::new(repo);
    let builder = TestDataBuilder::from_test_name("pg_service");
    let email = builder.email("alice");

    let alice = service
        .register_user(" Alice ", &format!("  {email} "), 30)
        .await
        .unwrap();
    assert_eq!(alice.email, email);

    assert_eq!(
        service.register_user("Bob", &email, 40).await,
        Err(UserError::Conflict("email already registered"))
    );

    let all = service.get_all_users().await.unwrap();
    assert_eq!(all, vec![alice.clone()]);

    service.delete_user(alice.id).await.unwrap();
    assert_eq!(
        service.get_user(alice.id).await,
        Err(UserError::NotFound("user not found"))
    );
}

#[tokio::test]
async fn test_concurrent_registrations_yield_one_user() {
    let (_db, repo) = setup().await;
    let service = std::sync::Arc::new(UserService::new(repo));
    let builder = TestDataBuilder::from_test_name("pg_concurrent");
    let email = builder.email("race");

    let attempts = (0..8).map(|i| {
        let service = service.clone();
        let email = email.clone();
        tokio::spawn(async move { service.register_user(&format!("user{i}"), &email, 20).await })
    });

    let results = futures::future::join_all(attempts).await;
    let successes = results
        .into_iter()
        .map(|r| r.unwrap())
        .filter(|r| {
            if let Err(e) = r {
                assert_eq!(*e, UserError::Conflict("email already registered"));
            }
            r.is_ok()
        })
        .count();
    assert_eq!(successes, 1);
}
