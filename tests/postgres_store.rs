//! `PgStore` against a real database. Run with `cargo test -- --ignored`
//! once Postgres from `configuration.yaml` is reachable.

use chirpy::configuration::{get_configuration, DatabaseSettings};
use chirpy::models::{Chirp, User};
use chirpy::store::{ChirpStore, PgStore, RefreshTokenStore, StoreError, UserStore};
use chrono::{Duration, Utc};
use sqlx::{Connection, Executor, PgConnection, PgPool};

pub async fn configure_database(config: &DatabaseSettings) -> PgPool {
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(&*format!(r#"CREATE DATABASE "{}";"#, config.database_name))
        .await
        .expect("Failed to create database.");

    let connection_pool = PgPool::connect(&config.connection_string())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database.");
    connection_pool
}

async fn spawn_store() -> PgStore {
    let mut configuration = get_configuration().expect("Failed to read configuration.");
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();
    PgStore::new(configure_database(&configuration.database).await)
}

async fn create_user(store: &PgStore, email: &str) -> User {
    store
        .create_user(User::new(email.to_string(), "hash".to_string()))
        .await
        .expect("Failed to create user")
}

#[tokio::test]
#[ignore]
async fn duplicate_email_is_a_conflict() {
    let store = spawn_store().await;
    create_user(&store, "walt@breakingbad.com").await;

    let result = store
        .create_user(User::new("walt@breakingbad.com".to_string(), "x".to_string()))
        .await;

    assert!(matches!(result, Err(StoreError::Conflict)));
}

#[tokio::test]
#[ignore]
async fn refresh_token_lifecycle() {
    let store = spawn_store().await;
    let user = create_user(&store, "walt@breakingbad.com").await;
    let now = Utc::now();
    let token = "ab".repeat(32);

    store
        .store_refresh_token(&token, user.id, now, now + Duration::days(60))
        .await
        .unwrap();
    assert_eq!(store.lookup_active_user(&token).await.unwrap(), user.id);

    let duplicate = store
        .store_refresh_token(&token, user.id, now, now + Duration::days(60))
        .await;
    assert!(matches!(duplicate, Err(StoreError::Conflict)));

    store.revoke_refresh_token(&token).await.unwrap();
    assert!(matches!(
        store.lookup_active_user(&token).await,
        Err(StoreError::NotFound)
    ));
    assert!(matches!(
        store.revoke_refresh_token(&token).await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
#[ignore]
async fn expired_refresh_token_is_not_active() {
    let store = spawn_store().await;
    let user = create_user(&store, "walt@breakingbad.com").await;
    let now = Utc::now();

    store
        .store_refresh_token("expired", user.id, now - Duration::days(61), now - Duration::days(1))
        .await
        .unwrap();

    assert!(matches!(
        store.lookup_active_user("expired").await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
#[ignore]
async fn delete_all_users_cascades() {
    let store = spawn_store().await;
    let user = create_user(&store, "walt@breakingbad.com").await;
    let now = Utc::now();
    store
        .store_refresh_token("token", user.id, now, now + Duration::days(60))
        .await
        .unwrap();
    store
        .create_chirp(Chirp::new("hello".to_string(), user.id))
        .await
        .unwrap();

    assert_eq!(store.delete_all_users().await.unwrap(), 1);
    assert!(store.list_chirps().await.unwrap().is_empty());
    assert!(store.lookup_active_user("token").await.is_err());
}

#[tokio::test]
#[ignore]
async fn chirps_are_listed_oldest_first() {
    let store = spawn_store().await;
    let user = create_user(&store, "walt@breakingbad.com").await;
    let mut newer = Chirp::new("second".to_string(), user.id);
    let older = Chirp::new("first".to_string(), user.id);
    newer.created_at = older.created_at + Duration::seconds(5);

    store.create_chirp(newer).await.unwrap();
    store.create_chirp(older.clone()).await.unwrap();

    let chirps = store.list_chirps().await.unwrap();
    assert_eq!(chirps[0].id, older.id);

    store.delete_chirp(older.id).await.unwrap();
    assert!(matches!(
        store.get_chirp(older.id).await,
        Err(StoreError::NotFound)
    ));
}
