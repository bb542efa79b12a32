use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;
pub use crate::users::repo_types::{SaveUser, User, UserProfile};

/// Persistence capability for user records.
///
/// `save` with [`SaveUser::Update`] on a missing id fails with
/// [`StoreError::NotFound`]; it never inserts. `delete_by_id` on a missing id
/// succeeds.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, ordered by id.
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<User, StoreError>;
    async fn save(&self, cmd: SaveUser) -> Result<User, StoreError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, last_name, email
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, last_name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound(id))
    }

    async fn save(&self, cmd: SaveUser) -> Result<User, StoreError> {
        match cmd {
            SaveUser::Create(profile) => {
                let user = sqlx::query_as::<_, User>(
                    r#"
                    INSERT INTO users (name, last_name, email)
                    VALUES ($1, $2, $3)
                    RETURNING id, name, last_name, email
                    "#,
                )
                .bind(&profile.name)
                .bind(&profile.last_name)
                .bind(&profile.email)
                .fetch_one(&self.db)
                .await?;
                debug!(user_id = user.id, "user inserted");
                Ok(user)
            }
            SaveUser::Update { id, profile } => {
                let user = sqlx::query_as::<_, User>(
                    r#"
                    UPDATE users
                    SET name = $2, last_name = $3, email = $4
                    WHERE id = $1
                    RETURNING id, name, last_name, email
                    "#,
                )
                .bind(id)
                .bind(&profile.name)
                .bind(&profile.last_name)
                .bind(&profile.email)
                .fetch_optional(&self.db)
                .await?
                .ok_or(StoreError::NotFound(id))?;
                debug!(user_id = id, "user updated");
                Ok(user)
            }
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        debug!(user_id = id, rows = res.rows_affected(), "user delete");
        Ok(())
    }
}

#[derive(Default)]
struct MemState {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryUserStore {
    state: RwLock<MemState>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<User, StoreError> {
        let state = self.state.read().await;
        state.users.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn save(&self, cmd: SaveUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        match cmd {
            SaveUser::Create(profile) => {
                state.next_id += 1;
                let user = User::from_profile(state.next_id, profile);
                state.users.insert(user.id, user.clone());
                Ok(user)
            }
            SaveUser::Update { id, profile } => {
                let slot = state.users.get_mut(&id).ok_or(StoreError::NotFound(id))?;
                *slot = User::from_profile(id, profile);
                Ok(slot.clone())
            }
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        self.state.write().await.users.remove(&id);
        Ok(())
    }
}


// Run with a reachable DATABASE_URL: `cargo test -- --ignored`.
#[cfg(test)]
mod pg_tests {
    use super::*;

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            name: name.into(),
            last_name: "Hatter".into(),
            email: format!("{}@example.com", name),
        }
    }

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn insert_returns_stored_row(db: PgPool) {
        let store = PgUserStore::new(db);
        let alice = store.save(SaveUser::Create(profile("Alice"))).await.unwrap();
        assert!(alice.id > 0);
        assert_eq!(store.find_by_id(alice.id).await.unwrap(), alice);
        assert_eq!(alice.email, "Alice@example.com");
    }

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn list_is_ordered_by_id(db: PgPool) {
        let store = PgUserStore::new(db);
        for n in ["Carol", "Alice", "Bob"] {
            store.save(SaveUser::Create(profile(n))).await.unwrap();
        }
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(all[0].name, "Carol");
    }

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn update_overwrites_and_missing_id_is_not_found(db: PgPool) {
        let store = PgUserStore::new(db);
        let alice = store.save(SaveUser::Create(profile("Alice"))).await.unwrap();

        let updated = store
            .save(SaveUser::Update { id: alice.id, profile: profile("Alice2") })
            .await
            .unwrap();
        assert_eq!(updated.id, alice.id);
        assert_eq!(store.find_by_id(alice.id).await.unwrap().name, "Alice2");

        let err = store
            .save(SaveUser::Update { id: alice.id + 1000, profile: profile("Ghost") })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn delete_then_find_is_not_found(db: PgPool) {
        let store = PgUserStore::new(db);
        let alice = store.save(SaveUser::Create(profile("Alice"))).await.unwrap();
        store.delete_by_id(alice.id).await.unwrap();
        store.delete_by_id(alice.id).await.unwrap();
        assert!(matches!(
            store.find_by_id(alice.id).await,
            Err(StoreError::NotFound(_))
        ));
    }
}
