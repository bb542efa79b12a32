use crate::config::{AppConfig, StoreBackend};
use crate::db;
use crate::users::repo::{InMemoryUserStore, PgUserStore, UserStore};
use crate::users::services::UserService;
use crate::views::Views;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub views: Views,
}

impl AppState {
    /// Builds store -> service -> state for the configured backend.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn UserStore> = match (config.store, &config.db) {
            (StoreBackend::Postgres, Some(db_config)) => {
                let pool = db::connect(db_config).await?;
                db::migrate(&pool).await?;
                Arc::new(PgUserStore::new(pool))
            }
            (StoreBackend::Postgres, None) => anyhow::bail!("postgres store selected without database config"),
            (StoreBackend::Memory, _) => {
                tracing::warn!("using in-memory user store; data is lost on restart");
                Arc::new(InMemoryUserStore::new())
            }
        };

        Ok(Self::from_parts(
            UserService::new(store),
            Views::new(&config.template_dir),
        ))
    }

    pub fn from_parts(users: UserService, views: Views) -> Self {
        Self { users, views }
    }
}
