use std::sync::Arc;

use tracing::instrument;

use crate::error::StoreError;
use crate::users::repo::{SaveUser, User, UserStore};

/// Facade the handlers talk to. Forwards to the store unchanged.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.store.list_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: i64) -> Result<User, StoreError> {
        self.store.find_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn save_user(&self, cmd: SaveUser) -> Result<User, StoreError> {
        self.store.save(cmd).await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i64) -> Result<(), StoreError> {
        self.store.delete_by_id(id).await
    }
}
