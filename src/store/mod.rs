pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::User;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence seam for user records. The service talks to this trait only;
/// production wires in [`postgres::PgUserStore`], the test harness an
/// in-memory implementation.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        full_name: &str,
    ) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError>;
}
