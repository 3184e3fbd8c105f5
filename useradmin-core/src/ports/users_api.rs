//! Users API port - the remote CRUD resource

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{User, UserId, UserPayload};

/// The user-management REST resource
///
/// Each method issues exactly one request. Implementations map transport
/// failures to `Error::Transport` and non-2xx answers to `Error::Server`,
/// carrying the message the server supplied when there is one.
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// GET the full collection
    async fn list(&self) -> Result<Vec<User>>;

    /// POST a new user
    async fn create(&self, payload: &UserPayload) -> Result<()>;

    /// PUT over an existing user
    async fn update(&self, id: &UserId, payload: &UserPayload) -> Result<()>;

    /// DELETE a user
    async fn delete(&self, id: &UserId) -> Result<()>;
}
