//! User store port definition.

use async_trait::async_trait;

use crate::domain::UserId;
use crate::error::ChannelDownloadResult;

/// Port for enumerating user accounts.
#[async_trait]
pub trait UserStorePort: Send + Sync {
    /// All users, in the order the store returns them.
    async fn list_users(&self) -> ChannelDownloadResult<Vec<UserId>>;
}
