//! Crustacean repository interface

use async_trait::async_trait;

use super::model::{Crustacean, CrustaceanChanges, CrustaceanFilter, NewCrustacean};
use crate::domain::DomainResult;

/// Persistence of crustacean rows.
///
/// Implementations must enforce name uniqueness themselves and report a
/// violation as `DomainError::DuplicateName`, whatever the service checked
/// beforehand.
#[async_trait]
pub trait CrustaceanRepository: Send + Sync {
    async fn insert(&self, crustacean: NewCrustacean) -> DomainResult<Crustacean>;

    /// Rows matching `filter`, newest first, restricted to `[offset, offset + limit)`.
    async fn find_page(
        &self,
        filter: &CrustaceanFilter,
        limit: u64,
        offset: u64,
    ) -> DomainResult<Vec<Crustacean>>;

    /// Unpaginated number of rows matching `filter`.
    async fn count(&self, filter: &CrustaceanFilter) -> DomainResult<u64>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Crustacean>>;
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Crustacean>>;

    /// Whether some row other than `exclude_id` already carries `name`.
    async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> DomainResult<bool>;

    async fn exists(&self, id: i32) -> DomainResult<bool>;

    /// Returns `None` when no row has `id`. Empty `changes` return the row untouched.
    async fn update(&self, id: i32, changes: CrustaceanChanges) -> DomainResult<Option<Crustacean>>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
