//! Crustacean catalogue service
//!
//! HTTP handlers stay thin and delegate here. Name uniqueness is checked up
//! front for a friendly error, but the store's unique index has the final
//! word: a violation on write surfaces as the same `DuplicateName`.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, info, warn};

use crate::domain::{
    Crustacean, CrustaceanChanges, CrustaceanFilter, CrustaceanRepository, DomainError,
    DomainResult, NewCrustacean,
};
use crate::shared::pagination::{self, PaginatedResult, PaginationParams};

/// Orchestrates create, list, read, update and delete over a repository.
#[derive(Clone)]
pub struct CrustaceanService {
    repo: Arc<dyn CrustaceanRepository>,
}

impl CrustaceanService {
    pub fn new(repo: Arc<dyn CrustaceanRepository>) -> Self {
        Self { repo }
    }

    // ── Commands ───────────────────────────────────────────────

    pub async fn create(&self, new: NewCrustacean) -> DomainResult<Crustacean> {
        if self.repo.find_by_name(&new.name).await?.is_some() {
            return Err(self.conflict(new.name));
        }

        match self.repo.insert(new).await {
            Ok(created) => {
                counter!("crustaceans_created_total").increment(1);
                info!(id = created.id, name = %created.name, "Crustacean created");
                Ok(created)
            }
            Err(DomainError::DuplicateName(name)) => Err(self.conflict(name)),
            Err(e) => Err(e),
        }
    }

    /// Applies `changes` to the row. `Ok(None)` when no row has `id`.
    pub async fn update(
        &self,
        id: i32,
        changes: CrustaceanChanges,
    ) -> DomainResult<Option<Crustacean>> {
        let Some(current) = self.repo.find_by_id(id).await? else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(current));
        }

        if let Some(name) = changes.name.as_deref().filter(|n| *n != current.name) {
            if !self.is_name_available(name, Some(id)).await? {
                return Err(self.conflict(name.to_string()));
            }
        }

        match self.repo.update(id, changes).await {
            Ok(updated) => Ok(updated),
            Err(DomainError::DuplicateName(name)) => Err(self.conflict(name)),
            Err(e) => Err(e),
        }
    }

    /// `Ok(false)` when no row has `id`.
    pub async fn delete(&self, id: i32) -> DomainResult<bool> {
        if !self.repo.exists(id).await? {
            return Ok(false);
        }
        let removed = self.repo.delete(id).await?;
        if removed {
            info!(id, "Crustacean deleted");
        }
        Ok(removed)
    }

    // ── Queries ────────────────────────────────────────────────

    /// One page of crustaceans matching `filter`, newest first.
    ///
    /// The count and the page are two separate reads; a concurrent write
    /// between them can make `total_rows` disagree with the page contents.
    pub async fn list(
        &self,
        filter: CrustaceanFilter,
        params: PaginationParams,
    ) -> DomainResult<PaginatedResult<Crustacean>> {
        let resolved = pagination::resolve(params);

        let total_rows = self.repo.count(&filter).await?;
        let items = self
            .repo
            .find_page(&filter, resolved.limit, resolved.offset)
            .await?;

        debug!(
            total_rows,
            page = resolved.page,
            limit = resolved.limit,
            returned = items.len(),
            "Listed crustaceans"
        );
        Ok(PaginatedResult::new(items, total_rows, resolved))
    }

    pub async fn find_by_id(&self, id: i32) -> DomainResult<Option<Crustacean>> {
        self.repo.find_by_id(id).await
    }

    /// True when no row other than `exclude_id` uses `name`.
    pub async fn is_name_available(&self, name: &str, exclude_id: Option<i32>) -> DomainResult<bool> {
        Ok(!self.repo.name_exists(name, exclude_id).await?)
    }

    fn conflict(&self, name: String) -> DomainError {
        counter!("crustacean_name_conflicts_total").increment(1);
        warn!(name = %name, "Crustacean name already in use");
        DomainError::DuplicateName(name)
    }
}

// ── Tests ──────────────────────────────────────────────────────
