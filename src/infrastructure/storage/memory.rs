//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    Crustacean, CrustaceanChanges, CrustaceanFilter, CrustaceanRepository, DomainError,
    DomainResult, NewCrustacean, DEFAULT_GROUP,
};

/// In-memory crustacean store for development and testing.
///
/// `names` plays the role of the unique index: a name is reserved through
/// its map entry before the row is written.
pub struct InMemoryCrustaceanRepository {
    rows: DashMap<i32, Crustacean>,
    names: DashMap<String, i32>,
    id_counter: AtomicI32,
}

impl InMemoryCrustaceanRepository {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            names: DashMap::new(),
            id_counter: AtomicI32::new(1),
        }
    }

    fn matching(&self, filter: &CrustaceanFilter) -> Vec<Crustacean> {
        let mut rows: Vec<Crustacean> = self
            .rows
            .iter()
            .filter(|r| filter.matches(r.value()))
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        rows
    }
}

impl Default for InMemoryCrustaceanRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CrustaceanRepository for InMemoryCrustaceanRepository {
    async fn insert(&self, c: NewCrustacean) -> DomainResult<Crustacean> {
        let id = match self.names.entry(c.name.clone()) {
            Entry::Occupied(_) => return Err(DomainError::DuplicateName(c.name)),
            Entry::Vacant(slot) => {
                let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
                slot.insert(id);
                id
            }
        };

        let now = Utc::now();
        let crustacean = Crustacean {
            id,
            name: c.name,
            group: DEFAULT_GROUP.to_string(),
            sub_group: c.sub_group,
            description: c.description,
            habitat: c.habitat,
            average_size: c.average_size,
            scientific_name: c.scientific_name,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(id, crustacean.clone());
        Ok(crustacean)
    }

    async fn find_page(
        &self,
        filter: &CrustaceanFilter,
        limit: u64,
        offset: u64,
    ) -> DomainResult<Vec<Crustacean>> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self.matching(filter).into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, filter: &CrustaceanFilter) -> DomainResult<u64> {
        Ok(self.rows.iter().filter(|r| filter.matches(r.value())).count() as u64)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Crustacean>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Crustacean>> {
        let id = self.names.get(name).map(|r| *r.value());
        Ok(id.and_then(|id| self.rows.get(&id).map(|r| r.value().clone())))
    }

    async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> DomainResult<bool> {
        Ok(self
            .names
            .get(name)
            .is_some_and(|owner| Some(*owner.value()) != exclude_id))
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(self.rows.contains_key(&id))
    }

    async fn update(&self, id: i32, changes: CrustaceanChanges) -> DomainResult<Option<Crustacean>> {
        let Some(current) = self.rows.get(&id).map(|r| r.value().clone()) else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(current));
        }

        if let Some(new_name) = changes.name.as_ref().filter(|n| **n != current.name) {
            match self.names.entry(new_name.clone()) {
                Entry::Occupied(_) => return Err(DomainError::DuplicateName(new_name.clone())),
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.names.remove(&current.name);
        }

        let mut updated = current;
        changes.apply_to(&mut updated);
        updated.updated_at = Utc::now();
        self.rows.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        match self.rows.remove(&id) {
            Some((_, removed)) => {
                self.names.remove(&removed.name);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn shrimp(name: &str) -> NewCrustacean {
        NewCrustacean {
            name: name.into(),
            sub_group: "Shrimp".into(),
            description: "Common commercial shrimp species".into(),
            habitat: "Atlantic and Gulf coasts".into(),
            average_size: 8.0,
            scientific_name: "Litopenaeus setiferus".into(),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential() {
        let repo = InMemoryCrustaceanRepository::new();
        assert_eq!(repo.insert(shrimp("A")).await.unwrap().id, 1);
        assert_eq!(repo.insert(shrimp("B")).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn insert_rejects_taken_name() {
        let repo = InMemoryCrustaceanRepository::new();
        repo.insert(shrimp("A")).await.unwrap();
        assert_eq!(
            repo.insert(shrimp("A")).await.unwrap_err(),
            DomainError::DuplicateName("A".into())
        );
    }

    #[tokio::test]
    async fn rename_releases_the_old_name() {
        let repo = InMemoryCrustaceanRepository::new();
        let a = repo.insert(shrimp("A")).await.unwrap();
        repo.update(
            a.id,
            CrustaceanChanges {
                name: Some("B".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(!repo.name_exists("A", None).await.unwrap());
        assert_eq!(repo.find_by_name("B").await.unwrap().unwrap().id, a.id);
        repo.insert(shrimp("A")).await.unwrap();
    }

    #[tokio::test]
    async fn delete_frees_the_name() {
        let repo = InMemoryCrustaceanRepository::new();
        let a = repo.insert(shrimp("A")).await.unwrap();
        assert!(repo.delete(a.id).await.unwrap());
        assert!(!repo.delete(a.id).await.unwrap());
        repo.insert(shrimp("A")).await.unwrap();
    }

    #[tokio::test]
    async fn pages_are_newest_first() {
        let repo = InMemoryCrustaceanRepository::new();
        for name in ["A", "B", "C"] {
            repo.insert(shrimp(name)).await.unwrap();
        }
        let page = repo.find_page(&CrustaceanFilter::default(), 2, 0).await.unwrap();
        let names: Vec<_> = page.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["C", "B"]);
    }
}
