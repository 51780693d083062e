//! SeaORM implementation of CrustaceanRepository

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, SqlErr,
};

use crate::domain::{
    Crustacean, CrustaceanChanges, CrustaceanFilter, CrustaceanRepository, DomainError,
    DomainResult, NewCrustacean, DEFAULT_GROUP,
};
use crate::infrastructure::database::entities::crustacean;

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: DbErr) -> DomainError {
    DomainError::Internal(format!("Database error: {}", e))
}

/// Maps a unique-index violation to `DuplicateName`; anything else is internal.
fn write_err(e: DbErr, name: &str) -> DomainError {
    let unique_violation = matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || e.to_string().contains("UNIQUE constraint failed");

    if unique_violation {
        DomainError::DuplicateName(name.to_string())
    } else {
        db_err(e)
    }
}

fn entity_to_domain(m: crustacean::Model) -> Crustacean {
    Crustacean {
        id: m.id,
        name: m.name,
        group: m.group_name,
        sub_group: m.sub_group,
        description: m.description,
        habitat: m.habitat,
        average_size: m.average_size,
        scientific_name: m.scientific_name,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn filtered(filter: &CrustaceanFilter) -> Select<crustacean::Entity> {
    let mut query = crustacean::Entity::find();
    if let Some(group) = &filter.group {
        query = query.filter(crustacean::Column::GroupName.eq(group.as_str()));
    }
    if let Some(sub_group) = &filter.sub_group {
        query = query.filter(crustacean::Column::SubGroup.eq(sub_group.as_str()));
    }
    query
}

// ── SeaOrmCrustaceanRepository ──────────────────────────────────

pub struct SeaOrmCrustaceanRepository {
    db: DatabaseConnection,
}

impl SeaOrmCrustaceanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CrustaceanRepository for SeaOrmCrustaceanRepository {
    async fn insert(&self, c: NewCrustacean) -> DomainResult<Crustacean> {
        let now = Utc::now();
        let name = c.name.clone();
        let model = crustacean::ActiveModel {
            id: NotSet,
            name: Set(c.name),
            group_name: Set(DEFAULT_GROUP.to_string()),
            sub_group: Set(c.sub_group),
            description: Set(c.description),
            habitat: Set(c.habitat),
            average_size: Set(c.average_size),
            scientific_name: Set(c.scientific_name),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, &name))?;
        info!("Crustacean saved: {} ({})", result.name, result.id);
        Ok(entity_to_domain(result))
    }

    async fn find_page(
        &self,
        filter: &CrustaceanFilter,
        limit: u64,
        offset: u64,
    ) -> DomainResult<Vec<Crustacean>> {
        let models = filtered(filter)
            .order_by_desc(crustacean::Column::CreatedAt)
            .order_by_desc(crustacean::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        debug!("Fetched {} crustaceans (limit={}, offset={})", models.len(), limit, offset);
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn count(&self, filter: &CrustaceanFilter) -> DomainResult<u64> {
        filtered(filter).count(&self.db).await.map_err(db_err)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Crustacean>> {
        let model = crustacean::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Crustacean>> {
        let model = crustacean::Entity::find()
            .filter(crustacean::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> DomainResult<bool> {
        let mut query = crustacean::Entity::find().filter(crustacean::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(crustacean::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await.map_err(db_err)?;
        Ok(count > 0)
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        let count = crustacean::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn update(&self, id: i32, changes: CrustaceanChanges) -> DomainResult<Option<Crustacean>> {
        let existing = crustacean::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(entity_to_domain(existing)));
        }

        let name = changes.name.clone().unwrap_or_else(|| existing.name.clone());
        let mut model: crustacean::ActiveModel = existing.into();
        if let Some(v) = changes.name {
            model.name = Set(v);
        }
        if let Some(v) = changes.sub_group {
            model.sub_group = Set(v);
        }
        if let Some(v) = changes.description {
            model.description = Set(v);
        }
        if let Some(v) = changes.habitat {
            model.habitat = Set(v);
        }
        if let Some(v) = changes.average_size {
            model.average_size = Set(v);
        }
        if let Some(v) = changes.scientific_name {
            model.scientific_name = Set(v);
        }
        model.updated_at = Set(Utc::now());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| write_err(e, &name))?;
        info!("Crustacean updated: {} ({})", updated.name, updated.id);
        Ok(Some(entity_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = crustacean::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected > 0 {
            info!("Crustacean deleted: {}", id);
        }
        Ok(result.rows_affected > 0)
    }
}

// ── Tests ──────────────────────────────────────────────────────
