//! Crustacean entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Crustacean model - one species record
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "crustaceans")]
pub struct Model {
    /// Auto-incremented row ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Species common name, unique across the table
    #[sea_orm(unique)]
    pub name: String,

    /// Taxonomic group; defaults to "Crustaceans"
    pub group_name: String,

    /// e.g. "Lobster", "Prawn", "Shrimp"
    pub sub_group: String,

    pub description: String,

    pub habitat: String,

    /// Average size in centimeters
    pub average_size: f64,

    pub scientific_name: String,

    /// When the row was inserted
    pub created_at: DateTime<Utc>,

    /// When the row was last modified
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
