//! Crustacean domain entity

use chrono::{DateTime, Utc};

/// Group assigned to every crustacean; create requests cannot override it.
pub const DEFAULT_GROUP: &str = "Crustaceans";

/// A crustacean species record
#[derive(Debug, Clone, PartialEq)]
pub struct Crustacean {
    /// Store-assigned identity, immutable after creation
    pub id: i32,
    /// Globally unique name
    pub name: String,
    pub group: String,
    pub sub_group: String,
    pub description: String,
    pub habitat: String,
    /// Average size in centimeters
    pub average_size: f64,
    pub scientific_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a crustacean.
///
/// `group` is not part of the command: the store fills in [`DEFAULT_GROUP`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewCrustacean {
    pub name: String,
    pub sub_group: String,
    pub description: String,
    pub habitat: String,
    pub average_size: f64,
    pub scientific_name: String,
}

/// Partial update: only `Some` fields are written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrustaceanChanges {
    pub name: Option<String>,
    pub sub_group: Option<String>,
    pub description: Option<String>,
    pub habitat: Option<String>,
    pub average_size: Option<f64>,
    pub scientific_name: Option<String>,
}

impl CrustaceanChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sub_group.is_none()
            && self.description.is_none()
            && self.habitat.is_none()
            && self.average_size.is_none()
            && self.scientific_name.is_none()
    }

    /// Applies the supplied fields onto `target`, leaving the rest untouched.
    pub fn apply_to(self, target: &mut Crustacean) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(sub_group) = self.sub_group {
            target.sub_group = sub_group;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(habitat) = self.habitat {
            target.habitat = habitat;
        }
        if let Some(average_size) = self.average_size {
            target.average_size = average_size;
        }
        if let Some(scientific_name) = self.scientific_name {
            target.scientific_name = scientific_name;
        }
    }
}

/// Equality filters for listing. Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrustaceanFilter {
    pub group: Option<String>,
    pub sub_group: Option<String>,
}

impl CrustaceanFilter {
    pub fn new(group: Option<String>, sub_group: Option<String>) -> Self {
        Self {
            group: group.filter(|g| !g.is_empty()),
            sub_group: sub_group.filter(|s| !s.is_empty()),
        }
    }

    pub fn matches(&self, crustacean: &Crustacean) -> bool {
        self.group.as_ref().map_or(true, |g| *g == crustacean.group)
            && self
                .sub_group
                .as_ref()
                .map_or(true, |s| *s == crustacean.sub_group)
    }
}

// ── Tests ──────────────────────────────────────────────────────
