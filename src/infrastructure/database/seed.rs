//! Initial data for an empty crustaceans table

use tracing::info;

use crate::domain::{CrustaceanFilter, CrustaceanRepository, DomainResult, NewCrustacean};

fn seed_rows() -> Vec<NewCrustacean> {
    vec![
        NewCrustacean {
            name: "American Lobster".into(),
            sub_group: "Lobster".into(),
            description: "Large marine crustacean with large claws".into(),
            habitat: "North Atlantic Ocean".into(),
            average_size: 25.0,
            scientific_name: "Homarus americanus".into(),
        },
        NewCrustacean {
            name: "Giant Tiger Prawn".into(),
            sub_group: "Prawn".into(),
            description: "Large commercial prawn species".into(),
            habitat: "Indo-Pacific waters".into(),
            average_size: 15.0,
            scientific_name: "Penaeus monodon".into(),
        },
        NewCrustacean {
            name: "White Shrimp".into(),
            sub_group: "Shrimp".into(),
            description: "Common commercial shrimp species".into(),
            habitat: "Atlantic and Gulf coasts".into(),
            average_size: 8.0,
            scientific_name: "Litopenaeus setiferus".into(),
        },
    ]
}

/// Inserts the sample species when the table is empty.
///
/// Returns the number of rows inserted (0 when data already exists).
pub async fn seed_if_empty(repo: &dyn CrustaceanRepository) -> DomainResult<usize> {
    if repo.count(&CrustaceanFilter::default()).await? > 0 {
        return Ok(0);
    }

    let rows = seed_rows();
    let inserted = rows.len();
    for row in rows {
        repo.insert(row).await?;
    }

    info!("Database seeded with {} crustaceans", inserted);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryCrustaceanRepository;

    #[tokio::test]
    async fn seeds_only_an_empty_table() {
        let repo = InMemoryCrustaceanRepository::new();

        assert_eq!(seed_if_empty(&repo).await.unwrap(), 3);
        assert_eq!(seed_if_empty(&repo).await.unwrap(), 0);
        assert_eq!(repo.count(&CrustaceanFilter::default()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn seeds_one_row_per_sub_group() {
        let repo = InMemoryCrustaceanRepository::new();
        seed_if_empty(&repo).await.unwrap();

        for sub_group in ["Lobster", "Prawn", "Shrimp"] {
            let filter = CrustaceanFilter::new(None, Some(sub_group.into()));
            assert_eq!(repo.count(&filter).await.unwrap(), 1, "{sub_group}");
        }
    }
}
