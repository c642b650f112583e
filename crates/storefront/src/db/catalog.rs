//! Catalog repository for the `hockey_equipment` table.
//!
//! The catalog is read-only from the application's perspective: rows are
//! seeded by migration and never written here. The optional `sizes` column
//! is JSONB; it is decoded into a structured list at this boundary.

use sqlx::PgPool;
use sqlx::types::Json;

use rinkside_core::{Cents, ItemId};

use super::RepositoryError;
use crate::models::EquipmentItem;

/// Database row for a catalog item.
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: ItemId,
    name: String,
    description: String,
    price_in_cents: Cents,
    image: String,
    sizes: Option<Json<Vec<String>>>,
}

impl From<ItemRow> for EquipmentItem {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price_in_cents,
            image: row.image,
            sizes: row.sizes.map(|Json(sizes)| sizes),
        }
    }
}

/// Repository for catalog lookups.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a single catalog item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_item(&self, id: ItemId) -> Result<Option<EquipmentItem>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, name, description, price_in_cents, image, sizes
            FROM hockey_equipment
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(EquipmentItem::from))
    }

    /// List the full catalog, used for the landing page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_items(&self) -> Result<Vec<EquipmentItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, name, description, price_in_cents, image, sizes
            FROM hockey_equipment
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(EquipmentItem::from).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    #[test]
    fn test_seed_catalog_images_ship_with_the_crate() {
        // Every image path the seed migration writes must resolve to a
        // file under static/, or fresh installs render broken images.
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
        let seed = std::fs::read_to_string(manifest.join("migrations/0002_seed_catalog.sql"))
            .unwrap();

        let image_paths: Vec<&str> = seed
            .split('\'')
            .filter(|value| value.starts_with("/static/"))
            .collect();
        assert!(!image_paths.is_empty());

        for path in image_paths {
            let on_disk = manifest
                .join("static")
                .join(path.trim_start_matches("/static/"));
            assert!(on_disk.is_file(), "missing static asset: {path}");
        }
    }
}
