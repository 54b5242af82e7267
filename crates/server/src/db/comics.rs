//! Comic collection repository.
//!
//! All operations are scoped to one user. Inserts are idempotent on
//! (user, UPC): a duplicate is a no-op that leaves the existing row
//! untouched, by design, so import and re-scan flows never clobber data.

use sqlx::PgPool;

use longbox_core::UserId;

use super::RepositoryError;
use crate::models::{Comic, ComicRecord};

/// Repository for a user's comic collection.
pub struct ComicRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ComicRepository<'a> {
    /// Create a new comic repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the user's comics in display order: starred first, then by
    /// manual sort order, newest additions breaking ties.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Comic>, RepositoryError> {
        let comics = sqlx::query_as::<_, Comic>(
            r"
            SELECT upc, name, issue_number, series_name, series_volume, series_year,
                   cover_image, printing, variant_number, starred, sort_order, added_at
            FROM user_comics
            WHERE user_id = $1
            ORDER BY starred DESC, sort_order ASC, added_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(comics)
    }

    /// Insert a comic at the end of the user's collection.
    ///
    /// The sort order is assigned `max + 1` within the user's collection.
    /// Returns `true` if a row was inserted, `false` if the (user, UPC)
    /// pair already existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert(
        &self,
        user_id: UserId,
        upc: &str,
        record: &ComicRecord,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO user_comics
                (user_id, upc, name, issue_number, series_name, series_volume,
                 series_year, cover_image, printing, variant_number, starred, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM user_comics WHERE user_id = $1))
            ON CONFLICT (user_id, upc) DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(upc)
        .bind(record.name.as_deref())
        .bind(record.issue_number.as_deref())
        .bind(record.series_name.as_deref())
        .bind(record.series_volume)
        .bind(record.series_year)
        .bind(record.cover_image.as_deref())
        .bind(record.printing.as_deref())
        .bind(record.variant_number.as_deref())
        .bind(record.starred.unwrap_or(false))
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Set the starred flag for one comic.
    ///
    /// Returns `true` if a row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_starred(
        &self,
        user_id: UserId,
        upc: &str,
        starred: bool,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE user_comics
            SET starred = $3
            WHERE user_id = $1 AND upc = $2
            ",
        )
        .bind(user_id)
        .bind(upc)
        .bind(starred)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Apply a bulk set of (UPC, sort order) updates atomically.
    ///
    /// Runs in a single transaction: if any update fails or names a UPC
    /// not in the collection, none apply.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if an entry matched no row and
    /// `RepositoryError::Database` if any update fails; either way the
    /// transaction is rolled back.
    pub async fn reorder(
        &self,
        user_id: UserId,
        entries: &[(String, i32)],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for (upc, sort_order) in entries {
            let result = sqlx::query(
                r"
                UPDATE user_comics
                SET sort_order = $3
                WHERE user_id = $1 AND upc = $2
                ",
            )
            .bind(user_id)
            .bind(upc)
            .bind(sort_order)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                // Dropping the transaction rolls back the earlier updates
                return Err(RepositoryError::NotFound);
            }
        }

        tx.commit().await?;

        Ok(())
    }

    /// Delete one comic. Succeeds even if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, user_id: UserId, upc: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM user_comics WHERE user_id = $1 AND upc = $2")
            .bind(user_id)
            .bind(upc)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Delete the user's entire collection. Succeeds even when empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM user_comics WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
