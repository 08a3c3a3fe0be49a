//! Repository for the `treks` table.

use sqlx::PgPool;
use trailhead_core::pagination::{offset, Page, PageMeta};
use trailhead_core::types::DbId;

use crate::models::trek::{CreateTrek, Trek, TrekListParams, UpdateTrek};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, data_type, title, location, price, currency, duration, \
                       difficulty, type, distance_km, description, featured_image, \
                       gallery_images, is_featured, trek_days, is_active, \
                       created_at, updated_at";

/// Provides CRUD operations for treks.
pub struct TrekRepo;

impl TrekRepo {
    /// Insert a new trek, returning the created row.
    ///
    /// `currency` defaults to `'USD'`, `is_featured` to `false`, and
    /// `is_active` to `true` when not supplied.
    pub async fn create(pool: &PgPool, input: &CreateTrek) -> Result<Trek, sqlx::Error> {
        let query = format!(
            "INSERT INTO treks (data_type, title, location, price, currency, duration,
                                difficulty, type, distance_km, description, featured_image,
                                gallery_images, is_featured, trek_days, is_active)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'USD'), $6, $7, $8, $9, $10, $11, $12,
                     COALESCE($13, FALSE), $14, COALESCE($15, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trek>(&query)
            .bind(&input.data_type)
            .bind(&input.title)
            .bind(&input.location)
            .bind(input.price)
            .bind(input.currency.as_deref())
            .bind(&input.duration)
            .bind(&input.difficulty)
            .bind(&input.trek_type)
            .bind(input.distance_km)
            .bind(input.description.as_deref())
            .bind(input.featured_image.as_deref())
            .bind(input.gallery_images.as_ref())
            .bind(input.is_featured)
            .bind(&input.trek_days)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a trek by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Trek>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM treks WHERE id = $1");
        sqlx::query_as::<_, Trek>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List treks with optional filters, newest first.
    pub async fn list(pool: &PgPool, params: &TrekListParams) -> Result<Page<Trek>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.data_type.is_some() {
            conditions.push(format!("data_type = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.is_active.is_some() {
            conditions.push(format!("is_active = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM treks {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(ref data_type) = params.data_type {
            count = count.bind(data_type);
        }
        if let Some(is_active) = params.is_active {
            count = count.bind(is_active);
        }
        let total = count.fetch_one(pool).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM treks {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );
        let mut q = sqlx::query_as::<_, Trek>(&query);
        if let Some(ref data_type) = params.data_type {
            q = q.bind(data_type);
        }
        if let Some(is_active) = params.is_active {
            q = q.bind(is_active);
        }
        let items = q
            .bind(params.per_page)
            .bind(offset(params.page, params.per_page))
            .fetch_all(pool)
            .await?;

        Ok(Page {
            items,
            meta: PageMeta::new(params.page, params.per_page, total),
        })
    }

    /// Update a trek. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrek,
    ) -> Result<Option<Trek>, sqlx::Error> {
        let query = format!(
            "UPDATE treks SET
                data_type = COALESCE($2, data_type),
                title = COALESCE($3, title),
                location = COALESCE($4, location),
                price = COALESCE($5, price),
                currency = COALESCE($6, currency),
                duration = COALESCE($7, duration),
                difficulty = COALESCE($8, difficulty),
                type = COALESCE($9, type),
                distance_km = COALESCE($10, distance_km),
                description = COALESCE($11, description),
                featured_image = COALESCE($12, featured_image),
                gallery_images = COALESCE($13, gallery_images),
                is_featured = COALESCE($14, is_featured),
                trek_days = COALESCE($15, trek_days),
                is_active = COALESCE($16, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trek>(&query)
            .bind(id)
            .bind(input.data_type.as_deref())
            .bind(input.title.as_deref())
            .bind(input.location.as_deref())
            .bind(input.price)
            .bind(input.currency.as_deref())
            .bind(input.duration.as_deref())
            .bind(input.difficulty.as_deref())
            .bind(input.trek_type.as_deref())
            .bind(input.distance_km)
            .bind(input.description.as_deref())
            .bind(input.featured_image.as_deref())
            .bind(input.gallery_images.as_ref())
            .bind(input.is_featured)
            .bind(input.trek_days.as_ref())
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a trek by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM treks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
