//! Repository for the `activities` table.

use sqlx::PgPool;
use trailhead_core::pagination::{offset, Page, PageMeta};
use trailhead_core::types::DbId;

use crate::models::activity::{Activity, ActivityListParams, CreateActivity, UpdateActivity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, location, price, currency, duration, difficulty, category, \
                       min_age, max_participants, description, inclusions, requirements, \
                       featured_image, gallery_images, is_featured, is_active, season, \
                       created_at, updated_at";

/// Provides CRUD operations for activities.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a new activity, returning the created row.
    ///
    /// `currency` defaults to `'USD'`, `is_featured` to `false`, and
    /// `is_active` to `true` when not supplied.
    pub async fn create(pool: &PgPool, input: &CreateActivity) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (title, location, price, currency, duration, difficulty,
                                     category, min_age, max_participants, description,
                                     inclusions, requirements, featured_image, gallery_images,
                                     is_featured, is_active, season)
             VALUES ($1, $2, $3, COALESCE($4, 'USD'), $5, $6, $7, $8, $9, $10, $11, $12, $13,
                     $14, COALESCE($15, FALSE), COALESCE($16, TRUE), $17)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(&input.title)
            .bind(&input.location)
            .bind(input.price)
            .bind(input.currency.as_deref())
            .bind(&input.duration)
            .bind(&input.difficulty)
            .bind(&input.category)
            .bind(input.min_age)
            .bind(input.max_participants)
            .bind(input.description.as_deref())
            .bind(input.inclusions.as_deref())
            .bind(input.requirements.as_deref())
            .bind(input.featured_image.as_deref())
            .bind(input.gallery_images.as_ref())
            .bind(input.is_featured)
            .bind(input.is_active)
            .bind(input.season.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find an activity by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List activities with optional filters, newest first.
    pub async fn list(
        pool: &PgPool,
        params: &ActivityListParams,
    ) -> Result<Page<Activity>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.category.is_some() {
            conditions.push(format!("category = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.is_active.is_some() {
            conditions.push(format!("is_active = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.is_featured.is_some() {
            conditions.push(format!("is_featured = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM activities {where_clause}");
        let count = Self::bind_filters(sqlx::query_as::<_, (i64,)>(&count_query), params);
        let (total,) = count.fetch_one(pool).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM activities {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );
        let mut q = sqlx::query_as::<_, Activity>(&query);
        q = Self::bind_filters(q, params);
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

    /// Update an activity. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActivity,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET
                title = COALESCE($2, title),
                location = COALESCE($3, location),
                price = COALESCE($4, price),
                currency = COALESCE($5, currency),
                duration = COALESCE($6, duration),
                difficulty = COALESCE($7, difficulty),
                category = COALESCE($8, category),
                min_age = COALESCE($9, min_age),
                max_participants = COALESCE($10, max_participants),
                description = COALESCE($11, description),
                inclusions = COALESCE($12, inclusions),
                requirements = COALESCE($13, requirements),
                featured_image = COALESCE($14, featured_image),
                gallery_images = COALESCE($15, gallery_images),
                is_featured = COALESCE($16, is_featured),
                is_active = COALESCE($17, is_active),
                season = COALESCE($18, season),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .bind(input.title.as_deref())
            .bind(input.location.as_deref())
            .bind(input.price)
            .bind(input.currency.as_deref())
            .bind(input.duration.as_deref())
            .bind(input.difficulty.as_deref())
            .bind(input.category.as_deref())
            .bind(input.min_age)
            .bind(input.max_participants)
            .bind(input.description.as_deref())
            .bind(input.inclusions.as_deref())
            .bind(input.requirements.as_deref())
            .bind(input.featured_image.as_deref())
            .bind(input.gallery_images.as_ref())
            .bind(input.is_featured)
            .bind(input.is_active)
            .bind(input.season.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete an activity by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply the list filter binds in declaration order.
    fn bind_filters<'q, O>(
        mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
        params: &'q ActivityListParams,
    ) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
        if let Some(ref category) = params.category {
            q = q.bind(category);
        }
        if let Some(is_active) = params.is_active {
            q = q.bind(is_active);
        }
        if let Some(is_featured) = params.is_featured {
            q = q.bind(is_featured);
        }
        q
    }
}
