//! Repository for the `reviews` table.

use sqlx::PgPool;
use trailhead_core::pagination::{offset, Page, PageMeta};
use trailhead_core::reviews::{LATEST_LIMIT, NEGATIVE_RATING_MAX, POSITIVE_RATING_MIN};
use trailhead_core::types::DbId;

use crate::models::review::{CreateReview, RatingCounts, Review, ReviewWithTrek};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, review, rating, status, trek_id, created_at, updated_at";

/// Column list for queries joined with the referenced trek.
const JOINED_COLUMNS: &str = "r.id, r.name, r.email, r.review, r.rating, r.status, r.trek_id, \
                              t.title AS trek_title, r.created_at, r.updated_at";

/// Provides submission, moderation, and stats queries for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review. The approval status always starts `false`.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (name, email, review, rating, trek_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.review)
            .bind(input.rating)
            .bind(input.trek_id)
            .fetch_one(pool)
            .await
    }

    /// Find a review by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether this email address submitted a review within the last
    /// `window_secs` seconds.
    ///
    /// The check is not atomic with [`create`](Self::create); two concurrent
    /// submissions can both pass it. Accepted as a limitation of the
    /// submission throttle.
    pub async fn has_recent_submission(
        pool: &PgPool,
        email: &str,
        window_secs: i64,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM reviews
                WHERE email = $1
                  AND created_at >= NOW() - make_interval(secs => $2)
            )",
        )
        .bind(email)
        .bind(window_secs as f64)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// List all reviews in submission order, each joined with the title of
    /// the trek it references (if any).
    pub async fn list(
        pool: &PgPool,
        page: i64,
        per_page: i64,
    ) -> Result<Page<ReviewWithTrek>, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM reviews r \
             LEFT JOIN treks t ON t.id = r.trek_id \
             ORDER BY r.id \
             LIMIT $1 OFFSET $2"
        );
        let items = sqlx::query_as::<_, ReviewWithTrek>(&query)
            .bind(per_page)
            .bind(offset(page, per_page))
            .fetch_all(pool)
            .await?;

        Ok(Page {
            items,
            meta: PageMeta::new(page, per_page, total),
        })
    }

    /// List approved reviews, newest first.
    pub async fn list_publishable(
        pool: &PgPool,
        page: i64,
        per_page: i64,
    ) -> Result<Page<ReviewWithTrek>, sqlx::Error> {
        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM reviews WHERE status = TRUE")
                .fetch_one(pool)
                .await?;

        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM reviews r \
             LEFT JOIN treks t ON t.id = r.trek_id \
             WHERE r.status = TRUE \
             ORDER BY r.created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        let items = sqlx::query_as::<_, ReviewWithTrek>(&query)
            .bind(per_page)
            .bind(offset(page, per_page))
            .fetch_all(pool)
            .await?;

        Ok(Page {
            items,
            meta: PageMeta::new(page, per_page, total),
        })
    }

    /// The most recent approved reviews, capped at the showcase limit.
    pub async fn latest_approved(pool: &PgPool) -> Result<Vec<ReviewWithTrek>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM reviews r \
             LEFT JOIN treks t ON t.id = r.trek_id \
             WHERE r.status = TRUE \
             ORDER BY r.created_at DESC LIMIT $1"
        );
        sqlx::query_as::<_, ReviewWithTrek>(&query)
            .bind(LATEST_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Approve a review. Returns `None` if no row with the given `id` exists.
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET status = TRUE, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a review by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count reviews in the positive (rating >= 4) and negative (rating < 3)
    /// buckets. Ratings in between belong to neither.
    pub async fn rating_counts(pool: &PgPool) -> Result<RatingCounts, sqlx::Error> {
        let (positive, negative): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE rating >= $1),
                    COUNT(*) FILTER (WHERE rating < $2)
             FROM reviews",
        )
        .bind(POSITIVE_RATING_MIN)
        .bind(NEGATIVE_RATING_MAX)
        .fetch_one(pool)
        .await?;
        Ok(RatingCounts { positive, negative })
    }
}
