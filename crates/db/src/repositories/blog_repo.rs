//! Repository for the `blogs` table.

use sqlx::PgPool;
use trailhead_core::pagination::{offset, Page, PageMeta};
use trailhead_core::types::DbId;

use crate::models::blog::{Blog, CreateBlog, UpdateBlog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, subtitle, description, excerpt, author, content, conclusion, \
                       slug, image, is_active, created_at, updated_at";

/// Provides CRUD operations for blogs.
pub struct BlogRepo;

impl BlogRepo {
    /// Insert a new blog, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBlog) -> Result<Blog, sqlx::Error> {
        let query = format!(
            "INSERT INTO blogs (title, subtitle, description, excerpt, author, content,
                                conclusion, slug, image, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(&input.title)
            .bind(input.subtitle.as_deref())
            .bind(&input.description)
            .bind(input.excerpt.as_deref())
            .bind(input.author.as_deref())
            .bind(input.content.as_ref())
            .bind(input.conclusion.as_deref())
            .bind(&input.slug)
            .bind(input.image.as_deref())
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a blog by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE id = $1");
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a blog whose hyphenated, lowercased title matches the given slug.
    ///
    /// The lookup derives the slug from `title` at query time rather than
    /// trusting the stored `slug` column, so renamed titles stay reachable.
    pub async fn find_by_title_slug(
        pool: &PgPool,
        title_slug: &str,
    ) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blogs \
             WHERE LOWER(REPLACE(title, ' ', '-')) = LOWER($1) \
             LIMIT 1"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(title_slug)
            .fetch_optional(pool)
            .await
    }

    /// List blogs in insertion order.
    pub async fn list(pool: &PgPool, page: i64, per_page: i64) -> Result<Page<Blog>, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blogs")
            .fetch_one(pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM blogs ORDER BY id LIMIT $1 OFFSET $2");
        let items = sqlx::query_as::<_, Blog>(&query)
            .bind(per_page)
            .bind(offset(page, per_page))
            .fetch_all(pool)
            .await?;

        Ok(Page {
            items,
            meta: PageMeta::new(page, per_page, total),
        })
    }

    /// Total number of blogs.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blogs")
            .fetch_one(pool)
            .await?;
        Ok(total)
    }

    /// Update a blog. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlog,
    ) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!(
            "UPDATE blogs SET
                title = COALESCE($2, title),
                subtitle = COALESCE($3, subtitle),
                description = COALESCE($4, description),
                excerpt = COALESCE($5, excerpt),
                author = COALESCE($6, author),
                content = COALESCE($7, content),
                conclusion = COALESCE($8, conclusion),
                slug = COALESCE($9, slug),
                image = COALESCE($10, image),
                is_active = COALESCE($11, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(input.title.as_deref())
            .bind(input.subtitle.as_deref())
            .bind(input.description.as_deref())
            .bind(input.excerpt.as_deref())
            .bind(input.author.as_deref())
            .bind(input.content.as_ref())
            .bind(input.conclusion.as_deref())
            .bind(input.slug.as_deref())
            .bind(input.image.as_deref())
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a blog by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
