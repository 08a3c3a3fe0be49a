//! Repository for the `tours` table.

use sqlx::PgPool;
use trailhead_core::pagination::{offset, Page, PageMeta};
use trailhead_core::tours::SHOWCASE_LIMIT;
use trailhead_core::types::DbId;

use crate::models::tour::{CreateTour, Tour, TourListParams, UpdateTour};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, destination, description, featured_image, gallery_images, \
                       price, currency, discount_price, duration_days, duration_nights, \
                       start_date, end_date, difficulty_level, max_group_size, min_group_size, \
                       tour_type, inclusions, exclusions, accommodation_details, meal_plan, \
                       itinerary, guide_included, guide_language, porter_included, requirements, \
                       what_to_bring, is_active, is_featured, is_popular, available_slots, \
                       instant_booking, slug, meta_description, tags, created_at, updated_at";

/// Provides CRUD and showcase queries for tours.
pub struct TourRepo;

impl TourRepo {
    /// Insert a new tour, returning the created row.
    ///
    /// Column defaults applied when the input leaves them unset: currency
    /// `'USD'`, group size 1..15, guide included speaking English, no porter,
    /// active but neither featured nor popular, zero slots, no instant
    /// booking.
    pub async fn create(pool: &PgPool, input: &CreateTour) -> Result<Tour, sqlx::Error> {
        let query = format!(
            "INSERT INTO tours (title, destination, description, featured_image, gallery_images,
                                price, currency, discount_price, duration_days, duration_nights,
                                start_date, end_date, difficulty_level, max_group_size,
                                min_group_size, tour_type, inclusions, exclusions,
                                accommodation_details, meal_plan, itinerary, guide_included,
                                guide_language, porter_included, requirements, what_to_bring,
                                is_active, is_featured, is_popular, available_slots,
                                instant_booking, slug, meta_description, tags)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'USD'), $8, $9, $10, $11, $12, $13,
                     COALESCE($14, 15), COALESCE($15, 1), $16, $17, $18, $19, $20, $21,
                     COALESCE($22, TRUE), COALESCE($23, 'English'), COALESCE($24, FALSE),
                     $25, $26, COALESCE($27, TRUE), COALESCE($28, FALSE), COALESCE($29, FALSE),
                     COALESCE($30, 0), COALESCE($31, FALSE), $32, $33, $34)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tour>(&query)
            .bind(&input.title)
            .bind(&input.destination)
            .bind(input.description.as_deref())
            .bind(input.featured_image.as_deref())
            .bind(input.gallery_images.as_ref())
            .bind(input.price)
            .bind(input.currency.as_deref())
            .bind(input.discount_price)
            .bind(input.duration_days)
            .bind(input.duration_nights)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.difficulty_level)
            .bind(input.max_group_size)
            .bind(input.min_group_size)
            .bind(&input.tour_type)
            .bind(input.inclusions.as_ref())
            .bind(input.exclusions.as_ref())
            .bind(input.accommodation_details.as_ref())
            .bind(input.meal_plan.as_ref())
            .bind(input.itinerary.as_ref())
            .bind(input.guide_included)
            .bind(input.guide_language.as_deref())
            .bind(input.porter_included)
            .bind(input.requirements.as_deref())
            .bind(input.what_to_bring.as_deref())
            .bind(input.is_active)
            .bind(input.is_featured)
            .bind(input.is_popular)
            .bind(input.available_slots)
            .bind(input.instant_booking)
            .bind(input.slug.as_deref())
            .bind(input.meta_description.as_deref())
            .bind(input.tags.as_ref())
            .fetch_one(pool)
            .await
    }

    /// Find a tour by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tour>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tours WHERE id = $1");
        sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tours with optional filters, sorted by a whitelisted column.
    pub async fn list(pool: &PgPool, params: &TourListParams) -> Result<Page<Tour>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.is_active.is_some() {
            conditions.push(format!("is_active = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.is_featured.is_some() {
            conditions.push(format!("is_featured = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.is_popular.is_some() {
            conditions.push(format!("is_popular = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.tour_type.is_some() {
            conditions.push(format!("tour_type = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.difficulty_level.is_some() {
            conditions.push(format!("difficulty_level = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.destination.is_some() {
            conditions.push(format!("destination ILIKE ${bind_idx}"));
            bind_idx += 1;
        }
        if params.search.is_some() {
            conditions.push(format!("title ILIKE ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM tours {where_clause}");
        let count = Self::bind_filters(sqlx::query_as::<_, (i64,)>(&count_query), params);
        let (total,) = count.fetch_one(pool).await?;

        // sort_by / sort_order come from a fixed whitelist, never client text.
        let query = format!(
            "SELECT {COLUMNS} FROM tours {where_clause} \
             ORDER BY {sort_by} {sort_order} \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            sort_by = params.sort_by,
            sort_order = params.sort_order,
            next_idx = bind_idx + 1,
        );
        let mut q = sqlx::query_as::<_, Tour>(&query);
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

    /// Active featured tours, newest first, capped at the showcase limit.
    pub async fn featured(pool: &PgPool) -> Result<Vec<Tour>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tours \
             WHERE is_featured = TRUE AND is_active = TRUE \
             ORDER BY created_at DESC LIMIT $1"
        );
        sqlx::query_as::<_, Tour>(&query)
            .bind(SHOWCASE_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Active popular tours, newest first, capped at the showcase limit.
    pub async fn popular(pool: &PgPool) -> Result<Vec<Tour>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tours \
             WHERE is_popular = TRUE AND is_active = TRUE \
             ORDER BY created_at DESC LIMIT $1"
        );
        sqlx::query_as::<_, Tour>(&query)
            .bind(SHOWCASE_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Update a tour. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTour,
    ) -> Result<Option<Tour>, sqlx::Error> {
        let query = format!(
            "UPDATE tours SET
                title = COALESCE($2, title),
                destination = COALESCE($3, destination),
                description = COALESCE($4, description),
                featured_image = COALESCE($5, featured_image),
                gallery_images = COALESCE($6, gallery_images),
                price = COALESCE($7, price),
                currency = COALESCE($8, currency),
                discount_price = COALESCE($9, discount_price),
                duration_days = COALESCE($10, duration_days),
                duration_nights = COALESCE($11, duration_nights),
                start_date = COALESCE($12, start_date),
                end_date = COALESCE($13, end_date),
                difficulty_level = COALESCE($14, difficulty_level),
                max_group_size = COALESCE($15, max_group_size),
                min_group_size = COALESCE($16, min_group_size),
                tour_type = COALESCE($17, tour_type),
                inclusions = COALESCE($18, inclusions),
                exclusions = COALESCE($19, exclusions),
                accommodation_details = COALESCE($20, accommodation_details),
                meal_plan = COALESCE($21, meal_plan),
                itinerary = COALESCE($22, itinerary),
                guide_included = COALESCE($23, guide_included),
                guide_language = COALESCE($24, guide_language),
                porter_included = COALESCE($25, porter_included),
                requirements = COALESCE($26, requirements),
                what_to_bring = COALESCE($27, what_to_bring),
                is_active = COALESCE($28, is_active),
                is_featured = COALESCE($29, is_featured),
                is_popular = COALESCE($30, is_popular),
                available_slots = COALESCE($31, available_slots),
                instant_booking = COALESCE($32, instant_booking),
                slug = COALESCE($33, slug),
                meta_description = COALESCE($34, meta_description),
                tags = COALESCE($35, tags),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .bind(input.title.as_deref())
            .bind(input.destination.as_deref())
            .bind(input.description.as_deref())
            .bind(input.featured_image.as_deref())
            .bind(input.gallery_images.as_ref())
            .bind(input.price)
            .bind(input.currency.as_deref())
            .bind(input.discount_price)
            .bind(input.duration_days)
            .bind(input.duration_nights)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.difficulty_level.as_deref())
            .bind(input.max_group_size)
            .bind(input.min_group_size)
            .bind(input.tour_type.as_deref())
            .bind(input.inclusions.as_ref())
            .bind(input.exclusions.as_ref())
            .bind(input.accommodation_details.as_ref())
            .bind(input.meal_plan.as_ref())
            .bind(input.itinerary.as_ref())
            .bind(input.guide_included)
            .bind(input.guide_language.as_deref())
            .bind(input.porter_included)
            .bind(input.requirements.as_deref())
            .bind(input.what_to_bring.as_deref())
            .bind(input.is_active)
            .bind(input.is_featured)
            .bind(input.is_popular)
            .bind(input.available_slots)
            .bind(input.instant_booking)
            .bind(input.slug.as_deref())
            .bind(input.meta_description.as_deref())
            .bind(input.tags.as_ref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a tour by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply the list filter binds in declaration order.
    fn bind_filters<'q, O>(
        mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
        params: &'q TourListParams,
    ) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
        if let Some(is_active) = params.is_active {
            q = q.bind(is_active);
        }
        if let Some(is_featured) = params.is_featured {
            q = q.bind(is_featured);
        }
        if let Some(is_popular) = params.is_popular {
            q = q.bind(is_popular);
        }
        if let Some(ref tour_type) = params.tour_type {
            q = q.bind(tour_type);
        }
        if let Some(ref difficulty_level) = params.difficulty_level {
            q = q.bind(difficulty_level);
        }
        if let Some(ref destination) = params.destination {
            q = q.bind(format!("%{destination}%"));
        }
        if let Some(ref search) = params.search {
            q = q.bind(format!("%{search}%"));
        }
        q
    }
}
