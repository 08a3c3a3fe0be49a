//! Integration tests for content CRUD operations.
//!
//! Exercises the repository layer against a real database:
//! - Creation applies column defaults
//! - Partial updates leave untouched fields alone
//! - List filters and pagination
//! - Delete semantics and unknown-id behaviour

use serde_json::json;
use sqlx::PgPool;
use trailhead_db::models::activity::{ActivityListParams, CreateActivity, UpdateActivity};
use trailhead_db::models::blog::{CreateBlog, UpdateBlog};
use trailhead_db::models::tour::{CreateTour, TourListParams, UpdateTour};
use trailhead_db::models::trek::{CreateTrek, TrekListParams, UpdateTrek};
use trailhead_db::models::user::CreateUser;
use trailhead_db::repositories::{ActivityRepo, BlogRepo, TourRepo, TrekRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_trek(title: &str) -> CreateTrek {
    CreateTrek {
        data_type: "trek".to_string(),
        title: title.to_string(),
        location: "Annapurna Region".to_string(),
        price: 1200.0,
        currency: None,
        duration: "12 Days".to_string(),
        difficulty: "Moderate".to_string(),
        trek_type: "Teahouse".to_string(),
        distance_km: 160.0,
        description: Some("Classic circuit through the Marshyangdi valley.".to_string()),
        featured_image: None,
        gallery_images: None,
        is_featured: None,
        trek_days: json!(["Arrive in Besisahar", "Walk to Chame"]),
        is_active: None,
    }
}

fn new_tour(title: &str) -> CreateTour {
    CreateTour {
        title: title.to_string(),
        destination: "Kathmandu".to_string(),
        description: None,
        featured_image: None,
        gallery_images: None,
        price: 850.0,
        currency: None,
        discount_price: None,
        duration_days: 5,
        duration_nights: 4,
        start_date: None,
        end_date: None,
        difficulty_level: "Easy".to_string(),
        max_group_size: None,
        min_group_size: None,
        tour_type: "Cultural".to_string(),
        inclusions: None,
        exclusions: None,
        accommodation_details: None,
        meal_plan: None,
        itinerary: None,
        guide_included: None,
        guide_language: None,
        porter_included: None,
        requirements: None,
        what_to_bring: None,
        is_active: None,
        is_featured: None,
        is_popular: None,
        available_slots: None,
        instant_booking: None,
        slug: None,
        meta_description: None,
        tags: None,
    }
}

fn new_activity(title: &str) -> CreateActivity {
    CreateActivity {
        title: title.to_string(),
        location: "Pokhara".to_string(),
        price: 95.0,
        currency: None,
        duration: "2 Hours".to_string(),
        difficulty: "Easy".to_string(),
        category: "Aerial".to_string(),
        min_age: Some(16),
        max_participants: Some(12),
        description: None,
        inclusions: None,
        requirements: None,
        featured_image: None,
        gallery_images: None,
        is_featured: None,
        is_active: None,
        season: Some("Autumn".to_string()),
    }
}

fn new_blog(title: &str) -> CreateBlog {
    CreateBlog {
        title: title.to_string(),
        subtitle: None,
        description: "A long-form write-up.".to_string(),
        excerpt: None,
        author: Some("Nima Sherpa".to_string()),
        content: Some(json!([
            {"heading": "Introduction", "paragraph": "Why this route matters."}
        ])),
        conclusion: None,
        slug: "a-long-form-write-up".to_string(),
        image: None,
        is_active: None,
    }
}

// ---------------------------------------------------------------------------
// Treks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_trek_applies_defaults(pool: PgPool) {
    let trek = TrekRepo::create(&pool, &new_trek("Annapurna Circuit"))
        .await
        .unwrap();

    assert_eq!(trek.title, "Annapurna Circuit");
    assert_eq!(trek.currency, "USD");
    assert!(trek.is_active);
    assert!(!trek.is_featured);
    assert_eq!(trek.trek_days, Some(json!(["Arrive in Besisahar", "Walk to Chame"])));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_trek_partial_update_leaves_other_fields(pool: PgPool) {
    let trek = TrekRepo::create(&pool, &new_trek("Langtang Valley"))
        .await
        .unwrap();

    let updated = TrekRepo::update(
        &pool,
        trek.id,
        &UpdateTrek {
            price: Some(1450.0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("row should exist");

    assert_eq!(updated.price, 1450.0);
    assert_eq!(updated.title, "Langtang Valley");
    assert_eq!(updated.location, trek.location);
    assert_eq!(updated.trek_days, trek.trek_days);
    assert!(updated.updated_at >= trek.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_trek_unknown_id(pool: PgPool) {
    assert!(TrekRepo::find_by_id(&pool, 9999).await.unwrap().is_none());
    assert!(TrekRepo::update(&pool, 9999, &UpdateTrek::default())
        .await
        .unwrap()
        .is_none());
    assert!(!TrekRepo::delete(&pool, 9999).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_trek_delete_then_find(pool: PgPool) {
    let trek = TrekRepo::create(&pool, &new_trek("Gokyo Lakes")).await.unwrap();

    assert!(TrekRepo::delete(&pool, trek.id).await.unwrap());
    assert!(TrekRepo::find_by_id(&pool, trek.id).await.unwrap().is_none());
    assert!(!TrekRepo::delete(&pool, trek.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_trek_list_filters(pool: PgPool) {
    TrekRepo::create(&pool, &new_trek("Active Trek")).await.unwrap();

    let mut inactive = new_trek("Inactive Trek");
    inactive.is_active = Some(false);
    TrekRepo::create(&pool, &inactive).await.unwrap();

    let mut package = new_trek("Everest Package");
    package.data_type = "package".to_string();
    TrekRepo::create(&pool, &package).await.unwrap();

    let params = TrekListParams {
        data_type: Some("trek".to_string()),
        is_active: None,
        page: 1,
        per_page: 10,
    };
    let page = TrekRepo::list(&pool, &params).await.unwrap();
    assert_eq!(page.meta.total, 2);
    assert!(page.items.iter().all(|t| t.data_type == "trek"));

    let params = TrekListParams {
        data_type: Some("trek".to_string()),
        is_active: Some(true),
        page: 1,
        per_page: 10,
    };
    let page = TrekRepo::list(&pool, &params).await.unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.items[0].title, "Active Trek");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_trek_list_pagination(pool: PgPool) {
    for i in 0..25 {
        TrekRepo::create(&pool, &new_trek(&format!("Trek {i}")))
            .await
            .unwrap();
    }

    let params = TrekListParams {
        data_type: None,
        is_active: None,
        page: 1,
        per_page: 10,
    };
    let page = TrekRepo::list(&pool, &params).await.unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.meta.total, 25);
    assert_eq!(page.meta.last_page, 3);

    let params = TrekListParams {
        page: 3,
        per_page: 10,
        ..params
    };
    let page = TrekRepo::list(&pool, &params).await.unwrap();
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.meta.current_page, 3);
}

// ---------------------------------------------------------------------------
// Tours
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_tour_applies_defaults(pool: PgPool) {
    let tour = TourRepo::create(&pool, &new_tour("Kathmandu Heritage"))
        .await
        .unwrap();

    assert_eq!(tour.currency, "USD");
    assert_eq!(tour.max_group_size, 15);
    assert_eq!(tour.min_group_size, 1);
    assert!(tour.guide_included);
    assert_eq!(tour.guide_language, "English");
    assert!(!tour.porter_included);
    assert!(tour.is_active);
    assert!(!tour.is_featured);
    assert!(!tour.is_popular);
    assert_eq!(tour.available_slots, 0);
    assert!(!tour.instant_booking);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tour_slug_must_be_unique(pool: PgPool) {
    let mut first = new_tour("Mustang Overland");
    first.slug = Some("mustang-overland".to_string());
    TourRepo::create(&pool, &first).await.unwrap();

    let mut second = new_tour("Mustang Overland Again");
    second.slug = Some("mustang-overland".to_string());
    assert!(TourRepo::create(&pool, &second).await.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tour_list_filters_and_sort(pool: PgPool) {
    let mut cheap = new_tour("Valley Walk");
    cheap.price = 100.0;
    TourRepo::create(&pool, &cheap).await.unwrap();

    let mut pricey = new_tour("Upper Mustang Expedition");
    pricey.price = 2800.0;
    pricey.destination = "Mustang".to_string();
    pricey.tour_type = "Adventure".to_string();
    TourRepo::create(&pool, &pricey).await.unwrap();

    // Substring search on title, case-insensitive.
    let params = TourListParams {
        search: Some("mustang".to_string()),
        sort_by: "created_at",
        sort_order: "DESC",
        page: 1,
        per_page: 10,
        ..Default::default()
    };
    let page = TourRepo::list(&pool, &params).await.unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.items[0].title, "Upper Mustang Expedition");

    // Sort by price ascending.
    let params = TourListParams {
        sort_by: "price",
        sort_order: "ASC",
        page: 1,
        per_page: 10,
        ..Default::default()
    };
    let page = TourRepo::list(&pool, &params).await.unwrap();
    assert_eq!(page.items[0].title, "Valley Walk");
    assert_eq!(page.items[1].title, "Upper Mustang Expedition");

    // Two filters combine.
    let params = TourListParams {
        tour_type: Some("Adventure".to_string()),
        destination: Some("mus".to_string()),
        sort_by: "created_at",
        sort_order: "DESC",
        page: 1,
        per_page: 10,
        ..Default::default()
    };
    let page = TourRepo::list(&pool, &params).await.unwrap();
    assert_eq!(page.meta.total, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tour_showcases_exclude_inactive(pool: PgPool) {
    for i in 0..7 {
        let mut tour = new_tour(&format!("Featured {i}"));
        tour.is_featured = Some(true);
        TourRepo::create(&pool, &tour).await.unwrap();
    }
    let mut hidden = new_tour("Hidden Featured");
    hidden.is_featured = Some(true);
    hidden.is_active = Some(false);
    TourRepo::create(&pool, &hidden).await.unwrap();

    let featured = TourRepo::featured(&pool).await.unwrap();
    assert_eq!(featured.len(), 6);
    assert!(featured.iter().all(|t| t.is_featured && t.is_active));

    let popular = TourRepo::popular(&pool).await.unwrap();
    assert!(popular.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tour_partial_update(pool: PgPool) {
    let tour = TourRepo::create(&pool, &new_tour("Chitwan Safari")).await.unwrap();

    let updated = TourRepo::update(
        &pool,
        tour.id,
        &UpdateTour {
            available_slots: Some(20),
            is_popular: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("row should exist");

    assert_eq!(updated.available_slots, 20);
    assert!(updated.is_popular);
    assert_eq!(updated.title, "Chitwan Safari");
    assert_eq!(updated.max_group_size, 15);
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_activity_crud_round_trip(pool: PgPool) {
    let activity = ActivityRepo::create(&pool, &new_activity("Paragliding"))
        .await
        .unwrap();
    assert_eq!(activity.currency, "USD");
    assert_eq!(activity.min_age, Some(16));

    let fetched = ActivityRepo::find_by_id(&pool, activity.id)
        .await
        .unwrap()
        .expect("row should exist");
    assert_eq!(fetched.title, "Paragliding");

    let updated = ActivityRepo::update(
        &pool,
        activity.id,
        &UpdateActivity {
            season: Some("Spring".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("row should exist");
    assert_eq!(updated.season.as_deref(), Some("Spring"));
    assert_eq!(updated.category, "Aerial");

    assert!(ActivityRepo::delete(&pool, activity.id).await.unwrap());
    assert!(ActivityRepo::find_by_id(&pool, activity.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_activity_list_category_filter(pool: PgPool) {
    ActivityRepo::create(&pool, &new_activity("Paragliding")).await.unwrap();

    let mut rafting = new_activity("White Water Rafting");
    rafting.category = "Water".to_string();
    ActivityRepo::create(&pool, &rafting).await.unwrap();

    let params = ActivityListParams {
        category: Some("Water".to_string()),
        page: 1,
        per_page: 10,
        ..Default::default()
    };
    let page = ActivityRepo::list(&pool, &params).await.unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.items[0].title, "White Water Rafting");
}

// ---------------------------------------------------------------------------
// Blogs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blog_crud_and_count(pool: PgPool) {
    let blog = BlogRepo::create(&pool, &new_blog("Packing For Altitude"))
        .await
        .unwrap();
    assert!(blog.is_active);

    let updated = BlogRepo::update(
        &pool,
        blog.id,
        &UpdateBlog {
            conclusion: Some("Pack light, sleep low.".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("row should exist");
    assert_eq!(updated.conclusion.as_deref(), Some("Pack light, sleep low."));
    assert_eq!(updated.title, "Packing For Altitude");

    assert_eq!(BlogRepo::count(&pool).await.unwrap(), 1);
    assert!(BlogRepo::delete(&pool, blog.id).await.unwrap());
    assert_eq!(BlogRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blog_title_slug_lookup(pool: PgPool) {
    BlogRepo::create(&pool, &new_blog("Packing For Altitude"))
        .await
        .unwrap();

    let found = BlogRepo::find_by_title_slug(&pool, "packing-for-altitude")
        .await
        .unwrap();
    assert!(found.is_some());

    // Lookup derives from the title, so mixed case still matches.
    let found = BlogRepo::find_by_title_slug(&pool, "Packing-For-Altitude")
        .await
        .unwrap();
    assert!(found.is_some());

    let missing = BlogRepo::find_by_title_slug(&pool, "no-such-post")
        .await
        .unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_create_and_lookup(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(user.role, "admin");

    let found = UserRepo::find_by_email(&pool, "admin@example.com")
        .await
        .unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));

    // Duplicate email violates the unique constraint.
    let duplicate = UserRepo::create(
        &pool,
        &CreateUser {
            name: "Other".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: None,
        },
    )
    .await;
    assert!(duplicate.is_err());
}
