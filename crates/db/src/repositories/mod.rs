//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod blog_repo;
pub mod review_repo;
pub mod tour_repo;
pub mod trek_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use blog_repo::BlogRepo;
pub use review_repo::ReviewRepo;
pub use tour_repo::TourRepo;
pub use trek_repo::TrekRepo;
pub use user_repo::UserRepo;
