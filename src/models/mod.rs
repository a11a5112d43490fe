pub mod auth;
pub mod classes;
pub mod common;
pub mod enrollments;
pub mod schedules;
pub mod users;

pub use auth::ActorContext;
pub use common::{ApiResponse, ErrorCode, PaginationInfo, PaginationQuery};
