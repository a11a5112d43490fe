pub mod auth;

pub mod users;

pub mod classes;

pub mod schedules;

pub mod enrollments;

pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use enrollments::configure_enrollment_routes;
pub use schedules::configure_schedule_routes;
pub use users::configure_user_routes;
