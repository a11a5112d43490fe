use actix_web::{HttpRequest, HttpResponse};
use tracing::{error, info};

use crate::errors::DojoSystemError;
use crate::middlewares::RequireJWT;
use crate::models::{ActorContext, ApiResponse, ErrorCode};

/// 为服务生成 `new_lazy` 与 `get_storage`
macro_rules! lazy_storage_service {
    ($name:ident) => {
        pub struct $name {
            storage: Option<std::sync::Arc<dyn $crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> std::sync::Arc<dyn $crate::storage::Storage> {
                if let Some(storage) = &self.storage {
                    storage.clone()
                } else {
                    request
                        .app_data::<actix_web::web::Data<
                            std::sync::Arc<dyn $crate::storage::Storage>,
                        >>()
                        .expect("Storage not found in app data")
                        .get_ref()
                        .clone()
                }
            }
        }
    };
}

pub mod auth;
pub mod classes;
pub mod enrollments;
pub mod schedules;
pub mod users;

pub use auth::AuthService;
pub use classes::ClassService;
pub use enrollments::EnrollmentService;
pub use schedules::ScheduleService;
pub use users::UserService;

/// 当前操作者；路由未挂 RequireJWT 时返回 401
pub(crate) fn require_actor(request: &HttpRequest) -> Result<ActorContext, HttpResponse> {
    RequireJWT::extract_actor(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user id",
        ))
    })
}

/// 业务错误统一转为响应，基础设施错误不向客户端暴露细节
pub(crate) fn error_response(err: &DojoSystemError) -> HttpResponse {
    let (status, code) = ErrorCode::from_error(err);

    if err.is_business_rejection() {
        info!("Request rejected: {}", err);
        HttpResponse::build(status).json(ApiResponse::error_empty(code, err.message()))
    } else if status.is_client_error() {
        HttpResponse::build(status).json(ApiResponse::error_empty(code, err.message()))
    } else {
        error!("{}", err);
        HttpResponse::build(status).json(ApiResponse::error_empty(
            code,
            "Internal server error, please try again later",
        ))
    }
}
