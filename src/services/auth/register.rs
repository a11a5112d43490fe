use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::models::{
    ApiResponse,
    users::requests::{CreateUserRequest, RegisterRequest},
};
use crate::services::users::create::{insert_user, validate_new_user};

/// 自助注册只能得到学员账号
pub async fn handle_register(
    service: &AuthService,
    request: &HttpRequest,
    register_request: RegisterRequest,
) -> ActixResult<HttpResponse> {
    let create_request: CreateUserRequest = register_request.into();
    if let Err(resp) = validate_new_user(&create_request) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);
    match insert_user(&storage, create_request).await {
        Ok(user) => {
            info!("Student '{}' registered", user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Registration successful")))
        }
        Err(resp) => Ok(resp),
    }
}
