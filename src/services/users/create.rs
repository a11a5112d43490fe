use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::UserService;
use crate::models::users::entities::User;
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_phone, validate_username};

/// 校验新用户字段，失败时直接给出响应
pub(crate) fn validate_new_user(user_data: &CreateUserRequest) -> Result<(), HttpResponse> {
    let checks = [
        (validate_username(&user_data.username), ErrorCode::UserNameInvalid),
        (validate_email(&user_data.email), ErrorCode::UserEmailInvalid),
        (validate_password(&user_data.password), ErrorCode::UserPasswordInvalid),
    ];

    for (result, code) in checks {
        if let Err(msg) = result {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
        }
    }

    if let Some(phone) = user_data.profile.phone.as_deref()
        && let Err(msg) = validate_phone(phone)
    {
        let body = ApiResponse::error_empty(ErrorCode::BadRequest, msg);
        return Err(HttpResponse::BadRequest().json(body));
    }

    Ok(())
}

/// 哈希密码后写入，重复的用户名或邮箱返回 409
pub(crate) async fn insert_user(
    storage: &Arc<dyn Storage>,
    mut user_data: CreateUserRequest,
) -> Result<User, HttpResponse> {
    user_data.password = hash_password(&user_data.password).map_err(|e| error_response(&e))?;
    storage
        .create_user(user_data)
        .await
        .map_err(|e| error_response(&e))
}

pub async fn create_user(
    service: &UserService,
    request: &HttpRequest,
    user_data: CreateUserRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = validate_new_user(&user_data) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);
    match insert_user(&storage, user_data).await {
        Ok(user) => {
            info!("User '{}' created with role {}", user.username, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                user,
                "User created successfully",
            )))
        }
        Err(resp) => Ok(resp),
    }
}
