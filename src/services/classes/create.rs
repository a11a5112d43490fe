use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, classes::requests::CreateClassRequest};
use crate::services::{error_response, require_actor};
use crate::workflow::approval;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);
    let require_approval = AppConfig::get().requires_class_approval();

    match approval::propose(storage.as_ref(), &actor, class_data, require_approval).await {
        Ok(class) => {
            let message = if class.is_approved() {
                "Class created successfully"
            } else {
                "Class proposal submitted for approval"
            };
            Ok(HttpResponse::Created().json(ApiResponse::success(class, message)))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
