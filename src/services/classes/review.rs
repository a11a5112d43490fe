use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, classes::requests::RejectClassRequest};
use crate::services::{error_response, require_actor};
use crate::workflow::approval;

pub async fn approve_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match approval::approve(storage.as_ref(), &actor, class_id).await {
        Ok(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class approved"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn reject_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    reject_data: RejectClassRequest,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match approval::reject(storage.as_ref(), &actor, class_id, &reject_data.reason).await {
        Ok(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class rejected"))),
        Err(e) => Ok(error_response(&e)),
    }
}
