use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::ApiResponse;
use crate::services::{error_response, require_actor};
use crate::workflow::approval;

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match approval::class_detail(storage.as_ref(), &actor, class_id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Class information retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn statistics(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match approval::statistics(storage.as_ref(), &actor).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Class statistics retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
