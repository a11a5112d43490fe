use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::{ApiResponse, enrollments::requests::EnrollmentQueryParams};
use crate::services::{error_response, require_actor};
use crate::workflow::enrollment;

pub async fn list_class_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
    query: EnrollmentQueryParams,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match enrollment::roster(storage.as_ref(), &actor, class_id, query.status).await {
        Ok(roster) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            roster,
            "Class roster retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn list_available_students(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match enrollment::available_students(storage.as_ref(), &actor, class_id).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            students,
            "Available students retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn list_my_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match enrollment::my_enrollments(storage.as_ref(), &actor).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Enrollments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
