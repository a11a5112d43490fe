use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::{ApiResponse, enrollments::requests::UpdateEnrollmentRequest};
use crate::services::{error_response, require_actor};
use crate::workflow::enrollment;

pub async fn update_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment_id: i64,
    update_data: UpdateEnrollmentRequest,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match enrollment::update_status(storage.as_ref(), &actor, enrollment_id, update_data).await {
        Ok(record) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Enrollment updated successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn remove_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match enrollment::remove(storage.as_ref(), &actor, enrollment_id).await {
        Ok(()) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student removed from class")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
