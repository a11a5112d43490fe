use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::{ApiResponse, enrollments::requests::EnrollStudentRequest};
use crate::services::{error_response, require_actor};
use crate::workflow::enrollment;

pub async fn enroll_student(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
    enroll_data: EnrollStudentRequest,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match enrollment::enroll(storage.as_ref(), &actor, class_id, enroll_data).await {
        Ok(record) => Ok(HttpResponse::Created().json(ApiResponse::success(
            record,
            "Student enrolled successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
