use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::ApiResponse;
use crate::services::{error_response, require_actor};
use crate::workflow::scheduling;

pub async fn list_schedules(
    service: &ScheduleService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match scheduling::list_slots(storage.as_ref(), &actor, class_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Schedule retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
