use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::{
    ApiResponse,
    schedules::requests::{CreateScheduleRequest, UpdateScheduleRequest},
};
use crate::services::{error_response, require_actor};
use crate::workflow::scheduling;

pub async fn create_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    class_id: i64,
    schedule: CreateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match scheduling::add_slot(storage.as_ref(), &actor, class_id, schedule).await {
        Ok(slot) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(slot, "Schedule slot added")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
    update: UpdateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match scheduling::update_slot(storage.as_ref(), &actor, schedule_id, update).await {
        Ok(slot) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(slot, "Schedule slot updated")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = match require_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match scheduling::delete_slot(storage.as_ref(), &actor, schedule_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Schedule slot deleted"))),
        Err(e) => Ok(error_response(&e)),
    }
}
