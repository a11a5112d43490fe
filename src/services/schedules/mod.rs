pub mod list;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::schedules::requests::{CreateScheduleRequest, UpdateScheduleRequest};

lazy_storage_service!(ScheduleService);

impl ScheduleService {
    // 班级课表
    pub async fn list_schedules(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_schedules(self, request, class_id).await
    }

    pub async fn create_schedule(
        &self,
        request: &HttpRequest,
        class_id: i64,
        schedule: CreateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_schedule(self, request, class_id, schedule).await
    }

    pub async fn update_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_schedule(self, request, schedule_id, update).await
    }

    pub async fn delete_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_schedule(self, request, schedule_id).await
    }
}
