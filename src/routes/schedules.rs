use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::schedules::requests::{CreateScheduleRequest, UpdateScheduleRequest};
use crate::models::users::entities::UserRole;
use crate::services::ScheduleService;
use crate::utils::{SafeClassIdI64, SafeScheduleIdI64};

static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);

pub async fn list_schedules(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.list_schedules(&req, class_id.0).await
}

pub async fn create_schedule(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    schedule: web::Json<CreateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .create_schedule(&req, class_id.0, schedule.into_inner())
        .await
}

pub async fn update_schedule(
    req: HttpRequest,
    schedule_id: SafeScheduleIdI64,
    update: web::Json<UpdateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .update_schedule(&req, schedule_id.0, update.into_inner())
        .await
}

pub async fn delete_schedule(
    req: HttpRequest,
    schedule_id: SafeScheduleIdI64,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.delete_schedule(&req, schedule_id.0).await
}

// 配置路由
pub fn configure_schedule_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/{class_id}/schedules")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_schedules)).route(
                    web::post()
                        .to(create_schedule)
                        .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                ),
            ),
    );

    cfg.service(
        web::scope("/api/v1/schedules")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{schedule_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles()))
                    .route(web::put().to(update_schedule))
                    .route(web::delete().to(delete_schedule)),
            ),
    );
}
