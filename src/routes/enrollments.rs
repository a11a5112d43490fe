use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::{
    EnrollStudentRequest, EnrollmentQueryParams, UpdateEnrollmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::EnrollmentService;
use crate::utils::{SafeClassIdI64, SafeEnrollmentIdI64};

static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn enroll_student(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    enroll_data: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .enroll_student(&req, class_id.0, enroll_data.into_inner())
        .await
}

pub async fn list_class_enrollments(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    query: web::Query<EnrollmentQueryParams>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_class_enrollments(&req, class_id.0, query.into_inner())
        .await
}

pub async fn list_available_students(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_available_students(&req, class_id.0)
        .await
}

pub async fn list_my_enrollments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.list_my_enrollments(&req).await
}

pub async fn update_enrollment(
    req: HttpRequest,
    enrollment_id: SafeEnrollmentIdI64,
    update_data: web::Json<UpdateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .update_enrollment(&req, enrollment_id.0, update_data.into_inner())
        .await
}

pub async fn remove_enrollment(
    req: HttpRequest,
    enrollment_id: SafeEnrollmentIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .remove_enrollment(&req, enrollment_id.0)
        .await
}

// 配置路由
pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/{class_id}/enrollments")
            .wrap(middlewares::RequireJWT)
            .service(
                // 名单：所属教练与审批人；报名：所属教练或管理员
                web::resource("")
                    .route(
                        web::get()
                            .to(list_class_enrollments)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::post()
                            .to(enroll_student)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            ),
    );

    cfg.service(
        web::resource("/api/v1/classes/{class_id}/available-students")
            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles()))
            .wrap(middlewares::RequireJWT)
            .route(web::get().to(list_available_students)),
    );

    cfg.service(
        web::scope("/api/v1/enrollments")
            .wrap(middlewares::RequireJWT)
            // /me 必须在 /{enrollment_id} 之前注册
            .service(
                web::resource("/me").route(
                    web::get()
                        .to(list_my_enrollments)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            .service(
                web::resource("/{enrollment_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles()))
                    .route(web::put().to(update_enrollment))
                    .route(web::delete().to(remove_enrollment)),
            ),
    );
}
