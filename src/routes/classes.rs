use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{
    ClassQueryParams, CreateClassRequest, RejectClassRequest, UpdateClassRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ClassService;
use crate::utils::SafeClassIdI64;

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassQueryParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, query.into_inner()).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn list_pending(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_pending(&req).await
}

pub async fn statistics(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.statistics(&req).await
}

pub async fn get_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, class_id.0).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, class_id.0, update_data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, class_id.0).await
}

pub async fn approve_class(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.approve_class(&req, class_id.0).await
}

pub async fn reject_class(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    reject_data: web::Json<RejectClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .reject_class(&req, class_id.0, reject_data.into_inner())
        .await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                // 教练只看到自己的班级，学员只看到已通过审批的班级
                web::resource("").route(web::get().to(list_classes)).route(
                    web::post()
                        .to(create_class)
                        // 教练为自己申请开班，管理员可以代指定教练申请
                        .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                ),
            )
            // 固定路径必须在 /{class_id} 之前注册
            .service(
                web::resource("/pending").route(
                    web::get()
                        .to(list_pending)
                        .wrap(middlewares::RequireRole::new_any(UserRole::manager_roles())),
                ),
            )
            .service(
                web::resource("/statistics").route(
                    web::get()
                        .to(statistics)
                        .wrap(middlewares::RequireRole::new_any(UserRole::manager_roles())),
                ),
            )
            .service(
                web::resource("/{class_id}")
                    .route(web::get().to(get_class))
                    .route(
                        web::put()
                            .to(update_class)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_class)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            )
            .service(
                web::resource("/{class_id}/approve").route(
                    web::post()
                        .to(approve_class)
                        .wrap(middlewares::RequireRole::new_any(UserRole::manager_roles())),
                ),
            )
            .service(
                web::resource("/{class_id}/reject").route(
                    web::post()
                        .to(reject_class)
                        .wrap(middlewares::RequireRole::new_any(UserRole::manager_roles())),
                ),
            ),
    );
}
