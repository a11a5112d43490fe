pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod review;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::classes::requests::{
    ClassQueryParams, CreateClassRequest, RejectClassRequest, UpdateClassRequest,
};

lazy_storage_service!(ClassService);

impl ClassService {
    // 获取班级列表
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: ClassQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, query).await
    }

    // 待审批班级
    pub async fn list_pending(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_pending(self, request).await
    }

    pub async fn statistics(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::statistics(self, request).await
    }

    // 申请开班
    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, class_data).await
    }

    // 班级详情
    pub async fn get_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_class(self, request, class_id).await
    }

    pub async fn update_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, request, class_id, update_data).await
    }

    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, request, class_id).await
    }

    // 审批通过
    pub async fn approve_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        review::approve_class(self, request, class_id).await
    }

    // 驳回
    pub async fn reject_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
        reject_data: RejectClassRequest,
    ) -> ActixResult<HttpResponse> {
        review::reject_class(self, request, class_id, reject_data).await
    }
}
