pub mod enroll;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::enrollments::requests::{
    EnrollStudentRequest, EnrollmentQueryParams, UpdateEnrollmentRequest,
};

lazy_storage_service!(EnrollmentService);

impl EnrollmentService {
    // 教练为学员报名
    pub async fn enroll_student(
        &self,
        request: &HttpRequest,
        class_id: i64,
        enroll_data: EnrollStudentRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll_student(self, request, class_id, enroll_data).await
    }

    // 班级学员名单
    pub async fn list_class_enrollments(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: EnrollmentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_class_enrollments(self, request, class_id, query).await
    }

    pub async fn list_available_students(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_available_students(self, request, class_id).await
    }

    // 学员自己的班级
    pub async fn list_my_enrollments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_enrollments(self, request).await
    }

    pub async fn update_enrollment(
        &self,
        request: &HttpRequest,
        enrollment_id: i64,
        update_data: UpdateEnrollmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_enrollment(self, request, enrollment_id, update_data).await
    }

    pub async fn remove_enrollment(
        &self,
        request: &HttpRequest,
        enrollment_id: i64,
    ) -> ActixResult<HttpResponse> {
        update::remove_enrollment(self, request, enrollment_id).await
    }
}
