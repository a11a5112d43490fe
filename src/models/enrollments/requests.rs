use super::entities::EnrollmentStatus;
use serde::Deserialize;
use ts_rs::TS;

// 教练为学员报名
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct EnrollStudentRequest {
    pub student_id: i64,
    pub notes: Option<String>,
}

// 修改选课状态
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct UpdateEnrollmentRequest {
    pub status: EnrollmentStatus,
    pub notes: Option<String>,
}

// 班级学员名单查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct EnrollmentQueryParams {
    pub status: Option<EnrollmentStatus>,
}
