use super::entities::Enrollment;
use crate::models::classes::entities::Class;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

// 班级名单中的一行
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct EnrollmentWithStudent {
    pub enrollment: Enrollment,
    pub student: User,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct ClassRosterResponse {
    pub class_id: i64,
    pub items: Vec<EnrollmentWithStudent>,
}

// 学员视角：我的班级与课表
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct StudentEnrollmentItem {
    pub enrollment: Enrollment,
    pub class: Class,
    pub timetable: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct MyEnrollmentsResponse {
    pub items: Vec<StudentEnrollmentItem>,
}

// 可报名学员
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct AvailableStudentsResponse {
    pub class_id: i64,
    pub items: Vec<User>,
}
