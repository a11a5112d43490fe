use super::entities::{Class, ClassLevel};
use crate::models::common::PaginationInfo;
use crate::models::schedules::entities::ScheduleSlot;
use serde::Serialize;
use ts_rs::TS;

// 班级列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Class>,
}

// 班级详情：附带课表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassDetailResponse {
    pub class: Class,
    pub instructor_name: Option<String>,
    pub schedules: Vec<ScheduleSlot>,
    pub timetable: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct LevelCount {
    pub level: ClassLevel,
    pub count: i64,
}

// 班级统计
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassStatistics {
    pub total_classes: i64,
    pub active_classes: i64,
    pub pending_classes: i64,
    pub active_enrollments: i64,
    pub active_students: i64,
    pub active_classes_by_level: Vec<LevelCount>,
}
