use super::entities::ScheduleSlot;
use serde::Serialize;
use ts_rs::TS;

// 班级课表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct ScheduleListResponse {
    pub class_id: i64,
    pub items: Vec<ScheduleSlot>,
    pub timetable: String,
}
