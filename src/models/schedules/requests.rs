use super::entities::DayOfWeek;
use super::time_format;
use chrono::NaiveTime;
use serde::Deserialize;
use ts_rs::TS;

// 新增时段请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct CreateScheduleRequest {
    pub day_of_week: DayOfWeek,
    #[serde(with = "time_format")]
    #[ts(type = "string")]
    pub time_start: NaiveTime,
    #[serde(with = "time_format")]
    #[ts(type = "string")]
    pub time_end: NaiveTime,
    pub location: Option<String>,
    pub notes: Option<String>,
}

// 修改时段请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct UpdateScheduleRequest {
    pub day_of_week: Option<DayOfWeek>,
    #[serde(default, with = "time_format::option")]
    #[ts(type = "string | null")]
    pub time_start: Option<NaiveTime>,
    #[serde(default, with = "time_format::option")]
    #[ts(type = "string | null")]
    pub time_end: Option<NaiveTime>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}
