use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::time_format;

// 星期
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "schedule.ts")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// 周一为 0，用于课表排序
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    /// 面向用户的名称
    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" => Ok(DayOfWeek::Monday),
            "tuesday" => Ok(DayOfWeek::Tuesday),
            "wednesday" => Ok(DayOfWeek::Wednesday),
            "thursday" => Ok(DayOfWeek::Thursday),
            "friday" => Ok(DayOfWeek::Friday),
            "saturday" => Ok(DayOfWeek::Saturday),
            "sunday" => Ok(DayOfWeek::Sunday),
            _ => Err(format!("Invalid day of week: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DayOfWeek>().map_err(|_| {
            serde::de::Error::custom(format!("无效的星期: '{s}'. 支持: monday ... sunday"))
        })
    }
}

// 每周固定时段 [time_start, time_end)
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct ScheduleSlot {
    pub id: i64,
    pub class_id: i64,
    pub day_of_week: DayOfWeek,
    #[serde(with = "time_format")]
    #[ts(type = "string")]
    pub time_start: NaiveTime,
    #[serde(with = "time_format")]
    #[ts(type = "string")]
    pub time_end: NaiveTime,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ScheduleSlot {
    /// `Monday 18:00-20:00`
    pub fn time_range_label(&self) -> String {
        format!(
            "{} {}-{}",
            self.day_of_week.label(),
            self.time_start.format("%H:%M"),
            self.time_end.format("%H:%M")
        )
    }
}
