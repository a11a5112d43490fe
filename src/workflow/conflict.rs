//! 时间冲突检测
//!
//! 每个时段都是每周重复的半开区间 `[start, end)`。同一天的两个区间当且仅当
//! `a_start < b_end && b_start < a_end` 时重叠，因此首尾相接的课不算冲突。

use chrono::NaiveTime;

use crate::errors::DojoSystemError;
use crate::models::schedules::entities::{DayOfWeek, ScheduleSlot};

/// 半开区间是否重叠
pub fn overlaps(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// 每周重复的时间区间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyInterval {
    pub day: DayOfWeek,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WeeklyInterval {
    pub fn new(day: DayOfWeek, start: NaiveTime, end: NaiveTime) -> Self {
        Self { day, start, end }
    }

    pub fn of(slot: &ScheduleSlot) -> Self {
        Self::new(slot.day_of_week, slot.time_start, slot.time_end)
    }

    /// 不同星期的区间永不冲突
    pub fn conflicts_with(&self, other: &WeeklyInterval) -> bool {
        self.day == other.day && overlaps(self.start, self.end, other.start, other.end)
    }

    pub fn label(&self) -> String {
        format!(
            "{} {}-{}",
            self.day.label(),
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// 已被占用的时段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedSlot {
    pub class_id: i64,
    pub class_name: String,
    pub interval: WeeklyInterval,
}

/// 检测到的冲突
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub candidate: WeeklyInterval,
    pub class_id: i64,
    pub class_name: String,
    pub existing: WeeklyInterval,
}

impl Conflict {
    pub fn describe(&self) -> String {
        format!(
            "{} overlaps class '{}' ({})",
            self.candidate.label(),
            self.class_name,
            self.existing.label()
        )
    }
}

impl From<Conflict> for DojoSystemError {
    fn from(conflict: Conflict) -> Self {
        DojoSystemError::schedule_conflict(conflict.describe())
    }
}

/// 返回第一个冲突；没有冲突时返回 None
pub fn first_conflict<'a, I>(candidates: I, booked: &[BookedSlot]) -> Option<Conflict>
where
    I: IntoIterator<Item = &'a WeeklyInterval>,
{
    candidates.into_iter().find_map(|candidate| {
        booked
            .iter()
            .find(|slot| candidate.conflicts_with(&slot.interval))
            .map(|slot| Conflict {
                candidate: *candidate,
                class_id: slot.class_id,
                class_name: slot.class_name.clone(),
                existing: slot.interval,
            })
    })
}
