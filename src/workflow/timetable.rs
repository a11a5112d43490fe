//! 课表排序与展示

use crate::models::schedules::entities::ScheduleSlot;

pub const EMPTY_TIMETABLE: &str = "No schedule yet";

/// 周一到周日，同一天按开始时间
pub fn sort_slots(slots: &mut [ScheduleSlot]) {
    slots.sort_by_key(|s| (s.day_of_week.ordinal(), s.time_start));
}

/// `Monday: 18:00-20:00 @ Hall A | Wednesday: 18:00-19:30`
pub fn format_timetable(slots: &[ScheduleSlot]) -> String {
    let parts: Vec<String> = slots
        .iter()
        .filter(|s| s.is_active)
        .map(|s| {
            let location = match s.location.as_deref() {
                Some(loc) if !loc.trim().is_empty() => format!(" @ {}", loc.trim()),
                _ => String::new(),
            };
            format!(
                "{}: {}-{}{}",
                s.day_of_week.label(),
                s.time_start.format("%H:%M"),
                s.time_end.format("%H:%M"),
                location
            )
        })
        .collect();

    if parts.is_empty() {
        EMPTY_TIMETABLE.to_string()
    } else {
        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedules::entities::DayOfWeek;
    use chrono::{NaiveTime, Utc};

    fn slot(id: i64, day: DayOfWeek, start: u32, end: u32, location: Option<&str>) -> ScheduleSlot {
        ScheduleSlot {
            id,
            class_id: 1,
            day_of_week: day,
            time_start: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
            time_end: NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
            location: location.map(str::to_string),
            notes: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_timetable() {
        assert_eq!(format_timetable(&[]), EMPTY_TIMETABLE);
    }

    #[test]
    fn test_sort_monday_first_then_start_time() {
        let mut slots = vec![
            slot(1, DayOfWeek::Sunday, 9, 10, None),
            slot(2, DayOfWeek::Wednesday, 18, 19, None),
            slot(3, DayOfWeek::Monday, 19, 20, None),
            slot(4, DayOfWeek::Monday, 8, 9, None),
        ];
        sort_slots(&mut slots);
        let ids: Vec<i64> = slots.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_format_with_and_without_location() {
        let slots = vec![
            slot(1, DayOfWeek::Monday, 18, 20, Some("Hall A")),
            slot(2, DayOfWeek::Wednesday, 18, 19, None),
        ];
        assert_eq!(
            format_timetable(&slots),
            "Monday: 18:00-20:00 @ Hall A | Wednesday: 18:00-19:00"
        );
    }

    #[test]
    fn test_inactive_slots_are_hidden() {
        let mut inactive = slot(1, DayOfWeek::Monday, 18, 20, None);
        inactive.is_active = false;
        assert_eq!(format_timetable(&[inactive]), EMPTY_TIMETABLE);
    }
}
