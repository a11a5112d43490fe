//! 课表存储操作

use super::classes::load_class;
use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::class_schedules::{ActiveModel, Column, Entity as ClassSchedules};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::errors::{DojoSystemError, Result};
use crate::models::schedules::{
    entities::{DayOfWeek, ScheduleSlot},
    requests::{CreateScheduleRequest, UpdateScheduleRequest},
};
use crate::workflow::conflict::{BookedSlot, WeeklyInterval, first_conflict};
use crate::workflow::timetable::sort_slots;
use chrono::NaiveTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::debug;

/// 查询满足条件的已占用时段（只包含 active 时段）
pub(super) async fn booked_slots<C>(
    conn: &C,
    condition: Condition,
    exclude_slot: Option<i64>,
) -> Result<Vec<BookedSlot>>
where
    C: ConnectionTrait,
{
    let mut select = ClassSchedules::find()
        .find_also_related(Classes)
        .filter(Column::IsActive.eq(true))
        .filter(condition);

    if let Some(slot_id) = exclude_slot {
        select = select.filter(Column::Id.ne(slot_id));
    }

    let rows = select
        .all(conn)
        .await
        .map_err(|e| DojoSystemError::database_operation(format!("查询已占用时段失败: {e}")))?;

    Ok(rows
        .into_iter()
        .filter_map(|(slot, class)| {
            let class = class?;
            let slot = slot.into_schedule();
            Some(BookedSlot {
                class_id: class.id,
                class_name: class.class_name,
                interval: WeeklyInterval::of(&slot),
            })
        })
        .collect())
}

/// 同一班级、同一天、同一开始时间的时段是否已存在
async fn slot_exists<C>(
    conn: &C,
    class_id: i64,
    day: DayOfWeek,
    time_start: NaiveTime,
    exclude_slot: Option<i64>,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    let mut select = ClassSchedules::find()
        .filter(Column::ClassId.eq(class_id))
        .filter(Column::DayOfWeek.eq(day.to_string()))
        .filter(Column::TimeStart.eq(time_start));

    if let Some(slot_id) = exclude_slot {
        select = select.filter(Column::Id.ne(slot_id));
    }

    let found = select
        .one(conn)
        .await
        .map_err(|e| DojoSystemError::database_operation(format!("查询时段失败: {e}")))?;

    Ok(found.is_some())
}

/// 教练时间冲突：该教练其他在开班级的时段，以及本班级自身的时段
async fn check_instructor_conflicts<C>(
    conn: &C,
    instructor_id: i64,
    class_id: i64,
    candidate: &WeeklyInterval,
    exclude_slot: Option<i64>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let condition = Condition::all()
        .add(ClassColumn::InstructorId.eq(instructor_id))
        .add(
            Condition::any()
                .add(ClassColumn::IsActive.eq(true))
                .add(Column::ClassId.eq(class_id)),
        );

    let booked = booked_slots(conn, condition, exclude_slot).await?;
    debug!(
        "Checking {} against {} booked slot(s) of instructor {}",
        candidate.label(),
        booked.len(),
        instructor_id
    );

    match first_conflict([candidate], &booked) {
        Some(conflict) => Err(conflict.into()),
        None => Ok(()),
    }
}

fn duplicate_slot_error(day: DayOfWeek, time_start: NaiveTime) -> DojoSystemError {
    DojoSystemError::duplicate_slot(format!(
        "A slot on {} starting at {} already exists for this class",
        day.label(),
        time_start.format("%H:%M")
    ))
}

impl SeaOrmStorage {
    /// 班级课表（周一到周日，同一天按开始时间）
    pub async fn list_class_schedules_impl(&self, class_id: i64) -> Result<Vec<ScheduleSlot>> {
        let models = ClassSchedules::find()
            .filter(Column::ClassId.eq(class_id))
            .all(&self.db)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("查询课表失败: {e}")))?;

        let mut slots: Vec<ScheduleSlot> = models.into_iter().map(|m| m.into_schedule()).collect();
        sort_slots(&mut slots);
        Ok(slots)
    }

    /// 通过 ID 获取时段
    pub async fn get_schedule_by_id_impl(&self, schedule_id: i64) -> Result<Option<ScheduleSlot>> {
        let result = ClassSchedules::find_by_id(schedule_id)
            .one(&self.db)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("查询时段失败: {e}")))?;

        Ok(result.map(|m| m.into_schedule()))
    }

    /// 新增时段
    pub async fn create_schedule_impl(
        &self,
        class_id: i64,
        req: CreateScheduleRequest,
    ) -> Result<ScheduleSlot> {
        let txn = self.db.begin().await?;
        let class = load_class(&txn, class_id).await?;

        if slot_exists(&txn, class_id, req.day_of_week, req.time_start, None).await? {
            return Err(duplicate_slot_error(req.day_of_week, req.time_start));
        }

        let candidate = WeeklyInterval::new(req.day_of_week, req.time_start, req.time_end);
        check_instructor_conflicts(&txn, class.instructor_id, class_id, &candidate, None).await?;

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            class_id: Set(class_id),
            day_of_week: Set(req.day_of_week.to_string()),
            time_start: Set(req.time_start),
            time_end: Set(req.time_end),
            location: Set(req.location),
            notes: Set(req.notes),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(&txn).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_slot_error(req.day_of_week, req.time_start)
            } else {
                DojoSystemError::database_operation(format!("新增时段失败: {e}"))
            }
        })?;

        txn.commit().await?;

        Ok(inserted.into_schedule())
    }

    /// 修改时段，重复与冲突检查都排除自身
    pub async fn update_schedule_impl(
        &self,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<ScheduleSlot> {
        let txn = self.db.begin().await?;

        let existing = ClassSchedules::find_by_id(schedule_id)
            .one(&txn)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("查询时段失败: {e}")))?
            .ok_or_else(|| DojoSystemError::not_found(format!("Schedule {schedule_id} not found")))?
            .into_schedule();
        let class = load_class(&txn, existing.class_id).await?;

        let day = update.day_of_week.unwrap_or(existing.day_of_week);
        let time_start = update.time_start.unwrap_or(existing.time_start);
        let time_end = update.time_end.unwrap_or(existing.time_end);
        let is_active = update.is_active.unwrap_or(existing.is_active);

        if time_end <= time_start {
            return Err(DojoSystemError::validation(
                "time_end must be later than time_start",
            ));
        }

        if (day != existing.day_of_week || time_start != existing.time_start)
            && slot_exists(&txn, class.id, day, time_start, Some(schedule_id)).await?
        {
            return Err(duplicate_slot_error(day, time_start));
        }

        // 停用的时段不参与冲突检查
        if is_active {
            let candidate = WeeklyInterval::new(day, time_start, time_end);
            check_instructor_conflicts(
                &txn,
                class.instructor_id,
                class.id,
                &candidate,
                Some(schedule_id),
            )
            .await?;
        }

        let mut model = ActiveModel {
            id: Set(schedule_id),
            day_of_week: Set(day.to_string()),
            time_start: Set(time_start),
            time_end: Set(time_end),
            is_active: Set(is_active),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(location) = update.location {
            model.location = Set(Some(location));
        }

        if let Some(notes) = update.notes {
            model.notes = Set(Some(notes));
        }

        let updated = model.update(&txn).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_slot_error(day, time_start)
            } else {
                DojoSystemError::database_operation(format!("修改时段失败: {e}"))
            }
        })?;

        txn.commit().await?;

        Ok(updated.into_schedule())
    }

    /// 删除时段
    pub async fn delete_schedule_impl(&self, schedule_id: i64) -> Result<bool> {
        let result = ClassSchedules::delete_by_id(schedule_id)
            .exec(&self.db)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("删除时段失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
