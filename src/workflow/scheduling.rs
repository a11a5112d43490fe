//! 排课
//!
//! 只有所属教练（或管理员）可以维护已通过审批班级的课表。重复时段与教练时间冲突
//! 在存储层的事务里检查。

use tracing::info;

use super::{check, ensure_visible, require_approved, require_class, require_owner, timetable};
use crate::errors::{DojoSystemError, Result};
use crate::models::{
    ActorContext,
    schedules::{
        entities::ScheduleSlot,
        requests::{CreateScheduleRequest, UpdateScheduleRequest},
        responses::ScheduleListResponse,
    },
};
use crate::storage::Storage;
use crate::utils::validate::{validate_location, validate_time_range};

async fn require_slot(storage: &dyn Storage, schedule_id: i64) -> Result<ScheduleSlot> {
    storage
        .get_schedule_by_id(schedule_id)
        .await?
        .ok_or_else(|| DojoSystemError::not_found(format!("Schedule {schedule_id} not found")))
}

pub async fn list_slots(
    storage: &dyn Storage,
    actor: &ActorContext,
    class_id: i64,
) -> Result<ScheduleListResponse> {
    let class = require_class(storage, class_id).await?;
    ensure_visible(actor, &class)?;

    let items = storage.list_class_schedules(class_id).await?;
    let timetable = timetable::format_timetable(&items);

    Ok(ScheduleListResponse {
        class_id,
        items,
        timetable,
    })
}

/// 新增每周时段
pub async fn add_slot(
    storage: &dyn Storage,
    actor: &ActorContext,
    class_id: i64,
    req: CreateScheduleRequest,
) -> Result<ScheduleSlot> {
    let class = require_class(storage, class_id).await?;
    require_owner(actor, &class, "manage its schedule")?;
    require_approved(&class, "scheduling")?;

    check(validate_time_range(req.time_start, req.time_end))?;
    check(validate_location(req.location.as_deref()))?;

    let slot = storage.create_schedule(class_id, req).await?;

    info!(
        "User {} added slot {} ({}) to class '{}'",
        actor.user_id,
        slot.id,
        slot.time_range_label(),
        class.class_code
    );
    Ok(slot)
}

/// 修改时段
pub async fn update_slot(
    storage: &dyn Storage,
    actor: &ActorContext,
    schedule_id: i64,
    update: UpdateScheduleRequest,
) -> Result<ScheduleSlot> {
    let slot = require_slot(storage, schedule_id).await?;
    let class = require_class(storage, slot.class_id).await?;
    require_owner(actor, &class, "manage its schedule")?;
    require_approved(&class, "scheduling")?;

    check(validate_time_range(
        update.time_start.unwrap_or(slot.time_start),
        update.time_end.unwrap_or(slot.time_end),
    ))?;
    check(validate_location(update.location.as_deref()))?;

    let updated = storage.update_schedule(schedule_id, update).await?;

    info!(
        "User {} changed slot {} of class '{}' to {}",
        actor.user_id,
        schedule_id,
        class.class_code,
        updated.time_range_label()
    );
    Ok(updated)
}

/// 删除时段，立即生效
pub async fn delete_slot(
    storage: &dyn Storage,
    actor: &ActorContext,
    schedule_id: i64,
) -> Result<()> {
    let slot = require_slot(storage, schedule_id).await?;
    let class = require_class(storage, slot.class_id).await?;
    require_owner(actor, &class, "manage its schedule")?;

    if !storage.delete_schedule(schedule_id).await? {
        return Err(DojoSystemError::not_found(format!(
            "Schedule {schedule_id} not found"
        )));
    }

    info!(
        "User {} removed slot {} ({}) from class '{}'",
        actor.user_id,
        schedule_id,
        slot.time_range_label(),
        class.class_code
    );
    Ok(())
}
