//! 班级申请与审批
//!
//! pending → approved | rejected，状态只迁移一次。关闭审批时教练创建的班级直接生效。

use tracing::info;

use super::{check, ensure_visible, require_approved, require_class, require_owner, timetable};
use crate::errors::{DojoSystemError, Result};
use crate::models::{
    ActorContext,
    classes::{
        entities::{ApprovalStatus, Class},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::{ClassDetailResponse, ClassListResponse, ClassStatistics},
    },
    users::entities::UserRole,
};
use crate::storage::{ReviewDecision, Storage};
use crate::utils::validate::{
    validate_class_code, validate_class_name, validate_date_range, validate_max_students,
    validate_rejection_reason,
};

/// 确定班级归属的教练
///
/// 教练只能为自己申请；管理员必须指定一个教练账号。
async fn resolve_instructor(
    storage: &dyn Storage,
    actor: &ActorContext,
    requested: Option<i64>,
) -> Result<i64> {
    match actor.role {
        UserRole::Instructor => match requested {
            Some(id) if id != actor.user_id => Err(DojoSystemError::permission(
                "Instructors can only propose classes for themselves",
            )),
            _ => Ok(actor.user_id),
        },
        UserRole::Admin => {
            let instructor_id = requested.ok_or_else(|| {
                DojoSystemError::validation("instructor_id is required for admin-created classes")
            })?;
            let instructor = storage.get_user_by_id(instructor_id).await?.ok_or_else(|| {
                DojoSystemError::not_found(format!("User {instructor_id} not found"))
            })?;
            if instructor.role != UserRole::Instructor {
                return Err(DojoSystemError::validation(format!(
                    "User '{}' is not an instructor",
                    instructor.username
                )));
            }
            Ok(instructor_id)
        }
        _ => Err(DojoSystemError::permission(
            "Only instructors can propose classes",
        )),
    }
}

/// 申请开班
pub async fn propose(
    storage: &dyn Storage,
    actor: &ActorContext,
    mut req: CreateClassRequest,
    require_approval: bool,
) -> Result<Class> {
    let instructor_id = resolve_instructor(storage, actor, req.instructor_id).await?;

    req.class_code = req.class_code.trim().to_string();
    req.class_name = req.class_name.trim().to_string();
    check(validate_class_code(&req.class_code))?;
    check(validate_class_name(&req.class_name))?;
    check(validate_max_students(req.max_students))?;
    check(validate_date_range(req.start_date, req.end_date))?;

    let class = storage
        .create_class(instructor_id, req, !require_approval)
        .await?;

    info!(
        "User {} proposed class '{}' (id {}) for instructor {}, status {}",
        actor.user_id, class.class_code, class.id, instructor_id, class.approval_status
    );
    Ok(class)
}

fn require_reviewer(actor: &ActorContext) -> Result<()> {
    if actor.can_review() {
        Ok(())
    } else {
        Err(DojoSystemError::permission(
            "Only managers can review class proposals",
        ))
    }
}

/// 审批通过
pub async fn approve(storage: &dyn Storage, actor: &ActorContext, class_id: i64) -> Result<Class> {
    require_reviewer(actor)?;

    let class = storage
        .review_class(class_id, actor.user_id, ReviewDecision::Approve)
        .await?;

    info!(
        "Class '{}' (id {}) approved by user {}",
        class.class_code, class.id, actor.user_id
    );
    Ok(class)
}

/// 驳回，必须给出原因
pub async fn reject(
    storage: &dyn Storage,
    actor: &ActorContext,
    class_id: i64,
    reason: &str,
) -> Result<Class> {
    require_reviewer(actor)?;
    check(validate_rejection_reason(reason))?;

    let class = storage
        .review_class(
            class_id,
            actor.user_id,
            ReviewDecision::Reject {
                reason: reason.trim().to_string(),
            },
        )
        .await?;

    info!(
        "Class '{}' (id {}) rejected by user {}: {}",
        class.class_code,
        class.id,
        actor.user_id,
        reason.trim()
    );
    Ok(class)
}

/// 修改已通过审批的班级
pub async fn update_class(
    storage: &dyn Storage,
    actor: &ActorContext,
    class_id: i64,
    mut update: UpdateClassRequest,
) -> Result<Class> {
    let class = require_class(storage, class_id).await?;
    require_owner(actor, &class, "edit it")?;

    require_approved(&class, "editing")?;

    if let Some(name) = update.class_name.as_mut() {
        *name = name.trim().to_string();
        check(validate_class_name(name))?;
    }
    if let Some(max_students) = update.max_students {
        check(validate_max_students(max_students))?;
    }
    if update.end_date.is_some() {
        check(validate_date_range(class.start_date, update.end_date))?;
    }

    let updated = storage
        .update_class(class_id, update)
        .await?
        .ok_or_else(|| DojoSystemError::not_found(format!("Class {class_id} not found")))?;

    info!(
        "Class '{}' (id {}) updated by user {}",
        updated.class_code, updated.id, actor.user_id
    );
    Ok(updated)
}

/// 删除班级，课表与选课记录级联删除
pub async fn delete_class(
    storage: &dyn Storage,
    actor: &ActorContext,
    class_id: i64,
) -> Result<()> {
    let class = require_class(storage, class_id).await?;
    require_owner(actor, &class, "delete it")?;

    if !storage.delete_class(class_id).await? {
        return Err(DojoSystemError::not_found(format!(
            "Class {class_id} not found"
        )));
    }

    info!(
        "Class '{}' (id {}) deleted by user {}",
        class.class_code, class.id, actor.user_id
    );
    Ok(())
}

/// 班级详情与课表
pub async fn class_detail(
    storage: &dyn Storage,
    actor: &ActorContext,
    class_id: i64,
) -> Result<ClassDetailResponse> {
    let class = require_class(storage, class_id).await?;
    ensure_visible(actor, &class)?;

    let instructor_name = storage
        .get_user_by_id(class.instructor_id)
        .await?
        .map(|u| u.display_name().to_string());
    let schedules = storage.list_class_schedules(class_id).await?;
    let timetable = timetable::format_timetable(&schedules);

    Ok(ClassDetailResponse {
        class,
        instructor_name,
        schedules,
        timetable,
    })
}

/// 班级列表：教练只看自己的班级，学员只看已开班的班级
pub async fn list_classes(
    storage: &dyn Storage,
    actor: &ActorContext,
    mut query: ClassListQuery,
) -> Result<ClassListResponse> {
    match actor.role {
        UserRole::Instructor => query.instructor_id = Some(actor.user_id),
        UserRole::Student => query.approval_status = Some(ApprovalStatus::Approved),
        UserRole::Manager | UserRole::Admin => {}
    }

    storage.list_classes_with_pagination(query).await
}

/// 待审批列表，最新的在前
pub async fn pending_classes(storage: &dyn Storage, actor: &ActorContext) -> Result<Vec<Class>> {
    require_reviewer(actor)?;
    storage.list_pending_classes().await
}

pub async fn statistics(storage: &dyn Storage, actor: &ActorContext) -> Result<ClassStatistics> {
    require_reviewer(actor)?;
    storage.class_statistics().await
}
