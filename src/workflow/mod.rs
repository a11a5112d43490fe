//! 班级审批、排课与报名流程
//!
//! 每个操作显式接收 [`ActorContext`](crate::models::ActorContext)，在这里完成角色、归属与输入校验；
//! 需要原子性的写入交给 [`Storage`](crate::storage::Storage) 在单个事务中完成。

pub mod approval;
pub mod conflict;
pub mod enrollment;
pub mod scheduling;
pub mod timetable;

use crate::errors::{DojoSystemError, Result};
use crate::models::classes::entities::Class;
use crate::storage::Storage;

/// 校验函数的错误统一转为 Validation
pub(crate) fn check(result: std::result::Result<(), &'static str>) -> Result<()> {
    result.map_err(DojoSystemError::validation)
}

pub(crate) async fn require_class(storage: &dyn Storage, class_id: i64) -> Result<Class> {
    storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| DojoSystemError::not_found(format!("Class {class_id} not found")))
}

pub(crate) fn require_owner(
    actor: &crate::models::ActorContext,
    class: &Class,
    action: &str,
) -> Result<()> {
    if actor.owns_or_admin(class.instructor_id) {
        Ok(())
    } else {
        Err(DojoSystemError::permission(format!(
            "Only the instructor of class '{}' can {action}",
            class.class_code
        )))
    }
}

/// 未通过审批的班级只对所属教练和审批人可见
pub(crate) fn ensure_visible(actor: &crate::models::ActorContext, class: &Class) -> Result<()> {
    if class.is_approved() || actor.owns_or_admin(class.instructor_id) || actor.can_review() {
        Ok(())
    } else {
        Err(DojoSystemError::permission(format!(
            "Class '{}' is not open yet",
            class.class_code
        )))
    }
}

/// 课表和报名只对已通过审批的班级开放
pub(crate) fn require_approved(class: &Class, action: &str) -> Result<()> {
    if class.is_approved() {
        Ok(())
    } else {
        Err(DojoSystemError::invalid_state(format!(
            "Class '{}' is {}; {action} requires an approved class",
            class.class_code, class.approval_status
        )))
    }
}
