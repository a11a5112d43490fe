//! 报名
//!
//! 容量、重复报名与学员时间冲突在存储层的同一事务中检查，这里负责操作者权限。

use tracing::info;

use super::{require_class, require_owner, timetable};
use crate::errors::{DojoSystemError, Result};
use crate::models::{
    ActorContext,
    classes::entities::Class,
    enrollments::{
        entities::{Enrollment, EnrollmentStatus},
        requests::{EnrollStudentRequest, UpdateEnrollmentRequest},
        responses::{
            AvailableStudentsResponse, ClassRosterResponse, MyEnrollmentsResponse,
            StudentEnrollmentItem,
        },
    },
};
use crate::storage::Storage;

/// 选课记录及其所属班级
async fn require_enrollment(
    storage: &dyn Storage,
    enrollment_id: i64,
) -> Result<(Enrollment, Class)> {
    let enrollment = storage
        .get_enrollment_by_id(enrollment_id)
        .await?
        .ok_or_else(|| {
            DojoSystemError::not_found(format!("Enrollment {enrollment_id} not found"))
        })?;
    let class = require_class(storage, enrollment.class_id).await?;
    Ok((enrollment, class))
}

/// 为学员报名
pub async fn enroll(
    storage: &dyn Storage,
    actor: &ActorContext,
    class_id: i64,
    req: EnrollStudentRequest,
) -> Result<Enrollment> {
    let class = require_class(storage, class_id).await?;
    require_owner(actor, &class, "enroll students")?;

    let enrollment = storage
        .enroll_student(class_id, req.student_id, req.notes)
        .await?;

    info!(
        "User {} enrolled student {} into class '{}' (enrollment {})",
        actor.user_id, req.student_id, class.class_code, enrollment.id
    );
    Ok(enrollment)
}

/// 修改选课状态
pub async fn update_status(
    storage: &dyn Storage,
    actor: &ActorContext,
    enrollment_id: i64,
    req: UpdateEnrollmentRequest,
) -> Result<Enrollment> {
    let (enrollment, class) = require_enrollment(storage, enrollment_id).await?;
    require_owner(actor, &class, "change enrollments")?;

    let updated = storage
        .update_enrollment_status(enrollment_id, req.status, req.notes)
        .await?;

    info!(
        "User {} moved enrollment {} in class '{}' from {} to {}",
        actor.user_id, enrollment_id, class.class_code, enrollment.status, updated.status
    );
    Ok(updated)
}

/// 移除选课记录（硬删除）
pub async fn remove(storage: &dyn Storage, actor: &ActorContext, enrollment_id: i64) -> Result<()> {
    let (enrollment, class) = require_enrollment(storage, enrollment_id).await?;
    require_owner(actor, &class, "remove students")?;

    if !storage.remove_enrollment(enrollment_id).await? {
        return Err(DojoSystemError::not_found(format!(
            "Enrollment {enrollment_id} not found"
        )));
    }

    info!(
        "User {} removed student {} from class '{}'",
        actor.user_id, enrollment.student_id, class.class_code
    );
    Ok(())
}

/// 班级学员名单，所属教练和审批人可查看
pub async fn roster(
    storage: &dyn Storage,
    actor: &ActorContext,
    class_id: i64,
    status: Option<EnrollmentStatus>,
) -> Result<ClassRosterResponse> {
    let class = require_class(storage, class_id).await?;
    if !actor.can_review() {
        require_owner(actor, &class, "view its roster")?;
    }

    let items = storage.list_class_enrollments(class_id, status).await?;
    Ok(ClassRosterResponse { class_id, items })
}

pub async fn available_students(
    storage: &dyn Storage,
    actor: &ActorContext,
    class_id: i64,
) -> Result<AvailableStudentsResponse> {
    let class = require_class(storage, class_id).await?;
    require_owner(actor, &class, "enroll students")?;

    let items = storage.list_available_students(class_id).await?;
    Ok(AvailableStudentsResponse { class_id, items })
}

/// 当前学员的班级与课表
pub async fn my_enrollments(
    storage: &dyn Storage,
    actor: &ActorContext,
) -> Result<MyEnrollmentsResponse> {
    let enrollments = storage.list_student_enrollments(actor.user_id).await?;

    let mut items = Vec::with_capacity(enrollments.len());
    for enrollment in enrollments {
        let Some(class) = storage.get_class_by_id(enrollment.class_id).await? else {
            continue;
        };
        let slots = storage.list_class_schedules(class.id).await?;
        items.push(StudentEnrollmentItem {
            enrollment,
            class,
            timetable: timetable::format_timetable(&slots),
        });
    }

    Ok(MyEnrollmentsResponse { items })
}
