//! 选课存储操作
//!
//! `classes.current_students` 是容量的唯一依据，与选课记录在同一事务中维护。

use super::classes::{load_class, release_seat, try_take_seat};
use super::schedules::booked_slots;
use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::class_enrollments::{
    ActiveModel, Column, Entity as ClassEnrollments, Model as EnrollmentModel,
};
use crate::entity::class_schedules::{Column as ScheduleColumn, Entity as ClassSchedules};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{DojoSystemError, Result};
use crate::models::{
    classes::entities::ApprovalStatus,
    enrollments::{
        entities::{Enrollment, EnrollmentStatus},
        responses::EnrollmentWithStudent,
    },
    users::entities::{User, UserRole, UserStatus},
};
use crate::workflow::conflict::{WeeklyInterval, first_conflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait, Set, TransactionTrait,
};
use tracing::debug;

async fn load_enrollment<C>(conn: &C, enrollment_id: i64) -> Result<Option<EnrollmentModel>>
where
    C: ConnectionTrait,
{
    ClassEnrollments::find_by_id(enrollment_id)
        .one(conn)
        .await
        .map_err(|e| DojoSystemError::database_operation(format!("查询选课记录失败: {e}")))
}

/// 学员时间冲突：目标班级的 active 时段 vs 学员所有 active 选课班级的 active 时段
async fn check_student_conflicts<C>(conn: &C, class_id: i64, student_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let new_slots: Vec<WeeklyInterval> = ClassSchedules::find()
        .filter(ScheduleColumn::ClassId.eq(class_id))
        .filter(ScheduleColumn::IsActive.eq(true))
        .all(conn)
        .await
        .map_err(|e| DojoSystemError::database_operation(format!("查询课表失败: {e}")))?
        .into_iter()
        .map(|m| WeeklyInterval::of(&m.into_schedule()))
        .collect();

    // 没有课表的班级不可能冲突
    if new_slots.is_empty() {
        return Ok(());
    }

    let enrolled_class_ids: Vec<i64> = ClassEnrollments::find()
        .filter(Column::StudentId.eq(student_id))
        .filter(Column::Status.eq(EnrollmentStatus::Active.to_string()))
        .all(conn)
        .await
        .map_err(|e| DojoSystemError::database_operation(format!("查询学员选课失败: {e}")))?
        .into_iter()
        .map(|m| m.class_id)
        .filter(|id| *id != class_id)
        .collect();

    if enrolled_class_ids.is_empty() {
        return Ok(());
    }

    let existing = booked_slots(
        conn,
        Condition::all().add(ScheduleColumn::ClassId.is_in(enrolled_class_ids)),
        None,
    )
    .await?;

    debug!(
        "Checking {} slot(s) of class {} against {} slot(s) of student {}",
        new_slots.len(),
        class_id,
        existing.len(),
        student_id
    );

    match first_conflict(new_slots.iter(), &existing) {
        Some(conflict) => Err(conflict.into()),
        None => Ok(()),
    }
}

fn capacity_error(class_code: &str, max_students: i32) -> DojoSystemError {
    DojoSystemError::capacity_exceeded(format!(
        "Class '{class_code}' is full ({max_students}/{max_students})"
    ))
}

impl SeaOrmStorage {
    /// 报名
    pub async fn enroll_student_impl(
        &self,
        class_id: i64,
        student_id: i64,
        notes: Option<String>,
    ) -> Result<Enrollment> {
        let txn = self.db.begin().await?;

        let class = load_class(&txn, class_id).await?;

        let student = Users::find_by_id(student_id)
            .one(&txn)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("查询学员失败: {e}")))?
            .ok_or_else(|| DojoSystemError::not_found(format!("Student {student_id} not found")))?
            .into_user();

        if student.role != UserRole::Student {
            return Err(DojoSystemError::validation(format!(
                "User '{}' is not a student",
                student.username
            )));
        }
        if !student.is_active() {
            return Err(DojoSystemError::validation(format!(
                "Student '{}' is not active",
                student.username
            )));
        }

        if class.approval_status != ApprovalStatus::Approved.to_string() || !class.is_active {
            return Err(DojoSystemError::invalid_state(format!(
                "Class '{}' is not open for enrollment",
                class.class_code
            )));
        }

        let duplicate = ClassEnrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&txn)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("查询选课记录失败: {e}")))?;
        if let Some(existing) = duplicate {
            return Err(DojoSystemError::duplicate_enrollment(format!(
                "Student '{}' already has a {} enrollment in class '{}'",
                student.username, existing.status, class.class_code
            )));
        }

        if class.current_students >= class.max_students {
            return Err(capacity_error(&class.class_code, class.max_students));
        }

        check_student_conflicts(&txn, class_id, student_id).await?;

        // 条件更新是最终裁决：并发争抢最后一个名额时只有一方成功
        if !try_take_seat(&txn, class_id).await? {
            return Err(capacity_error(&class.class_code, class.max_students));
        }

        let model = ActiveModel {
            class_id: Set(class_id),
            student_id: Set(student_id),
            status: Set(EnrollmentStatus::Active.to_string()),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            completed_at: Set(None),
            notes: Set(notes),
            ..Default::default()
        };

        let inserted = model.insert(&txn).await.map_err(|e| {
            if is_unique_violation(&e) {
                DojoSystemError::duplicate_enrollment(format!(
                    "Student '{}' is already enrolled in class '{}'",
                    student.username, class.class_code
                ))
            } else {
                DojoSystemError::database_operation(format!("创建选课记录失败: {e}"))
            }
        })?;

        txn.commit().await?;

        Ok(inserted.into_enrollment())
    }

    /// 通过 ID 获取选课记录
    pub async fn get_enrollment_by_id_impl(
        &self,
        enrollment_id: i64,
    ) -> Result<Option<Enrollment>> {
        Ok(load_enrollment(&self.db, enrollment_id)
            .await?
            .map(|m| m.into_enrollment()))
    }

    /// 班级学员名单
    pub async fn list_class_enrollments_impl(
        &self,
        class_id: i64,
        status: Option<EnrollmentStatus>,
    ) -> Result<Vec<EnrollmentWithStudent>> {
        let mut select = ClassEnrollments::find()
            .find_also_related(Users)
            .filter(Column::ClassId.eq(class_id));

        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let rows = select
            .order_by_asc(Column::EnrolledAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("查询班级学员失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, student)| {
                student.map(|s| EnrollmentWithStudent {
                    enrollment: enrollment.into_enrollment(),
                    student: s.into_user(),
                })
            })
            .collect())
    }

    /// 学员的所有选课记录，最新的在前
    pub async fn list_student_enrollments_impl(&self, student_id: i64) -> Result<Vec<Enrollment>> {
        let models = ClassEnrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::EnrolledAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("查询学员选课失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_enrollment()).collect())
    }

    /// 修改选课状态
    ///
    /// 离开 active 时释放名额，回到 active 时重新占用名额（满员则拒绝）。
    /// 状态可自由切换，回到 active 时不重新检查排课冲突。
    pub async fn update_enrollment_status_impl(
        &self,
        enrollment_id: i64,
        status: EnrollmentStatus,
        notes: Option<String>,
    ) -> Result<Enrollment> {
        let txn = self.db.begin().await?;

        let existing = load_enrollment(&txn, enrollment_id)
            .await?
            .ok_or_else(|| {
                DojoSystemError::not_found(format!("Enrollment {enrollment_id} not found"))
            })?;
        let was_active = existing.status == EnrollmentStatus::Active.to_string();
        let becomes_active = status == EnrollmentStatus::Active;

        if was_active && !becomes_active {
            release_seat(&txn, existing.class_id).await?;
        } else if !was_active && becomes_active && !try_take_seat(&txn, existing.class_id).await? {
            let class = load_class(&txn, existing.class_id).await?;
            return Err(capacity_error(&class.class_code, class.max_students));
        }

        let mut model = ActiveModel {
            id: Set(enrollment_id),
            status: Set(status.to_string()),
            ..Default::default()
        };

        if status == EnrollmentStatus::Completed {
            model.completed_at = Set(Some(chrono::Utc::now().timestamp()));
        } else if existing.completed_at.is_some() {
            model.completed_at = Set(None);
        }

        if let Some(notes) = notes {
            model.notes = Set(Some(notes));
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("更新选课状态失败: {e}")))?;

        txn.commit().await?;

        Ok(updated.into_enrollment())
    }

    /// 移除选课记录（硬删除），active 记录同时释放名额
    pub async fn remove_enrollment_impl(&self, enrollment_id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let Some(existing) = load_enrollment(&txn, enrollment_id).await? else {
            return Ok(false);
        };

        let result = ClassEnrollments::delete_by_id(enrollment_id)
            .exec(&txn)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("删除选课记录失败: {e}")))?;

        if result.rows_affected > 0 && existing.status == EnrollmentStatus::Active.to_string() {
            release_seat(&txn, existing.class_id).await?;
        }

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    /// 尚未在该班级有任何选课记录的活跃学员
    pub async fn list_available_students_impl(&self, class_id: i64) -> Result<Vec<User>> {
        let enrolled = ClassEnrollments::find()
            .select_only()
            .column(Column::StudentId)
            .filter(Column::ClassId.eq(class_id))
            .into_query();

        let users = Users::find()
            .filter(UserColumn::Role.eq(UserRole::STUDENT))
            .filter(UserColumn::Status.eq(UserStatus::Active.to_string()))
            .filter(UserColumn::Id.not_in_subquery(enrolled))
            .order_by_asc(UserColumn::FullName)
            .order_by_asc(UserColumn::Username)
            .all(&self.db)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("查询可报名学员失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }
}
