//! 班级存储操作

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::class_enrollments::{Column as EnrollmentColumn, Entity as ClassEnrollments};
use crate::entity::class_schedules::{Column as ScheduleColumn, Entity as ClassSchedules};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes, Model as ClassModel};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{DojoSystemError, Result};
use crate::models::{
    PaginationInfo,
    classes::{
        entities::{ApprovalStatus, Class, ClassLevel},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::{ClassListResponse, ClassStatistics, LevelCount},
    },
    enrollments::entities::EnrollmentStatus,
    users::entities::{UserRole, UserStatus},
};
use crate::storage::ReviewDecision;
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 在给定连接（可以是事务）上读取班级，不存在时返回 NotFound
pub(super) async fn load_class<C>(conn: &C, class_id: i64) -> Result<ClassModel>
where
    C: ConnectionTrait,
{
    Classes::find_by_id(class_id)
        .one(conn)
        .await
        .map_err(|e| DojoSystemError::database_operation(format!("查询班级失败: {e}")))?
        .ok_or_else(|| DojoSystemError::not_found(format!("Class {class_id} not found")))
}

/// 在读人数 +1，已满时不修改任何行并返回 false
pub(super) async fn try_take_seat<C>(conn: &C, class_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::ExprTrait;

    let result = Classes::update_many()
        .col_expr(
            Column::CurrentStudents,
            Expr::col(Column::CurrentStudents).add(1),
        )
        .col_expr(
            Column::UpdatedAt,
            Expr::value(chrono::Utc::now().timestamp()),
        )
        .filter(Column::Id.eq(class_id))
        .filter(Expr::col(Column::CurrentStudents).lt(Expr::col(Column::MaxStudents)))
        .exec(conn)
        .await
        .map_err(|e| DojoSystemError::database_operation(format!("更新在读人数失败: {e}")))?;

    Ok(result.rows_affected > 0)
}

/// 在读人数 -1，不会低于 0
pub(super) async fn release_seat<C>(conn: &C, class_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::ExprTrait;

    Classes::update_many()
        .col_expr(
            Column::CurrentStudents,
            Expr::col(Column::CurrentStudents).sub(1),
        )
        .col_expr(
            Column::UpdatedAt,
            Expr::value(chrono::Utc::now().timestamp()),
        )
        .filter(Column::Id.eq(class_id))
        .filter(Column::CurrentStudents.gt(0))
        .exec(conn)
        .await
        .map_err(|e| DojoSystemError::database_operation(format!("更新在读人数失败: {e}")))?;

    Ok(())
}

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(
        &self,
        instructor_id: i64,
        req: CreateClassRequest,
        approved: bool,
    ) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();
        let class_code = req.class_code.trim().to_string();

        // 免审创建没有审核人，approved_by 留空
        let (approval_status, approved_at) = if approved {
            (ApprovalStatus::Approved, Some(now))
        } else {
            (ApprovalStatus::Pending, None)
        };

        let model = ActiveModel {
            class_code: Set(class_code.clone()),
            class_name: Set(req.class_name.trim().to_string()),
            description: Set(req.description),
            instructor_id: Set(instructor_id),
            level: Set(req.level.to_string()),
            max_students: Set(req.max_students),
            current_students: Set(0),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            approval_status: Set(approval_status.to_string()),
            approved_by: Set(None),
            approved_at: Set(approved_at),
            rejection_reason: Set(None),
            is_active: Set(approved),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DojoSystemError::duplicate_code(format!("Class code '{class_code}' already exists"))
            } else {
                DojoSystemError::database_operation(format!("创建班级失败: {e}"))
            }
        })?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 分页列出班级
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let page = std::cmp::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Classes::find();

        if let Some(instructor_id) = query.instructor_id {
            select = select.filter(Column::InstructorId.eq(instructor_id));
        }

        if let Some(status) = query.approval_status {
            select = select.filter(Column::ApprovalStatus.eq(status.to_string()));
        }

        if let Some(level) = query.level {
            select = select.filter(Column::Level.eq(level.to_string()));
        }

        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }

        // 搜索条件：名称或代码
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::ClassName.contains(&escaped))
                    .add(Column::ClassCode.contains(&escaped)),
            );
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("查询班级总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("查询班级页数失败: {e}")))?;

        let classes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 待审批班级
    pub async fn list_pending_classes_impl(&self) -> Result<Vec<Class>> {
        let classes = Classes::find()
            .filter(Column::ApprovalStatus.eq(ApprovalStatus::Pending.to_string()))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("查询待审批班级失败: {e}")))?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let txn = self.db.begin().await?;

        let existing = match Classes::find_by_id(class_id).one(&txn).await? {
            Some(model) => model,
            None => return Ok(None),
        };

        let now = chrono::Utc::now().timestamp();

        // 容量不能低于当前在读人数；条件更新避免与并发报名交错
        if let Some(max_students) = update.max_students {
            let result = Classes::update_many()
                .col_expr(Column::MaxStudents, Expr::value(max_students))
                .filter(Column::Id.eq(class_id))
                .filter(Column::CurrentStudents.lte(max_students))
                .exec(&txn)
                .await
                .map_err(|e| {
                    DojoSystemError::database_operation(format!("更新班级容量失败: {e}"))
                })?;

            if result.rows_affected == 0 {
                return Err(DojoSystemError::validation(format!(
                    "max_students cannot be lower than the {} students currently enrolled",
                    existing.current_students
                )));
            }
        }

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(class_name) = update.class_name {
            model.class_name = Set(class_name.trim().to_string());
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(level) = update.level {
            model.level = Set(level.to_string());
        }

        if let Some(end_date) = update.end_date {
            model.end_date = Set(Some(end_date));
        }

        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("更新班级失败: {e}")))?;

        txn.commit().await?;

        Ok(Some(updated.into_class()))
    }

    /// 删除班级
    ///
    /// 选课记录与课表在同一事务内一并删除。
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        ClassEnrollments::delete_many()
            .filter(EnrollmentColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("删除班级选课失败: {e}")))?;

        ClassSchedules::delete_many()
            .filter(ScheduleColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("删除班级课表失败: {e}")))?;

        let result = Classes::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("删除班级失败: {e}")))?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    /// 审批或驳回班级
    ///
    /// 条件更新 `WHERE approval_status = 'pending'` 保证同一申请只会被处理一次，
    /// 并发的第二次审批影响 0 行并得到 InvalidState。
    pub async fn review_class_impl(
        &self,
        class_id: i64,
        reviewer_id: i64,
        decision: ReviewDecision,
    ) -> Result<Class> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().timestamp();

        let (status, is_active, reason) = match decision {
            ReviewDecision::Approve => (ApprovalStatus::Approved, true, None),
            ReviewDecision::Reject { reason } => (ApprovalStatus::Rejected, false, Some(reason)),
        };

        let result = Classes::update_many()
            .col_expr(Column::ApprovalStatus, Expr::value(status.to_string()))
            .col_expr(Column::IsActive, Expr::value(is_active))
            .col_expr(Column::ApprovedBy, Expr::value(Some(reviewer_id)))
            .col_expr(Column::ApprovedAt, Expr::value(Some(now)))
            .col_expr(Column::RejectionReason, Expr::value(reason))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(class_id))
            .filter(Column::ApprovalStatus.eq(ApprovalStatus::Pending.to_string()))
            .exec(&txn)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("审批班级失败: {e}")))?;

        let class = load_class(&txn, class_id).await?;

        if result.rows_affected == 0 {
            return Err(DojoSystemError::invalid_state(format!(
                "Class '{}' has already been {}",
                class.class_code, class.approval_status
            )));
        }

        txn.commit().await?;

        Ok(class.into_class())
    }

    /// 班级统计
    pub async fn class_statistics_impl(&self) -> Result<ClassStatistics> {
        let map_err =
            |e: sea_orm::DbErr| DojoSystemError::database_operation(format!("统计班级失败: {e}"));

        let total_classes = Classes::find().count(&self.db).await.map_err(map_err)?;

        let active_classes = Classes::find()
            .filter(Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(map_err)?;

        let pending_classes = Classes::find()
            .filter(Column::ApprovalStatus.eq(ApprovalStatus::Pending.to_string()))
            .count(&self.db)
            .await
            .map_err(map_err)?;

        let active_enrollments = ClassEnrollments::find()
            .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(map_err)?;

        let active_students = Users::find()
            .filter(UserColumn::Role.eq(UserRole::STUDENT))
            .filter(UserColumn::Status.eq(UserStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(map_err)?;

        let mut active_classes_by_level = Vec::with_capacity(ClassLevel::all().len());
        for level in ClassLevel::all() {
            let count = Classes::find()
                .filter(Column::IsActive.eq(true))
                .filter(Column::Level.eq(level.to_string()))
                .count(&self.db)
                .await
                .map_err(map_err)?;
            active_classes_by_level.push(LevelCount {
                level: *level,
                count: count as i64,
            });
        }

        Ok(ClassStatistics {
            total_classes: total_classes as i64,
            active_classes: active_classes as i64,
            pending_classes: pending_classes as i64,
            active_enrollments: active_enrollments as i64,
            active_students: active_students as i64,
            active_classes_by_level,
        })
    }
}
