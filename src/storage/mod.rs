use std::sync::Arc;

use crate::models::{
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::{ClassListResponse, ClassStatistics},
    },
    enrollments::{
        entities::{Enrollment, EnrollmentStatus},
        responses::EnrollmentWithStudent,
    },
    schedules::{
        entities::ScheduleSlot,
        requests::{CreateScheduleRequest, UpdateScheduleRequest},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 审批决定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject { reason: String },
}

/// 存储层接口
///
/// 带有业务约束的写操作（审批、排课、报名、状态变更）在实现中各自是一个完整事务：
/// 任一检查失败即整体回滚，不会留下部分状态。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数
    async fn count_users(&self) -> Result<u64>;

    /// 班级管理方法
    // 创建班级；approved 为 true 时直接生效（关闭审批流程时使用）
    async fn create_class(
        &self,
        instructor_id: i64,
        class: CreateClassRequest,
        approved: bool,
    ) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 列出班级
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 待审批班级，最新的在前
    async fn list_pending_classes(&self) -> Result<Vec<Class>>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 删除班级（级联删除课表和选课记录）
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    // 审批或驳回，仅允许 pending 状态
    async fn review_class(
        &self,
        class_id: i64,
        reviewer_id: i64,
        decision: ReviewDecision,
    ) -> Result<Class>;
    // 班级统计
    async fn class_statistics(&self) -> Result<ClassStatistics>;

    /// 课表管理方法
    // 班级课表，按周一到周日、开始时间排序
    async fn list_class_schedules(&self, class_id: i64) -> Result<Vec<ScheduleSlot>>;
    // 通过ID获取时段
    async fn get_schedule_by_id(&self, schedule_id: i64) -> Result<Option<ScheduleSlot>>;
    // 新增时段（重复检查 + 教练时间冲突检查）
    async fn create_schedule(
        &self,
        class_id: i64,
        schedule: CreateScheduleRequest,
    ) -> Result<ScheduleSlot>;
    // 修改时段，冲突检查排除自身
    async fn update_schedule(
        &self,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<ScheduleSlot>;
    // 删除时段
    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool>;

    /// 选课管理方法
    // 报名（重复、容量、学员时间冲突检查）
    async fn enroll_student(
        &self,
        class_id: i64,
        student_id: i64,
        notes: Option<String>,
    ) -> Result<Enrollment>;
    // 通过ID获取选课记录
    async fn get_enrollment_by_id(&self, enrollment_id: i64) -> Result<Option<Enrollment>>;
    // 班级学员名单
    async fn list_class_enrollments(
        &self,
        class_id: i64,
        status: Option<EnrollmentStatus>,
    ) -> Result<Vec<EnrollmentWithStudent>>;
    // 学员的所有选课记录
    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<Enrollment>>;
    // 修改选课状态，同步维护在读人数
    async fn update_enrollment_status(
        &self,
        enrollment_id: i64,
        status: EnrollmentStatus,
        notes: Option<String>,
    ) -> Result<Enrollment>;
    // 移除选课记录
    async fn remove_enrollment(&self, enrollment_id: i64) -> Result<bool>;
    // 尚未报名该班级的活跃学员
    async fn list_available_students(&self, class_id: i64) -> Result<Vec<User>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
