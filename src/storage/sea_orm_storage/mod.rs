//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod classes;
mod enrollments;
mod schedules;
mod users;

use crate::config::AppConfig;
use crate::errors::{DojoSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::with_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 使用已有连接构建存储并执行迁移
    pub async fn with_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| DojoSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// 单连接内存数据库，供测试和演示使用
    pub async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(opt).await.map_err(|e| {
            DojoSystemError::database_connection(format!("无法创建内存数据库: {e}"))
        })?;

        Self::with_connection(db).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| DojoSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| DojoSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| DojoSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(DojoSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持 sqlite/postgres/mysql 或 .db/.sqlite 文件"
            )))
        }
    }
}

/// 唯一约束冲突
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// Storage trait 实现
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
use crate::storage::{ReviewDecision, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 班级模块
    async fn create_class(
        &self,
        instructor_id: i64,
        class: CreateClassRequest,
        approved: bool,
    ) -> Result<Class> {
        self.create_class_impl(instructor_id, class, approved).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn list_pending_classes(&self) -> Result<Vec<Class>> {
        self.list_pending_classes_impl().await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    async fn review_class(
        &self,
        class_id: i64,
        reviewer_id: i64,
        decision: ReviewDecision,
    ) -> Result<Class> {
        self.review_class_impl(class_id, reviewer_id, decision).await
    }

    async fn class_statistics(&self) -> Result<ClassStatistics> {
        self.class_statistics_impl().await
    }

    // 课表模块
    async fn list_class_schedules(&self, class_id: i64) -> Result<Vec<ScheduleSlot>> {
        self.list_class_schedules_impl(class_id).await
    }

    async fn get_schedule_by_id(&self, schedule_id: i64) -> Result<Option<ScheduleSlot>> {
        self.get_schedule_by_id_impl(schedule_id).await
    }

    async fn create_schedule(
        &self,
        class_id: i64,
        schedule: CreateScheduleRequest,
    ) -> Result<ScheduleSlot> {
        self.create_schedule_impl(class_id, schedule).await
    }

    async fn update_schedule(
        &self,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<ScheduleSlot> {
        self.update_schedule_impl(schedule_id, update).await
    }

    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool> {
        self.delete_schedule_impl(schedule_id).await
    }

    // 选课模块
    async fn enroll_student(
        &self,
        class_id: i64,
        student_id: i64,
        notes: Option<String>,
    ) -> Result<Enrollment> {
        self.enroll_student_impl(class_id, student_id, notes).await
    }

    async fn get_enrollment_by_id(&self, enrollment_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_by_id_impl(enrollment_id).await
    }

    async fn list_class_enrollments(
        &self,
        class_id: i64,
        status: Option<EnrollmentStatus>,
    ) -> Result<Vec<EnrollmentWithStudent>> {
        self.list_class_enrollments_impl(class_id, status).await
    }

    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<Enrollment>> {
        self.list_student_enrollments_impl(student_id).await
    }

    async fn update_enrollment_status(
        &self,
        enrollment_id: i64,
        status: EnrollmentStatus,
        notes: Option<String>,
    ) -> Result<Enrollment> {
        self.update_enrollment_status_impl(enrollment_id, status, notes)
            .await
    }

    async fn remove_enrollment(&self, enrollment_id: i64) -> Result<bool> {
        self.remove_enrollment_impl(enrollment_id).await
    }

    async fn list_available_students(&self, class_id: i64) -> Result<Vec<User>> {
        self.list_available_students_impl(class_id).await
    }
}
