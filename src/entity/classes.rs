//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub class_code: String,
    pub class_name: String,
    pub description: Option<String>,
    pub instructor_id: i64,
    pub level: String,
    pub max_students: i32,
    pub current_students: i32,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub approval_status: String,
    pub approved_by: Option<i64>,
    pub approved_at: Option<i64>,
    pub rejection_reason: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::InstructorId",
        to = "super::users::Column::Id"
    )]
    Instructor,
    #[sea_orm(has_many = "super::class_schedules::Entity")]
    Schedules,
    #[sea_orm(has_many = "super::class_enrollments::Entity")]
    Enrollments,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl Related<super::class_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl Related<super::class_enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_class(self) -> crate::models::classes::entities::Class {
        use crate::models::classes::entities::{ApprovalStatus, Class, ClassLevel};
        use chrono::{DateTime, Utc};

        Class {
            id: self.id,
            class_code: self.class_code,
            class_name: self.class_name,
            description: self.description,
            instructor_id: self.instructor_id,
            level: self
                .level
                .parse::<ClassLevel>()
                .unwrap_or(ClassLevel::Beginner),
            max_students: self.max_students,
            current_students: self.current_students,
            start_date: self.start_date,
            end_date: self.end_date,
            approval_status: self
                .approval_status
                .parse::<ApprovalStatus>()
                .unwrap_or(ApprovalStatus::Pending),
            approved_by: self.approved_by,
            approved_at: self
                .approved_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            rejection_reason: self.rejection_reason,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
