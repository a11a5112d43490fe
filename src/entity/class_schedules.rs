//! 班级课表实体（每周固定时段）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "class_schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub day_of_week: String,
    pub time_start: Time,
    pub time_end: Time,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id",
        on_delete = "Cascade"
    )]
    Class,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_schedule(self) -> crate::models::schedules::entities::ScheduleSlot {
        use crate::models::schedules::entities::{DayOfWeek, ScheduleSlot};
        use chrono::{DateTime, Utc};

        ScheduleSlot {
            id: self.id,
            class_id: self.class_id,
            day_of_week: self
                .day_of_week
                .parse::<DayOfWeek>()
                .unwrap_or(DayOfWeek::Monday),
            time_start: self.time_start,
            time_end: self.time_end,
            location: self.location,
            notes: self.notes,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
