#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use rust_dojo_system::models::ActorContext;
use rust_dojo_system::models::classes::entities::{Class, ClassLevel};
use rust_dojo_system::models::classes::requests::CreateClassRequest;
use rust_dojo_system::models::schedules::entities::{DayOfWeek, ScheduleSlot};
use rust_dojo_system::models::schedules::requests::CreateScheduleRequest;
use rust_dojo_system::models::users::entities::{User, UserProfile, UserRole};
use rust_dojo_system::models::users::requests::CreateUserRequest;
use rust_dojo_system::storage::Storage;
use rust_dojo_system::storage::sea_orm_storage::SeaOrmStorage;
use rust_dojo_system::workflow::{approval, scheduling};

pub async fn storage() -> Arc<dyn Storage> {
    Arc::new(
        SeaOrmStorage::in_memory()
            .await
            .expect("in-memory storage"),
    )
}

pub async fn user(storage: &dyn Storage, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@dojo.test"),
            // 存储层只保存哈希值，测试不需要真实哈希
            password: "not-a-real-hash".to_string(),
            role,
            profile: UserProfile {
                full_name: username.to_string(),
                phone: None,
            },
        })
        .await
        .expect("create user")
}

pub fn actor(user: &User) -> ActorContext {
    ActorContext::new(user.id, user.role)
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

pub fn class_request(code: &str, name: &str, max_students: i32) -> CreateClassRequest {
    CreateClassRequest {
        instructor_id: None,
        class_code: code.to_string(),
        class_name: name.to_string(),
        description: None,
        level: ClassLevel::Beginner,
        max_students,
        start_date: NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
        end_date: None,
    }
}

/// 由教练申请并经经理审批通过的班级
pub async fn approved_class(
    storage: &dyn Storage,
    instructor: &User,
    manager: &User,
    code: &str,
    name: &str,
    max_students: i32,
) -> Class {
    let class = approval::propose(
        storage,
        &actor(instructor),
        class_request(code, name, max_students),
        true,
    )
    .await
    .expect("propose class");

    approval::approve(storage, &actor(manager), class.id)
        .await
        .expect("approve class")
}

pub fn slot_request(day: DayOfWeek, start: (u32, u32), end: (u32, u32)) -> CreateScheduleRequest {
    CreateScheduleRequest {
        day_of_week: day,
        time_start: time(start.0, start.1),
        time_end: time(end.0, end.1),
        location: Some("Main Hall".to_string()),
        notes: None,
    }
}

pub async fn add_slot(
    storage: &dyn Storage,
    owner: &User,
    class: &Class,
    day: DayOfWeek,
    start: (u32, u32),
    end: (u32, u32),
) -> ScheduleSlot {
    let request = slot_request(day, start, end);
    scheduling::add_slot(storage, &actor(owner), class.id, request)
        .await
        .expect("add slot")
}
