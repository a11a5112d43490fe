mod common;

use common::{actor, add_slot, approved_class, class_request, slot_request, user};
use rust_dojo_system::errors::DojoSystemError;
use rust_dojo_system::models::schedules::entities::DayOfWeek;
use rust_dojo_system::models::schedules::requests::UpdateScheduleRequest;
use rust_dojo_system::models::users::entities::UserRole;
use rust_dojo_system::workflow::{approval, scheduling};

#[tokio::test]
async fn test_instructor_cannot_be_double_booked() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;

    let class_a = approved_class(storage.as_ref(), &kim, &manager, "A-100", "Class A", 20).await;
    let class_b = approved_class(storage.as_ref(), &kim, &manager, "B-100", "Class B", 20).await;

    add_slot(
        storage.as_ref(),
        &kim,
        &class_a,
        DayOfWeek::Monday,
        (18, 0),
        (19, 30),
    )
    .await;

    let err = scheduling::add_slot(
        storage.as_ref(),
        &actor(&kim),
        class_b.id,
        slot_request(DayOfWeek::Monday, (19, 0), (20, 0)),
    )
    .await
    .unwrap_err();

    match err {
        DojoSystemError::ScheduleConflict(msg) => assert!(msg.contains("Class A"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }

    let slots = storage.list_class_schedules(class_b.id).await.unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_back_to_back_slots_are_allowed() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;

    let class_a = approved_class(storage.as_ref(), &kim, &manager, "A-100", "Class A", 20).await;
    let class_b = approved_class(storage.as_ref(), &kim, &manager, "B-100", "Class B", 20).await;

    add_slot(
        storage.as_ref(),
        &kim,
        &class_a,
        DayOfWeek::Monday,
        (18, 0),
        (19, 30),
    )
    .await;
    add_slot(
        storage.as_ref(),
        &kim,
        &class_b,
        DayOfWeek::Monday,
        (19, 30),
        (21, 0),
    )
    .await;
    // 不同星期的同一时间不冲突
    add_slot(
        storage.as_ref(),
        &kim,
        &class_b,
        DayOfWeek::Tuesday,
        (18, 0),
        (19, 30),
    )
    .await;

    let listing = scheduling::list_slots(storage.as_ref(), &actor(&kim), class_b.id)
        .await
        .unwrap();
    assert_eq!(listing.items.len(), 2);
    assert_eq!(listing.items[0].day_of_week, DayOfWeek::Monday);
}

#[tokio::test]
async fn test_different_instructors_share_a_time() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let park = user(storage.as_ref(), "sensei_park", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;

    let class_a = approved_class(storage.as_ref(), &kim, &manager, "A-100", "Class A", 20).await;
    let class_b = approved_class(storage.as_ref(), &park, &manager, "B-100", "Class B", 20).await;

    add_slot(
        storage.as_ref(),
        &kim,
        &class_a,
        DayOfWeek::Friday,
        (18, 0),
        (19, 0),
    )
    .await;
    add_slot(
        storage.as_ref(),
        &park,
        &class_b,
        DayOfWeek::Friday,
        (18, 0),
        (19, 0),
    )
    .await;
}

#[tokio::test]
async fn test_duplicate_slot_is_rejected() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let class = approved_class(storage.as_ref(), &kim, &manager, "A-100", "Class A", 20).await;

    add_slot(
        storage.as_ref(),
        &kim,
        &class,
        DayOfWeek::Saturday,
        (10, 0),
        (11, 0),
    )
    .await;

    let err = scheduling::add_slot(
        storage.as_ref(),
        &actor(&kim),
        class.id,
        slot_request(DayOfWeek::Saturday, (10, 0), (12, 0)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DojoSystemError::DuplicateSlot(_)));
}

#[tokio::test]
async fn test_slot_requires_valid_range() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let class = approved_class(storage.as_ref(), &kim, &manager, "A-100", "Class A", 20).await;

    let err = scheduling::add_slot(
        storage.as_ref(),
        &actor(&kim),
        class.id,
        slot_request(DayOfWeek::Monday, (19, 0), (18, 0)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DojoSystemError::Validation(_)));
}

#[tokio::test]
async fn test_unapproved_class_cannot_be_scheduled() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;

    let class = approval::propose(
        storage.as_ref(),
        &actor(&kim),
        class_request("A-100", "Class A", 20),
        true,
    )
    .await
    .unwrap();

    let err = scheduling::add_slot(
        storage.as_ref(),
        &actor(&kim),
        class.id,
        slot_request(DayOfWeek::Monday, (18, 0), (19, 0)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DojoSystemError::InvalidState(_)));
}

#[tokio::test]
async fn test_only_owner_manages_schedule() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let park = user(storage.as_ref(), "sensei_park", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let class = approved_class(storage.as_ref(), &kim, &manager, "A-100", "Class A", 20).await;

    let err = scheduling::add_slot(
        storage.as_ref(),
        &actor(&park),
        class.id,
        slot_request(DayOfWeek::Monday, (18, 0), (19, 0)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DojoSystemError::Permission(_)));

    let slot = add_slot(
        storage.as_ref(),
        &kim,
        &class,
        DayOfWeek::Monday,
        (18, 0),
        (19, 0),
    )
    .await;
    let err = scheduling::delete_slot(storage.as_ref(), &actor(&park), slot.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::Permission(_)));
}

#[tokio::test]
async fn test_update_checks_conflicts_excluding_itself() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let class_a = approved_class(storage.as_ref(), &kim, &manager, "A-100", "Class A", 20).await;
    let class_b = approved_class(storage.as_ref(), &kim, &manager, "B-100", "Class B", 20).await;

    let slot_a = add_slot(
        storage.as_ref(),
        &kim,
        &class_a,
        DayOfWeek::Monday,
        (18, 0),
        (19, 0),
    )
    .await;
    add_slot(
        storage.as_ref(),
        &kim,
        &class_b,
        DayOfWeek::Monday,
        (20, 0),
        (21, 0),
    )
    .await;

    // 自身时段延长不算冲突
    let updated = scheduling::update_slot(
        storage.as_ref(),
        &actor(&kim),
        slot_a.id,
        UpdateScheduleRequest {
            time_end: Some(common::time(19, 30)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.time_end, common::time(19, 30));

    let err = scheduling::update_slot(
        storage.as_ref(),
        &actor(&kim),
        slot_a.id,
        UpdateScheduleRequest {
            time_end: Some(common::time(20, 30)),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DojoSystemError::ScheduleConflict(_)));

    scheduling::delete_slot(storage.as_ref(), &actor(&kim), slot_a.id)
        .await
        .unwrap();
    let err = scheduling::delete_slot(storage.as_ref(), &actor(&kim), slot_a.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::NotFound(_)));
}
