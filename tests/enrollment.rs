mod common;

use common::{actor, add_slot, approved_class, user};
use rust_dojo_system::errors::{DojoSystemError, Result};
use rust_dojo_system::models::enrollments::entities::{Enrollment, EnrollmentStatus};
use rust_dojo_system::models::enrollments::requests::{
    EnrollStudentRequest, UpdateEnrollmentRequest,
};
use rust_dojo_system::models::schedules::entities::DayOfWeek;
use rust_dojo_system::models::users::entities::{User, UserRole};
use rust_dojo_system::storage::Storage;
use rust_dojo_system::workflow::{approval, enrollment};

async fn enroll(
    storage: &dyn Storage,
    by: &User,
    class_id: i64,
    student: &User,
) -> Result<Enrollment> {
    let request = EnrollStudentRequest {
        student_id: student.id,
        notes: None,
    };
    enrollment::enroll(storage, &actor(by), class_id, request).await
}

#[tokio::test]
async fn test_capacity_is_enforced() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let class = approved_class(storage.as_ref(), &kim, &manager, "K-101", "Kids Karate", 30).await;

    for i in 0..30 {
        let name = format!("student_{i:02}");
        let student = user(storage.as_ref(), &name, UserRole::Student).await;
        enroll(storage.as_ref(), &kim, class.id, &student)
            .await
            .unwrap();
    }

    let late = user(storage.as_ref(), "student_late", UserRole::Student).await;
    let err = enroll(storage.as_ref(), &kim, class.id, &late)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::CapacityExceeded(_)));

    let class = storage.get_class_by_id(class.id).await.unwrap().unwrap();
    assert_eq!(class.current_students, 30);

    let roster = enrollment::roster(storage.as_ref(), &actor(&kim), class.id, None)
        .await
        .unwrap();
    assert_eq!(roster.items.len(), 30);
    assert!(
        storage
            .list_student_enrollments(late.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_duplicate_enrollment_is_rejected() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let student = user(storage.as_ref(), "student_amy", UserRole::Student).await;
    let class = approved_class(storage.as_ref(), &kim, &manager, "K-101", "Kids Karate", 30).await;

    enroll(storage.as_ref(), &kim, class.id, &student)
        .await
        .unwrap();
    let err = enroll(storage.as_ref(), &kim, class.id, &student)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::DuplicateEnrollment(_)));

    let class = storage.get_class_by_id(class.id).await.unwrap().unwrap();
    assert_eq!(class.current_students, 1);
}

#[tokio::test]
async fn test_student_time_conflicts() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let park = user(storage.as_ref(), "sensei_park", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let student = user(storage.as_ref(), "student_amy", UserRole::Student).await;

    let karate = approved_class(storage.as_ref(), &kim, &manager, "K-101", "Kids Karate", 30).await;
    let judo = approved_class(
        storage.as_ref(),
        &park,
        &manager,
        "J-201",
        "Judo Basics",
        30,
    )
    .await;
    let boxing = approved_class(storage.as_ref(), &park, &manager, "B-301", "Boxing", 30).await;

    add_slot(
        storage.as_ref(),
        &kim,
        &karate,
        DayOfWeek::Wednesday,
        (18, 0),
        (19, 30),
    )
    .await;
    add_slot(
        storage.as_ref(),
        &park,
        &judo,
        DayOfWeek::Wednesday,
        (19, 0),
        (20, 0),
    )
    .await;
    add_slot(
        storage.as_ref(),
        &park,
        &boxing,
        DayOfWeek::Wednesday,
        (20, 0),
        (21, 0),
    )
    .await;

    enroll(storage.as_ref(), &kim, karate.id, &student)
        .await
        .unwrap();

    let err = enroll(storage.as_ref(), &park, judo.id, &student)
        .await
        .unwrap_err();
    match err {
        DojoSystemError::ScheduleConflict(msg) => assert!(msg.contains("Kids Karate"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
    let judo_after = storage.get_class_by_id(judo.id).await.unwrap().unwrap();
    assert_eq!(judo_after.current_students, 0);

    // 紧接着上课不算冲突
    enroll(storage.as_ref(), &park, boxing.id, &student)
        .await
        .unwrap();

    let mine = enrollment::my_enrollments(storage.as_ref(), &actor(&student))
        .await
        .unwrap();
    assert_eq!(mine.items.len(), 2);
    assert!(mine.items.iter().all(|item| item.timetable.starts_with("Wednesday")));
}

#[tokio::test]
async fn test_inactive_enrollment_does_not_block_schedule() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let park = user(storage.as_ref(), "sensei_park", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let student = user(storage.as_ref(), "student_amy", UserRole::Student).await;

    let karate = approved_class(storage.as_ref(), &kim, &manager, "K-101", "Kids Karate", 30).await;
    let judo = approved_class(
        storage.as_ref(),
        &park,
        &manager,
        "J-201",
        "Judo Basics",
        30,
    )
    .await;
    add_slot(
        storage.as_ref(),
        &kim,
        &karate,
        DayOfWeek::Wednesday,
        (18, 0),
        (19, 30),
    )
    .await;
    add_slot(
        storage.as_ref(),
        &park,
        &judo,
        DayOfWeek::Wednesday,
        (19, 0),
        (20, 0),
    )
    .await;

    let first = enroll(storage.as_ref(), &kim, karate.id, &student)
        .await
        .unwrap();
    enrollment::update_status(
        storage.as_ref(),
        &actor(&kim),
        first.id,
        UpdateEnrollmentRequest {
            status: EnrollmentStatus::Dropped,
            notes: None,
        },
    )
    .await
    .unwrap();

    enroll(storage.as_ref(), &park, judo.id, &student)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_seat_count_follows_status_changes() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let amy = user(storage.as_ref(), "student_amy", UserRole::Student).await;
    let ben = user(storage.as_ref(), "student_ben", UserRole::Student).await;
    let cal = user(storage.as_ref(), "student_cal", UserRole::Student).await;
    let class = approved_class(storage.as_ref(), &kim, &manager, "K-101", "Kids Karate", 2).await;

    let amy_enrollment = enroll(storage.as_ref(), &kim, class.id, &amy)
        .await
        .unwrap();
    let ben_enrollment = enroll(storage.as_ref(), &kim, class.id, &ben)
        .await
        .unwrap();

    // 暂停释放名额
    let suspended = enrollment::update_status(
        storage.as_ref(),
        &actor(&kim),
        amy_enrollment.id,
        UpdateEnrollmentRequest {
            status: EnrollmentStatus::Suspended,
            notes: Some("Injured".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(suspended.status, EnrollmentStatus::Suspended);
    let current = storage.get_class_by_id(class.id).await.unwrap().unwrap();
    assert_eq!(current.current_students, 1);

    enroll(storage.as_ref(), &kim, class.id, &cal)
        .await
        .unwrap();

    // 班级已满时不能恢复
    let err = enrollment::update_status(
        storage.as_ref(),
        &actor(&kim),
        amy_enrollment.id,
        UpdateEnrollmentRequest {
            status: EnrollmentStatus::Active,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DojoSystemError::CapacityExceeded(_)));
    let amy_after = storage
        .get_enrollment_by_id(amy_enrollment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(amy_after.status, EnrollmentStatus::Suspended);

    enrollment::remove(storage.as_ref(), &actor(&kim), ben_enrollment.id)
        .await
        .unwrap();
    let current = storage.get_class_by_id(class.id).await.unwrap().unwrap();
    assert_eq!(current.current_students, 1);

    enrollment::update_status(
        storage.as_ref(),
        &actor(&kim),
        amy_enrollment.id,
        UpdateEnrollmentRequest {
            status: EnrollmentStatus::Active,
            notes: None,
        },
    )
    .await
    .unwrap();
    let current = storage.get_class_by_id(class.id).await.unwrap().unwrap();
    assert_eq!(current.current_students, 2);
}

#[tokio::test]
async fn test_enrollment_permissions() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let park = user(storage.as_ref(), "sensei_park", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let amy = user(storage.as_ref(), "student_amy", UserRole::Student).await;
    let class = approved_class(storage.as_ref(), &kim, &manager, "K-101", "Kids Karate", 30).await;

    let err = enroll(storage.as_ref(), &park, class.id, &amy)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::Permission(_)));

    // 只能为学员账号报名
    let err = enroll(storage.as_ref(), &kim, class.id, &park)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::Validation(_)));

    // 经理可以查看名单
    enrollment::roster(storage.as_ref(), &actor(&manager), class.id, None)
        .await
        .unwrap();
    let err = enrollment::roster(storage.as_ref(), &actor(&park), class.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::Permission(_)));

    let available = enrollment::available_students(storage.as_ref(), &actor(&kim), class.id)
        .await
        .unwrap();
    assert_eq!(available.items.len(), 1);
    assert_eq!(available.items[0].id, amy.id);
}

#[tokio::test]
async fn test_propose_approve_schedule_enroll() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let amy = user(storage.as_ref(), "student_amy", UserRole::Student).await;

    let proposed = approval::propose(
        storage.as_ref(),
        &actor(&kim),
        common::class_request("K-101", "Kids Karate", 30),
        true,
    )
    .await
    .unwrap();

    // 审批前不能报名
    let err = enroll(storage.as_ref(), &kim, proposed.id, &amy)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::InvalidState(_)));

    let class = approval::approve(storage.as_ref(), &actor(&manager), proposed.id)
        .await
        .unwrap();
    add_slot(
        storage.as_ref(),
        &kim,
        &class,
        DayOfWeek::Monday,
        (18, 0),
        (20, 0),
    )
    .await;

    let enrolled = enroll(storage.as_ref(), &kim, class.id, &amy)
        .await
        .unwrap();
    assert_eq!(enrolled.status, EnrollmentStatus::Active);

    let mine = enrollment::my_enrollments(storage.as_ref(), &actor(&amy))
        .await
        .unwrap();
    assert_eq!(mine.items.len(), 1);
    assert_eq!(mine.items[0].class.class_code, "K-101");
    assert!(mine.items[0].timetable.starts_with("Monday: 18:00-20:00"));
}

fn status_request(status: EnrollmentStatus) -> UpdateEnrollmentRequest {
    UpdateEnrollmentRequest {
        status,
        notes: None,
    }
}

#[tokio::test]
async fn test_reactivation_clears_completion_time() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let amy = user(storage.as_ref(), "student_amy", UserRole::Student).await;
    let class = approved_class(storage.as_ref(), &kim, &manager, "K-101", "Kids Karate", 30).await;

    let enrolled = enroll(storage.as_ref(), &kim, class.id, &amy)
        .await
        .unwrap();
    assert!(enrolled.completed_at.is_none());

    let completed = enrollment::update_status(
        storage.as_ref(),
        &actor(&kim),
        enrolled.id,
        status_request(EnrollmentStatus::Completed),
    )
    .await
    .unwrap();
    assert_eq!(completed.status, EnrollmentStatus::Completed);
    assert!(completed.completed_at.is_some());
    let current = storage.get_class_by_id(class.id).await.unwrap().unwrap();
    assert_eq!(current.current_students, 0);

    let reactivated = enrollment::update_status(
        storage.as_ref(),
        &actor(&kim),
        enrolled.id,
        status_request(EnrollmentStatus::Active),
    )
    .await
    .unwrap();
    assert_eq!(reactivated.status, EnrollmentStatus::Active);
    assert!(reactivated.completed_at.is_none());

    let stored = storage
        .get_enrollment_by_id(enrolled.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.completed_at.is_none());
    let current = storage.get_class_by_id(class.id).await.unwrap().unwrap();
    assert_eq!(current.current_students, 1);
}

#[tokio::test]
async fn test_reactivation_does_not_recheck_schedule() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let park = user(storage.as_ref(), "sensei_park", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let amy = user(storage.as_ref(), "student_amy", UserRole::Student).await;

    let karate = approved_class(storage.as_ref(), &kim, &manager, "K-101", "Kids Karate", 30).await;
    let judo = approved_class(
        storage.as_ref(),
        &park,
        &manager,
        "J-201",
        "Judo Basics",
        30,
    )
    .await;
    add_slot(
        storage.as_ref(),
        &kim,
        &karate,
        DayOfWeek::Friday,
        (18, 0),
        (19, 30),
    )
    .await;
    add_slot(
        storage.as_ref(),
        &park,
        &judo,
        DayOfWeek::Friday,
        (19, 0),
        (20, 0),
    )
    .await;

    let first = enroll(storage.as_ref(), &kim, karate.id, &amy)
        .await
        .unwrap();
    enrollment::update_status(
        storage.as_ref(),
        &actor(&kim),
        first.id,
        status_request(EnrollmentStatus::Suspended),
    )
    .await
    .unwrap();
    enroll(storage.as_ref(), &park, judo.id, &amy)
        .await
        .unwrap();

    // 状态切换不做排课冲突检查，只受容量约束
    let reactivated = enrollment::update_status(
        storage.as_ref(),
        &actor(&kim),
        first.id,
        status_request(EnrollmentStatus::Active),
    )
    .await
    .unwrap();
    assert_eq!(reactivated.status, EnrollmentStatus::Active);

    let mine = enrollment::my_enrollments(storage.as_ref(), &actor(&amy))
        .await
        .unwrap();
    let active = mine
        .items
        .iter()
        .filter(|item| item.enrollment.status == EnrollmentStatus::Active)
        .count();
    assert_eq!(active, 2);
}
