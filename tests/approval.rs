mod common;

use common::{actor, add_slot, approved_class, class_request, user};
use rust_dojo_system::errors::DojoSystemError;
use rust_dojo_system::models::classes::entities::{ApprovalStatus, ClassLevel};
use rust_dojo_system::models::classes::requests::{ClassListQuery, UpdateClassRequest};
use rust_dojo_system::models::enrollments::requests::EnrollStudentRequest;
use rust_dojo_system::models::schedules::entities::DayOfWeek;
use rust_dojo_system::models::users::entities::{User, UserRole};
use rust_dojo_system::storage::Storage;
use rust_dojo_system::workflow::{approval, enrollment};

async fn enroll(storage: &dyn Storage, instructor: &User, class_id: i64, student: &User) {
    let request = EnrollStudentRequest {
        student_id: student.id,
        notes: None,
    };
    enrollment::enroll(storage, &actor(instructor), class_id, request)
        .await
        .expect("enroll student");
}

#[tokio::test]
async fn test_proposal_waits_for_review_then_opens() {
    let storage = common::storage().await;
    let instructor = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;

    let class = approval::propose(
        storage.as_ref(),
        &actor(&instructor),
        class_request("K-101", "Kids Karate", 30),
        true,
    )
    .await
    .unwrap();

    assert_eq!(class.approval_status, ApprovalStatus::Pending);
    assert!(!class.is_active);
    assert_eq!(class.instructor_id, instructor.id);
    assert_eq!(class.current_students, 0);

    let pending = approval::pending_classes(storage.as_ref(), &actor(&manager))
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);

    let approved = approval::approve(storage.as_ref(), &actor(&manager), class.id)
        .await
        .unwrap();
    assert_eq!(approved.approval_status, ApprovalStatus::Approved);
    assert!(approved.is_active);
    assert_eq!(approved.approved_by, Some(manager.id));
    assert!(approved.approved_at.is_some());

    let pending = approval::pending_classes(storage.as_ref(), &actor(&manager))
        .await
        .unwrap();
    assert!(pending.is_empty());
}

#[tokio::test]
async fn test_review_happens_only_once() {
    let storage = common::storage().await;
    let instructor = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;

    let class = approval::propose(
        storage.as_ref(),
        &actor(&instructor),
        class_request("K-101", "Kids Karate", 30),
        true,
    )
    .await
    .unwrap();
    approval::approve(storage.as_ref(), &actor(&manager), class.id)
        .await
        .unwrap();

    let err = approval::approve(storage.as_ref(), &actor(&manager), class.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::InvalidState(_)));

    let err = approval::reject(storage.as_ref(), &actor(&manager), class.id, "Too late")
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::InvalidState(_)));

    let stored = storage.get_class_by_id(class.id).await.unwrap().unwrap();
    assert_eq!(stored.approval_status, ApprovalStatus::Approved);
    assert!(stored.rejection_reason.is_none());
}

#[tokio::test]
async fn test_reject_requires_reason_and_deactivates() {
    let storage = common::storage().await;
    let instructor = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;

    let class = approval::propose(
        storage.as_ref(),
        &actor(&instructor),
        class_request("TKD-201", "Taekwondo Sparring", 20),
        true,
    )
    .await
    .unwrap();

    let err = approval::reject(storage.as_ref(), &actor(&manager), class.id, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::Validation(_)));

    let stored = storage.get_class_by_id(class.id).await.unwrap().unwrap();
    assert_eq!(stored.approval_status, ApprovalStatus::Pending);

    let rejected = approval::reject(
        storage.as_ref(),
        &actor(&manager),
        class.id,
        "Hall is booked on weekends",
    )
    .await
    .unwrap();
    assert_eq!(rejected.approval_status, ApprovalStatus::Rejected);
    assert!(!rejected.is_active);
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("Hall is booked on weekends")
    );
}

#[tokio::test]
async fn test_only_reviewers_can_review() {
    let storage = common::storage().await;
    let instructor = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;

    let class = approval::propose(
        storage.as_ref(),
        &actor(&instructor),
        class_request("K-101", "Kids Karate", 30),
        true,
    )
    .await
    .unwrap();

    let err = approval::approve(storage.as_ref(), &actor(&instructor), class.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::Permission(_)));
}

#[tokio::test]
async fn test_class_code_is_unique() {
    let storage = common::storage().await;
    let instructor = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;

    approval::propose(
        storage.as_ref(),
        &actor(&instructor),
        class_request("K-101", "Kids Karate", 30),
        true,
    )
    .await
    .unwrap();

    let err = approval::propose(
        storage.as_ref(),
        &actor(&instructor),
        class_request("K-101", "Kids Karate Again", 30),
        true,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DojoSystemError::DuplicateCode(_)));
}

#[tokio::test]
async fn test_proposal_rules() {
    let storage = common::storage().await;
    let instructor = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let other = user(storage.as_ref(), "sensei_park", UserRole::Instructor).await;
    let student = user(storage.as_ref(), "student_amy", UserRole::Student).await;
    let admin = user(storage.as_ref(), "root", UserRole::Admin).await;

    // 教练不能替别人申请
    let mut req = class_request("K-101", "Kids Karate", 30);
    req.instructor_id = Some(other.id);
    let err = approval::propose(storage.as_ref(), &actor(&instructor), req, true)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::Permission(_)));

    let err = approval::propose(
        storage.as_ref(),
        &actor(&student),
        class_request("K-102", "Kids Karate", 30),
        true,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DojoSystemError::Permission(_)));

    let err = approval::propose(
        storage.as_ref(),
        &actor(&instructor),
        class_request("K-103", "Kids Karate", 0),
        true,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DojoSystemError::Validation(_)));

    // 管理员必须指定教练账号
    let err = approval::propose(
        storage.as_ref(),
        &actor(&admin),
        class_request("K-104", "Kids Karate", 30),
        true,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DojoSystemError::Validation(_)));

    let mut req = class_request("K-104", "Kids Karate", 30);
    req.instructor_id = Some(other.id);
    let class = approval::propose(storage.as_ref(), &actor(&admin), req, true)
        .await
        .unwrap();
    assert_eq!(class.instructor_id, other.id);
}

#[tokio::test]
async fn test_proposal_without_approval_step() {
    let storage = common::storage().await;
    let instructor = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;

    let class = approval::propose(
        storage.as_ref(),
        &actor(&instructor),
        class_request("K-101", "Kids Karate", 30),
        false,
    )
    .await
    .unwrap();

    assert_eq!(class.approval_status, ApprovalStatus::Approved);
    assert!(class.is_active);
    // 没有经过审核，不记录审核人
    assert!(class.approved_by.is_none());
    assert!(class.approved_at.is_some());
}

#[tokio::test]
async fn test_list_visibility_by_role() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let park = user(storage.as_ref(), "sensei_park", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let student = user(storage.as_ref(), "student_amy", UserRole::Student).await;

    approved_class(storage.as_ref(), &kim, &manager, "K-101", "Kids Karate", 30).await;
    approval::propose(
        storage.as_ref(),
        &actor(&park),
        class_request("J-201", "Judo Basics", 20),
        true,
    )
    .await
    .unwrap();

    let all = approval::list_classes(
        storage.as_ref(),
        &actor(&manager),
        ClassListQuery::default(),
    )
    .await
    .unwrap();
    assert_eq!(all.items.len(), 2);

    let own = approval::list_classes(
        storage.as_ref(),
        &actor(&park),
        ClassListQuery::default(),
    )
    .await
    .unwrap();
    assert_eq!(own.items.len(), 1);
    assert_eq!(own.items[0].class_code, "J-201");

    let open = approval::list_classes(
        storage.as_ref(),
        &actor(&student),
        ClassListQuery::default(),
    )
    .await
    .unwrap();
    assert_eq!(open.items.len(), 1);
    assert_eq!(open.items[0].class_code, "K-101");
}

#[tokio::test]
async fn test_list_page_below_one_falls_back_to_first_page() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;

    for code in ["K-101", "K-102", "K-103"] {
        approved_class(storage.as_ref(), &kim, &manager, code, "Kids Karate", 30).await;
    }

    for page in [0, -5] {
        let query = ClassListQuery {
            page: Some(page),
            size: Some(2),
            ..Default::default()
        };
        let listed = approval::list_classes(storage.as_ref(), &actor(&manager), query)
            .await
            .unwrap();
        assert_eq!(listed.pagination.page, 1);
        assert_eq!(listed.pagination.page_size, 2);
        assert_eq!(listed.pagination.total, 3);
        assert_eq!(listed.pagination.total_pages, 2);
        assert_eq!(listed.items.len(), 2);
    }

    let query = ClassListQuery {
        page: Some(2),
        size: Some(2),
        ..Default::default()
    };
    let second = approval::list_classes(storage.as_ref(), &actor(&manager), query)
        .await
        .unwrap();
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].class_code, "K-101");
}

#[tokio::test]
async fn test_capacity_cannot_drop_below_enrolled_students() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let class = approved_class(storage.as_ref(), &kim, &manager, "K-101", "Kids Karate", 30).await;

    for name in ["student_amy", "student_ben", "student_cal"] {
        let student = user(storage.as_ref(), name, UserRole::Student).await;
        enroll(storage.as_ref(), &kim, class.id, &student).await;
    }

    let shrink = UpdateClassRequest {
        max_students: Some(2),
        ..Default::default()
    };
    let err = approval::update_class(storage.as_ref(), &actor(&kim), class.id, shrink)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::Validation(_)));

    let stored = storage.get_class_by_id(class.id).await.unwrap().unwrap();
    assert_eq!(stored.max_students, 30);
    assert_eq!(stored.current_students, 3);

    // 等于在读人数是允许的，之后班级即满员
    let exact = UpdateClassRequest {
        max_students: Some(3),
        ..Default::default()
    };
    let updated = approval::update_class(storage.as_ref(), &actor(&kim), class.id, exact)
        .await
        .unwrap();
    assert_eq!(updated.max_students, 3);

    let late = user(storage.as_ref(), "student_dan", UserRole::Student).await;
    let request = EnrollStudentRequest {
        student_id: late.id,
        notes: None,
    };
    let err = enrollment::enroll(storage.as_ref(), &actor(&kim), class.id, request)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::CapacityExceeded(_)));
}

#[tokio::test]
async fn test_only_approved_classes_can_be_edited() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let park = user(storage.as_ref(), "sensei_park", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;

    let class = approval::propose(
        storage.as_ref(),
        &actor(&kim),
        class_request("K-101", "Kids Karate", 30),
        true,
    )
    .await
    .unwrap();

    let rename = || UpdateClassRequest {
        class_name: Some("  Kids Karate Plus  ".to_string()),
        level: Some(ClassLevel::Intermediate),
        ..Default::default()
    };

    let err = approval::update_class(storage.as_ref(), &actor(&kim), class.id, rename())
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::InvalidState(_)));

    approval::approve(storage.as_ref(), &actor(&manager), class.id)
        .await
        .unwrap();

    let err = approval::update_class(storage.as_ref(), &actor(&park), class.id, rename())
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::Permission(_)));

    let updated = approval::update_class(storage.as_ref(), &actor(&kim), class.id, rename())
        .await
        .unwrap();
    assert_eq!(updated.class_name, "Kids Karate Plus");
    assert_eq!(updated.level, ClassLevel::Intermediate);
    assert_eq!(updated.class_code, "K-101");
    assert_eq!(updated.approval_status, ApprovalStatus::Approved);
}

#[tokio::test]
async fn test_delete_class_removes_schedule_and_enrollments() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let park = user(storage.as_ref(), "sensei_park", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let amy = user(storage.as_ref(), "student_amy", UserRole::Student).await;

    let class = approved_class(storage.as_ref(), &kim, &manager, "K-101", "Kids Karate", 30).await;
    let slot = add_slot(
        storage.as_ref(),
        &kim,
        &class,
        DayOfWeek::Tuesday,
        (17, 0),
        (18, 0),
    )
    .await;
    enroll(storage.as_ref(), &kim, class.id, &amy).await;
    let enrollments = storage.list_student_enrollments(amy.id).await.unwrap();
    assert_eq!(enrollments.len(), 1);

    let err = approval::delete_class(storage.as_ref(), &actor(&park), class.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::Permission(_)));

    approval::delete_class(storage.as_ref(), &actor(&kim), class.id)
        .await
        .unwrap();

    assert!(storage.get_class_by_id(class.id).await.unwrap().is_none());
    assert!(storage.get_schedule_by_id(slot.id).await.unwrap().is_none());
    assert!(
        storage
            .get_enrollment_by_id(enrollments[0].id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        storage
            .list_student_enrollments(amy.id)
            .await
            .unwrap()
            .is_empty()
    );

    let err = approval::delete_class(storage.as_ref(), &actor(&kim), class.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::NotFound(_)));
}

#[tokio::test]
async fn test_statistics_for_reviewers() {
    let storage = common::storage().await;
    let kim = user(storage.as_ref(), "sensei_kim", UserRole::Instructor).await;
    let park = user(storage.as_ref(), "sensei_park", UserRole::Instructor).await;
    let manager = user(storage.as_ref(), "manager_lee", UserRole::Manager).await;
    let amy = user(storage.as_ref(), "student_amy", UserRole::Student).await;
    user(storage.as_ref(), "student_ben", UserRole::Student).await;

    let class = approved_class(storage.as_ref(), &kim, &manager, "K-101", "Kids Karate", 30).await;
    approval::propose(
        storage.as_ref(),
        &actor(&park),
        class_request("J-201", "Judo Basics", 20),
        true,
    )
    .await
    .unwrap();
    enroll(storage.as_ref(), &kim, class.id, &amy).await;

    let stats = approval::statistics(storage.as_ref(), &actor(&manager))
        .await
        .unwrap();
    assert_eq!(stats.total_classes, 2);
    assert_eq!(stats.active_classes, 1);
    assert_eq!(stats.pending_classes, 1);
    assert_eq!(stats.active_enrollments, 1);
    assert_eq!(stats.active_students, 2);

    let beginner = stats
        .active_classes_by_level
        .iter()
        .find(|entry| entry.level == ClassLevel::Beginner)
        .unwrap();
    assert_eq!(beginner.count, 1);
    assert_eq!(stats.active_classes_by_level.len(), ClassLevel::all().len());
    let total: i64 = stats
        .active_classes_by_level
        .iter()
        .map(|entry| entry.count)
        .sum();
    assert_eq!(total, stats.active_classes);

    let err = approval::statistics(storage.as_ref(), &actor(&kim))
        .await
        .unwrap_err();
    assert!(matches!(err, DojoSystemError::Permission(_)));
}
