mod common;

use chrono::NaiveDate;
use codeta::config::TitleScope;
use codeta::entity::CountRow;
use codeta::errors::CodetaError;
use codeta::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
use codeta::models::users::requests::UpdateUserRequest;
use codeta::storage::QueryError;
use common::{course_request, memory_provider, seed_course, seed_user, storage_for, user_request};

#[tokio::test]
async fn test_uncommitted_statement_is_discarded_on_close() {
    let provider = memory_provider().await;

    let session = provider.open_session();
    let affected = session
        .execute(
            "insert into users (username, password, email, first_name, last_name) \
             values ($1, $2, $3, $4, $5)",
            vec![
                "ghost".into(),
                "x".into(),
                "ghost@codeta_test.com".into(),
                "G".into(),
                "H".into(),
            ],
        )
        .await
        .unwrap();
    assert_eq!(affected, 1);
    assert!(session.is_open().await);
    session.close().await;
    assert!(!session.is_open().await);

    let (session, storage) = storage_for(&provider);
    assert!(storage.get_user_by_username("ghost").await.unwrap().is_none());
    session.close().await;
}

#[tokio::test]
async fn test_committed_statement_survives_close() {
    let provider = memory_provider().await;

    let session = provider.open_session();
    session
        .execute_and_commit(
            "insert into users (username, password, email, first_name, last_name) \
             values ($1, $2, $3, $4, $5)",
            vec![
                "derp".into(),
                "x".into(),
                "derp@codeta_test.com".into(),
                "D".into(),
                "P".into(),
            ],
        )
        .await
        .unwrap();
    session.close().await;

    let (session, storage) = storage_for(&provider);
    assert_eq!(storage.count_users().await.unwrap(), 1);
    assert!(storage.username_exists("derp").await.unwrap());
    session.close().await;
}

#[tokio::test]
async fn test_unique_violation_is_constraint_violation() {
    let provider = memory_provider().await;
    seed_user(&provider, "test_instructor").await;

    let (session, storage) = storage_for(&provider);
    let err = storage
        .create_user(user_request("test_instructor"))
        .await
        .unwrap_err();
    assert!(matches!(err, CodetaError::ConstraintViolation(_)));
    // 失败的语句回滚后会话仍可继续使用
    assert!(!session.is_open().await);
    assert_eq!(storage.count_users().await.unwrap(), 1);
    session.close().await;
}

#[tokio::test]
async fn test_executor_constraint_violation() {
    let provider = memory_provider().await;
    seed_user(&provider, "derp").await;

    let session = provider.open_session();
    let err = session
        .execute(
            "insert into users (username, password, email, first_name, last_name) \
             values ($1, 'x', 'e', 'f', 'l')",
            vec!["derp".into()],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::ConstraintViolation(_)));
    session.close().await;
}

#[tokio::test]
async fn test_fetch_one_without_rows() {
    let provider = memory_provider().await;
    let session = provider.open_session();

    let err = session
        .fetch_one::<CountRow>(
            "select user_id as count from users where username = $1",
            vec!["nobody".into()],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::NoRows));

    let row: CountRow = session
        .fetch_one("select count(*) as count from users", vec![])
        .await
        .unwrap();
    assert_eq!(row.count, 0);
    session.close().await;
}

#[tokio::test]
async fn test_fetch_mapped_keeps_column_order() {
    let provider = memory_provider().await;
    seed_user(&provider, "derp").await;

    let session = provider.open_session();
    let rows = session
        .fetch_mapped(
            "select username, first_name, user_id from users order by username",
            vec![],
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    let columns: Vec<&str> = rows[0].keys().map(String::as_str).collect();
    assert_eq!(columns, ["username", "first_name", "user_id"]);
    assert_eq!(rows[0]["username"], "derp");
    session.close().await;
}

#[tokio::test]
async fn test_update_user_keeps_unset_fields() {
    let provider = memory_provider().await;
    let user = seed_user(&provider, "derp").await;

    let (session, storage) = storage_for(&provider);
    let updated = storage
        .update_user(
            user.user_id,
            UpdateUserRequest {
                first_name: Some("Ada".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.first_name, "Ada");
    assert_eq!(updated.last_name, user.last_name);
    assert_eq!(updated.email, user.email);
    session.close().await;
}

#[tokio::test]
async fn test_course_title_scope() {
    let provider = memory_provider().await;
    let first = seed_user(&provider, "test_instructor").await;
    let second = seed_user(&provider, "other_instructor").await;
    seed_course(&provider, &first, "test_course").await;

    let (session, storage) = storage_for(&provider);
    assert!(storage
        .course_title_exists(first.user_id, "test_course", TitleScope::Instructor)
        .await
        .unwrap());
    assert!(!storage
        .course_title_exists(second.user_id, "test_course", TitleScope::Instructor)
        .await
        .unwrap());
    assert!(storage
        .course_title_exists(second.user_id, "test_course", TitleScope::Global)
        .await
        .unwrap());
    session.close().await;
}

#[tokio::test]
async fn test_course_listings_and_enrollment() {
    let provider = memory_provider().await;
    let instructor = seed_user(&provider, "test_instructor").await;
    let student = seed_user(&provider, "test_student").await;
    let course = seed_course(&provider, &instructor, "test_course").await;

    let (session, storage) = storage_for(&provider);
    assert!(storage
        .is_instructor(instructor.user_id, course.course_id)
        .await
        .unwrap());
    assert!(!storage.is_enrolled(course.course_id, student.user_id).await.unwrap());

    storage
        .enroll_student(course.course_id, student.user_id)
        .await
        .unwrap();
    assert!(storage.is_enrolled(course.course_id, student.user_id).await.unwrap());

    let teaching = storage.list_instructor_courses(instructor.user_id).await.unwrap();
    assert_eq!(teaching.len(), 1);
    assert_eq!(teaching[0].instructor, "test_instructor");
    assert_eq!(teaching[0].url(), "/test_instructor/test_course/");

    let enrolled = storage.list_student_courses(student.user_id).await.unwrap();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0].course_id, course.course_id);

    let roster = storage.list_course_students(course.course_id).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].username, "test_student");

    // 重复选课违反主键
    let err = storage
        .enroll_student(course.course_id, student.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CodetaError::ConstraintViolation(_)));
    session.close().await;
}

#[tokio::test]
async fn test_assignment_lifecycle() {
    let provider = memory_provider().await;
    let instructor = seed_user(&provider, "test_instructor").await;
    let course = seed_course(&provider, &instructor, "test_course").await;

    let (session, storage) = storage_for(&provider);
    let due = NaiveDate::from_ymd_opt(2014, 5, 4)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .unwrap();
    let created = storage
        .create_assignment(CreateAssignmentRequest {
            course_id: course.course_id,
            title: "test_asn".into(),
            description: "This is a test course".into(),
            due_date: Some(due),
            points_possible: 100,
        })
        .await
        .unwrap();

    let found = storage
        .get_course_assignment(course.course_id, "test_asn")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, created);
    assert_eq!(found.due_display(), "2014-05-04 23:59:59");

    let updated = storage
        .update_assignment(
            created.assignment_id,
            UpdateAssignmentRequest {
                title: "test_asn_2".into(),
                description: "Updated".into(),
                due_date: None,
                points_possible: 50,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "test_asn_2");
    assert_eq!(updated.due_date, None);

    assert!(storage.delete_assignment(created.assignment_id).await.unwrap());
    assert!(storage
        .list_course_assignments(course.course_id)
        .await
        .unwrap()
        .is_empty());
    session.close().await;
}

#[tokio::test]
async fn test_delete_course_removes_dependents() {
    let provider = memory_provider().await;
    let instructor = seed_user(&provider, "test_instructor").await;
    let student = seed_user(&provider, "test_student").await;

    let (session, storage) = storage_for(&provider);
    let course = storage
        .create_course(course_request(instructor.user_id, "test_course"))
        .await
        .unwrap();
    storage
        .enroll_student(course.course_id, student.user_id)
        .await
        .unwrap();
    storage
        .create_assignment(CreateAssignmentRequest {
            course_id: course.course_id,
            title: "test_asn".into(),
            description: "d".into(),
            due_date: None,
            points_possible: 10,
        })
        .await
        .unwrap();

    assert!(storage.delete_course(course.course_id).await.unwrap());
    assert!(storage.get_course(course.course_id).await.unwrap().is_none());
    assert!(storage
        .list_student_courses(student.user_id)
        .await
        .unwrap()
        .is_empty());
    assert!(storage
        .list_course_assignments(course.course_id)
        .await
        .unwrap()
        .is_empty());
    assert!(!storage.delete_course(course.course_id).await.unwrap());
    session.close().await;
}
