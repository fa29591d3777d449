use super::*;
use crate::state::test_helpers::test_pool;

#[tokio::test]
async fn added_student_appears_in_list() {
    let pool = test_pool().await;
    let created = add_student(&pool, "Ann", "R1", "5A").await.unwrap();

    let students = list_students(&pool).await.unwrap();
    assert_eq!(students, vec![created]);
    assert_eq!(students[0].name, "Ann");
    assert_eq!(students[0].roll_number, "R1");
    assert_eq!(students[0].class_name, "5A");
}

#[tokio::test]
async fn duplicate_roll_number_is_a_conflict_and_count_unchanged() {
    let pool = test_pool().await;
    add_student(&pool, "Ann", "R1", "5A").await.unwrap();

    let err = add_student(&pool, "Bob", "R1", "5B").await.unwrap_err();
    assert!(matches!(err, RosterError::DuplicateRollNumber));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.to_string(), "A student with this roll number already exists.");
    assert_eq!(list_students(&pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn fields_are_trimmed() {
    let pool = test_pool().await;
    let student = add_student(&pool, "  Ann ", " R1", "5A  ").await.unwrap();
    assert_eq!((student.name.as_str(), student.roll_number.as_str(), student.class_name.as_str()), ("Ann", "R1", "5A"));

    let err = add_student(&pool, "Other", "R1  ", "5A").await.unwrap_err();
    assert!(matches!(err, RosterError::DuplicateRollNumber));
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let pool = test_pool().await;
    for (name, roll, class) in [("", "R1", "5A"), ("Ann", " ", "5A"), ("Ann", "R1", "")] {
        let err = add_student(&pool, name, roll, class).await.unwrap_err();
        assert!(matches!(err, RosterError::MissingFields));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
    assert!(list_students(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_sorted_by_name() {
    let pool = test_pool().await;
    add_student(&pool, "Carl", "R3", "5A").await.unwrap();
    add_student(&pool, "Ann", "R1", "5A").await.unwrap();
    add_student(&pool, "Bea", "R2", "5B").await.unwrap();

    let names: Vec<String> = list_students(&pool).await.unwrap().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Ann", "Bea", "Carl"]);
}

#[test]
fn added_message_embeds_name() {
    let student = Student { id: 7, name: "Ann".into(), roll_number: "R1".into(), class_name: "5A".into() };
    assert_eq!(added_message(&student), "Student 'Ann' added successfully!");
}
