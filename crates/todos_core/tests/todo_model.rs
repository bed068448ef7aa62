use chrono::{TimeZone, Utc};
use todos_core::{Todo, TodoList, TodoValidationError};
use uuid::Uuid;

#[test]
fn todo_new_sets_defaults_and_trims() {
    let before = Utc::now() - chrono::Duration::milliseconds(1);
    let todo = Todo::new("  hello  ").unwrap();

    assert!(!todo.id().is_nil());
    assert_eq!(todo.title(), "hello");
    assert!(!todo.is_completed());
    assert!(todo.created_at() >= before);
}

#[test]
fn todo_new_rejects_blank_titles() {
    assert!(matches!(
        Todo::new("   "),
        Err(TodoValidationError::EmptyTitle(_))
    ));
    assert!(matches!(Todo::new(""), Err(TodoValidationError::EmptyTitle(_))));
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Todo::with_id(Uuid::nil(), "invalid", Utc::now()).unwrap_err();
    assert_eq!(err, TodoValidationError::NilId);
}

#[test]
fn todo_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
        + chrono::Duration::milliseconds(123);
    let todo = Todo::with_id(id, "Buy milk", created_at).unwrap();

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "Buy milk");
    assert_eq!(json["completed"], false);
    assert_eq!(json["createdAt"], "2024-05-01T09:30:00.123Z");

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, todo);
}

#[test]
fn created_at_accepts_offsets_and_normalizes_to_utc() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "call back",
        "completed": true,
        "createdAt": "2024-05-01T11:30:00.5+02:00"
    });

    let todo: Todo = serde_json::from_value(value).unwrap();
    assert!(todo.is_completed());
    assert_eq!(
        todo.created_at(),
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap() + chrono::Duration::milliseconds(500)
    );
}

#[test]
fn created_at_rejects_non_timestamp_text() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "bad",
        "completed": false,
        "createdAt": "yesterday"
    });

    let err = serde_json::from_value::<Todo>(value).unwrap_err();
    assert!(err.to_string().contains("invalid createdAt"), "unexpected error: {err}");
}

#[test]
fn list_deserialize_rejects_duplicate_ids() {
    let value = serde_json::json!([
        {
            "id": "11111111-2222-4333-8444-555555555555",
            "title": "one",
            "completed": false,
            "createdAt": "2024-05-01T09:30:00.000Z"
        },
        {
            "id": "11111111-2222-4333-8444-555555555555",
            "title": "two",
            "completed": false,
            "createdAt": "2024-05-01T09:31:00.000Z"
        }
    ]);

    let err = serde_json::from_value::<TodoList>(value).unwrap_err();
    assert!(err.to_string().contains("duplicate todo id"), "unexpected error: {err}");
}

#[test]
fn list_deserialize_rejects_blank_titles() {
    let value = serde_json::json!([
        {
            "id": "11111111-2222-4333-8444-555555555555",
            "title": "   ",
            "completed": false,
            "createdAt": "2024-05-01T09:30:00.000Z"
        }
    ]);

    assert!(serde_json::from_value::<TodoList>(value).is_err());
}

#[test]
fn list_serializes_as_plain_array() {
    let mut list = TodoList::new();
    list.add("first").unwrap();

    let json = serde_json::to_value(&list).unwrap();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "first");
}
