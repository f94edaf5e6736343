use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::TaskStatus;

pub type TaskId = i64;

/// A stored task. `id` and `created_at` are fixed once the row exists.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Task {
    pub id: TaskId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// A task that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl NewTask {
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            deadline: self.deadline,
            created_at: self.created_at,
        }
    }
}

/// Body of a create request. Client-sent `id`, `createdAt` and `status`
/// are not part of the struct and get dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "deadline_format::deserialize")]
    pub deadline: Option<NaiveDateTime>,
}

impl CreateTaskRequest {
    pub fn into_new_task(self, created_at: NaiveDateTime) -> NewTask {
        NewTask {
            title: self.title,
            description: self.description,
            completed: self.completed,
            deadline: self.deadline,
            created_at,
        }
    }
}

/// Body of an update request.
///
/// The three fields replace the stored values wholesale: an absent title
/// clears the stored title. Deadline is deliberately not accepted here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl UpdateTaskRequest {
    pub fn apply_to(self, task: &mut Task) {
        task.title = self.title;
        task.description = self.description;
        task.completed = self.completed;
    }
}

/// Read-time projection of a [`Task`] with its derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: TaskId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub status: TaskStatus,
}

impl TaskView {
    pub fn from_task(task: Task, now: NaiveDateTime) -> Self {
        let status = TaskStatus::classify(task.completed, task.deadline, now);
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            completed: task.completed,
            deadline: task.deadline,
            created_at: task.created_at,
            status,
        }
    }
}

/// Lenient parsing for deadlines coming from a browser form.
///
/// Accepts `null`, an empty string, `datetime-local` values without
/// seconds, and full ISO local timestamps.
pub mod deadline_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, de::Error};

    const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    pub fn parse(value: &str) -> Option<NaiveDateTime> {
        FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse(value)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid deadline: {}", value))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 2)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .expect("valid timestamp")
    }

    #[rstest]
    #[case(json!({"title": "a"}), None)]
    #[case(json!({"title": "a", "deadline": null}), None)]
    #[case(json!({"title": "a", "deadline": ""}), None)]
    #[case(json!({"title": "a", "deadline": "2026-05-02T17:30"}), Some(at(17, 30)))]
    #[case(json!({"title": "a", "deadline": "2026-05-02T17:30:00"}), Some(at(17, 30)))]
    #[case(json!({"title": "a", "deadline": "2026-05-02T17:30:00.000"}), Some(at(17, 30)))]
    fn create_request_accepts_browser_deadlines(
        #[case] body: serde_json::Value,
        #[case] expected: Option<NaiveDateTime>,
    ) {
        let request: CreateTaskRequest = serde_json::from_value(body).expect("valid body");
        assert_eq!(request.deadline, expected);
        assert!(!request.completed);
    }

    #[test]
    fn create_request_rejects_garbage_deadline() {
        let result =
            serde_json::from_value::<CreateTaskRequest>(json!({"deadline": "next tuesday"}));
        assert!(result.is_err());
    }

    #[test]
    fn create_request_ignores_client_identity_fields() {
        let request: CreateTaskRequest = serde_json::from_value(json!({
            "id": 99,
            "createdAt": "2001-01-01T00:00:00",
            "status": "late",
            "title": "write report",
        }))
        .expect("valid body");

        let new_task = request.into_new_task(at(9, 0));
        assert_eq!(new_task.created_at, at(9, 0));
        assert_eq!(new_task.title.as_deref(), Some("write report"));
    }

    #[test]
    fn update_overwrites_mutable_fields_only() {
        let mut task = Task {
            id: 7,
            title: Some("old".to_string()),
            description: Some("keep me?".to_string()),
            completed: false,
            deadline: Some(at(18, 0)),
            created_at: at(8, 0),
        };
        let update: UpdateTaskRequest = serde_json::from_value(json!({
            "title": "new",
            "completed": true,
            "deadline": "2030-01-01T00:00",
        }))
        .expect("valid body");

        update.apply_to(&mut task);

        assert_eq!(task.id, 7);
        assert_eq!(task.title.as_deref(), Some("new"));
        assert_eq!(task.description, None);
        assert!(task.completed);
        assert_eq!(task.deadline, Some(at(18, 0)));
        assert_eq!(task.created_at, at(8, 0));
    }

    #[test]
    fn view_serializes_camel_case_with_status() {
        let task = Task {
            id: 1,
            title: Some("t".to_string()),
            description: None,
            completed: false,
            deadline: Some(at(10, 0)),
            created_at: at(8, 0),
        };

        let value = serde_json::to_value(TaskView::from_task(task, at(11, 0))).expect("json");

        assert_eq!(value["createdAt"], "2026-05-02T08:00:00");
        assert_eq!(value["deadline"], "2026-05-02T10:00:00");
        assert_eq!(value["status"], "late");
        assert_eq!(value["description"], serde_json::Value::Null);
    }
}
