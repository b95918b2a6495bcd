use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single task in the tree.
///
/// This struct is also the persisted snapshot shape: `tasks.json` is a JSON
/// array of these records, and the export document embeds them unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique ID, assigned at creation and never reassigned
    pub id: Uuid,
    /// User-editable title (never empty once committed)
    pub title: String,
    /// Accumulated seconds from the timer
    #[serde(default)]
    pub elapsed_secs: u64,
    /// Whether the task's children are expanded in the list
    #[serde(default = "default_open")]
    pub open: bool,
    /// Parent task ID; `None` means this is a root task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
}

fn default_open() -> bool {
    true
}

impl Task {
    pub fn new(title: String, parent_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            elapsed_secs: 0,
            open: true,
            parent_id,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("Write report".to_string(), None);
        assert_eq!(task.title, "Write report");
        assert_eq!(task.elapsed_secs, 0);
        assert!(task.open);
        assert!(task.is_root());
    }

    #[test]
    fn test_new_task_with_parent() {
        let parent = Task::new("Parent".to_string(), None);
        let child = Task::new("Child".to_string(), Some(parent.id));
        assert_eq!(child.parent_id, Some(parent.id));
        assert!(!child.is_root());
        assert_ne!(child.id, parent.id);
    }

    #[test]
    fn test_snapshot_shape_round_trip() {
        let task = Task::new("Physics".to_string(), None);
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_snapshot_omits_absent_parent() {
        let task = Task::new("Root".to_string(), None);
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("parent_id"));
    }

    #[test]
    fn test_snapshot_defaults_for_sparse_records() {
        let json = format!(r#"{{"id":"{}","title":"Old"}}"#, Uuid::new_v4());
        let task: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task.elapsed_secs, 0);
        assert!(task.open);
        assert!(task.parent_id.is_none());
    }
}
