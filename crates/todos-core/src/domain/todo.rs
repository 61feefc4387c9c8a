use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Todo entity - a task owned by exactly one user.
///
/// The owner is set at creation and never reassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Create a new todo for the given owner.
    pub fn new(user_id: Uuid, title: String, completed: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            completed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. Fields left as `None` are unchanged.
    /// Refreshes `updated_at` unconditionally.
    pub fn apply_patch(&mut self, title: Option<String>, completed: Option<bool>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(completed) = completed {
            self.completed = completed;
        }
        self.updated_at = Utc::now();
    }
}
