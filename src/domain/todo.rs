use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TodoId(pub i64);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub due: Option<String>,
    pub position: Option<i64>,
    pub completed: bool,
    pub updated: DateTime<Utc>,
}

/// Optional fields accepted on creation. Absent fields take the storage defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub due: Option<String>,
    pub position: Option<i64>,
    pub completed: Option<bool>,
}

/// Sparse update: only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub due: Option<String>,
    pub position: Option<i64>,
    pub completed: Option<bool>,
}
