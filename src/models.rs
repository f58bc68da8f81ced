//! Frontend Models
//!
//! Data structures matching backend entities.

use serde::{Deserialize, Serialize};

/// Board data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: u32,
    pub title: String,
}

/// List data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: u32,
    pub board_id: u32,
    pub title: String,
    pub position: i32,
}

/// Card data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,
    pub list_id: u32,
    pub title: String,
    pub description: Option<String>,
    /// Done/total percentage over all checklist items, derived, never edited directly
    pub progress: u8,
    pub due_date: Option<i64>,
    pub start_date: Option<i64>,
    #[serde(default)]
    pub members: Vec<u32>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub position: i32,
}

/// Checklist data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: u32,
    pub card_id: u32,
    pub title: String,
    pub position: i32,
}

/// Checklist item data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: u32,
    pub checklist_id: u32,
    pub text: String,
    pub is_done: bool,
    pub assignee: Option<u32>,
    pub due_at: Option<i64>,
    pub position: i32,
}
