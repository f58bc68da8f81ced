//! Checklist Entities
//!
//! A card owns ordered checklists; a checklist owns ordered items.

use super::entity::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    pub id: u32,
    pub card_id: u32,
    pub title: String,
    /// Sort key, unique and strictly increasing within the card
    pub position: i32,
}

impl Checklist {
    pub fn new(id: u32, card_id: u32, title: String, position: i32) -> Self {
        Self {
            id,
            card_id,
            title,
            position,
        }
    }
}

impl Entity for Checklist {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: u32,
    pub checklist_id: u32,
    pub text: String,
    pub is_done: bool,
    pub assignee: Option<u32>,
    pub due_at: Option<i64>,
    /// Sort key, unique and strictly increasing within the checklist
    pub position: i32,
}

impl ChecklistItem {
    pub fn new(id: u32, checklist_id: u32, text: String, position: i32) -> Self {
        Self {
            id,
            checklist_id,
            text,
            is_done: false,
            assignee: None,
            due_at: None,
            position,
        }
    }
}

impl Entity for ChecklistItem {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
