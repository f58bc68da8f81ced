//! Card Entity
//!
//! A card belongs to exactly one list at all times; moving a card is a
//! transfer, never a duplication. Progress is derived from checklist
//! items and never written directly.

use super::entity::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,
    pub list_id: u32,
    pub title: String,
    pub description: Option<String>,
    /// Done/total percentage over all checklist items, derived on read
    pub progress: u8,
    pub due_date: Option<i64>,
    pub start_date: Option<i64>,
    #[serde(default)]
    pub members: Vec<u32>,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Sort key, unique and strictly increasing within the list
    pub position: i32,
}

impl Card {
    pub fn new(id: u32, list_id: u32, title: String, position: i32) -> Self {
        Self {
            id,
            list_id,
            title,
            description: None,
            progress: 0,
            due_date: None,
            start_date: None,
            members: Vec::new(),
            labels: Vec::new(),
            position,
        }
    }
}

impl Entity for Card {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
