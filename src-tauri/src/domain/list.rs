//! List Entity
//!
//! An ordered column of cards inside a board.

use super::entity::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    pub id: u32,
    pub board_id: u32,
    pub title: String,
    /// Sort key, unique and strictly increasing within the board
    pub position: i32,
}

impl List {
    pub fn new(id: u32, board_id: u32, title: String, position: i32) -> Self {
        Self {
            id,
            board_id,
            title,
            position,
        }
    }
}

impl Entity for List {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
