//! Board Entity

use super::entity::Entity;
use serde::{Deserialize, Serialize};

/// A board owning an ordered sequence of lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: u32,
    pub title: String,
}

impl Board {
    pub fn new(id: u32, title: String) -> Self {
        Self { id, title }
    }
}

impl Entity for Board {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
