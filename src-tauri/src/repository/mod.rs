//! Repository Layer
//!
//! Data access abstractions and implementations.

mod board_repo;
mod card_repo;
mod checklist_repo;
mod db;
mod list_repo;
mod positioning;
mod traits;

#[cfg(test)]
mod tests;

pub use board_repo::BoardRepository;
pub use card_repo::{CardRepository, UpdateCardFields};
pub use checklist_repo::{ChecklistRepository, UpdateItemFields};
pub use db::{DbState, SharedConnection};
pub use list_repo::ListRepository;
pub use positioning::{PositionUpdate, POSITION_GAP};
pub use traits::Repository;
