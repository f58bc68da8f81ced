//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod board;
mod card;
mod checklist;
mod entity;
mod list;

pub use board::Board;
pub use card::Card;
pub use checklist::{Checklist, ChecklistItem};
pub use entity::{DomainError, DomainResult, Entity};
pub use list::List;
