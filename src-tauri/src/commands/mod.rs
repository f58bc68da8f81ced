//! Tauri Command Handlers
//!
//! Thin adapters between the invoke layer and the repositories.
//! Errors cross the bridge as strings.

mod board_cmd;
mod card_cmd;
mod checklist_cmd;
mod list_cmd;

pub use board_cmd::*;
pub use card_cmd::*;
pub use checklist_cmd::*;
pub use list_cmd::*;
