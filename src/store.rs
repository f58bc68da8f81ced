//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use crate::models::{Board, List};
use leptos::prelude::*;
use reactive_stores::Store;

/// Board-level state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// All boards
    pub boards: Vec<Board>,
    /// Currently open board ID
    pub current_board_id: u32,
    /// Ordered lists of the current board
    pub lists: Vec<List>,
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            current_board_id: 1,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type BoardStore = Store<BoardState>;

/// Get the board store from context
pub fn use_board_store() -> BoardStore {
    expect_context::<BoardStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the list collection wholesale (load / rollback)
pub fn store_set_lists(store: &BoardStore, lists: Vec<List>) {
    *store.lists().write() = lists;
}

/// Append a list (optimistic create lands at the end)
pub fn store_add_list(store: &BoardStore, list: List) {
    store.lists().write().push(list);
}

/// Update a list in the store by ID
pub fn store_update_list(store: &BoardStore, updated: List) {
    if let Some(list) = store
        .lists()
        .write()
        .iter_mut()
        .find(|list| list.id == updated.id)
    {
        *list = updated;
    }
}

/// Remove a list from the store by ID
pub fn store_remove_list(store: &BoardStore, list_id: u32) {
    store.lists().write().retain(|list| list.id != list_id);
}
