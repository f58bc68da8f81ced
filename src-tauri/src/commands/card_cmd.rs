//! Tauri Commands for Card operations

use tauri::State;

use crate::domain::Card;
use crate::repository::{PositionUpdate, Repository, UpdateCardFields};
use crate::AppState;

/// Cards of a list, in position order
#[tauri::command]
pub async fn list_cards(state: State<'_, AppState>, list_id: u32) -> Result<Vec<Card>, String> {
    let repo = state.card_repo.lock().await;
    repo.list_by_list(list_id).await.map_err(|e| e.to_string())
}

/// Create a card appended at the end of the list
#[tauri::command]
pub async fn create_card(
    state: State<'_, AppState>,
    list_id: u32,
    title: String,
) -> Result<Card, String> {
    let repo = state.card_repo.lock().await;
    repo.create(list_id, &title).await.map_err(|e| e.to_string())
}

/// Partial card update. With `list_id`/`position` set this is the
/// cross-list move: one call, both lists renumbered server-side.
#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn update_card(
    state: State<'_, AppState>,
    id: u32,
    title: Option<String>,
    description: Option<String>,
    list_id: Option<u32>,
    position: Option<i32>,
    due_date: Option<i64>,
    start_date: Option<i64>,
    members: Option<Vec<u32>>,
    labels: Option<Vec<String>>,
) -> Result<Card, String> {
    let repo = state.card_repo.lock().await;
    repo.update(
        id,
        UpdateCardFields {
            title,
            description,
            due_date,
            start_date,
            members,
            labels,
            list_id,
            position,
        },
    )
    .await
    .map_err(|e| e.to_string())
}

/// Delete a card and its checklists
#[tauri::command]
pub async fn delete_card(state: State<'_, AppState>, id: u32) -> Result<(), String> {
    let repo = state.card_repo.lock().await;
    repo.delete(id).await.map_err(|e| e.to_string())
}

/// Persist the changed subset of an in-list reorder
#[tauri::command]
pub async fn reorder_cards(
    state: State<'_, AppState>,
    changes: Vec<PositionUpdate>,
) -> Result<(), String> {
    let repo = state.card_repo.lock().await;
    repo.reorder(&changes).await.map_err(|e| e.to_string())
}
