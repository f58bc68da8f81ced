//! Tauri Commands for List operations

use tauri::State;

use crate::domain::List;
use crate::repository::{PositionUpdate, Repository};
use crate::AppState;

/// Lists of a board, in position order
#[tauri::command]
pub async fn list_lists(state: State<'_, AppState>, board_id: u32) -> Result<Vec<List>, String> {
    let repo = state.list_repo.lock().await;
    repo.list_by_board(board_id).await.map_err(|e| e.to_string())
}

/// Create a list appended at the end of the board
#[tauri::command]
pub async fn create_list(
    state: State<'_, AppState>,
    board_id: u32,
    title: String,
) -> Result<List, String> {
    let repo = state.list_repo.lock().await;
    repo.create(board_id, &title).await.map_err(|e| e.to_string())
}

/// Rename a list
#[tauri::command]
pub async fn rename_list(state: State<'_, AppState>, id: u32, title: String) -> Result<(), String> {
    let repo = state.list_repo.lock().await;
    repo.rename(id, &title).await.map_err(|e| e.to_string())
}

/// Delete a list and everything it contains
#[tauri::command]
pub async fn delete_list(state: State<'_, AppState>, id: u32) -> Result<(), String> {
    let repo = state.list_repo.lock().await;
    repo.delete(id).await.map_err(|e| e.to_string())
}

/// Persist the changed subset of a board reorder
#[tauri::command]
pub async fn reorder_lists(
    state: State<'_, AppState>,
    changes: Vec<PositionUpdate>,
) -> Result<(), String> {
    let repo = state.list_repo.lock().await;
    repo.reorder(&changes).await.map_err(|e| e.to_string())
}
