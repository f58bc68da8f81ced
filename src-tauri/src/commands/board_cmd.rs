//! Tauri Commands for Board operations

use tauri::State;

use crate::domain::Board;
use crate::AppState;

/// List all boards
#[tauri::command]
pub async fn list_boards(state: State<'_, AppState>) -> Result<Vec<Board>, String> {
    let repo = state.board_repo.lock().await;
    repo.list().await.map_err(|e| e.to_string())
}

/// Create a new board
#[tauri::command]
pub async fn create_board(state: State<'_, AppState>, title: String) -> Result<Board, String> {
    let repo = state.board_repo.lock().await;
    repo.create(&title).await.map_err(|e| e.to_string())
}
