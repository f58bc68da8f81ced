//! Tauri Commands for Checklist and Checklist Item operations

use tauri::State;

use crate::domain::{Checklist, ChecklistItem};
use crate::repository::{PositionUpdate, Repository, UpdateItemFields};
use crate::AppState;

/// Checklists of a card, in position order
#[tauri::command]
pub async fn list_checklists(
    state: State<'_, AppState>,
    card_id: u32,
) -> Result<Vec<Checklist>, String> {
    let repo = state.checklist_repo.lock().await;
    repo.list_by_card(card_id).await.map_err(|e| e.to_string())
}

/// Create a checklist appended at the end of the card
#[tauri::command]
pub async fn create_checklist(
    state: State<'_, AppState>,
    card_id: u32,
    title: String,
) -> Result<Checklist, String> {
    let repo = state.checklist_repo.lock().await;
    repo.create(card_id, &title).await.map_err(|e| e.to_string())
}

/// Rename a checklist
#[tauri::command]
pub async fn rename_checklist(
    state: State<'_, AppState>,
    id: u32,
    title: String,
) -> Result<(), String> {
    let repo = state.checklist_repo.lock().await;
    repo.rename(id, &title).await.map_err(|e| e.to_string())
}

/// Delete a checklist and its items
#[tauri::command]
pub async fn delete_checklist(state: State<'_, AppState>, id: u32) -> Result<(), String> {
    let repo = state.checklist_repo.lock().await;
    repo.delete(id).await.map_err(|e| e.to_string())
}

/// Persist the changed subset of a checklist reorder within a card
#[tauri::command]
pub async fn reorder_checklists(
    state: State<'_, AppState>,
    changes: Vec<PositionUpdate>,
) -> Result<(), String> {
    let repo = state.checklist_repo.lock().await;
    repo.reorder(&changes).await.map_err(|e| e.to_string())
}

// ========================
// Checklist Items
// ========================

/// Items of a checklist, in position order
#[tauri::command]
pub async fn list_checklist_items(
    state: State<'_, AppState>,
    checklist_id: u32,
) -> Result<Vec<ChecklistItem>, String> {
    let repo = state.checklist_repo.lock().await;
    repo.list_items(checklist_id).await.map_err(|e| e.to_string())
}

/// Create an item appended at the end of the checklist
#[tauri::command]
pub async fn create_checklist_item(
    state: State<'_, AppState>,
    checklist_id: u32,
    text: String,
) -> Result<ChecklistItem, String> {
    let repo = state.checklist_repo.lock().await;
    repo.create_item(checklist_id, &text).await.map_err(|e| e.to_string())
}

/// Partial item update
#[tauri::command]
pub async fn update_checklist_item(
    state: State<'_, AppState>,
    id: u32,
    text: Option<String>,
    assignee: Option<u32>,
    due_at: Option<i64>,
) -> Result<ChecklistItem, String> {
    let repo = state.checklist_repo.lock().await;
    repo.update_item(
        id,
        UpdateItemFields {
            text,
            is_done: None,
            assignee,
            due_at,
        },
    )
    .await
    .map_err(|e| e.to_string())?;
    repo.find_item(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Item {} not found", id))
}

/// Flip an item's done state
#[tauri::command]
pub async fn toggle_checklist_item(
    state: State<'_, AppState>,
    id: u32,
) -> Result<ChecklistItem, String> {
    let repo = state.checklist_repo.lock().await;
    repo.toggle_item(id).await.map_err(|e| e.to_string())?;
    repo.find_item(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Item {} not found", id))
}

/// Delete an item
#[tauri::command]
pub async fn delete_checklist_item(state: State<'_, AppState>, id: u32) -> Result<(), String> {
    let repo = state.checklist_repo.lock().await;
    repo.delete_item(id).await.map_err(|e| e.to_string())
}

/// Persist the changed subset of an item reorder within a checklist
#[tauri::command]
pub async fn reorder_checklist_items(
    state: State<'_, AppState>,
    changes: Vec<PositionUpdate>,
) -> Result<(), String> {
    let repo = state.checklist_repo.lock().await;
    repo.reorder_items(&changes).await.map_err(|e| e.to_string())
}
