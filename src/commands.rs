//! Tauri Command Wrappers
//!
//! Frontend bindings to the persistence gateway. Every call resolves
//! to a Result so the optimistic-update paths can roll back on
//! failure. All reorder calls carry only the entries whose position
//! actually changed.

use crate::models::{Board, Card, Checklist, ChecklistItem, List};
use crate::positions::PositionChange;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Stringify a rejected invoke promise
fn invoke_err(e: JsValue) -> String {
    e.as_string()
        .unwrap_or_else(|| format!("{:?}", e))
}

async fn call<T: serde::de::DeserializeOwned>(cmd: &str, args: &impl Serialize) -> Result<T, String> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = invoke(cmd, js_args).await.map_err(invoke_err)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

async fn call_unit(cmd: &str, args: &impl Serialize) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    invoke(cmd, js_args).await.map_err(invoke_err)?;
    Ok(())
}

// ========================
// Command Argument Structs
// ========================

#[derive(Serialize)]
pub struct IdArgs {
    pub id: u32,
}

#[derive(Serialize)]
pub struct BoardIdArgs {
    #[serde(rename = "boardId")]
    pub board_id: u32,
}

#[derive(Serialize)]
pub struct ListIdArgs {
    #[serde(rename = "listId")]
    pub list_id: u32,
}

#[derive(Serialize)]
pub struct CardIdArgs {
    #[serde(rename = "cardId")]
    pub card_id: u32,
}

#[derive(Serialize)]
pub struct ChecklistIdArgs {
    #[serde(rename = "checklistId")]
    pub checklist_id: u32,
}

#[derive(Serialize)]
pub struct TitleArgs<'a> {
    pub title: &'a str,
}

#[derive(Serialize)]
pub struct CreateListArgs<'a> {
    #[serde(rename = "boardId")]
    pub board_id: u32,
    pub title: &'a str,
}

#[derive(Serialize)]
pub struct RenameArgs<'a> {
    pub id: u32,
    pub title: &'a str,
}

#[derive(Serialize)]
pub struct CreateCardArgs<'a> {
    #[serde(rename = "listId")]
    pub list_id: u32,
    pub title: &'a str,
}

/// Partial card update; `None` fields are left untouched. Carries
/// `listId` + `position` on a cross-list move, in which case the
/// backend renumbers both affected lists.
#[derive(Serialize, Default)]
pub struct UpdateCardArgs {
    pub id: u32,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "listId")]
    pub list_id: Option<u32>,
    pub position: Option<i32>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<i64>,
    #[serde(rename = "startDate")]
    pub start_date: Option<i64>,
    pub members: Option<Vec<u32>>,
    pub labels: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct ReorderArgs {
    pub changes: Vec<PositionChange>,
}

#[derive(Serialize)]
pub struct CreateChecklistArgs<'a> {
    #[serde(rename = "cardId")]
    pub card_id: u32,
    pub title: &'a str,
}

#[derive(Serialize)]
pub struct CreateChecklistItemArgs<'a> {
    #[serde(rename = "checklistId")]
    pub checklist_id: u32,
    pub text: &'a str,
}

#[derive(Serialize, Default)]
pub struct UpdateChecklistItemArgs {
    pub id: u32,
    pub text: Option<String>,
    pub assignee: Option<u32>,
    #[serde(rename = "dueAt")]
    pub due_at: Option<i64>,
}

// ========================
// Board Commands
// ========================

pub async fn list_boards() -> Result<Vec<Board>, String> {
    call("list_boards", &()).await
}

pub async fn create_board(title: &str) -> Result<Board, String> {
    call("create_board", &TitleArgs { title }).await
}

// ========================
// List Commands
// ========================

pub async fn list_lists(board_id: u32) -> Result<Vec<List>, String> {
    call("list_lists", &BoardIdArgs { board_id }).await
}

pub async fn create_list(args: &CreateListArgs<'_>) -> Result<List, String> {
    call("create_list", args).await
}

pub async fn rename_list(id: u32, title: &str) -> Result<(), String> {
    call_unit("rename_list", &RenameArgs { id, title }).await
}

/// Deletes a list; its cards are cascaded server-side
pub async fn delete_list(id: u32) -> Result<(), String> {
    call_unit("delete_list", &IdArgs { id }).await
}

pub async fn reorder_lists(changes: Vec<PositionChange>) -> Result<(), String> {
    call_unit("reorder_lists", &ReorderArgs { changes }).await
}

// ========================
// Card Commands
// ========================

pub async fn list_cards(list_id: u32) -> Result<Vec<Card>, String> {
    call("list_cards", &ListIdArgs { list_id }).await
}

pub async fn create_card(args: &CreateCardArgs<'_>) -> Result<Card, String> {
    call("create_card", args).await
}

/// Partial update; also the move call for cross-list transfers
pub async fn update_card(args: &UpdateCardArgs) -> Result<Card, String> {
    call("update_card", args).await
}

pub async fn delete_card(id: u32) -> Result<(), String> {
    call_unit("delete_card", &IdArgs { id }).await
}

pub async fn reorder_cards(changes: Vec<PositionChange>) -> Result<(), String> {
    call_unit("reorder_cards", &ReorderArgs { changes }).await
}

// ========================
// Checklist Commands
// ========================

pub async fn list_checklists(card_id: u32) -> Result<Vec<Checklist>, String> {
    call("list_checklists", &CardIdArgs { card_id }).await
}

pub async fn create_checklist(args: &CreateChecklistArgs<'_>) -> Result<Checklist, String> {
    call("create_checklist", args).await
}

pub async fn rename_checklist(id: u32, title: &str) -> Result<(), String> {
    call_unit("rename_checklist", &RenameArgs { id, title }).await
}

/// Deletes a checklist; its items are cascaded server-side
pub async fn delete_checklist(id: u32) -> Result<(), String> {
    call_unit("delete_checklist", &IdArgs { id }).await
}

pub async fn reorder_checklists(changes: Vec<PositionChange>) -> Result<(), String> {
    call_unit("reorder_checklists", &ReorderArgs { changes }).await
}

// ========================
// Checklist Item Commands
// ========================

pub async fn list_checklist_items(checklist_id: u32) -> Result<Vec<ChecklistItem>, String> {
    call("list_checklist_items", &ChecklistIdArgs { checklist_id }).await
}

pub async fn create_checklist_item(args: &CreateChecklistItemArgs<'_>) -> Result<ChecklistItem, String> {
    call("create_checklist_item", args).await
}

pub async fn update_checklist_item(args: &UpdateChecklistItemArgs) -> Result<ChecklistItem, String> {
    call("update_checklist_item", args).await
}

pub async fn toggle_checklist_item(id: u32) -> Result<ChecklistItem, String> {
    call("toggle_checklist_item", &IdArgs { id }).await
}

pub async fn delete_checklist_item(id: u32) -> Result<(), String> {
    call_unit("delete_checklist_item", &IdArgs { id }).await
}

pub async fn reorder_checklist_items(changes: Vec<PositionChange>) -> Result<(), String> {
    call_unit("reorder_checklist_items", &ReorderArgs { changes }).await
}
