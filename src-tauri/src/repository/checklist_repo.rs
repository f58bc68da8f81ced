//! Checklist Repository
//!
//! Owns both checklists and their items; the two are always accessed
//! together and share cascade rules.

use async_trait::async_trait;
use rusqlite::{params, Row};

use super::db::SharedConnection;
use super::positioning::{apply_changes, next_position, PositionUpdate};
use super::traits::Repository;
use crate::domain::{Checklist, ChecklistItem, DomainError, DomainResult};

/// Partial item update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateItemFields {
    pub text: Option<String>,
    pub is_done: Option<bool>,
    pub assignee: Option<u32>,
    pub due_at: Option<i64>,
}

pub struct ChecklistRepository {
    pub(super) conn: SharedConnection,
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<ChecklistItem> {
    Ok(ChecklistItem {
        id: row.get(0)?,
        checklist_id: row.get(1)?,
        text: row.get(2)?,
        is_done: row.get::<_, i64>(3)? != 0,
        assignee: row.get(4)?,
        due_at: row.get(5)?,
        position: row.get(6)?,
    })
}

impl ChecklistRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, card_id: u32, title: &str) -> DomainResult<Checklist> {
        if title.is_empty() {
            return Err(DomainError::InvalidInput(
                "Checklist title is empty".to_string(),
            ));
        }
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let position = next_position(conn, "checklists", "card_id", card_id)?;
        conn.execute(
            "INSERT INTO checklists (card_id, title, position, created_at)
             VALUES (?, ?, ?, strftime('%s', 'now'))",
            params![card_id, title, position],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let id = conn.last_insert_rowid() as u32;
        Ok(Checklist::new(id, card_id, title.to_string(), position))
    }

    pub async fn list_by_card(&self, card_id: u32) -> DomainResult<Vec<Checklist>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT id, card_id, title, position FROM checklists
                 WHERE card_id = ? ORDER BY position, id",
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let checklists = stmt
            .query_map(params![card_id], |row| {
                Ok(Checklist::new(
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                ))
            })
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(checklists)
    }

    pub async fn rename(&self, id: u32, title: &str) -> DomainResult<()> {
        if title.is_empty() {
            return Err(DomainError::InvalidInput(
                "Checklist title is empty".to_string(),
            ));
        }
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let updated = conn
            .execute(
                "UPDATE checklists SET title = ?, updated_at = strftime('%s', 'now') WHERE id = ?",
                params![title, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if updated == 0 {
            return Err(DomainError::NotFound(format!("Checklist {} not found", id)));
        }
        Ok(())
    }

    /// Apply the changed subset of a client-side checklist reorder
    pub async fn reorder(&self, changes: &[PositionUpdate]) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        apply_changes(conn, "checklists", changes)
    }

    pub async fn create_item(&self, checklist_id: u32, text: &str) -> DomainResult<ChecklistItem> {
        if text.is_empty() {
            return Err(DomainError::InvalidInput("Item text is empty".to_string()));
        }
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let position = next_position(conn, "checklist_items", "checklist_id", checklist_id)?;
        conn.execute(
            "INSERT INTO checklist_items (checklist_id, text, position, created_at)
             VALUES (?, ?, ?, strftime('%s', 'now'))",
            params![checklist_id, text, position],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let id = conn.last_insert_rowid() as u32;
        Ok(ChecklistItem::new(id, checklist_id, text.to_string(), position))
    }

    pub async fn list_items(&self, checklist_id: u32) -> DomainResult<Vec<ChecklistItem>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT id, checklist_id, text, is_done, assignee, due_at, position
                 FROM checklist_items WHERE checklist_id = ? ORDER BY position, id",
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let items = stmt
            .query_map(params![checklist_id], row_to_item)
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(items)
    }

    pub async fn find_item(&self, id: u32) -> DomainResult<Option<ChecklistItem>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.query_row(
            "SELECT id, checklist_id, text, is_done, assignee, due_at, position
             FROM checklist_items WHERE id = ?",
            params![id],
            row_to_item,
        )
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            e => Err(DomainError::Internal(e.to_string())),
        })
    }

    pub async fn update_item(&self, id: u32, fields: UpdateItemFields) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        if let Some(text) = &fields.text {
            if text.is_empty() {
                return Err(DomainError::InvalidInput("Item text is empty".to_string()));
            }
            conn.execute(
                "UPDATE checklist_items SET text = ? WHERE id = ?",
                params![text, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        if let Some(is_done) = fields.is_done {
            conn.execute(
                "UPDATE checklist_items SET is_done = ? WHERE id = ?",
                params![is_done as i64, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        if let Some(assignee) = fields.assignee {
            conn.execute(
                "UPDATE checklist_items SET assignee = ? WHERE id = ?",
                params![assignee, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        if let Some(due_at) = fields.due_at {
            conn.execute(
                "UPDATE checklist_items SET due_at = ? WHERE id = ?",
                params![due_at, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        let updated = conn
            .execute(
                "UPDATE checklist_items SET updated_at = strftime('%s', 'now') WHERE id = ?",
                params![id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if updated == 0 {
            return Err(DomainError::NotFound(format!("Item {} not found", id)));
        }
        Ok(())
    }

    /// Flip an item's done state; returns the new state
    pub async fn toggle_item(&self, id: u32) -> DomainResult<bool> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let updated = conn
            .execute(
                "UPDATE checklist_items
                 SET is_done = 1 - is_done, updated_at = strftime('%s', 'now')
                 WHERE id = ?",
                params![id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if updated == 0 {
            return Err(DomainError::NotFound(format!("Item {} not found", id)));
        }
        conn.query_row(
            "SELECT is_done FROM checklist_items WHERE id = ?",
            params![id],
            |row| Ok(row.get::<_, i64>(0)? != 0),
        )
        .map_err(|e| DomainError::Internal(e.to_string()))
    }

    pub async fn delete_item(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute("DELETE FROM checklist_items WHERE id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }

    /// Apply the changed subset of a client-side item reorder
    pub async fn reorder_items(&self, changes: &[PositionUpdate]) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        apply_changes(conn, "checklist_items", changes)
    }
}

#[async_trait]
impl Repository<Checklist> for ChecklistRepository {
    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Checklist>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.query_row(
            "SELECT id, card_id, title, position FROM checklists WHERE id = ?",
            params![id],
            |row| {
                Ok(Checklist::new(
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                ))
            },
        )
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            e => Err(DomainError::Internal(e.to_string())),
        })
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute_batch(&format!(
            "DELETE FROM checklist_items WHERE checklist_id = {id};
            DELETE FROM checklists WHERE id = {id};"
        ))
        .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}
