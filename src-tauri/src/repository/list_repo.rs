//! List Repository

use async_trait::async_trait;
use rusqlite::params;

use super::db::SharedConnection;
use super::positioning::{apply_changes, next_position, PositionUpdate};
use super::traits::Repository;
use crate::domain::{DomainError, DomainResult, List};

pub struct ListRepository {
    pub(super) conn: SharedConnection,
}

impl ListRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, board_id: u32, title: &str) -> DomainResult<List> {
        if title.is_empty() {
            return Err(DomainError::InvalidInput("List title is empty".to_string()));
        }
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let position = next_position(conn, "lists", "board_id", board_id)?;
        conn.execute(
            "INSERT INTO lists (board_id, title, position, created_at)
             VALUES (?, ?, ?, strftime('%s', 'now'))",
            params![board_id, title, position],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let id = conn.last_insert_rowid() as u32;
        Ok(List::new(id, board_id, title.to_string(), position))
    }

    pub async fn list_by_board(&self, board_id: u32) -> DomainResult<Vec<List>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT id, board_id, title, position FROM lists
                 WHERE board_id = ? ORDER BY position, id",
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let lists = stmt
            .query_map(params![board_id], |row| {
                Ok(List::new(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(lists)
    }

    pub async fn rename(&self, id: u32, title: &str) -> DomainResult<()> {
        if title.is_empty() {
            return Err(DomainError::InvalidInput("List title is empty".to_string()));
        }
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let updated = conn
            .execute(
                "UPDATE lists SET title = ?, updated_at = strftime('%s', 'now') WHERE id = ?",
                params![title, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if updated == 0 {
            return Err(DomainError::NotFound(format!("List {} not found", id)));
        }
        Ok(())
    }

    /// Apply the changed subset of a client-side board reorder
    pub async fn reorder(&self, changes: &[PositionUpdate]) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        apply_changes(conn, "lists", changes)
    }
}

#[async_trait]
impl Repository<List> for ListRepository {
    async fn find_by_id(&self, id: u32) -> DomainResult<Option<List>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.query_row(
            "SELECT id, board_id, title, position FROM lists WHERE id = ?",
            params![id],
            |row| Ok(List::new(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
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
            "DELETE FROM checklist_items WHERE checklist_id IN (
                SELECT c.id FROM checklists c
                JOIN cards ca ON c.card_id = ca.id
                WHERE ca.list_id = {id}
            );
            DELETE FROM checklists WHERE card_id IN (SELECT id FROM cards WHERE list_id = {id});
            DELETE FROM cards WHERE list_id = {id};
            DELETE FROM lists WHERE id = {id};"
        ))
        .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}
