//! Board Repository

use async_trait::async_trait;
use rusqlite::params;

use super::db::SharedConnection;
use super::traits::Repository;
use crate::domain::{Board, DomainError, DomainResult};

pub struct BoardRepository {
    pub(super) conn: SharedConnection,
}

impl BoardRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, title: &str) -> DomainResult<Board> {
        if title.is_empty() {
            return Err(DomainError::InvalidInput("Board title is empty".to_string()));
        }
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute(
            "INSERT INTO boards (title, created_at) VALUES (?, strftime('%s', 'now'))",
            params![title],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let id = conn.last_insert_rowid() as u32;
        Ok(Board::new(id, title.to_string()))
    }

    pub async fn list(&self) -> DomainResult<Vec<Board>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare("SELECT id, title FROM boards ORDER BY id")
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let boards = stmt
            .query_map([], |row| Ok(Board::new(row.get(0)?, row.get(1)?)))
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(boards)
    }
}

#[async_trait]
impl Repository<Board> for BoardRepository {
    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Board>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let board = conn
            .query_row(
                "SELECT id, title FROM boards WHERE id = ?",
                params![id],
                |row| Ok(Board::new(row.get(0)?, row.get(1)?)),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                e => Err(DomainError::Internal(e.to_string())),
            })?;
        Ok(board)
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
                JOIN lists l ON ca.list_id = l.id
                WHERE l.board_id = {id}
            );
            DELETE FROM checklists WHERE card_id IN (
                SELECT ca.id FROM cards ca
                JOIN lists l ON ca.list_id = l.id
                WHERE l.board_id = {id}
            );
            DELETE FROM cards WHERE list_id IN (SELECT id FROM lists WHERE board_id = {id});
            DELETE FROM lists WHERE board_id = {id};
            DELETE FROM boards WHERE id = {id};"
        ))
        .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}
