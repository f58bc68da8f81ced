//! Card Repository
//!
//! Cards are the moved unit of the board. A cross-list move is a
//! single update that re-homes the card and renumbers both lists, so
//! the card is never visible in two lists or in neither.

use async_trait::async_trait;
use rusqlite::{params, Row};

use super::db::SharedConnection;
use super::positioning::{apply_changes, next_position, reindex, PositionUpdate, POSITION_GAP};
use super::traits::Repository;
use crate::domain::{Card, DomainError, DomainResult};

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateCardFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<i64>,
    pub start_date: Option<i64>,
    pub members: Option<Vec<u32>>,
    pub labels: Option<Vec<String>>,
    /// Target list of a cross-list move
    pub list_id: Option<u32>,
    /// Target sort key; lists are renumbered after the move lands
    pub position: Option<i32>,
}

pub struct CardRepository {
    pub(super) conn: SharedConnection,
}

const CARD_COLUMNS: &str = "id, list_id, title, description, due_date, start_date, \
     members, labels, position, \
     (SELECT COUNT(*) FROM checklist_items ci JOIN checklists c ON ci.checklist_id = c.id \
      WHERE c.card_id = cards.id AND ci.is_done = 1), \
     (SELECT COUNT(*) FROM checklist_items ci JOIN checklists c ON ci.checklist_id = c.id \
      WHERE c.card_id = cards.id)";

fn row_to_card(row: &Row<'_>) -> rusqlite::Result<Card> {
    let members: Option<String> = row.get(6)?;
    let labels: Option<String> = row.get(7)?;
    let done: i64 = row.get(9)?;
    let total: i64 = row.get(10)?;
    let progress = if total == 0 {
        0
    } else {
        ((done * 100) / total) as u8
    };
    Ok(Card {
        id: row.get(0)?,
        list_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        progress,
        due_date: row.get(4)?,
        start_date: row.get(5)?,
        members: members
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default(),
        labels: labels
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default(),
        position: row.get(8)?,
    })
}

impl CardRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, list_id: u32, title: &str) -> DomainResult<Card> {
        if title.is_empty() {
            return Err(DomainError::InvalidInput("Card title is empty".to_string()));
        }
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let position = next_position(conn, "cards", "list_id", list_id)?;
        conn.execute(
            "INSERT INTO cards (list_id, title, position, created_at)
             VALUES (?, ?, ?, strftime('%s', 'now'))",
            params![list_id, title, position],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let id = conn.last_insert_rowid() as u32;
        Ok(Card::new(id, list_id, title.to_string(), position))
    }

    pub async fn list_by_list(&self, list_id: u32) -> DomainResult<Vec<Card>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let query = format!(
            "SELECT {} FROM cards WHERE list_id = ? ORDER BY position, id",
            CARD_COLUMNS
        );
        let mut stmt = conn
            .prepare(&query)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let cards = stmt
            .query_map(params![list_id], row_to_card)
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(cards)
    }

    /// Apply a partial update. When `list_id` or `position` is set the
    /// card is staged just below its target slot and both the source
    /// and the target list are renumbered, so an occupied position
    /// never pushes the card past the intended neighbor.
    pub async fn update(&self, id: u32, fields: UpdateCardFields) -> DomainResult<Card> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let old_list_id: u32 = conn
            .query_row("SELECT list_id FROM cards WHERE id = ?", params![id], |row| {
                row.get(0)
            })
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    Err(DomainError::NotFound(format!("Card {} not found", id)))
                }
                e => Err(DomainError::Internal(e.to_string())),
            })?;

        if let Some(title) = &fields.title {
            if title.is_empty() {
                return Err(DomainError::InvalidInput("Card title is empty".to_string()));
            }
            conn.execute("UPDATE cards SET title = ? WHERE id = ?", params![title, id])
                .map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        if let Some(description) = &fields.description {
            conn.execute(
                "UPDATE cards SET description = ? WHERE id = ?",
                params![description, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        if let Some(due_date) = fields.due_date {
            conn.execute(
                "UPDATE cards SET due_date = ? WHERE id = ?",
                params![due_date, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        if let Some(start_date) = fields.start_date {
            conn.execute(
                "UPDATE cards SET start_date = ? WHERE id = ?",
                params![start_date, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        if let Some(members) = &fields.members {
            let json = serde_json::to_string(members)
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            conn.execute("UPDATE cards SET members = ? WHERE id = ?", params![json, id])
                .map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        if let Some(labels) = &fields.labels {
            let json = serde_json::to_string(labels)
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            conn.execute("UPDATE cards SET labels = ? WHERE id = ?", params![json, id])
                .map_err(|e| DomainError::Internal(e.to_string()))?;
        }

        if fields.list_id.is_some() || fields.position.is_some() {
            let new_list_id = fields.list_id.unwrap_or(old_list_id);
            let target = match fields.position {
                Some(position) => position,
                None => next_position(conn, "cards", "list_id", new_list_id)?,
            };
            // Stage half a gap below the target slot so the renumber
            // lands the card ahead of the slot's current occupant.
            conn.execute(
                "UPDATE cards SET list_id = ?, position = ?,
                        updated_at = strftime('%s', 'now')
                 WHERE id = ?",
                params![new_list_id, target - POSITION_GAP / 2, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

            reindex(conn, "cards", "list_id", new_list_id)?;
            if new_list_id != old_list_id {
                reindex(conn, "cards", "list_id", old_list_id)?;
            }
        } else {
            conn.execute(
                "UPDATE cards SET updated_at = strftime('%s', 'now') WHERE id = ?",
                params![id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }

        let query = format!("SELECT {} FROM cards WHERE id = ?", CARD_COLUMNS);
        conn.query_row(&query, params![id], row_to_card)
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    /// Apply the changed subset of a client-side in-list reorder
    pub async fn reorder(&self, changes: &[PositionUpdate]) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        apply_changes(conn, "cards", changes)
    }
}

#[async_trait]
impl Repository<Card> for CardRepository {
    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Card>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let query = format!("SELECT {} FROM cards WHERE id = ?", CARD_COLUMNS);
        conn.query_row(&query, params![id], row_to_card)
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
                SELECT id FROM checklists WHERE card_id = {id}
            );
            DELETE FROM checklists WHERE card_id = {id};
            DELETE FROM cards WHERE id = {id};"
        ))
        .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}
