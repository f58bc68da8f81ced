//! Positioning Operations
//!
//! Position management shared by every ordered container (lists in a
//! board, cards in a list, checklists in a card, items in a
//! checklist). Positions are `(index + 1) * GAP`, recomputed for the
//! whole container after structural moves, which keeps them strictly
//! increasing and unique without fractional keys.

use rusqlite::{params, Connection};
use serde::Deserialize;

use crate::domain::{DomainError, DomainResult};

/// Spacing between consecutive position keys; matches the frontend
/// allocator
pub const POSITION_GAP: i32 = 1000;

/// One changed entry of a client-computed reorder
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PositionUpdate {
    pub id: u32,
    pub position: i32,
}

/// Next position for an append into `table` under `parent_col = parent_id`
pub fn next_position(
    conn: &Connection,
    table: &str,
    parent_col: &str,
    parent_id: u32,
) -> DomainResult<i32> {
    let query = format!(
        "SELECT COALESCE(MAX(position), 0) + {} FROM {} WHERE {} = ?",
        POSITION_GAP, table, parent_col
    );
    conn.query_row(&query, params![parent_id], |row| row.get(0))
        .map_err(|e| DomainError::Internal(e.to_string()))
}

/// Rewrite the whole container to `(index + 1) * GAP`, ordered by the
/// current positions (ties broken by id)
pub fn reindex(
    conn: &Connection,
    table: &str,
    parent_col: &str,
    parent_id: u32,
) -> DomainResult<()> {
    let query = format!(
        "SELECT id FROM {} WHERE {} = ? ORDER BY position, id",
        table, parent_col
    );
    let mut stmt = conn
        .prepare(&query)
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    let ids: Vec<u32> = stmt
        .query_map(params![parent_id], |row| row.get(0))
        .map_err(|e| DomainError::Internal(e.to_string()))?
        .collect::<Result<_, _>>()
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    let update = format!(
        "UPDATE {} SET position = ?, updated_at = strftime('%s', 'now') WHERE id = ?",
        table
    );
    for (index, id) in ids.iter().enumerate() {
        let position = (index as i32 + 1) * POSITION_GAP;
        conn.execute(&update, params![position, *id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
    }
    Ok(())
}

/// Apply a client-computed diff of changed positions
pub fn apply_changes(
    conn: &Connection,
    table: &str,
    changes: &[PositionUpdate],
) -> DomainResult<()> {
    let update = format!(
        "UPDATE {} SET position = ?, updated_at = strftime('%s', 'now') WHERE id = ?",
        table
    );
    for change in changes {
        conn.execute(&update, params![change.position, change.id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
    }
    Ok(())
}
