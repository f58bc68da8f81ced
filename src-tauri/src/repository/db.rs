//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations. The connection is
//! created empty and initialized in the background during app setup,
//! so the window can open before the database is ready.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Connection shared by all repositories
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    conn: SharedConnection,
}

impl DbState {
    pub fn new() -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
        }
    }

    /// Handle the repositories share
    pub fn connection(&self) -> SharedConnection {
        Arc::clone(&self.conn)
    }

    /// Open the database at `db_path` (`:memory:` for tests), run
    /// migrations and seed the default board.
    pub async fn init(&self, db_path: &Path) -> DomainResult<()> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Internal(format!("Failed to open db: {}", e)))?;

        run_migrations(&conn)?;

        *self.conn.lock().await = Some(conn);
        log::info!("Database ready at {}", db_path.display());
        Ok(())
    }
}

impl Default for DbState {
    fn default() -> Self {
        Self::new()
    }
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS boards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS lists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            board_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            list_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            due_date INTEGER,
            start_date INTEGER,
            members TEXT,
            labels TEXT,
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS checklists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            card_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS checklist_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            checklist_id INTEGER NOT NULL,
            text TEXT NOT NULL,
            is_done INTEGER NOT NULL DEFAULT 0,
            assignee INTEGER,
            due_at INTEGER,
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_lists_board ON lists(board_id);
        CREATE INDEX IF NOT EXISTS idx_cards_list ON cards(list_id);
        CREATE INDEX IF NOT EXISTS idx_checklists_card ON checklists(card_id);
        CREATE INDEX IF NOT EXISTS idx_items_checklist ON checklist_items(checklist_id);
        ",
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    // First run: one empty board so the frontend has something to open
    conn.execute(
        "INSERT INTO boards (title, created_at)
         SELECT 'My board', strftime('%s', 'now')
         WHERE NOT EXISTS (SELECT 1 FROM boards)",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    Ok(())
}
