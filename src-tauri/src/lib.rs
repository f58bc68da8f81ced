//! Tavla Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: Tauri command handlers

use tauri::{Emitter, Manager};
use tokio::sync::Mutex;

mod commands;
mod domain;
mod repository;

use repository::{
    BoardRepository, CardRepository, ChecklistRepository, DbState, ListRepository,
};

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
    pub board_repo: Mutex<BoardRepository>,
    pub list_repo: Mutex<ListRepository>,
    pub card_repo: Mutex<CardRepository>,
    pub checklist_repo: Mutex<ChecklistRepository>,
}

impl AppState {
    fn new(db_state: DbState) -> Self {
        let conn = db_state.connection();
        Self {
            board_repo: Mutex::new(BoardRepository::new(conn.clone())),
            list_repo: Mutex::new(ListRepository::new(conn.clone())),
            card_repo: Mutex::new(CardRepository::new(conn.clone())),
            checklist_repo: Mutex::new(ChecklistRepository::new(conn)),
            db_state,
        }
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle()
                .plugin(tauri_plugin_single_instance::init(|_app, _args, _cwd| {
                    #[cfg(desktop)]
                    if let Some(window) = _app.get_webview_window("main") {
                        let _ = window.set_focus();
                    }
                }))?;

            let app_handle = app.handle().clone();

            let app_dir = app_handle.path().app_data_dir()?;
            std::fs::create_dir_all(&app_dir)?;
            let db_path = app_dir.join("tavla.db");

            // Manage state immediately; the window opens before the
            // database finishes initializing.
            let db_state = DbState::new();
            app.manage(AppState::new(db_state.clone()));

            tauri::async_runtime::spawn(async move {
                match db_state.init(&db_path).await {
                    Ok(()) => {
                        tracing::info!("database initialized");
                        if let Err(e) = app_handle.emit("db-initialized", ()) {
                            tracing::warn!("failed to emit db-initialized: {}", e);
                        }
                    }
                    Err(e) => {
                        tracing::error!("database init failed: {}", e);
                    }
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Boards
            commands::list_boards,
            commands::create_board,
            // Lists
            commands::list_lists,
            commands::create_list,
            commands::rename_list,
            commands::delete_list,
            commands::reorder_lists,
            // Cards
            commands::list_cards,
            commands::create_card,
            commands::update_card,
            commands::delete_card,
            commands::reorder_cards,
            // Checklists
            commands::list_checklists,
            commands::create_checklist,
            commands::rename_checklist,
            commands::delete_checklist,
            commands::reorder_checklists,
            // Checklist items
            commands::list_checklist_items,
            commands::create_checklist_item,
            commands::update_checklist_item,
            commands::toggle_checklist_item,
            commands::delete_checklist_item,
            commands::reorder_checklist_items,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
