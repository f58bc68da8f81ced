//! Tavla Frontend App
//!
//! Main application component: loads boards, provides shared context
//! and the board store, renders the active board.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{BoardView, Notifications};
use crate::context::{AppContext, Notice};
use crate::store::{BoardState, BoardStateStoreFields, BoardStore};

#[component]
pub fn App() -> impl IntoView {
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (notices, set_notices) = signal(Vec::<Notice>::new());

    let store: BoardStore = Store::new(BoardState::new());
    provide_context(store);
    provide_context(AppContext::new(
        (reload_trigger, set_reload_trigger),
        (notices, set_notices),
    ));

    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    // Resolve the boards on startup; seed one if the store is empty
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        spawn_local(async move {
            match commands::list_boards().await {
                Ok(boards) if !boards.is_empty() => {
                    store.current_board_id().set(boards[0].id);
                    *store.boards().write() = boards;
                }
                Ok(_) => match commands::create_board("My board").await {
                    Ok(board) => {
                        store.current_board_id().set(board.id);
                        *store.boards().write() = vec![board];
                    }
                    Err(e) => ctx.notify_error(format!("Could not create a board: {}", e)),
                },
                Err(e) => ctx.notify_error(format!("Could not load boards: {}", e)),
            }
        });
    });

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>
                    {move || {
                        let id = store.current_board_id().get();
                        store
                            .boards()
                            .get()
                            .iter()
                            .find(|b| b.id == id)
                            .map(|b| b.title.clone())
                            .unwrap_or_else(|| "Tavla".to_string())
                    }}
                </h1>
            </header>

            <BoardView />

            <Notifications />
        </div>
    }
}
