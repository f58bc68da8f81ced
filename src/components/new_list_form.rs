//! New List Form Component
//!
//! Trailing column for adding a list to the board.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands::{self, CreateListArgs};
use crate::context::AppContext;
use crate::store::{store_add_list, use_board_store, BoardStateStoreFields};

#[component]
pub fn NewListForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_board_store();

    let (new_title, set_new_title) = signal(String::new());

    let add_list = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let board_id = store.current_board_id().get_untracked();
        let title = new_title.get();
        // Empty titles are rejected before any network call
        if board_id == 0 || title.is_empty() {
            return;
        }

        spawn_local(async move {
            let args = CreateListArgs {
                board_id,
                title: &title,
            };
            match commands::create_list(&args).await {
                Ok(list) => {
                    set_new_title.set(String::new());
                    store_add_list(&store, list);
                }
                Err(e) => {
                    ctx.notify_error(format!("Could not add the list: {}", e));
                }
            }
        });
    };

    view! {
        <form class="new-list-form" on:submit=add_list>
            <input
                type="text"
                placeholder="Add a list..."
                prop:value=move || new_title.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_new_title.set(input.value());
                }
            />
            <button type="submit">"+ Add list"</button>
        </form>
    }
}
