//! List Column Component
//!
//! One list of the board: owns the ordered card collection, registers
//! its mutate/refetch capability with the board registry on mount, and
//! exposes both drag transports: pointer drop slots between cards for
//! sortable moves, and a native drag drop zone covering the column for
//! cross-list card transfers.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands::{self, CreateCardArgs};
use crate::context::AppContext;
use crate::models::{Card, List};
use crate::moves::CardRegistry;
use crate::store::{store_remove_list, store_update_list, use_board_store};

use leptos_sortable::{make_handle_mousedown, ActiveDrag, SlotZone, SortableContext};

use super::CardItem;

/// MIME type of the native-drag card payload
pub const CARD_DRAG_MIME: &str = "application/x-tavla-card";

/// Payload carried by the native drag fallback channel
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CardDragPayload {
    #[serde(rename = "cardId")]
    pub card_id: u32,
    #[serde(rename = "fromListId")]
    pub from_list_id: u32,
}

#[component]
pub fn ListColumn(
    list: List,
    /// Sortable scope shared by every list's cards
    card_sort: SortableContext,
    /// Native-drag drops: (card_id, from_list_id, to_list_id)
    on_native_drop: Callback<(u32, u32, u32)>,
    on_open_card: Callback<Card>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let registry = expect_context::<CardRegistry>();

    let list_id = list.id;
    let (cards, set_cards) = signal(Vec::<Card>::new());

    // Load cards on mount and whenever a reload is requested
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            if let Ok(loaded) = commands::list_cards(list_id).await {
                set_cards.set(loaded);
            }
        });
    });

    // Register this column's capability so the drag coordinator can
    // mutate it without a direct reference; detach on unmount.
    let handle = crate::registry::ContainerHandle::new(
        move || cards.get_untracked(),
        move |f| set_cards.update(|v| f(v)),
        move || {
            spawn_local(async move {
                if let Ok(loaded) = commands::list_cards(list_id).await {
                    set_cards.set(loaded);
                }
            });
        },
    );
    let detach = registry.register(list_id, handle);
    on_cleanup(detach);

    // Native drag fallback: the whole column accepts card payloads
    let (drag_over, set_drag_over) = signal(false);

    let on_dragover = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_drag_over.set(true);
    };
    let on_dragleave = move |_: web_sys::DragEvent| {
        set_drag_over.set(false);
    };
    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_drag_over.set(false);
        let Some(dt) = ev.data_transfer() else { return };
        let Ok(raw) = dt.get_data(CARD_DRAG_MIME) else { return };
        if raw.is_empty() {
            return;
        }
        match serde_json::from_str::<CardDragPayload>(&raw) {
            Ok(payload) => {
                on_native_drop.run((payload.card_id, payload.from_list_id, list_id));
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("[DND] Bad drag payload: {}", e).into());
            }
        }
    };

    let column_class = move || {
        let mut c = String::from("list-column");
        if drag_over.get() { c.push_str(" drag-over"); }
        c
    };

    view! {
        <div
            class=column_class
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <ListHeader list=list.clone() />

            <div class="list-cards">
                // Leading slot so an empty list is still a drop target
                <SlotZone sc=card_sort container_id=list_id index=0 />

                <For
                    each={move || cards.get().into_iter().enumerate().collect::<Vec<_>>()}
                    key=|(index, card)| (card.id, *index, card.title.clone(), card.position, card.progress)
                    children=move |(index, card)| {
                        let card_id = card.id;
                        let preview = card.title.clone();
                        let on_mousedown = make_handle_mousedown(
                            card_sort,
                            ActiveDrag {
                                item_id: card_id,
                                container_id: list_id,
                                from_index: index,
                                preview,
                            },
                        );

                        // Native transport: payload set at dragstart;
                        // an armed pointer drag is dropped so the two
                        // channels never fight over one gesture.
                        let on_dragstart = move |ev: web_sys::DragEvent| {
                            card_sort.cancel();
                            if let Some(dt) = ev.data_transfer() {
                                let payload = CardDragPayload {
                                    card_id,
                                    from_list_id: list_id,
                                };
                                if let Ok(raw) = serde_json::to_string(&payload) {
                                    let _ = dt.set_data(CARD_DRAG_MIME, &raw);
                                }
                            }
                        };

                        let open = card.clone();
                        let on_click = move |_: web_sys::MouseEvent| {
                            // Ignore the click synthesized by a drop
                            if !card_sort.drag_just_ended() {
                                on_open_card.run(open.clone());
                            }
                        };

                        let card_class = move || {
                            let mut c = String::from("card-item");
                            if card_sort.is_dragging_item(card_id) { c.push_str(" dragging"); }
                            c
                        };

                        view! {
                            <div
                                class=card_class
                                draggable="true"
                                on:mousedown=on_mousedown
                                on:dragstart=on_dragstart
                                on:click=on_click
                            >
                                <CardItem card=card.clone() />
                            </div>

                            <SlotZone sc=card_sort container_id=list_id index={index + 1} />
                        }
                    }
                />
            </div>

            <AddCardForm list_id=list_id set_cards=set_cards />
        </div>
    }
}

/// List title with inline rename and two-step delete
#[component]
fn ListHeader(list: List) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_board_store();

    let list_id = list.id;
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(list.title.clone());
    let (confirm_delete, set_confirm_delete) = signal(false);

    let title = list.title.clone();
    let rename_from = list.clone();

    let submit_rename = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let new_title = draft.get();
        if new_title.is_empty() {
            return;
        }
        set_editing.set(false);

        // Optimistic rename: apply, then roll back the store entry if
        // the gateway rejects it
        let before = rename_from.clone();
        let mut renamed = before.clone();
        renamed.title = new_title.clone();
        store_update_list(&store, renamed);

        spawn_local(async move {
            if let Err(e) = commands::rename_list(list_id, &new_title).await {
                store_update_list(&store, before);
                ctx.notify_error(format!("Could not rename the list: {}", e));
            }
        });
    };

    let delete_from = list.clone();
    let on_delete = move |_: web_sys::MouseEvent| {
        if !confirm_delete.get() {
            set_confirm_delete.set(true);
            return;
        }
        // Optimistic delete; cards cascade server-side
        let before = delete_from.clone();
        store_remove_list(&store, list_id);
        spawn_local(async move {
            if let Err(e) = commands::delete_list(list_id).await {
                crate::store::store_add_list(&store, before);
                ctx.notify_error(format!("Could not delete the list: {}", e));
            }
        });
    };

    view! {
        <div class="list-header">
            {move || if editing.get() {
                let submit = submit_rename.clone();
                view! {
                    <form class="list-rename-form" on:submit=submit>
                        <input
                            type="text"
                            prop:value=move || draft.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_draft.set(input.value());
                            }
                        />
                    </form>
                }.into_any()
            } else {
                let shown = title.clone();
                view! {
                    <span
                        class="list-title"
                        on:dblclick=move |_| set_editing.set(true)
                    >
                        {shown}
                    </span>
                }.into_any()
            }}

            <button
                class=move || if confirm_delete.get() { "list-delete confirm" } else { "list-delete" }
                on:click=on_delete
                on:mouseleave=move |_| set_confirm_delete.set(false)
            >
                {move || if confirm_delete.get() { "sure?" } else { "×" }}
            </button>
        </div>
    }
}

/// Inline add-card form at the bottom of a column
#[component]
fn AddCardForm(list_id: u32, set_cards: WriteSignal<Vec<Card>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (new_title, set_new_title) = signal(String::new());

    let add_card = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_title.get();
        // Empty titles are rejected before any network call
        if title.is_empty() {
            return;
        }

        spawn_local(async move {
            let args = CreateCardArgs {
                list_id,
                title: &title,
            };
            match commands::create_card(&args).await {
                Ok(card) => {
                    set_new_title.set(String::new());
                    set_cards.update(|cards| cards.push(card));
                }
                Err(e) => {
                    ctx.notify_error(format!("Could not add the card: {}", e));
                }
            }
        });
    };

    view! {
        <form class="add-card-form" on:submit=add_card>
            <input
                type="text"
                placeholder="Add a card..."
                prop:value=move || new_title.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_new_title.set(input.value());
                }
            />
            <button type="submit">"+"</button>
        </form>
    }
}
