//! Card Modal Component
//!
//! Detail view of one card: title/description edits and the ordered
//! checklist collection. Checklist reordering is its own instance of
//! the renumber/diff/rollback engine, scoped to this card. The modal
//! borrows the checklist and item sortable scopes from the board
//! coordinator and registers its checklist store under the card id, so
//! nothing here outlives the modal when it closes.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands::{self, CreateChecklistArgs, UpdateCardArgs};
use crate::context::AppContext;
use crate::models::{Card, Checklist};
use crate::moves::{CardRegistry, ChecklistRegistry};
use crate::progress::{card_progress, ChecklistCounts};
use crate::registry::ContainerHandle;

use leptos_sortable::{make_handle_mousedown, ActiveDrag, DragOverlay, SlotZone};

use super::board_view::{ChecklistSortScope, ItemSortScope};
use super::ChecklistView;

#[component]
pub fn CardModal(card: Card, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let registry = expect_context::<CardRegistry>();
    let checklist_registry = expect_context::<ChecklistRegistry>();
    let checklist_sort = expect_context::<ChecklistSortScope>().0;
    let item_sort = expect_context::<ItemSortScope>().0;

    let card_id = card.id;
    let list_id = card.list_id;

    let (checklists, set_checklists) = signal(Vec::<Checklist>::new());
    let counts = RwSignal::new(HashMap::<u32, ChecklistCounts>::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            if let Ok(loaded) = commands::list_checklists(card_id).await {
                set_checklists.set(loaded);
            }
        });
    });

    // Derived progress; pushed into the card's list store through the
    // registry so the card face updates without a refetch
    let progress = Memo::new(move |_| card_progress(&counts.get()));
    let progress_registry = registry.clone();
    Effect::new(move |_| {
        let value = progress.get();
        if let Some(handle) = progress_registry.get(list_id) {
            handle.mutate(move |cards| {
                if let Some(card) = cards.iter_mut().find(|c| c.id == card_id) {
                    card.progress = value;
                }
            });
        }
    });

    let on_counts = Callback::new(move |(checklist_id, c): (u32, ChecklistCounts)| {
        counts.update(|map| {
            map.insert(checklist_id, c);
        });
    });

    // Checklist reorder: same allocator + snapshot/rollback pattern,
    // independent of the board-level engine. The handle is registered
    // under the card id so the coordinator's drop handler can reach it,
    // and detached when the modal closes.
    let checklists_handle = ContainerHandle::new(
        move || checklists.get_untracked(),
        move |f| set_checklists.update(|v| f(v)),
        move || {
            spawn_local(async move {
                if let Ok(loaded) = commands::list_checklists(card_id).await {
                    set_checklists.set(loaded);
                }
            });
        },
    );
    let detach = checklist_registry.register(card_id, checklists_handle);
    on_cleanup(detach);

    let on_checklist_deleted = Callback::new(move |checklist_id: u32| {
        set_checklists.update(|lists| lists.retain(|c| c.id != checklist_id));
        counts.update(|map| {
            map.remove(&checklist_id);
        });
    });

    // Field edits apply optimistically to the list store and roll back
    // if the gateway rejects them
    let title_registry = registry.clone();
    let save_title = move |new_title: String| {
        if new_title.is_empty() {
            return;
        }
        let Some(handle) = title_registry.get(list_id) else { return };
        let snapshot = handle.snapshot();
        let applied = new_title.clone();
        handle.mutate(move |cards| {
            if let Some(card) = cards.iter_mut().find(|c| c.id == card_id) {
                card.title = applied;
            }
        });
        let handle_err = handle.clone();
        spawn_local(async move {
            let args = UpdateCardArgs {
                id: card_id,
                title: Some(new_title),
                ..Default::default()
            };
            if let Err(e) = commands::update_card(&args).await {
                handle_err.restore(snapshot);
                ctx.notify_error(format!("Could not rename the card: {}", e));
            }
        });
    };

    // Due date edit: optimistic through the registry so the card face
    // updates without a refetch
    let due_registry = registry.clone();
    let save_due_date = move |value: String| {
        let Ok(date) = chrono::NaiveDate::parse_from_str(&value, "%Y-%m-%d") else {
            return;
        };
        let millis = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(0);
        let Some(handle) = due_registry.get(list_id) else { return };
        let snapshot = handle.snapshot();
        handle.mutate(move |cards| {
            if let Some(card) = cards.iter_mut().find(|c| c.id == card_id) {
                card.due_date = Some(millis);
            }
        });
        let handle_err = handle.clone();
        spawn_local(async move {
            let args = UpdateCardArgs {
                id: card_id,
                due_date: Some(millis),
                ..Default::default()
            };
            if let Err(e) = commands::update_card(&args).await {
                handle_err.restore(snapshot);
                ctx.notify_error(format!("Could not set the due date: {}", e));
            }
        });
    };

    let save_description = move |text: String| {
        spawn_local(async move {
            let args = UpdateCardArgs {
                id: card_id,
                description: Some(text),
                ..Default::default()
            };
            if let Err(e) = commands::update_card(&args).await {
                ctx.notify_error(format!("Could not save the description: {}", e));
            }
        });
    };

    // Two-step delete: optimistic removal from the list store, modal
    // closes, entry restored on failure
    let (confirm_delete, set_confirm_delete) = signal(false);
    let delete_registry = registry.clone();
    let on_delete = move |_: web_sys::MouseEvent| {
        if !confirm_delete.get() {
            set_confirm_delete.set(true);
            return;
        }
        let Some(handle) = delete_registry.get(list_id) else { return };
        let snapshot = handle.snapshot();
        handle.mutate(move |cards| cards.retain(|c| c.id != card_id));
        on_close.run(());
        spawn_local(async move {
            if let Err(e) = commands::delete_card(card_id).await {
                handle.restore(snapshot);
                ctx.notify_error(format!("Could not delete the card: {}", e));
            }
        });
    };

    let (title_draft, set_title_draft) = signal(card.title.clone());
    let (description_draft, set_description_draft) =
        signal(card.description.clone().unwrap_or_default());

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="card-modal" on:click=move |ev| ev.stop_propagation()>
                <div class="card-modal-header">
                    <input
                        class="card-modal-title"
                        type="text"
                        prop:value=move || title_draft.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_title_draft.set(input.value());
                        }
                        on:change=move |_| save_title(title_draft.get_untracked())
                    />
                    <button
                        class=move || if confirm_delete.get() { "card-delete confirm" } else { "card-delete" }
                        on:click=on_delete
                        on:mouseleave=move |_| set_confirm_delete.set(false)
                    >
                        {move || if confirm_delete.get() { "sure?" } else { "delete" }}
                    </button>
                    <button class="card-modal-close" on:click=move |_| on_close.run(())>"×"</button>
                </div>

                <div class="card-modal-due">
                    <label>"Due"</label>
                    <input
                        type="date"
                        prop:value=card
                            .due_date
                            .and_then(chrono::DateTime::from_timestamp_millis)
                            .map(|dt| dt.format("%Y-%m-%d").to_string())
                            .unwrap_or_default()
                        on:change=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            save_due_date(input.value());
                        }
                    />
                </div>

                <div class="card-modal-progress">
                    <span class="progress-label">{move || format!("{}%", progress.get())}</span>
                    <span class="progress-track">
                        <span
                            class="progress-fill"
                            style=move || format!("width: {}%;", progress.get())
                        ></span>
                    </span>
                </div>

                <textarea
                    class="card-modal-description"
                    placeholder="Description..."
                    prop:value=move || description_draft.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let area = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                        set_description_draft.set(area.value());
                    }
                    on:change=move |_| save_description(description_draft.get_untracked())
                ></textarea>

                <div class="card-checklists">
                    <SlotZone sc=checklist_sort container_id=card_id index=0 />

                    <For
                        each={move || checklists.get().into_iter().enumerate().collect::<Vec<_>>()}
                        key=|(index, checklist)| (checklist.id, *index, checklist.title.clone(), checklist.position)
                        children=move |(index, checklist)| {
                            let preview = checklist.title.clone();
                            let on_mousedown = make_handle_mousedown(
                                checklist_sort,
                                ActiveDrag {
                                    item_id: checklist.id,
                                    container_id: card_id,
                                    from_index: index,
                                    preview,
                                },
                            );

                            view! {
                                <div class="checklist-wrapper" on:mousedown=on_mousedown>
                                    <ChecklistView
                                        checklist=checklist.clone()
                                        on_counts=on_counts
                                        on_deleted=on_checklist_deleted
                                    />
                                </div>

                                <SlotZone sc=checklist_sort container_id=card_id index={index + 1} />
                            }
                        }
                    />
                </div>

                <AddChecklistForm card_id=card_id set_checklists=set_checklists />

                <DragOverlay sc=checklist_sort />
                <DragOverlay sc=item_sort />
            </div>
        </div>
    }
}

#[component]
fn AddChecklistForm(card_id: u32, set_checklists: WriteSignal<Vec<Checklist>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (new_title, set_new_title) = signal(String::new());

    let add_checklist = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_title.get();
        if title.is_empty() {
            return;
        }
        spawn_local(async move {
            let args = CreateChecklistArgs {
                card_id,
                title: &title,
            };
            match commands::create_checklist(&args).await {
                Ok(checklist) => {
                    set_new_title.set(String::new());
                    set_checklists.update(|lists| lists.push(checklist));
                }
                Err(e) => {
                    ctx.notify_error(format!("Could not add the checklist: {}", e));
                }
            }
        });
    };

    view! {
        <form class="add-checklist-form" on:submit=add_checklist>
            <input
                type="text"
                placeholder="Add checklist..."
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
