//! Checklist View Component
//!
//! One checklist of a card: ordered items with toggle, add, delete and
//! drag reordering. Item drags use the shared scope owned by the board
//! coordinator; this component registers its item store under the
//! checklist id and the coordinator's drop resolution keeps a drop
//! outside the item's own checklist a no-op (cross-checklist moves are
//! unsupported).

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands::{self, CreateChecklistItemArgs, UpdateChecklistItemArgs};
use crate::context::AppContext;
use crate::models::{Checklist, ChecklistItem};
use crate::moves::ItemRegistry;
use crate::progress::{count_items, ChecklistCounts};
use crate::registry::ContainerHandle;

use leptos_sortable::{make_handle_mousedown, ActiveDrag, SlotZone};

use super::board_view::ItemSortScope;

#[component]
pub fn ChecklistView(
    checklist: Checklist,
    /// Reports (checklist_id, done/total) whenever the item set changes
    on_counts: Callback<(u32, ChecklistCounts)>,
    on_deleted: Callback<u32>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let item_registry = expect_context::<ItemRegistry>();
    let item_sort = expect_context::<ItemSortScope>().0;

    let checklist_id = checklist.id;
    let (items, set_items) = signal(Vec::<ChecklistItem>::new());
    let (confirm_delete, set_confirm_delete) = signal(false);

    let (title, set_title) = signal(checklist.title.clone());
    let (editing_title, set_editing_title) = signal(false);
    let (title_draft, set_title_draft) = signal(checklist.title.clone());

    // Which item is being text-edited, if any
    let (editing_item, set_editing_item) = signal::<Option<u32>>(None);
    let (item_draft, set_item_draft) = signal(String::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            if let Ok(loaded) = commands::list_checklist_items(checklist_id).await {
                set_items.set(loaded);
            }
        });
    });

    // Keep the parent's progress reducer fed
    Effect::new(move |_| {
        let current = items.get();
        on_counts.run((checklist_id, count_items(&current)));
    });

    // Item reorder runs through the coordinator's shared engine; this
    // component only publishes its item store under the checklist id
    // and withdraws it on unmount
    let items_handle = ContainerHandle::new(
        move || items.get_untracked(),
        move |f| set_items.update(|v| f(v)),
        move || {
            spawn_local(async move {
                if let Ok(loaded) = commands::list_checklist_items(checklist_id).await {
                    set_items.set(loaded);
                }
            });
        },
    );
    let detach = item_registry.register(checklist_id, items_handle);
    on_cleanup(detach);

    // Toggle applies optimistically; a failed call flips it back
    let toggle_item = move |item_id: u32| {
        let snapshot = items.get_untracked();
        set_items.update(|items| {
            if let Some(item) = items.iter_mut().find(|i| i.id == item_id) {
                item.is_done = !item.is_done;
            }
        });
        spawn_local(async move {
            if let Err(e) = commands::toggle_checklist_item(item_id).await {
                set_items.set(snapshot);
                ctx.notify_error(format!("Could not update the item: {}", e));
            }
        });
    };

    let delete_item = move |item_id: u32| {
        let snapshot = items.get_untracked();
        set_items.update(|items| items.retain(|i| i.id != item_id));
        spawn_local(async move {
            if let Err(e) = commands::delete_checklist_item(item_id).await {
                set_items.set(snapshot);
                ctx.notify_error(format!("Could not delete the item: {}", e));
            }
        });
    };

    // Optimistic rename: apply to the local title, roll back if the
    // gateway rejects it
    let submit_rename = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let new_title = title_draft.get();
        if new_title.is_empty() {
            return;
        }
        set_editing_title.set(false);
        let before = title.get_untracked();
        set_title.set(new_title.clone());
        spawn_local(async move {
            if let Err(e) = commands::rename_checklist(checklist_id, &new_title).await {
                set_title.set(before);
                ctx.notify_error(format!("Could not rename the checklist: {}", e));
            }
        });
    };

    // Optimistic item text edit with the same snapshot discipline
    let submit_item_text = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(item_id) = editing_item.get_untracked() else { return };
        let text = item_draft.get();
        if text.is_empty() {
            return;
        }
        set_editing_item.set(None);
        let snapshot = items.get_untracked();
        let applied = text.clone();
        set_items.update(|items| {
            if let Some(item) = items.iter_mut().find(|i| i.id == item_id) {
                item.text = applied;
            }
        });
        spawn_local(async move {
            let args = UpdateChecklistItemArgs {
                id: item_id,
                text: Some(text),
                ..Default::default()
            };
            if let Err(e) = commands::update_checklist_item(&args).await {
                set_items.set(snapshot);
                ctx.notify_error(format!("Could not update the item: {}", e));
            }
        });
    };

    let delete_checklist = move |_: web_sys::MouseEvent| {
        if !confirm_delete.get() {
            set_confirm_delete.set(true);
            return;
        }
        // Items cascade server-side; parent drops the local node
        spawn_local(async move {
            match commands::delete_checklist(checklist_id).await {
                Ok(()) => on_deleted.run(checklist_id),
                Err(e) => ctx.notify_error(format!("Could not delete the checklist: {}", e)),
            }
        });
    };

    view! {
        <div class="checklist">
            <div class="checklist-header">
                {move || if editing_title.get() {
                    view! {
                        <form class="checklist-rename-form" on:submit=submit_rename>
                            <input
                                type="text"
                                prop:value=move || title_draft.get()
                                on:input=move |ev| {
                                    let target = ev.target().unwrap();
                                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                    set_title_draft.set(input.value());
                                }
                            />
                        </form>
                    }.into_any()
                } else {
                    view! {
                        <span
                            class="checklist-title"
                            on:dblclick=move |_| {
                                set_title_draft.set(title.get_untracked());
                                set_editing_title.set(true);
                            }
                        >
                            {move || title.get()}
                        </span>
                    }.into_any()
                }}
                <span class="checklist-count">
                    {move || {
                        let c = count_items(&items.get());
                        format!("{}/{}", c.done, c.total)
                    }}
                </span>
                <button
                    class=move || if confirm_delete.get() { "checklist-delete confirm" } else { "checklist-delete" }
                    on:click=delete_checklist
                    on:mouseleave=move |_| set_confirm_delete.set(false)
                >
                    {move || if confirm_delete.get() { "sure?" } else { "×" }}
                </button>
            </div>

            <div class="checklist-items">
                <SlotZone sc=item_sort container_id=checklist_id index=0 />

                <For
                    each={move || items.get().into_iter().enumerate().collect::<Vec<_>>()}
                    key=|(index, item)| (item.id, *index, item.text.clone(), item.is_done, item.position)
                    children=move |(index, item)| {
                        let item_id = item.id;
                        let preview = item.text.clone();
                        let on_mousedown = make_handle_mousedown(
                            item_sort,
                            ActiveDrag {
                                item_id,
                                container_id: checklist_id,
                                from_index: index,
                                preview,
                            },
                        );

                        let item_class = move || {
                            let mut c = String::from("checklist-item");
                            if item.is_done { c.push_str(" done"); }
                            if item_sort.is_dragging_item(item_id) { c.push_str(" dragging"); }
                            c
                        };

                        view! {
                            <div class=item_class on:mousedown=on_mousedown>
                                <input
                                    type="checkbox"
                                    prop:checked=item.is_done
                                    on:change=move |_| toggle_item(item_id)
                                />
                                {
                                    let text = item.text.clone();
                                    move || if editing_item.get() == Some(item_id) {
                                        view! {
                                            <form class="item-edit-form" on:submit=submit_item_text>
                                                <input
                                                    type="text"
                                                    prop:value=move || item_draft.get()
                                                    on:input=move |ev| {
                                                        let target = ev.target().unwrap();
                                                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                                        set_item_draft.set(input.value());
                                                    }
                                                />
                                            </form>
                                        }.into_any()
                                    } else {
                                        let shown = text.clone();
                                        let arm = text.clone();
                                        view! {
                                            <span
                                                class="item-text"
                                                on:dblclick=move |_| {
                                                    set_item_draft.set(arm.clone());
                                                    set_editing_item.set(Some(item_id));
                                                }
                                            >
                                                {shown}
                                            </span>
                                        }.into_any()
                                    }
                                }
                                {item.due_at.map(|_| view! { <span class="item-due">"⏰"</span> })}
                                {item.assignee.map(|uid| view! {
                                    <span class="item-assignee">{format!("@{}", uid)}</span>
                                })}
                                <button class="item-delete" on:click=move |_| delete_item(item_id)>"×"</button>
                            </div>

                            <SlotZone sc=item_sort container_id=checklist_id index={index + 1} />
                        }
                    }
                />
            </div>

            <AddItemForm checklist_id=checklist_id set_items=set_items />
        </div>
    }
}

#[component]
fn AddItemForm(checklist_id: u32, set_items: WriteSignal<Vec<ChecklistItem>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (new_text, set_new_text) = signal(String::new());

    let add_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_text.get();
        if text.is_empty() {
            return;
        }
        spawn_local(async move {
            let args = CreateChecklistItemArgs {
                checklist_id,
                text: &text,
            };
            match commands::create_checklist_item(&args).await {
                Ok(item) => {
                    set_new_text.set(String::new());
                    set_items.update(|items| items.push(item));
                }
                Err(e) => {
                    ctx.notify_error(format!("Could not add the item: {}", e));
                }
            }
        });
    };

    view! {
        <form class="add-item-form" on:submit=add_item>
            <input
                type="text"
                placeholder="Add an item..."
                prop:value=move || new_text.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_new_text.set(input.value());
                }
            />
            <button type="submit">"+"</button>
        </form>
    }
}
