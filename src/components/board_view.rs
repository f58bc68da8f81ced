//! Board View Component
//!
//! Top-level drag coordinator. Owns every sortable scope (lists across
//! the board, cards across list columns, checklists within the open
//! card, items within their checklist) and binds all of their global
//! drop handling here. The component mounts once for the life of the
//! app and never unmounts, so the document-level listeners the scopes
//! install stay valid; the containers that come and go (list columns,
//! the modal's checklists) only register capability handles and detach
//! them on cleanup.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::AppContext;
use crate::models::Card;
use crate::moves::{self, CardRegistry, ChecklistRegistry, ItemRegistry, MoveCommand};
use crate::registry::ContainerHandle;
use crate::store::{store_set_lists, use_board_store, BoardStateStoreFields};

use leptos_sortable::{
    bind_global, create_sortable, make_handle_mousedown, ActiveDrag, DragOverlay, SlotZone,
    SortableContext,
};

use super::{CardModal, ListColumn, NewListForm};

/// Container id of the board's own list sequence in the list scope
pub const BOARD_LISTS_CONTAINER: u32 = 0;

/// Checklist scope of the open card modal, provided via context
#[derive(Clone, Copy)]
pub struct ChecklistSortScope(pub SortableContext);

/// Item scope shared by every checklist in the open card modal
#[derive(Clone, Copy)]
pub struct ItemSortScope(pub SortableContext);

#[component]
pub fn BoardView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_board_store();

    // Registries of mounted containers: card stores per list column,
    // checklist store per open card, item stores per checklist
    let registry = CardRegistry::new();
    provide_context(registry.clone());
    let checklist_registry = ChecklistRegistry::new();
    provide_context(checklist_registry.clone());
    let item_registry = ItemRegistry::new();
    provide_context(item_registry.clone());

    let (selected_card, set_selected_card) = signal::<Option<Card>>(None);

    // Load lists when the board or the reload trigger changes
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let board_id = store.current_board_id().get();
        if board_id == 0 {
            return;
        }
        spawn_local(async move {
            match commands::list_lists(board_id).await {
                Ok(lists) => store_set_lists(&store, lists),
                Err(e) => ctx.notify_error(format!("Could not load the board: {}", e)),
            }
        });
    });

    // Capability over the board's own list container, so list reorder
    // runs through the same commit path as everything else
    let lists_handle = ContainerHandle::new(
        move || store.lists().get_untracked(),
        move |f| f(&mut *store.lists().write()),
        move || ctx.reload(),
    );

    // Sortable scope for list columns; the board is the one container
    let list_sort = create_sortable();
    let reorder_handle = lists_handle;
    bind_global(list_sort, move |drag: ActiveDrag, slot| {
        let Some((from, to)) = moves::resolve_scoped_drop(
            drag.container_id,
            drag.from_index,
            slot.container_id,
            slot.index,
        ) else {
            return;
        };
        let handle = reorder_handle.clone();
        spawn_local(async move {
            moves::commit_reorder(&handle, from, to, commands::reorder_lists, move |msg| {
                ctx.notify_error(msg)
            })
            .await;
        });
    });

    // Sortable scope for cards; container ids are list ids
    let card_sort = create_sortable();
    let card_registry = registry.clone();
    bind_global(card_sort, move |drag: ActiveDrag, slot| {
        let command = if slot.container_id == drag.container_id {
            MoveCommand::Reorder {
                container_id: drag.container_id,
                from: drag.from_index,
                to: moves::slot_to_index(drag.from_index, slot.index),
            }
        } else {
            MoveCommand::Transfer {
                card_id: drag.item_id,
                from_list: drag.container_id,
                to_list: slot.container_id,
                to_index: slot.index,
            }
        };
        commit_card_move(command, card_registry.clone(), ctx);
    });

    // Modal scopes live here as well: the modal and its checklists
    // unmount, the coordinator does not. Their drops resolve through
    // the registries, and a drop on another container is a no-op
    // (cross-checklist moves are unsupported).
    let checklist_sort = create_sortable();
    provide_context(ChecklistSortScope(checklist_sort));
    let cl_registry = checklist_registry.clone();
    bind_global(checklist_sort, move |drag: ActiveDrag, slot| {
        let Some((from, to)) = moves::resolve_scoped_drop(
            drag.container_id,
            drag.from_index,
            slot.container_id,
            slot.index,
        ) else {
            return;
        };
        let Some(handle) = cl_registry.get(slot.container_id) else { return };
        spawn_local(async move {
            moves::commit_reorder(&handle, from, to, commands::reorder_checklists, move |msg| {
                ctx.notify_error(msg)
            })
            .await;
        });
    });

    let item_sort = create_sortable();
    provide_context(ItemSortScope(item_sort));
    let it_registry = item_registry.clone();
    bind_global(item_sort, move |drag: ActiveDrag, slot| {
        let Some((from, to)) = moves::resolve_scoped_drop(
            drag.container_id,
            drag.from_index,
            slot.container_id,
            slot.index,
        ) else {
            return;
        };
        let Some(handle) = it_registry.get(slot.container_id) else { return };
        spawn_local(async move {
            moves::commit_reorder(
                &handle,
                from,
                to,
                commands::reorder_checklist_items,
                move |msg| ctx.notify_error(msg),
            )
            .await;
        });
    });

    // Native drag fallback channel: a list column reports
    // (card_id, from_list, to_list); the card lands at the end of the
    // target list
    let native_registry = registry.clone();
    let on_native_drop = Callback::new(move |(card_id, from_list, to_list): (u32, u32, u32)| {
        let target_len = native_registry
            .get(to_list)
            .map(|handle| handle.snapshot().len())
            .unwrap_or(0);
        if let Some(command) = moves::resolve_native_drop(card_id, from_list, to_list, target_len) {
            commit_card_move(command, native_registry.clone(), ctx);
        }
    });

    let on_open_card = Callback::new(move |card: Card| set_selected_card.set(Some(card)));
    let on_close_card = Callback::new(move |_: ()| set_selected_card.set(None));

    view! {
        <div class="board-view">
            <div class="board-lists">
                <SlotZone sc=list_sort container_id=BOARD_LISTS_CONTAINER index=0 />

                <For
                    each={move || store.lists().get().into_iter().enumerate().collect::<Vec<_>>()}
                    key=|(index, list)| (list.id, *index, list.title.clone(), list.position)
                    children=move |(index, list)| {
                        let preview = list.title.clone();
                        let on_mousedown = make_handle_mousedown(
                            list_sort,
                            ActiveDrag {
                                item_id: list.id,
                                container_id: BOARD_LISTS_CONTAINER,
                                from_index: index,
                                preview,
                            },
                        );

                        let column_class = move || {
                            let mut c = String::from("list-wrapper");
                            if list_sort.is_dragging_item(list.id) { c.push_str(" dragging"); }
                            c
                        };

                        view! {
                            <div class=column_class on:mousedown=on_mousedown>
                                <ListColumn
                                    list=list.clone()
                                    card_sort=card_sort
                                    on_native_drop=on_native_drop
                                    on_open_card=on_open_card
                                />
                            </div>

                            <SlotZone sc=list_sort container_id=BOARD_LISTS_CONTAINER index={index + 1} />
                        }
                    }
                />

                <NewListForm />
            </div>

            <DragOverlay sc=list_sort />
            <DragOverlay sc=card_sort />

            {move || selected_card.get().map(|card| view! {
                <CardModal card=card on_close=on_close_card />
            })}
        </div>
    }
}

/// One commit path for both transports
fn commit_card_move(command: MoveCommand, registry: CardRegistry, ctx: AppContext) {
    web_sys::console::log_1(&format!("[DND] Commit: {:?}", command).into());
    spawn_local(async move {
        match command {
            MoveCommand::Reorder { container_id, from, to } => {
                let Some(handle) = registry.get(container_id) else { return };
                moves::commit_reorder(&handle, from, to, commands::reorder_cards, move |msg| {
                    ctx.notify_error(msg)
                })
                .await;
            }
            MoveCommand::Transfer { card_id, from_list, to_list, to_index } => {
                moves::commit_transfer(
                    &registry,
                    card_id,
                    from_list,
                    to_list,
                    to_index,
                    |card_id, to_list, position| async move {
                        commands::update_card(&commands::UpdateCardArgs {
                            id: card_id,
                            list_id: Some(to_list),
                            position: Some(position),
                            ..Default::default()
                        })
                        .await
                        .map(|_| ())
                    },
                    move |msg| ctx.notify_error(msg),
                )
                .await;
            }
        }
    });
}
