//! Cross-Container Move Protocol
//!
//! Both drag transports (the pointer-sortable engine and the native
//! drag fallback for cross-list card drops) funnel into one
//! `MoveCommand`, consumed by one commit path: snapshot the stores
//! about to change, mutate them optimistically, renumber positions,
//! persist only the changed entries, and restore every snapshot
//! verbatim if the persistence call fails. A cross-list move touches
//! two containers and is rolled back as a whole.

use crate::models::{Card, Checklist, ChecklistItem};
use crate::positions::{self, PositionChange, Positioned};
use crate::registry::{ContainerHandle, ContainerRegistry};
use std::future::Future;

pub type CardRegistry = ContainerRegistry<Card>;
/// Checklist containers, keyed by card id
pub type ChecklistRegistry = ContainerRegistry<Checklist>;
/// Item containers, keyed by checklist id
pub type ItemRegistry = ContainerRegistry<ChecklistItem>;

/// The single internal move abstraction both transports produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCommand {
    /// Reorder within one container
    Reorder {
        container_id: u32,
        from: usize,
        to: usize,
    },
    /// Move a card between two lists
    Transfer {
        card_id: u32,
        from_list: u32,
        to_list: u32,
        to_index: usize,
    },
}

/// Convert a slot index (insertion point with the dragged entry still
/// in place) to the target index after removal
pub fn slot_to_index(from: usize, slot: usize) -> usize {
    if slot > from { slot - 1 } else { slot }
}

/// Resolve a drop inside a reorder-only scope (checklists within one
/// card, items within one checklist). Releasing over another
/// container's slot is a no-op: these scopes do not transfer.
pub fn resolve_scoped_drop(
    drag_container: u32,
    from: usize,
    slot_container: u32,
    slot_index: usize,
) -> Option<(usize, usize)> {
    if drag_container != slot_container {
        return None;
    }
    Some((from, slot_to_index(from, slot_index)))
}

/// Build the command for a native-drag card drop onto a list.
/// Dropping back onto the source list through this channel is a no-op;
/// the pointer transport owns same-list reordering.
pub fn resolve_native_drop(
    card_id: u32,
    from_list: u32,
    to_list: u32,
    target_len: usize,
) -> Option<MoveCommand> {
    if from_list == to_list {
        return None;
    }
    Some(MoveCommand::Transfer {
        card_id,
        from_list,
        to_list,
        to_index: target_len,
    })
}

/// Outcome of planning a transfer before persistence
#[derive(Debug, Clone, PartialEq)]
struct TransferPlan {
    /// Position of the moved card in its new list
    position: i32,
    source_changes: Vec<PositionChange>,
    target_changes: Vec<PositionChange>,
}

/// Remove the card from `source`, re-home it into `target` at
/// `to_index`, renumber both containers. Returns `None` if the card is
/// not in `source` (e.g. deleted while the drag was in flight).
fn plan_transfer(
    source: &mut Vec<Card>,
    target: &mut Vec<Card>,
    card_id: u32,
    to_list: u32,
    to_index: usize,
) -> Option<TransferPlan> {
    let from_index = source.iter().position(|c| c.id == card_id)?;
    let mut card = source.remove(from_index);
    card.list_id = to_list;

    let to_index = to_index.min(target.len());
    target.insert(to_index, card);

    let source_changes = positions::renumber(source);
    let target_changes = positions::renumber(target);
    Some(TransferPlan {
        position: target[to_index].position,
        source_changes,
        target_changes,
    })
}

/// Reorder one container through its capability handle, persist the
/// diff, roll back on failure. A same-index drop produces an empty
/// diff and triggers no persistence call.
pub async fn commit_reorder<T, Fut>(
    handle: &ContainerHandle<T>,
    from: usize,
    to: usize,
    persist: impl FnOnce(Vec<PositionChange>) -> Fut,
    notify: impl Fn(String),
) where
    T: Positioned + Clone + Send + 'static,
    Fut: Future<Output = Result<(), String>>,
{
    let snapshot = handle.snapshot();
    let mut reordered = snapshot.clone();
    let changes = positions::reorder(&mut reordered, from, to);
    if changes.is_empty() {
        return;
    }

    handle.restore(reordered);

    if let Err(e) = persist(changes).await {
        handle.restore(snapshot);
        notify(format!("Could not save the new order: {}", e));
    }
}

/// Move a card across lists through the registry, persist via one
/// gateway call carrying the new list id and position, roll both
/// containers back on failure.
pub async fn commit_transfer<Fut>(
    registry: &CardRegistry,
    card_id: u32,
    from_list: u32,
    to_list: u32,
    to_index: usize,
    persist: impl FnOnce(u32, u32, i32) -> Fut,
    notify: impl Fn(String),
) where
    Fut: Future<Output = Result<(), String>>,
{
    let (source, target) = match (registry.get(from_list), registry.get(to_list)) {
        (Some(s), Some(t)) => (s, t),
        _ => return,
    };

    let source_snapshot = source.snapshot();
    let target_snapshot = target.snapshot();

    let mut new_source = source_snapshot.clone();
    let mut new_target = target_snapshot.clone();
    let plan = match plan_transfer(&mut new_source, &mut new_target, card_id, to_list, to_index) {
        Some(plan) => plan,
        None => return,
    };

    source.restore(new_source);
    target.restore(new_target);

    if let Err(e) = persist(card_id, to_list, plan.position).await {
        source.restore(source_snapshot);
        target.restore(target_snapshot);
        notify(format!("Could not move the card: {}", e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positions::POSITION_GAP;
    use std::sync::{Arc, Mutex};

    fn make_card(id: u32, list_id: u32, position: i32) -> Card {
        Card {
            id,
            list_id,
            title: format!("Card {}", id),
            description: None,
            progress: 0,
            due_date: None,
            start_date: None,
            members: Vec::new(),
            labels: Vec::new(),
            position,
        }
    }

    fn backed_handle(cards: Vec<Card>) -> (ContainerHandle<Card>, Arc<Mutex<Vec<Card>>>) {
        let backing = Arc::new(Mutex::new(cards));
        let read_store = Arc::clone(&backing);
        let mutate_store = Arc::clone(&backing);
        let handle = ContainerHandle::new(
            move || read_store.lock().unwrap().clone(),
            move |f| f(&mut mutate_store.lock().unwrap()),
            || {},
        );
        (handle, backing)
    }

    #[test]
    fn test_slot_to_index_accounts_for_removal() {
        // Slots bracket the dragged entry: dropping on either side of
        // it resolves to the entry's own index
        assert_eq!(slot_to_index(2, 2), 2);
        assert_eq!(slot_to_index(2, 3), 2);
        assert_eq!(slot_to_index(2, 0), 0);
        assert_eq!(slot_to_index(0, 4), 3);
    }

    #[test]
    fn test_scoped_drop_outside_own_container_is_noop() {
        // An item dragged from checklist 7 released over checklist 8
        assert_eq!(resolve_scoped_drop(7, 1, 8, 0), None);
    }

    #[test]
    fn test_scoped_drop_within_container_resolves_index() {
        assert_eq!(resolve_scoped_drop(7, 1, 7, 3), Some((1, 2)));
        assert_eq!(resolve_scoped_drop(7, 1, 7, 0), Some((1, 0)));
    }

    #[test]
    fn test_drop_on_detached_container_finds_no_handle() {
        // A modal or column can unmount while a drag is in flight; its
        // store detaches and the coordinator's drop lookup comes back
        // empty instead of touching freed state
        let registry = CardRegistry::new();
        let (handle, backing) = backed_handle(vec![make_card(1, 10, 1000), make_card(2, 10, 2000)]);
        let detach = registry.register(10, handle);
        detach();

        assert!(registry.get(10).is_none());
        assert_eq!(backing.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_native_drop_same_list_is_noop() {
        assert_eq!(resolve_native_drop(1, 5, 5, 3), None);
    }

    #[test]
    fn test_native_drop_appends_to_target() {
        assert_eq!(
            resolve_native_drop(1, 5, 6, 3),
            Some(MoveCommand::Transfer {
                card_id: 1,
                from_list: 5,
                to_list: 6,
                to_index: 3,
            })
        );
    }

    #[test]
    fn test_plan_transfer_conserves_cards() {
        let mut source = vec![
            make_card(1, 10, 1000),
            make_card(2, 10, 2000),
            make_card(3, 10, 3000),
        ];
        let mut target = vec![make_card(4, 20, 1000)];

        let plan = plan_transfer(&mut source, &mut target, 2, 20, 0).unwrap();

        assert_eq!(source.len(), 2);
        assert_eq!(target.len(), 2);
        let moved = &target[0];
        assert_eq!(moved.id, 2);
        assert_eq!(moved.list_id, 20);
        assert_eq!(plan.position, POSITION_GAP);
        // Source closed its gap, target shifted its old head
        assert_eq!(plan.source_changes, vec![PositionChange { id: 3, position: 2000 }]);
        assert_eq!(plan.target_changes, vec![PositionChange { id: 4, position: 2000 }]);
    }

    #[test]
    fn test_plan_transfer_onto_empty_list() {
        // Card X alone in "Doing" dragged onto empty "Done"
        let mut source = vec![make_card(9, 10, 1000)];
        let mut target: Vec<Card> = Vec::new();

        let plan = plan_transfer(&mut source, &mut target, 9, 20, 0).unwrap();

        assert!(source.is_empty());
        assert_eq!(target.len(), 1);
        assert_eq!(target[0].list_id, 20);
        assert_eq!(plan.position, 1000);
        assert!(plan.source_changes.is_empty());
    }

    #[test]
    fn test_plan_transfer_missing_card() {
        let mut source = vec![make_card(1, 10, 1000)];
        let mut target: Vec<Card> = Vec::new();
        assert!(plan_transfer(&mut source, &mut target, 99, 20, 0).is_none());
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_plan_transfer_clamps_index() {
        let mut source = vec![make_card(1, 10, 1000)];
        let mut target = vec![make_card(2, 20, 1000)];
        let plan = plan_transfer(&mut source, &mut target, 1, 20, 50).unwrap();
        assert_eq!(target[1].id, 1);
        assert_eq!(plan.position, 2000);
    }

    #[tokio::test]
    async fn test_commit_reorder_noop_skips_persistence() {
        let (handle, _) = backed_handle(vec![make_card(1, 10, 1000), make_card(2, 10, 2000)]);
        let called = Arc::new(Mutex::new(false));
        let called_in = Arc::clone(&called);

        commit_reorder(
            &handle,
            1,
            1,
            move |_changes| {
                *called_in.lock().unwrap() = true;
                async { Ok::<(), String>(()) }
            },
            |_| panic!("no-op must not notify"),
        )
        .await;

        assert!(!*called.lock().unwrap());
    }

    #[tokio::test]
    async fn test_commit_reorder_applies_optimistically() {
        let (handle, backing) = backed_handle(vec![
            make_card(1, 10, 1000),
            make_card(2, 10, 2000),
            make_card(3, 10, 3000),
        ]);
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sent_in = Arc::clone(&sent);

        commit_reorder(
            &handle,
            1,
            0,
            move |changes| {
                *sent_in.lock().unwrap() = changes;
                async { Ok::<(), String>(()) }
            },
            |_| panic!("success must not notify"),
        )
        .await;

        let cards = backing.lock().unwrap();
        let ids: Vec<u32> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        // C untouched: minimal diff
        assert_eq!(
            *sent.lock().unwrap(),
            vec![
                PositionChange { id: 2, position: 1000 },
                PositionChange { id: 1, position: 2000 },
            ]
        );
    }

    #[tokio::test]
    async fn test_commit_reorder_rolls_back_on_failure() {
        let before = vec![
            make_card(1, 10, 1000),
            make_card(2, 10, 2000),
            make_card(3, 10, 3000),
        ];
        let (handle, backing) = backed_handle(before.clone());
        let notices = Arc::new(Mutex::new(Vec::new()));
        let notices_in = Arc::clone(&notices);

        commit_reorder(
            &handle,
            0,
            2,
            |_changes| async { Err::<(), _>("boom".to_string()) },
            move |msg| notices_in.lock().unwrap().push(msg),
        )
        .await;

        assert_eq!(*backing.lock().unwrap(), before);
        assert_eq!(notices.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_commit_transfer_moves_across_lists() {
        let registry = CardRegistry::new();
        let (source_handle, source_backing) =
            backed_handle(vec![make_card(1, 10, 1000), make_card(2, 10, 2000)]);
        let (target_handle, target_backing) = backed_handle(Vec::new());
        let _d1 = registry.register(10, source_handle);
        let _d2 = registry.register(20, target_handle);

        commit_transfer(
            &registry,
            1,
            10,
            20,
            0,
            |card_id, to_list, position| async move {
                assert_eq!((card_id, to_list, position), (1, 20, 1000));
                Ok::<(), String>(())
            },
            |_| panic!("success must not notify"),
        )
        .await;

        assert_eq!(source_backing.lock().unwrap().len(), 1);
        let target = target_backing.lock().unwrap();
        assert_eq!(target.len(), 1);
        assert_eq!(target[0].id, 1);
        assert_eq!(target[0].list_id, 20);
        assert_eq!(target[0].position, 1000);
    }

    #[tokio::test]
    async fn test_commit_transfer_rolls_back_both_containers() {
        let registry = CardRegistry::new();
        let source_before = vec![make_card(1, 10, 1000), make_card(2, 10, 2000)];
        let target_before = vec![make_card(3, 20, 1000)];
        let (source_handle, source_backing) = backed_handle(source_before.clone());
        let (target_handle, target_backing) = backed_handle(target_before.clone());
        let _d1 = registry.register(10, source_handle);
        let _d2 = registry.register(20, target_handle);

        let notices = Arc::new(Mutex::new(Vec::new()));
        let notices_in = Arc::clone(&notices);
        commit_transfer(
            &registry,
            2,
            10,
            20,
            1,
            |_, _, _| async { Err::<(), _>("offline".to_string()) },
            move |msg| notices_in.lock().unwrap().push(msg),
        )
        .await;

        assert_eq!(*source_backing.lock().unwrap(), source_before);
        assert_eq!(*target_backing.lock().unwrap(), target_before);
        assert_eq!(notices.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_commit_transfer_unregistered_target_is_noop() {
        let registry = CardRegistry::new();
        let before = vec![make_card(1, 10, 1000)];
        let (source_handle, source_backing) = backed_handle(before.clone());
        let _d1 = registry.register(10, source_handle);

        commit_transfer(
            &registry,
            1,
            10,
            99,
            0,
            |_, _, _| async {
                panic!("must not persist");
                #[allow(unreachable_code)]
                Ok::<(), String>(())
            },
            |_| panic!("must not notify"),
        )
        .await;

        assert_eq!(*source_backing.lock().unwrap(), before);
    }
}
