//! Repository integration tests against an in-memory database.

use std::path::Path;

use super::*;
use crate::domain::DomainError;

async fn setup() -> (BoardRepository, ListRepository, CardRepository, ChecklistRepository) {
    let db = DbState::new();
    db.init(Path::new(":memory:")).await.unwrap();
    let conn = db.connection();
    (
        BoardRepository::new(conn.clone()),
        ListRepository::new(conn.clone()),
        CardRepository::new(conn.clone()),
        ChecklistRepository::new(conn),
    )
}

#[tokio::test]
async fn first_run_seeds_a_default_board() {
    let (boards, _, _, _) = setup().await;
    let all = boards.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "My board");
}

#[tokio::test]
async fn lists_are_created_with_gapped_positions() {
    let (_, lists, _, _) = setup().await;
    let a = lists.create(1, "Todo").await.unwrap();
    let b = lists.create(1, "Doing").await.unwrap();
    assert_eq!(a.position, 1000);
    assert_eq!(b.position, 2000);

    let all = lists.list_by_board(1).await.unwrap();
    assert_eq!(
        all.iter().map(|l| l.title.as_str()).collect::<Vec<_>>(),
        vec!["Todo", "Doing"]
    );
}

#[tokio::test]
async fn empty_titles_are_rejected() {
    let (boards, lists, cards, checklists) = setup().await;
    assert!(matches!(
        boards.create("").await,
        Err(DomainError::InvalidInput(_))
    ));
    assert!(matches!(
        lists.create(1, "").await,
        Err(DomainError::InvalidInput(_))
    ));
    assert!(matches!(
        cards.create(1, "").await,
        Err(DomainError::InvalidInput(_))
    ));
    assert!(matches!(
        checklists.create(1, "").await,
        Err(DomainError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn rename_missing_list_is_not_found() {
    let (_, lists, _, _) = setup().await;
    assert!(matches!(
        lists.rename(99, "x").await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn reorder_applies_changed_positions() {
    let (_, _, cards, _) = setup().await;
    let a = cards.create(1, "A").await.unwrap();
    let b = cards.create(1, "B").await.unwrap();
    let _c = cards.create(1, "C").await.unwrap();

    // [A, B, C] -> [B, A, C]: only A and B change
    cards
        .reorder(&[
            PositionUpdate { id: b.id, position: 1000 },
            PositionUpdate { id: a.id, position: 2000 },
        ])
        .await
        .unwrap();

    let order: Vec<String> = cards
        .list_by_list(1)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(order, vec!["B", "A", "C"]);
}

#[tokio::test]
async fn cross_list_move_lands_at_the_requested_slot() {
    let (_, lists, cards, _) = setup().await;
    let todo = lists.create(1, "Todo").await.unwrap();
    let doing = lists.create(1, "Doing").await.unwrap();

    let a = cards.create(todo.id, "A").await.unwrap();
    let x = cards.create(doing.id, "X").await.unwrap();
    let _y = cards.create(doing.id, "Y").await.unwrap();

    // Move A into Doing at X's position; A must end up before X.
    let moved = cards
        .update(
            a.id,
            UpdateCardFields {
                list_id: Some(doing.id),
                position: Some(x.position),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.list_id, doing.id);

    let source = cards.list_by_list(todo.id).await.unwrap();
    assert!(source.is_empty());

    let target = cards.list_by_list(doing.id).await.unwrap();
    assert_eq!(
        target.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
        vec!["A", "X", "Y"]
    );
    // Both lists renumbered back to clean gaps
    assert_eq!(
        target.iter().map(|c| c.position).collect::<Vec<_>>(),
        vec![1000, 2000, 3000]
    );
}

#[tokio::test]
async fn move_without_position_appends_to_the_target() {
    let (_, lists, cards, _) = setup().await;
    let todo = lists.create(1, "Todo").await.unwrap();
    let doing = lists.create(1, "Doing").await.unwrap();
    let a = cards.create(todo.id, "A").await.unwrap();
    let _x = cards.create(doing.id, "X").await.unwrap();

    cards
        .update(
            a.id,
            UpdateCardFields {
                list_id: Some(doing.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let target = cards.list_by_list(doing.id).await.unwrap();
    assert_eq!(
        target.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
        vec!["X", "A"]
    );
}

#[tokio::test]
async fn partial_update_leaves_other_fields_alone() {
    let (_, _, cards, _) = setup().await;
    let a = cards.create(1, "A").await.unwrap();

    cards
        .update(
            a.id,
            UpdateCardFields {
                description: Some("notes".to_string()),
                labels: Some(vec!["red".to_string(), "blue".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let loaded = cards.find_by_id(a.id).await.unwrap().unwrap();
    assert_eq!(loaded.title, "A");
    assert_eq!(loaded.description.as_deref(), Some("notes"));
    assert_eq!(loaded.labels, vec!["red", "blue"]);
    assert_eq!(loaded.position, a.position);
}

#[tokio::test]
async fn update_missing_card_is_not_found() {
    let (_, _, cards, _) = setup().await;
    assert!(matches!(
        cards.update(42, UpdateCardFields::default()).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn progress_is_derived_from_checklist_items() {
    let (_, _, cards, checklists) = setup().await;
    let card = cards.create(1, "A").await.unwrap();
    let cl = checklists.create(card.id, "Steps").await.unwrap();
    let one = checklists.create_item(cl.id, "one").await.unwrap();
    let _two = checklists.create_item(cl.id, "two").await.unwrap();
    let _three = checklists.create_item(cl.id, "three").await.unwrap();

    let loaded = cards.find_by_id(card.id).await.unwrap().unwrap();
    assert_eq!(loaded.progress, 0);

    assert!(checklists.toggle_item(one.id).await.unwrap());
    let loaded = cards.find_by_id(card.id).await.unwrap().unwrap();
    assert_eq!(loaded.progress, 33);

    // Toggling back clears it again
    assert!(!checklists.toggle_item(one.id).await.unwrap());
    let loaded = cards.find_by_id(card.id).await.unwrap().unwrap();
    assert_eq!(loaded.progress, 0);
}

#[tokio::test]
async fn deleting_a_list_cascades_to_cards_and_checklists() {
    let (_, lists, cards, checklists) = setup().await;
    let todo = lists.create(1, "Todo").await.unwrap();
    let card = cards.create(todo.id, "A").await.unwrap();
    let cl = checklists.create(card.id, "Steps").await.unwrap();
    checklists.create_item(cl.id, "one").await.unwrap();

    Repository::delete(&lists, todo.id).await.unwrap();

    assert!(lists.find_by_id(todo.id).await.unwrap().is_none());
    assert!(cards.find_by_id(card.id).await.unwrap().is_none());
    assert!(checklists.find_by_id(cl.id).await.unwrap().is_none());
    assert!(checklists.list_items(cl.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_checklist_cascades_to_items() {
    let (_, _, cards, checklists) = setup().await;
    let card = cards.create(1, "A").await.unwrap();
    let cl = checklists.create(card.id, "Steps").await.unwrap();
    checklists.create_item(cl.id, "one").await.unwrap();
    checklists.create_item(cl.id, "two").await.unwrap();

    Repository::delete(&checklists, cl.id).await.unwrap();
    assert!(checklists.list_items(cl.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn item_reorder_is_independent_of_the_card_reorder() {
    let (_, _, cards, checklists) = setup().await;
    let card = cards.create(1, "A").await.unwrap();
    let cl = checklists.create(card.id, "Steps").await.unwrap();
    let one = checklists.create_item(cl.id, "one").await.unwrap();
    let two = checklists.create_item(cl.id, "two").await.unwrap();

    checklists
        .reorder_items(&[
            PositionUpdate { id: two.id, position: 1000 },
            PositionUpdate { id: one.id, position: 2000 },
        ])
        .await
        .unwrap();

    let order: Vec<String> = checklists
        .list_items(cl.id)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.text)
        .collect();
    assert_eq!(order, vec!["two", "one"]);

    // Card order untouched
    let card_order = cards.list_by_list(1).await.unwrap();
    assert_eq!(card_order[0].id, card.id);
}

#[tokio::test]
async fn data_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tavla.db");

    let db = DbState::new();
    db.init(&path).await.unwrap();
    let lists = ListRepository::new(db.connection());
    lists.create(1, "Todo").await.unwrap();
    db.connection().lock().await.take();

    let reopened = DbState::new();
    reopened.init(&path).await.unwrap();
    let lists = ListRepository::new(reopened.connection());
    let all = lists.list_by_board(1).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Todo");
}

#[tokio::test]
async fn toggling_a_missing_item_is_not_found() {
    let (_, _, _, checklists) = setup().await;
    assert!(matches!(
        checklists.toggle_item(7).await,
        Err(DomainError::NotFound(_))
    ));
}
