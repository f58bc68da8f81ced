//! Position Allocation
//!
//! Computes the numeric sort keys that order siblings inside one
//! container (lists in a board, cards in a list, checklists in a card,
//! items in a checklist). After any move the whole container is
//! renumbered to `(index + 1) * GAP`, which keeps positions strictly
//! increasing and unique without a fractional insert scheme, at the
//! cost of rewriting siblings after every reorder. Only entries whose
//! position actually changed are reported, so unchanged siblings never
//! hit the persistence layer.

use crate::models::{Card, Checklist, ChecklistItem, List};

/// Spacing between consecutive position keys
pub const POSITION_GAP: i32 = 1000;

/// One entry of the minimal persistence diff after a renumber
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PositionChange {
    pub id: u32,
    pub position: i32,
}

/// Anything that carries a position key inside an ordered container
pub trait Positioned {
    fn entry_id(&self) -> u32;
    fn position(&self) -> i32;
    fn set_position(&mut self, position: i32);
}

macro_rules! impl_positioned {
    ($ty:ty) => {
        impl Positioned for $ty {
            fn entry_id(&self) -> u32 {
                self.id
            }
            fn position(&self) -> i32 {
                self.position
            }
            fn set_position(&mut self, position: i32) {
                self.position = position;
            }
        }
    };
}

impl_positioned!(List);
impl_positioned!(Card);
impl_positioned!(Checklist);
impl_positioned!(ChecklistItem);

/// Renumber a container already in display order and return the
/// entries whose position changed. Empty container is a no-op; a
/// single entry lands on `POSITION_GAP`.
pub fn renumber<T: Positioned>(entries: &mut [T]) -> Vec<PositionChange> {
    let mut changed = Vec::new();
    for (index, entry) in entries.iter_mut().enumerate() {
        let position = (index as i32 + 1) * POSITION_GAP;
        if entry.position() != position {
            entry.set_position(position);
            changed.push(PositionChange {
                id: entry.entry_id(),
                position,
            });
        }
    }
    changed
}

/// Move one entry from `from` to `to` inside the container and
/// renumber. Returns the minimal diff; moving to the same index
/// returns an empty diff and leaves the container untouched.
pub fn reorder<T: Positioned>(entries: &mut Vec<T>, from: usize, to: usize) -> Vec<PositionChange> {
    if from == to || from >= entries.len() {
        return Vec::new();
    }
    let entry = entries.remove(from);
    let to = to.min(entries.len());
    entries.insert(to, entry);
    renumber(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Card;

    fn make_card(id: u32, position: i32) -> Card {
        Card {
            id,
            list_id: 1,
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

    #[test]
    fn test_renumber_empty_is_noop() {
        let mut cards: Vec<Card> = Vec::new();
        assert!(renumber(&mut cards).is_empty());
    }

    #[test]
    fn test_renumber_single_entry_gets_gap() {
        let mut cards = vec![make_card(7, 4500)];
        let changed = renumber(&mut cards);
        assert_eq!(cards[0].position, POSITION_GAP);
        assert_eq!(changed, vec![PositionChange { id: 7, position: 1000 }]);
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let mut cards = vec![make_card(1, 1000), make_card(2, 2000)];
        let before = cards.clone();
        let changed = reorder(&mut cards, 1, 1);
        assert!(changed.is_empty());
        assert_eq!(cards, before);
    }

    #[test]
    fn test_reorder_reports_minimal_diff() {
        // [A,B,C] at [1000,2000,3000]; moving B to index 0 yields
        // [B,A,C] and C keeps position 3000
        let mut cards = vec![make_card(1, 1000), make_card(2, 2000), make_card(3, 3000)];
        let changed = reorder(&mut cards, 1, 0);

        let ids: Vec<u32> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(
            changed,
            vec![
                PositionChange { id: 2, position: 1000 },
                PositionChange { id: 1, position: 2000 },
            ]
        );
    }

    #[test]
    fn test_positions_strictly_increasing_after_any_moves() {
        let mut cards: Vec<Card> = (1..=6).map(|id| make_card(id, id as i32 * 1000)).collect();
        for (from, to) in [(5, 0), (2, 4), (0, 3), (1, 1), (3, 5)] {
            reorder(&mut cards, from, to);
            for pair in cards.windows(2) {
                assert!(pair[0].position < pair[1].position);
            }
        }
        assert_eq!(cards.len(), 6);
    }

    #[test]
    fn test_reorder_out_of_range_from_is_noop() {
        let mut cards = vec![make_card(1, 1000)];
        assert!(reorder(&mut cards, 3, 0).is_empty());
        assert_eq!(cards.len(), 1);
    }
}
