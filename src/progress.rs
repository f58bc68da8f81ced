//! Card Progress
//!
//! Derives a card's 0-100 progress from the done/total counts of its
//! checklists. Pure fold, called when an item toggles or a checklist's
//! item set changes, never edited by the user.

use crate::models::ChecklistItem;
use std::collections::HashMap;

/// Done/total counts for one checklist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChecklistCounts {
    pub done: u32,
    pub total: u32,
}

/// Count done/total over one checklist's items
pub fn count_items(items: &[ChecklistItem]) -> ChecklistCounts {
    ChecklistCounts {
        done: items.iter().filter(|i| i.is_done).count() as u32,
        total: items.len() as u32,
    }
}

/// Reduce per-checklist counts to a card progress percentage.
/// A card with no items has progress 0.
pub fn card_progress(counts: &HashMap<u32, ChecklistCounts>) -> u8 {
    let (done, total) = counts
        .values()
        .fold((0u32, 0u32), |(d, t), c| (d + c.done, t + c.total));
    if total == 0 {
        0
    } else {
        ((done * 100) / total) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: u32, is_done: bool) -> ChecklistItem {
        ChecklistItem {
            id,
            checklist_id: 1,
            text: format!("Item {}", id),
            is_done,
            assignee: None,
            due_at: None,
            position: id as i32 * 1000,
        }
    }

    #[test]
    fn test_empty_card_has_zero_progress() {
        assert_eq!(card_progress(&HashMap::new()), 0);
    }

    #[test]
    fn test_progress_sums_across_checklists() {
        let mut counts = HashMap::new();
        counts.insert(1, ChecklistCounts { done: 1, total: 2 });
        counts.insert(2, ChecklistCounts { done: 2, total: 2 });
        // 3 of 4 done
        assert_eq!(card_progress(&counts), 75);
    }

    #[test]
    fn test_count_items() {
        let items = vec![make_item(1, true), make_item(2, false), make_item(3, true)];
        assert_eq!(count_items(&items), ChecklistCounts { done: 2, total: 3 });
    }

    #[test]
    fn test_all_done_is_hundred() {
        let mut counts = HashMap::new();
        counts.insert(1, ChecklistCounts { done: 3, total: 3 });
        assert_eq!(card_progress(&counts), 100);
    }
}
