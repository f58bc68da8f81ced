//! Card Item Component
//!
//! Presentational face of one card inside a list column.

use crate::models::Card;
use leptos::prelude::*;

/// Card face: title, labels, due date, checklist progress
#[component]
pub fn CardItem(card: Card) -> impl IntoView {
    let has_labels = !card.labels.is_empty();
    let progress = card.progress;
    let member_count = card.members.len();

    view! {
        <div class="card-body">
            {has_labels.then(|| view! {
                <div class="card-labels">
                    {card.labels.iter().map(|label| {
                        view! {
                            <span
                                class="card-label"
                                style=format!("background-color: {};", label)
                            ></span>
                        }
                    }).collect_view()}
                </div>
            })}

            <div class="card-title">{card.title.clone()}</div>

            <div class="card-meta">
                {card.due_date.map(|due| view! {
                    <span class="card-due">{format_due(due)}</span>
                })}
                {(progress > 0).then(|| view! {
                    <span class="card-progress">
                        <span
                            class="card-progress-bar"
                            style=format!("width: {}%;", progress)
                        ></span>
                    </span>
                })}
                {(member_count > 0).then(|| view! {
                    <span class="card-members">{format!("{} members", member_count)}</span>
                })}
            </div>
        </div>
    }
}

/// Render a millisecond timestamp as yyyy-mm-dd for the card face
fn format_due(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_due() {
        assert_eq!(format_due(0), "1970-01-01");
        // 2026-03-01T00:00:00Z
        assert_eq!(format_due(1_772_323_200_000), "2026-03-01");
    }
}
