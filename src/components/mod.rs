//! UI Components

mod board_view;
mod card_item;
mod card_modal;
mod checklist_view;
mod list_column;
mod new_list_form;
mod notifications;

pub use board_view::BoardView;
pub use card_item::CardItem;
pub use card_modal::CardModal;
pub use checklist_view::ChecklistView;
pub use list_column::ListColumn;
pub use new_list_form::NewListForm;
pub use notifications::Notifications;
