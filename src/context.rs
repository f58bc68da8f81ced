//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

/// One user-visible, non-blocking notification
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload board data from the backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload board data from the backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Active toast notifications - read
    pub notices: ReadSignal<Vec<Notice>>,
    /// Active toast notifications - write
    set_notices: WriteSignal<Vec<Notice>>,
    next_notice_id: RwSignal<u32>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        notices: (ReadSignal<Vec<Notice>>, WriteSignal<Vec<Notice>>),
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            notices: notices.0,
            set_notices: notices.1,
            next_notice_id: RwSignal::new(0),
        }
    }

    /// Trigger a reload of board data
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Raise a non-blocking error toast, auto-dismissed after 5s
    pub fn notify_error(&self, message: impl Into<String>) {
        let id = self.next_notice_id.get_untracked();
        self.next_notice_id.set(id + 1);
        let message = message.into();
        web_sys::console::warn_1(&format!("[BOARD] {}", message).into());
        self.set_notices.update(|notices| {
            notices.push(Notice { id, message });
        });

        let set_notices = self.set_notices;
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(5_000).await;
            set_notices.update(|notices| notices.retain(|n| n.id != id));
        });
    }

    /// Dismiss one toast early
    pub fn dismiss(&self, id: u32) {
        self.set_notices.update(|notices| notices.retain(|n| n.id != id));
    }
}
