//! Notifications Component
//!
//! Non-blocking toast stack fed by failed persistence calls. Toasts
//! auto-dismiss; clicking one dismisses it early.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn Notifications() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="notifications">
            <For
                each=move || ctx.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class="notification error" on:click=move |_| ctx.dismiss(id)>
                            {notice.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
