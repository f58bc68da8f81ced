//! Leptos Sortable
//!
//! Pointer-based sortable drag engine for Leptos using mouse events.
//! Uses a movement threshold to distinguish click from drag, tracks the
//! closest drop slot while the pointer moves, and renders the dragged
//! item as a floating overlay detached from its source container.
//!
//! One `SortableContext` owns one drag session at a time: a new drag can
//! only be armed while the session is idle.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to promote a pending press to a drag
const DRAG_THRESHOLD_PX: i32 = 5;

/// Life of one drag session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// The item currently being dragged (or pending promotion)
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveDrag {
    pub item_id: u32,
    /// Container the item was picked up from
    pub container_id: u32,
    /// Index of the item in its source container at pickup time
    pub from_index: usize,
    /// Text rendered in the floating overlay
    pub preview: String,
}

/// A candidate insertion point: container + index within it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropSlot {
    pub container_id: u32,
    pub index: usize,
}

/// Signals for one sortable scope (e.g. the cards of a board, or the
/// items of one checklist). All fields are Copy signals so the context
/// can be passed into event handlers by value.
#[derive(Clone, Copy)]
pub struct SortableContext {
    phase: RwSignal<DragPhase>,
    active: RwSignal<Option<ActiveDrag>>,
    slot: RwSignal<Option<DropSlot>>,
    /// Pressed but not yet past the movement threshold
    pending: RwSignal<Option<ActiveDrag>>,
    press_at: RwSignal<(i32, i32)>,
    pointer: RwSignal<(i32, i32)>,
    just_ended: RwSignal<bool>,
}

pub fn create_sortable() -> SortableContext {
    SortableContext {
        phase: RwSignal::new(DragPhase::Idle),
        active: RwSignal::new(None),
        slot: RwSignal::new(None),
        pending: RwSignal::new(None),
        press_at: RwSignal::new((0, 0)),
        pointer: RwSignal::new((0, 0)),
        just_ended: RwSignal::new(false),
    }
}

impl SortableContext {
    pub fn is_dragging(&self) -> bool {
        self.phase.get() == DragPhase::Dragging
    }

    pub fn is_dragging_item(&self, item_id: u32) -> bool {
        matches!(self.active.get(), Some(ref a) if a.item_id == item_id)
    }

    pub fn active(&self) -> Option<ActiveDrag> {
        self.active.get()
    }

    pub fn slot_is(&self, container_id: u32, index: usize) -> bool {
        self.slot.get() == Some(DropSlot { container_id, index })
    }

    pub fn pointer(&self) -> (i32, i32) {
        self.pointer.get()
    }

    /// True briefly after a drag ends, so click handlers can ignore the
    /// synthetic click that follows the releasing mouseup.
    pub fn drag_just_ended(&self) -> bool {
        self.just_ended.get()
    }

    /// Drop the session without committing. Zero side effects beyond
    /// clearing the session signals.
    pub fn cancel(&self) {
        finish_session(self);
    }
}

/// Clear all session state and raise the just-ended flag for 100ms
fn finish_session(sc: &SortableContext) {
    sc.phase.set(DragPhase::Idle);
    sc.active.set(None);
    sc.slot.set(None);
    sc.pending.set(None);
    sc.just_ended.set(true);

    if let Some(win) = web_sys::window() {
        let clear = sc.just_ended;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for a drag handle.
/// Arms a pending drag; promotion happens on mousemove past the
/// threshold. Ignored unless the session is idle, so a second drag
/// cannot start while one is in flight. The press is consumed: it does
/// not bubble up to an enclosing handle, so nested sortable scopes
/// (a card inside a draggable list column) cannot arm together from
/// one gesture.
pub fn make_handle_mousedown(sc: SortableContext, drag: ActiveDrag) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Presses on form controls are clicks, never drags
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
        }
        ev.stop_propagation();
        if sc.phase.get_untracked() != DragPhase::Idle {
            return;
        }
        sc.pending.set(Some(drag.clone()));
        sc.press_at.set((ev.client_x(), ev.client_y()));
        sc.pointer.set((ev.client_x(), ev.client_y()));
    }
}

/// Create mouseenter handler for a drop slot
pub fn make_slot_mouseenter(sc: SortableContext, slot: DropSlot) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if sc.phase.get_untracked() == DragPhase::Dragging {
            sc.slot.set(Some(slot));
        }
    }
}

/// Create mouseleave handler that clears the current slot
pub fn make_slot_mouseleave(sc: SortableContext) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if sc.phase.get_untracked() == DragPhase::Dragging {
            sc.slot.set(None);
        }
    }
}

/// Bind the document-level listeners that drive one sortable scope:
/// mousemove promotes a pending press and tracks the pointer, mouseup
/// commits over a slot or cancels, Escape and window blur cancel.
///
/// `on_drop` receives the active drag and the slot it was released on.
/// Releasing outside any slot is a cancel, not a drop.
pub fn bind_global<F>(sc: SortableContext, on_drop: F)
where
    F: Fn(ActiveDrag, DropSlot) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        sc.pointer.set((ev.client_x(), ev.client_y()));

        if sc.phase.get_untracked() == DragPhase::Idle {
            if let Some(pending) = sc.pending.get_untracked() {
                let (sx, sy) = sc.press_at.get_untracked();
                let dx = (ev.client_x() - sx).abs();
                let dy = (ev.client_y() - sy).abs();
                if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                    sc.active.set(Some(pending));
                    sc.phase.set(DragPhase::Dragging);
                }
            }
        }
    });

    let drop_cb = on_drop;
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let active = sc.active.get_untracked();
        let slot = sc.slot.get_untracked();
        let was_dragging = sc.phase.get_untracked() == DragPhase::Dragging;

        finish_session(&sc);

        if was_dragging {
            if let (Some(drag), Some(slot)) = (active, slot) {
                drop_cb(drag, slot);
            }
        }
    });

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && sc.phase.get_untracked() == DragPhase::Dragging {
            finish_session(&sc);
        }
    });

    let on_blur = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        if sc.phase.get_untracked() != DragPhase::Idle || sc.pending.get_untracked().is_some() {
            finish_session(&sc);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
            let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        }
        let _ = win.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
    on_mouseup.forget();
    on_keydown.forget();
    on_blur.forget();
}

/// Floating preview of the dragged item, rendered at the pointer and
/// above every container regardless of scroll or clipping.
#[component]
pub fn DragOverlay(sc: SortableContext) -> impl IntoView {
    view! {
        {move || sc.active().map(|drag| {
            let (x, y) = sc.pointer();
            view! {
                <div
                    class="drag-overlay"
                    style=format!("position: fixed; left: {}px; top: {}px; pointer-events: none; z-index: 1000;", x + 8, y + 8)
                >
                    {drag.preview}
                </div>
            }
        })}
    }
}

/// Drop slot between items. Highlights while targeted, visible only
/// while this scope is dragging.
#[component]
pub fn SlotZone(sc: SortableContext, container_id: u32, index: usize) -> impl IntoView {
    let slot = DropSlot { container_id, index };
    let on_mouseenter = make_slot_mouseenter(sc, slot);
    let on_mouseleave = make_slot_mouseleave(sc);

    let zone_class = move || {
        let mut c = String::from("drop-slot");
        if !sc.is_dragging() { c.push_str(" hidden"); }
        if sc.slot_is(container_id, index) { c.push_str(" active"); }
        c
    };

    view! {
        <div
            class=zone_class
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        />
    }
}
