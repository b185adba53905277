//! Browser-side helpers: deferred timers, scrolling, local storage.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::scroll;
use crate::theme::PreferenceStore;

/// Id of the browser timer currently running in one slot.
///
/// Starting a timer in an occupied slot hands back the superseded id so the
/// caller can clear it; at most one timer per slot is ever live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerSlot {
    active: Option<i32>,
}

impl TimerSlot {
    /// Record `id` as the running timer, returning the one it replaces.
    pub fn replace(&mut self, id: i32) -> Option<i32> {
        self.active.replace(id)
    }

    pub fn take(&mut self) -> Option<i32> {
        self.active.take()
    }
}

/// A fire-once timer owned by a component.
///
/// Scheduling again replaces the pending action; the pending action is
/// cleared when the owning component is torn down.
#[derive(Clone, Copy)]
pub struct Deferred {
    slot: StoredValue<TimerSlot>,
}

impl Deferred {
    pub fn new() -> Self {
        let deferred = Self {
            slot: StoredValue::new(TimerSlot::default()),
        };
        on_cleanup(move || deferred.cancel());
        deferred
    }

    pub fn schedule(&self, delay_ms: u32, action: impl FnOnce() + 'static) {
        self.cancel();

        let slot = self.slot;
        let callback = Closure::once(move || {
            slot.try_update_value(TimerSlot::take);
            action();
        });

        match window().set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms as i32,
        ) {
            Ok(id) => {
                if let Some(stale) = self.slot.try_update_value(|s| s.replace(id)).flatten() {
                    window().clear_timeout_with_handle(stale);
                }
            }
            Err(e) => tracing::warn!("Failed to schedule timer: {:?}", e),
        }
        callback.forget();
    }

    pub fn cancel(&self) {
        if let Some(id) = self.slot.try_update_value(TimerSlot::take).flatten() {
            window().clear_timeout_with_handle(id);
        }
    }
}

/// Document-relative top offset of the element with `id`.
pub fn anchor_offset(id: &str) -> Option<f64> {
    let el = document().get_element_by_id(id)?;
    let scroll_y = window().scroll_y().unwrap_or(0.0);
    Some(el.get_bounding_client_rect().top() + scroll_y)
}

/// Let the browser scroll smoothly to `top`.
pub fn smooth_scroll_to(top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window().scroll_to_with_scroll_to_options(&options);
}

/// Eased scroll towards an anchor, owned by a component.
///
/// Starting a new animation stops the running one, and teardown stops
/// whatever is still in flight. The frame callback is kept until it is
/// replaced or the owner goes away.
#[derive(Clone, Copy)]
pub struct ScrollAnimation {
    slot: StoredValue<TimerSlot>,
    frame: StoredValue<Option<Closure<dyn FnMut()>>, LocalStorage>,
}

impl ScrollAnimation {
    pub fn new() -> Self {
        let animation = Self {
            slot: StoredValue::new(TimerSlot::default()),
            frame: StoredValue::new_local(None),
        };
        on_cleanup(move || {
            animation.cancel();
            animation.frame.try_update_value(Option::take);
        });
        animation
    }

    /// Scroll to the element with `id` over `duration_ms`.
    pub fn to_anchor(&self, id: &str, duration_ms: u32) {
        self.cancel();

        let Some(target) = anchor_offset(id) else {
            tracing::debug!("Scroll anchor '{}' not in the document", id);
            return;
        };

        let start = window().scroll_y().unwrap_or(0.0);
        let started_at = js_sys::Date::now();
        let duration = duration_ms as f64;

        let slot = self.slot;
        let frame = Closure::<dyn FnMut()>::new(move || {
            let elapsed = js_sys::Date::now() - started_at;
            window().scroll_to_with_x_and_y(0.0, scroll::position_at(start, target, elapsed, duration));
            if scroll::is_finished(elapsed, duration) {
                if let Some(handle) = slot.try_update_value(TimerSlot::take).flatten() {
                    window().clear_interval_with_handle(handle);
                }
            }
        });

        match window().set_interval_with_callback_and_timeout_and_arguments_0(
            frame.as_ref().unchecked_ref(),
            scroll::FRAME_MS,
        ) {
            Ok(handle) => {
                if let Some(stale) = self.slot.try_update_value(|s| s.replace(handle)).flatten() {
                    window().clear_interval_with_handle(stale);
                }
            }
            Err(e) => tracing::warn!("Failed to start scroll animation: {:?}", e),
        }

        // The previous callback's interval is already cleared, so dropping it is safe.
        self.frame.try_update_value(|f| *f = Some(frame));
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.slot.try_update_value(TimerSlot::take).flatten() {
            window().clear_interval_with_handle(handle);
        }
    }
}

/// `window.localStorage`, looked up on each access.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl PreferenceStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let storage = Self::storage().ok_or_else(|| "localStorage unavailable".to_string())?;
        storage
            .set_item(key, value)
            .map_err(|e| format!("{:?}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_hands_back_superseded_timer() {
        let mut slot = TimerSlot::default();

        assert_eq!(slot.replace(7), None);
        assert_eq!(slot.replace(9), Some(7));

        assert_eq!(slot.take(), Some(9));
        assert_eq!(slot, TimerSlot::default());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut slot = TimerSlot::default();
        slot.replace(3);
        assert_eq!(slot.take(), Some(3));
        assert_eq!(slot.take(), None);
    }
}
