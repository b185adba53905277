use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

/// Mutable state shared between a component and the async task driving it.
///
/// Both methods return `None` once the state has been disposed (the owning
/// component was torn down), which tells a running task to stop.
pub trait StateStore<T> {
    fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;

    fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R>;
}

impl<T: Send + Sync + 'static> StateStore<T> for RwSignal<T> {
    fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.try_update(f)
    }

    fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }
}

impl<T> StateStore<T> for Rc<RefCell<T>> {
    fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}
