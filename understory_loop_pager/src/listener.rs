// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered fan-out of page change notifications.
//!
//! [`ListenerRegistry`] keeps listeners in insertion order and dispatches to
//! them in that order. Listeners can be held strongly ([`ListenerRegistry::add`])
//! or weakly ([`ListenerRegistry::add_weak`]); a weak listener whose target has
//! been dropped is an absent entry and is skipped.
//!
//! ## Dispatch contract
//!
//! The `dispatch*` methods on [`ListenerRegistry`] borrow the registry for the
//! whole call. Through [`LoopPager`](crate::LoopPager) this makes mutation
//! during dispatch impossible: the pager is exclusively borrowed while it
//! delivers events. A registry shared through a `RefCell` would panic if a
//! listener tried to mutate it from inside such a dispatch.
//!
//! To let listeners mutate a shared registry, take a [`ListenerSnapshot`] first
//! and dispatch through it once the borrow is released:
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_loop_pager::{ListenerRegistry, PageChangeListener};
//!
//! struct Late;
//! impl PageChangeListener for Late {}
//!
//! struct Joiner(Rc<RefCell<ListenerRegistry>>);
//! impl PageChangeListener for Joiner {
//!     fn on_page_selected(&self, _: usize) {
//!         self.0.borrow_mut().add(Rc::new(Late));
//!     }
//! }
//!
//! let registry = Rc::new(RefCell::new(ListenerRegistry::new()));
//! registry
//!     .borrow_mut()
//!     .add(Rc::new(Joiner(Rc::clone(&registry))));
//!
//! let snapshot = registry.borrow().snapshot();
//! snapshot.dispatch_selected(0);
//! assert_eq!(registry.borrow().len(), 2);
//! ```
//!
//! A snapshot holds exactly the listeners that were live when it was taken.
//! Registrations added or removed while it dispatches take effect on the next
//! snapshot.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use crate::translator::{PageEvent, ScrollState};

/// Receives page change notifications in real positions.
///
/// All methods default to doing nothing, so listeners implement only what they
/// need. Methods take `&self`; listeners that keep state use interior
/// mutability.
pub trait PageChangeListener {
    /// The pager scrolled; `offset` is the fraction of the way to `position + 1`.
    fn on_page_scrolled(&self, position: usize, offset: f32, offset_pixels: i32) {
        let _ = (position, offset, offset_pixels);
    }

    /// A new page became selected.
    fn on_page_selected(&self, position: usize) {
        let _ = position;
    }

    /// The scroll state changed.
    fn on_page_scroll_state_changed(&self, state: ScrollState) {
        let _ = state;
    }
}

/// Identifies a registration in a [`ListenerRegistry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

enum Handle {
    Strong(Rc<dyn PageChangeListener>),
    Weak(Weak<dyn PageChangeListener>),
}

impl Handle {
    fn get(&self) -> Option<Rc<dyn PageChangeListener>> {
        match self {
            Self::Strong(listener) => Some(Rc::clone(listener)),
            Self::Weak(listener) => listener.upgrade(),
        }
    }
}

struct Entry {
    id: ListenerId,
    handle: Handle,
}

/// The live listeners of a [`ListenerRegistry`] at one point in time.
///
/// A snapshot owns its listener handles, so it does not borrow the registry.
/// Dispatching through one lets listeners add or remove registrations on a
/// registry shared through a `RefCell`. Those changes show up in the next
/// [`ListenerRegistry::snapshot`].
#[derive(Clone, Default)]
pub struct ListenerSnapshot {
    listeners: SmallVec<[Rc<dyn PageChangeListener>; 4]>,
}

impl ListenerSnapshot {
    /// Number of listeners captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener was live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Iterates over the captured listeners in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<dyn PageChangeListener>> {
        self.listeners.iter()
    }

    /// Delivers a translated [`PageEvent`] to every captured listener.
    pub fn dispatch(&self, event: PageEvent) {
        match event {
            PageEvent::Scrolled {
                position,
                offset,
                offset_pixels,
            } => self.dispatch_scrolled(position, offset, offset_pixels),
            PageEvent::Selected(position) => self.dispatch_selected(position),
            PageEvent::ScrollStateChanged(state) => self.dispatch_state_changed(state),
        }
    }

    /// Calls [`PageChangeListener::on_page_scrolled`] on every captured listener.
    pub fn dispatch_scrolled(&self, position: usize, offset: f32, offset_pixels: i32) {
        for listener in &self.listeners {
            listener.on_page_scrolled(position, offset, offset_pixels);
        }
    }

    /// Calls [`PageChangeListener::on_page_selected`] on every captured listener.
    pub fn dispatch_selected(&self, position: usize) {
        for listener in &self.listeners {
            listener.on_page_selected(position);
        }
    }

    /// Calls [`PageChangeListener::on_page_scroll_state_changed`] on every captured listener.
    pub fn dispatch_state_changed(&self, state: ScrollState) {
        for listener in &self.listeners {
            listener.on_page_scroll_state_changed(state);
        }
    }
}

impl IntoIterator for ListenerSnapshot {
    type Item = Rc<dyn PageChangeListener>;
    type IntoIter = smallvec::IntoIter<[Rc<dyn PageChangeListener>; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.listeners.into_iter()
    }
}

impl fmt::Debug for ListenerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSnapshot")
            .field("len", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

/// Insertion-ordered set of [`PageChangeListener`]s.
#[derive(Default)]
pub struct ListenerRegistry {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Number of registrations, including weak ones whose target is gone.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers `listener` after all existing ones.
    pub fn add(&mut self, listener: Rc<dyn PageChangeListener>) -> ListenerId {
        self.push(Handle::Strong(listener))
    }

    /// Registers `listener` without keeping it alive.
    ///
    /// Once the last strong reference is dropped the entry is skipped during
    /// dispatch and pruned by the next registration or removal.
    pub fn add_weak(&mut self, listener: Weak<dyn PageChangeListener>) -> ListenerId {
        self.push(Handle::Weak(listener))
    }

    /// Removes the registration `id`, returning `true` if it existed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        self.prune();
        removed
    }

    /// Removes every registration of `listener`, returning how many were removed.
    pub fn remove_listener(&mut self, listener: &Rc<dyn PageChangeListener>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| match &entry.handle {
            Handle::Strong(held) => !Rc::ptr_eq(held, listener),
            Handle::Weak(held) => !Weak::ptr_eq(held, &Rc::downgrade(listener)),
        });
        let removed = before - self.entries.len();
        self.prune();
        removed
    }

    /// Removes every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Captures the live listeners in insertion order.
    ///
    /// Dead weak registrations are left out.
    #[must_use]
    pub fn snapshot(&self) -> ListenerSnapshot {
        ListenerSnapshot {
            listeners: self
                .entries
                .iter()
                .filter_map(|entry| entry.handle.get())
                .collect(),
        }
    }

    /// Delivers a translated [`PageEvent`] to every live listener.
    pub fn dispatch(&self, event: PageEvent) {
        self.snapshot().dispatch(event);
    }

    /// Calls [`PageChangeListener::on_page_scrolled`] on every live listener.
    pub fn dispatch_scrolled(&self, position: usize, offset: f32, offset_pixels: i32) {
        self.snapshot()
            .dispatch_scrolled(position, offset, offset_pixels);
    }

    /// Calls [`PageChangeListener::on_page_selected`] on every live listener.
    pub fn dispatch_selected(&self, position: usize) {
        self.snapshot().dispatch_selected(position);
    }

    /// Calls [`PageChangeListener::on_page_scroll_state_changed`] on every live listener.
    pub fn dispatch_state_changed(&self, state: ScrollState) {
        self.snapshot().dispatch_state_changed(state);
    }

    fn push(&mut self, handle: Handle) -> ListenerId {
        self.prune();
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, handle });
        id
    }

    fn prune(&mut self) {
        self.entries.retain(|entry| match &entry.handle {
            Handle::Strong(_) => true,
            Handle::Weak(listener) => listener.strong_count() > 0,
        });
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: SmallVec<[ListenerId; 8]> = self.entries.iter().map(|entry| entry.id).collect();
        f.debug_struct("ListenerRegistry")
            .field("ids", &ids)
            .field("next_id", &self.next_id)
            .finish()
    }
}
