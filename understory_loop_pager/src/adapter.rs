// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Padding adapter: presents a [`PageProvider`] to the host in inner positions.
//!
//! [`PaddedAdapter`] is what the host pages through. It reports the padded
//! count, maps every positional call back to real space, and keeps a tiny
//! recycle cache for the two boundary slots so that pages destroyed right
//! before a wrap are handed back instead of being rebuilt.
//!
//! ## Recycling
//!
//! When looping, destroying the page at inner position `0` or at inner position
//! `real_count` parks the item instead of forwarding to the provider. The next
//! [`PaddedAdapter::instantiate`] for exactly that inner position returns the
//! parked item without calling [`PageProvider::create`].
//!
//! Parked items are dropped by [`PaddedAdapter::on_dataset_changed`]. The
//! provider's pages may no longer match them, so they must never be handed out
//! again.

use core::fmt;

use crate::index;
use crate::provider::PageProvider;
use crate::trace;

/// Two parked items keyed by the exact inner position they were destroyed at.
#[derive(Debug)]
struct RecycleSlots<T> {
    leading: Option<T>,
    trailing: Option<(usize, T)>,
}

impl<T> RecycleSlots<T> {
    const fn new() -> Self {
        Self {
            leading: None,
            trailing: None,
        }
    }

    /// Parks `item`, returning whatever was displaced from the same slot.
    fn park(&mut self, inner: usize, item: T) -> Option<(usize, T)> {
        if inner == 0 {
            self.leading.replace(item).map(|old| (0, old))
        } else {
            self.trailing.replace((inner, item))
        }
    }

    fn take(&mut self, inner: usize) -> Option<T> {
        if inner == 0 {
            return self.leading.take();
        }
        match self.trailing.take() {
            Some((parked, item)) if parked == inner => Some(item),
            other => {
                self.trailing = other;
                None
            }
        }
    }

    fn contains(&self, inner: usize) -> bool {
        if inner == 0 {
            self.leading.is_some()
        } else {
            matches!(self.trailing, Some((parked, _)) if parked == inner)
        }
    }

    fn len(&self) -> usize {
        usize::from(self.leading.is_some()) + usize::from(self.trailing.is_some())
    }

    fn clear(&mut self) {
        self.leading = None;
        self.trailing = None;
    }
}

/// Wraps a [`PageProvider`] and exposes it to the host in padded inner positions.
///
/// All calls that reach the wrapped provider are translated to real positions.
/// Errors from the provider are returned unchanged.
pub struct PaddedAdapter<P: PageProvider> {
    provider: P,
    recycled: RecycleSlots<P::Item>,
}

impl<P: PageProvider> PaddedAdapter<P> {
    /// Wraps `provider` with an empty recycle cache.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            recycled: RecycleSlots::new(),
        }
    }

    /// Returns the wrapped provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the wrapped provider mutably.
    ///
    /// If the mutation changes the set of pages, follow up with
    /// [`on_dataset_changed`](Self::on_dataset_changed).
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Unwraps the adapter, dropping any parked items.
    #[must_use]
    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Number of genuine pages, read from the provider.
    #[must_use]
    pub fn real_count(&self) -> usize {
        self.provider.count()
    }

    /// Number of pages the host should manage.
    #[must_use]
    pub fn count(&self) -> usize {
        index::padded_count(self.real_count())
    }

    /// Maps an inner position to the real page it shows.
    #[must_use]
    pub fn real_position(&self, inner: usize) -> usize {
        index::to_real(inner, self.real_count())
    }

    /// Returns `true` if an item is parked for exactly `inner`.
    #[must_use]
    pub fn is_recycled(&self, inner: usize) -> bool {
        self.recycled.contains(inner)
    }

    /// Number of parked items (at most two).
    #[must_use]
    pub fn recycled_len(&self) -> usize {
        self.recycled.len()
    }

    /// Handles a structural change in the provider's pages.
    ///
    /// Drops every parked item first, then calls `notify` with the new padded
    /// count so the host can rebuild against fresh pages.
    pub fn on_dataset_changed(&mut self, notify: impl FnOnce(usize)) {
        if self.recycled.len() > 0 {
            trace::trace!(parked = self.recycled.len(), "dropping recycled pages");
        }
        self.recycled.clear();
        notify(self.count());
    }

    /// Returns the page for inner position `inner`.
    ///
    /// A parked item for exactly this position is handed back as-is; otherwise
    /// the provider creates the mapped real page.
    pub fn instantiate(
        &mut self,
        container: &mut P::Container,
        inner: usize,
    ) -> Result<P::Item, P::Error> {
        let real = self.real_position(inner);
        if let Some(item) = self.recycled.take(inner) {
            trace::trace!(inner, real, "reusing recycled page");
            return Ok(item);
        }
        self.provider.create(container, real)
    }

    /// Releases the page at inner position `inner`.
    ///
    /// When looping, items at inner `0` and inner `real_count` are parked for
    /// reuse. Everything else is destroyed by the provider at its real position.
    pub fn destroy(
        &mut self,
        container: &mut P::Container,
        inner: usize,
        item: P::Item,
    ) -> Result<(), P::Error> {
        let real_count = self.real_count();
        if index::is_looping(real_count) && (inner == 0 || inner == real_count) {
            trace::trace!(inner, "parking page for reuse");
            return match self.recycled.park(inner, item) {
                // A page parked earlier and never reclaimed still needs tearing down.
                Some((stale, old)) => {
                    self.provider
                        .destroy(container, index::to_real(stale, real_count), old)
                }
                None => Ok(()),
            };
        }
        self.provider
            .destroy(container, index::to_real(inner, real_count), item)
    }

    /// Returns `true` if `view` is the host view for `item`.
    #[must_use]
    pub fn is_item_for(&self, view: &P::View, item: &P::Item) -> bool {
        self.provider.is_item_for(view, item)
    }

    /// Captures the provider's state.
    pub fn save_state(&self) -> Result<Option<P::State>, P::Error> {
        self.provider.save_state()
    }

    /// Restores the provider's state.
    pub fn restore_state(&mut self, state: P::State) -> Result<(), P::Error> {
        self.provider.restore_state(state)
    }

    /// Forwards the start of a host batch.
    pub fn start_batch(&mut self, container: &mut P::Container) {
        self.provider.start_batch(container);
    }

    /// Forwards the end of a host batch.
    pub fn finish_batch(&mut self, container: &mut P::Container) {
        self.provider.finish_batch(container);
    }

    /// Marks the page at inner position `inner` as primary.
    pub fn set_primary(&mut self, container: &mut P::Container, inner: usize, item: &P::Item) {
        let real = self.real_position(inner);
        self.provider.set_primary(container, real, item);
    }
}

impl<P> fmt::Debug for PaddedAdapter<P>
where
    P: PageProvider + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaddedAdapter")
            .field("provider", &self.provider)
            .field("recycled_len", &self.recycled.len())
            .finish_non_exhaustive()
    }
}
