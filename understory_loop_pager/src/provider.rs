// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page provider seam.

/// Supplies the genuine pages of a looping pager.
///
/// A provider only ever sees *real* positions in `0..count()`. The padding and
/// recycling needed for the looping illusion live in
/// [`PaddedAdapter`](crate::PaddedAdapter), which wraps a provider and forwards
/// to it.
///
/// The associated types let hosts plug in their own notion of a page:
///
/// - `Container` is whatever parent the host attaches pages to.
/// - `Item` is the handle returned from [`create`](Self::create); the host
///   hands it back on destroy and when asking which page a view belongs to.
/// - `View` is the host-side object matched against items in
///   [`is_item_for`](Self::is_item_for).
/// - `State` is an opaque saved-state blob; the pager never inspects it.
///
/// Only `count`, `create`, `destroy`, and `is_item_for` are required. The
/// batching and primary-page hooks default to doing nothing, and the default
/// state round-trip saves nothing.
pub trait PageProvider {
    /// Host container pages are attached to.
    type Container: ?Sized;
    /// Handle for an instantiated page.
    type Item;
    /// Host view matched against items.
    type View: ?Sized;
    /// Opaque saved state.
    type State;
    /// Failure raised by page creation, destruction, or state round-trips.
    type Error;

    /// Number of genuine pages.
    ///
    /// This is read on demand and may change between calls.
    fn count(&self) -> usize;

    /// Creates the page at `real` inside `container`.
    fn create(
        &mut self,
        container: &mut Self::Container,
        real: usize,
    ) -> Result<Self::Item, Self::Error>;

    /// Destroys a page previously returned from [`create`](Self::create).
    fn destroy(
        &mut self,
        container: &mut Self::Container,
        real: usize,
        item: Self::Item,
    ) -> Result<(), Self::Error>;

    /// Returns `true` if `view` is the host view for `item`.
    fn is_item_for(&self, view: &Self::View, item: &Self::Item) -> bool;

    /// Captures provider state for later restoration.
    fn save_state(&self) -> Result<Option<Self::State>, Self::Error> {
        Ok(None)
    }

    /// Restores state captured by [`save_state`](Self::save_state).
    fn restore_state(&mut self, state: Self::State) -> Result<(), Self::Error> {
        let _ = state;
        Ok(())
    }

    /// Called before the host starts a batch of page changes.
    fn start_batch(&mut self, container: &mut Self::Container) {
        let _ = container;
    }

    /// Called after the host finishes a batch of page changes.
    fn finish_batch(&mut self, container: &mut Self::Container) {
        let _ = container;
    }

    /// Informs the provider which page is currently primary (the selected one).
    fn set_primary(&mut self, container: &mut Self::Container, real: usize, item: &Self::Item) {
        let _ = (container, real, item);
    }
}
