// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The looping pager container.

use alloc::rc::{Rc, Weak};
use core::fmt;

use crate::adapter::PaddedAdapter;
use crate::index;
use crate::listener::{ListenerId, ListenerRegistry, PageChangeListener};
use crate::provider::PageProvider;
use crate::trace;
use crate::translator::{ScrollEventTranslator, ScrollState, Translation};

/// The bounded paging widget a [`LoopPager`] drives.
///
/// Every position crossing this seam is an inner (padded) position. The host
/// owns layout, gestures, and animation; the pager only tells it where to be
/// and how many pages exist.
///
/// `set_current_item` must not re-enter the pager. Hosts that emit raw
/// notifications as a consequence of a jump should queue them and deliver them
/// after the call returns.
pub trait PagerHost {
    /// Inner position the host currently shows.
    fn current_item(&self) -> usize;

    /// Moves the host to inner position `inner`.
    fn set_current_item(&mut self, inner: usize, smooth_scroll: bool);

    /// The number of pages the host manages changed to `padded_count`.
    ///
    /// Hosts should drop their realized pages and instantiate afresh through
    /// [`LoopPager::adapter_mut`].
    fn content_changed(&mut self, padded_count: usize);
}

/// Makes a bounded pager host appear to scroll endlessly in both directions.
///
/// `LoopPager` sits between a [`PagerHost`] and the outside world:
///
/// - The host pages through a [`PaddedAdapter`] (see [`adapter_mut`](Self::adapter_mut))
///   and reports raw scroll, selection, and state notifications through
///   [`on_page_scrolled`](Self::on_page_scrolled),
///   [`on_page_selected`](Self::on_page_selected), and
///   [`on_page_scroll_state_changed`](Self::on_page_scroll_state_changed).
/// - Listeners and callers only ever see real positions.
///
/// With no content installed, position queries return `0`, navigation is a
/// no-op, and raw notifications reach listeners unchanged.
pub struct LoopPager<P: PageProvider, H: PagerHost> {
    host: H,
    adapter: Option<PaddedAdapter<P>>,
    translator: ScrollEventTranslator,
    listeners: ListenerRegistry,
    interactive: bool,
}

impl<P: PageProvider, H: PagerHost> LoopPager<P, H> {
    /// Creates an interactive pager with no content.
    #[must_use]
    pub const fn new(host: H) -> Self {
        Self {
            host,
            adapter: None,
            translator: ScrollEventTranslator::new(),
            listeners: ListenerRegistry::new(),
            interactive: true,
        }
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Installs `provider` as the content and moves to its first page.
    ///
    /// Translation history is reset. Returns the previously installed
    /// provider, if any.
    pub fn set_content(&mut self, provider: P) -> Option<P> {
        self.replace_adapter(Some(PaddedAdapter::new(provider)))
    }

    /// Uninstalls the content, returning it.
    pub fn clear_content(&mut self) -> Option<P> {
        self.replace_adapter(None)
    }

    fn replace_adapter(&mut self, adapter: Option<PaddedAdapter<P>>) -> Option<P> {
        let previous = core::mem::replace(&mut self.adapter, adapter);
        self.translator.reset();
        let padded_count = self.padded_count();
        trace::debug!(padded_count, "content replaced");
        self.host.content_changed(padded_count);
        self.set_current_real_position(0, false);
        previous.map(PaddedAdapter::into_provider)
    }

    /// Returns the installed provider, never the padding adapter around it.
    #[must_use]
    pub fn content(&self) -> Option<&P> {
        self.adapter.as_ref().map(PaddedAdapter::provider)
    }

    /// Returns the installed provider mutably.
    ///
    /// Call [`notify_content_changed`](Self::notify_content_changed) after
    /// changing which pages exist.
    pub fn content_mut(&mut self) -> Option<&mut P> {
        self.adapter.as_mut().map(PaddedAdapter::provider_mut)
    }

    /// Returns the padding adapter the host pages through.
    #[must_use]
    pub fn adapter(&self) -> Option<&PaddedAdapter<P>> {
        self.adapter.as_ref()
    }

    /// Returns the padding adapter mutably, for the host's page lifecycle calls.
    pub fn adapter_mut(&mut self) -> Option<&mut PaddedAdapter<P>> {
        self.adapter.as_mut()
    }

    /// Propagates a structural change in the provider's pages.
    ///
    /// Recycled pages are dropped before the host is told about the new count.
    pub fn notify_content_changed(&mut self) {
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        let host = &mut self.host;
        adapter.on_dataset_changed(|padded_count| host.content_changed(padded_count));
    }

    /// Number of genuine pages, or `0` without content.
    #[must_use]
    pub fn real_count(&self) -> usize {
        self.adapter.as_ref().map_or(0, PaddedAdapter::real_count)
    }

    /// Number of pages the host manages, or `0` without content.
    #[must_use]
    pub fn padded_count(&self) -> usize {
        index::padded_count(self.real_count())
    }

    /// Returns `true` if the content is large enough to loop.
    #[must_use]
    pub fn is_looping(&self) -> bool {
        index::is_looping(self.real_count())
    }

    /// Inner position the host currently shows.
    #[must_use]
    pub fn current_inner_position(&self) -> usize {
        self.host.current_item()
    }

    /// Real page the host currently shows, or `0` without content.
    #[must_use]
    pub fn current_real_position(&self) -> usize {
        self.adapter
            .as_ref()
            .map_or(0, |adapter| adapter.real_position(self.host.current_item()))
    }

    /// Moves to real page `real`, animating if `animate` is set.
    ///
    /// When looping, the host is sent to the genuine page, never a clone.
    /// Without content this does nothing.
    pub fn set_current_real_position(&mut self, real: usize, animate: bool) {
        let Some(adapter) = self.adapter.as_ref() else {
            return;
        };
        let inner = if index::is_looping(adapter.real_count()) {
            index::to_inner(real)
        } else {
            real
        };
        self.host.set_current_item(inner, animate);
    }

    /// Scrolls to real page `real` with animation.
    pub fn scroll_to_real_position(&mut self, real: usize) {
        self.set_current_real_position(real, true);
    }

    /// Registers a listener after all existing ones.
    pub fn add_listener(&mut self, listener: Rc<dyn PageChangeListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Registers a listener that is skipped once dropped elsewhere.
    pub fn add_weak_listener(&mut self, listener: Weak<dyn PageChangeListener>) -> ListenerId {
        self.listeners.add_weak(listener)
    }

    /// Removes a listener registration, returning `true` if it existed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Removes every registration of `listener`, strong or weak.
    ///
    /// Returns how many registrations were removed.
    pub fn remove_listener_handle(&mut self, listener: &Rc<dyn PageChangeListener>) -> usize {
        self.listeners.remove_listener(listener)
    }

    /// Removes every listener.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Returns the listener registry.
    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Returns `true` if touch input is handled.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Enables or disables touch handling.
    ///
    /// Programmatic navigation is unaffected.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Gates a touch event: runs the host's handler only while interactive.
    pub fn handle_touch(&self, host_handler: impl FnOnce() -> bool) -> bool {
        self.interactive && host_handler()
    }

    /// Gates touch interception the same way as [`handle_touch`](Self::handle_touch).
    pub fn intercept_touch(&self, host_interceptor: impl FnOnce() -> bool) -> bool {
        self.interactive && host_interceptor()
    }

    /// Returns the seam threshold used for scroll rewriting.
    #[must_use]
    pub const fn seam_threshold(&self) -> f32 {
        self.translator.seam_threshold()
    }

    /// Sets the seam threshold; see [`ScrollEventTranslator::set_seam_threshold`].
    pub fn set_seam_threshold(&mut self, seam_threshold: f32) {
        self.translator.set_seam_threshold(seam_threshold);
    }

    /// Raw scroll notification from the host, in inner positions.
    pub fn on_page_scrolled(&mut self, inner: usize, offset: f32, offset_pixels: i32) {
        let real_count = self.adapter.as_ref().map(PaddedAdapter::real_count);
        let translation = self
            .translator
            .on_raw_scrolled(inner, offset, offset_pixels, real_count);
        self.apply(translation);
    }

    /// Raw selection notification from the host, in inner positions.
    pub fn on_page_selected(&mut self, inner: usize) {
        let real_count = self.adapter.as_ref().map(PaddedAdapter::real_count);
        let translation = self.translator.on_raw_selected(inner, real_count);
        self.apply(translation);
    }

    /// Raw scroll state notification from the host.
    pub fn on_page_scroll_state_changed(&mut self, state: ScrollState) {
        let real_count = self.adapter.as_ref().map(PaddedAdapter::real_count);
        let current = self.host.current_item();
        let translation = self
            .translator
            .on_raw_scroll_state_changed(state, current, real_count);
        self.apply(translation);
    }

    fn apply(&mut self, translation: Translation) {
        if let Some(real) = translation.snap_to {
            self.set_current_real_position(real, false);
        }
        if let Some(event) = translation.event {
            self.listeners.dispatch(event);
        }
    }
}

impl<P, H> fmt::Debug for LoopPager<P, H>
where
    P: PageProvider + fmt::Debug,
    H: PagerHost + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopPager")
            .field("host", &self.host)
            .field("adapter", &self.adapter)
            .field("translator", &self.translator)
            .field("listeners", &self.listeners)
            .field("interactive", &self.interactive)
            .finish()
    }
}
