// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_loop_pager --heading-base-level=0

//! Understory Loop Pager: endless paging over a bounded pager host.
//!
//! A pager host (a carousel, a swipeable page view) usually stops at its first
//! and last page. This crate makes such a host *appear* to wrap around in both
//! directions without changing the host itself. It pads the page sequence with
//! a clone of the last page in front and a clone of the first page at the back,
//! then hides the padding from everyone except the host.
//!
//! The core concepts are:
//!
//! - [`index`]: pure mapping between *real* positions (what callers and
//!   listeners see) and *inner* positions (what the host manages).
//! - [`PageProvider`]: the seam to your genuine pages.
//! - [`PaddedAdapter`]: wraps a [`PageProvider`], reports the padded count to
//!   the host, and recycles the boundary pages instead of rebuilding them.
//! - [`ScrollEventTranslator`]: turns raw host scroll, selection, and state
//!   notifications into real-position [`PageEvent`]s, snapping the host off
//!   clone pages when it comes to rest on one.
//! - [`ListenerRegistry`]: ordered fan-out to [`PageChangeListener`]s.
//! - [`LoopPager`]: the container tying all of the above to a [`PagerHost`].
//!
//! This crate deliberately does **not** render, animate, measure, or handle
//! input. Host frameworks are responsible for:
//!
//! - Laying out and animating pages.
//! - Realizing pages through [`LoopPager::adapter_mut`].
//! - Forwarding raw notifications to [`LoopPager::on_page_scrolled`],
//!   [`LoopPager::on_page_selected`], and
//!   [`LoopPager::on_page_scroll_state_changed`].
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_loop_pager::{
//!     LoopPager, PageChangeListener, PageProvider, PagerHost, ScrollState,
//! };
//!
//! struct Cards(Vec<&'static str>);
//!
//! impl PageProvider for Cards {
//!     type Container = ();
//!     type Item = &'static str;
//!     type View = str;
//!     type State = ();
//!     type Error = core::convert::Infallible;
//!
//!     fn count(&self) -> usize {
//!         self.0.len()
//!     }
//!     fn create(&mut self, _: &mut (), real: usize) -> Result<&'static str, Self::Error> {
//!         Ok(self.0[real])
//!     }
//!     fn destroy(&mut self, _: &mut (), _: usize, _: &'static str) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!     fn is_item_for(&self, view: &str, item: &&'static str) -> bool {
//!         view == *item
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Host {
//!     current: usize,
//! }
//!
//! impl PagerHost for Host {
//!     fn current_item(&self) -> usize {
//!         self.current
//!     }
//!     fn set_current_item(&mut self, inner: usize, _smooth_scroll: bool) {
//!         self.current = inner;
//!     }
//!     fn content_changed(&mut self, _padded_count: usize) {}
//! }
//!
//! #[derive(Default)]
//! struct Selected(RefCell<Vec<usize>>);
//!
//! impl PageChangeListener for Selected {
//!     fn on_page_selected(&self, position: usize) {
//!         self.0.borrow_mut().push(position);
//!     }
//! }
//!
//! let mut pager = LoopPager::new(Host::default());
//! pager.set_content(Cards(vec!["a", "b", "c"]));
//!
//! // Three cards, two clones.
//! assert_eq!(pager.padded_count(), 5);
//! let clone = pager.adapter_mut().unwrap().instantiate(&mut (), 0).unwrap();
//! assert_eq!(clone, "c");
//!
//! let selected = Rc::new(Selected::default());
//! pager.add_listener(selected.clone());
//!
//! // The user swipes backwards from "a" onto the leading clone.
//! pager.host_mut().current = 0;
//! pager.on_page_selected(0);
//! pager.on_page_scroll_state_changed(ScrollState::Idle);
//!
//! // Listeners saw the last card; the host was moved off the clone.
//! assert_eq!(*selected.0.borrow(), [2]);
//! assert_eq!(pager.current_inner_position(), 3);
//! assert_eq!(pager.current_real_position(), 2);
//! ```
//!
//! ## Features
//!
//! - `tracing`: log snap-back corrections, seam rewrites, and recycling through
//!   the `tracing` crate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adapter;
pub mod index;
mod listener;
mod pager;
mod provider;
mod trace;
mod translator;

pub use adapter::PaddedAdapter;
pub use listener::{ListenerId, ListenerRegistry, ListenerSnapshot, PageChangeListener};
pub use pager::{LoopPager, PagerHost};
pub use provider::PageProvider;
pub use translator::{
    DEFAULT_SEAM_THRESHOLD, PageEvent, ScrollEventTranslator, ScrollState, Translation,
};
