// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loop pager basics.
//!
//! Simulate a host swiping forward past the last page of a three-page carousel
//! and print what listeners observe.
//!
//! Run:
//! - `cargo run -p understory_demos --example loop_pager_basics`

use std::convert::Infallible;
use std::rc::Rc;

use understory_loop_pager::{LoopPager, PageChangeListener, PageProvider, PagerHost, ScrollState};

struct Carousel(&'static [&'static str]);

impl PageProvider for Carousel {
    type Container = ();
    type Item = &'static str;
    type View = str;
    type State = ();
    type Error = Infallible;

    fn count(&self) -> usize {
        self.0.len()
    }

    fn create(&mut self, _: &mut (), real: usize) -> Result<&'static str, Infallible> {
        Ok(self.0[real])
    }

    fn destroy(&mut self, _: &mut (), _: usize, _: &'static str) -> Result<(), Infallible> {
        Ok(())
    }

    fn is_item_for(&self, view: &str, item: &&'static str) -> bool {
        view == *item
    }
}

#[derive(Default)]
struct Host {
    current: usize,
}

impl PagerHost for Host {
    fn current_item(&self) -> usize {
        self.current
    }

    fn set_current_item(&mut self, inner: usize, smooth_scroll: bool) {
        println!("  host: jump to inner {inner} (animated: {smooth_scroll})");
        self.current = inner;
    }

    fn content_changed(&mut self, padded_count: usize) {
        println!("  host: now managing {padded_count} pages");
    }
}

struct Printer;

impl PageChangeListener for Printer {
    fn on_page_scrolled(&self, position: usize, offset: f32, offset_pixels: i32) {
        println!("  listener: scrolled {position} +{offset:.2} ({offset_pixels}px)");
    }

    fn on_page_selected(&self, position: usize) {
        println!("  listener: selected {position}");
    }

    fn on_page_scroll_state_changed(&self, state: ScrollState) {
        println!("  listener: state {state:?}");
    }
}

fn main() {
    let mut pager = LoopPager::new(Host::default());
    println!("install three pages");
    pager.set_content(Carousel(&["red", "green", "blue"]));
    pager.add_listener(Rc::new(Printer));

    println!("go to the last page");
    pager.set_current_real_position(2, false);
    pager.on_page_selected(pager.current_inner_position());

    println!("drag past the end");
    pager.on_page_scroll_state_changed(ScrollState::Dragging);
    for (offset, pixels) in [(0.2, 80), (0.45, 180), (0.7, 280), (0.95, 380)] {
        pager.on_page_scrolled(3, offset, pixels);
    }
    pager.on_page_selected(4);

    println!("settle on the trailing clone");
    pager.host_mut().current = 4;
    pager.on_page_scrolled(4, 0.0, 0);
    pager.on_page_scroll_state_changed(ScrollState::Idle);

    println!(
        "resting on real page {} (inner {})",
        pager.current_real_position(),
        pager.current_inner_position()
    );
}
