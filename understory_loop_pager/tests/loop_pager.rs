// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for `LoopPager`: a recording host pages through a
//! recording provider while listeners observe real positions only.

use std::cell::RefCell;
use std::rc::Rc;

use understory_loop_pager::{
    LoopPager, PageChangeListener, PageEvent, PageProvider, PagerHost, ScrollState,
};

#[derive(Debug, Default)]
struct Host {
    current: usize,
    jumps: Vec<(usize, bool)>,
    counts: Vec<usize>,
}

impl PagerHost for Host {
    fn current_item(&self) -> usize {
        self.current
    }

    fn set_current_item(&mut self, inner: usize, smooth_scroll: bool) {
        self.current = inner;
        self.jumps.push((inner, smooth_scroll));
    }

    fn content_changed(&mut self, padded_count: usize) {
        self.counts.push(padded_count);
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Card {
    real: usize,
    serial: u32,
}

#[derive(Debug, PartialEq, Eq)]
enum DeckError {
    Missing(usize),
}

#[derive(Debug, Default)]
struct Deck {
    len: usize,
    serial: u32,
    created: Vec<usize>,
    destroyed: Vec<usize>,
}

impl Deck {
    fn new(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }
}

impl PageProvider for Deck {
    type Container = Vec<u32>;
    type Item = Card;
    type View = u32;
    type State = Vec<u8>;
    type Error = DeckError;

    fn count(&self) -> usize {
        self.len
    }

    fn create(&mut self, container: &mut Vec<u32>, real: usize) -> Result<Card, DeckError> {
        if real >= self.len {
            return Err(DeckError::Missing(real));
        }
        self.serial += 1;
        self.created.push(real);
        container.push(self.serial);
        Ok(Card {
            real,
            serial: self.serial,
        })
    }

    fn destroy(
        &mut self,
        container: &mut Vec<u32>,
        real: usize,
        item: Card,
    ) -> Result<(), DeckError> {
        self.destroyed.push(real);
        container.retain(|&serial| serial != item.serial);
        Ok(())
    }

    fn is_item_for(&self, view: &u32, item: &Card) -> bool {
        *view == item.serial
    }

    fn save_state(&self) -> Result<Option<Vec<u8>>, DeckError> {
        Ok(Some(vec![u8::try_from(self.len).unwrap_or(u8::MAX)]))
    }

    fn restore_state(&mut self, state: Vec<u8>) -> Result<(), DeckError> {
        self.len = state.first().copied().map_or(0, usize::from);
        Ok(())
    }
}

#[derive(Default)]
struct Recorder(RefCell<Vec<PageEvent>>);

impl Recorder {
    fn take(&self) -> Vec<PageEvent> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl PageChangeListener for Recorder {
    fn on_page_scrolled(&self, position: usize, offset: f32, offset_pixels: i32) {
        self.0.borrow_mut().push(PageEvent::Scrolled {
            position,
            offset,
            offset_pixels,
        });
    }

    fn on_page_selected(&self, position: usize) {
        self.0.borrow_mut().push(PageEvent::Selected(position));
    }

    fn on_page_scroll_state_changed(&self, state: ScrollState) {
        self.0.borrow_mut().push(PageEvent::ScrollStateChanged(state));
    }
}

fn scrolled(position: usize, offset: f32, offset_pixels: i32) -> PageEvent {
    PageEvent::Scrolled {
        position,
        offset,
        offset_pixels,
    }
}

fn pager_with(len: usize) -> (LoopPager<Deck, Host>, Rc<Recorder>) {
    let mut pager = LoopPager::new(Host::default());
    pager.set_content(Deck::new(len));
    let recorder = Rc::new(Recorder::default());
    pager.add_listener(recorder.clone());
    (pager, recorder)
}

#[test]
fn three_cards_pad_to_five() {
    let (mut pager, _) = pager_with(3);
    assert_eq!(pager.real_count(), 3);
    assert_eq!(pager.padded_count(), 5);
    assert!(pager.is_looping());
    assert_eq!(pager.host().counts, [5]);

    let mut container = Vec::new();
    let adapter = pager.adapter_mut().unwrap();
    let reals: Vec<usize> = (0..5)
        .map(|inner| adapter.instantiate(&mut container, inner).unwrap().real)
        .collect();
    assert_eq!(reals, [2, 0, 1, 2, 0]);
    assert_eq!(container.len(), 5);
}

#[test]
fn forward_wrap_hides_the_clone() {
    let (mut pager, recorder) = pager_with(3);
    pager.set_current_real_position(2, false);
    pager.on_page_selected(3);
    assert_eq!(recorder.take(), [PageEvent::Selected(2)]);

    // Dragging from the last card towards the trailing clone.
    pager.on_page_scroll_state_changed(ScrollState::Dragging);
    pager.on_page_scrolled(3, 0.3, 30);
    pager.on_page_scrolled(3, 0.6, 60);
    pager.on_page_selected(4);
    assert_eq!(
        recorder.take(),
        [
            PageEvent::ScrollStateChanged(ScrollState::Dragging),
            scrolled(2, 0.0, 0),
            scrolled(0, 0.0, 0),
            PageEvent::Selected(0),
        ]
    );

    // The host settles on the clone with no residual offset.
    pager.host_mut().current = 4;
    pager.on_page_scrolled(4, 0.0, 0);
    assert_eq!(pager.host().jumps.last(), Some(&(3, false)));
    pager.on_page_scrolled(4, 0.0, 0);
    assert_eq!(pager.host().jumps.last(), Some(&(1, false)));
    assert_eq!(pager.current_real_position(), 0);

    // The host re-announces the genuine page; listeners already know it.
    pager.on_page_selected(1);
    pager.on_page_scroll_state_changed(ScrollState::Idle);
    assert_eq!(
        recorder.take(),
        [
            scrolled(0, 0.0, 0),
            scrolled(0, 0.0, 0),
            PageEvent::ScrollStateChanged(ScrollState::Idle),
        ]
    );
}

#[test]
fn idle_on_last_slot_snaps_to_first_page() {
    let (mut pager, recorder) = pager_with(3);
    pager.host_mut().current = 4;
    let jumps_before = pager.host().jumps.len();

    pager.on_page_scroll_state_changed(ScrollState::Idle);

    assert_eq!(&pager.host().jumps[jumps_before..], [(1, false)]);
    assert_eq!(pager.current_real_position(), 0);
    assert_eq!(
        recorder.take(),
        [PageEvent::ScrollStateChanged(ScrollState::Idle)]
    );
}

#[test]
fn repeated_selection_is_reported_once() {
    let (mut pager, recorder) = pager_with(4);
    pager.on_page_selected(2);
    pager.on_page_selected(2);
    assert_eq!(recorder.take(), [PageEvent::Selected(1)]);
}

#[test]
fn clone_page_is_recycled_until_content_changes() {
    let (mut pager, _) = pager_with(3);
    let mut container = Vec::new();
    let adapter = pager.adapter_mut().unwrap();

    let clone = adapter.instantiate(&mut container, 0).unwrap();
    let serial = clone.serial;
    adapter.destroy(&mut container, 0, clone).unwrap();
    let again = adapter.instantiate(&mut container, 0).unwrap();
    assert_eq!(again.serial, serial);
    assert_eq!(adapter.provider().created, [2]);

    adapter.destroy(&mut container, 0, again).unwrap();
    pager.notify_content_changed();
    assert_eq!(pager.host().counts, [5, 5]);

    let adapter = pager.adapter_mut().unwrap();
    let fresh = adapter.instantiate(&mut container, 0).unwrap();
    assert_ne!(fresh.serial, serial);
    assert_eq!(adapter.provider().created, [2, 2]);
}

#[test]
fn interior_pages_are_destroyed_in_real_positions() {
    let (mut pager, _) = pager_with(3);
    let mut container = Vec::new();
    let adapter = pager.adapter_mut().unwrap();
    let card = adapter.instantiate(&mut container, 4).unwrap();
    adapter.destroy(&mut container, 4, card).unwrap();
    assert_eq!(adapter.provider().destroyed, [0]);
    assert!(container.is_empty());
}

#[test]
fn provider_failures_are_returned_unchanged() {
    let (mut pager, _) = pager_with(3);
    pager.content_mut().unwrap().len = 0;
    let mut container = Vec::new();
    let adapter = pager.adapter_mut().unwrap();
    assert_eq!(
        adapter.instantiate(&mut container, 0),
        Err(DeckError::Missing(0))
    );
}

#[test]
fn saved_state_passes_through_verbatim() {
    let (mut pager, _) = pager_with(3);
    let adapter = pager.adapter_mut().unwrap();
    let state = adapter.save_state().unwrap().unwrap();
    assert_eq!(state, [3]);
    adapter.restore_state(vec![6]).unwrap();
    assert_eq!(pager.real_count(), 6);
    assert_eq!(pager.content().unwrap().len, 6);
}

#[test]
fn single_card_does_not_loop() {
    let (mut pager, recorder) = pager_with(1);
    assert_eq!(pager.padded_count(), 1);
    assert!(!pager.is_looping());
    assert_eq!(pager.host().jumps, [(0, false)]);

    pager.on_page_scrolled(0, 0.0, 0);
    pager.on_page_scrolled(0, 0.0, 0);
    pager.on_page_scroll_state_changed(ScrollState::Idle);
    assert_eq!(pager.host().jumps.len(), 1);
    assert_eq!(
        recorder.take(),
        [
            scrolled(0, 0.0, 0),
            scrolled(0, 0.0, 0),
            PageEvent::ScrollStateChanged(ScrollState::Idle),
        ]
    );
}

#[test]
fn replacing_content_resets_selection_history() {
    let (mut pager, recorder) = pager_with(3);
    pager.on_page_selected(1);
    let old = pager.set_content(Deck::new(4)).unwrap();
    assert_eq!(old.len, 3);
    pager.on_page_selected(1);
    assert_eq!(
        recorder.take(),
        [PageEvent::Selected(0), PageEvent::Selected(0)]
    );
}

#[test]
fn removed_and_dropped_listeners_stop_receiving() {
    let (mut pager, first) = pager_with(3);
    let second = Rc::new(Recorder::default());
    let second_id = pager.add_listener(second.clone());
    let weak: Rc<dyn PageChangeListener> = Rc::new(Recorder::default());
    pager.add_weak_listener(Rc::downgrade(&weak));
    assert_eq!(pager.listeners().len(), 3);

    pager.on_page_selected(2);
    assert_eq!(first.take(), [PageEvent::Selected(1)]);
    assert_eq!(second.take(), [PageEvent::Selected(1)]);

    assert!(pager.remove_listener(second_id));
    drop(weak);
    pager.on_page_selected(3);
    assert_eq!(first.take(), [PageEvent::Selected(2)]);
    assert!(second.take().is_empty());

    pager.clear_listeners();
    pager.on_page_selected(1);
    assert!(first.take().is_empty());
}

#[test]
fn listeners_can_be_removed_by_handle() {
    let (mut pager, first) = pager_with(3);
    let other = Rc::new(Recorder::default());
    let handle: Rc<dyn PageChangeListener> = other.clone();
    pager.add_listener(handle.clone());
    pager.add_weak_listener(Rc::downgrade(&handle));
    assert_eq!(pager.listeners().len(), 3);

    pager.on_page_selected(2);
    assert_eq!(other.take(), [PageEvent::Selected(1), PageEvent::Selected(1)]);

    assert_eq!(pager.remove_listener_handle(&handle), 2);
    assert_eq!(pager.remove_listener_handle(&handle), 0);
    assert_eq!(pager.listeners().len(), 1);

    first.take();
    pager.on_page_selected(3);
    assert_eq!(first.take(), [PageEvent::Selected(2)]);
    assert!(other.take().is_empty());
}

#[test]
fn listener_order_matches_registration_order() {
    struct Tagged(&'static str, Rc<RefCell<Vec<&'static str>>>);

    impl PageChangeListener for Tagged {
        fn on_page_selected(&self, _: usize) {
            self.1.borrow_mut().push(self.0);
        }
    }

    let order = Rc::new(RefCell::new(Vec::new()));
    let mut pager = LoopPager::new(Host::default());
    pager.set_content(Deck::new(2));
    for tag in ["first", "second", "third"] {
        pager.add_listener(Rc::new(Tagged(tag, order.clone())));
    }
    pager.on_page_selected(2);
    assert_eq!(*order.borrow(), ["first", "second", "third"]);
}

#[test]
fn no_content_forwards_raw_positions() {
    let mut pager = LoopPager::<Deck, _>::new(Host::default());
    let recorder = Rc::new(Recorder::default());
    pager.add_listener(recorder.clone());

    pager.on_page_scrolled(2, 0.5, 5);
    pager.on_page_selected(2);
    pager.on_page_scroll_state_changed(ScrollState::Idle);

    assert_eq!(pager.current_real_position(), 0);
    assert!(pager.host().jumps.is_empty());
    assert_eq!(
        recorder.take(),
        [
            scrolled(2, 0.5, 5),
            PageEvent::Selected(2),
            PageEvent::ScrollStateChanged(ScrollState::Idle),
        ]
    );
}
