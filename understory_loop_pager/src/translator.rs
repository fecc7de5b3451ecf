// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translation of raw host scroll notifications into real-position events.
//!
//! The host reports scrolling in inner positions, including the two clone
//! slots. [`ScrollEventTranslator`] turns each raw notification into a
//! [`Translation`]: an optional corrective jump for the host plus an optional
//! [`PageEvent`] for listeners. Callers apply the jump first, then dispatch the
//! event.
//!
//! Three rules hide the padding from listeners:
//!
//! - **Snap-back**: when the host comes to rest on a clone slot, it is moved to
//!   the genuine page without animation.
//! - **Seam rewrite**: while scrolling from the last real page towards the
//!   trailing clone, fractional offsets are replaced by a resting position on
//!   either the last or the first real page.
//! - **Selection dedup**: repeated raw selections of the same real page are
//!   reported once.

use crate::index;
use crate::trace;

/// Offset past which a scroll across the wrap seam counts as having arrived at
/// the first real page.
///
/// This is a tie-break, not a structural constant; see
/// [`ScrollEventTranslator::set_seam_threshold`].
pub const DEFAULT_SEAM_THRESHOLD: f32 = 0.5;

/// Scroll state reported by the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollState {
    /// The pager is at rest on a page.
    #[default]
    Idle,
    /// The user is dragging.
    Dragging,
    /// The pager is animating towards its final position.
    Settling,
}

/// A notification for listeners, in real positions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// The pager scrolled.
    Scrolled {
        /// Real page at the leading edge.
        position: usize,
        /// Fraction in `[0, 1)` of the way to the next page.
        offset: f32,
        /// `offset` in host pixels.
        offset_pixels: i32,
    },
    /// A page became selected.
    Selected(usize),
    /// The scroll state changed.
    ScrollStateChanged(ScrollState),
}

/// The outcome of one raw host notification.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Translation {
    /// Real position the host must jump to without animation, if any.
    pub snap_to: Option<usize>,
    /// Event to forward to listeners, if any.
    pub event: Option<PageEvent>,
}

/// Stateful filter between the host's raw notifications and listeners.
///
/// `real_count` arguments are `None` when no provider is installed. In that
/// case positions pass through untouched and no correction is ever requested.
#[derive(Clone, Debug)]
pub struct ScrollEventTranslator {
    seam_threshold: f32,
    previous_offset: Option<f32>,
    previous_position: Option<usize>,
}

impl Default for ScrollEventTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollEventTranslator {
    /// Creates a translator with [`DEFAULT_SEAM_THRESHOLD`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_seam_threshold(DEFAULT_SEAM_THRESHOLD)
    }

    /// Creates a translator with a custom seam threshold.
    #[must_use]
    pub const fn with_seam_threshold(seam_threshold: f32) -> Self {
        Self {
            seam_threshold,
            previous_offset: None,
            previous_position: None,
        }
    }

    /// Returns the seam threshold.
    #[must_use]
    pub const fn seam_threshold(&self) -> f32 {
        self.seam_threshold
    }

    /// Sets the offset past which a scroll across the wrap seam is reported as
    /// arriving at the first real page.
    ///
    /// Values outside `[0, 1)` make one side of the seam unreachable.
    pub fn set_seam_threshold(&mut self, seam_threshold: f32) {
        self.seam_threshold = seam_threshold;
    }

    /// Last raw offset seen, if any.
    #[must_use]
    pub const fn previous_offset(&self) -> Option<f32> {
        self.previous_offset
    }

    /// Last real position reported as selected, if any.
    #[must_use]
    pub const fn previous_position(&self) -> Option<usize> {
        self.previous_position
    }

    /// Forgets the recorded offset and selection.
    pub fn reset(&mut self) {
        self.previous_offset = None;
        self.previous_position = None;
    }

    /// Translates a raw scroll at inner position `inner`.
    pub fn on_raw_scrolled(
        &mut self,
        inner: usize,
        offset: f32,
        offset_pixels: i32,
        real_count: Option<usize>,
    ) -> Translation {
        let Some(real_count) = real_count else {
            self.previous_offset = Some(offset);
            return Translation {
                snap_to: None,
                event: Some(PageEvent::Scrolled {
                    position: inner,
                    offset,
                    offset_pixels,
                }),
            };
        };

        let real = index::to_real(inner, real_count);
        let snap_to = (offset == 0.0
            && self.previous_offset == Some(0.0)
            && is_edge_slot(inner, real_count))
        .then_some(real);
        if snap_to.is_some() {
            trace::debug!(inner, real, "resting on a clone slot, snapping back");
        }
        self.previous_offset = Some(offset);

        let event = if real_count.checked_sub(1) != Some(real) {
            PageEvent::Scrolled {
                position: real,
                offset,
                offset_pixels,
            }
        } else if offset > self.seam_threshold {
            trace::trace!(offset, "seam crossed, reporting first page");
            PageEvent::Scrolled {
                position: 0,
                offset: 0.0,
                offset_pixels: 0,
            }
        } else {
            PageEvent::Scrolled {
                position: real,
                offset: 0.0,
                offset_pixels: 0,
            }
        };
        Translation {
            snap_to,
            event: Some(event),
        }
    }

    /// Translates a raw selection of inner position `inner`.
    ///
    /// Selecting the real page that was already reported yields no event.
    pub fn on_raw_selected(&mut self, inner: usize, real_count: Option<usize>) -> Translation {
        let real = match real_count {
            Some(real_count) => index::to_real(inner, real_count),
            None => inner,
        };
        if self.previous_position == Some(real) {
            trace::trace!(real, "duplicate selection suppressed");
            return Translation::default();
        }
        self.previous_position = Some(real);
        Translation {
            snap_to: None,
            event: Some(PageEvent::Selected(real)),
        }
    }

    /// Translates a raw scroll state change while the host rests at `current_inner`.
    ///
    /// The state change itself is always forwarded.
    pub fn on_raw_scroll_state_changed(
        &mut self,
        state: ScrollState,
        current_inner: usize,
        real_count: Option<usize>,
    ) -> Translation {
        let snap_to = match real_count {
            Some(real_count)
                if state == ScrollState::Idle && is_edge_slot(current_inner, real_count) =>
            {
                let real = index::to_real(current_inner, real_count);
                trace::debug!(current_inner, real, "idle on a clone slot, snapping back");
                Some(real)
            }
            _ => None,
        };
        Translation {
            snap_to,
            event: Some(PageEvent::ScrollStateChanged(state)),
        }
    }
}

/// First or last slot of the padded range, only when looping.
fn is_edge_slot(inner: usize, real_count: usize) -> bool {
    index::is_looping(real_count)
        && (inner == 0 || inner == index::padded_count(real_count) - 1)
}
