// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between real and inner (padded) page positions.
//!
//! A looping pager shows `real_count` genuine pages to the outside world, but
//! asks its host to manage `real_count + 2` pages: one clone of the last real
//! page in front, and one clone of the first real page at the back.
//!
//! ```text
//! inner:  0      1   2   ...   n     n+1
//! real:   n-1    0   1   ...   n-1   0
//!         clone                      clone
//! ```
//!
//! With fewer than two real pages looping is disabled and no padding exists.

/// Returns `true` when `real_count` is large enough for the looping illusion.
#[must_use]
pub const fn is_looping(real_count: usize) -> bool {
    real_count > 1
}

/// Number of pages the host manages for `real_count` genuine pages.
///
/// This is `real_count + 2` when looping, else `real_count` itself.
#[must_use]
pub const fn padded_count(real_count: usize) -> usize {
    if is_looping(real_count) {
        real_count + 2
    } else {
        real_count
    }
}

/// Maps an inner position to the real page it displays.
///
/// Valid for every `inner` in `0..=real_count + 1`; both padding slots map to
/// the real page they mirror. Always `0` when looping is disabled.
#[must_use]
pub const fn to_real(inner: usize, real_count: usize) -> usize {
    if !is_looping(real_count) {
        return 0;
    }
    // `inner - 1 + real_count` without underflow at `inner == 0`.
    (inner + real_count - 1) % real_count
}

/// Maps a real position to the inner position of its genuine (non-clone) page.
#[must_use]
pub const fn to_inner(real: usize) -> usize {
    real + 1
}

/// Returns `true` if `inner` is one of the two clone slots.
///
/// Never `true` when looping is disabled.
#[must_use]
pub const fn is_padding_slot(inner: usize, real_count: usize) -> bool {
    is_looping(real_count) && (inner == 0 || inner == real_count + 1)
}
