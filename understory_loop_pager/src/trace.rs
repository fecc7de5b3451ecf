// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logging shims that compile away unless the `tracing` feature is enabled.

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::debug!(target: "understory_loop_pager", $($arg)*);
    }};
}

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::trace!(target: "understory_loop_pager", $($arg)*);
    }};
}

pub(crate) use debug;
pub(crate) use trace;
