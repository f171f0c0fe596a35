//! A headless windowing engine for large vertical lists.
//!
//! Given a scroll position and the height of the scroll container, it answers which rows must
//! exist as render nodes, where each one sits, how tall the whole content is, and when more data
//! should be fetched. For the host-facing render window (keys, render instructions, callbacks),
//! see the `vlist-adapter` crate.
//!
//! The engine is split into three pieces:
//! - [`HeightModel`]: per-row heights, either one fixed height or measured heights with an
//!   estimate for rows not yet measured.
//! - [`ViewportMapper`]: maps a [`Viewport`] onto a [`VisibleRange`] and row positions.
//! - [`LoadTrigger`]: fires an incremental fetch near the end of the content, at most one at a
//!   time per dataset.
//!
//! Everything is synchronous and single-threaded; the only asynchronous work is the fetch, which
//! the host runs and reports back with a [`LoadTicket`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod fenwick;
mod height;
mod load;
mod options;
mod types;
mod viewport;


pub use height::HeightModel;
pub use load::{LOAD_THRESHOLD, LoadState, LoadTicket, LoadTrigger, RequestMore, Settlement};
pub use options::{DEFAULT_ESTIMATED_HEIGHT, DEFAULT_ITEM_HEIGHT, LayoutConfig};
pub use types::{Align, HeightMode, PlacedItem, VariableLayout, Viewport, VisibleRange};
pub use viewport::{FIXED_OVERSCAN, ViewportMapper};
