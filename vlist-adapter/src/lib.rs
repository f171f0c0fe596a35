//! The host-facing render window for the `vlist` engine.
//!
//! `vlist` answers geometric questions: which rows are visible, where they sit, when to fetch.
//! This crate wraps those answers into a component a UI host can drive directly:
//!
//! - [`RenderWindow`]: consumes scroll, resize, measurement and dataset events and keeps an
//!   up-to-date [`RenderFrame`] with keyed, absolutely positioned [`RenderItem`]s.
//! - [`ContainerExtent`]: the configured container height, either pixels or a CSS-like length
//!   (`"480px"`, `"50vh"`).
//!
//! It is framework-agnostic and holds no UI objects.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod extent;
mod frame;
mod key;
mod options;
mod window;

#[cfg(test)]
mod tests;

pub use extent::{
    AmbientViewport, ContainerExtent, CssLength, DEFAULT_CONTAINER_EXTENT, ExtentError, LengthUnit,
};
pub use frame::{RenderFrame, RenderItem};
pub use key::RenderKey;
pub use options::{ItemKeyFn, OnChangeCallback, OnScrollCallback, RenderWindowOptions};
pub use window::RenderWindow;
