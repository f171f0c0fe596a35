use vlist::{HeightMode, VisibleRange};

use crate::RenderKey;

/// One row the host must render, absolutely positioned inside the scroll content.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderItem<K> {
    pub key: RenderKey<K>,
    pub index: usize,
    /// Offset of the row's top edge from the top of the content.
    pub top: u64,
    /// Row height in fixed mode; `None` in variable mode, where the row sizes itself and the
    /// host reports the measured height back.
    pub height: Option<u32>,
    /// Padding before the row content (half of the gap).
    pub inset_start: u32,
    /// Padding after the row content (the rest of the gap).
    pub inset_end: u32,
}

/// Everything the host needs to draw the list for the current state.
#[derive(Clone, Debug)]
pub struct RenderFrame<'a, K> {
    /// Height of the scroll container.
    pub container_extent: u32,
    /// Height of the scrollable content.
    pub total_extent: u64,
    pub mode: HeightMode,
    /// A fetch is in flight; hosts typically show a loading footer.
    pub loading: bool,
    pub range: VisibleRange,
    pub items: &'a [RenderItem<K>],
}

impl<K> RenderFrame<'_, K> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
