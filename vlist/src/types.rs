use core::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// Which height algorithm a list uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeightMode {
    /// Every row has the same configured height.
    Fixed,
    /// Rows start at an estimated height and are refined by measurement.
    Variable,
}

/// How variable-height ranges are computed.
///
/// Both strategies produce identical ranges and placements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VariableLayout {
    /// Walk every row from index 0 on each recomputation (`O(n)`).
    #[default]
    Scan,
    /// Keep a prefix-sum tree over row steps (`O(log n)` queries and updates).
    Indexed,
}

/// The visible pixel window of the scroll container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub scroll_offset: u64,
    pub container_extent: u32,
}

impl Viewport {
    pub fn new(scroll_offset: u64, container_extent: u32) -> Self {
        Self {
            scroll_offset,
            container_extent,
        }
    }

    /// Builds a viewport from a raw, possibly negative, scroll position (e.g. elastic overscroll).
    pub fn from_raw(scroll_offset: i64, container_extent: u32) -> Self {
        Self::new(scroll_offset.max(0) as u64, container_extent)
    }

    /// Offset of the first pixel past the bottom edge.
    pub fn end(&self) -> u64 {
        self.scroll_offset
            .saturating_add(self.container_extent as u64)
    }
}

/// The rows that must exist as render nodes for a given viewport.
///
/// Always derived from `(Viewport, HeightModel)`; never patched incrementally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
    /// Top offset of `start_index`.
    pub leading_offset: u64,
    /// Extent of the whole list, i.e. the height of the scrollable content.
    pub total_extent: u64,
}

impl VisibleRange {
    pub(crate) fn empty(total_extent: u64) -> Self {
        Self {
            start_index: 0,
            end_index: 0,
            leading_offset: 0,
            total_extent,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    /// The last rendered index (inclusive), or `None` for an empty range.
    pub fn last_index(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end_index - 1)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    pub fn indices(&self) -> Range<usize> {
        self.start_index..self.end_index.max(self.start_index)
    }
}

/// A row positioned inside the scroll content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedItem {
    pub index: usize,
    /// Offset of the row's top edge from the top of the content.
    pub top: u64,
    /// Row height (excludes `gap`).
    pub height: u32,
}

impl PlacedItem {
    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}
