use core::cmp;

use crate::{Align, HeightMode, HeightModel, PlacedItem, Viewport, VisibleRange};

/// Extra rows rendered past the bottom edge in fixed mode, to avoid blank flashes while
/// scrolling fast.
pub const FIXED_OVERSCAN: usize = 2;

/// Maps a viewport onto the rows of a [`HeightModel`].
///
/// Every query is a pure function of the viewport and the model: calling it again with the same
/// inputs yields the same answer, so hosts may recompute as often as they like.
///
/// - Fixed mode is `O(1)` and renders [`FIXED_OVERSCAN`] rows beyond the visible ones.
/// - Variable mode with [`crate::VariableLayout::Scan`] walks rows from index 0 and is `O(n)` per
///   query. [`crate::VariableLayout::Indexed`] answers the same queries in `O(log n)`.
///
/// Scroll offsets past the last reachable position (`total_extent - container_extent`) are
/// clamped before mapping.
#[derive(Clone, Copy, Debug)]
pub struct ViewportMapper<'a> {
    heights: &'a HeightModel,
}

impl<'a> ViewportMapper<'a> {
    pub fn new(heights: &'a HeightModel) -> Self {
        Self { heights }
    }

    pub fn heights(&self) -> &'a HeightModel {
        self.heights
    }

    pub fn total_extent(&self) -> u64 {
        self.heights.total_extent()
    }

    pub fn max_scroll_offset(&self, container_extent: u32) -> u64 {
        self.total_extent()
            .saturating_sub(container_extent as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64, container_extent: u32) -> u64 {
        offset.min(self.max_scroll_offset(container_extent))
    }

    pub fn range(&self, viewport: Viewport) -> VisibleRange {
        let total = self.total_extent();
        self.range_with_total(viewport, total)
    }

    /// Calls `f` for each row of [`Self::range`], top to bottom, with its position.
    pub fn for_each_item(&self, viewport: Viewport, mut f: impl FnMut(PlacedItem)) {
        let range = self.range(viewport);
        let mut top = range.leading_offset;
        for index in range.indices() {
            let height = self.heights.get(index);
            f(PlacedItem { index, top, height });
            top = top.saturating_add(self.heights.step(index));
        }
    }

    /// Top offset of row `index`, or `None` when out of range.
    pub fn item_top(&self, index: usize) -> Option<u64> {
        if index >= self.heights.len() {
            return None;
        }
        let top = match self.heights.mode() {
            HeightMode::Fixed => self.heights.fixed_step().saturating_mul(index as u64),
            HeightMode::Variable => match self.heights.prefix_index() {
                Some(sums) => sums.prefix_sum(index),
                None => (0..index).fold(0u64, |acc, i| acc.saturating_add(self.heights.step(i))),
            },
        };
        Some(top)
    }

    pub fn item(&self, index: usize) -> Option<PlacedItem> {
        let top = self.item_top(index)?;
        Some(PlacedItem {
            index,
            top,
            height: self.heights.get(index),
        })
    }

    /// The row whose `[top, top + step)` interval contains `offset`.
    ///
    /// Offsets inside a gap map to the row above it; offsets past the end map to the last row.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let count = self.heights.len();
        if count == 0 {
            return None;
        }
        let index = match self.heights.mode() {
            HeightMode::Fixed => (offset / self.fixed_step_nonzero()) as usize,
            HeightMode::Variable => match self.heights.prefix_index() {
                Some(sums) => sums.lower_bound(offset),
                None => {
                    let mut bottom = 0u64;
                    let mut consumed = 0usize;
                    for i in 0..count {
                        bottom = bottom.saturating_add(self.heights.step(i));
                        if bottom > offset {
                            break;
                        }
                        consumed += 1;
                    }
                    consumed
                }
            },
        };
        Some(index.min(count - 1))
    }

    /// Scroll offset that brings row `index` into view with the given alignment.
    ///
    /// The result is clamped to the reachable scroll range. `Align::Auto` keeps the current offset
    /// when the row is already fully visible.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align, viewport: Viewport) -> u64 {
        let count = self.heights.len();
        if count == 0 {
            return 0;
        }
        let Some(item) = self.item(index.min(count - 1)) else {
            return 0;
        };
        let view = viewport.container_extent as u64;

        let target = match align {
            Align::Start => item.top,
            Align::End => item.bottom().saturating_sub(view),
            Align::Center => {
                let center = item.top.saturating_add(item.height as u64 / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = viewport.scroll_offset;
                if item.top >= cur && item.bottom() <= viewport.end() {
                    cur
                } else if item.top < cur {
                    item.top
                } else {
                    item.bottom().saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_offset(target, viewport.container_extent)
    }

    fn range_with_total(&self, viewport: Viewport, total: u64) -> VisibleRange {
        let count = self.heights.len();
        if count == 0 || viewport.container_extent == 0 {
            return VisibleRange::empty(total);
        }

        let view = viewport.container_extent as u64;
        let offset = viewport.scroll_offset.min(total.saturating_sub(view));

        match self.heights.mode() {
            HeightMode::Fixed => self.fixed_range(offset, view, total),
            HeightMode::Variable => match self.heights.prefix_index() {
                Some(_) => self.indexed_range(offset, view, total),
                None => self.scanned_range(offset, view, total),
            },
        }
    }

    fn fixed_step_nonzero(&self) -> u64 {
        let step = self.heights.fixed_step();
        if step == 0 {
            vwarn!("fixed row step is 0; mapping with a step of 1");
            return 1;
        }
        step
    }

    fn fixed_range(&self, offset: u64, view: u64, total: u64) -> VisibleRange {
        let count = self.heights.len();
        let step = self.fixed_step_nonzero();

        let start = cmp::min(offset / step, (count - 1) as u64) as usize;
        let visible = view.div_ceil(step) as usize + FIXED_OVERSCAN;
        let end = cmp::min(start.saturating_add(visible), count);

        VisibleRange {
            start_index: start,
            end_index: end,
            leading_offset: self.heights.fixed_step().saturating_mul(start as u64),
            total_extent: total,
        }
    }

    // A row is visible when `bottom > offset && top < offset + view`, where `bottom` includes the
    // trailing gap. Both bounds are monotone in the index, so the visible rows are contiguous.
    fn scanned_range(&self, offset: u64, view: u64, total: u64) -> VisibleRange {
        let end_offset = offset.saturating_add(view);
        let mut top = 0u64;
        let mut first: Option<(usize, u64)> = None;
        let mut end = 0usize;

        for i in 0..self.heights.len() {
            if top >= end_offset {
                break;
            }
            let bottom = top.saturating_add(self.heights.step(i));
            if bottom > offset {
                if first.is_none() {
                    first = Some((i, top));
                }
                end = i + 1;
            }
            top = bottom;
        }

        match first {
            Some((start, leading_offset)) => VisibleRange {
                start_index: start,
                end_index: end,
                leading_offset,
                total_extent: total,
            },
            None => VisibleRange::empty(total),
        }
    }

    fn indexed_range(&self, offset: u64, view: u64, total: u64) -> VisibleRange {
        let Some(sums) = self.heights.prefix_index() else {
            return self.scanned_range(offset, view, total);
        };
        let count = self.heights.len();
        // Rows whose bottom is at or above `offset` are scrolled past.
        let start = sums.lower_bound(offset);
        // Rows with `top <= offset + view - 1`; `view > 0` here.
        let last_top = offset.saturating_add(view) - 1;
        let end = cmp::min(sums.lower_bound(last_top) + 1, count);

        if start >= end {
            return VisibleRange::empty(total);
        }
        VisibleRange {
            start_index: start,
            end_index: end,
            leading_offset: sums.prefix_sum(start),
            total_extent: total,
        }
    }
}
