use alloc::vec::Vec;
use core::fmt;
use core::mem;

use vlist::{
    Align, HeightMode, HeightModel, LoadState, LoadTicket, LoadTrigger, PlacedItem, RequestMore,
    Settlement, ViewportMapper, Viewport, VisibleRange,
};

use crate::options::ItemKeyFn;
use crate::{
    AmbientViewport, ContainerExtent, RenderFrame, RenderItem, RenderKey, RenderWindowOptions,
};

#[derive(Clone, Copy, Debug, Default)]
struct Pending {
    recompute: bool,
    evaluate_load: bool,
    notify: bool,
    // Latest scroll event seen since the last flush.
    scrolled: Option<Viewport>,
}

/// The host-facing list component.
///
/// A `RenderWindow` owns the height model, the load trigger and the current viewport. Hosts feed
/// it UI events (`on_scroll`, `on_resize`, measurements, dataset changes) and read back
/// [`RenderWindow::frame`]: the rows to mount, their keys and positions, the content height, and
/// whether a fetch is in flight.
///
/// Each event recomputes the window synchronously. Wrap several events in
/// [`RenderWindow::batch_update`] to recompute and notify once.
///
/// The `request_more` callback runs inside an event handler and must not call back into the
/// window. It should start the fetch and report the outcome later via
/// [`RenderWindow::settle_load`].
#[derive(Clone, Debug)]
pub struct RenderWindow<K = u64> {
    options: RenderWindowOptions<K>,
    container_extent: u32,
    heights: HeightModel,
    viewport: Viewport,
    trigger: LoadTrigger,
    range: VisibleRange,
    items: Vec<RenderItem<K>>,
    batch_depth: usize,
    pending: Pending,
}

impl<K> RenderWindow<K> {
    /// Builds the window and computes the initial frame.
    ///
    /// No fetch is evaluated on construction; the first scroll, resize or dataset change does.
    pub fn new(options: RenderWindowOptions<K>) -> Self {
        let container_extent = options.container_extent.resolve_or_default(options.ambient);
        let heights = HeightModel::new(&options.layout, options.count);
        let trigger = LoadTrigger::new(options.request_more.clone());
        vdebug!(
            count = options.count,
            container_extent,
            mode = ?heights.mode(),
            "RenderWindow::new"
        );
        let mut window = Self {
            options,
            container_extent,
            heights,
            viewport: Viewport::new(0, container_extent),
            trigger,
            range: VisibleRange::default(),
            items: Vec::new(),
            batch_depth: 0,
            pending: Pending::default(),
        };
        window.recompute();
        window
    }

    pub fn options(&self) -> &RenderWindowOptions<K> {
        &self.options
    }

    /// Handles a scroll event with the container's raw scroll position.
    ///
    /// Negative positions (elastic overscroll) are treated as 0.
    pub fn on_scroll(&mut self, raw_offset: i64) {
        let viewport = Viewport::from_raw(raw_offset, self.container_extent);
        vtrace!(scroll_offset = viewport.scroll_offset, "RenderWindow::on_scroll");
        self.viewport = viewport;
        self.pending.recompute = true;
        self.pending.evaluate_load = true;
        self.pending.scrolled = Some(viewport);
        self.flush();
    }

    /// Handles a measured change of the container's height.
    pub fn on_resize(&mut self, container_extent: u32) {
        if container_extent == self.container_extent {
            return;
        }
        vdebug!(
            from = self.container_extent,
            to = container_extent,
            "RenderWindow::on_resize"
        );
        self.container_extent = container_extent;
        self.viewport.container_extent = container_extent;
        self.pending.recompute = true;
        self.pending.evaluate_load = true;
        self.flush();
    }

    /// Replaces the configured container extent and resolves it again.
    pub fn set_container_extent(&mut self, container_extent: impl Into<ContainerExtent>) {
        self.options.container_extent = container_extent.into();
        self.resolve_container_extent();
    }

    /// Updates the ambient viewport used to resolve `vh`/`vw` extents.
    pub fn set_ambient_viewport(&mut self, ambient: Option<AmbientViewport>) {
        self.options.ambient = ambient;
        self.resolve_container_extent();
    }

    /// Appends rows to the current dataset. Measurements and any in-flight fetch are kept.
    ///
    /// A smaller `count` cannot be an append and is handled as [`Self::replace_dataset`].
    pub fn extend_dataset(&mut self, count: usize) {
        let len = self.heights.len();
        if count < len {
            vdebug!(from = len, to = count, "RenderWindow: shrink treated as replacement");
            self.replace_dataset(count);
            return;
        }
        if count == len {
            return;
        }
        vdebug!(from = len, to = count, "RenderWindow::extend_dataset");
        self.options.count = count;
        self.heights.grow(count);
        self.pending.recompute = true;
        self.pending.evaluate_load = true;
        self.flush();
    }

    /// Swaps in a new dataset of `count` rows.
    ///
    /// Measurements are dropped, and a fetch issued for the previous dataset becomes stale: its
    /// completion will not clear the loading state of the new one.
    pub fn replace_dataset(&mut self, count: usize) {
        vdebug!(from = self.heights.len(), to = count, "RenderWindow::replace_dataset");
        self.options.count = count;
        self.heights.reset(count);
        self.trigger.reset_generation();
        self.pending.recompute = true;
        self.pending.evaluate_load = true;
        self.flush();
    }

    pub fn set_item_key(&mut self, item_key: Option<ItemKeyFn<K>>) {
        self.options.item_key = item_key;
        self.pending.recompute = true;
        self.flush();
    }

    pub fn set_request_more(&mut self, request_more: Option<RequestMore>) {
        self.trigger.set_request_more(request_more.clone());
        self.options.request_more = request_more;
    }

    /// Reports the rendered height of a row. Ignored in fixed mode, for out-of-range indices and
    /// for a height of 0.
    ///
    /// Returns whether the stored height changed. Rows below shift, but keep their keys.
    pub fn record_height(&mut self, index: usize, height: u32) -> bool {
        let changed = self.heights.record(index, height);
        if changed {
            self.pending.recompute = true;
            self.flush();
        }
        changed
    }

    /// Reports several measurements with a single recomputation. Returns how many changed.
    pub fn record_heights(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) -> usize {
        let changed = self.heights.record_many(measurements);
        if changed > 0 {
            self.pending.recompute = true;
            self.flush();
        }
        changed
    }

    /// Completes the fetch identified by `ticket`.
    ///
    /// Append the new rows with [`Self::extend_dataset`] before settling; evaluation does not run
    /// again until the next scroll, resize or dataset change.
    pub fn settle_load<E: fmt::Display>(
        &mut self,
        ticket: LoadTicket,
        result: Result<(), E>,
    ) -> Settlement {
        let settlement = self.trigger.settle(ticket, result);
        if settlement == Settlement::Applied {
            self.pending.notify = true;
            self.flush();
        }
        settlement
    }

    /// Batches multiple updates into one recomputation and one `on_change` notification.
    ///
    /// Scroll events inside the batch are coalesced: `on_scroll` fires once, with the last
    /// viewport.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);

        f(self);

        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        self.flush();
    }

    /// Scrolls so that row `index` is in view. Returns the applied offset, which the host should
    /// write to its scroll container.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.viewport.scroll_offset = offset;
        self.pending.recompute = true;
        self.pending.evaluate_load = true;
        self.flush();
        offset
    }

    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        self.mapper()
            .scroll_to_index_offset(index, align, self.mapped_viewport())
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.mapper().index_at_offset(offset)
    }

    pub fn item(&self, index: usize) -> Option<PlacedItem> {
        self.mapper().item(index)
    }

    pub fn count(&self) -> usize {
        self.heights.len()
    }

    /// The viewport as last reported by the host.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn container_extent(&self) -> u32 {
        self.container_extent
    }

    pub fn total_extent(&self) -> u64 {
        self.heights.total_extent()
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.range
    }

    pub fn items(&self) -> &[RenderItem<K>] {
        &self.items
    }

    pub fn frame(&self) -> RenderFrame<'_, K> {
        RenderFrame {
            container_extent: self.container_extent,
            total_extent: self.range.total_extent,
            mode: self.heights.mode(),
            loading: self.is_loading(),
            range: self.range,
            items: &self.items,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.trigger.is_pending()
    }

    pub fn load_state(&self) -> LoadState {
        self.trigger.state()
    }

    pub fn generation(&self) -> u64 {
        self.trigger.generation()
    }

    pub fn heights(&self) -> &HeightModel {
        &self.heights
    }

    pub fn mode(&self) -> HeightMode {
        self.heights.mode()
    }

    fn mapper(&self) -> ViewportMapper<'_> {
        ViewportMapper::new(&self.heights)
    }

    // The host viewport with the offset clamped to the reachable range.
    fn mapped_viewport(&self) -> Viewport {
        let offset = self
            .mapper()
            .clamp_scroll_offset(self.viewport.scroll_offset, self.container_extent);
        Viewport::new(offset, self.container_extent)
    }

    fn resolve_container_extent(&mut self) {
        let extent = self
            .options
            .container_extent
            .resolve_or_default(self.options.ambient);
        self.on_resize(extent);
    }

    fn flush(&mut self) {
        if self.batch_depth > 0 {
            return;
        }
        let pending = mem::take(&mut self.pending);
        let mut changed = pending.notify;

        if pending.recompute {
            self.recompute();
            changed = true;
        }
        if pending.evaluate_load {
            let viewport = self.mapped_viewport();
            let total = self.heights.total_extent();
            if self
                .trigger
                .evaluate(viewport, total, self.heights.len())
                .is_some()
            {
                changed = true;
            }
        }
        if let Some(viewport) = pending.scrolled {
            if let Some(cb) = self.options.on_scroll.clone() {
                cb(self, viewport);
            }
        }
        if changed {
            if let Some(cb) = self.options.on_change.clone() {
                cb(self);
            }
        }
    }

    fn recompute(&mut self) {
        let viewport = self.mapped_viewport();
        let mapper = ViewportMapper::new(&self.heights);
        let range = mapper.range(viewport);

        let fixed = self.heights.mode() == HeightMode::Fixed;
        let gap = self.heights.gap();
        let inset_start = gap / 2;
        let inset_end = gap - inset_start;

        self.items.clear();
        self.items.reserve(range.len());
        let mut top = range.leading_offset;
        for index in range.indices() {
            let key = match self.options.item_key.as_ref().and_then(|f| f(index)) {
                Some(key) => RenderKey::Key(key),
                None => RenderKey::Index(index),
            };
            self.items.push(RenderItem {
                key,
                index,
                top,
                height: fixed.then(|| self.heights.get(index)),
                inset_start,
                inset_end,
            });
            top = top.saturating_add(self.heights.step(index));
        }

        vtrace!(
            start = range.start_index,
            end = range.end_index,
            total = range.total_extent,
            "RenderWindow: recomputed"
        );
        self.range = range;
    }
}
