use alloc::sync::Arc;

use vlist::{LayoutConfig, LoadTicket, RequestMore, VariableLayout, Viewport};

use crate::window::RenderWindow;
use crate::{AmbientViewport, ContainerExtent};

/// Selects a stable key for the item at an index. Returning `None` falls back to the index.
pub type ItemKeyFn<K> = Arc<dyn Fn(usize) -> Option<K> + Send + Sync>;

/// Fired on every scroll event, after the window has recomputed. Receives the viewport as
/// reported by the host (negative offsets already clamped to 0).
///
/// Inside [`RenderWindow::batch_update`] scroll events are coalesced: the callback fires once
/// when the batch ends, with the last viewport.
pub type OnScrollCallback<K> = Arc<dyn Fn(&RenderWindow<K>, Viewport) + Send + Sync>;

/// Fired after every recomputation of the render window.
pub type OnChangeCallback<K> = Arc<dyn Fn(&RenderWindow<K>) + Send + Sync>;

/// Configuration for [`RenderWindow`].
///
/// | Option | Default |
/// |---|---|
/// | `count` | required |
/// | `container_extent` | required; unresolvable values fall back to 400 |
/// | `ambient` | `None` (`vh`/`vw` extents are unresolvable) |
/// | `layout.item_height` | 50 |
/// | `layout.estimated_height` | 50 |
/// | `layout.gap` | 0 |
/// | `layout.fixed_height` | `true` |
/// | `layout.variable_layout` | `Scan` |
/// | `item_key` | positional index |
/// | `request_more` | none |
/// | `on_scroll` | none |
/// | `on_change` | none |
///
/// Closures are stored in `Arc`s, so cloning options is cheap.
pub struct RenderWindowOptions<K = u64> {
    /// Number of rows in the dataset.
    pub count: usize,
    pub container_extent: ContainerExtent,
    pub ambient: Option<AmbientViewport>,
    pub layout: LayoutConfig,
    pub item_key: Option<ItemKeyFn<K>>,
    pub request_more: Option<RequestMore>,
    pub on_scroll: Option<OnScrollCallback<K>>,
    pub on_change: Option<OnChangeCallback<K>>,
}

impl<K> Clone for RenderWindowOptions<K> {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            container_extent: self.container_extent.clone(),
            ambient: self.ambient,
            layout: self.layout,
            item_key: self.item_key.clone(),
            request_more: self.request_more.clone(),
            on_scroll: self.on_scroll.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl<K> RenderWindowOptions<K> {
    pub fn new(count: usize, container_extent: impl Into<ContainerExtent>) -> Self {
        Self {
            count,
            container_extent: container_extent.into(),
            ambient: None,
            layout: LayoutConfig::default(),
            item_key: None,
            request_more: None,
            on_scroll: None,
            on_change: None,
        }
    }

    pub fn with_ambient(mut self, ambient: AmbientViewport) -> Self {
        self.ambient = Some(ambient);
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_item_height(mut self, item_height: u32) -> Self {
        self.layout.item_height = item_height;
        self
    }

    pub fn with_estimated_height(mut self, estimated_height: u32) -> Self {
        self.layout.estimated_height = estimated_height;
        self
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.layout.gap = gap;
        self
    }

    pub fn with_fixed_height(mut self, fixed_height: bool) -> Self {
        self.layout.fixed_height = fixed_height;
        self
    }

    pub fn with_variable_layout(mut self, variable_layout: VariableLayout) -> Self {
        self.layout.variable_layout = variable_layout;
        self
    }

    pub fn with_item_key(
        mut self,
        item_key: impl Fn(usize) -> Option<K> + Send + Sync + 'static,
    ) -> Self {
        self.item_key = Some(Arc::new(item_key));
        self
    }

    pub fn with_request_more(
        mut self,
        request_more: impl Fn(LoadTicket) + Send + Sync + 'static,
    ) -> Self {
        self.request_more = Some(Arc::new(request_more));
        self
    }

    pub fn with_on_scroll(
        mut self,
        on_scroll: impl Fn(&RenderWindow<K>, Viewport) + Send + Sync + 'static,
    ) -> Self {
        self.on_scroll = Some(Arc::new(on_scroll));
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: impl Fn(&RenderWindow<K>) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(on_change));
        self
    }
}

impl<K> core::fmt::Debug for RenderWindowOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderWindowOptions")
            .field("count", &self.count)
            .field("container_extent", &self.container_extent)
            .field("ambient", &self.ambient)
            .field("layout", &self.layout)
            .field("item_key", &self.item_key.is_some())
            .field("request_more", &self.request_more.is_some())
            .finish_non_exhaustive()
    }
}
